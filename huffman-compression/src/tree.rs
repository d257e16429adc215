use std::{cmp::Reverse, collections::BinaryHeap};

use log::debug;

use crate::frequency::FrequencyTable;

/// Index of a node inside a [`Tree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    /// `right` is only ever `None` for the synthetic root built over a
    /// single-symbol alphabet.
    Internal {
        weight: u64,
        left: NodeId,
        right: Option<NodeId>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Huffman prefix-code tree stored as an arena of nodes.
///
/// Building is deterministic: nodes are merged by ascending weight and ties
/// are broken by the order nodes entered the queue. Leaves enter in ascending
/// symbol order and every merged node enters after all existing ones, so the
/// encoder and the decoder build identical trees from the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Returns `None` for an empty table; there is nothing to encode.
    pub fn new(table: &FrequencyTable) -> Option<Self> {
        let mut trees = Trees::default();
        for (symbol, weight) in table.iter() {
            trees.push(Node::Leaf { symbol, weight });
        }

        let tree = trees.merge()?;
        debug!(
            "built tree with {} nodes over {} symbols, total weight {}",
            tree.nodes.len(),
            table.len(),
            tree.weight()
        );
        Some(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Weight of the root, equal to the number of symbols in the input.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Queue entry ordered by weight first, then by id. Ids are handed out in
/// insertion order, so equal weights pop oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    weight: u64,
    id: NodeId,
}

#[derive(Default)]
struct Trees {
    nodes: Vec<Node>,
    queue: BinaryHeap<Reverse<Pending>>,
}

impl Trees {
    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let pending = Pending {
            weight: node.weight(),
            id,
        };
        self.nodes.push(node);
        self.queue.push(Reverse(pending));
        id
    }

    fn merge(mut self) -> Option<Tree> {
        loop {
            let result = self.pop_lowest()?;
            match result {
                PopResult::TreesToMerge { left, right } => {
                    let weight = left.weight + right.weight;
                    self.push(Node::Internal {
                        weight,
                        left: left.id,
                        right: Some(right.id),
                    });
                }
                PopResult::Single(last) => {
                    // a lone leaf would get an empty code, so it is hung to
                    // the left of a synthetic root and gets "0"
                    let root = if matches!(self.nodes[last.id.0], Node::Leaf { .. }) {
                        self.push_root(Node::Internal {
                            weight: last.weight,
                            left: last.id,
                            right: None,
                        })
                    } else {
                        last.id
                    };
                    return Some(Tree {
                        nodes: self.nodes,
                        root,
                    });
                }
            }
        }
    }

    fn push_root(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn pop_lowest(&mut self) -> Option<PopResult> {
        let Reverse(left) = self.queue.pop()?;

        let item_result = match self.queue.pop() {
            Some(Reverse(right)) => PopResult::TreesToMerge { left, right },
            None => PopResult::Single(left),
        };

        Some(item_result)
    }
}

enum PopResult {
    TreesToMerge { left: Pending, right: Pending },
    Single(Pending),
}

#[cfg(test)]
mod tests {
    use super::{Node, Tree};
    use crate::frequency::FrequencyTable;

    fn leaf_depths(tree: &Tree) -> Vec<(u8, usize)> {
        let mut depths = vec![];
        let mut stack = vec![(tree.root(), 0)];
        while let Some((id, depth)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => depths.push((*symbol, depth)),
                Node::Internal { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    if let Some(right) = right {
                        stack.push((*right, depth + 1));
                    }
                }
            }
        }
        depths.sort();
        depths
    }

    #[test]
    fn test_merging() {
        // char_mapping test data comes from
        // https://opendsa-server.cs.vt.edu/ODSA/Books/CS3/html/Huffman.html
        let char_mapping = [
            (b'Z', 2),
            (b'K', 7),
            (b'M', 24),
            (b'C', 32),
            (b'U', 37),
            (b'D', 42),
            (b'L', 42),
            (b'E', 120),
        ];
        let table = FrequencyTable::from_iter(char_mapping);

        let tree = Tree::new(&table).unwrap();

        assert_eq!(tree.weight(), 306);
        // 8 leaves and 7 merges
        assert_eq!(tree.len(), 15);
        assert_eq!(
            leaf_depths(&tree),
            vec![
                (b'C', 4),
                (b'D', 3),
                (b'E', 1),
                (b'K', 6),
                (b'L', 3),
                (b'M', 5),
                (b'U', 3),
                (b'Z', 6),
            ]
        );
    }

    #[test]
    fn test_single_symbol_gets_synthetic_root() {
        let table = FrequencyTable::from_iter([(b'x', 1000)]);

        let tree = Tree::new(&table).unwrap();

        assert_eq!(tree.weight(), 1000);
        match tree.node(tree.root()) {
            Node::Internal { left, right, .. } => {
                assert_eq!(right, &None);
                assert_eq!(
                    tree.node(*left),
                    &Node::Leaf {
                        symbol: b'x',
                        weight: 1000
                    }
                );
            }
            node => panic!("expected an internal root, got {node:?}"),
        }
    }

    #[test]
    fn test_empty_table_has_no_tree() {
        assert_eq!(Tree::new(&FrequencyTable::default()), None);
    }

    #[test]
    fn test_equal_weights_are_merged_in_insertion_order() {
        let table = FrequencyTable::from_iter([(b'a', 1), (b'b', 1), (b'c', 1), (b'd', 1)]);

        let tree = Tree::new(&table).unwrap();
        let Node::Internal {
            left,
            right: Some(right),
            ..
        } = tree.node(tree.root())
        else {
            panic!("expected a full root");
        };

        // (a b) is merged first, then (c d), then the two pairs
        let first_pair = tree.node(*left);
        let second_pair = tree.node(*right);
        let children = |node: &Node| match node {
            Node::Internal {
                left,
                right: Some(right),
                ..
            } => (tree.node(*left).clone(), tree.node(*right).clone()),
            _ => panic!("expected a pair"),
        };
        assert_eq!(
            children(first_pair),
            (
                Node::Leaf {
                    symbol: b'a',
                    weight: 1
                },
                Node::Leaf {
                    symbol: b'b',
                    weight: 1
                }
            )
        );
        assert_eq!(
            children(second_pair),
            (
                Node::Leaf {
                    symbol: b'c',
                    weight: 1
                },
                Node::Leaf {
                    symbol: b'd',
                    weight: 1
                }
            )
        );
    }

    #[test]
    fn test_building_is_deterministic() {
        let table = FrequencyTable::from(&b"the quick brown fox jumps over the lazy dog"[..]);

        assert_eq!(Tree::new(&table), Tree::new(&table));
    }
}
