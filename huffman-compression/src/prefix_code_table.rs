use std::collections::BTreeMap;

use crate::tree::{Node, Tree};

/// Bits of a single code, one `0` or `1` per element, root first.
pub type Code = Vec<u8>;

/// Mapping from symbol to its prefix-free code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable(BTreeMap<u8, Code>);

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.0.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.0.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Dense lookup indexed by symbol, used on the hot encoding path.
    pub(crate) fn to_lookup(&self) -> Vec<Option<Code>> {
        let mut lookup = vec![None; 256];
        for (symbol, code) in self.iter() {
            lookup[symbol as usize] = Some(code.clone());
        }
        lookup
    }
}

/// Walks `tree` and records the path to every leaf, `0` for left and `1`
/// for right.
pub fn generate_codes(tree: &Tree) -> CodeTable {
    let mut result = BTreeMap::new();
    let mut pending = vec![(tree.root(), Code::new())];

    while let Some((id, current_code)) = pending.pop() {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => {
                result.insert(*symbol, current_code);
            }
            Node::Internal { left, right, .. } => {
                if let Some(right) = right {
                    let mut code = current_code.clone();
                    code.push(1);
                    pending.push((*right, code));
                }
                let mut code = current_code;
                code.push(0);
                pending.push((*left, code));
            }
        }
    }

    CodeTable(result)
}
