use std::io;

use derive_more::{Display, Error};

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Display, Error)]
pub enum HuffmanError {
    #[display(fmt = "io error: {}", _0)]
    Io(#[error(source)] io::Error),

    #[display(fmt = "malformed header: {}", reason)]
    MalformedHeader { reason: String },

    #[display(
        fmt = "corrupt stream: decoded {} of {} expected symbols",
        decoded,
        expected
    )]
    CorruptStream { expected: u64, decoded: u64 },
}

impl HuffmanError {
    pub(crate) fn malformed_header(reason: impl Into<String>) -> Self {
        HuffmanError::MalformedHeader {
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for HuffmanError {
    fn from(err: io::Error) -> Self {
        HuffmanError::Io(err)
    }
}
