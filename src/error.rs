use thiserror::Error;

use crate::parse::ParseError;

/// Unified error type covering condition parsing, XML and I/O.
///
/// Returned by the scanning helpers in [`lint`](crate::lint).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid proxy XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
