use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("root element is not <svg>")]
    NotSvg,

    #[error("malformed transform {0:?}")]
    MalformedTransform(String),

    #[error("invalid path token at {0:?}")]
    InvalidPathToken(String),

    #[error("unsupported path command {0:?}")]
    UnsupportedPathCommand(char),

    #[error("invalid unit in {0:?}, expected px")]
    InvalidUnit(String),

    #[error("invalid value {value:?} for {attribute}")]
    InvalidAttributeValue {
        attribute: &'static str,
        value: String,
    },

    #[error("gzip: {0}")]
    Gzip(std::io::Error),

    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
