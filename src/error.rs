//! Error types for rational arithmetic and the pi engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("attempted to divide by zero")]
    DivideByZero,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("value does not fit in {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
