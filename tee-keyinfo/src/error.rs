//! Key descriptor error types

use thiserror::Error;

pub type KeyInfoResult<T> = Result<T, KeyInfoError>;

#[derive(Error, Debug)]
pub enum KeyInfoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}
