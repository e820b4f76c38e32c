//! Errors - 結果レコード生成時のエラー
//!
//! Status codes describe the outcome of the *host's* operation; these errors
//! describe failures of the encoder itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    /// An argument could not be converted to a JSON value
    /// (e.g. a map with non-string keys).
    #[error("argument #{index} cannot be encoded: {source}")]
    Argument {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid exec info: {0}")]
    InvalidExecInfo(String),

    #[error("invalid encoder config: {0}")]
    InvalidConfig(String),
}
