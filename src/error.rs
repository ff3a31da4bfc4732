use std::io;

use thiserror::Error;

/// Error type shared by the whole pipeline.
///
/// Unknown tokens, empty documents and classification ties are not errors;
/// they have defined fallback behavior and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Training was invoked without usable samples.
    /// No partial model is produced.
    #[error("insufficient training data: {0}")]
    InsufficientTrainingData(String),

    /// A serialized model could not be reconstructed.
    #[error("corrupt model: {0}")]
    CorruptModel(String),

    /// A training parameter is out of range.
    #[error("invalid training parameter: {0}")]
    InvalidParameter(String),

    /// Serializing a model failed.
    #[error("model encode error: {0}")]
    Encode(String),

    /// A labeled corpus line does not follow `<label>\t<text>`.
    #[error("malformed corpus line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// I/O errors from stopword, corpus or model sources, passed through as-is.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn insufficient_training_data<S: Into<String>>(msg: S) -> Self {
        Error::InsufficientTrainingData(msg.into())
    }

    pub fn corrupt_model<S: Into<String>>(msg: S) -> Self {
        Error::CorruptModel(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
