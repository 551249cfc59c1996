//! Ошибки библиотеки

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Строка времени не в формате "HH:MM"
    #[error("invalid clock time {input:?}: {reason}")]
    InvalidTime { input: String, reason: String },

    /// Вектор признаков не совпадает со схемой, на которой обучалась модель
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("model not trained")]
    NotTrained,

    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("failed to save model to {path}: {reason}")]
    ModelSave { path: PathBuf, reason: String },

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("need at least {required} records for training, got {actual}")]
    EmptyDataset { required: usize, actual: usize },

    #[error("training failed: {0}")]
    Training(String),
}

impl Error {
    /// Ошибка во входных данных пользователя (а не на стороне сервера)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidTime { .. })
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Dataset(e.to_string())
    }
}
