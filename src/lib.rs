//! Restimator - предсказание длительности сна и времени пробуждения

pub mod api;
pub mod config;
pub mod console;
pub mod dataset;
pub mod error;
pub mod models;
pub mod predictor;
pub mod preprocessing;
pub mod training;
pub mod types;

pub use error::{Error, Result};
pub use models::*;
pub use predictor::SleepPredictor;
pub use preprocessing::*;
pub use types::*;

/// Инициализация логирования для бинарников (RUST_LOG, по умолчанию info)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
