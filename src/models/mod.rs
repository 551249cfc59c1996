/// ML модели и постобработка предсказаний

pub mod calibration;
pub mod forest;
pub mod sleep_model;
pub mod wake_time;

pub use calibration::calibrate;
pub use forest::{RandomForestRegressor, RegressionTree};
pub use sleep_model::{ModelMetadata, Regressor, SleepModel, ValidationMetrics, DEFAULT_MODEL_PATH};
