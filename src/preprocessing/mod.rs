/// Модуль предобработки данных

pub mod clock;
pub mod feature_engineering;

pub use clock::{minutes_to_time, time_to_minutes};
pub use feature_engineering::{
    ColumnKind, ColumnSpec, FeatureEngineer, FeatureSchema, FeatureVector, FEATURE_COLUMNS,
    SCHEMA_VERSION,
};
