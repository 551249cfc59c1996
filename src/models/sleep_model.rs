//! Обученная модель сна: схема признаков + лес + метаданные обучения

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::forest::RandomForestRegressor;
use crate::preprocessing::{FeatureSchema, FeatureVector, SCHEMA_VERSION};

/// Путь к артефакту модели по умолчанию
pub const DEFAULT_MODEL_PATH: &str = "sleep_model.json";

/// Чёрный ящик `признаки -> сырые часы сна`
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub mae: f64,
    pub r2: f64,
    pub n_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub trained_at: DateTime<Utc>,
    pub n_samples: usize,
    pub n_estimators: usize,
    pub max_depth: usize,
    pub validation: Option<ValidationMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepModel {
    pub schema: FeatureSchema,
    pub forest: RandomForestRegressor,
    pub metadata: ModelMetadata,
}

impl SleepModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |reason: String| Error::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let model: SleepModel =
            serde_json::from_slice(&bytes).map_err(|e| load_error(e.to_string()))?;

        if model.schema.version != SCHEMA_VERSION {
            return Err(load_error(format!(
                "schema version {} is not supported (expected {})",
                model.schema.version, SCHEMA_VERSION
            )));
        }
        if !model.forest.is_fitted() {
            return Err(load_error("artifact contains an untrained forest".to_string()));
        }

        tracing::info!(
            path = %path.display(),
            trained_at = %model.metadata.trained_at,
            trees = model.metadata.n_estimators,
            "sleep model loaded"
        );
        Ok(model)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let save_error = |reason: String| Error::ModelSave {
            path: path.to_path_buf(),
            reason,
        };

        let json = serde_json::to_vec(self).map_err(|e| save_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| save_error(e.to_string()))?;
        Ok(())
    }
}

impl Regressor for SleepModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let row = self.schema.encode_row(features)?;
        let predictions = self.forest.predict(&row)?;
        predictions
            .get(0)
            .copied()
            .ok_or_else(|| Error::Training("forest returned no prediction".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[allow(non_snake_case)]
    fn tiny_model() -> SleepModel {
        let schema = FeatureSchema::new(["cloudy", "rainy", "sunny"]);
        let rows = vec![
            FeatureVector {
                bedtime: 1320,
                screen_time: 10,
                stress: 2,
                weather: "sunny".to_string(),
                alarms: 1,
            },
            FeatureVector {
                bedtime: 60,
                screen_time: 120,
                stress: 9,
                weather: "rainy".to_string(),
                alarms: 3,
            },
        ];
        let X = schema.encode_batch(&rows).unwrap();
        let y = array![8.0, 5.0];
        let mut forest = RandomForestRegressor::new(3).with_max_depth(3).with_random_state(42);
        forest.fit(&X, &y).unwrap();

        SleepModel {
            schema,
            forest,
            metadata: ModelMetadata {
                trained_at: Utc::now(),
                n_samples: 2,
                n_estimators: 3,
                max_depth: 3,
                validation: None,
            },
        }
    }

    #[test]
    fn save_then_load_preserves_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = tiny_model();
        model.save(&path).unwrap();

        let loaded = SleepModel::load(&path).unwrap();
        let features = FeatureVector {
            bedtime: 1320,
            screen_time: 10,
            stress: 2,
            weather: "sunny".to_string(),
            alarms: 1,
        };
        assert_eq!(
            Regressor::predict(&model, &features).unwrap(),
            Regressor::predict(&loaded, &features).unwrap()
        );
        assert_eq!(loaded.schema, model.schema);
    }

    #[test]
    fn missing_artifact_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = SleepModel::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::ModelLoad { .. }));
    }

    #[test]
    fn corrupt_artifact_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"{not json").unwrap();
        assert!(matches!(
            SleepModel::load(file.path()),
            Err(Error::ModelLoad { .. })
        ));
    }

    #[test]
    fn future_schema_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut model = tiny_model();
        model.schema.version = SCHEMA_VERSION + 1;
        model.save(&path).unwrap();

        let err = SleepModel::load(&path).unwrap_err();
        assert!(err.to_string().contains("schema version"));
    }

    #[test]
    fn unknown_weather_fails_inference() {
        let model = tiny_model();
        let features = FeatureVector {
            bedtime: 1320,
            screen_time: 10,
            stress: 2,
            weather: "foggy".to_string(),
            alarms: 1,
        };
        assert!(matches!(
            Regressor::predict(&model, &features),
            Err(Error::SchemaMismatch(_))
        ));
    }
}
