//! Офлайн-обучение модели сна

#![allow(non_snake_case)]

use chrono::Utc;
use linfa::prelude::*;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::models::{ModelMetadata, RandomForestRegressor, SleepModel, ValidationMetrics};
use crate::preprocessing::{FeatureEngineer, FeatureSchema};
use crate::types::TrainingRecord;

/// Минимум строк, чтобы было что делить на train/test
pub const MIN_TRAINING_RECORDS: usize = 2;

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub random_state: u64,
    /// Доля отложенной выборки
    pub test_ratio: f32,
    pub split_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            max_depth: 12,
            random_state: 42,
            test_ratio: 0.2,
            split_seed: 98,
        }
    }
}

pub fn train(records: &[TrainingRecord], config: &TrainingConfig) -> Result<SleepModel> {
    if records.len() < MIN_TRAINING_RECORDS {
        return Err(Error::EmptyDataset {
            required: MIN_TRAINING_RECORDS,
            actual: records.len(),
        });
    }
    if !(0.0..1.0).contains(&config.test_ratio) {
        return Err(Error::Training(format!(
            "test ratio must be in [0, 1), got {}",
            config.test_ratio
        )));
    }

    let features = FeatureEngineer::from_records(records);
    let schema = FeatureSchema::fit(&features)?;
    let X = schema.encode_batch(&features)?;
    let y: Array1<f64> = records.iter().map(|r| r.sleep_duration).collect();

    // Перемешивание и разделение train/test
    let mut rng = StdRng::seed_from_u64(config.split_seed);
    let (train_set, valid_set) = DatasetBase::new(X, y)
        .shuffle(&mut rng)
        .split_with_ratio(1.0 - config.test_ratio);

    let mut forest = RandomForestRegressor::new(config.n_estimators)
        .with_max_depth(config.max_depth)
        .with_random_state(config.random_state);
    forest.fit(train_set.records(), train_set.targets())?;

    let validation = if valid_set.records().nrows() > 0 {
        let predictions = forest.predict(valid_set.records())?;
        let mae = predictions
            .mean_absolute_error(valid_set.targets())
            .map_err(|e| Error::Training(e.to_string()))?;
        let r2 = predictions
            .r2(valid_set.targets())
            .map_err(|e| Error::Training(e.to_string()))?;
        tracing::info!(
            "Sleep model trained. MAE: {:.2}, R2: {:.2} on {} held-out rows",
            mae,
            r2,
            predictions.len()
        );
        Some(ValidationMetrics {
            mae,
            r2,
            n_samples: predictions.len(),
        })
    } else {
        tracing::warn!("Validation split is empty, metrics skipped");
        None
    };

    let metadata = ModelMetadata {
        trained_at: Utc::now(),
        n_samples: train_set.records().nrows(),
        n_estimators: forest.n_estimators(),
        max_depth: forest.max_depth(),
        validation,
    };

    Ok(SleepModel {
        schema,
        forest,
        metadata,
    })
}
