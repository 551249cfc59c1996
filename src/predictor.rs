//! Общий конвейер предсказания для HTTP API и консоли

use std::sync::Arc;

use crate::error::Result;
use crate::models::calibration::calibrate;
use crate::models::wake_time::{is_oversleep, oversleep_message, wake_minutes};
use crate::models::Regressor;
use crate::preprocessing::{minutes_to_time, time_to_minutes, FeatureEngineer};
use crate::types::{SleepPrediction, SleepQuery};

#[derive(Clone)]
pub struct SleepPredictor {
    model: Arc<dyn Regressor>,
}

impl SleepPredictor {
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self { model }
    }

    /// Запрос -> признаки -> модель -> калибровка -> время пробуждения
    pub fn predict(&self, query: &SleepQuery) -> Result<SleepPrediction> {
        let features = FeatureEngineer::encode(query)?;
        let desired_wake = time_to_minutes(&query.desired_wake)?;

        let raw_hours = self.model.predict(&features)?;
        let hours = calibrate(raw_hours);

        let predicted_wake = wake_minutes(features.bedtime, hours);
        let oversleep = is_oversleep(predicted_wake, desired_wake);

        tracing::debug!(raw_hours, hours, predicted_wake, desired_wake, "sleep predicted");

        Ok(SleepPrediction {
            sleep_duration: round2(hours),
            predicted_wake_time: minutes_to_time(predicted_wake),
            oversleep_warning: oversleep,
            message: oversleep_message(oversleep).to_string(),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
