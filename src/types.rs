/// Типы данных для предсказания сна

use serde::{Deserialize, Serialize};

/// Запрос пользователя: образ жизни перед сном
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepQuery {
    pub bedtime: String, // "HH:MM"
    pub screen_time: i64, // минуты
    pub stress: i64,      // 1-10, диапазон не проверяется
    pub weather: String,
    pub alarms: i64,
    pub desired_wake: String, // "HH:MM"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepPrediction {
    pub sleep_duration: f64, // часы, >= 4.0
    pub predicted_wake_time: String,
    pub oversleep_warning: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn new(model_loaded: bool) -> Self {
        Self {
            status: "ok".to_string(),
            model_loaded,
        }
    }
}

/// Одна строка обучающего датасета
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub bedtime: i64, // минуты от полуночи
    pub screen_time: i64,
    pub stress: i64,
    pub weather: String,
    pub alarms: i64,
    pub sleep_duration: f64, // часы
}
