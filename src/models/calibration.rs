//! Калибровка сырого предсказания модели
//!
//! Модель систематически завышает длительность сна, поэтому результат
//! сжимается фиксированным аффинным преобразованием с нижней границей.

pub const CALIBRATION_SLOPE: f64 = 0.80;
pub const CALIBRATION_OFFSET: f64 = 1.0;
pub const MIN_SLEEP_HOURS: f64 = 4.0;

/// `max(4.0, raw * 0.80 - 1.0)`
pub fn calibrate(raw_hours: f64) -> f64 {
    (raw_hours * CALIBRATION_SLOPE - CALIBRATION_OFFSET).max(MIN_SLEEP_HOURS)
}
