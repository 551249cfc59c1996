//! Загрузка и описание обучающего датасета (CSV)

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use ndarray::Array1;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::preprocessing::time_to_minutes;
use crate::types::TrainingRecord;

/// Путь к датасету по умолчанию
pub const DEFAULT_DATASET_PATH: &str = "sleep_dataset.csv";

#[derive(Debug, Deserialize)]
struct CsvRow {
    bedtime: String,
    screen_time: i64,
    stress: i64,
    weather: String,
    alarms: i64,
    sleep_duration: f64,
}

impl CsvRow {
    fn into_record(self, line: usize) -> Result<TrainingRecord> {
        // Время отбоя в датасете - минуты от полуночи, но допускаем и "HH:MM"
        let raw = self.bedtime.trim();
        let bedtime = if raw.contains(':') {
            time_to_minutes(raw)?
        } else {
            raw.parse::<i64>().map_err(|_| {
                Error::Dataset(format!("line {line}: bedtime {raw:?} is not a number"))
            })?
        };

        Ok(TrainingRecord {
            bedtime,
            screen_time: self.screen_time,
            stress: self.stress,
            weather: self.weather.trim().to_string(),
            alarms: self.alarms,
            sleep_duration: self.sleep_duration,
        })
    }
}

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)
        .map_err(|e| Error::Dataset(format!("failed to open {}: {e}", path.display())))?;
    let records = read_records(reader)?;
    tracing::info!(path = %path.display(), rows = records.len(), "dataset loaded");
    Ok(records)
}

pub fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TrainingRecord>> {
    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        // строка 1 - заголовок
        records.push(row?.into_record(i + 2)?);
    }
    Ok(records)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    fn from_values(values: Array1<f64>) -> Option<Self> {
        let count = values.len();
        let mean = values.mean()?;
        // Выборочное стандартное отклонение (ddof = 1)
        let std = if count > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count,
            mean,
            std,
            min,
            max,
        })
    }
}

/// Сводка по датасету для быстрой проверки данных перед обучением
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub columns: Vec<(&'static str, ColumnStats)>,
    pub weather_counts: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn describe(records: &[TrainingRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset {
                required: 1,
                actual: 0,
            });
        }

        let column = |f: fn(&TrainingRecord) -> f64| -> Array1<f64> {
            records.iter().map(f).collect()
        };
        let numeric: [(&'static str, Array1<f64>); 5] = [
            ("bedtime", column(|r| r.bedtime as f64)),
            ("screen_time", column(|r| r.screen_time as f64)),
            ("stress", column(|r| r.stress as f64)),
            ("alarms", column(|r| r.alarms as f64)),
            ("sleep_duration", column(|r| r.sleep_duration)),
        ];

        let columns = numeric
            .into_iter()
            .filter_map(|(name, values)| ColumnStats::from_values(values).map(|s| (name, s)))
            .collect();

        let mut weather_counts = BTreeMap::new();
        for record in records {
            *weather_counts.entry(record.weather.clone()).or_insert(0) += 1;
        }

        Ok(Self {
            columns,
            weather_counts,
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    /// Диапазон целевой переменной (мин, макс)
    pub fn sleep_duration_range(&self) -> Option<(f64, f64)> {
        self.column("sleep_duration").map(|s| (s.min, s.max))
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16}{:>8}{:>10}{:>10}{:>10}{:>10}",
            "column", "count", "mean", "std", "min", "max"
        )?;
        for (name, s) in &self.columns {
            writeln!(
                f,
                "{:<16}{:>8}{:>10.3}{:>10.3}{:>10.3}{:>10.3}",
                name, s.count, s.mean, s.std, s.min, s.max
            )?;
        }

        writeln!(f)?;
        writeln!(f, "weather:")?;
        for (weather, count) in &self.weather_counts {
            writeln!(f, "  {weather:<14}{count:>8}")?;
        }

        if let Some((min, max)) = self.sleep_duration_range() {
            writeln!(f)?;
            write!(f, "Sleep duration range: {min} - {max}")?;
        }
        Ok(())
    }
}
