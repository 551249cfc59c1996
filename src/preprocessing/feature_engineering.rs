//! Feature engineering: запрос пользователя -> вектор признаков -> матрица для модели

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::preprocessing::clock::time_to_minutes;
use crate::types::{SleepQuery, TrainingRecord};

/// Версия схемы признаков; хранится в артефакте модели
pub const SCHEMA_VERSION: u32 = 1;

/// Порядок колонок, на котором обучается модель
pub const FEATURE_COLUMNS: [&str; 5] = ["bedtime", "screen_time", "stress", "weather", "alarms"];

/// Одна строка признаков в терминах датасета
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub bedtime: i64, // минуты от полуночи
    pub screen_time: i64,
    pub stress: i64,
    pub weather: String,
    pub alarms: i64,
}

impl FeatureVector {
    pub fn column_names(&self) -> [&'static str; 5] {
        FEATURE_COLUMNS
    }

    fn numeric_values(&self) -> [f64; 4] {
        [
            self.bedtime as f64,
            self.screen_time as f64,
            self.stress as f64,
            self.alarms as f64,
        ]
    }
}

impl From<&TrainingRecord> for FeatureVector {
    fn from(record: &TrainingRecord) -> Self {
        Self {
            bedtime: record.bedtime,
            screen_time: record.screen_time,
            stress: record.stress,
            weather: record.weather.clone(),
            alarms: record.alarms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical { categories: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// Явный контракт между энкодером и обученной моделью
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    /// Схема с заданным множеством значений погоды
    pub fn new<I, S>(weather_categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<String> = weather_categories.into_iter().map(Into::into).collect();
        categories.sort();
        categories.dedup();

        let columns = FEATURE_COLUMNS
            .iter()
            .map(|&name| ColumnSpec {
                name: name.to_string(),
                kind: if name == "weather" {
                    ColumnKind::Categorical {
                        categories: categories.clone(),
                    }
                } else {
                    ColumnKind::Numeric
                },
            })
            .collect();

        Self {
            version: SCHEMA_VERSION,
            columns,
        }
    }

    /// Запоминает домен категориального признака по обучающей выборке
    pub fn fit(features: &[FeatureVector]) -> Result<Self> {
        if features.is_empty() {
            return Err(Error::Dataset("no feature rows to fit schema".to_string()));
        }
        Ok(Self::new(features.iter().map(|f| f.weather.as_str())))
    }

    pub fn weather_categories(&self) -> &[String] {
        self.columns
            .iter()
            .find_map(|c| match &c.kind {
                ColumnKind::Categorical { categories } if c.name == "weather" => {
                    Some(categories.as_slice())
                }
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Категории, которые получают собственную one-hot колонку.
    /// При ровно двух значениях первое отбрасывается (остаётся один индикатор).
    fn one_hot_categories(&self) -> &[String] {
        let categories = self.weather_categories();
        if categories.len() == 2 {
            &categories[1..]
        } else {
            categories
        }
    }

    /// Ширина матрицы признаков: one-hot погода + 4 числовых колонки
    pub fn n_encoded_columns(&self) -> usize {
        self.one_hot_categories().len() + 4
    }

    pub fn validate(&self, features: &FeatureVector) -> Result<()> {
        let expected: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        if expected != features.column_names() {
            return Err(Error::SchemaMismatch(format!(
                "expected columns {:?}, got {:?}",
                expected,
                features.column_names()
            )));
        }

        let categories = self.weather_categories();
        if !categories.iter().any(|c| c == &features.weather) {
            return Err(Error::SchemaMismatch(format!(
                "unknown weather category {:?}, known: {:?}",
                features.weather, categories
            )));
        }

        Ok(())
    }

    /// Кодирует одну строку в матрицу 1 x n_encoded_columns
    pub fn encode_row(&self, features: &FeatureVector) -> Result<Array2<f64>> {
        self.encode_batch(std::slice::from_ref(features))
    }

    pub fn encode_batch(&self, rows: &[FeatureVector]) -> Result<Array2<f64>> {
        let one_hot = self.one_hot_categories();
        let mut matrix = Array2::zeros((rows.len(), self.n_encoded_columns()));

        for (i, row) in rows.iter().enumerate() {
            self.validate(row)?;

            // Сначала one-hot погода, затем числовые признаки в исходном порядке
            if let Some(idx) = one_hot.iter().position(|c| c == &row.weather) {
                matrix[[i, idx]] = 1.0;
            }
            for (j, value) in row.numeric_values().iter().enumerate() {
                matrix[[i, one_hot.len() + j]] = *value;
            }
        }

        Ok(matrix)
    }
}

pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Запрос -> строка признаков. Время отбоя переводится в минуты.
    pub fn encode(query: &SleepQuery) -> Result<FeatureVector> {
        Ok(FeatureVector {
            bedtime: time_to_minutes(&query.bedtime)?,
            screen_time: query.screen_time,
            stress: query.stress,
            weather: query.weather.clone(),
            alarms: query.alarms,
        })
    }

    pub fn from_records(records: &[TrainingRecord]) -> Vec<FeatureVector> {
        records.iter().map(FeatureVector::from).collect()
    }
}
