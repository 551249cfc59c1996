//! Конфигурация из аргументов командной строки и переменных окружения

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::dataset::DEFAULT_DATASET_PATH;
use crate::models::DEFAULT_MODEL_PATH;
use crate::training::TrainingConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "restimator", version, about = "Restimator API server")]
pub struct ServerConfig {
    /// Путь к артефакту модели
    #[arg(long, env = "RESTIMATOR_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,

    #[arg(long, env = "RESTIMATOR_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "RESTIMATOR_PORT", default_value_t = 8000)]
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "restimator-train", version, about = "Train the sleep duration model")]
pub struct TrainArgs {
    /// CSV с колонками bedtime, screen_time, stress, weather, alarms, sleep_duration
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub data: PathBuf,

    #[arg(long, env = "RESTIMATOR_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub output: PathBuf,

    #[arg(long, default_value_t = 300)]
    pub trees: usize,

    #[arg(long, default_value_t = 12)]
    pub max_depth: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value_t = 0.2)]
    pub test_ratio: f32,

    /// Только вывести сводку по датасету, без обучения
    #[arg(long)]
    pub describe: bool,
}

impl TrainArgs {
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            n_estimators: self.trees,
            max_depth: self.max_depth,
            random_state: self.seed,
            test_ratio: self.test_ratio,
            ..TrainingConfig::default()
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "restimator-predict", version, about = "Interactive sleep predictor")]
pub struct PredictArgs {
    #[arg(long, env = "RESTIMATOR_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let config = ServerConfig::try_parse_from(["restimator"]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn server_overrides() {
        let config = ServerConfig::try_parse_from([
            "restimator",
            "--model-path",
            "/tmp/m.json",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
        ])
        .unwrap();
        assert_eq!(config.model_path, PathBuf::from("/tmp/m.json"));
        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn train_args_map_to_training_config() {
        let args =
            TrainArgs::try_parse_from(["restimator-train", "--trees", "50", "--seed", "7"]).unwrap();
        let config = args.training_config();
        assert_eq!(config.n_estimators, 50);
        assert_eq!(config.random_state, 7);
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.split_seed, 98);
        assert!(!args.describe);
    }
}
