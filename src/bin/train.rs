/// Офлайн-обучение модели сна

use anyhow::Context;
use clap::Parser;

use restimator::config::TrainArgs;
use restimator::dataset::{load_records, DatasetSummary};
use restimator::training::train;

fn main() -> anyhow::Result<()> {
    restimator::init_tracing();

    let args = TrainArgs::parse();
    let records = load_records(&args.data)
        .with_context(|| format!("failed to read dataset {}", args.data.display()))?;

    if args.describe {
        println!("{}", DatasetSummary::describe(&records)?);
        return Ok(());
    }

    let model = train(&records, &args.training_config()).context("training failed")?;
    model
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Model trained and saved to {}", args.output.display());
    Ok(())
}
