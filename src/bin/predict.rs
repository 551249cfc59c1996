/// Интерактивное предсказание сна в консоли

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use restimator::config::PredictArgs;
use restimator::console::{prompt_query, render_prediction};
use restimator::{SleepModel, SleepPredictor};

fn main() -> anyhow::Result<()> {
    restimator::init_tracing();

    let args = PredictArgs::parse();
    let model = SleepModel::load(&args.model_path)
        .with_context(|| format!("cannot start without a model at {}", args.model_path.display()))?;
    let predictor = SleepPredictor::new(Arc::new(model));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let query = prompt_query(stdin.lock(), &mut stdout)?;

    let prediction = predictor.predict(&query).context("prediction failed")?;
    writeln!(stdout)?;
    writeln!(stdout, "{}", render_prediction(&prediction))?;
    Ok(())
}
