use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tabstat_stats::value::Value;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct TransitionArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,

    /// Column read as a sequence
    #[arg(long)]
    pub column: String,

    /// Value expected at the next position (`true`/`false`, a number, or text)
    #[arg(long)]
    pub next: Value,

    /// Value at the current (conditioning) position
    #[arg(long)]
    pub given: Value,
}

pub(crate) fn run(arg: &TransitionArg) -> anyhow::Result<()> {
    let stats = util::read_dataset_file(&arg.dataset)?;
    let probability = stats
        .conditional_probability(&arg.column, &arg.next, &arg.given)
        .with_context(|| {
            format!(
                "Failed to compute P({} | {}) over column '{}'",
                arg.next, arg.given, arg.column
            )
        })?;
    println!("{probability}");
    Ok(())
}
