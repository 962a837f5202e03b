use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct CovarianceArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,
    /// First column
    pub column_a: String,
    /// Second column
    pub column_b: String,
}

pub(crate) fn run(arg: &CovarianceArg) -> anyhow::Result<()> {
    let stats = util::read_dataset_file(&arg.dataset)?;
    let covariance = stats
        .covariance(&arg.column_a, &arg.column_b)
        .with_context(|| {
            format!(
                "Failed to compute covariance of '{}' and '{}'",
                arg.column_a, arg.column_b
            )
        })?;
    println!("{covariance}");
    Ok(())
}
