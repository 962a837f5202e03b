//! Column summary command
//!
//! Computes mean, median, modes, variance and standard deviation for the
//! numeric columns of a dataset and writes them as JSON.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use clap::Args;
use tabstat_stats::{ColumnSummary, ErrorKind, Statistics, value::Value};

use crate::util::{self, ReportTarget};

#[derive(Debug, Clone, Args)]
pub(crate) struct DescribeArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,

    /// Columns to summarize (comma-separated). Defaults to every numeric column.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let mut stats = util::read_dataset_file(&arg.dataset)?;
    let summaries = summarize(&mut stats, &arg.columns)?;
    eprintln!("Summarized {} columns", summaries.len());

    ReportTarget::from(arg.output.clone()).write_json(&summaries)
}

/// Summarizes `columns`, or every numeric column when `columns` is empty.
///
/// Non-numeric columns are skipped only when they were not asked for.
fn summarize(
    stats: &mut Statistics<Value>,
    columns: &[String],
) -> anyhow::Result<BTreeMap<String, ColumnSummary<Value>>> {
    let explicit = !columns.is_empty();
    let columns = if explicit {
        columns.to_vec()
    } else {
        stats.column_names().map(str::to_owned).collect()
    };

    let mut summaries = BTreeMap::new();
    for column in columns {
        match stats.summary(&column) {
            Ok(summary) => {
                summaries.insert(column, summary);
            }
            Err(e) if !explicit && e.kind() == ErrorKind::NonNumeric => {
                eprintln!("Skipping non-numeric column '{column}'");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to summarize column '{column}'"));
            }
        }
    }
    Ok(summaries)
}
