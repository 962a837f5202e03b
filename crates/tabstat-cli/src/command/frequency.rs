//! Frequency table command
//!
//! Prints absolute, relative or cumulative frequencies of one column as a
//! JSON array of `{ "value": ..., "frequency": ... }` rows.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tabstat_stats::{frequency::FrequencyTable, value::Value};

use crate::util::{self, ReportTarget};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum FrequencyKind {
    #[default]
    Absolute,
    Relative,
    CumulativeAbsolute,
    CumulativeRelative,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct FrequencyArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,

    /// Column to count
    #[arg(long)]
    pub column: String,

    /// Kind of frequency to compute
    #[arg(long, value_enum, default_value_t = FrequencyKind::Absolute)]
    pub kind: FrequencyKind,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
struct FrequencyRow<V> {
    value: Value,
    frequency: V,
}

fn to_rows<V>(table: FrequencyTable<Value, V>) -> Vec<FrequencyRow<V>> {
    table
        .into_iter()
        .map(|(value, frequency)| FrequencyRow { value, frequency })
        .collect()
}

pub(crate) fn run(arg: &FrequencyArg) -> anyhow::Result<()> {
    let mut stats = util::read_dataset_file(&arg.dataset)?;
    let column = arg.column.as_str();
    let context = || format!("Failed to count values of column '{column}'");

    match arg.kind {
        FrequencyKind::Absolute => {
            let table = stats.absolute_frequency(column).with_context(context)?;
            eprintln!("Found {} distinct values", table.len());
            ReportTarget::from(arg.output.clone()).write_json(&to_rows(table))
        }
        FrequencyKind::Relative => {
            let table = stats.relative_frequency(column).with_context(context)?;
            eprintln!("Found {} distinct values", table.len());
            ReportTarget::from(arg.output.clone()).write_json(&to_rows(table))
        }
        FrequencyKind::CumulativeAbsolute => {
            let table = stats
                .cumulative_absolute_frequency(column)
                .with_context(context)?;
            eprintln!("Found {} distinct values", table.len());
            ReportTarget::from(arg.output.clone()).write_json(&to_rows(table))
        }
        FrequencyKind::CumulativeRelative => {
            let table = stats
                .cumulative_relative_frequency(column)
                .with_context(context)?;
            eprintln!("Found {} distinct values", table.len());
            ReportTarget::from(arg.output.clone()).write_json(&to_rows(table))
        }
    }
}

#[cfg(test)]
mod tests {
    use tabstat_stats::Statistics;

    use super::*;

    #[test]
    fn test_rows_serialize_as_scalars() {
        let stats = Statistics::from_columns([(
            "dish",
            vec![Value::from("rice"), Value::from(3), Value::from("rice")],
        )])
        .unwrap();
        let rows = to_rows(stats.absolute_frequency("dish").unwrap());
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "value": "rice", "frequency": 2 },
                { "value": 3.0, "frequency": 1 },
            ])
        );
    }
}
