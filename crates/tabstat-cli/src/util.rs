use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tabstat_stats::{Statistics, dataset, value::Value};

/// Destination of a command's JSON report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for ReportTarget {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(ReportTarget::Stdout, ReportTarget::File)
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTarget::Stdout => f.write_str("stdout"),
            ReportTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl ReportTarget {
    /// Writes `report` as pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns error if the report file cannot be created or written
    pub fn write_json<T>(&self, report: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        let written = match self {
            ReportTarget::Stdout => write_pretty_json(io::stdout().lock(), report),
            ReportTarget::File(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create report file: {}", path.display())
                })?;
                write_pretty_json(BufWriter::new(file), report)
            }
        };
        written.with_context(|| format!("Failed to write report to {self}"))
    }
}

fn write_pretty_json<W, T>(mut writer: W, report: &T) -> io::Result<()>
where
    W: Write,
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()
}

/// Read a dataset from a JSON file and wrap it in a statistics engine
///
/// The file must contain an object mapping column names to arrays of
/// booleans, numbers or strings, all of the same length.
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or if its content
/// is not a valid dataset
pub fn read_dataset_file<P>(path: P) -> anyhow::Result<Statistics<Value>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    eprintln!("Loading dataset from {}...", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
    let stats = parse_dataset(BufReader::new(file))
        .with_context(|| format!("Invalid dataset in {}", path.display()))?;
    eprintln!(
        "Loaded {} columns x {} rows",
        stats.num_columns(),
        stats.num_rows()
    );
    Ok(stats)
}

fn parse_dataset<R>(reader: R) -> anyhow::Result<Statistics<Value>>
where
    R: Read,
{
    let document =
        serde_json::from_reader::<_, serde_json::Value>(reader).context("Malformed JSON")?;
    let dataset = dataset::from_json(document)?;
    Ok(Statistics::new(dataset)?)
}

#[cfg(test)]
mod tests {
    use tabstat_stats::ErrorKind;

    use super::*;

    #[test]
    fn test_report_target_from_output_option() {
        assert_eq!(ReportTarget::from(None), ReportTarget::Stdout);
        let target = ReportTarget::from(Some(PathBuf::from("out/summary.json")));
        assert_eq!(target, ReportTarget::File(PathBuf::from("out/summary.json")));
        assert_eq!(target.to_string(), "out/summary.json");
        assert_eq!(ReportTarget::Stdout.to_string(), "stdout");
    }

    #[test]
    fn test_pretty_json_ends_with_newline() {
        let mut buf = Vec::new();
        write_pretty_json(&mut buf, &serde_json::json!({ "mean": 2.5 })).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"mean\": 2.5\n}\n");
    }

    #[test]
    fn test_parse_dataset() {
        let json = r#"{ "price": [1, 2.5, 3], "dish": ["rice", "soup", "rice"] }"#;
        let stats = parse_dataset(json.as_bytes()).unwrap();
        assert_eq!(stats.num_columns(), 2);
        assert_eq!(stats.num_rows(), 3);
        assert_eq!(stats.mean("price").unwrap(), 6.5 / 3.0);
    }

    #[test]
    fn test_parse_dataset_rejects_ragged_columns() {
        let err = parse_dataset(r#"{ "a": [1, 2], "b": [1] }"#.as_bytes()).unwrap_err();
        let stats_err = err.downcast_ref::<tabstat_stats::StatsError>().unwrap();
        assert_eq!(stats_err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_parse_dataset_rejects_malformed_json() {
        let err = parse_dataset("{ \"a\": [1, ".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Malformed JSON");
    }
}
