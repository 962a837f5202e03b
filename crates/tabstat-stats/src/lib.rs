//! Descriptive statistics over column-oriented in-memory datasets.
//!
//! This crate provides a statistics engine that wraps a dataset (a mapping
//! from column name to values) and answers queries about its columns:
//!
//! - **Central tendency**: mean, median, mode
//! - **Dispersion**: population variance and standard deviation
//! - **Association**: population covariance between two columns
//! - **Frequency distributions**: distinct values, absolute, relative and
//!   cumulative frequencies
//! - **Sequences**: first-order conditional probability between adjacent values
//!
//! # Modules
//!
//! - [`statistics`]: the [`Statistics`] engine
//! - [`dataset`]: dataset type, shape validation and JSON adapter
//! - [`frequency`]: frequency tables and cumulative frequency modes
//! - [`value`]: cell capabilities and the dynamically-typed [`Value`](value::Value)
//!
//! # Examples
//!
//! ## Querying numeric columns
//!
//! ```
//! use tabstat_stats::Statistics;
//!
//! let stats = Statistics::from_columns([
//!     ("x", vec![2, 4, 4, 4, 5, 5, 7, 9]),
//! ])
//! .unwrap();
//! assert_eq!(stats.mean("x").unwrap(), 5.0);
//! assert_eq!(stats.variance("x").unwrap(), 4.0);
//! assert_eq!(stats.stdev("x").unwrap(), 2.0);
//! assert_eq!(stats.mode("x").unwrap(), vec![4]);
//! ```
//!
//! ## Loading a JSON dataset
//!
//! ```
//! use tabstat_stats::{Statistics, dataset, value::Value};
//!
//! let json = serde_json::json!({
//!     "weather": ["sun", "rain", "sun", "rain", "sun"],
//! });
//! let stats = Statistics::new(dataset::from_json(json).unwrap()).unwrap();
//! let p = stats
//!     .conditional_probability("weather", &Value::from("rain"), &Value::from("sun"))
//!     .unwrap();
//! assert_eq!(p, 1.0);
//! ```
//!
//! ## Cumulative frequencies
//!
//! ```
//! use tabstat_stats::Statistics;
//!
//! let mut stats = Statistics::from_columns([("score", vec![3, 1, 2, 1])]).unwrap();
//! let cumulative = stats.cumulative_frequency("score", "relative").unwrap();
//! let table = cumulative.as_relative().unwrap();
//! assert_eq!(table.as_slice(), &[(1, 0.5), (2, 0.75), (3, 1.0)]);
//! ```

pub use self::{
    error::{ErrorKind, StatsError},
    statistics::{ColumnSummary, Statistics},
};

pub mod dataset;
mod error;
pub mod frequency;
pub mod statistics;
pub mod value;
