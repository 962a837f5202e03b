use std::{collections::HashSet, hash::Hash};

use crate::{
    StatsError,
    dataset::{self, Dataset},
    frequency::{CumulativeFrequency, FrequencyMode, FrequencyTable},
    value::{Numeric, TotalOrd},
};

/// Descriptive statistics engine over a column-oriented dataset.
///
/// The engine owns its dataset and computes every statistic fresh from it on
/// each call. Two operations, [`median`](Self::median) and
/// [`cumulative_frequency`](Self::cumulative_frequency), sort the queried
/// column in place; the new order stays visible through
/// [`dataset`](Self::dataset) and [`column`](Self::column) afterwards.
///
/// # Examples
///
/// ```
/// use tabstat_stats::Statistics;
///
/// let mut stats = Statistics::from_columns([
///     ("calories", vec![250, 300, 150]),
///     ("protein", vec![10, 25, 5]),
/// ])
/// .unwrap();
///
/// assert_eq!(stats.mean("calories").unwrap(), 700.0 / 3.0);
/// assert_eq!(stats.median("calories").unwrap(), 250.0);
/// // `median` sorted the stored column
/// assert_eq!(stats.column("calories").unwrap(), &[150, 250, 300]);
/// ```
#[derive(Debug, Clone)]
pub struct Statistics<T> {
    dataset: Dataset<T>,
}

/// Combined summary of one numeric column.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnSummary<T> {
    /// Number of values in the column.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Middle value of the sorted column, or the average of the two middle
    /// values for an even count.
    pub median: f64,
    /// All values sharing the highest frequency, in first-seen order.
    pub modes: Vec<T>,
    /// Population variance.
    pub variance: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl<T> Statistics<T> {
    /// Creates an engine over `dataset`.
    ///
    /// Fails with [`StatsError::RaggedColumn`] if the columns do not all have
    /// the same length.
    pub fn new(dataset: Dataset<T>) -> Result<Self, StatsError> {
        dataset::validate_shape(&dataset)?;
        Ok(Self { dataset })
    }

    /// Creates an engine from `(name, values)` pairs.
    ///
    /// A repeated name replaces the earlier column.
    pub fn from_columns<I, K>(columns: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = (K, Vec<T>)>,
        K: Into<String>,
    {
        let dataset = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .collect();
        Self::new(dataset)
    }

    /// Returns the dataset, including any reordering done by
    /// [`median`](Self::median) or [`cumulative_frequency`](Self::cumulative_frequency).
    #[must_use]
    pub fn dataset(&self) -> &Dataset<T> {
        &self.dataset
    }

    /// Consumes the engine and returns its dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::Statistics;
    ///
    /// let mut stats = Statistics::from_columns([("x", vec![3, 1, 2])]).unwrap();
    /// stats.median("x").unwrap();
    /// let dataset = stats.into_dataset();
    /// assert_eq!(dataset["x"], vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn into_dataset(self) -> Dataset<T> {
        self.dataset
    }

    /// Iterates over column names in ascending order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.dataset.keys().map(String::as_str)
    }

    /// Returns `true` if `column` exists in the dataset.
    #[must_use]
    pub fn contains_column(&self, column: &str) -> bool {
        self.dataset.contains_key(column)
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.dataset.len()
    }

    /// Number of rows, i.e. the common column length (0 for an empty dataset).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.dataset.values().next().map_or(0, Vec::len)
    }

    /// Returns the values of `column` in their current order.
    pub fn column(&self, column: &str) -> Result<&[T], StatsError> {
        self.dataset
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| StatsError::missing_column(column))
    }

    fn column_mut(&mut self, column: &str) -> Result<&mut Vec<T>, StatsError> {
        self.dataset
            .get_mut(column)
            .ok_or_else(|| StatsError::missing_column(column))
    }

    /// Estimates P(next = `value1` | current = `value2`) over adjacent pairs.
    ///
    /// The column is read as a discrete-time sequence. The numerator counts
    /// positions holding `value2` immediately followed by `value1`; the
    /// denominator counts positions holding `value2` that have a successor.
    ///
    /// Fails with [`StatsError::NoConditioningEvent`] if the denominator is
    /// zero.
    #[expect(clippy::cast_precision_loss)]
    pub fn conditional_probability(
        &self,
        column: &str,
        value1: &T,
        value2: &T,
    ) -> Result<f64, StatsError>
    where
        T: PartialEq,
    {
        let values = self.column(column)?;

        let mut transitions = 0_usize;
        let mut conditioning = 0_usize;
        for pair in values.windows(2) {
            if pair[0] == *value2 {
                conditioning += 1;
                if pair[1] == *value1 {
                    transitions += 1;
                }
            }
        }

        if conditioning == 0 {
            return Err(StatsError::NoConditioningEvent {
                column: column.to_owned(),
            });
        }
        Ok(transitions as f64 / conditioning as f64)
    }
}

impl<T> Statistics<T>
where
    T: Numeric,
{
    /// Converts `column` to `f64`, failing on the first non-numeric cell.
    fn numeric_column(&self, column: &str) -> Result<Vec<f64>, StatsError> {
        numeric_values(column, self.column(column)?)
    }

    /// Arithmetic mean of `column`; `0.0` for an empty column.
    pub fn mean(&self, column: &str) -> Result<f64, StatsError> {
        Ok(mean_of(&self.numeric_column(column)?))
    }

    /// Population variance of `column`; `0.0` for an empty column.
    pub fn variance(&self, column: &str) -> Result<f64, StatsError> {
        let values = self.numeric_column(column)?;
        if values.is_empty() {
            return Ok(0.0);
        }
        let mean = self.mean(column)?;
        Ok(mean_of(
            &values
                .iter()
                .map(|v| (v - mean).powi(2))
                .collect::<Vec<_>>(),
        ))
    }

    /// Population standard deviation of `column`; `0.0` for an empty column.
    pub fn stdev(&self, column: &str) -> Result<f64, StatsError> {
        Ok(self.variance(column)?.sqrt())
    }

    /// Population covariance of two columns, paired by position.
    ///
    /// Returns `0.0` if `column_a` is empty.
    pub fn covariance(&self, column_a: &str, column_b: &str) -> Result<f64, StatsError> {
        self.column(column_a)?;
        self.column(column_b)?;
        let a = self.numeric_column(column_a)?;
        let b = self.numeric_column(column_b)?;
        if a.is_empty() {
            return Ok(0.0);
        }

        let mean_a = mean_of(&a);
        let mean_b = mean_of(&b);
        let products = a
            .iter()
            .zip(&b)
            .map(|(x, y)| (x - mean_a) * (y - mean_b))
            .collect::<Vec<_>>();
        Ok(mean_of(&products))
    }

    /// Median of `column`; `0.0` for an empty column.
    ///
    /// Sorts the stored column by numeric value, ascending, as a side effect.
    /// The sort is stable, so equal values keep their relative order. The
    /// column is checked to be numeric before it is sorted, so a failing call
    /// leaves it untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::{Statistics, value::Value};
    ///
    /// // `true` counts as 1
    /// let mut stats = Statistics::from_columns([(
    ///     "x",
    ///     vec![Value::from(true), Value::from(0), Value::from(0.5)],
    /// )])
    /// .unwrap();
    /// assert_eq!(stats.median("x").unwrap(), 0.5);
    /// ```
    pub fn median(&mut self, column: &str) -> Result<f64, StatsError> {
        let values = self.column_mut(column)?;
        let numbers = numeric_values(column, values)?;
        if numbers.is_empty() {
            return Ok(0.0);
        }

        let mut pairs = numbers.into_iter().zip(values.drain(..)).collect::<Vec<_>>();
        pairs.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        let (sorted, reordered): (Vec<f64>, Vec<T>) = pairs.into_iter().unzip();
        *values = reordered;

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Ok(f64::midpoint(sorted[mid - 1], sorted[mid]))
        } else {
            Ok(sorted[mid])
        }
    }
}

impl<T> Statistics<T>
where
    T: Eq + Hash + Clone,
{
    /// All values sharing the highest frequency, in first-seen order.
    ///
    /// Returns an empty vector for an empty column.
    pub fn mode(&self, column: &str) -> Result<Vec<T>, StatsError> {
        let table = self.absolute_frequency(column)?;
        let Some(max) = table.max_count() else {
            return Ok(vec![]);
        };
        Ok(table
            .into_iter()
            .filter(|(_, count)| *count == max)
            .map(|(value, _)| value)
            .collect())
    }

    /// Distinct values of `column`.
    pub fn itemset(&self, column: &str) -> Result<HashSet<T>, StatsError> {
        Ok(self.column(column)?.iter().cloned().collect())
    }

    /// Occurrence count of each distinct value, in first-seen order.
    pub fn absolute_frequency(&self, column: &str) -> Result<FrequencyTable<T, usize>, StatsError> {
        Ok(FrequencyTable::count(self.column(column)?))
    }

    /// Proportion of the column taken by each distinct value, in first-seen order.
    pub fn relative_frequency(&self, column: &str) -> Result<FrequencyTable<T, f64>, StatsError> {
        let len = self.column(column)?.len();
        Ok(self.absolute_frequency(column)?.to_relative(len))
    }
}

impl<T> Statistics<T>
where
    T: TotalOrd + Eq + Hash + Clone,
{
    /// Cumulative frequency of `column` in the shape selected by `mode`
    /// (`"absolute"` or `"relative"`).
    ///
    /// Sorts the stored column in ascending order as a side effect; entries
    /// of the result follow that order. An unrecognized `mode` fails with
    /// [`StatsError::InvalidMode`] before anything is sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::Statistics;
    ///
    /// let mut stats = Statistics::from_columns([("grade", vec!['b', 'a', 'c', 'a'])]).unwrap();
    /// let cumulative = stats.cumulative_frequency("grade", "absolute").unwrap();
    /// let table = cumulative.as_absolute().unwrap();
    /// assert_eq!(table.as_slice(), &[('a', 2), ('b', 3), ('c', 4)]);
    ///
    /// assert!(stats.cumulative_frequency("grade", "percent").is_err());
    /// ```
    pub fn cumulative_frequency(
        &mut self,
        column: &str,
        mode: &str,
    ) -> Result<CumulativeFrequency<T>, StatsError> {
        self.column(column)?;
        match mode.parse::<FrequencyMode>()? {
            FrequencyMode::Absolute => self
                .cumulative_absolute_frequency(column)
                .map(CumulativeFrequency::Absolute),
            FrequencyMode::Relative => self
                .cumulative_relative_frequency(column)
                .map(CumulativeFrequency::Relative),
        }
    }

    /// Running occurrence counts in ascending value order.
    ///
    /// Sorts the stored column in place.
    pub fn cumulative_absolute_frequency(
        &mut self,
        column: &str,
    ) -> Result<FrequencyTable<T, usize>, StatsError> {
        let values = self.column_mut(column)?;
        values.sort_by(TotalOrd::total_cmp);
        Ok(FrequencyTable::count(values).accumulate())
    }

    /// Running proportions in ascending value order; the last entry is `1.0`
    /// for a non-empty column.
    ///
    /// Sorts the stored column in place.
    pub fn cumulative_relative_frequency(
        &mut self,
        column: &str,
    ) -> Result<FrequencyTable<T, f64>, StatsError> {
        let len = self.column(column)?.len();
        Ok(self.cumulative_absolute_frequency(column)?.to_relative(len))
    }
}

impl<T> Statistics<T>
where
    T: Numeric + Eq + Hash + Clone,
{
    /// Computes mean, median, modes, variance and standard deviation of
    /// `column` in one call.
    ///
    /// Like [`median`](Self::median), this sorts the stored column.
    pub fn summary(&mut self, column: &str) -> Result<ColumnSummary<T>, StatsError> {
        let mean = self.mean(column)?;
        let variance = self.variance(column)?;
        let std_dev = variance.sqrt();
        let modes = self.mode(column)?;
        let median = self.median(column)?;
        Ok(ColumnSummary {
            count: self.column(column)?.len(),
            mean,
            median,
            modes,
            variance,
            std_dev,
        })
    }
}

fn numeric_values<T>(column: &str, values: &[T]) -> Result<Vec<f64>, StatsError>
where
    T: Numeric,
{
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.to_f64().ok_or_else(|| StatsError::NonNumeric {
                column: column.to_owned(),
                index,
            })
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
