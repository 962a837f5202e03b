use std::{
    collections::{HashMap, hash_map::Entry},
    hash::Hash,
    str::FromStr,
};

use crate::StatsError;

/// Frequencies of the distinct values of a column.
///
/// Entries are kept in the order their values were first seen in the
/// column. For cumulative frequencies the column is sorted first, so the
/// entries are in ascending value order.
///
/// # Examples
///
/// ```
/// use tabstat_stats::frequency::FrequencyTable;
///
/// let table = FrequencyTable::count(&["b", "a", "b"]);
/// assert_eq!(table.as_slice(), &[("b", 2), ("a", 1)]);
/// assert_eq!(table.get(&"a"), Some(1));
/// assert_eq!(table.get(&"z"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for FrequencyTable<K, V> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<K> FrequencyTable<K, usize>
where
    K: Eq + Hash + Clone,
{
    /// Counts occurrences of each distinct value, in first-seen order.
    #[must_use]
    pub fn count(values: &[K]) -> Self {
        let mut index = HashMap::<&K, usize>::new();
        let mut entries = Vec::<(K, usize)>::new();
        for value in values {
            match index.entry(value) {
                Entry::Occupied(e) => entries[*e.get()].1 += 1,
                Entry::Vacant(e) => {
                    e.insert(entries.len());
                    entries.push((value.clone(), 1));
                }
            }
        }
        Self { entries }
    }
}

impl<K> FrequencyTable<K, usize> {
    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// The largest count, or `None` for an empty table.
    #[must_use]
    pub fn max_count(&self) -> Option<usize> {
        self.entries.iter().map(|(_, count)| *count).max()
    }

    /// Running sums of the counts, in entry order.
    #[must_use]
    pub fn accumulate(self) -> Self {
        let mut sum = 0;
        let entries = self
            .entries
            .into_iter()
            .map(|(value, count)| {
                sum += count;
                (value, sum)
            })
            .collect();
        Self { entries }
    }

    /// Divides every count by `len`, yielding proportions.
    ///
    /// `len` is the length of the column the counts were taken from.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_relative(self, len: usize) -> FrequencyTable<K, f64> {
        let n = len as f64;
        let entries = self
            .entries
            .into_iter()
            .map(|(value, count)| (value, count as f64 / n))
            .collect();
        FrequencyTable { entries }
    }
}

impl<K, V> FrequencyTable<K, V> {
    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries (the column was empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the frequency of `value`, or `None` if it does not occur.
    #[must_use]
    pub fn get(&self, value: &K) -> Option<V>
    where
        K: PartialEq,
        V: Copy,
    {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == value).then_some(*v))
    }

    /// Iterates over `(value, frequency)` pairs in entry order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::count(&[2, 1, 2]);
    /// for (value, count) in table.iter() {
    ///     println!("{value}: {count}");
    /// }
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the distinct values in entry order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the frequencies in entry order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::count(&['a', 'b', 'a', 'c']).to_relative(4);
    /// assert_eq!(table.values().sum::<f64>(), 1.0);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns all `(value, frequency)` pairs as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Consumes the table and returns its `(value, frequency)` pairs.
    #[must_use]
    pub fn into_vec(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K, V> IntoIterator for FrequencyTable<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Output shape of a cumulative frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FrequencyMode {
    /// Raw running counts.
    #[display("absolute")]
    Absolute,
    /// Running counts divided by the column length.
    #[display("relative")]
    Relative,
}

impl FromStr for FrequencyMode {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(Self::Absolute),
            "relative" => Ok(Self::Relative),
            _ => Err(StatsError::InvalidMode { mode: s.to_owned() }),
        }
    }
}

/// A cumulative frequency in either output shape.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum CumulativeFrequency<K> {
    /// Running counts.
    Absolute(FrequencyTable<K, usize>),
    /// Running counts divided by the column length.
    Relative(FrequencyTable<K, f64>),
}

impl<K> CumulativeFrequency<K> {
    /// The shape this frequency was computed in.
    #[must_use]
    pub fn mode(&self) -> FrequencyMode {
        match self {
            Self::Absolute(_) => FrequencyMode::Absolute,
            Self::Relative(_) => FrequencyMode::Relative,
        }
    }

    /// Returns the running counts, or `None` for a relative frequency.
    #[must_use]
    pub fn as_absolute(&self) -> Option<&FrequencyTable<K, usize>> {
        match self {
            Self::Absolute(table) => Some(table),
            Self::Relative(_) => None,
        }
    }

    /// Returns the running proportions, or `None` for an absolute frequency.
    #[must_use]
    pub fn as_relative(&self) -> Option<&FrequencyTable<K, f64>> {
        match self {
            Self::Absolute(_) => None,
            Self::Relative(table) => Some(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_keeps_first_seen_order() {
        let table = FrequencyTable::count(&[3, 1, 3, 2, 1, 3]);
        assert_eq!(table.as_slice(), &[(3, 3), (1, 2), (2, 1)]);
        assert_eq!(table.total(), 6);
        assert_eq!(table.max_count(), Some(3));
    }

    #[test]
    fn test_count_empty() {
        let table = FrequencyTable::<i32, usize>::count(&[]);
        assert!(table.is_empty());
        assert_eq!(table.max_count(), None);
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_accumulate() {
        let table = FrequencyTable::count(&[1, 1, 2, 3, 3, 3]).accumulate();
        assert_eq!(table.as_slice(), &[(1, 2), (2, 3), (3, 6)]);
    }

    #[test]
    fn test_to_relative() {
        let table = FrequencyTable::count(&["x", "y", "x", "x"]).to_relative(4);
        assert_eq!(table.get(&"x"), Some(0.75));
        assert_eq!(table.get(&"y"), Some(0.25));
    }

    #[test]
    fn test_frequency_mode_from_str() {
        assert_eq!("absolute".parse::<FrequencyMode>(), Ok(FrequencyMode::Absolute));
        assert_eq!("relative".parse::<FrequencyMode>(), Ok(FrequencyMode::Relative));
        assert_eq!(
            "Relative".parse::<FrequencyMode>(),
            Err(StatsError::InvalidMode {
                mode: "Relative".to_owned()
            })
        );
    }
}
