//! Column-oriented datasets and their shape validation.

use std::collections::BTreeMap;

use crate::{StatsError, value::Value};

/// A mapping from column name to the column's values.
pub type Dataset<T> = BTreeMap<String, Vec<T>>;

/// Checks that every column has the same length as the first one.
///
/// An empty dataset is always valid.
pub fn validate_shape<T>(dataset: &Dataset<T>) -> Result<(), StatsError> {
    let mut columns = dataset.iter();
    let Some((_, first)) = columns.next() else {
        return Ok(());
    };
    let expected = first.len();
    for (name, values) in columns {
        if values.len() != expected {
            return Err(StatsError::RaggedColumn {
                column: name.clone(),
                expected,
                actual: values.len(),
            });
        }
    }
    Ok(())
}

/// Builds a dataset from a parsed JSON document.
///
/// The document must be an object whose members are arrays of scalars
/// (booleans, numbers or strings). The shape is validated as well.
///
/// # Examples
///
/// ```
/// use tabstat_stats::{dataset, value::Value};
///
/// let json = serde_json::json!({
///     "dish": ["rice", "beans", "rice"],
///     "calories": [130, 347, 130],
/// });
/// let dataset = dataset::from_json(json).unwrap();
/// assert_eq!(dataset["calories"][1], Value::from(347));
/// ```
pub fn from_json(document: serde_json::Value) -> Result<Dataset<Value>, StatsError> {
    let serde_json::Value::Object(members) = document else {
        return Err(StatsError::NotAMapping);
    };

    let mut dataset = Dataset::new();
    for (column, cells) in members {
        let serde_json::Value::Array(cells) = cells else {
            return Err(StatsError::NotASequence { column });
        };
        let values = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                Value::from_json(cell).ok_or_else(|| StatsError::UnsupportedValue {
                    column: column.clone(),
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        dataset.insert(column, values);
    }

    validate_shape(&dataset)?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_empty_dataset_is_valid() {
        assert!(validate_shape(&Dataset::<f64>::new()).is_ok());
    }

    #[test]
    fn test_ragged_columns_are_rejected() {
        let mut dataset = Dataset::new();
        dataset.insert("a".to_owned(), vec![1, 2, 3]);
        dataset.insert("b".to_owned(), vec![1, 2, 3]);
        dataset.insert("c".to_owned(), vec![1, 2]);
        assert_eq!(
            validate_shape(&dataset),
            Err(StatsError::RaggedColumn {
                column: "c".to_owned(),
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_ragged_middle_column_is_rejected() {
        // Only the middle column differs; the last one matches the first.
        let mut dataset = Dataset::new();
        dataset.insert("a".to_owned(), vec![1, 2]);
        dataset.insert("b".to_owned(), vec![1]);
        dataset.insert("c".to_owned(), vec![1, 2]);
        let err = validate_shape(&dataset).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_from_json_accepts_scalars() {
        let dataset = from_json(json!({
            "fruit": ["apple", "pear"],
            "ripe": [true, false],
            "weight": [120.5, 98],
        }))
        .unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset["fruit"], vec![Value::from("apple"), Value::from("pear")]);
        assert_eq!(dataset["ripe"], vec![Value::from(true), Value::from(false)]);
        assert_eq!(dataset["weight"], vec![Value::from(120.5), Value::from(98)]);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert_eq!(from_json(json!([1, 2, 3])), Err(StatsError::NotAMapping));
        assert_eq!(from_json(json!(42)), Err(StatsError::NotAMapping));
    }

    #[test]
    fn test_from_json_rejects_scalar_column() {
        assert_eq!(
            from_json(json!({"a": [1, 2], "b": 3})),
            Err(StatsError::NotASequence {
                column: "b".to_owned()
            })
        );
    }

    #[test]
    fn test_from_json_rejects_null_cell() {
        assert_eq!(
            from_json(json!({"a": [1, null]})),
            Err(StatsError::UnsupportedValue {
                column: "a".to_owned(),
                index: 1,
            })
        );
    }

    #[test]
    fn test_from_json_rejects_ragged_columns() {
        let err = from_json(json!({"a": [1, 2], "b": [1]})).unwrap_err();
        assert!(err.is_ragged_column());
    }
}
