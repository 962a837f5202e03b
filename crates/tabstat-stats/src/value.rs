//! Cell values and the per-operation capabilities required of them.
//!
//! The engine is generic over its cell type. Each operation constrains the
//! cell type only as far as it needs:
//!
//! - [`Numeric`]: arithmetic operations (mean, variance, covariance, ...)
//! - [`TotalOrd`]: cumulative frequency, which sorts a column by value
//! - `Eq + Hash`: counting operations (mode, itemset, frequencies)
//!
//! [`Value`] is a dynamically-typed cell implementing all of them, used for
//! datasets whose column types are only known at runtime.

use std::{
    cmp::Ordering,
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Conversion of a cell into `f64` for arithmetic.
pub trait Numeric {
    /// Returns the cell as `f64`, or `None` if the cell is not numeric.
    fn to_f64(&self) -> Option<f64>;
}

/// A total order over cells, used to sort columns in place.
pub trait TotalOrd {
    /// Compares two cells; must be consistent with the type's equality.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_numeric_lossless {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                fn to_f64(&self) -> Option<f64> {
                    Some(f64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_numeric_lossy {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                #[expect(clippy::cast_precision_loss)]
                fn to_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_lossless!(i8, i16, i32, u8, u16, u32, f32, f64);
impl_numeric_lossy!(i64, i128, isize, u64, u128, usize);

impl<T> Numeric for &T
where
    T: Numeric + ?Sized,
{
    fn to_f64(&self) -> Option<f64> {
        (**self).to_f64()
    }
}

macro_rules! impl_total_ord_via_ord {
    ($($ty:ty),*) => {
        $(
            impl TotalOrd for $ty {
                fn total_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_total_ord_via_ord!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String, &str,
    Value
);

impl TotalOrd for f32 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        f32::total_cmp(self, other)
    }
}

impl TotalOrd for f64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

/// A dynamically-typed dataset cell.
///
/// Equality, hashing and ordering are total: numbers compare by IEEE 754
/// total order after folding `-0.0` into `0.0` and every `NaN` into one
/// value (so `NaN == NaN` and `-0.0 == 0.0`), and values of different
/// variants order as booleans < numbers < text. Operations that need a
/// numeric order, such as median, go through [`Numeric`] instead.
///
/// # Examples
///
/// ```
/// use tabstat_stats::value::{Numeric, Value};
///
/// assert_eq!(Value::from(3).to_f64(), Some(3.0));
/// assert_eq!(Value::from(true).to_f64(), Some(1.0));
/// assert_eq!(Value::from("apple").to_f64(), None);
/// assert!(Value::from(false) < Value::from(-10.0));
/// assert!(Value::from(1e9) < Value::from("a"));
/// assert_eq!(Value::from(-0.0), Value::from(0));
/// ```
#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Folds the zeros and the NaNs so that bitwise equality matches the
/// equality of [`Value`].
fn number_key(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else if n.is_nan() {
        f64::NAN
    } else {
        n
    }
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
        }
    }

    /// Converts a JSON scalar into a value.
    ///
    /// Returns `None` for `null`, arrays and objects.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => None,
        }
    }

    /// Parses a command-line style literal.
    ///
    /// `true`/`false` become booleans, anything parseable as `f64` becomes a
    /// number, and everything else is kept as text.
    #[must_use]
    pub fn parse_literal(s: &str) -> Self {
        match s {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => s
                .parse::<f64>()
                .map_or_else(|_| Value::Text(s.to_owned()), Value::Number),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => number_key(*a).total_cmp(&number_key(*b)),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            // total_cmp equality is bitwise equality
            Value::Number(n) => number_key(*n).to_bits().hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl Numeric for Value {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_literal(s))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_value_ordering_across_variants() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2.5),
            Value::from(true),
            Value::from("a"),
            Value::from(-1),
            Value::from(false),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::from(false),
                Value::from(true),
                Value::from(-1),
                Value::from(2.5),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_nan_is_equal_to_itself() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan, nan.clone());
        let set = [nan.clone(), nan].into_iter().collect::<HashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_signed_zeros_are_the_same_number() {
        assert_eq!(Value::from(-0.0), Value::from(0.0));
        assert_eq!(Value::from(-0.0).cmp(&Value::from(0)), Ordering::Equal);
        let set = [Value::from(0.0), Value::from(-0.0)]
            .into_iter()
            .collect::<HashSet<_>>();
        assert_eq!(set.len(), 1);
        assert!(Value::from(-0.0) > Value::from(-1e-300));
    }

    #[test]
    fn test_nan_payloads_are_the_same_value() {
        let other_nan = f64::from_bits(f64::NAN.to_bits() | 1);
        assert!(other_nan.is_nan());
        assert_eq!(Value::from(other_nan), Value::from(f64::NAN));
        let set = [Value::from(other_nan), Value::from(f64::NAN)]
            .into_iter()
            .collect::<HashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_integers_and_floats_are_the_same_number() {
        assert_eq!(Value::from(3), Value::from(3.0));
        let set = [Value::from(3), Value::from(3.0)]
            .into_iter()
            .collect::<HashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_null_and_containers() {
        assert_eq!(
            Value::from_json(&serde_json::json!(4)),
            Some(Value::from(4))
        );
        assert_eq!(
            Value::from_json(&serde_json::json!("x")),
            Some(Value::from("x"))
        );
        assert_eq!(Value::from_json(&serde_json::json!(null)), None);
        assert_eq!(Value::from_json(&serde_json::json!([1])), None);
        assert_eq!(Value::from_json(&serde_json::json!({"a": 1})), None);
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(Value::parse_literal("true"), Value::Bool(true));
        assert_eq!(Value::parse_literal("1.5"), Value::Number(1.5));
        assert_eq!(Value::parse_literal("rice"), Value::Text("rice".into()));
    }

    #[test]
    fn test_display_integral_numbers() {
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("rice").to_string(), "rice");
    }

    #[test]
    fn test_primitive_numeric() {
        assert_eq!(7_u64.to_f64(), Some(7.0));
        assert_eq!((-2_i32).to_f64(), Some(-2.0));
        assert_eq!(TotalOrd::total_cmp(&1.0_f64, &f64::NAN), Ordering::Less);
    }
}
