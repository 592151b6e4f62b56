use super::ArgumentKind;
use crate::error::SettingsError;
use crate::value::Value;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Scalar types usable as bounded numeric arguments.
pub trait Numeric:
    Copy + PartialOrd + FromStr + Display + Debug + Serialize + Send + Sync + 'static
{
    const KIND: ArgumentKind;
    const LOWEST: Self;
    const HIGHEST: Self;

    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! numeric {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Numeric for $ty {
                const KIND: ArgumentKind = ArgumentKind::$variant;
                const LOWEST: Self = <$ty>::MIN;
                const HIGHEST: Self = <$ty>::MAX;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

numeric! {
    i32 => Integer,
    u32 => UnsignedInteger,
    i64 => Long,
    u64 => UnsignedLong,
    f32 => Float,
    f64 => Double,
}

/// A number constrained to an inclusive range.
///
/// A reversed range accepts nothing; NaN is never in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounded<N: Numeric> {
    min: N,
    max: N,
    value: Option<N>,
}

impl<N: Numeric> Bounded<N> {
    #[must_use]
    pub fn new(range: RangeInclusive<N>) -> Self {
        let (min, max) = range.into_inner();
        Self { min, max, value: None }
    }

    /// Accepts every finite value of the type.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { min: N::LOWEST, max: N::HIGHEST, value: None }
    }

    pub const fn min(&self) -> N {
        self.min
    }

    pub const fn max(&self) -> N {
        self.max
    }

    pub const fn current(&self) -> Option<N> {
        self.value
    }

    pub(crate) fn parse(&self, raw: &str) -> Result<N, SettingsError> {
        let parsed = raw.trim().parse::<N>().map_err(|_| {
            SettingsError::invalid_format(format!("'{raw}' is not a valid {}", N::KIND))
        })?;
        self.admit(parsed)
    }

    pub(crate) fn check(&self, value: &Value) -> Result<N, SettingsError> {
        let number = N::from_value(value).ok_or_else(|| {
            SettingsError::wrong_shape(format!("expected {}, found {}", N::KIND, value.type_name()))
        })?;
        self.admit(number)
    }

    pub(crate) fn store(&mut self, number: N) {
        self.value = Some(number);
    }

    fn admit(&self, number: N) -> Result<N, SettingsError> {
        if number >= self.min && number <= self.max {
            Ok(number)
        } else {
            Err(SettingsError::out_of_range(format!(
                "{number} is outside {}..={}",
                self.min, self.max
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_format_from_range() {
        let width = Bounded::<i32>::new(128..=4096);

        assert_eq!(width.parse(" 512 "), Ok(512));
        assert!(matches!(width.parse("wide"), Err(SettingsError::InvalidFormat { .. })));
        assert!(matches!(width.parse("64"), Err(SettingsError::OutOfRange { .. })));
    }

    #[test]
    fn nan_is_never_in_range() {
        let factor = Bounded::<f64>::unbounded();
        assert!(matches!(factor.parse("NaN"), Err(SettingsError::OutOfRange { .. })));
        assert_eq!(factor.parse("0.25"), Ok(0.25));
    }

    #[test]
    fn values_of_another_kind_are_rejected() {
        let seed = Bounded::<u64>::unbounded();
        assert!(matches!(seed.check(&Value::Integer(1)), Err(SettingsError::WrongShape { .. })));
        assert_eq!(seed.check(&Value::UnsignedLong(7)), Ok(7));
    }
}
