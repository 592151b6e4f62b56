use crate::error::SettingsError;
use crate::value::Value;
use serde::Serialize;

const STEP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "scale", rename_all = "snake_case")]
pub enum SliderScale {
    /// Whole numbers; reads back as [`Value::Integer`].
    Natural { min: i32, max: i32, step: i32 },
    /// Reads back as [`Value::Double`].
    Decimal { min: f64, max: f64, step: f64 },
}

/// A bounded number that must sit on a step grid anchored at `min`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    scale: SliderScale,
    value: Option<f64>,
}

impl Slider {
    /// # Errors
    /// [`SettingsError::OutOfRange`] for a step below one or `min > max`.
    pub fn natural(min: i32, max: i32, step: i32) -> Result<Self, SettingsError> {
        if step < 1 || min > max {
            return Err(SettingsError::out_of_range(format!(
                "natural slider needs min <= max and step >= 1, got {min}..={max} step {step}"
            )));
        }
        Ok(Self { scale: SliderScale::Natural { min, max, step }, value: None })
    }

    /// # Errors
    /// [`SettingsError::OutOfRange`] for a non-positive step or `min > max`.
    pub fn decimal(min: f64, max: f64, step: f64) -> Result<Self, SettingsError> {
        if step.is_nan() || step <= 0.0 || min.is_nan() || max.is_nan() || min > max {
            return Err(SettingsError::out_of_range(format!(
                "decimal slider needs min <= max and step > 0, got {min}..={max} step {step}"
            )));
        }
        Ok(Self { scale: SliderScale::Decimal { min, max, step }, value: None })
    }

    pub const fn scale(&self) -> SliderScale {
        self.scale
    }

    pub(crate) fn parse(&self, raw: &str) -> Result<f64, SettingsError> {
        let trimmed = raw.trim();
        let number = match self.scale {
            SliderScale::Natural { .. } => trimmed.parse::<i32>().map(f64::from).ok(),
            SliderScale::Decimal { .. } => trimmed.parse::<f64>().ok(),
        };
        let number = number.ok_or_else(|| {
            SettingsError::invalid_format(format!("'{raw}' is not a valid slider position"))
        })?;
        self.admit(number)
    }

    pub(crate) fn check(&self, value: &Value) -> Result<f64, SettingsError> {
        let number = match (self.scale, value) {
            (SliderScale::Natural { .. }, Value::Integer(v)) => f64::from(*v),
            (SliderScale::Decimal { .. }, Value::Double(v)) => *v,
            (_, other) => {
                return Err(SettingsError::wrong_shape(format!(
                    "slider cannot hold a {}",
                    other.type_name()
                )));
            },
        };
        self.admit(number)
    }

    pub(crate) const fn store(&mut self, position: f64) {
        self.value = Some(position);
    }

    pub(crate) fn value(&self) -> Option<Value> {
        self.value.map(|position| self.to_value(position))
    }

    pub(crate) fn to_value(&self, position: f64) -> Value {
        match self.scale {
            SliderScale::Natural { .. } => Value::Integer(position as i32),
            SliderScale::Decimal { .. } => Value::Double(position),
        }
    }

    fn admit(&self, number: f64) -> Result<f64, SettingsError> {
        let (min, max, on_grid) = match self.scale {
            SliderScale::Natural { min, max, step } => {
                let offset = number as i64 - i64::from(min);
                (f64::from(min), f64::from(max), offset % i64::from(step) == 0)
            },
            SliderScale::Decimal { min, max, step } => {
                let nearest = min + ((number - min) / step).round() * step;
                let ulps = 4.0 * f64::EPSILON * number.abs().max(min.abs());
                (min, max, (number - nearest).abs() <= (STEP_TOLERANCE * step).max(ulps))
            },
        };
        if !(min..=max).contains(&number) {
            return Err(SettingsError::out_of_range(format!("{number} is outside {min}..={max}")));
        }
        if !on_grid {
            return Err(SettingsError::out_of_range(format!(
                "{number} is not on the step grid starting at {min}"
            )));
        }
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_slider_requires_step_alignment() {
        let slider = Slider::natural(0, 100, 5).expect("valid slider");
        assert_eq!(slider.parse("35"), Ok(35.0));
        assert!(matches!(slider.parse("36"), Err(SettingsError::OutOfRange { .. })));
        assert!(matches!(slider.parse("3.5"), Err(SettingsError::InvalidFormat { .. })));
    }

    #[test]
    fn decimal_slider_tolerates_float_noise() {
        let slider = Slider::decimal(0.0, 1.0, 0.1).expect("valid slider");
        assert_eq!(slider.check(&Value::Double(0.3)), Ok(0.3));
        assert!(matches!(slider.check(&Value::Double(0.35)), Err(SettingsError::OutOfRange { .. })));
        assert!(matches!(slider.check(&Value::Integer(0)), Err(SettingsError::WrongShape { .. })));
    }

    #[test]
    fn grid_checks_hold_over_wide_ranges() {
        let natural = Slider::natural(0, i32::MAX, 2).expect("valid slider");
        assert_eq!(natural.parse("1000000000"), Ok(1_000_000_000.0));
        assert!(matches!(natural.parse("1000000001"), Err(SettingsError::OutOfRange { .. })));

        let shifted = Slider::natural(i32::MIN, i32::MAX, 3).expect("valid slider");
        assert!(matches!(shifted.parse("2147483646"), Err(SettingsError::OutOfRange { .. })));
        assert_eq!(shifted.parse("-2147483645"), Ok(-2_147_483_645.0));

        let decimal = Slider::decimal(0.0, 1e10, 1.0).expect("valid slider");
        assert_eq!(decimal.parse("1000000000"), Ok(1e9));
        assert!(matches!(decimal.parse("1000000000.5"), Err(SettingsError::OutOfRange { .. })));

        let fine = Slider::decimal(0.0, 1e7, 0.1).expect("valid slider");
        assert!(fine.parse("1000000.1").is_ok());
        assert!(matches!(fine.parse("1000000.15"), Err(SettingsError::OutOfRange { .. })));
    }

    #[test]
    fn invalid_steps_are_rejected() {
        assert!(Slider::natural(0, 10, 0).is_err());
        assert!(Slider::decimal(0.0, 1.0, 0.0).is_err());
        assert!(Slider::decimal(1.0, 0.0, 0.1).is_err());
    }
}
