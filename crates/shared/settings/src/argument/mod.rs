//! Typed, bounded value cells.
//!
//! [`Argument`] is a closed set of kinds sharing one validation surface:
//! [`Argument::validate`] turns raw text into a checked [`Value`],
//! [`Argument::set`] stores a checked value and [`Argument::get`] reads it
//! back. Bounds and value sets are fixed at construction, and a failed write
//! leaves the previous value untouched.

mod list;
mod numeric;
mod scalar;
mod select;
mod slider;

pub use list::FreeList;
pub use numeric::{Bounded, Numeric};
pub use scalar::{BoolArgument, PlainText, StringArgument};
pub use select::{Choices, MultiSelect, SelectList, SingleSelect};
pub use slider::{Slider, SliderScale};

use crate::error::SettingsError;
use crate::value::Value;
use serde::Serialize;
use std::ops::RangeInclusive;
use strum::VariantNames;

/// Discriminant of an [`Argument`], without its payload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArgumentKind {
    Integer,
    UnsignedInteger,
    Long,
    UnsignedLong,
    Float,
    Double,
    Bool,
    String,
    SingleSelect,
    MultiSelect,
    SelectList,
    FreeList,
    Slider,
    PlainText,
}

impl ArgumentKind {
    /// Kinds holding a single plain value.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::UnsignedInteger
                | Self::Long
                | Self::UnsignedLong
                | Self::Float
                | Self::Double
                | Self::Bool
                | Self::String
                | Self::Slider
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Argument {
    Integer(Bounded<i32>),
    UnsignedInteger(Bounded<u32>),
    Long(Bounded<i64>),
    UnsignedLong(Bounded<u64>),
    Float(Bounded<f32>),
    Double(Bounded<f64>),
    Bool(BoolArgument),
    String(StringArgument),
    SingleSelect(SingleSelect),
    MultiSelect(MultiSelect),
    SelectList(SelectList),
    FreeList(FreeList),
    Slider(Slider),
    PlainText(PlainText),
}

impl Argument {
    #[must_use]
    pub fn integer(range: RangeInclusive<i32>) -> Self {
        Self::Integer(Bounded::new(range))
    }

    #[must_use]
    pub fn unsigned_integer(range: RangeInclusive<u32>) -> Self {
        Self::UnsignedInteger(Bounded::new(range))
    }

    #[must_use]
    pub fn long(range: RangeInclusive<i64>) -> Self {
        Self::Long(Bounded::new(range))
    }

    #[must_use]
    pub fn unsigned_long(range: RangeInclusive<u64>) -> Self {
        Self::UnsignedLong(Bounded::new(range))
    }

    #[must_use]
    pub fn float(range: RangeInclusive<f32>) -> Self {
        Self::Float(Bounded::new(range))
    }

    #[must_use]
    pub fn double(range: RangeInclusive<f64>) -> Self {
        Self::Double(Bounded::new(range))
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::Bool(BoolArgument::default())
    }

    /// Text of `min_length..=max_length` characters.
    #[must_use]
    pub const fn string(min_length: usize, max_length: usize) -> Self {
        Self::String(StringArgument::new(min_length, max_length))
    }

    pub fn single_select<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SingleSelect(SingleSelect::new(Choices::new(values)))
    }

    /// Single select over the variant names of `E`.
    #[must_use]
    pub fn single_select_of<E: VariantNames>() -> Self {
        Self::SingleSelect(SingleSelect::new(Choices::of::<E>()))
    }

    pub fn multi_select<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MultiSelect(MultiSelect::new(Choices::new(values)))
    }

    #[must_use]
    pub fn multi_select_of<E: VariantNames>() -> Self {
        Self::MultiSelect(MultiSelect::new(Choices::of::<E>()))
    }

    pub fn select_list<I, S>(values: I, max_items: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SelectList(SelectList::new(Choices::new(values), max_items))
    }

    #[must_use]
    pub fn select_list_of<E: VariantNames>(max_items: usize) -> Self {
        Self::SelectList(SelectList::new(Choices::of::<E>(), max_items))
    }

    /// # Errors
    /// See [`FreeList::new`].
    pub fn free_list(template: Self, max_items: usize) -> Result<Self, SettingsError> {
        FreeList::new(template, max_items).map(Self::FreeList)
    }

    /// # Errors
    /// See [`Slider::natural`].
    pub fn natural_slider(min: i32, max: i32, step: i32) -> Result<Self, SettingsError> {
        Slider::natural(min, max, step).map(Self::Slider)
    }

    /// # Errors
    /// See [`Slider::decimal`].
    pub fn decimal_slider(min: f64, max: f64, step: f64) -> Result<Self, SettingsError> {
        Slider::decimal(min, max, step).map(Self::Slider)
    }

    #[must_use]
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::PlainText(PlainText::new(text))
    }

    /// Presets the value, for templates that ship with defaults.
    ///
    /// # Errors
    /// Whatever [`Argument::set`] rejects.
    pub fn with_value(mut self, value: impl Into<Value>) -> Result<Self, SettingsError> {
        self.set(value.into())?;
        Ok(self)
    }

    #[must_use]
    pub const fn kind(&self) -> ArgumentKind {
        match self {
            Self::Integer(_) => ArgumentKind::Integer,
            Self::UnsignedInteger(_) => ArgumentKind::UnsignedInteger,
            Self::Long(_) => ArgumentKind::Long,
            Self::UnsignedLong(_) => ArgumentKind::UnsignedLong,
            Self::Float(_) => ArgumentKind::Float,
            Self::Double(_) => ArgumentKind::Double,
            Self::Bool(_) => ArgumentKind::Bool,
            Self::String(_) => ArgumentKind::String,
            Self::SingleSelect(_) => ArgumentKind::SingleSelect,
            Self::MultiSelect(_) => ArgumentKind::MultiSelect,
            Self::SelectList(_) => ArgumentKind::SelectList,
            Self::FreeList(_) => ArgumentKind::FreeList,
            Self::Slider(_) => ArgumentKind::Slider,
            Self::PlainText(_) => ArgumentKind::PlainText,
        }
    }

    /// Parses raw text into a value this argument would accept.
    ///
    /// # Errors
    /// [`SettingsError::InvalidFormat`] for unparsable text,
    /// [`SettingsError::OutOfRange`] for values outside the bounds or value
    /// set, [`SettingsError::WrongShape`] for plain text.
    pub fn validate(&self, raw: &str) -> Result<Value, SettingsError> {
        match self {
            Self::Integer(b) => b.parse(raw).map(Value::Integer),
            Self::UnsignedInteger(b) => b.parse(raw).map(Value::UnsignedInteger),
            Self::Long(b) => b.parse(raw).map(Value::Long),
            Self::UnsignedLong(b) => b.parse(raw).map(Value::UnsignedLong),
            Self::Float(b) => b.parse(raw).map(Value::Float),
            Self::Double(b) => b.parse(raw).map(Value::Double),
            Self::Bool(_) => BoolArgument::parse(raw).map(Value::Bool),
            Self::String(s) => {
                s.check_text(raw)?;
                Ok(Value::Text(raw.to_owned()))
            },
            Self::SingleSelect(s) => {
                let index = s.choices().index_of(raw)?;
                s.choices().name_at(index).map(|name| Value::Text(name.to_owned()))
            },
            Self::MultiSelect(m) => {
                let names = texts(select::split_list(raw));
                m.check(&names)?;
                Ok(names)
            },
            Self::SelectList(l) => {
                let names = texts(select::split_list(raw));
                l.check(&names)?;
                Ok(names)
            },
            Self::FreeList(f) => f.parse(raw),
            Self::Slider(s) => s.parse(raw).map(|position| s.to_value(position)),
            Self::PlainText(_) => Err(PlainText::refuse()),
        }
    }

    /// Checks `value` against the kind and bounds without storing it.
    ///
    /// # Errors
    /// [`SettingsError::WrongShape`] for a value of another kind, otherwise as
    /// [`Argument::validate`].
    pub fn check(&self, value: &Value) -> Result<(), SettingsError> {
        match self {
            Self::Integer(b) => b.check(value).map(drop),
            Self::UnsignedInteger(b) => b.check(value).map(drop),
            Self::Long(b) => b.check(value).map(drop),
            Self::UnsignedLong(b) => b.check(value).map(drop),
            Self::Float(b) => b.check(value).map(drop),
            Self::Double(b) => b.check(value).map(drop),
            Self::Bool(_) => BoolArgument::check(value).map(drop),
            Self::String(s) => s.check(value).map(drop),
            Self::SingleSelect(s) => s.check(value).map(drop),
            Self::MultiSelect(m) => m.check(value).map(drop),
            Self::SelectList(l) => l.check(value).map(drop),
            Self::FreeList(f) => f.check(value),
            Self::Slider(s) => s.check(value).map(drop),
            Self::PlainText(_) => Err(PlainText::refuse()),
        }
    }

    /// Stores `value` if it passes [`Argument::check`].
    ///
    /// # Errors
    /// As [`Argument::check`]; the previous value is kept on error.
    pub fn set(&mut self, value: Value) -> Result<(), SettingsError> {
        match self {
            Self::Integer(b) => b.check(&value).map(|n| b.store(n)),
            Self::UnsignedInteger(b) => b.check(&value).map(|n| b.store(n)),
            Self::Long(b) => b.check(&value).map(|n| b.store(n)),
            Self::UnsignedLong(b) => b.check(&value).map(|n| b.store(n)),
            Self::Float(b) => b.check(&value).map(|n| b.store(n)),
            Self::Double(b) => b.check(&value).map(|n| b.store(n)),
            Self::Bool(b) => BoolArgument::check(&value).map(|v| b.store(v)),
            Self::String(s) => s.check(&value).map(|text| s.store(text)),
            Self::SingleSelect(s) => s.check(&value).and_then(|i| s.select_index(i)),
            Self::MultiSelect(m) => m.check(&value).map(|flags| m.store(flags)),
            Self::SelectList(l) => l.check(&value).map(|items| l.store(items)),
            Self::FreeList(f) => {
                f.check(&value)?;
                if let Value::List(items) = value {
                    f.store(items);
                }
                Ok(())
            },
            Self::Slider(s) => s.check(&value).map(|v| s.store(v)),
            Self::PlainText(_) => Err(PlainText::refuse()),
        }
    }

    /// [`Argument::validate`] followed by [`Argument::set`].
    ///
    /// # Errors
    /// As [`Argument::validate`].
    pub fn set_raw(&mut self, raw: &str) -> Result<(), SettingsError> {
        let value = self.validate(raw)?;
        self.set(value)
    }

    /// # Errors
    /// [`SettingsError::ValueAbsent`] before the first successful write.
    pub fn get(&self) -> Result<Value, SettingsError> {
        self.current().ok_or_else(|| {
            SettingsError::absent(format!("{} argument has no value yet", self.kind()))
        })
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.current().is_some()
    }

    fn current(&self) -> Option<Value> {
        match self {
            Self::Integer(b) => b.current().map(Value::Integer),
            Self::UnsignedInteger(b) => b.current().map(Value::UnsignedInteger),
            Self::Long(b) => b.current().map(Value::Long),
            Self::UnsignedLong(b) => b.current().map(Value::UnsignedLong),
            Self::Float(b) => b.current().map(Value::Float),
            Self::Double(b) => b.current().map(Value::Double),
            Self::Bool(b) => b.current().map(Value::Bool),
            Self::String(s) => s.current().map(|text| Value::Text(text.to_owned())),
            Self::SingleSelect(s) => s.value(),
            Self::MultiSelect(m) => m.value(),
            Self::SelectList(l) => l.value(),
            Self::FreeList(f) => f.value(),
            Self::Slider(s) => s.value(),
            Self::PlainText(p) => Some(Value::Text(p.text().to_owned())),
        }
    }

    pub fn as_single_select_mut(&mut self) -> Result<&mut SingleSelect, SettingsError> {
        match self {
            Self::SingleSelect(s) => Ok(s),
            other => Err(shape_mismatch(ArgumentKind::SingleSelect, other.kind())),
        }
    }

    pub fn as_multi_select_mut(&mut self) -> Result<&mut MultiSelect, SettingsError> {
        match self {
            Self::MultiSelect(m) => Ok(m),
            other => Err(shape_mismatch(ArgumentKind::MultiSelect, other.kind())),
        }
    }

    pub fn as_select_list_mut(&mut self) -> Result<&mut SelectList, SettingsError> {
        match self {
            Self::SelectList(l) => Ok(l),
            other => Err(shape_mismatch(ArgumentKind::SelectList, other.kind())),
        }
    }

    pub fn as_free_list_mut(&mut self) -> Result<&mut FreeList, SettingsError> {
        match self {
            Self::FreeList(f) => Ok(f),
            other => Err(shape_mismatch(ArgumentKind::FreeList, other.kind())),
        }
    }
}

fn texts(items: Vec<&str>) -> Value {
    Value::Texts(items.into_iter().map(str::to_owned).collect())
}

fn shape_mismatch(wanted: ArgumentKind, found: ArgumentKind) -> SettingsError {
    SettingsError::wrong_shape(format!("expected a {wanted} argument, found {found}"))
}
