use crate::argument::Argument;
use crate::error::{SettingsError, SettingsErrorExt};
use crate::value::{FromValue, Value};
use fxhash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::str::FromStr;

/// Ordered, name-unique collection of [`Argument`]s.
///
/// `Clone` is deep: the copy shares nothing with the original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: Vec<(String, Argument)>,
    index: FxHashMap<String, usize>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context holding exactly one argument.
    pub(crate) fn single(name: impl Into<String>, argument: Argument) -> Self {
        let name = name.into();
        let index = std::iter::once((name.clone(), 0)).collect();
        Self { entries: vec![(name, argument)], index }
    }

    /// # Errors
    /// [`SettingsError::DuplicateName`] when `name` is already present.
    pub fn add(&mut self, name: impl Into<String>, argument: Argument) -> Result<(), SettingsError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(SettingsError::duplicate(format!("argument '{name}' already exists")));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, argument));
        Ok(())
    }

    /// Chaining form of [`Context::add`].
    ///
    /// # Errors
    /// As [`Context::add`].
    pub fn with(mut self, name: impl Into<String>, argument: Argument) -> Result<Self, SettingsError> {
        self.add(name, argument)?;
        Ok(self)
    }

    /// Adds copies of every argument of `other`; nothing is added on conflict.
    ///
    /// # Errors
    /// [`SettingsError::DuplicateName`] naming the first clashing field.
    pub fn extend_from(&mut self, other: &Self) -> Result<(), SettingsError> {
        if let Some((name, _)) = other.entries.iter().find(|(name, _)| self.contains(name)) {
            return Err(SettingsError::duplicate(format!("argument '{name}' already exists")));
        }
        for (name, argument) in &other.entries {
            self.add(name.clone(), argument.clone())?;
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.entries.iter().map(|(name, argument)| (name.as_str(), argument))
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown name.
    pub fn argument(&self, name: &str) -> Result<&Argument, SettingsError> {
        let position = self.position(name)?;
        Ok(&self.entries[position].1)
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown name.
    pub fn argument_mut(&mut self, name: &str) -> Result<&mut Argument, SettingsError> {
        let position = self.position(name)?;
        Ok(&mut self.entries[position].1)
    }

    /// Positional access in insertion order.
    ///
    /// # Errors
    /// [`SettingsError::OutOfRange`] past the last entry.
    pub fn get_at(&self, index: usize) -> Result<(&str, &Argument), SettingsError> {
        self.entries.get(index).map(|(name, argument)| (name.as_str(), argument)).ok_or_else(
            || {
                SettingsError::out_of_range(format!(
                    "index {index} out of range for {} arguments",
                    self.entries.len()
                ))
            },
        )
    }

    /// # Errors
    /// [`SettingsError::NotFound`] or [`SettingsError::ValueAbsent`].
    pub fn value(&self, name: &str) -> Result<Value, SettingsError> {
        self.argument(name)?.get().context(format!("reading '{name}'"))
    }

    /// Reads a value as `T`.
    ///
    /// # Errors
    /// As [`Context::value`], plus [`SettingsError::WrongShape`] when `T` does
    /// not match the argument kind.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, SettingsError> {
        T::from_value(self.value(name)?).context(format!("reading '{name}'"))
    }

    /// Reads a select value and parses it into `E`, usually a `strum`
    /// `EnumString` enum.
    ///
    /// # Errors
    /// [`SettingsError::InvalidFormat`] when the text does not parse.
    pub fn get_enum<E: FromStr>(&self, name: &str) -> Result<E, SettingsError> {
        let text: String = self.get(name)?;
        text.parse::<E>().map_err(|_| {
            SettingsError::invalid_format(format!("'{text}' is not a known value of '{name}'"))
        })
    }

    /// # Errors
    /// [`SettingsError::NotFound`] or anything [`Argument::set`] rejects.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), SettingsError> {
        self.argument_mut(name)?.set(value.into()).context(format!("writing '{name}'"))
    }

    /// # Errors
    /// [`SettingsError::NotFound`] or anything [`Argument::set_raw`] rejects.
    pub fn set_raw(&mut self, name: &str, raw: &str) -> Result<(), SettingsError> {
        self.argument_mut(name)?.set_raw(raw).context(format!("writing '{name}'"))
    }

    fn position(&self, name: &str) -> Result<usize, SettingsError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SettingsError::not_found(format!("no argument named '{name}'")))
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, argument) in &self.entries {
            map.serialize_entry(name, argument)?;
        }
        map.end()
    }
}
