use super::Argument;
use super::select::split_list;
use crate::error::SettingsError;
use crate::value::Value;
use serde::Serialize;

/// A list of free-form items, each validated by a scalar template argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeList {
    template: Box<Argument>,
    max_items: usize,
    items: Option<Vec<Value>>,
}

impl FreeList {
    /// # Errors
    /// [`SettingsError::WrongShape`] when the template is a select, list or
    /// plain text argument.
    pub fn new(template: Argument, max_items: usize) -> Result<Self, SettingsError> {
        if !template.kind().is_scalar() {
            return Err(SettingsError::wrong_shape(format!(
                "a {} argument cannot template free list items",
                template.kind()
            )));
        }
        Ok(Self { template: Box::new(template), max_items: max_items.max(1), items: None })
    }

    pub fn template(&self) -> &Argument {
        &self.template
    }

    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// Parses `raw` with the template and appends it.
    pub fn push(&mut self, raw: &str) -> Result<(), SettingsError> {
        let item = self.template.validate(raw)?;
        self.push_value(item)
    }

    pub fn push_value(&mut self, item: Value) -> Result<(), SettingsError> {
        self.template.check(&item)?;
        if self.len() >= self.max_items {
            return Err(SettingsError::out_of_range(format!(
                "list already holds the maximum of {} items",
                self.max_items
            )));
        }
        self.items.get_or_insert_with(Vec::new).push(item);
        Ok(())
    }

    pub fn remove(&mut self, position: usize) -> Result<Value, SettingsError> {
        match self.items.as_mut() {
            Some(items) if position < items.len() => Ok(items.remove(position)),
            _ => Err(SettingsError::out_of_range(format!(
                "no item at position {position} (list holds {})",
                self.len()
            ))),
        }
    }

    pub(crate) fn parse(&self, raw: &str) -> Result<Value, SettingsError> {
        let items = split_list(raw)
            .into_iter()
            .map(|item| self.template.validate(item))
            .collect::<Result<Vec<_>, _>>()?;
        self.check_len(items.len())?;
        Ok(Value::List(items))
    }

    pub(crate) fn check(&self, value: &Value) -> Result<(), SettingsError> {
        let Value::List(items) = value else {
            return Err(SettingsError::wrong_shape(format!(
                "expected a list, found {}",
                value.type_name()
            )));
        };
        self.check_len(items.len())?;
        items.iter().try_for_each(|item| self.template.check(item))
    }

    pub(crate) fn store(&mut self, items: Vec<Value>) {
        self.items = Some(items);
    }

    pub(crate) fn value(&self) -> Option<Value> {
        self.items.clone().map(Value::List)
    }

    fn check_len(&self, len: usize) -> Result<(), SettingsError> {
        if len > self.max_items {
            return Err(SettingsError::out_of_range(format!(
                "{len} items exceed the maximum of {}",
                self.max_items
            )));
        }
        Ok(())
    }
}
