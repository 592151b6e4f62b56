use crate::error::SettingsError;
use crate::value::Value;
use serde::Serialize;
use std::sync::Arc;
use strum::VariantNames;

/// The closed value set of a select-style argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Choices(Arc<[String]>);

impl Choices {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Uses the variant names of `E`, as spelled by its `strum` attributes.
    #[must_use]
    pub fn of<E: VariantNames>() -> Self {
        Self::new(E::VARIANTS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn index_of(&self, name: &str) -> Result<usize, SettingsError> {
        let name = name.trim();
        self.0.iter().position(|c| c == name).ok_or_else(|| {
            SettingsError::out_of_range(format!("'{name}' is not one of [{}]", self.0.join(", ")))
        })
    }

    pub fn name_at(&self, index: usize) -> Result<&str, SettingsError> {
        self.0.get(index).map(String::as_str).ok_or_else(|| {
            SettingsError::out_of_range(format!(
                "index {index} out of range for {} choices",
                self.0.len()
            ))
        })
    }

    fn names_of(&self, indices: impl IntoIterator<Item = usize>) -> Vec<String> {
        indices.into_iter().filter_map(|i| self.0.get(i).cloned()).collect()
    }
}

/// Splits `"[a, b]"` or `"a,b"` into trimmed items; blank input is empty.
pub(crate) fn split_list(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();
    if inner.is_empty() { Vec::new() } else { inner.split(',').map(str::trim).collect() }
}

fn expect_texts(value: &Value) -> Result<&[String], SettingsError> {
    match value {
        Value::Texts(names) => Ok(names),
        other => Err(SettingsError::wrong_shape(format!(
            "expected a text list, found {}",
            other.type_name()
        ))),
    }
}

/// Exactly one name out of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleSelect {
    choices: Choices,
    selected: Option<usize>,
}

impl SingleSelect {
    #[must_use]
    pub const fn new(choices: Choices) -> Self {
        Self { choices, selected: None }
    }

    pub const fn choices(&self) -> &Choices {
        &self.choices
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.and_then(|i| self.choices.name_at(i).ok())
    }

    /// Selects by name; an unknown name keeps the previous selection.
    pub fn select(&mut self, name: &str) -> Result<(), SettingsError> {
        self.selected = Some(self.choices.index_of(name)?);
        Ok(())
    }

    pub fn select_index(&mut self, index: usize) -> Result<(), SettingsError> {
        self.choices.name_at(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub(crate) fn check(&self, value: &Value) -> Result<usize, SettingsError> {
        match value {
            Value::Text(name) => self.choices.index_of(name),
            other => Err(SettingsError::wrong_shape(format!(
                "expected a choice name, found {}",
                other.type_name()
            ))),
        }
    }

    pub(crate) fn value(&self) -> Option<Value> {
        self.selected().map(|name| Value::Text(name.to_owned()))
    }
}

/// Any subset of a closed set; unset until the first selection change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiSelect {
    choices: Choices,
    selected: Option<Vec<bool>>,
}

impl MultiSelect {
    #[must_use]
    pub const fn new(choices: Choices) -> Self {
        Self { choices, selected: None }
    }

    pub const fn choices(&self) -> &Choices {
        &self.choices
    }

    pub fn is_selected(&self, name: &str) -> Result<bool, SettingsError> {
        let index = self.choices.index_of(name)?;
        Ok(self.selected.as_ref().is_some_and(|flags| flags[index]))
    }

    pub fn select(&mut self, name: &str) -> Result<(), SettingsError> {
        let index = self.choices.index_of(name)?;
        self.set_state_at(index, true)
    }

    pub fn deselect(&mut self, name: &str) -> Result<(), SettingsError> {
        let index = self.choices.index_of(name)?;
        self.set_state_at(index, false)
    }

    pub fn toggle(&mut self, name: &str) -> Result<(), SettingsError> {
        let index = self.choices.index_of(name)?;
        self.toggle_index(index)
    }

    pub fn set_state(&mut self, name: &str, selected: bool) -> Result<(), SettingsError> {
        let index = self.choices.index_of(name)?;
        self.set_state_at(index, selected)
    }

    pub fn select_index(&mut self, index: usize) -> Result<(), SettingsError> {
        self.set_state_at(index, true)
    }

    pub fn deselect_index(&mut self, index: usize) -> Result<(), SettingsError> {
        self.set_state_at(index, false)
    }

    pub fn toggle_index(&mut self, index: usize) -> Result<(), SettingsError> {
        let state = self.selected.as_ref().is_some_and(|flags| flags.get(index) == Some(&true));
        self.set_state_at(index, !state)
    }

    pub fn set_state_at(&mut self, index: usize, selected: bool) -> Result<(), SettingsError> {
        self.choices.name_at(index)?;
        let len = self.choices.len();
        self.selected.get_or_insert_with(|| vec![false; len])[index] = selected;
        Ok(())
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Vec<bool>, SettingsError> {
        let mut flags = vec![false; self.choices.len()];
        for name in expect_texts(value)? {
            flags[self.choices.index_of(name)?] = true;
        }
        Ok(flags)
    }

    pub(crate) fn store(&mut self, flags: Vec<bool>) {
        self.selected = Some(flags);
    }

    pub(crate) fn value(&self) -> Option<Value> {
        self.selected.as_ref().map(|flags| {
            let picked = flags.iter().enumerate().filter(|(_, on)| **on).map(|(i, _)| i);
            Value::Texts(self.choices.names_of(picked))
        })
    }
}

/// An ordered list of picks from a closed set, repeats allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectList {
    choices: Choices,
    max_items: usize,
    items: Option<Vec<usize>>,
}

impl SelectList {
    /// `max_items` is at least one.
    #[must_use]
    pub fn new(choices: Choices, max_items: usize) -> Self {
        Self { choices, max_items: max_items.max(1), items: None }
    }

    pub const fn choices(&self) -> &Choices {
        &self.choices
    }

    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// Appends the first choice matching `name`.
    pub fn add(&mut self, name: &str) -> Result<(), SettingsError> {
        let index = self.choices.index_of(name)?;
        self.add_index(index)
    }

    pub fn add_index(&mut self, index: usize) -> Result<(), SettingsError> {
        self.choices.name_at(index)?;
        if self.len() >= self.max_items {
            return Err(SettingsError::out_of_range(format!(
                "list already holds the maximum of {} items",
                self.max_items
            )));
        }
        self.items.get_or_insert_with(Vec::new).push(index);
        Ok(())
    }

    /// Removes the pick at `position` in the list.
    pub fn remove(&mut self, position: usize) -> Result<(), SettingsError> {
        match self.items.as_mut() {
            Some(items) if position < items.len() => {
                items.remove(position);
                Ok(())
            },
            _ => Err(SettingsError::out_of_range(format!(
                "no item at position {position} (list holds {})",
                self.len()
            ))),
        }
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Vec<usize>, SettingsError> {
        let names = expect_texts(value)?;
        if names.len() > self.max_items {
            return Err(SettingsError::out_of_range(format!(
                "{} items exceed the maximum of {}",
                names.len(),
                self.max_items
            )));
        }
        names.iter().map(|name| self.choices.index_of(name)).collect()
    }

    pub(crate) fn store(&mut self, items: Vec<usize>) {
        self.items = Some(items);
    }

    pub(crate) fn value(&self) -> Option<Value> {
        self.items.as_ref().map(|items| Value::Texts(self.choices.names_of(items.iter().copied())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Choices {
        Choices::new(["red", "green", "blue"])
    }

    #[test]
    fn unknown_names_keep_the_previous_selection() {
        let mut select = SingleSelect::new(palette());
        select.select("green").expect("known name");

        assert!(matches!(select.select("mauve"), Err(SettingsError::OutOfRange { .. })));
        assert!(matches!(select.select_index(3), Err(SettingsError::OutOfRange { .. })));
        assert_eq!(select.selected(), Some("green"));
    }

    #[test]
    fn multi_select_reports_names_in_declaration_order() {
        let mut select = MultiSelect::new(palette());
        assert_eq!(select.value(), None);

        select.select("blue").expect("known name");
        select.toggle_index(0).expect("valid index");
        select.toggle("blue").expect("known name");
        select.select("green").expect("known name");

        assert_eq!(select.value(), Some(Value::Texts(vec!["red".into(), "green".into()])));
        assert_eq!(select.is_selected("blue"), Ok(false));
    }

    #[test]
    fn select_list_enforces_its_cap() {
        let mut list = SelectList::new(palette(), 2);
        list.add("red").expect("first pick");
        list.add("red").expect("repeat pick");

        assert!(matches!(list.add("blue"), Err(SettingsError::OutOfRange { .. })));
        list.remove(0).expect("valid position");
        list.add_index(2).expect("room again");
        assert_eq!(list.value(), Some(Value::Texts(vec!["red".into(), "blue".into()])));
    }

    #[test]
    fn select_list_cap_is_at_least_one() {
        assert_eq!(SelectList::new(palette(), 0).max_items(), 1);
    }

    #[test]
    fn list_syntax_accepts_brackets_and_bare_commas() {
        assert_eq!(split_list("[a, b , c]"), vec!["a", "b", "c"]);
        assert_eq!(split_list("a,b"), vec!["a", "b"]);
        assert!(split_list(" [ ] ").is_empty());
    }
}
