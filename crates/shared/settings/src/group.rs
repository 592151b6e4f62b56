//! Groups of mutually exclusive input shapes.
//!
//! A [`Group`] owns an output schema. Each of its [`GroupOption`]s collects
//! input in its own [`Context`] and merges it into that schema; the caller
//! picks one option per execution.

use crate::argument::{Argument, ArgumentKind};
use crate::context::Context;
use crate::error::{SettingsError, SettingsErrorExt};
use crate::value::Value;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::fmt;
use std::sync::Arc;

/// Writes an option's input into the group output.
///
/// Must be deterministic: the same option inputs always yield the same output.
pub type MergeFn = Arc<dyn Fn(&Context, &mut Context) -> Result<(), SettingsError> + Send + Sync>;

#[derive(Clone)]
enum Merge {
    /// Field-by-field copy; option fields mirror the schema.
    Copy,
    Custom(MergeFn),
}

#[derive(Clone)]
pub struct GroupOption {
    name: String,
    context: Context,
    merge: Option<Merge>,
}

impl GroupOption {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), context: Context::new(), merge: None }
    }

    /// # Errors
    /// [`SettingsError::DuplicateName`] for a repeated field name.
    pub fn argument(mut self, name: impl Into<String>, argument: Argument) -> Result<Self, SettingsError> {
        self.context.add(name, argument).context(format!("option '{}'", self.name))?;
        Ok(self)
    }

    #[must_use]
    pub fn merges<F>(mut self, merge: F) -> Self
    where
        F: Fn(&Context, &mut Context) -> Result<(), SettingsError> + Send + Sync + 'static,
    {
        self.merge = Some(Merge::Custom(Arc::new(merge)));
        self
    }

    /// Copies every field into the same-named schema field.
    #[must_use]
    pub fn auto_merge(mut self) -> Self {
        self.merge = Some(Merge::Copy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn context(&self) -> &Context {
        &self.context
    }

    pub const fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub const fn is_configured(&self) -> bool {
        self.merge.is_some()
    }

    pub const fn is_auto_merge(&self) -> bool {
        matches!(self.merge, Some(Merge::Copy))
    }

    /// Merges this option's input into `output`.
    ///
    /// # Errors
    /// [`SettingsError::NotFullyConfigured`] without a merge function, or
    /// whatever the merge reports (typically [`SettingsError::ValueAbsent`]).
    pub fn apply(&self, output: &mut Context) -> Result<(), SettingsError> {
        let merged = match &self.merge {
            Some(Merge::Copy) => {
                for (field, argument) in self.context.iter() {
                    if argument.kind() == ArgumentKind::PlainText {
                        continue;
                    }
                    output.set(field, argument.get()?)?;
                }
                Ok(())
            },
            Some(Merge::Custom(merge)) => merge(&self.context, output),
            None => Err(SettingsError::not_configured(format!(
                "option '{}' has no merge function",
                self.name
            ))),
        };
        merged.context(format!("option '{}'", self.name))
    }

    /// Fields missing from `schema` or typed differently there.
    fn schema_mismatches(&self, schema: &Context) -> Vec<String> {
        let mut mismatches: Vec<String> = self
            .context
            .iter()
            .filter(|(_, argument)| argument.kind() != ArgumentKind::PlainText)
            .filter(|(field, argument)| {
                schema.argument(field).map_or(true, |target| target.kind() != argument.kind())
            })
            .map(|(field, _)| field.to_owned())
            .collect();
        mismatches.extend(
            schema.names().filter(|field| !self.context.contains(field)).map(str::to_owned),
        );
        mismatches
    }
}

impl fmt::Debug for GroupOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupOption")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("auto_merge", &self.is_auto_merge())
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl Serialize for GroupOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GroupOption", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("auto_merge", &self.is_auto_merge())?;
        state.serialize_field("context", &self.context)?;
        state.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Group {
    name: String,
    schema: Context,
    options: Vec<GroupOption>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Context) -> Self {
        Self { name: name.into(), schema, options: Vec::new() }
    }

    /// Adds an alternative input shape.
    ///
    /// # Errors
    /// * [`SettingsError::DuplicateName`] for a repeated option name.
    /// * [`SettingsError::NotFullyConfigured`] when the option has no merge.
    /// * [`SettingsError::WrongShape`] when an auto-merge option does not
    ///   mirror the schema.
    pub fn option(mut self, option: GroupOption) -> Result<Self, SettingsError> {
        if self.options.iter().any(|o| o.name == option.name) {
            return Err(SettingsError::duplicate(format!(
                "group '{}' already has an option '{}'",
                self.name, option.name
            )));
        }
        if !option.is_configured() {
            return Err(SettingsError::not_configured(format!(
                "option '{}' of group '{}' has no merge function",
                option.name, self.name
            )));
        }
        if option.is_auto_merge() {
            let mismatches = option.schema_mismatches(&self.schema);
            if !mismatches.is_empty() {
                return Err(SettingsError::wrong_shape(format!(
                    "auto-merge option '{}' does not match the schema of group '{}' on [{}]",
                    option.name,
                    self.name,
                    mismatches.join(", ")
                )));
            }
        }
        self.options.push(option);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn schema(&self) -> &Context {
        &self.schema
    }

    pub fn options(&self) -> &[GroupOption] {
        &self.options
    }

    /// A non-empty schema and at least one option.
    pub fn is_fully_initialized(&self) -> bool {
        !self.schema.is_empty() && !self.options.is_empty()
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown option.
    pub fn option_ref(&self, name: &str) -> Result<&GroupOption, SettingsError> {
        self.options.iter().find(|o| o.name == name).ok_or_else(|| self.missing(name))
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown option.
    pub fn option_mut(&mut self, name: &str) -> Result<&mut GroupOption, SettingsError> {
        match self.options.iter().position(|o| o.name == name) {
            Some(i) => Ok(&mut self.options[i]),
            None => Err(self.missing(name)),
        }
    }

    /// Runs `option`'s merge into `output`, which must contain the schema.
    ///
    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown option, otherwise as
    /// [`GroupOption::apply`].
    pub fn execute(&self, option: &str, output: &mut Context) -> Result<(), SettingsError> {
        self.option_ref(option)?.apply(output).context(format!("group '{}'", self.name))
    }

    /// Writes one input field of one option.
    ///
    /// # Errors
    /// [`SettingsError::NotFound`] or anything [`Context::set`] rejects.
    pub fn set_option_value(
        &mut self,
        option: &str,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), SettingsError> {
        self.option_mut(option)?.context_mut().set(field, value)
    }

    fn missing(&self, option: &str) -> SettingsError {
        SettingsError::not_found(format!("group '{}' has no option '{option}'", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size_schema() -> Context {
        Context::new().with("size", Argument::integer(1..=1000)).expect("single field")
    }

    fn exact() -> GroupOption {
        GroupOption::new("exact")
            .argument("size", Argument::integer(1..=1000))
            .expect("single field")
            .auto_merge()
    }

    fn doubled() -> GroupOption {
        GroupOption::new("doubled")
            .argument("half", Argument::integer(1..=500))
            .expect("single field")
            .merges(|input, output| output.set("size", input.get::<i32>("half")? * 2))
    }

    #[test]
    fn options_need_unique_names_and_a_merge() {
        let group = Group::new("size", size_schema()).option(exact()).expect("first option");

        let dup = group.clone().option(exact()).expect_err("same name");
        assert!(matches!(dup, SettingsError::DuplicateName { .. }));

        let bare = group.option(GroupOption::new("bare")).expect_err("no merge");
        assert!(matches!(bare, SettingsError::NotFullyConfigured { .. }));
    }

    #[test]
    fn auto_merge_must_mirror_the_schema() {
        let mismatched = GroupOption::new("exact")
            .argument("size", Argument::long(1..=1000))
            .expect("single field")
            .auto_merge();

        let err = Group::new("size", size_schema()).option(mismatched).expect_err("kind differs");
        assert!(matches!(err, SettingsError::WrongShape { .. }));
    }

    #[test]
    fn fully_initialized_needs_schema_and_options() {
        assert!(!Group::new("size", size_schema()).is_fully_initialized());
        let schemaless =
            Group::new("size", Context::new()).option(doubled()).expect("custom merges are trusted");
        assert!(!schemaless.is_fully_initialized());

        let ready = Group::new("size", size_schema()).option(doubled()).expect("custom merge");
        assert!(ready.is_fully_initialized());
    }

    #[test]
    fn execute_runs_the_selected_option() {
        let mut group = Group::new("size", size_schema())
            .option(exact())
            .and_then(|g| g.option(doubled()))
            .expect("distinct options");
        group.set_option_value("doubled", "half", 21).expect("in range");

        let mut output = size_schema();
        group.execute("doubled", &mut output).expect("merge succeeds");
        assert_eq!(output.get::<i32>("size"), Ok(42));

        let err = group.execute("exact", &mut output).expect_err("exact input unset");
        assert!(matches!(err, SettingsError::ValueAbsent { .. }));

        let err = group.execute("scaled", &mut output).expect_err("unknown option");
        assert!(matches!(err, SettingsError::NotFound { .. }));
    }
}
