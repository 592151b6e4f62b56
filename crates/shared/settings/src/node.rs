use crate::argument::Argument;
use crate::context::Context;
use crate::error::{SettingsError, SettingsErrorExt};
use crate::group::Group;
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Builds the final object out of a fully merged working context.
pub type Constructor<T> = Arc<dyn Fn(&Context) -> Result<T, SettingsError> + Send + Sync>;

pub const EMPTY_NODE: &str = "empty";

/// One configuration scenario: direct arguments, embedded groups and a
/// constructor.
///
/// The node is a template; [`Node::execute`] works on a copy of its context.
#[derive(Serialize)]
#[serde(bound = "")]
pub struct Node<T> {
    name: String,
    context: Context,
    groups: Vec<Group>,
    #[serde(skip)]
    constructor: Option<Constructor<T>>,
    #[serde(skip)]
    placeholder: bool,
}

impl<T> Node<T> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: Context::new(),
            groups: Vec::new(),
            constructor: None,
            placeholder: false,
        }
    }

    /// Placeholder node holding a single plain-text field; never executes.
    #[must_use]
    pub fn empty() -> Self {
        let context = Context::single(EMPTY_NODE, Argument::plain_text("nothing to configure"));
        Self { name: EMPTY_NODE.to_owned(), context, groups: Vec::new(), constructor: None, placeholder: true }
    }

    /// # Errors
    /// [`SettingsError::DuplicateName`] when the name is taken, including by
    /// a field of an embedded group.
    pub fn argument(mut self, name: impl Into<String>, argument: Argument) -> Result<Self, SettingsError> {
        self.context.add(name, argument).context(format!("node '{}'", self.name))?;
        Ok(self)
    }

    /// Embeds `group` and adds its schema fields to the node context.
    ///
    /// # Errors
    /// [`SettingsError::NotFullyConfigured`] for a group without schema or
    /// options, [`SettingsError::DuplicateName`] for a repeated group name or
    /// a schema field clashing with an existing field.
    pub fn group(mut self, group: Group) -> Result<Self, SettingsError> {
        if !group.is_fully_initialized() {
            return Err(SettingsError::not_configured(format!(
                "group '{}' needs a schema and at least one option",
                group.name()
            )));
        }
        if self.groups.iter().any(|g| g.name() == group.name()) {
            return Err(SettingsError::duplicate(format!(
                "node '{}' already embeds group '{}'",
                self.name,
                group.name()
            )));
        }
        self.context.extend_from(group.schema()).context(format!("group '{}'", group.name()))?;
        self.groups.push(group);
        Ok(self)
    }

    #[must_use]
    pub fn constructs<F>(mut self, constructor: F) -> Self
    where
        F: Fn(&Context) -> Result<T, SettingsError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn context(&self) -> &Context {
        &self.context
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub const fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown group.
    pub fn group_ref(&self, name: &str) -> Result<&Group, SettingsError> {
        self.groups.iter().find(|g| g.name() == name).ok_or_else(|| self.missing_group(name))
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown group.
    pub fn group_mut(&mut self, name: &str) -> Result<&mut Group, SettingsError> {
        match self.groups.iter().position(|g| g.name() == name) {
            Some(i) => Ok(&mut self.groups[i]),
            None => Err(self.missing_group(name)),
        }
    }

    /// # Errors
    /// As [`Context::set`].
    pub fn set_value(&mut self, field: &str, value: impl Into<Value>) -> Result<(), SettingsError> {
        self.context.set(field, value)
    }

    /// # Errors
    /// As [`Context::set_raw`].
    pub fn set_raw(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        self.context.set_raw(field, raw)
    }

    /// # Errors
    /// As [`Group::set_option_value`].
    pub fn set_option_value(
        &mut self,
        group: &str,
        option: &str,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), SettingsError> {
        self.group_mut(group)?.set_option_value(option, field, value)
    }

    /// Copies the context, applies each `(group, option)` selection naming an
    /// embedded group, then runs the constructor. Unknown group names are
    /// skipped.
    ///
    /// # Errors
    /// [`SettingsError::NotFullyConfigured`] for the placeholder node or a
    /// node without constructor; otherwise whatever a merge or the
    /// constructor reports.
    pub fn execute(&self, selections: &[(&str, &str)]) -> Result<T, SettingsError> {
        if self.placeholder {
            return Err(SettingsError::not_configured("the empty node cannot be executed"));
        }
        let Some(constructor) = &self.constructor else {
            return Err(SettingsError::not_configured(format!(
                "node '{}' has no constructor",
                self.name
            )));
        };

        let mut working = self.context.clone();
        for &(group_name, option) in selections {
            match self.groups.iter().find(|g| g.name() == group_name) {
                Some(group) => group.execute(option, &mut working)?,
                None => tracing::debug!(node = %self.name, group = group_name, "ignoring selection for unknown group"),
            }
        }
        constructor(&working).context(format!("node '{}'", self.name))
    }

    fn missing_group(&self, group: &str) -> SettingsError {
        SettingsError::not_found(format!("node '{}' has no group '{group}'", self.name))
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            context: self.context.clone(),
            groups: self.groups.clone(),
            constructor: self.constructor.clone(),
            placeholder: self.placeholder,
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("groups", &self.groups)
            .field("has_constructor", &self.constructor.is_some())
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupOption;

    #[derive(Debug, PartialEq)]
    struct Canvas {
        width: i32,
        height: i32,
        seed: i64,
    }

    fn seed_group() -> Group {
        let schema = Context::new().with("seed", Argument::long(i64::MIN..=i64::MAX)).expect("one field");
        let number = GroupOption::new("number")
            .argument("seed", Argument::long(i64::MIN..=i64::MAX))
            .expect("one field")
            .auto_merge();
        Group::new("seed", schema).option(number).expect("valid option")
    }

    fn canvas_node() -> Node<Canvas> {
        Node::new("basic")
            .argument("width", Argument::integer(1..=4096))
            .and_then(|n| n.argument("height", Argument::integer(1..=4096)))
            .and_then(|n| n.group(seed_group()))
            .expect("valid node")
            .constructs(|ctx| {
                Ok(Canvas { width: ctx.get("width")?, height: ctx.get("height")?, seed: ctx.get("seed")? })
            })
    }

    #[test]
    fn group_schema_joins_the_node_context() {
        let node = canvas_node();
        assert_eq!(node.context().names().collect::<Vec<_>>(), ["width", "height", "seed"]);

        let clash = node.argument("seed", Argument::boolean()).expect_err("seed comes from the group");
        assert!(matches!(clash, SettingsError::DuplicateName { .. }));
    }

    #[test]
    fn execution_leaves_the_template_untouched() {
        let mut node = canvas_node();
        node.set_value("width", 64).expect("in range");
        node.set_value("height", 32).expect("in range");
        node.set_option_value("seed", "number", "seed", 7_i64).expect("in range");

        let canvas = node.execute(&[("seed", "number"), ("palette", "warm")]).expect("complete input");
        assert_eq!(canvas, Canvas { width: 64, height: 32, seed: 7 });
        assert!(!node.context().argument("seed").expect("schema field").is_set());
    }

    #[test]
    fn unconfigured_groups_are_rejected() {
        let bare = Group::new("seed", Context::new());
        let err = Node::<Canvas>::new("basic").group(bare).expect_err("no schema, no options");
        assert!(matches!(err, SettingsError::NotFullyConfigured { .. }));
    }

    #[test]
    fn the_empty_node_refuses_to_run() {
        let node = Node::<Canvas>::empty();
        assert_eq!(node.name(), EMPTY_NODE);
        assert_eq!(node.context().len(), 1);
        assert!(node.context().contains(EMPTY_NODE));
        assert_eq!(node.context().get::<String>(EMPTY_NODE), Ok("nothing to configure".to_owned()));
        assert!(matches!(node.execute(&[]), Err(SettingsError::NotFullyConfigured { .. })));
    }

    #[test]
    fn missing_constructor_is_reported() {
        let node = Node::<Canvas>::new("draft");
        assert!(matches!(node.execute(&[]), Err(SettingsError::NotFullyConfigured { .. })));
    }
}
