use crate::error::{SettingsError, SettingsErrorExt};
use crate::node::Node;
use crate::value::Value;
use fxhash::FxHashSet;
use serde::Serialize;
use std::fmt;

/// Named set of [`Node`]s producing `T`.
///
/// Built once as a template; [`Builder::execute`] never mutates it. Callers
/// that want to pre-fill values clone the builder first.
#[derive(Serialize)]
#[serde(bound = "")]
pub struct Builder<T> {
    name: String,
    nodes: Vec<Node<T>>,
    #[serde(skip)]
    built: bool,
}

impl<T> Builder<T> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), nodes: Vec::new(), built: false }
    }

    /// Fallback for capabilities without settings: only the empty node.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::warn!(builder = %name, "using an empty settings builder");
        Self { name, nodes: vec![Node::empty()], built: true }
    }

    /// Replaces the node set.
    ///
    /// # Errors
    /// [`SettingsError::DuplicateName`] when two nodes share a name; the
    /// previous node set is kept.
    pub fn build(&mut self, nodes: impl IntoIterator<Item = Node<T>>) -> Result<(), SettingsError> {
        let nodes: Vec<Node<T>> = nodes.into_iter().collect();
        let mut seen = FxHashSet::default();
        if let Some(dup) = nodes.iter().find(|n| !seen.insert(n.name())) {
            return Err(SettingsError::duplicate(format!(
                "builder '{}' got node '{}' twice",
                self.name,
                dup.name()
            )));
        }
        self.nodes = nodes;
        self.built = true;
        Ok(())
    }

    /// Chaining form of [`Builder::build`].
    ///
    /// # Errors
    /// As [`Builder::build`].
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node<T>>) -> Result<Self, SettingsError> {
        self.build(nodes)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_built(&self) -> bool {
        self.built
    }

    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(Node::name)
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown node.
    pub fn node(&self, name: &str) -> Result<&Node<T>, SettingsError> {
        self.nodes.iter().find(|n| n.name() == name).ok_or_else(|| self.missing(name))
    }

    /// # Errors
    /// [`SettingsError::NotFound`] for an unknown node.
    pub fn node_mut(&mut self, name: &str) -> Result<&mut Node<T>, SettingsError> {
        match self.nodes.iter().position(|n| n.name() == name) {
            Some(i) => Ok(&mut self.nodes[i]),
            None => Err(self.missing(name)),
        }
    }

    /// # Errors
    /// As [`Node::set_value`].
    pub fn set_value(&mut self, node: &str, field: &str, value: impl Into<Value>) -> Result<(), SettingsError> {
        self.node_mut(node)?.set_value(field, value)
    }

    /// # Errors
    /// As [`Node::set_raw`].
    pub fn set_raw(&mut self, node: &str, field: &str, raw: &str) -> Result<(), SettingsError> {
        self.node_mut(node)?.set_raw(field, raw)
    }

    /// # Errors
    /// As [`Node::set_option_value`].
    pub fn set_option_value(
        &mut self,
        node: &str,
        group: &str,
        option: &str,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), SettingsError> {
        self.node_mut(node)?.set_option_value(group, option, field, value)
    }

    /// Runs the node called `node` with the given `(group, option)` picks.
    ///
    /// # Errors
    /// [`SettingsError::NotFound`] when nothing was built or no node matches,
    /// otherwise as [`Node::execute`].
    pub fn execute(&self, node: &str, selections: &[(&str, &str)]) -> Result<T, SettingsError> {
        if !self.built || self.nodes.is_empty() {
            return Err(SettingsError::not_found(format!("builder '{}' has no nodes", self.name)));
        }
        self.node(node)?.execute(selections).context(format!("builder '{}'", self.name))
    }

    fn missing(&self, node: &str) -> SettingsError {
        SettingsError::not_found(format!("builder '{}' has no node '{node}'", self.name))
    }
}

impl<T> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), nodes: self.nodes.clone(), built: self.built }
    }
}

impl<T> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("name", &self.name)
            .field("nodes", &self.nodes)
            .field("built", &self.built)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Argument;

    fn sized(name: &str) -> Node<i32> {
        Node::new(name)
            .argument("size", Argument::integer(1..=100))
            .expect("one field")
            .constructs(|ctx| ctx.get::<i32>("size"))
    }

    #[test]
    fn duplicate_node_names_keep_the_previous_set() {
        let mut builder = Builder::new("square").with_nodes([sized("basic")]).expect("one node");
        let err = builder.build([sized("a"), sized("a")]).expect_err("duplicate");

        assert!(matches!(err, SettingsError::DuplicateName { .. }));
        assert_eq!(builder.node_names().collect::<Vec<_>>(), ["basic"]);
    }

    #[test]
    fn unbuilt_or_unknown_nodes_are_not_found() {
        let builder = Builder::<i32>::new("square");
        assert!(matches!(builder.execute("basic", &[]), Err(SettingsError::NotFound { .. })));

        let builder = builder.with_nodes([sized("basic")]).expect("one node");
        assert!(matches!(builder.execute("advanced", &[]), Err(SettingsError::NotFound { .. })));
    }

    #[test]
    fn clones_are_independent_templates() {
        let template = Builder::new("square").with_nodes([sized("basic")]).expect("one node");
        let mut filled = template.clone();
        filled.set_value("basic", "size", 12).expect("in range");

        assert_eq!(filled.execute("basic", &[]), Ok(12));
        assert!(matches!(template.execute("basic", &[]), Err(SettingsError::ValueAbsent { .. })));
    }

    #[test]
    fn empty_builders_hold_only_the_placeholder() {
        let builder = Builder::<i32>::empty("nothing");
        assert_eq!(builder.node_names().collect::<Vec<_>>(), ["empty"]);
        assert!(matches!(builder.execute("empty", &[]), Err(SettingsError::NotFullyConfigured { .. })));
    }
}
