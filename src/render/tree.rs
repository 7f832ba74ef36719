//! UI tree capability the render pass works against.

use std::fmt;

use crate::config::BindingConfig;
use crate::types::{
    Locale,
    TranslationKey,
};

/// A node carrying at least one translation binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundNode<Id> {
    pub id: Id,
    /// Key for the node's visible text.
    pub text_key: Option<TranslationKey>,
    /// Key for `BindingConfig::target_attribute`.
    pub attribute_key: Option<TranslationKey>,
}

/// Access to the UI tree owned by the host application.
///
/// The engine never creates or removes nodes; it only enumerates the bound
/// ones and rewrites their text or one attribute.
pub trait UiTree {
    type NodeId: Copy + fmt::Debug;

    /// Every node currently attached to the tree that carries the text or
    /// attribute marker, each exactly once.
    fn bound_nodes(&self, bindings: &BindingConfig) -> Vec<BoundNode<Self::NodeId>>;

    fn text(&self, node: Self::NodeId) -> Option<String>;

    fn set_text(&mut self, node: Self::NodeId, text: &str);

    fn attribute(&self, node: Self::NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: Self::NodeId, name: &str, value: &str);

    /// Flag the language switcher control for `locale` as active.
    ///
    /// Trees without a switcher keep the default no-op.
    fn mark_active_locale(&mut self, _bindings: &BindingConfig, _locale: &Locale) {}
}
