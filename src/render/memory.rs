//! In-memory UI tree.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use super::tree::{
    BoundNode,
    UiTree,
};
use crate::config::BindingConfig;
use crate::types::{
    Locale,
    TranslationKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MemoryNode {
    tag: String,
    text: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element tree with text, attributes and classes, usable headless.
///
/// Detached nodes keep their content but are skipped by `bound_nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTree {
    nodes: Vec<MemoryNode>,
    roots: Vec<NodeId>,
}

impl MemoryTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(id.0)
    }

    fn push(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode { tag: tag.to_string(), parent, ..MemoryNode::default() });
        id
    }

    pub fn append_root(&mut self, tag: &str) -> NodeId {
        let id = self.push(tag, None);
        self.roots.push(id);
        id
    }

    /// `None` when `parent` does not belong to this tree.
    pub fn append_child(&mut self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.node(parent)?;
        let id = self.push(tag, Some(parent));
        self.node_mut(parent)?.children.push(id);
        Some(id)
    }

    /// Remove `id` and its subtree from the attached tree.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let parent = node.parent.take();

        match parent.and_then(|parent| self.node_mut(parent)) {
            Some(parent) => parent.children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.tag.as_str())
    }

    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|node| node.classes.contains(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.remove(class);
        }
    }

    /// Attached nodes in document order (depth-first, pre-order).
    #[must_use]
    pub fn attached(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }

        order
    }
}

impl UiTree for MemoryTree {
    type NodeId = NodeId;

    fn bound_nodes(&self, bindings: &BindingConfig) -> Vec<BoundNode<NodeId>> {
        self.attached()
            .into_iter()
            .filter_map(|id| {
                let node = self.node(id)?;
                let key_of = |marker: &str| {
                    node.attributes.get(marker).map(|key| TranslationKey::new(key.clone()))
                };
                let text_key = key_of(&bindings.text_marker);
                let attribute_key = key_of(&bindings.attribute_marker);

                (text_key.is_some() || attribute_key.is_some())
                    .then_some(BoundNode { id, text_key, attribute_key })
            })
            .collect()
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|node| node.text.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(node) = self.node_mut(node) {
            text.clone_into(&mut node.text);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(node) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn mark_active_locale(&mut self, bindings: &BindingConfig, locale: &Locale) {
        for id in self.attached() {
            let Some(code) = self.attribute(id, &bindings.switcher_marker) else {
                continue;
            };
            if code == locale.as_str() {
                self.add_class(id, &bindings.active_class);
            } else {
                self.remove_class(id, &bindings.active_class);
            }
        }
    }
}
