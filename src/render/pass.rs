//! Render Pass.

use super::tree::UiTree;
use crate::config::BindingConfig;
use crate::dictionary::Dictionary;
use crate::types::{
    Locale,
    TranslationKey,
};

/// Outcome of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Bound nodes visited.
    pub nodes: usize,
    /// Text contents and attributes rewritten.
    pub written: usize,
    /// Text contents and attributes that already held the translation.
    pub unchanged: usize,
    /// Keys with no translation in the rendered locale, in visit order.
    pub missing: Vec<TranslationKey>,
}

/// Sync every bound node of `tree` with the `locale` strings of `dictionary`.
///
/// A key without a translation, or with an empty one, leaves the node as it
/// is. Values are only
/// written when they differ from what the node already shows, so repeating
/// a pass with the same inputs writes nothing.
pub fn render_pass<T>(
    tree: &mut T,
    dictionary: &Dictionary,
    locale: &Locale,
    bindings: &BindingConfig,
) -> RenderReport
where
    T: UiTree + ?Sized,
{
    let mut report = RenderReport::default();
    let translation = |key: &TranslationKey| {
        dictionary.lookup(locale.as_str(), key.as_str()).filter(|text| !text.is_empty())
    };

    for node in tree.bound_nodes(bindings) {
        report.nodes += 1;

        if let Some(key) = node.text_key {
            match translation(&key) {
                Some(text) if tree.text(node.id).as_deref() == Some(text) => report.unchanged += 1,
                Some(text) => {
                    tree.set_text(node.id, text);
                    report.written += 1;
                }
                None => report.missing.push(key),
            }
        }

        if let Some(key) = node.attribute_key {
            let name = bindings.target_attribute.as_str();
            match translation(&key) {
                Some(value) if tree.attribute(node.id, name).as_deref() == Some(value) => {
                    report.unchanged += 1;
                }
                Some(value) => {
                    tree.set_attribute(node.id, name, value);
                    report.written += 1;
                }
                None => report.missing.push(key),
            }
        }
    }

    tree.mark_active_locale(bindings, locale);

    tracing::debug!(
        locale = %locale,
        nodes = report.nodes,
        written = report.written,
        missing = report.missing.len(),
        "Render pass complete"
    );

    report
}
