// File: ./src/render/mod.rs
//! Toolkit-neutral render tree.
//!
//! Nodes mirror a small subset of HTML: a tag, a class, optional text,
//! optional attributes and ordered children. Whatever displays the result
//! (a browser, a terminal, an e-ink panel) walks this tree itself.
pub mod day_block;
pub mod html;

pub use day_block::DayBlockRenderer;
pub use html::to_html;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderNode {
    pub tag: String,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn new(tag: &str, class: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: class.to_string(),
            ..Default::default()
        }
    }

    /// Element with text content. Empty text is treated as no text.
    pub fn text(tag: &str, class: &str, text: &str) -> Self {
        let mut node = Self::new(tag, class);
        if !text.is_empty() {
            node.text = Some(text.to_string());
        }
        node
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: RenderNode) {
        self.children.push(child);
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first, pre-order walk over this node and all descendants.
    pub fn descendants(&self) -> Vec<&RenderNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            // Reversed so the first child is popped next.
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn find_all(&self, class: &str) -> Vec<&RenderNode> {
        self.descendants()
            .into_iter()
            .filter(|n| n.class == class)
            .collect()
    }

    pub fn find(&self, class: &str) -> Option<&RenderNode> {
        self.descendants().into_iter().find(|n| n.class == class)
    }
}
