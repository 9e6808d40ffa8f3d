// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page buffer: the rendered document with addressable elements.
//!
//! A page is a flat sequence of nodes. Raw nodes hold static markup;
//! element nodes carry an `id` attribute and content that can be replaced
//! after the fact. Element IDs are unique within a page.

use std::collections::HashMap;

/// Page buffer errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Element id already present on page: {0}")]
    DuplicateElement(String),

    #[error("No element with id: {0}")]
    MissingElement(String),
}

#[derive(Debug, Clone)]
enum Node {
    Raw(String),
    Element {
        id: String,
        tag: &'static str,
        content: String,
    },
}

/// Ordered HTML output with patchable elements.
#[derive(Debug, Clone, Default)]
pub struct Page {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append static markup.
    pub fn push_raw(&mut self, html: impl Into<String>) {
        self.nodes.push(Node::Raw(html.into()));
    }

    /// Open a container element. The container's ID is reserved so that no
    /// child can reuse it.
    pub fn open_container(&mut self, id: &str, tag: &'static str) -> Result<(), PageError> {
        self.reserve(id)?;
        self.nodes.push(Node::Raw(format!(r#"<{tag} id="{id}">"#)));
        Ok(())
    }

    pub fn close_container(&mut self, tag: &'static str) {
        self.nodes.push(Node::Raw(format!("</{tag}>")));
    }

    /// Append an element whose content can later be replaced by [`Page::patch`].
    pub fn push_element(
        &mut self,
        id: impl Into<String>,
        tag: &'static str,
        content: impl Into<String>,
    ) -> Result<(), PageError> {
        let id = id.into();
        self.reserve(&id)?;
        self.nodes.push(Node::Element {
            id,
            tag,
            content: content.into(),
        });
        Ok(())
    }

    /// Replace the content of the element with the given ID.
    pub fn patch(&mut self, id: &str, html: impl Into<String>) -> Result<(), PageError> {
        let position = self
            .index
            .get(id)
            .copied()
            .ok_or_else(|| PageError::MissingElement(id.to_string()))?;

        match self.nodes.get_mut(position) {
            Some(Node::Element { content, .. }) => {
                *content = html.into();
                Ok(())
            }
            // Container IDs are reserved but have no replaceable content
            _ => Err(PageError::MissingElement(id.to_string())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Current content of an element.
    pub fn content(&self, id: &str) -> Option<&str> {
        let position = *self.index.get(id)?;
        match &self.nodes[position] {
            Node::Element { content, .. } => Some(content),
            Node::Raw(_) => None,
        }
    }

    /// IDs of all patchable elements in document order.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element { id, .. } => Some(id.as_str()),
            Node::Raw(_) => None,
        })
    }

    /// Serialize the whole page.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Raw(html) => out.push_str(html),
                Node::Element { id, tag, content } => {
                    out.push_str(&format!(r#"<{tag} id="{id}">{content}</{tag}>"#));
                }
            }
        }
        out
    }

    fn reserve(&mut self, id: &str) -> Result<(), PageError> {
        if self.index.contains_key(id) {
            return Err(PageError::DuplicateElement(id.to_string()));
        }
        self.index.insert(id.to_string(), self.nodes.len());
        Ok(())
    }
}
