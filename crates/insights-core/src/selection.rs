//! Transient set of highlighted tags on the form.

use tracing::debug;

use crate::tag::Tag;

/// Tags currently selected on the form, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    tags: Vec<Tag>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the tag if it is selected, otherwise append it.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle(&mut self, tag: Tag) -> bool {
        if let Some(pos) = self.tags.iter().position(|t| *t == tag) {
            self.tags.remove(pos);
            debug!(tag = tag.as_str(), "tag deselected");
            false
        } else {
            debug!(tag = tag.as_str(), custom = tag.is_custom(), "tag selected");
            self.tags.push(tag);
            true
        }
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}
