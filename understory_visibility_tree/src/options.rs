// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Construction-time options for a [`VisibilityTree`](crate::VisibilityTree).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TreeOptions {
    /// When set, toggling the shape icon also sets the edge icon to the same
    /// value.
    pub linked_icons: bool,
}

impl TreeOptions {
    /// Creates the default options (icons linked).
    #[must_use]
    pub const fn new() -> Self {
        Self { linked_icons: true }
    }

    /// Sets [`TreeOptions::linked_icons`].
    #[must_use]
    pub const fn with_linked_icons(mut self, linked: bool) -> Self {
        self.linked_icons = linked;
        self
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::new()
    }
}
