// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_virtual_tree::ViewConfig;
use understory_visibility_tree::TreeOptions;

/// Construction options for an [`AssemblyTree`](crate::AssemblyTree).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AssemblyTreeOptions {
    /// Model options.
    pub tree: TreeOptions,
    /// Row layout and windowing.
    pub view: ViewConfig,
    /// Level passed to the initial staged expansion. `-1` is smart expand.
    pub initial_level: i32,
}

impl AssemblyTreeOptions {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: TreeOptions::new(),
            view: ViewConfig::new(),
            initial_level: -1,
        }
    }

    /// Sets [`AssemblyTreeOptions::tree`].
    #[must_use]
    pub const fn with_tree(mut self, tree: TreeOptions) -> Self {
        self.tree = tree;
        self
    }

    /// Sets [`AssemblyTreeOptions::view`].
    #[must_use]
    pub const fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Sets [`AssemblyTreeOptions::initial_level`].
    #[must_use]
    pub const fn with_initial_level(mut self, level: i32) -> Self {
        self.initial_level = level;
        self
    }
}

impl Default for AssemblyTreeOptions {
    fn default() -> Self {
        Self::new()
    }
}
