// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Layout and windowing parameters for a [`VirtualTreeView`](crate::VirtualTreeView).
///
/// All values are in the host's logical pixel space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ViewConfig {
    /// Height of one row.
    pub row_height: f64,
    /// Extra distance above and below the viewport within which rows are
    /// still materialized.
    pub margin: f64,
    /// Height of the scroll viewport.
    pub viewport_height: f64,
}

impl ViewConfig {
    /// Creates the default configuration (20px rows, 12px margin, 600px
    /// viewport).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            row_height: 20.0,
            margin: 12.0,
            viewport_height: 600.0,
        }
    }

    /// Sets [`ViewConfig::row_height`].
    #[must_use]
    pub const fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Sets [`ViewConfig::margin`].
    #[must_use]
    pub const fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets [`ViewConfig::viewport_height`].
    #[must_use]
    pub const fn with_viewport_height(mut self, viewport_height: f64) -> Self {
        self.viewport_height = viewport_height;
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new()
    }
}
