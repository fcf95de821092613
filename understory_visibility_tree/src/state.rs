// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon identifiers and the four-valued icon state.

use core::fmt;

use crate::TreeError;

/// One of the two visibility icons carried by every node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Icon {
    /// Shape (faces) visibility, index `0`.
    Shape,
    /// Edge visibility, index `1`.
    Edges,
}

impl Icon {
    /// Both icons in index order.
    pub const ALL: [Self; 2] = [Self::Shape, Self::Edges];

    /// Returns the icon's index into a node's state pair.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Shape => 0,
            Self::Edges => 1,
        }
    }

    /// Returns the icon for a raw index, or `None` if it is not `0` or `1`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Shape),
            1 => Some(Self::Edges),
            _ => None,
        }
    }
}

impl TryFrom<usize> for Icon {
    type Error = TreeError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(TreeError::InvalidIcon(index))
    }
}

/// Visibility state of a single icon.
///
/// The numeric codes (`0..=3`) are the wire vocabulary used by input data and
/// by [`VisibilityTree::states`](crate::VisibilityTree::states).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum IconState {
    /// Hidden.
    #[default]
    Unselected,
    /// Shown.
    Selected,
    /// Some descendants shown, some hidden.
    Mixed,
    /// Permanently inert; never changed by toggles.
    Disabled,
}

impl IconState {
    /// Returns the wire code of this state.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Unselected => 0,
            Self::Selected => 1,
            Self::Mixed => 2,
            Self::Disabled => 3,
        }
    }

    /// Maps a forced boolean to `Selected` / `Unselected`.
    #[must_use]
    pub const fn from_visible(visible: bool) -> Self {
        if visible {
            Self::Selected
        } else {
            Self::Unselected
        }
    }

    /// Value a toggle without an explicit target produces.
    ///
    /// `Mixed` resolves to `Selected`. `Disabled` stays `Disabled`.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Selected => Self::Unselected,
            Self::Unselected | Self::Mixed => Self::Selected,
            Self::Disabled => Self::Disabled,
        }
    }

    /// Returns `true` for [`IconState::Disabled`].
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Aggregates sibling states into their parent's state.
    ///
    /// - Any `Mixed` child, or at least one `Selected` together with at least
    ///   one `Unselected`, yields `Mixed`.
    /// - Otherwise any `Selected` yields `Selected`.
    /// - Otherwise any `Unselected` yields `Unselected`.
    /// - Otherwise (all `Disabled`, or no children at all) yields `Disabled`.
    ///
    /// ```
    /// use understory_visibility_tree::IconState::*;
    /// use understory_visibility_tree::IconState;
    ///
    /// assert_eq!(IconState::aggregate([Selected, Unselected]), Mixed);
    /// assert_eq!(IconState::aggregate([Selected, Disabled]), Selected);
    /// assert_eq!(IconState::aggregate([Disabled, Disabled]), Disabled);
    /// ```
    pub fn aggregate<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut selected = false;
        let mut unselected = false;
        for state in children {
            match state {
                Self::Mixed => return Self::Mixed,
                Self::Selected => selected = true,
                Self::Unselected => unselected = true,
                Self::Disabled => {}
            }
            if selected && unselected {
                return Self::Mixed;
            }
        }
        if selected {
            Self::Selected
        } else if unselected {
            Self::Unselected
        } else {
            Self::Disabled
        }
    }
}

impl TryFrom<u8> for IconState {
    type Error = TreeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Unselected),
            1 => Ok(Self::Selected),
            2 => Ok(Self::Mixed),
            3 => Ok(Self::Disabled),
            other => Err(TreeError::InvalidState(other)),
        }
    }
}

impl From<IconState> for u8 {
    fn from(state: IconState) -> Self {
        state.code()
    }
}

impl fmt::Display for IconState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unselected => "unselected",
            Self::Selected => "selected",
            Self::Mixed => "mixed",
            Self::Disabled => "disabled",
        })
    }
}

/// Whether a node is a leaf shape or a branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A leaf shape (no children).
    Leaf,
    /// A branch (assembly) node.
    Node,
}

impl NodeKind {
    /// The lowercase name used by pick handlers (`"leaf"` / `"node"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Node => "node",
        }
    }
}
