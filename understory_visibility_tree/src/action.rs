// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;
use core::str::FromStr;

use crate::TreeError;

/// A named state mutation accepted by
/// [`VisibilityTree::apply_action`](crate::VisibilityTree::apply_action).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateAction {
    /// Force the icon to `Selected`.
    Show,
    /// Force the icon to `Unselected`.
    Hide,
    /// Flip the icon (`Mixed` becomes `Selected`).
    Toggle,
}

impl StateAction {
    /// The `force` argument this action maps to.
    #[must_use]
    pub const fn force(self) -> Option<bool> {
        match self {
            Self::Show => Some(true),
            Self::Hide => Some(false),
            Self::Toggle => None,
        }
    }
}

impl FromStr for StateAction {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            "toggle" => Ok(Self::Toggle),
            other => Err(TreeError::UnknownAction(other.to_string())),
        }
    }
}
