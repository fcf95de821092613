// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors reported by the string and index based entry points.
///
/// Tree mutation itself is fail-soft: unresolved paths and disabled nodes are
/// no-ops rather than errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// An action string that is not one of `show`, `hide`, or `toggle`.
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    /// An icon index other than `0` or `1`.
    #[error("icon index {0} is out of range (expected 0 or 1)")]
    InvalidIcon(usize),
    /// A state code outside `0..=3`.
    #[error("state code {0} is out of range (expected 0..=3)")]
    InvalidState(u8),
}
