// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Errors raised while *building* a [`crate::Command`] tree.
//!
//! These are precondition violations (duplicate names, a root added as a
//! sub-command, a non-alphabetic command name, a non-positive error code),
//! not user-input diagnostics. They abort schema construction by
//! returning `Err`, never by panicking: a library assembling a command
//! tree from data it doesn't fully control (e.g. plugin-contributed
//! sub-commands) needs to recover from a duplicate name, not unwind.

/// A precondition violation encountered while building a [`crate::Command`]
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two arguments (or two sub-commands) share an identifier.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),
    /// A root command was added as someone else's sub-command.
    #[error("a root command cannot be added as a sub-command")]
    InvalidChild,
    /// A command's name contained a non-alphabetic character.
    #[error("command name must be alphabetic: {0}")]
    InvalidName(String),
    /// `set_error_code` was called with `0`.
    #[error("error code must be greater than zero")]
    InvalidErrorCode,
}
