// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Structured, accumulated diagnostics with severity levels and
//! display/exit thresholds. Diagnostics are data, never thrown: nothing in
//! this crate unwinds the stack over a user-input error.

use crate::modify_record::ModifyRecord;

/// Severity of a [`Diagnostic`], totally ordered with `Error` highest.
///
/// Comparisons used by [`ErrorContainer`] are "in-error-minimum": a
/// diagnostic contributes to a threshold when its level is `>=` that
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Level {
    /// Lowest severity; informational detail not shown by default.
    Debug,
    /// Shown by default, never gates the exit code by default.
    Info,
    /// Shown by default, never gates the exit code by default.
    Warning,
    /// Highest severity; gates both display and exit by default.
    Error,
}

/// The identity of a diagnostic, independent of its rendered message.
///
/// Carries just enough data for callers to `match` on diagnostic identity
/// rather than compare rendered strings. The `Display` impl (via
/// `thiserror`) is *not* what ends up in [`Diagnostic::message`] for every
/// variant — tokenizer/parser diagnostics build a message with the
/// offending text spliced in, following the same `String`-concatenation
/// style `argh` itself uses for error text (see
/// `unrecognized_argument`/`MissingRequirements::err_on_any` in the
/// teacher's `argh/src/lib.rs`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// A quote (`"` or `'`) was opened but never closed before end of input.
    #[error("unterminated quote")]
    UnterminatedQuote,
    /// A tuple (`[ ... ]` by default) was opened but never closed.
    #[error("unterminated tuple")]
    UnterminatedTuple,
    /// An opening tuple bracket was encountered while already inside a tuple.
    #[error("nested tuple")]
    NestedTuple,
    /// A value token appeared with no positional argument left to claim it.
    #[error("unexpected value")]
    UnexpectedValue,
    /// A required argument never appeared.
    #[error("required argument not present")]
    RequiredNotPresent,
    /// More than one argument in an exclusive group was used.
    #[error("multiple arguments used in an exclusive group")]
    MultipleInExclusive,
    /// A unique argument was used alongside other non-help arguments.
    #[error("unique argument combined with other arguments")]
    UniqueCombinedWithOthers,
    /// An argument was used more times than its configured maximum.
    #[error("too many occurrences")]
    TooManyOccurrences,
    /// An argument type requiring `min` values received fewer.
    #[error("insufficient values")]
    InsufficientValues,
    /// A tuple span's element count didn't match the inner type's arity.
    #[error("tuple arity mismatch")]
    TupleArityMismatch,
    /// A numeric value overflowed or failed to parse as a number.
    #[error("numeric value out of range")]
    NumericOutOfRange,
    /// A file argument's path did not exist.
    #[error("file not found")]
    FileNotFound,
    /// A user-supplied error raised through `ArgumentType::parse_values`.
    #[error("{0}")]
    Custom(String),
}

/// A structured, positioned diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// The diagnostic's identity.
    pub kind: ErrorKind,
    /// The rendered message shown to the user.
    pub message: String,
    /// The index of the offending token in the owning command's token
    /// list, or `-1` if the diagnostic refers to the command as a whole.
    pub token_index: isize,
    /// How many characters, starting at the token's position, the caret
    /// underline should span.
    pub length: usize,
    /// The diagnostic's severity.
    pub level: Level,
}

impl Diagnostic {
    /// Creates a diagnostic that refers to a specific token.
    pub fn at_token(kind: ErrorKind, message: impl Into<String>, token_index: usize, length: usize, level: Level) -> Self {
        Self { kind, message: message.into(), token_index: token_index as isize, length, level }
    }

    /// Creates a diagnostic that refers to the whole command rather than a
    /// single token (`token_index == -1`).
    pub fn whole_command(kind: ErrorKind, message: impl Into<String>, level: Level) -> Self {
        Self { kind, message: message.into(), token_index: -1, length: 0, level }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A trait for types that can report their own [`Level`], so
/// [`ErrorContainer`] can be generic over the diagnostic representation
/// (used in tests with bare `Level` values as well as with [`Diagnostic`]).
pub trait Leveled {
    /// Returns this value's severity.
    fn level(&self) -> Level;
}

impl Leveled for Diagnostic {
    fn level(&self) -> Level {
        self.level
    }
}

impl Leveled for Level {
    fn level(&self) -> Level {
        *self
    }
}

/// Accumulates diagnostics in source order and gates them against two
/// independent severity thresholds.
#[derive(Debug, Clone)]
pub struct ErrorContainer<D = Diagnostic> {
    diagnostics: Vec<D>,
    min_display_level: ModifyRecord<Level>,
    min_exit_level: ModifyRecord<Level>,
}

impl<D> Default for ErrorContainer<D> {
    fn default() -> Self {
        Self {
            diagnostics: Vec::new(),
            min_display_level: ModifyRecord::new(Level::Info),
            min_exit_level: ModifyRecord::new(Level::Error),
        }
    }
}

impl<D: Leveled> ErrorContainer<D> {
    /// Creates an empty container with the default thresholds (display =
    /// `Info`, exit = `Error`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic, preserving source order.
    pub fn push(&mut self, diagnostic: D) {
        self.diagnostics.push(diagnostic);
    }

    /// Appends every diagnostic from `other`, preserving relative order.
    pub fn extend(&mut self, other: impl IntoIterator<Item = D>) {
        self.diagnostics.extend(other);
    }

    /// All diagnostics accumulated so far, in source order.
    pub fn diagnostics(&self) -> &[D] {
        &self.diagnostics
    }

    /// Clears accumulated diagnostics. Thresholds are untouched.
    pub fn reset(&mut self) {
        self.diagnostics.clear();
    }

    /// The minimum display-level threshold record (for inheritance).
    pub fn min_display_level(&self) -> &ModifyRecord<Level> {
        &self.min_display_level
    }

    /// Mutable access to the minimum display-level threshold record.
    pub fn min_display_level_mut(&mut self) -> &mut ModifyRecord<Level> {
        &mut self.min_display_level
    }

    /// The minimum exit-level threshold record (for inheritance).
    pub fn min_exit_level(&self) -> &ModifyRecord<Level> {
        &self.min_exit_level
    }

    /// Mutable access to the minimum exit-level threshold record.
    pub fn min_exit_level_mut(&mut self) -> &mut ModifyRecord<Level> {
        &mut self.min_exit_level
    }

    /// True if any diagnostic's level is `>=` the exit-level threshold.
    pub fn has_exit_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level() >= *self.min_exit_level.get())
    }

    /// True if any diagnostic's level is `>=` the display-level threshold.
    pub fn has_display_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level() >= *self.min_display_level.get())
    }

    /// Diagnostics that pass the display-level threshold, in source order.
    pub fn displayable(&self) -> impl Iterator<Item = &D> {
        let threshold = *self.min_display_level.get();
        self.diagnostics.iter().filter(move |d| d.level() >= threshold)
    }
}
