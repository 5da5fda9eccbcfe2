// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The polymorphic `ArgumentType` contract (spec §4.4).
//!
//! This mirrors the erasure boundary `argh` itself uses to store
//! heterogeneous option slots in one table (`CmdOption<'a>` wrapping
//! `&mut dyn Flag` / `&mut dyn ParseValueSlot` in `argh/src/lib.rs`),
//! generalized with [`std::any::Any`] so a [`crate::Command`] can hold a
//! `Vec<Box<dyn ArgumentType>>` of genuinely different value types without
//! a derive macro generating monomorphic glue at compile time.

use std::any::Any;
use std::fmt;

use crate::diagnostic::{Diagnostic, ErrorKind, Level};
use crate::token::{Token, TokenKind};

/// The `[min, max]` count of value tokens an argument type consumes.
/// `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Minimum number of value tokens required.
    pub min: usize,
    /// Maximum number of value tokens accepted, or `None` for unbounded.
    pub max: Option<usize>,
}

impl Arity {
    /// An argument type that consumes exactly `n` values.
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    /// An argument type that consumes between `min` and `max` values,
    /// inclusive.
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    /// An argument type that consumes at least `min` values, with no
    /// upper bound.
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }
}

/// The contract every pluggable argument type implements.
///
/// An `ArgumentType` is instantiated once per [`crate::Argument`] and
/// reused across parses; [`Self::reset_state`] is called at the start of
/// every [`crate::Command::parse`] to discard whatever the previous parse
/// produced.
pub trait ArgumentType: fmt::Debug {
    /// The `[min, max]` number of value tokens this type wants, absent an
    /// explicit tuple span (a tuple span overrides this, see
    /// [`consume`]).
    fn arity(&self) -> Arity;

    /// Clears any value and diagnostics left over from a previous parse.
    fn reset_state(&mut self);

    /// Consumes the token slice the parser sliced out for this occurrence
    /// (already arity-sized, or the full contents of a tuple span),
    /// updating internal state. Returns any diagnostics raised while doing
    /// so (empty on success).
    fn parse_values(&mut self, tokens: &[Token]) -> Vec<Diagnostic>;

    /// Takes the final parsed value, if any was produced, erased to
    /// `dyn Any` so it can be stored in [`crate::ParsedArguments`]
    /// alongside unrelated value types.
    fn take_value(&mut self) -> Option<Box<dyn Any>>;

    /// A short name for this type, used in diagnostic messages
    /// (`"expected an integer, got ..."`-style text).
    fn type_name(&self) -> &'static str;
}

/// What [`consume`] decided for one argument occurrence.
pub struct ConsumeOutcome {
    /// Number of tokens, starting at the head of the slice passed to
    /// [`consume`], that belong to this occurrence (inclusive of the
    /// tuple brackets themselves when `is_tuple` is true).
    pub take: usize,
    /// Whether `take` was driven by an explicit tuple span rather than
    /// the plain arity policy.
    pub is_tuple: bool,
    /// Diagnostics raised while deciding `take` (e.g.
    /// [`ErrorKind::InsufficientValues`]).
    pub diagnostics: Vec<Diagnostic>,
}

fn is_value_like(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::ArgumentValue)
}

/// Shared arity-consumption policy (spec §4.4), factored out of every
/// kernel type the way `argh`'s `ParseValueSlotTy<Slot, T>` factors value
/// *storage* shape out of each type's `parse_func`: every kernel
/// `ArgumentType::parse_values` only supplies value conversion, while this
/// function decides how many tokens it gets to see.
///
/// `tail` is the slice of tokens starting immediately after the argument
/// name token.
pub fn consume(arity: Arity, tail: &[Token]) -> ConsumeOutcome {
    if let Some(first) = tail.first() {
        if first.kind == TokenKind::OpeningTuple {
            let mut end = 1;
            while end < tail.len() && tail[end].kind != TokenKind::ClosingTuple {
                end += 1;
            }
            let take = if end < tail.len() { end + 1 } else { end };
            return ConsumeOutcome { take, is_tuple: true, diagnostics: Vec::new() };
        }
    }

    let max = arity.max.unwrap_or(usize::MAX);
    let mut take = 0;
    while take < tail.len() && take < max && is_value_like(tail[take].kind) {
        take += 1;
    }

    let mut diagnostics = Vec::new();
    if take < arity.min {
        diagnostics.push(Diagnostic::whole_command(
            ErrorKind::InsufficientValues,
            format!("expected at least {} value(s), got {}", arity.min, take),
            Level::Error,
        ));
    }
    ConsumeOutcome { take, is_tuple: false, diagnostics }
}

/// Extracts the plain value tokens out of a tuple span (the
/// `OpeningTuple ... ClosingTuple` slice [`consume`] returned), checking
/// the element count against `arity` and raising
/// [`ErrorKind::TupleArityMismatch`] on mismatch.
pub fn tuple_elements<'t>(tuple_tokens: &'t [Token], arity: Arity) -> (Vec<&'t Token>, Vec<Diagnostic>) {
    let elements: Vec<&Token> =
        tuple_tokens.iter().filter(|t| t.kind == TokenKind::ArgumentValueTupled).collect();

    let mut diagnostics = Vec::new();
    let within_bounds = elements.len() >= arity.min && arity.max.map_or(true, |max| elements.len() <= max);
    if !within_bounds {
        diagnostics.push(Diagnostic::whole_command(
            ErrorKind::TupleArityMismatch,
            format!("tuple has {} element(s), expected {}", elements.len(), arity_repr(arity)),
            Level::Error,
        ));
    }
    (elements, diagnostics)
}

fn arity_repr(arity: Arity) -> String {
    match arity.max {
        Some(max) if max == arity.min => format!("exactly {max}"),
        Some(max) => format!("between {} and {}", arity.min, max),
        None => format!("at least {}", arity.min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_token(text: &str, pos: usize) -> Token {
        Token::new(TokenKind::ArgumentValue, text, pos)
    }

    #[test]
    fn exact_arity_takes_one_value() {
        let tail = vec![value_token("5", 0)];
        let outcome = consume(Arity::exact(1), &tail);
        assert_eq!(outcome.take, 1);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn exact_arity_with_no_values_is_insufficient() {
        let tail: Vec<Token> = vec![];
        let outcome = consume(Arity::exact(1), &tail);
        assert_eq!(outcome.take, 0);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, ErrorKind::InsufficientValues);
    }

    #[test]
    fn optional_arity_stops_at_non_value_token() {
        let tail = vec![Token::new(TokenKind::ArgumentName, "--other", 0)];
        let outcome = consume(Arity::range(0, 1), &tail);
        assert_eq!(outcome.take, 0);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn greedy_arity_stops_at_max() {
        let tail = vec![value_token("1", 0), value_token("2", 2), value_token("3", 4)];
        let outcome = consume(Arity::range(1, 2), &tail);
        assert_eq!(outcome.take, 2);
    }

    #[test]
    fn tuple_span_overrides_arity_bounds() {
        let tail = vec![
            Token::new(TokenKind::OpeningTuple, "[", 0),
            Token::new(TokenKind::ArgumentValueTupled, "1", 1),
            Token::new(TokenKind::ArgumentValueTupled, "2", 3),
            Token::new(TokenKind::ClosingTuple, "]", 5),
        ];
        let outcome = consume(Arity::exact(1), &tail);
        assert!(outcome.is_tuple);
        assert_eq!(outcome.take, 4);
    }
}
