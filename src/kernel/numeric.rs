// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::any::Any;
use std::fmt;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::arg_type::{Arity, ArgumentType};
use crate::diagnostic::{Diagnostic, ErrorKind, Level};
use crate::token::Token;

/// A single required numeric value (arity `1..1`).
///
/// Generic over any `T: FromStr` whose error implements `Display`, which
/// covers every integer primitive (`i8`..`i128`, `u8`..`u128`) as well as
/// `f32`/`f64` — the kernel names "Integer / Byte / ..." in spec §4.4 are
/// all instances of this one type, e.g. `IntegerValue::<u8>::new()` is the
/// "Byte" variant. A failed or out-of-range parse both surface as
/// [`ErrorKind::NumericOutOfRange`]; this kernel type favors a single,
/// simple diagnostic over distinguishing "not a number" from "too big",
/// which a richer user-defined `ArgumentType` is free to do.
pub struct IntegerValue<T> {
    value: Option<T>,
    _marker: PhantomData<T>,
}

impl<T> Default for IntegerValue<T> {
    fn default() -> Self {
        Self { value: None, _marker: PhantomData }
    }
}

impl<T> IntegerValue<T> {
    /// Creates a fresh, empty `IntegerValue`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> fmt::Debug for IntegerValue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegerValue").field("value", &self.value).finish()
    }
}

impl<T> ArgumentType for IntegerValue<T>
where
    T: FromStr + Any + 'static,
    T::Err: Display,
{
    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn reset_state(&mut self) {
        self.value = None;
    }

    fn parse_values(&mut self, tokens: &[Token]) -> Vec<Diagnostic> {
        let Some(token) = tokens.first() else {
            return Vec::new();
        };
        match token.text.parse::<T>() {
            Ok(v) => {
                self.value = Some(v);
                Vec::new()
            }
            Err(e) => vec![Diagnostic::at_token(
                ErrorKind::NumericOutOfRange,
                format!("'{}' is not a valid number: {e}", token.text),
                0,
                token.span_len(),
                Level::Error,
            )],
        }
    }

    fn take_value(&mut self) -> Option<Box<dyn Any>> {
        self.value.take().map(|v| Box::new(v) as Box<dyn Any>)
    }

    fn type_name(&self) -> &'static str {
        "number"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn parses_a_valid_integer() {
        let mut ty = IntegerValue::<i64>::new();
        let tokens = vec![Token::new(TokenKind::ArgumentValue, "12", 0)];
        assert!(ty.parse_values(&tokens).is_empty());
        let value = ty.take_value().unwrap();
        assert_eq!(*value.downcast::<i64>().unwrap(), 12);
    }

    #[test]
    fn overflowing_byte_is_numeric_out_of_range() {
        let mut ty = IntegerValue::<u8>::new();
        let tokens = vec![Token::new(TokenKind::ArgumentValue, "999", 0)];
        let diagnostics = ty.parse_values(&tokens);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, ErrorKind::NumericOutOfRange);
    }

    #[test]
    fn non_numeric_text_is_numeric_out_of_range() {
        let mut ty = IntegerValue::<i64>::new();
        let tokens = vec![Token::new(TokenKind::ArgumentValue, "abc", 0)];
        let diagnostics = ty.parse_values(&tokens);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, ErrorKind::NumericOutOfRange);
    }
}
