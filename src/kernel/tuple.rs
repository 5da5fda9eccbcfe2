// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::any::Any;
use std::marker::PhantomData;

use crate::arg_type::{tuple_elements, Arity, ArgumentType};
use crate::diagnostic::Diagnostic;
use crate::token::{Token, TokenKind};

/// Binds a bracketed tuple span (`[ ... ]` by default) to one argument,
/// delegating each element to a fresh `Inner` instance.
///
/// `Tuple`'s own [`ArgumentType::arity`] describes the accepted *element
/// count*, independent of `Inner`'s arity (which always describes a
/// single element, typically `1..1`) — e.g. `Tuple::<IntegerValue<i64>>::unbounded()`
/// accepts `[1 2 3]` with any number of integers.
pub struct Tuple<Inner> {
    element_arity: Arity,
    values: Vec<Box<dyn Any>>,
    _marker: PhantomData<Inner>,
}

impl<Inner> std::fmt::Debug for Tuple<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tuple").field("element_arity", &self.element_arity).field("len", &self.values.len()).finish()
    }
}

impl<Inner: ArgumentType + Default + 'static> Tuple<Inner> {
    /// Creates a `Tuple` accepting between `min` and `max` elements.
    pub fn new(min: usize, max: usize) -> Self {
        Self { element_arity: Arity::range(min, max), values: Vec::new(), _marker: PhantomData }
    }

    /// Creates a `Tuple` accepting any number of elements (including zero).
    pub fn unbounded() -> Self {
        Self { element_arity: Arity::at_least(0), values: Vec::new(), _marker: PhantomData }
    }
}

impl<Inner: ArgumentType + Default + 'static> ArgumentType for Tuple<Inner> {
    fn arity(&self) -> Arity {
        self.element_arity
    }

    fn reset_state(&mut self) {
        self.values.clear();
    }

    fn parse_values(&mut self, tokens: &[Token]) -> Vec<Diagnostic> {
        let (elements, mut diagnostics) = tuple_elements(tokens, self.element_arity);
        for (i, element) in elements.into_iter().enumerate() {
            let mut inner = Inner::default();
            let synthetic = Token::new(TokenKind::ArgumentValue, element.text.clone(), element.position);
            diagnostics.extend(reposition(inner.parse_values(std::slice::from_ref(&synthetic)), i));
            if let Some(value) = inner.take_value() {
                self.values.push(value);
            }
        }
        diagnostics
    }

    fn take_value(&mut self) -> Option<Box<dyn Any>> {
        Some(Box::new(std::mem::take(&mut self.values)))
    }

    fn type_name(&self) -> &'static str {
        "tuple"
    }
}

fn reposition(diagnostics: Vec<Diagnostic>, _element_index: usize) -> Vec<Diagnostic> {
    // Element-level diagnostics are reported with `token_index` relative to
    // the synthetic single-token slice handed to `Inner`; since a tuple
    // element carries no further structure to index into, position 0 is
    // already meaningful and nothing needs adjusting here beyond passing
    // the diagnostics through.
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::IntegerValue;

    fn tupled(text: &str, pos: usize) -> Token {
        Token::new(TokenKind::ArgumentValueTupled, text, pos)
    }

    #[test]
    fn delegates_each_element_to_a_fresh_inner() {
        let mut ty = Tuple::<IntegerValue<i64>>::unbounded();
        let tokens = vec![
            Token::new(TokenKind::OpeningTuple, "[", 0),
            tupled("1", 1),
            tupled("2", 3),
            tupled("3", 5),
            Token::new(TokenKind::ClosingTuple, "]", 6),
        ];
        assert!(ty.parse_values(&tokens).is_empty());
        let value = ty.take_value().unwrap();
        let values = value.downcast::<Vec<Box<dyn Any>>>().unwrap();
        let ints: Vec<i64> = values.into_iter().map(|v| *v.downcast::<i64>().unwrap()).collect();
        assert_eq!(ints, vec![1, 2, 3]);
    }

    #[test]
    fn arity_mismatch_is_reported() {
        let mut ty = Tuple::<IntegerValue<i64>>::new(2, 2);
        let tokens = vec![
            Token::new(TokenKind::OpeningTuple, "[", 0),
            tupled("1", 1),
            Token::new(TokenKind::ClosingTuple, "]", 2),
        ];
        let diagnostics = ty.parse_values(&tokens);
        assert_eq!(diagnostics.len(), 1);
    }
}
