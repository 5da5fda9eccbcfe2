// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::any::Any;

use crate::arg_type::{Arity, ArgumentType};
use crate::diagnostic::Diagnostic;
use crate::token::Token;

/// A flag whose value is the number of times it was used (arity `0..0`).
///
/// `parse_values` is invoked once per occurrence by the parser (see
/// [`crate::parser`]), so the running count here always equals the
/// argument's `usage_count` at the moment [`Self::take_value`] is called.
#[derive(Debug, Default)]
pub struct Counter {
    count: usize,
}

impl Counter {
    /// Creates a fresh `Counter` starting at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArgumentType for Counter {
    fn arity(&self) -> Arity {
        Arity::exact(0)
    }

    fn reset_state(&mut self) {
        self.count = 0;
    }

    fn parse_values(&mut self, _tokens: &[Token]) -> Vec<Diagnostic> {
        self.count = self.count.saturating_add(1);
        Vec::new()
    }

    fn take_value(&mut self) -> Option<Box<dyn Any>> {
        Some(Box::new(self.count))
    }

    fn type_name(&self) -> &'static str {
        "counter"
    }
}
