// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::any::Any;

use crate::arg_type::{Arity, ArgumentType};
use crate::diagnostic::Diagnostic;
use crate::token::Token;

/// A single required string value (arity `1..1`), passed through
/// unchanged. The simplest possible [`ArgumentType`].
#[derive(Debug, Default)]
pub struct StringValue {
    value: Option<String>,
}

impl StringValue {
    /// Creates a fresh, empty `StringValue`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArgumentType for StringValue {
    fn arity(&self) -> Arity {
        Arity::exact(1)
    }

    fn reset_state(&mut self) {
        self.value = None;
    }

    fn parse_values(&mut self, tokens: &[Token]) -> Vec<Diagnostic> {
        if let Some(token) = tokens.first() {
            self.value = Some(token.text.clone());
        }
        Vec::new()
    }

    fn take_value(&mut self) -> Option<Box<dyn Any>> {
        self.value.take().map(|v| Box::new(v) as Box<dyn Any>)
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}
