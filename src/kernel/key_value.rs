// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::any::Any;
use std::collections::BTreeMap;

use crate::arg_type::{Arity, ArgumentType};
use crate::diagnostic::{Diagnostic, ErrorKind, Level};
use crate::token::Token;

/// Parses one or more `key=value` tokens into a mapping (arity `1..∞`).
///
/// Uses a `BTreeMap` rather than a hash map so iteration order (and
/// therefore anything rendered from it, such as help text) is
/// deterministic.
#[derive(Debug, Default)]
pub struct KeyValue {
    values: BTreeMap<String, String>,
}

impl KeyValue {
    /// Creates a fresh, empty `KeyValue`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArgumentType for KeyValue {
    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn reset_state(&mut self) {
        self.values.clear();
    }

    fn parse_values(&mut self, tokens: &[Token]) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            match token.text.split_once('=') {
                Some((k, v)) => {
                    self.values.insert(k.to_string(), v.to_string());
                }
                None => diagnostics.push(Diagnostic::at_token(
                    ErrorKind::Custom(format!("expected 'key=value', got '{}'", token.text)),
                    format!("expected 'key=value', got '{}'", token.text),
                    i,
                    token.span_len(),
                    Level::Error,
                )),
            }
        }
        diagnostics
    }

    fn take_value(&mut self) -> Option<Box<dyn Any>> {
        Some(Box::new(std::mem::take(&mut self.values)))
    }

    fn type_name(&self) -> &'static str {
        "key=value"
    }
}
