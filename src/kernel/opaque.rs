// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::any::Any;

use crate::arg_type::{Arity, ArgumentType};
use crate::diagnostic::Diagnostic;
use crate::token::Token;

/// The user-defined escape hatch named in spec §4.4: wraps a closure that
/// consumes a token slice and produces either an erased value or
/// diagnostics, so a caller who needs a type the kernel doesn't provide
/// doesn't need to implement [`ArgumentType`] from scratch for one-off
/// cases.
pub struct Opaque {
    arity: Arity,
    parse: Box<dyn FnMut(&[Token]) -> Result<Box<dyn Any>, Vec<Diagnostic>>>,
    value: Option<Box<dyn Any>>,
    type_name: &'static str,
}

impl std::fmt::Debug for Opaque {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opaque").field("arity", &self.arity).field("type_name", &self.type_name).finish()
    }
}

impl Opaque {
    /// Creates an `Opaque` argument type with the given arity, type name
    /// (used only in diagnostics), and parse closure.
    pub fn new(
        arity: Arity,
        type_name: &'static str,
        parse: impl FnMut(&[Token]) -> Result<Box<dyn Any>, Vec<Diagnostic>> + 'static,
    ) -> Self {
        Self { arity, parse: Box::new(parse), value: None, type_name }
    }
}

impl ArgumentType for Opaque {
    fn arity(&self) -> Arity {
        self.arity
    }

    fn reset_state(&mut self) {
        self.value = None;
    }

    fn parse_values(&mut self, tokens: &[Token]) -> Vec<Diagnostic> {
        match (self.parse)(tokens) {
            Ok(value) => {
                self.value = Some(value);
                Vec::new()
            }
            Err(diagnostics) => diagnostics,
        }
    }

    fn take_value(&mut self) -> Option<Box<dyn Any>> {
        self.value.take()
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }
}
