// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::any::Any;
use std::path::{Path, PathBuf};

use crate::arg_type::{Arity, ArgumentType};
use crate::diagnostic::{Diagnostic, ErrorKind, Level};
use crate::token::Token;

/// A single required path value (arity `1..1`) that is checked for
/// existence.
///
/// The existence check is injectable (`exists_check`) rather than hard
/// wired to [`Path::exists`] so tests don't need a real filesystem entry
/// to exercise the success path.
pub struct FileValue {
    value: Option<PathBuf>,
    exists_check: fn(&Path) -> bool,
}

impl Default for FileValue {
    fn default() -> Self {
        Self { value: None, exists_check: Path::exists }
    }
}

impl std::fmt::Debug for FileValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileValue").field("value", &self.value).finish()
    }
}

impl FileValue {
    /// Creates a `FileValue` that checks existence with [`Path::exists`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `FileValue` with a custom existence check, for tests or
    /// for virtualized filesystems.
    pub fn with_exists_check(exists_check: fn(&Path) -> bool) -> Self {
        Self { value: None, exists_check }
    }
}

impl ArgumentType for FileValue {
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
        let path = PathBuf::from(&token.text);
        if !(self.exists_check)(&path) {
            return vec![Diagnostic::at_token(
                ErrorKind::FileNotFound,
                format!("file not found: {}", token.text),
                0,
                token.span_len(),
                Level::Error,
            )];
        }
        self.value = Some(path);
        Vec::new()
    }

    fn take_value(&mut self) -> Option<Box<dyn Any>> {
        self.value.take().map(|v| Box::new(v) as Box<dyn Any>)
    }

    fn type_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn accepts_a_path_that_exists_per_the_injected_check() {
        let mut ty = FileValue::with_exists_check(|_| true);
        let tokens = vec![Token::new(TokenKind::ArgumentValue, "foo.txt", 0)];
        assert!(ty.parse_values(&tokens).is_empty());
        let value = ty.take_value().unwrap();
        assert_eq!(*value.downcast::<PathBuf>().unwrap(), PathBuf::from("foo.txt"));
    }

    #[test]
    fn missing_file_is_a_diagnostic() {
        let mut ty = FileValue::with_exists_check(|_| false);
        let tokens = vec![Token::new(TokenKind::ArgumentValue, "missing.txt", 0)];
        let diagnostics = ty.parse_values(&tokens);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, ErrorKind::FileNotFound);
    }
}
