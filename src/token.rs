// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The tokens produced by [`crate::tokenizer::Tokenizer`].

/// The classification assigned to a single [`Token`] by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word matching one of the command's known long or short-flag
    /// argument names, e.g. `--height` or `-j`.
    ArgumentName,
    /// A word of the form `-abc` where every character after the prefix
    /// is itself a known single-character argument name.
    ArgumentNameList,
    /// A plain value, either unquoted or dequoted.
    ArgumentValue,
    /// A value that appeared inside a tuple span (`[ ... ]` by default).
    ArgumentValueTupled,
    /// A bareword matching a sub-command name; ends tokenization of the
    /// current command.
    SubCommand,
    /// The verbatim remainder of the input after a `--` forwarding marker.
    Forward,
    /// The opening bracket of a tuple span.
    OpeningTuple,
    /// The closing bracket of a tuple span.
    ClosingTuple,
}

/// A single lexical unit produced from the input string.
///
/// Tokens are immutable once produced: the tokenizer never revisits or
/// rewrites a token after emitting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token's text, with quoting/escaping already resolved.
    pub text: String,
    /// The 0-based character offset of the token's first character in the
    /// original input string.
    pub position: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self { kind, text: text.into(), position }
    }

    /// Returns the half-open `[position, position + text.chars().count())`
    /// span of this token in the original input, in characters.
    pub fn span_len(&self) -> usize {
        self.text.chars().count()
    }
}
