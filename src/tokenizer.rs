// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The hand-written scanner that turns an input string into a sequence of
//! [`Token`]s (spec §4.2).
//!
//! The scanner has three states (`Normal`, in-quote, in-tuple) but is
//! written as a single function with explicit index bookkeeping rather
//! than a literal `enum State` plus a dispatch loop, matching the teacher
//! crate's preference for small, direct control flow over machinery
//! (`argh`'s `parse_struct_args` is one `while let` loop with inline
//! `if`/`continue`, not a state-table).

use std::collections::HashSet;

use crate::diagnostic::{Diagnostic, ErrorKind, Level};
use crate::token::{Token, TokenKind};

/// The parts of a command's configuration the tokenizer needs in order to
/// classify words, independent of the rest of [`crate::Command`].
pub struct TokenizeConfig<'a> {
    /// The prefix character expected before an argument name (default `'-'`).
    pub prefix: char,
    /// The opening tuple bracket character.
    pub tuple_open: char,
    /// The closing tuple bracket character.
    pub tuple_close: char,
    /// Every registered name (long or short) of every argument on this
    /// command, used to classify `ArgumentName`.
    pub argument_names: &'a HashSet<String>,
    /// Every registered single-character name, used to classify
    /// `ArgumentNameList` clusters like `-abc`.
    pub short_names: &'a HashSet<char>,
    /// The names of this command's direct sub-commands.
    pub sub_command_names: &'a HashSet<String>,
}

/// Where tokenization of the current command stopped because a
/// sub-command boundary was found.
#[derive(Debug, Clone)]
pub struct SubCommandBoundary {
    /// The sub-command's name, as it appeared in the input.
    pub name: String,
    /// The byte offset (into the *original* input passed to [`tokenize`])
    /// at which the sub-command's own input begins. A byte offset, not a
    /// character offset, so the caller can slice the input `&str`
    /// directly without panicking on a non-char boundary.
    pub remainder_start: usize,
}

/// The result of tokenizing one command's slice of the input.
#[derive(Debug, Clone, Default)]
pub struct TokenizeResult {
    /// Tokens produced for the current command.
    pub tokens: Vec<Token>,
    /// Diagnostics raised while scanning (unterminated quote/tuple, nested
    /// tuple).
    pub diagnostics: Vec<Diagnostic>,
    /// Set if a bareword matching a sub-command name was found in
    /// `Normal` state; the caller is responsible for recursing into that
    /// sub-command's tokenizer with the remainder of the input.
    pub sub_command: Option<SubCommandBoundary>,
}

/// Scans `input` into a [`TokenizeResult`], recognizing quoting, escapes,
/// tuple spans, and (non-tuple) sub-command boundaries, per spec §4.2 and
/// the grammar in spec §6.
pub fn tokenize(input: &str, cfg: &TokenizeConfig<'_>) -> TokenizeResult {
    let chars: Vec<char> = input.chars().collect();
    // Byte offset of each character, so a char index `i` can be translated
    // into a byte index suitable for slicing `input` directly (`input` is
    // not necessarily ASCII; spec §3 positions are character offsets, but
    // `remainder_start` is consumed as a byte index by `Command::tokenize_tree`).
    let byte_offsets: Vec<usize> = input.char_indices().map(|(b, _)| b).collect();
    let len = chars.len();
    let mut i = 0;
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut sub_command = None;

    while i < len {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        // Forward: '--' followed by whitespace (or end of input).
        if chars[i] == '-' && i + 1 < len && chars[i + 1] == '-' && (i + 2 >= len || chars[i + 2].is_whitespace()) {
            let start = i;
            i += 2;
            while i < len && chars[i].is_whitespace() {
                i += 1;
            }
            let rest: String = chars[i..].iter().collect();
            tokens.push(Token::new(TokenKind::Forward, rest, start));
            break;
        }

        if chars[i] == cfg.tuple_open {
            let open_pos = i;
            tokens.push(Token::new(TokenKind::OpeningTuple, cfg.tuple_open.to_string(), open_pos));
            i += 1;

            loop {
                while i < len && chars[i].is_whitespace() {
                    i += 1;
                }
                if i >= len {
                    diagnostics.push(Diagnostic::at_token(
                        ErrorKind::UnterminatedTuple,
                        format!("unterminated tuple opened at position {open_pos}"),
                        tokens.len() - 1,
                        1,
                        Level::Error,
                    ));
                    break;
                }
                if chars[i] == cfg.tuple_close {
                    tokens.push(Token::new(TokenKind::ClosingTuple, cfg.tuple_close.to_string(), i));
                    i += 1;
                    break;
                }
                if chars[i] == cfg.tuple_open {
                    diagnostics.push(Diagnostic::at_token(
                        ErrorKind::NestedTuple,
                        format!("nested tuple at position {i}"),
                        tokens.len() - 1,
                        1,
                        Level::Error,
                    ));
                    i += 1;
                    continue;
                }
                let word_start = i;
                let (text, new_i, quote_open) = scan_word(&chars, i);
                if let Some(open) = quote_open {
                    diagnostics.push(Diagnostic::at_token(
                        ErrorKind::UnterminatedQuote,
                        format!("unterminated quote opened at position {open}"),
                        tokens.len(),
                        (new_i - word_start).max(1),
                        Level::Error,
                    ));
                }
                tokens.push(Token::new(TokenKind::ArgumentValueTupled, text, word_start));
                i = new_i;
            }
            continue;
        }

        let word_start = i;
        let (text, new_i, quote_open) = scan_word(&chars, i);
        i = new_i;
        if let Some(open) = quote_open {
            diagnostics.push(Diagnostic::at_token(
                ErrorKind::UnterminatedQuote,
                format!("unterminated quote opened at position {open}"),
                tokens.len(),
                (new_i - word_start).max(1),
                Level::Error,
            ));
        }

        if !text.starts_with(cfg.prefix) && cfg.sub_command_names.contains(&text) {
            tokens.push(Token::new(TokenKind::SubCommand, text.clone(), word_start));
            let remainder_start = byte_offsets.get(i).copied().unwrap_or(input.len());
            sub_command = Some(SubCommandBoundary { name: text, remainder_start });
            break;
        }

        let kind = classify(&text, cfg);
        tokens.push(Token::new(kind, text, word_start));
    }

    TokenizeResult { tokens, diagnostics, sub_command }
}

fn classify(text: &str, cfg: &TokenizeConfig<'_>) -> TokenKind {
    if text.len() < 2 || !text.starts_with(cfg.prefix) {
        return TokenKind::ArgumentValue;
    }

    let double_prefix: String = std::iter::repeat(cfg.prefix).take(2).collect();
    let remainder_double = text.strip_prefix(&double_prefix);
    let remainder_single = text.strip_prefix(cfg.prefix);

    if let Some(rest) = remainder_double {
        if !rest.is_empty() && cfg.argument_names.contains(rest) {
            return TokenKind::ArgumentName;
        }
    }
    if let Some(rest) = remainder_single {
        if !rest.is_empty() && cfg.argument_names.contains(rest) {
            return TokenKind::ArgumentName;
        }
        if !rest.is_empty() && rest.chars().all(|c| cfg.short_names.contains(&c)) {
            return TokenKind::ArgumentNameList;
        }
    }
    TokenKind::ArgumentValue
}

/// Scans one whitespace-delimited word starting at `chars[start]`,
/// resolving quoting and backslash escapes. Returns the resolved text,
/// the index just past the word, and `Some(open_position)` if a quote was
/// opened but never closed (recovered by treating the rest of the input
/// as inside the quote).
fn scan_word(chars: &[char], start: usize) -> (String, usize, Option<usize>) {
    let mut i = start;
    let mut text = String::new();
    let mut quote: Option<(char, usize)> = None;

    while i < chars.len() {
        let c = chars[i];
        if let Some((q, _)) = quote {
            if c == '\\' && i + 1 < chars.len() {
                let next = chars[i + 1];
                if next == q {
                    text.push(q);
                } else {
                    text.push('\\');
                    text.push(next);
                }
                i += 2;
                continue;
            }
            if c == q {
                quote = None;
                i += 1;
                continue;
            }
            text.push(c);
            i += 1;
            continue;
        }

        if c == '"' || c == '\'' {
            quote = Some((c, i));
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            break;
        }
        if c == '\\' {
            if i + 1 < chars.len() {
                text.push(chars[i + 1]);
                i += 2;
            } else {
                text.push('\\');
                i += 1;
            }
            continue;
        }
        text.push(c);
        i += 1;
    }

    let open = quote.map(|(_, pos)| pos);
    (text, i, open)
}
