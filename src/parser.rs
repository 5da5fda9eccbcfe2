// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Single-pass resolution of one command's own token slice into values
//! (spec §4.3). Recursion into sub-commands is not this module's concern
//! — [`crate::command::Command`] owns that, calling [`parse`] once per
//! command in the tree.

use std::collections::{HashMap, VecDeque};

use crate::arg_type::consume;
use crate::argument::{Argument, ArgumentId};
use crate::diagnostic::{Diagnostic, ErrorKind, Level};
use crate::group::ArgumentGroup;
use crate::parsed::ParsedArguments;
use crate::token::{Token, TokenKind};

/// The result of resolving one command's tokens: the values produced,
/// the remainder captured by a `--` forward marker (if any), and every
/// diagnostic raised along the way.
pub struct ParseOutcome {
    /// The resolved values, keyed by name and by id.
    pub parsed: ParsedArguments,
    /// The verbatim text following a `--` marker, if the token stream
    /// ended with one.
    pub forward: Option<String>,
    /// Diagnostics raised while resolving names, positionals, and
    /// post-pass checks (missing required, exclusive groups, ...).
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves `tokens` against `arguments`/`groups`, mirroring `argh`'s
/// `parse_struct_args` loop (`argh/src/lib.rs`): a cursor walks the token
/// slice once, dispatching by token kind, and a fixed set of post-pass
/// checks runs once consumption is done.
pub fn parse(command_name: &str, tokens: &[Token], arguments: &mut [Argument], groups: &[ArgumentGroup], prefix: char) -> ParseOutcome {
    let name_to_id = build_name_table(arguments);
    let short_to_id = build_short_table(arguments);
    let mut positional_queue: VecDeque<ArgumentId> =
        arguments.iter().filter(|a| a.positional()).map(|a| a.id()).collect();

    let mut diagnostics = Vec::new();
    let mut forward = None;
    let mut cursor = 0;

    while cursor < tokens.len() {
        match tokens[cursor].kind {
            TokenKind::ArgumentName => {
                let bare = bare_name(&tokens[cursor].text, prefix);
                if let Some(&id) = name_to_id.get(bare) {
                    let tail = &tokens[cursor + 1..];
                    let arity = arguments[id.0].ty().arity();
                    let outcome = consume(arity, tail);
                    diagnostics.extend(outcome.diagnostics);
                    apply(&mut arguments[id.0], &tail[..outcome.take], &mut diagnostics);
                    cursor += 1 + outcome.take;
                } else {
                    diagnostics.push(unrecognized(&tokens[cursor], cursor));
                    cursor += 1;
                }
            }
            TokenKind::ArgumentNameList => {
                let bare = bare_name(&tokens[cursor].text, prefix);
                let mut any_unrecognized = false;
                for ch in bare.chars() {
                    if let Some(&id) = short_to_id.get(&ch) {
                        apply(&mut arguments[id.0], &[], &mut diagnostics);
                    } else {
                        any_unrecognized = true;
                    }
                }
                if any_unrecognized {
                    diagnostics.push(unrecognized(&tokens[cursor], cursor));
                }
                cursor += 1;
            }
            TokenKind::ArgumentValue | TokenKind::OpeningTuple => {
                if let Some(id) = positional_queue.pop_front() {
                    let tail = &tokens[cursor..];
                    let arity = arguments[id.0].ty().arity();
                    let outcome = consume(arity, tail);
                    diagnostics.extend(outcome.diagnostics);
                    apply(&mut arguments[id.0], &tail[..outcome.take], &mut diagnostics);
                    cursor += outcome.take.max(1);
                } else {
                    diagnostics.push(Diagnostic::at_token(
                        ErrorKind::UnexpectedValue,
                        format!("unexpected value: {}", tokens[cursor].text),
                        cursor,
                        tokens[cursor].span_len(),
                        Level::Error,
                    ));
                    cursor += 1;
                }
            }
            TokenKind::ArgumentValueTupled | TokenKind::ClosingTuple => {
                // Only reachable if a tuple span was left dangling by a
                // malformed schema (the owning name/positional branch
                // above always swallows a whole tuple span via `consume`).
                cursor += 1;
            }
            TokenKind::Forward => {
                forward = Some(tokens[cursor].text.clone());
                cursor = tokens.len();
            }
            TokenKind::SubCommand => {
                cursor = tokens.len();
            }
        }
    }

    diagnostics.extend(post_pass(arguments, groups));

    let parsed = collect(command_name, arguments);
    ParseOutcome { parsed, forward, diagnostics }
}

fn apply(argument: &mut Argument, consumed: &[Token], diagnostics: &mut Vec<Diagnostic>) {
    let errs = argument.ty_mut().parse_values(consumed);
    argument.record_usage();
    argument.record_diagnostics(&errs);
    diagnostics.extend(errs);
}

fn build_name_table(arguments: &[Argument]) -> HashMap<&str, ArgumentId> {
    let mut table = HashMap::new();
    for argument in arguments {
        for name in argument.names() {
            table.insert(name.as_str(), argument.id());
        }
    }
    table
}

fn build_short_table(arguments: &[Argument]) -> HashMap<char, ArgumentId> {
    let mut table = HashMap::new();
    for argument in arguments {
        for name in argument.names() {
            let mut chars = name.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                table.insert(c, argument.id());
            }
        }
    }
    table
}

fn bare_name(text: &str, prefix: char) -> &str {
    let double: String = std::iter::repeat(prefix).take(2).collect();
    text.strip_prefix(&double).or_else(|| text.strip_prefix(prefix)).unwrap_or(text)
}

fn unrecognized(token: &Token, index: usize) -> Diagnostic {
    Diagnostic::at_token(
        ErrorKind::Custom(format!("unrecognized argument: {}", token.text)),
        format!("unrecognized argument: {}", token.text),
        index,
        token.span_len(),
        Level::Error,
    )
}

fn post_pass(arguments: &mut [Argument], groups: &[ArgumentGroup]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    // `RequiredNotPresent`/`TooManyOccurrences` are raised here rather than
    // in `apply` (they depend on the *final* usage count, not a single
    // occurrence), but they are still specific to one argument: record them
    // onto that argument too, not just the flat command-level list, so
    // `Command::invoke_callbacks`'s per-argument `on_err` sees them (spec
    // §4.1: "error callback when the argument accumulated exit-level
    // diagnostics").
    for argument in arguments.iter_mut() {
        if argument.required() && argument.usage_count() == 0 {
            let diagnostic = Diagnostic::whole_command(
                ErrorKind::RequiredNotPresent,
                format!("required argument not present: {}", argument.canonical_name()),
                Level::Error,
            );
            argument.record_diagnostics(std::slice::from_ref(&diagnostic));
            diagnostics.push(diagnostic);
        }
        if let Some(max) = argument.max_usage() {
            if argument.usage_count() > max {
                let diagnostic = Diagnostic::whole_command(
                    ErrorKind::TooManyOccurrences,
                    format!(
                        "argument {} used {} time(s), at most {} allowed",
                        argument.canonical_name(),
                        argument.usage_count(),
                        max
                    ),
                    Level::Error,
                );
                argument.record_diagnostics(std::slice::from_ref(&diagnostic));
                diagnostics.push(diagnostic);
            }
        }
    }

    // The built-in `help` flag doesn't count as "another argument" for the
    // purposes of this check (spec: "other *non-help* arguments").
    let used_count = arguments.iter().filter(|a| a.usage_count() > 0 && a.canonical_name() != "help").count();
    for argument in arguments.iter() {
        if argument.allow_unique() && argument.usage_count() > 0 && used_count > 1 {
            diagnostics.push(Diagnostic::whole_command(
                ErrorKind::UniqueCombinedWithOthers,
                format!("{} must be used alone", argument.canonical_name()),
                Level::Error,
            ));
        }
    }

    for group in groups {
        if !group.exclusive {
            continue;
        }
        let used = group_closure(group, groups)
            .into_iter()
            .filter(|id| arguments[id.0].usage_count() > 0)
            .count();
        if used > 1 {
            diagnostics.push(Diagnostic::whole_command(
                ErrorKind::MultipleInExclusive,
                format!("more than one argument used in exclusive group {}", group.name),
                Level::Error,
            ));
        }
    }

    diagnostics
}

fn group_closure(group: &ArgumentGroup, groups: &[ArgumentGroup]) -> Vec<ArgumentId> {
    let mut out = group.arguments().to_vec();
    for &sub_id in group.sub_groups() {
        if let Some(sub) = groups.iter().find(|g| g.id() == sub_id) {
            out.extend(group_closure(sub, groups));
        }
    }
    out
}

fn collect(command_name: &str, arguments: &mut [Argument]) -> ParsedArguments {
    let mut parsed = ParsedArguments::new(command_name);
    for argument in arguments {
        if let Some(value) = argument.ty_mut().take_value() {
            parsed.insert(argument.id(), argument.names(), value);
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Argument;
    use crate::kernel::{BooleanFlag, IntegerValue, StringValue};

    fn name_token(text: &str, pos: usize) -> Token {
        Token::new(TokenKind::ArgumentName, text, pos)
    }
    fn value_token(text: &str, pos: usize) -> Token {
        Token::new(TokenKind::ArgumentValue, text, pos)
    }

    fn build(mut args: Vec<crate::argument::ArgumentBuilder>) -> Vec<Argument> {
        args.drain(..)
            .enumerate()
            .map(|(i, b)| b.build(ArgumentId(i), i))
            .collect()
    }

    #[test]
    fn resolves_named_value() {
        let mut args = build(vec![Argument::builder("height", IntegerValue::<i64>::new())]);
        let tokens = vec![name_token("--height", 0), value_token("5", 9)];
        let groups = Vec::new();
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(*outcome.parsed.get::<i64>("height").unwrap(), 5);
    }

    #[test]
    fn missing_required_argument_is_reported() {
        let mut args = build(vec![Argument::builder("height", IntegerValue::<i64>::new()).required(true)]);
        let tokens: Vec<Token> = vec![];
        let groups = Vec::new();
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert!(outcome.diagnostics.iter().any(|d| d.kind == ErrorKind::RequiredNotPresent));
    }

    #[test]
    fn clustered_flags_set_each_argument() {
        let mut args = build(vec![
            Argument::builder("a", BooleanFlag::new()),
            Argument::builder("b", BooleanFlag::new()),
        ]);
        let tokens = vec![Token::new(TokenKind::ArgumentNameList, "-ab", 0)];
        let groups = Vec::new();
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert!(outcome.diagnostics.is_empty());
        assert!(*outcome.parsed.get::<bool>("a").unwrap());
        assert!(*outcome.parsed.get::<bool>("b").unwrap());
    }

    #[test]
    fn positional_values_fill_in_declaration_order() {
        let mut args = build(vec![
            Argument::builder("first", StringValue::new()).positional(true),
            Argument::builder("second", StringValue::new()).positional(true),
        ]);
        let tokens = vec![value_token("one", 0), value_token("two", 4)];
        let groups = Vec::new();
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert_eq!(outcome.parsed.get::<String>("first").unwrap(), "one");
        assert_eq!(outcome.parsed.get::<String>("second").unwrap(), "two");
    }

    #[test]
    fn excess_value_with_no_positional_left_is_unexpected() {
        let mut args: Vec<Argument> = build(vec![]);
        let tokens = vec![value_token("stray", 0)];
        let groups = Vec::new();
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert!(outcome.diagnostics.iter().any(|d| d.kind == ErrorKind::UnexpectedValue));
    }

    #[test]
    fn too_many_occurrences_is_reported() {
        let mut args = build(vec![Argument::builder("v", crate::kernel::Counter::new()).max_usage(1)]);
        let tokens = vec![name_token("--v", 0), name_token("--v", 4)];
        let groups = Vec::new();
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert!(outcome.diagnostics.iter().any(|d| d.kind == ErrorKind::TooManyOccurrences));
    }

    #[test]
    fn exclusive_group_rejects_more_than_one_used_argument() {
        let mut args = build(vec![
            Argument::builder("x", BooleanFlag::new()),
            Argument::builder("y", BooleanFlag::new()),
        ]);
        let group = ArgumentGroup::new("mode", true).with_argument(ArgumentId(0)).with_argument(ArgumentId(1));
        let tokens = vec![name_token("--x", 0), name_token("--y", 4)];
        let groups = vec![group];
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert!(outcome.diagnostics.iter().any(|d| d.kind == ErrorKind::MultipleInExclusive));
    }

    #[test]
    fn allow_unique_rejects_combination_with_others() {
        let mut args = build(vec![
            Argument::builder("solo", BooleanFlag::new()).allow_unique(true),
            Argument::builder("other", BooleanFlag::new()),
        ]);
        let tokens = vec![name_token("--solo", 0), name_token("--other", 7)];
        let groups = Vec::new();
        let outcome = parse("root", &tokens, &mut args, &groups, '-');
        assert!(outcome.diagnostics.iter().any(|d| d.kind == ErrorKind::UniqueCombinedWithOthers));
    }
}
