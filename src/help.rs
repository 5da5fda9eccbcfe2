// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Help-text rendering is out of scope as a full renderer (no wrapping,
//! no ANSI color), but the projection types and the formatter seam are
//! first-class: an embedding application supplies its own
//! [`HelpFormatter`] the same way it supplies argument types.
//!
//! Projection field naming and the indent/wrap helper follow
//! `argh_shared/src/help.rs`'s `write_description`; the `CommandInfo`-style
//! nesting follows `argh/src/help.rs`'s `HelpInfo`.

/// A read-only snapshot of one [`crate::Argument`], built fresh each time
/// help is rendered so it reflects post-parse `usage_count` (spec §9:
/// "help rendering from post-parse state").
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArgumentRepr {
    /// Canonical and alias names, canonical first.
    pub names: Vec<String>,
    /// The prefix character expected before a name.
    pub prefix: char,
    /// Short human-readable description.
    pub description: String,
    /// Whether the argument must be used at least once.
    pub required: bool,
    /// Whether the argument is filled positionally.
    pub positional: bool,
    /// A short name for the argument's value type (e.g. `"number"`).
    pub type_name: &'static str,
    /// Index into the rendering palette, assigned round-robin via
    /// [`LoopPool`] in declaration order.
    pub color_index: usize,
    /// How many times the argument was used in the most recent parse.
    pub usage_count: usize,
}

/// A read-only snapshot of one [`crate::ArgumentGroup`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArgumentGroupRepr {
    /// The group's name.
    pub name: String,
    /// The group's description.
    pub description: String,
    /// Whether at most one argument in the group's closure may be used.
    pub exclusive: bool,
    /// The arguments directly in this group.
    pub arguments: Vec<ArgumentRepr>,
    /// Nested sub-groups.
    pub sub_groups: Vec<ArgumentGroupRepr>,
}

/// A read-only snapshot of one [`crate::Command`], recursively including
/// its sub-commands.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandRepr {
    /// The command's name.
    pub name: String,
    /// The command's description.
    pub description: String,
    /// Arguments declared directly on this command.
    pub arguments: Vec<ArgumentRepr>,
    /// Groups declared directly on this command.
    pub groups: Vec<ArgumentGroupRepr>,
    /// Sub-commands, in declaration order.
    pub sub_commands: Vec<CommandRepr>,
}

/// The seam through which help text is rendered from a [`CommandRepr`].
///
/// Boxed trait objects are carried down a [`crate::Command`] tree via
/// [`crate::modify_record::ModifyRecord`] inheritance, so the trait must
/// support a deep copy; `Clone` itself isn't object-safe, hence the
/// explicit `clone_box` (the same shape `argh_derive`'s generated code
/// would need if it had to carry a trait object across derive expansion
/// boundaries, but written by hand here since there is no derive macro).
pub trait HelpFormatter {
    /// Renders one command's help text, recursively available to its
    /// sub-commands via `repr.sub_commands`.
    fn render(&self, repr: &CommandRepr) -> String;

    /// Deep-copies this formatter so a child command can inherit it
    /// independently of its parent.
    fn clone_box(&self) -> Box<dyn HelpFormatter>;
}

/// A cyclic iterator over a fixed set of items, used to round-robin
/// assign [`ArgumentRepr::color_index`] as arguments are declared.
///
/// Ported in spirit from `argh_shared`'s wrapping helpers, reduced to the
/// documented contract: `next()` always advances, wrapping back to the
/// start, and never returns `None` for a non-empty pool. The "start
/// before the first element" state is represented with `next_index:
/// Option<usize>` (`None` until the first call) rather than a `-1`
/// sentinel, since there is no negative `usize`.
pub struct LoopPool {
    len: usize,
    next_index: Option<usize>,
}

impl LoopPool {
    /// Creates a pool cycling over `len` indices. `len == 0` is allowed;
    /// `next()` then always returns `None`.
    pub fn new(len: usize) -> Self {
        Self { len, next_index: None }
    }

    /// Advances and returns the next index, wrapping around.
    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let index = match self.next_index {
            None => 0,
            Some(i) => (i + 1) % self.len,
        };
        self.next_index = Some(index);
        Some(index)
    }
}

/// A minimal default [`HelpFormatter`]: plain indented text, no wrapping,
/// no color. Sufficient to exercise the contract and drive tests; real
/// applications are expected to supply their own.
#[derive(Debug, Clone, Default)]
pub struct PlainHelpFormatter;

const INDENT: &str = "  ";

impl HelpFormatter for PlainHelpFormatter {
    fn render(&self, repr: &CommandRepr) -> String {
        let mut out = String::new();
        render_command(repr, 0, &mut out);
        out
    }

    fn clone_box(&self) -> Box<dyn HelpFormatter> {
        Box::new(self.clone())
    }
}

fn render_command(repr: &CommandRepr, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push_str(&repr.name);
    if !repr.description.is_empty() {
        out.push_str(": ");
        out.push_str(&repr.description);
    }
    out.push('\n');
    for argument in &repr.arguments {
        out.push_str(&pad);
        out.push_str(INDENT);
        out.push_str(&argument.names.join(", "));
        if argument.required {
            out.push_str(" (required)");
        }
        if !argument.description.is_empty() {
            out.push_str(" - ");
            out.push_str(&argument.description);
        }
        out.push('\n');
    }
    for sub in &repr.sub_commands {
        render_command(sub, depth + 1, out);
    }
}
