// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A single named, typed slot that may receive zero or more input tokens.

use std::any::Any;
use std::fmt;

use crate::arg_type::ArgumentType;
use crate::diagnostic::{Diagnostic, Level};

/// Opaque identifier for an [`Argument`] within the [`crate::Command`] that
/// owns it. Stable for the lifetime of the owning command (arena-style
/// indexing, see DESIGN NOTES in `SPEC_FULL.md` §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgumentId(pub(crate) usize);

/// A named, typed argument slot.
///
/// Binds a non-empty set of names (the first is canonical) and a prefix
/// character to an [`ArgumentType`], tracking how many times it has been
/// used in the current parse.
pub struct Argument {
    pub(crate) id: ArgumentId,
    names: Vec<String>,
    prefix: char,
    ty: Box<dyn ArgumentType>,
    required: bool,
    positional: bool,
    allow_unique: bool,
    max_usage: Option<usize>,
    pub(crate) usage_count: usize,
    description: String,
    on_ok: Option<Box<dyn FnMut(&dyn Any)>>,
    on_err: Option<Box<dyn FnMut(&[Diagnostic])>>,
    pub(crate) color_index: usize,
    /// Diagnostics raised while parsing this argument's value(s) during the
    /// current parse, kept alongside (not instead of) the flat list
    /// [`crate::parser::parse`] accumulates, so [`crate::Command::invoke_callbacks`]
    /// can hand each argument's own diagnostics to its `on_err` callback.
    last_diagnostics: Vec<Diagnostic>,
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("id", &self.id)
            .field("names", &self.names)
            .field("prefix", &self.prefix)
            .field("required", &self.required)
            .field("positional", &self.positional)
            .field("allow_unique", &self.allow_unique)
            .field("usage_count", &self.usage_count)
            .finish()
    }
}

impl Argument {
    /// Begins building an argument with the given canonical (first) name
    /// and argument type. Additional names can be added with
    /// [`ArgumentBuilder::alias`].
    pub fn builder(name: impl Into<String>, ty: impl ArgumentType + 'static) -> ArgumentBuilder {
        ArgumentBuilder::new(name.into(), Box::new(ty))
    }

    /// The argument's names, canonical name first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The argument's canonical (first) name.
    pub fn canonical_name(&self) -> &str {
        &self.names[0]
    }

    /// The prefix character expected before a name (default `'-'`).
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// Whether this argument must be used at least once.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether this argument is filled positionally rather than by name.
    pub fn positional(&self) -> bool {
        self.positional
    }

    /// Whether this argument is exempt from "combined with other
    /// arguments" checks when used alone (spec §4.3:
    /// `UniqueCombinedWithOthers`).
    pub fn allow_unique(&self) -> bool {
        self.allow_unique
    }

    /// The maximum number of times this argument may be used, if bounded.
    pub fn max_usage(&self) -> Option<usize> {
        self.max_usage
    }

    /// How many times this argument has been used in the current parse.
    pub fn usage_count(&self) -> usize {
        self.usage_count
    }

    /// A short human-readable description, used by help rendering.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// This argument's identifier within its owning command.
    pub fn id(&self) -> ArgumentId {
        self.id
    }

    /// Diagnostics raised while parsing this argument's value(s) in the
    /// most recent parse.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.last_diagnostics
    }

    /// Whether any diagnostic raised for this argument in the most recent
    /// parse was `Error`-level.
    pub fn has_exit_level_diagnostics(&self) -> bool {
        self.last_diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub(crate) fn ty_mut(&mut self) -> &mut dyn ArgumentType {
        self.ty.as_mut()
    }

    pub(crate) fn ty(&self) -> &dyn ArgumentType {
        self.ty.as_ref()
    }

    pub(crate) fn record_usage(&mut self) {
        self.usage_count += 1;
    }

    pub(crate) fn record_diagnostics(&mut self, diagnostics: &[Diagnostic]) {
        self.last_diagnostics.extend(diagnostics.iter().cloned());
    }

    pub(crate) fn reset(&mut self) {
        self.usage_count = 0;
        self.last_diagnostics.clear();
        self.ty.reset_state();
    }

    pub(crate) fn run_on_ok(&mut self, value: &dyn Any) {
        if let Some(cb) = &mut self.on_ok {
            cb(value);
        }
    }

    pub(crate) fn run_on_err(&mut self, diagnostics: &[Diagnostic]) {
        if let Some(cb) = &mut self.on_err {
            cb(diagnostics);
        }
    }
}

/// Builder for [`Argument`].
pub struct ArgumentBuilder {
    names: Vec<String>,
    prefix: char,
    ty: Box<dyn ArgumentType>,
    required: bool,
    positional: bool,
    allow_unique: bool,
    max_usage: Option<usize>,
    description: String,
    on_ok: Option<Box<dyn FnMut(&dyn Any)>>,
    on_err: Option<Box<dyn FnMut(&[Diagnostic])>>,
}

impl ArgumentBuilder {
    fn new(name: String, ty: Box<dyn ArgumentType>) -> Self {
        Self {
            names: vec![name],
            prefix: '-',
            ty,
            required: false,
            positional: false,
            allow_unique: false,
            max_usage: None,
            description: String::new(),
            on_ok: None,
            on_err: None,
        }
    }

    /// Adds another name this argument can be addressed by.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// The names this argument would be built with, canonical name first.
    /// Used by [`crate::Command::add_argument`] to check for collisions
    /// before consuming the builder.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Sets the prefix character expected before a name.
    pub fn prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    /// Marks the argument as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Marks the argument as positional (filled in declaration order
    /// rather than by name; may not also carry flag names per spec §3).
    pub fn positional(mut self, positional: bool) -> Self {
        self.positional = positional;
        self
    }

    /// Marks the argument as exempt from `UniqueCombinedWithOthers`
    /// companionship checks, and requires that its type accept zero
    /// tokens.
    pub fn allow_unique(mut self, allow_unique: bool) -> Self {
        self.allow_unique = allow_unique;
        self
    }

    /// Sets the maximum number of times this argument may be used.
    pub fn max_usage(mut self, max_usage: usize) -> Self {
        self.max_usage = Some(max_usage);
        self
    }

    /// Sets the description shown in help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets a callback run when the argument received a value
    /// successfully.
    pub fn on_ok(mut self, f: impl FnMut(&dyn Any) + 'static) -> Self {
        self.on_ok = Some(Box::new(f));
        self
    }

    /// Sets a callback run when the argument accumulated exit-level
    /// diagnostics.
    pub fn on_err(mut self, f: impl FnMut(&[Diagnostic]) + 'static) -> Self {
        self.on_err = Some(Box::new(f));
        self
    }

    pub(crate) fn build(self, id: ArgumentId, color_index: usize) -> Argument {
        Argument {
            id,
            names: self.names,
            prefix: self.prefix,
            ty: self.ty,
            required: self.required,
            positional: self.positional,
            allow_unique: self.allow_unique,
            max_usage: self.max_usage,
            usage_count: 0,
            description: self.description,
            on_ok: self.on_ok,
            on_err: self.on_err,
            color_index,
            last_diagnostics: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BooleanFlag;

    #[test]
    fn builder_defaults() {
        let arg = Argument::builder("jump", BooleanFlag::new()).build(ArgumentId(0), 0);
        assert_eq!(arg.canonical_name(), "jump");
        assert_eq!(arg.prefix(), '-');
        assert!(!arg.required());
        assert!(!arg.positional());
        assert_eq!(arg.usage_count(), 0);
    }

    #[test]
    fn alias_adds_additional_names() {
        let arg = Argument::builder("jump", BooleanFlag::new()).alias("j").build(ArgumentId(0), 0);
        assert_eq!(arg.names(), &["jump".to_string(), "j".to_string()]);
    }

    #[test]
    fn record_usage_increments_count() {
        let mut arg = Argument::builder("jump", BooleanFlag::new()).build(ArgumentId(0), 0);
        arg.record_usage();
        arg.record_usage();
        assert_eq!(arg.usage_count(), 2);
    }

    #[test]
    fn reset_clears_usage_count() {
        let mut arg = Argument::builder("jump", BooleanFlag::new()).build(ArgumentId(0), 0);
        arg.record_usage();
        arg.reset();
        assert_eq!(arg.usage_count(), 0);
    }
}
