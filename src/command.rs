// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The schema root: owns arguments, groups, and sub-commands, and
//! orchestrates the inherit → tokenize → parse pipeline (spec §4.1).

use std::collections::HashSet;
use std::io::{self, Write};

use crate::argument::{Argument, ArgumentBuilder, ArgumentId};
use crate::diagnostic::{ErrorContainer, Level};
use crate::group::{ArgumentGroup, GroupId};
use crate::help::{ArgumentGroupRepr, ArgumentRepr, CommandRepr, HelpFormatter, LoopPool, PlainHelpFormatter};
use crate::kernel::BooleanFlag;
use crate::modify_record::ModifyRecord;
use crate::parsed::ParsedArguments;
use crate::parser;
use crate::schema_error::SchemaError;
use crate::token::Token;
use crate::tokenizer::{tokenize, TokenizeConfig};

/// Number of slots in the color palette [`LoopPool`] rotates through when
/// assigning [`ArgumentRepr::color_index`]. The actual palette (what each
/// index paints) is an external collaborator (spec §1: "ANSI text
/// formatting" is out of scope); only the rotation is ours to provide.
const COLOR_PALETTE_SIZE: usize = 8;

/// A node in the command tree: its own arguments and groups, plus nested
/// sub-commands. Orchestrates `parse`'s three phases (inherit, tokenize,
/// parse) per spec §4.1.
pub struct Command {
    name: String,
    description: String,
    prefix: char,
    arguments: Vec<Argument>,
    groups: Vec<ArgumentGroup>,
    sub_commands: Vec<Command>,
    color_pool: LoopPool,
    tuple_chars: ModifyRecord<(char, char)>,
    error_code: ModifyRecord<u32>,
    help_formatter: Box<dyn HelpFormatter>,
    help_formatter_set: bool,
    on_correct: Option<Box<dyn FnMut(&ParsedArguments)>>,
    on_error: Option<Box<dyn FnMut(&ErrorContainer)>>,
    errors: ErrorContainer,
    tokens: Vec<Token>,
    tokenized_sub: Option<usize>,
    forward: Option<String>,
    is_root: bool,
}

impl Command {
    /// Creates a sub-command-capable `Command` named `name`.
    ///
    /// `name` must be non-empty and alphabetic (spec §3 `Command`
    /// invariant); violating this is a precondition error, not a
    /// user-input diagnostic (spec §7).
    pub fn new(name: impl Into<String>) -> Result<Self, SchemaError> {
        Self::build(name, false)
    }

    /// Creates the root of a command tree. Only a command built this way
    /// may be parsed directly; only a command built with [`Self::new`] may
    /// be added as someone else's sub-command (spec §3: "the root cannot
    /// be added as a sub-command").
    pub fn root(name: impl Into<String>) -> Result<Self, SchemaError> {
        Self::build(name, true)
    }

    fn build(name: impl Into<String>, is_root: bool) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(char::is_alphabetic) {
            return Err(SchemaError::InvalidName(name));
        }
        let mut command = Self {
            name,
            description: String::new(),
            prefix: '-',
            arguments: Vec::new(),
            groups: Vec::new(),
            sub_commands: Vec::new(),
            color_pool: LoopPool::new(COLOR_PALETTE_SIZE),
            tuple_chars: ModifyRecord::new(('[', ']')),
            error_code: ModifyRecord::new(1),
            help_formatter: Box::new(PlainHelpFormatter),
            help_formatter_set: false,
            on_correct: None,
            on_error: None,
            errors: ErrorContainer::new(),
            tokens: Vec::new(),
            tokenized_sub: None,
            forward: None,
            is_root,
        };
        command
            .add_argument(Argument::builder("help", BooleanFlag::new()).alias("h").description("display usage information"))
            .expect("the built-in help flag cannot collide with an empty argument list");
        Ok(command)
    }

    /// This command's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets this command's description (shown in help text).
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// This command's description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this command was built with [`Self::root`].
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Sets the prefix character expected before an argument name (default
    /// `'-'`), used by the tokenizer to classify words.
    pub fn set_prefix(&mut self, prefix: char) {
        self.prefix = prefix;
    }

    /// The arguments declared directly on this command, in declaration
    /// order (the built-in `help` flag is always first).
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The groups declared directly on this command.
    pub fn groups(&self) -> &[ArgumentGroup] {
        &self.groups
    }

    /// The sub-commands declared directly on this command, in declaration
    /// order.
    pub fn sub_commands(&self) -> &[Command] {
        &self.sub_commands
    }

    /// The verbatim text captured after a `--` forward marker in the most
    /// recent parse, if any.
    pub fn forward(&self) -> Option<&str> {
        self.forward.as_deref()
    }

    /// Declares an argument, consuming `builder`.
    ///
    /// Fails with [`SchemaError::DuplicateIdentifier`] if any of the
    /// builder's names collide (case-sensitive) with an argument already
    /// on this command.
    pub fn add_argument(&mut self, builder: ArgumentBuilder) -> Result<ArgumentId, SchemaError> {
        for name in builder.names() {
            if self.has_argument_name(name) {
                return Err(SchemaError::DuplicateIdentifier(name.clone()));
            }
        }
        let id = ArgumentId(self.arguments.len());
        let color = self.color_pool.next().unwrap_or(0);
        self.arguments.push(builder.build(id, color));
        Ok(id)
    }

    fn has_argument_name(&self, name: &str) -> bool {
        self.arguments.iter().any(|a| a.names().iter().any(|n| n == name))
    }

    /// Declares a new top-level group. To nest it under an existing group,
    /// follow with [`Self::nest_group`].
    pub fn add_group(&mut self, mut group: ArgumentGroup) -> GroupId {
        let id = GroupId(self.groups.len());
        group.id = id;
        self.groups.push(group);
        id
    }

    /// Nests `child` under `parent` (spec §3: `ArgumentGroup` "nests
    /// groups"). Both must already have been added with [`Self::add_group`].
    pub fn nest_group(&mut self, parent: GroupId, child: GroupId) {
        if let Some(group) = self.groups.iter_mut().find(|g| g.id() == parent) {
            group.sub_groups.push(child);
        }
    }

    /// Adds `cmd` as a sub-command.
    ///
    /// Fails with [`SchemaError::InvalidChild`] if `cmd` was built with
    /// [`Self::root`], or [`SchemaError::DuplicateIdentifier`] if a
    /// sibling already carries that name.
    pub fn add_sub_command(&mut self, cmd: Command) -> Result<(), SchemaError> {
        if cmd.is_root {
            return Err(SchemaError::InvalidChild);
        }
        if self.sub_commands.iter().any(|c| c.name == cmd.name) {
            return Err(SchemaError::DuplicateIdentifier(cmd.name));
        }
        self.sub_commands.push(cmd);
        Ok(())
    }

    /// Sets the tuple-span bracket characters (default `('[', ']')`).
    pub fn set_tuple_chars(&mut self, open: char, close: char) {
        self.tuple_chars.set((open, close));
    }

    /// Sets the bit contributed to [`Self::error_code`] when this command
    /// has exit-level errors. Must be greater than zero.
    pub fn set_error_code(&mut self, code: u32) -> Result<(), SchemaError> {
        if code == 0 {
            return Err(SchemaError::InvalidErrorCode);
        }
        self.error_code.set(code);
        Ok(())
    }

    /// Sets the minimum severity level that contributes to
    /// [`Self::has_display_errors`].
    pub fn set_min_display_level(&mut self, level: Level) {
        self.errors.min_display_level_mut().set(level);
    }

    /// Sets the minimum severity level that contributes to
    /// [`Self::has_exit_errors`] (and therefore to [`Self::error_code`]).
    pub fn set_min_exit_level(&mut self, level: Level) {
        self.errors.min_exit_level_mut().set(level);
    }

    /// Replaces the help formatter used by [`Self::help`]. Deep-copied into
    /// every descendant during [`Self::parse`] unless the descendant has
    /// its own override (spec §9: formatter inheritance must deep-copy).
    pub fn set_help_formatter(&mut self, formatter: Box<dyn HelpFormatter>) {
        self.help_formatter = formatter;
        self.help_formatter_set = true;
    }

    /// Sets the callback run by [`Self::invoke_callbacks`] when this
    /// command parsed without exit-level errors.
    pub fn set_on_correct(&mut self, f: impl FnMut(&ParsedArguments) + 'static) {
        self.on_correct = Some(Box::new(f));
    }

    /// Sets the callback run by [`Self::invoke_callbacks`] when this
    /// command accumulated exit-level errors.
    pub fn set_on_error(&mut self, f: impl FnMut(&ErrorContainer) + 'static) {
        self.on_error = Some(Box::new(f));
    }

    /// Renders this command's (and, recursively, its sub-commands')
    /// help text through the configured [`HelpFormatter`].
    pub fn help(&self) -> String {
        self.help_formatter.render(&self.to_repr())
    }

    fn to_repr(&self) -> CommandRepr {
        CommandRepr {
            name: self.name.clone(),
            description: self.description.clone(),
            arguments: self.arguments.iter().map(Self::argument_repr).collect(),
            groups: self.groups.iter().map(|g| self.group_repr(g)).collect(),
            sub_commands: self.sub_commands.iter().map(Command::to_repr).collect(),
        }
    }

    fn argument_repr(argument: &Argument) -> ArgumentRepr {
        ArgumentRepr {
            names: argument.names().to_vec(),
            prefix: argument.prefix(),
            description: argument.description().to_string(),
            required: argument.required(),
            positional: argument.positional(),
            type_name: argument.ty().type_name(),
            color_index: argument.color_index,
            usage_count: argument.usage_count(),
        }
    }

    fn group_repr(&self, group: &ArgumentGroup) -> ArgumentGroupRepr {
        ArgumentGroupRepr {
            name: group.name.clone(),
            description: group.description.clone(),
            exclusive: group.exclusive,
            arguments: group.arguments().iter().filter_map(|id| self.arguments.get(id.0)).map(Self::argument_repr).collect(),
            sub_groups: group
                .sub_groups()
                .iter()
                .filter_map(|gid| self.groups.iter().find(|g| g.id() == *gid))
                .map(|g| self.group_repr(g))
                .collect(),
        }
    }

    /// Runs the three-phase `parse` pipeline (spec §4.1): inherit
    /// configuration down the tree, tokenize the whole input recursively,
    /// then resolve each tokenized command's tokens into values.
    ///
    /// Only meaningful on the root; calling it on a non-root command parses
    /// that command as if it were the root of its own (smaller) tree.
    pub fn parse(&mut self, input: &str) -> ParsedArguments {
        self.reset_state();
        self.propagate_inheritance();
        self.tokenize_tree(input);
        self.parse_tree()
    }

    /// Convenience wrapper over [`Self::parse`] accepting the `argv`-style
    /// sequence-of-strings form named in spec §6, alongside the
    /// joined-string form `parse` itself takes. Arguments containing
    /// whitespace are re-quoted so the tokenizer's grammar (spec §6) can
    /// recover them as single tokens.
    pub fn parse_argv<'a>(&mut self, argv: impl IntoIterator<Item = &'a str>) -> ParsedArguments {
        let joined = argv.into_iter().map(quote_if_needed).collect::<Vec<_>>().join(" ");
        self.parse(&joined)
    }

    fn propagate_inheritance(&mut self) {
        let tuple_chars = self.tuple_chars.clone();
        let error_code = self.error_code.clone();
        let min_display = self.errors.min_display_level().clone();
        let min_exit = self.errors.min_exit_level().clone();
        for child in &mut self.sub_commands {
            child.tuple_chars.set_if_not_modified(&tuple_chars);
            child.error_code.set_if_not_modified(&error_code);
            child.errors.min_display_level_mut().set_if_not_modified(&min_display);
            child.errors.min_exit_level_mut().set_if_not_modified(&min_exit);
            if !child.help_formatter_set {
                child.help_formatter = self.help_formatter.clone_box();
            }
            child.propagate_inheritance();
        }
    }

    fn tokenize_tree(&mut self, input: &str) {
        let argument_names: HashSet<String> =
            self.arguments.iter().flat_map(|a| a.names().iter().cloned()).collect();
        let short_names: HashSet<char> = self
            .arguments
            .iter()
            .flat_map(|a| a.names().iter())
            .filter_map(|n| {
                let mut chars = n.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .collect();
        let sub_command_names: HashSet<String> = self.sub_commands.iter().map(|c| c.name.clone()).collect();
        let (tuple_open, tuple_close) = *self.tuple_chars.get();

        let cfg = TokenizeConfig {
            prefix: self.prefix,
            tuple_open,
            tuple_close,
            argument_names: &argument_names,
            short_names: &short_names,
            sub_command_names: &sub_command_names,
        };
        let result = tokenize(input, &cfg);
        self.errors.extend(result.diagnostics);
        self.tokens = result.tokens;
        self.tokenized_sub = None;

        if let Some(boundary) = result.sub_command {
            if let Some(idx) = self.sub_commands.iter().position(|c| c.name == boundary.name) {
                self.tokenized_sub = Some(idx);
                let remainder = &input[boundary.remainder_start..];
                self.sub_commands[idx].tokenize_tree(remainder);
            }
        }
    }

    fn parse_tree(&mut self) -> ParsedArguments {
        let outcome = parser::parse(&self.name, &self.tokens, &mut self.arguments, &self.groups, self.prefix);
        self.errors.extend(outcome.diagnostics);
        self.forward = outcome.forward;
        let mut parsed = outcome.parsed;

        if let Some(idx) = self.tokenized_sub {
            parsed.sub_results.push(self.sub_commands[idx].parse_tree());
        }
        parsed
    }

    /// The union of this command's own diagnostics (tokenizer, parser,
    /// every argument) together with its tokenized sub-command's, if any
    /// exceeds the display threshold (spec §4.5).
    pub fn has_display_errors(&self) -> bool {
        self.errors.has_display_errors()
            || self.tokenized_sub.map_or(false, |idx| self.sub_commands[idx].has_display_errors())
    }

    /// The same union as [`Self::has_display_errors`], gated against the
    /// exit threshold instead.
    pub fn has_exit_errors(&self) -> bool {
        self.errors.has_exit_errors() || self.tokenized_sub.map_or(false, |idx| self.sub_commands[idx].has_exit_errors())
    }

    /// This command's diagnostics from the most recent parse, filtered to
    /// the display threshold.
    pub fn displayable_diagnostics(&self) -> impl Iterator<Item = &crate::diagnostic::Diagnostic> {
        self.errors.displayable()
    }

    /// Bitwise-OR of this command's own configured error code (if it has
    /// exit-level errors) with the recursively-gathered error codes of its
    /// tokenized sub-command chain (spec §4.1, §8 property 3).
    pub fn error_code(&self) -> u32 {
        let mut code = 0;
        if self.errors.has_exit_errors() {
            code |= *self.error_code.get();
        }
        if let Some(idx) = self.tokenized_sub {
            code |= self.sub_commands[idx].error_code();
        }
        code
    }

    /// Runs `on_correct`/`on_error`, then every argument's `on_ok`/`on_err`,
    /// then recurses into the tokenized sub-command, per spec §4.1.
    pub fn invoke_callbacks(&mut self, parsed: &ParsedArguments) {
        if self.has_exit_errors() {
            if let Some(cb) = &mut self.on_error {
                cb(&self.errors);
            }
        } else if let Some(cb) = &mut self.on_correct {
            cb(parsed);
        }

        for argument in &mut self.arguments {
            if let Some(value) = parsed.get_dyn(argument.id()) {
                argument.run_on_ok(value);
            }
            if argument.has_exit_level_diagnostics() {
                let diagnostics = argument.diagnostics().to_vec();
                argument.run_on_err(&diagnostics);
            }
        }

        if let Some(idx) = self.tokenized_sub {
            if let Some(sub_parsed) = parsed.sub_results.first() {
                self.sub_commands[idx].invoke_callbacks(sub_parsed);
            }
        }
    }

    /// Writes this command's (and recursively, its tokenized sub-command's)
    /// displayable diagnostics to `out` or `err`, chosen per command by
    /// whether it has exit-level errors.
    pub fn render_diagnostics(&self, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<()> {
        let sink: &mut dyn Write = if self.errors.has_exit_errors() { err } else { out };
        for diagnostic in self.errors.displayable() {
            writeln!(sink, "{diagnostic}")?;
        }
        if let Some(idx) = self.tokenized_sub {
            self.sub_commands[idx].render_diagnostics(out, err)?;
        }
        Ok(())
    }

    /// Restores this command (and, recursively, every sub-command) to a
    /// fresh parseable state: clears diagnostics, tokens, the forwarded
    /// remainder, and every argument's usage count and value. Idempotent,
    /// and the only sanctioned way to reuse a tree across parses (spec §5).
    pub fn reset_state(&mut self) {
        self.errors.reset();
        self.tokens.clear();
        self.tokenized_sub = None;
        self.forward = None;
        for argument in &mut self.arguments {
            argument.reset();
        }
        for sub in &mut self.sub_commands {
            sub.reset_state();
        }
    }
}

fn quote_if_needed(s: &str) -> String {
    if s.chars().any(char::is_whitespace) {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::ErrorKind;
    use crate::kernel::{FileValue, IntegerValue};

    fn subcommand_tree() -> Command {
        let mut root = Command::root("cli").unwrap();
        let mut sub = Command::new("subcommand").unwrap();
        sub.add_argument(Argument::builder("what", FileValue::with_exists_check(|_| true))).unwrap();
        sub.add_argument(Argument::builder("hey", IntegerValue::<i64>::new())).unwrap();
        root.add_sub_command(sub).unwrap();
        root
    }

    #[test]
    fn end_to_end_subcommand_scenario() {
        let mut root = subcommand_tree();
        let parsed = root.parse("subcommand --what foo.txt --hey 12");
        assert_eq!(root.error_code(), 0);
        let sub = &parsed.sub_results[0];
        assert_eq!(sub.get::<std::path::PathBuf>("what").unwrap(), std::path::Path::new("foo.txt"));
        assert_eq!(*sub.get::<i64>("hey").unwrap(), 12);
    }

    #[test]
    fn tuple_argument_scenario() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("count", crate::kernel::Tuple::<IntegerValue<i64>>::unbounded())).unwrap();
        let parsed = root.parse("--count [1 2 3]");
        assert!(!root.has_exit_errors());
        let values = parsed.get::<Vec<Box<dyn std::any::Any>>>("count").unwrap();
        let ints: Vec<i64> = values.iter().map(|v| *v.downcast_ref::<i64>().unwrap()).collect();
        assert_eq!(ints, vec![1, 2, 3]);
    }

    #[test]
    fn clustered_short_flags_scenario() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("a", BooleanFlag::new())).unwrap();
        root.add_argument(Argument::builder("b", BooleanFlag::new())).unwrap();
        root.add_argument(Argument::builder("c", BooleanFlag::new())).unwrap();
        let parsed = root.parse("-abc");
        assert!(*parsed.get::<bool>("a").unwrap());
        assert!(*parsed.get::<bool>("b").unwrap());
        assert!(*parsed.get::<bool>("c").unwrap());
    }

    #[test]
    fn numeric_error_contributes_default_error_code() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("num", IntegerValue::<i64>::new())).unwrap();
        root.parse("--num abc");
        assert!(root.has_exit_errors());
        assert_eq!(root.error_code(), 1);
    }

    #[test]
    fn too_many_occurrences_scenario() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("x", crate::kernel::Counter::new()).max_usage(1)).unwrap();
        root.parse("--x --x --x");
        assert!(root.has_exit_errors());
    }

    #[test]
    fn exclusive_group_scenario() {
        let mut root = Command::root("cli").unwrap();
        let a = root.add_argument(Argument::builder("a", BooleanFlag::new())).unwrap();
        let b = root.add_argument(Argument::builder("b", BooleanFlag::new())).unwrap();
        let group = ArgumentGroup::new("mode", true).with_argument(a).with_argument(b);
        root.add_group(group);
        root.parse("--a --b");
        assert!(root.has_exit_errors());
        assert_eq!(root.error_code(), 1);
    }

    #[test]
    fn quoted_path_preserves_spaces() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("path", crate::kernel::StringValue::new())).unwrap();
        let parsed = root.parse(r#"--path "C:\Program Files\app""#);
        assert_eq!(parsed.get::<String>("path").unwrap(), r"C:\Program Files\app");
    }

    #[test]
    fn reset_then_reparse_is_idempotent() {
        let mut root = subcommand_tree();
        let first = root.parse("subcommand --what foo.txt --hey 12");
        let first_code = root.error_code();
        root.reset_state();
        let second = root.parse("subcommand --what foo.txt --hey 12");
        assert_eq!(first.sub_results[0].get::<i64>("hey"), second.sub_results[0].get::<i64>("hey"));
        assert_eq!(first_code, root.error_code());
    }

    #[test]
    fn error_code_is_bitwise_or_of_own_and_child() {
        let mut root = Command::root("cli").unwrap();
        root.set_error_code(2).unwrap();
        root.add_argument(Argument::builder("num", IntegerValue::<i64>::new())).unwrap();
        let mut sub = Command::new("sub").unwrap();
        sub.set_error_code(4).unwrap();
        sub.add_argument(Argument::builder("count", IntegerValue::<i64>::new())).unwrap();
        root.add_sub_command(sub).unwrap();

        root.parse("--num abc sub --count xyz");
        // root itself has its own exit error from `--num abc`, so the
        // sub-command boundary is never reached; exercise the pure
        // bitwise-OR law on a case where both layers independently fail.
        let mut root2 = Command::root("cli").unwrap();
        root2.set_error_code(2).unwrap();
        let mut sub2 = Command::new("sub").unwrap();
        sub2.set_error_code(4).unwrap();
        sub2.add_argument(Argument::builder("count", IntegerValue::<i64>::new()).required(true)).unwrap();
        root2.add_sub_command(sub2).unwrap();
        root2.parse("sub");
        assert_eq!(root2.error_code(), 4);
    }

    #[test]
    fn inheritance_propagates_unmodified_slots_to_children() {
        let mut root = Command::root("cli").unwrap();
        root.set_tuple_chars('(', ')');
        root.set_min_exit_level(Level::Warning);
        let sub = Command::new("sub").unwrap();
        root.add_sub_command(sub).unwrap();
        root.parse("sub");
        let child = &root.sub_commands()[0];
        assert_eq!(*child_tuple_chars(child), ('(', ')'));
    }

    fn child_tuple_chars(cmd: &Command) -> &(char, char) {
        cmd.tuple_chars.get()
    }

    #[test]
    fn duplicate_argument_name_is_rejected() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("x", BooleanFlag::new())).unwrap();
        let err = root.add_argument(Argument::builder("x", BooleanFlag::new())).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateIdentifier("x".to_string()));
    }

    #[test]
    fn duplicate_sub_command_name_is_rejected() {
        let mut root = Command::root("cli").unwrap();
        root.add_sub_command(Command::new("sub").unwrap()).unwrap();
        let err = root.add_sub_command(Command::new("sub").unwrap()).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateIdentifier("sub".to_string()));
    }

    #[test]
    fn root_cannot_be_added_as_sub_command() {
        let mut root = Command::root("cli").unwrap();
        let err = root.add_sub_command(Command::root("nested").unwrap()).unwrap_err();
        assert_eq!(err, SchemaError::InvalidChild);
    }

    #[test]
    fn non_alphabetic_name_is_rejected() {
        let err = Command::new("cli-tool").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName(_)));
    }

    #[test]
    fn zero_error_code_is_rejected() {
        let mut root = Command::root("cli").unwrap();
        assert_eq!(root.set_error_code(0).unwrap_err(), SchemaError::InvalidErrorCode);
    }

    #[test]
    fn unique_argument_combined_with_help_does_not_trigger() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("solo", BooleanFlag::new()).allow_unique(true)).unwrap();
        root.parse("--solo --help");
        assert!(!root.has_exit_errors());
    }

    #[test]
    fn unique_argument_combined_with_other_argument_triggers() {
        let mut root = Command::root("cli").unwrap();
        root.add_argument(Argument::builder("solo", BooleanFlag::new()).allow_unique(true)).unwrap();
        root.add_argument(Argument::builder("other", BooleanFlag::new())).unwrap();
        root.parse("--solo --other");
        assert!(root.has_exit_errors());
        let has_unique_conflict =
            root.displayable_diagnostics().any(|d| d.kind == ErrorKind::UniqueCombinedWithOthers);
        assert!(has_unique_conflict);
    }
}
