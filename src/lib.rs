// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A declarative, tree-shaped command-line argument parser, built around a
//! schema you assemble at runtime rather than a struct you derive from.
//!
//! The shape is a [`Command`]: a node owning a set of named, typed
//! [`Argument`]s, optionally grouped into [`ArgumentGroup`]s, with zero or
//! more nested sub-[`Command`]s. Parsing one line of input runs in three
//! strict phases:
//!
//! 1. **Inherit** — configuration (tuple bracket characters, error-code
//!    bit, display/exit severity thresholds, help formatter) not
//!    explicitly overridden on a sub-command is copied down from its
//!    parent.
//! 2. **Tokenize** — the input is scanned once into a flat [`Token`]
//!    sequence per command, recursing into at most one matched
//!    sub-command.
//! 3. **Parse** — each tokenized command's tokens are resolved against its
//!    own arguments and groups into a [`ParsedArguments`] tree.
//!
//! ## Basic Example
//!
//! ```rust
//! use argtree::{Argument, Command};
//! use argtree::kernel::{BooleanFlag, IntegerValue};
//!
//! let mut up = Command::root("goup").unwrap();
//! up.set_description("Reach new heights.");
//! up.add_argument(Argument::builder("jump", BooleanFlag::new()).alias("j").description("whether or not to jump")).unwrap();
//! up.add_argument(Argument::builder("height", IntegerValue::<i64>::new()).required(true).description("how high to go")).unwrap();
//!
//! let parsed = up.parse("--jump --height 5");
//! assert!(!up.has_exit_errors());
//! assert!(*parsed.get::<bool>("jump").unwrap());
//! assert_eq!(*parsed.get::<i64>("height").unwrap(), 5);
//! ```
//!
//! Diagnostics never unwind the stack: a malformed input produces
//! [`Diagnostic`]s accumulated on the offending [`Command`], gated against
//! independently configurable display and exit severity thresholds. Only
//! schema *construction* mistakes (duplicate names, a non-alphabetic
//! command name, a root added as someone else's sub-command) are reported
//! as a [`SchemaError`] `Result`, since those are programmer errors rather
//! than user input.
//!
//! ## Argument types
//!
//! [`ArgumentType`] is the seam through which a value is converted from
//! tokens. The [`kernel`] module ships a small set of concrete
//! implementations (string, integer, file, boolean flag, counter,
//! key-value, tuple) plus [`kernel::Opaque`], an escape hatch for
//! application-defined conversions that don't warrant their own type.
//!
//! ## Non-goals
//!
//! This crate does not render wrapped, colorized help text, does not read
//! `argv`/environment variables on your behalf (see [`Command::parse_argv`]
//! for the one small convenience offered), and does not generate shell
//! completion scripts. [`HelpFormatter`] is a seam, not a renderer;
//! embedding applications are expected to supply their own.

#![deny(missing_docs)]

mod arg_type;
mod argument;
mod command;
mod diagnostic;
mod group;
mod help;
pub mod kernel;
mod modify_record;
mod parsed;
mod parser;
mod schema_error;
mod token;
mod tokenizer;

pub use arg_type::{Arity, ArgumentType};
pub use argument::{Argument, ArgumentBuilder, ArgumentId};
pub use command::Command;
pub use diagnostic::{Diagnostic, ErrorContainer, ErrorKind, Leveled, Level};
pub use group::{ArgumentGroup, GroupId};
pub use help::{ArgumentGroupRepr, ArgumentRepr, CommandRepr, HelpFormatter, LoopPool, PlainHelpFormatter};
pub use modify_record::ModifyRecord;
pub use parsed::ParsedArguments;
pub use schema_error::SchemaError;
pub use token::{Token, TokenKind};
