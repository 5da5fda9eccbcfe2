// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The immutable result tree produced by [`crate::Command::parse`].

use std::any::Any;
use std::collections::HashMap;

use crate::argument::ArgumentId;

/// One command's resolved argument values, plus the results of whichever
/// sub-command was tokenized (if any).
///
/// Values are stored type-erased (see [`crate::arg_type::ArgumentType`])
/// and recovered with [`Self::get`]/[`Self::get_by_id`], the idiomatic
/// non-derive-macro analogue of `argh`'s compile-time-typed struct
/// fields: there is no generated struct to hang fields off of, so callers
/// downcast by name instead.
#[derive(Default)]
pub struct ParsedArguments {
    /// The name of the command this result belongs to.
    pub command_name: String,
    values: HashMap<ArgumentId, Box<dyn Any>>,
    names: HashMap<String, ArgumentId>,
    /// The results of the sub-command that was tokenized, if any. Empty
    /// when this command had no sub-commands or none was matched.
    pub sub_results: Vec<ParsedArguments>,
}

impl ParsedArguments {
    /// Creates an empty result for the named command.
    pub fn new(command_name: impl Into<String>) -> Self {
        Self { command_name: command_name.into(), values: HashMap::new(), names: HashMap::new(), sub_results: Vec::new() }
    }

    /// Records a resolved value under every name the argument answers to.
    pub fn insert(&mut self, id: ArgumentId, names: &[String], value: Box<dyn Any>) {
        for name in names {
            self.names.insert(name.clone(), id);
        }
        self.values.insert(id, value);
    }

    /// Looks up a value by any of the argument's registered names,
    /// downcasting to `T`. Returns `None` if the name is unknown, no
    /// value was produced, or `T` doesn't match the stored type.
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        let id = *self.names.get(name)?;
        self.get_by_id(id)
    }

    /// Looks up a value by [`ArgumentId`], downcasting to `T`.
    pub fn get_by_id<T: 'static>(&self, id: ArgumentId) -> Option<&T> {
        self.values.get(&id)?.downcast_ref::<T>()
    }

    /// Looks up a value by [`ArgumentId`] without downcasting, for callers
    /// (namely [`crate::Command::invoke_callbacks`]) that only need to hand
    /// the erased value to a further type-erased callback.
    pub(crate) fn get_dyn(&self, id: ArgumentId) -> Option<&dyn Any> {
        self.values.get(&id).map(|v| v.as_ref())
    }

    /// Whether a value was produced under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.names.get(name).map_or(false, |id| self.values.contains_key(id))
    }
}
