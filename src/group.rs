// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Grouping of arguments, with optional mutual exclusivity.

use crate::argument::ArgumentId;

/// Opaque identifier for an [`ArgumentGroup`] within the owning
/// [`crate::Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

/// Groups arguments (and nested sub-groups) under one name, optionally
/// enforcing that at most one arm of the group's transitive closure is
/// used per parse.
#[derive(Debug)]
pub struct ArgumentGroup {
    pub(crate) id: GroupId,
    pub name: String,
    pub description: String,
    pub(crate) arguments: Vec<ArgumentId>,
    pub(crate) sub_groups: Vec<GroupId>,
    pub exclusive: bool,
}

impl ArgumentGroup {
    /// Creates a new, empty group.
    pub fn new(name: impl Into<String>, exclusive: bool) -> Self {
        Self {
            id: GroupId(0),
            name: name.into(),
            description: String::new(),
            arguments: Vec::new(),
            sub_groups: Vec::new(),
            exclusive,
        }
    }

    /// Sets the group's description (used by help rendering).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a reference to an already-owned argument.
    pub fn with_argument(mut self, id: ArgumentId) -> Self {
        self.arguments.push(id);
        self
    }

    /// This group's identifier within its owning command.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The arguments directly in this group (not including sub-groups).
    pub fn arguments(&self) -> &[ArgumentId] {
        &self.arguments
    }

    /// The sub-groups nested directly under this group.
    pub fn sub_groups(&self) -> &[GroupId] {
        &self.sub_groups
    }
}
