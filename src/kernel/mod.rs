// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The small kernel of concrete [`crate::ArgumentType`] implementations
//! named in spec §4.4: just enough to exercise the contract (string,
//! numeric, file, boolean, counter, key-value, tuple) plus the `Opaque`
//! escape hatch for user-defined types.

mod boolean;
mod counter;
mod file;
mod key_value;
mod numeric;
mod opaque;
mod string;
mod tuple;

pub use boolean::BooleanFlag;
pub use counter::Counter;
pub use file::FileValue;
pub use key_value::KeyValue;
pub use numeric::IntegerValue;
pub use opaque::Opaque;
pub use string::StringValue;
pub use tuple::Tuple;
