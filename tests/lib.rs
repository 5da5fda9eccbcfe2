// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! End-to-end scenarios exercised through the public [`argtree::Command`]
//! API only, mirroring the integration-test style of the teacher crate's
//! own `tests/lib.rs` (one flat test file, one scenario per function) but
//! against the tokenizer/parser pipeline instead of `FromArgs` derives.

use argtree::kernel::{BooleanFlag, FileValue, IntegerValue, KeyValue, StringValue, Tuple};
use argtree::{Argument, ArgumentGroup, Command, Level};

fn goup() -> Command {
    let mut up = Command::root("goup").unwrap();
    up.set_description("Reach new heights.");
    up.add_argument(Argument::builder("jump", BooleanFlag::new()).alias("j").description("whether or not to jump")).unwrap();
    up.add_argument(Argument::builder("height", IntegerValue::<i64>::new()).required(true).description("how high to go")).unwrap();
    up.add_argument(Argument::builder("pilot-nickname", StringValue::new())).unwrap();
    up
}

#[test]
fn basic_example_parses_flags_and_options() {
    let mut up = goup();
    let parsed = up.parse("--jump --height 5 --pilot-nickname Wes");
    assert!(!up.has_exit_errors());
    assert!(*parsed.get::<bool>("jump").unwrap());
    assert_eq!(*parsed.get::<i64>("height").unwrap(), 5);
    assert_eq!(parsed.get::<String>("pilot-nickname").unwrap(), "Wes");
}

#[test]
fn missing_required_option_is_an_exit_error() {
    let mut up = goup();
    up.parse("--jump");
    assert!(up.has_exit_errors());
    assert_eq!(up.error_code(), 1);
}

#[test]
fn short_alias_sets_the_same_argument() {
    let mut up = goup();
    let parsed = up.parse("-j --height 5");
    assert!(*parsed.get::<bool>("jump").unwrap());
}

#[test]
fn subcommand_example_resolves_nested_command() {
    let mut root = Command::root("cli").unwrap();
    let mut sub = Command::new("subcommand").unwrap();
    sub.add_argument(Argument::builder("what", FileValue::with_exists_check(|_| true))).unwrap();
    sub.add_argument(Argument::builder("hey", IntegerValue::<i64>::new())).unwrap();
    root.add_sub_command(sub).unwrap();

    let parsed = root.parse("subcommand --what foo.txt --hey 12");
    assert!(!root.has_exit_errors());
    let sub_parsed = &parsed.sub_results[0];
    assert_eq!(sub_parsed.get::<std::path::PathBuf>("what").unwrap(), std::path::Path::new("foo.txt"));
    assert_eq!(*sub_parsed.get::<i64>("hey").unwrap(), 12);
}

#[test]
fn unmatched_subcommand_name_is_treated_as_an_unrecognized_argument() {
    let mut root = Command::root("cli").unwrap();
    root.add_sub_command(Command::new("subcommand").unwrap()).unwrap();
    root.parse("notasubcommand");
    assert!(root.has_exit_errors());
}

#[test]
fn tuple_values_collect_into_a_vec() {
    let mut root = Command::root("cli").unwrap();
    root.add_argument(Argument::builder("count", Tuple::<IntegerValue<i64>>::unbounded())).unwrap();
    let parsed = root.parse("--count [1 2 3]");
    assert!(!root.has_exit_errors());
    let values = parsed.get::<Vec<Box<dyn std::any::Any>>>("count").unwrap();
    let ints: Vec<i64> = values.iter().map(|v| *v.downcast_ref::<i64>().unwrap()).collect();
    assert_eq!(ints, vec![1, 2, 3]);
}

#[test]
fn key_value_pairs_collect_into_a_sorted_map() {
    let mut root = Command::root("cli").unwrap();
    root.add_argument(Argument::builder("define", KeyValue::new())).unwrap();
    let parsed = root.parse("--define a=1 --define b=2");
    assert!(!root.has_exit_errors());
    let map = parsed.get::<std::collections::BTreeMap<String, String>>("define").unwrap();
    assert_eq!(map.get("a").map(String::as_str), Some("1"));
    assert_eq!(map.get("b").map(String::as_str), Some("2"));
}

#[test]
fn exclusive_group_rejects_more_than_one_member() {
    let mut root = Command::root("cli").unwrap();
    let a = root.add_argument(Argument::builder("a", BooleanFlag::new())).unwrap();
    let b = root.add_argument(Argument::builder("b", BooleanFlag::new())).unwrap();
    root.add_group(ArgumentGroup::new("mode", true).with_argument(a).with_argument(b));
    root.parse("--a --b");
    assert!(root.has_exit_errors());
}

#[test]
fn forward_marker_captures_remaining_text_verbatim() {
    let mut root = Command::root("cli").unwrap();
    root.add_argument(Argument::builder("jump", BooleanFlag::new())).unwrap();
    root.parse("--jump -- --not --a --flag");
    assert_eq!(root.forward(), Some("--not --a --flag"));
}

#[test]
fn quoted_value_preserves_internal_whitespace() {
    let mut root = Command::root("cli").unwrap();
    root.add_argument(Argument::builder("path", StringValue::new())).unwrap();
    let parsed = root.parse(r#"--path "C:\Program Files\app""#);
    assert_eq!(parsed.get::<String>("path").unwrap(), r"C:\Program Files\app");
}

#[test]
fn lowering_display_threshold_below_error_surfaces_it_without_changing_exit_behavior() {
    let mut root = Command::root("cli").unwrap();
    root.set_min_display_level(Level::Error);
    root.add_argument(Argument::builder("height", IntegerValue::<i64>::new()).required(true)).unwrap();
    root.parse("");
    assert!(root.has_exit_errors());
    assert_eq!(root.displayable_diagnostics().count(), 1);
}

#[test]
fn reset_state_allows_reparsing_the_same_tree() {
    let mut up = goup();
    up.parse("--jump --height 5");
    assert!(!up.has_exit_errors());
    up.reset_state();
    up.parse("--height abc");
    assert!(up.has_exit_errors());
}

#[test]
fn error_code_is_bitwise_or_across_the_tokenized_chain() {
    let mut root = Command::root("cli").unwrap();
    root.set_error_code(2).unwrap();
    let mut sub = Command::new("sub").unwrap();
    sub.set_error_code(4).unwrap();
    sub.add_argument(Argument::builder("count", IntegerValue::<i64>::new()).required(true)).unwrap();
    root.add_sub_command(sub).unwrap();

    root.parse("sub");
    assert_eq!(root.error_code(), 4);
}

#[test]
fn callbacks_fire_on_ok_and_on_err_per_argument() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let ok_seen = Rc::new(RefCell::new(false));
    let err_seen = Rc::new(RefCell::new(false));
    let ok_seen_cb = ok_seen.clone();
    let err_seen_cb = err_seen.clone();

    let mut root = Command::root("cli").unwrap();
    root.add_argument(
        Argument::builder("jump", BooleanFlag::new()).on_ok(move |_| *ok_seen_cb.borrow_mut() = true),
    )
    .unwrap();
    root.add_argument(
        Argument::builder("height", IntegerValue::<i64>::new())
            .required(true)
            .on_err(move |_| *err_seen_cb.borrow_mut() = true),
    )
    .unwrap();

    let parsed = root.parse("--jump");
    root.invoke_callbacks(&parsed);

    assert!(*ok_seen.borrow());
    assert!(*err_seen.borrow());
}

#[test]
fn help_text_lists_declared_arguments() {
    let up = goup();
    let text = up.help();
    assert!(text.contains("goup"));
    assert!(text.contains("height"));
}
