use gap_settings::{Argument, ArgumentKind, Context, SettingsError, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn in_range_writes_read_back(v in 128_i32..=4096) {
        let mut width = Argument::integer(128..=4096);
        width.set(Value::Integer(v)).expect("in range");
        prop_assert_eq!(width.get(), Ok(Value::Integer(v)));
    }

    #[test]
    fn out_of_range_writes_keep_the_previous_value(v in prop_oneof![i32::MIN..128, 4097..=i32::MAX]) {
        let mut width = Argument::integer(128..=4096);
        let err = width.set(Value::Integer(v)).expect_err("out of range");
        prop_assert!(matches!(err, SettingsError::OutOfRange { .. }), "expected OutOfRange, got {:?}", err);
        prop_assert!(!width.is_set());

        width.set(Value::Integer(512)).expect("in range");
        prop_assert!(width.set_raw(&v.to_string()).is_err());
        prop_assert_eq!(width.get(), Ok(Value::Integer(512)));
    }

    #[test]
    fn unit_doubles_reject_anything_outside(v in prop_oneof![-1e6_f64..-1e-9, 1.000_000_1_f64..1e6]) {
        let factor = Argument::double(0.0..=1.0);
        prop_assert!(matches!(factor.validate(&v.to_string()), Err(SettingsError::OutOfRange { .. })), "expected OutOfRange");
    }
}

#[test]
fn fresh_arguments_have_no_value() {
    let fresh = [
        Argument::integer(0..=1),
        Argument::unsigned_long(0..=1),
        Argument::float(0.0..=1.0),
        Argument::boolean(),
        Argument::string(0, 8),
        Argument::single_select(["a", "b"]),
        Argument::multi_select(["a", "b"]),
        Argument::select_list(["a", "b"], 3),
        Argument::free_list(Argument::integer(0..=9), 3).expect("scalar template"),
        Argument::natural_slider(0, 10, 2).expect("valid slider"),
    ];
    for argument in fresh {
        assert!(
            matches!(argument.get(), Err(SettingsError::ValueAbsent { .. })),
            "{} should start empty",
            argument.kind()
        );
    }
}

#[test]
fn plain_text_is_always_set_and_read_only() {
    let mut note = Argument::plain_text("Generates uniformly random pixels");
    assert_eq!(note.get(), Ok(Value::Text("Generates uniformly random pixels".to_owned())));
    assert!(matches!(note.set_raw("other"), Err(SettingsError::WrongShape { .. })));
    assert!(matches!(note.set(Value::Text("x".into())), Err(SettingsError::WrongShape { .. })));
}

#[test]
fn free_lists_validate_each_item_and_their_length() {
    let mut sizes = Argument::free_list(Argument::integer(1..=10), 3).expect("scalar template");

    sizes.set_raw("[1, 2, 3]").expect("three valid items");
    assert_eq!(
        sizes.get(),
        Ok(Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]))
    );

    assert!(matches!(sizes.set_raw("1, 2, 3, 4"), Err(SettingsError::OutOfRange { .. })));
    assert!(matches!(sizes.set_raw("[1, x]"), Err(SettingsError::InvalidFormat { .. })));

    let list = sizes.as_free_list_mut().expect("free list");
    assert!(list.push("4").is_err(), "already at capacity");
    list.remove(0).expect("valid position");
    list.push("4").expect("room again");
    assert_eq!(list.len(), 3);
}

#[test]
fn free_lists_refuse_compound_templates() {
    let err = Argument::free_list(Argument::multi_select(["a"]), 2).expect_err("compound template");
    assert!(matches!(err, SettingsError::WrongShape { .. }));
}

#[test]
fn multi_select_whole_writes_are_all_or_nothing() {
    let mut flags = Argument::multi_select(["hue", "saturation", "value"]);
    flags.set_raw("hue, value").expect("known names");

    assert!(matches!(flags.set_raw("hue, tint"), Err(SettingsError::OutOfRange { .. })));
    assert_eq!(flags.get(), Ok(Value::Texts(vec!["hue".into(), "value".into()])));
}

#[test]
fn multi_select_flags_flip_by_name_or_index() {
    let mut flags = Argument::multi_select(["hue", "saturation", "value"]);
    assert!(matches!(flags.get(), Err(SettingsError::ValueAbsent { .. })));

    let multi = flags.as_multi_select_mut().expect("multi select");
    multi.set_state("value", true).expect("known name");
    multi.select_index(0).expect("in range");
    multi.toggle("value").expect("known name");
    multi.toggle_index(1).expect("in range");
    multi.deselect_index(0).expect("in range");
    assert!(matches!(multi.select_index(3), Err(SettingsError::OutOfRange { .. })));

    assert_eq!(flags.get(), Ok(Value::Texts(vec!["saturation".into()])));
}

#[test]
fn select_list_raw_text_respects_the_cap() {
    let mut order = Argument::select_list(["r", "g", "b"], 2);
    order.set_raw("[b, b]").expect("repeats allowed");
    assert!(matches!(order.set_raw("[r, g, b]"), Err(SettingsError::OutOfRange { .. })));
    assert_eq!(order.get(), Ok(Value::Texts(vec!["b".into(), "b".into()])));
}

#[test]
fn context_clones_do_not_alias() {
    let mut original = Context::new()
        .with("width", Argument::integer(1..=4096))
        .and_then(|c| c.with("mode", Argument::single_select(["fast", "fine"])))
        .expect("distinct names");
    original.set("width", 100).expect("in range");

    let mut copy = original.clone();
    copy.set("width", 200).expect("in range");
    copy.set("mode", "fine").expect("known choice");
    original.set("mode", "fast").expect("known choice");

    assert_eq!(original.get::<i32>("width"), Ok(100));
    assert_eq!(copy.get::<i32>("width"), Ok(200));
    assert_eq!(original.get::<String>("mode"), Ok("fast".to_owned()));
    assert_eq!(copy.get::<String>("mode"), Ok("fine".to_owned()));
}

#[test]
fn kinds_render_in_snake_case() {
    assert_eq!(ArgumentKind::UnsignedLong.to_string(), "unsigned_long");
    assert_eq!(Argument::select_list(["a"], 1).kind().as_ref(), "select_list");
}
