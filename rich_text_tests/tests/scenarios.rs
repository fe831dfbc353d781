// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end flows across the registry and the text crates.

use rich_text::{NormalizationForm, RichString, RichStringBuilder};
use text_props::{compare, IntPropType, PropVariant, StrPropType, TextPropsBuilder};
use writing_systems::{Registry, RegistryConfig, Script, AUDIO_PRIVATE_USE, UNLISTED_LANGUAGE};

use crate::util::{assert_props_equal, assert_runs_cover, registry, styled};

#[test]
fn scenario_hello_in_registered_writing_system() {
    let registry = registry();
    let ws = registry.get_or_create_handle("en-US").unwrap();

    let props = styled("my style", ws);
    let s = RichString::from_text("Hello", &props);
    assert!(s.is_normalized(NormalizationForm::Nfd));
    assert_eq!(s.run_count(), 1);
    assert_runs_cover(&s);

    let mut fresh = TextPropsBuilder::new();
    fresh
        .set_str(StrPropType::NAMED_STYLE, "my style")
        .set_int(IntPropType::WS, PropVariant::DEFAULT, ws.to_prop_value());
    assert_props_equal(s.properties(0).unwrap(), &fresh.build());
    assert_eq!(s.properties(0).unwrap().ws(), Some(ws));
}

#[test]
fn scenario_implied_script_is_preexisting() {
    let registry = registry();
    let en = registry.get_or_create_handle("en").unwrap();
    let count = registry.len();
    let (handle, _, was_preexisting) = registry.get_or_create_definition("en-Latn").unwrap();
    assert!(was_preexisting);
    assert_eq!(handle, en);
    assert_eq!(registry.len(), count);
}

#[test]
fn scenario_back_color_difference() {
    let registry = registry();
    let ws = registry.get_or_create_handle("fr").unwrap();
    let mut builder = RichStringBuilder::new();
    builder.append("Bonjour", &styled("x", ws));
    let mut a = builder.clone();
    a.set_int_prop(0..7, IntPropType::BACK_COLOR, PropVariant::DEFAULT, 98)
        .unwrap();
    let mut b = builder;
    b.set_int_prop(0..7, IntPropType::BACK_COLOR, PropVariant::DEFAULT, 99)
        .unwrap();
    let (a, b) = (a.build(), b.build());
    assert_eq!(
        compare(a.properties(0).unwrap(), b.properties(0).unwrap()).to_string(),
        "Props differ in intProp type 9. Expected <98,0>, but was <99,0>."
    );
}

#[test]
fn scenario_audio_writing_system() {
    let registry = registry();
    let (handle, def, _) = registry
        .get_or_create_definition(UNLISTED_LANGUAGE)
        .unwrap();
    assert_eq!(def.display_name, "Unlisted Language");
    registry
        .update(handle, |def| {
            def.set_script(Some(Script::UNWRITTEN));
            def.add_private_use(AUDIO_PRIVATE_USE).unwrap();
        })
        .unwrap();
    assert_eq!(registry.handle_to_tag(handle).as_deref(), Some("qaa-Zxxx-x-audio"));
    assert_eq!(registry.tag_to_handle("qaa-zxxx-x-AUDIO"), Some(handle));
}

#[test]
fn scenario_persisted_text_re_resolves_handles_by_tag() {
    let dir = tempfile::tempdir().unwrap();
    let config = RegistryConfig::in_memory().with_store_dir(dir.path());

    let first = Registry::new(config.clone());
    first.get_or_create_handle("de").unwrap();
    let fr = first.get_or_create_handle("fr").unwrap();
    first.save().unwrap();
    let stored_tag = first.handle_to_tag(fr).unwrap();

    let second = Registry::open(config).unwrap();
    let fr_again = second.tag_to_handle(&stored_tag).unwrap();
    let s = RichString::from_text("Salut", &styled("s", fr_again));
    let tag = s
        .properties(0)
        .and_then(|props| props.ws())
        .and_then(|ws| second.handle_to_tag(ws));
    assert_eq!(tag.as_deref(), Some("fr"));
}
