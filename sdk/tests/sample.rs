//! End-to-end checks of the sample schema emitters through the one-shot
//! helpers.

use flatjson_sdk::sample::{print_creature, sample_creature, CREATURE_ID};
use flatjson_sdk::{print_to_string, print_to_value, print_to_vec, print_to_writer, Error, Options};

const COMPACT: &str = concat!(
    "{\"name\":\"Grendel\",\"hp\":300,\"rank\":\"Captain\",",
    "\"perks\":\"Swift Sharp\",\"pos\":{\"x\":1.5,\"y\":-2.0},",
    "\"waypoints\":[7,8,9],\"icon\":\"3q2+7w==\",",
    "\"weapon_type\":\"Sword\",\"weapon\":{\"name\":\"Edge\",\"damage\":12},",
    "\"tags\":[\"boss\",\"night\"],\"arsenal\":[{\"name\":\"Spare\"}]}\n",
);

#[test]
fn compact_rendering_is_exact() {
    let buf = sample_creature();
    let out = print_to_string(&buf, Some(CREATURE_ID), print_creature, Options::default()).unwrap();
    assert_eq!(out, COMPACT);
}

#[test]
fn indented_rendering_parses_to_the_same_value() {
    let buf = sample_creature();
    let compact = print_to_value(&buf, None, print_creature, Options::default()).unwrap();
    let pretty_text = print_to_string(
        &buf,
        None,
        print_creature,
        Options {
            indent: 2,
            ..Options::default()
        },
    )
    .unwrap();
    let pretty: serde_json::Value = serde_json::from_str(&pretty_text).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn value_bridge_exposes_fields() {
    let buf = sample_creature();
    let v = print_to_value(&buf, Some(CREATURE_ID), print_creature, Options::default()).unwrap();
    assert_eq!(v["name"], "Grendel");
    assert_eq!(v["hp"], 300);
    assert_eq!(v["rank"], "Captain");
    assert_eq!(v["pos"]["y"], -2.0);
    assert_eq!(v["waypoints"][2], 9);
    assert_eq!(v["weapon"]["damage"], 12);
    // The arsenal sword's damage is the schema default and is skipped.
    assert_eq!(v["arsenal"][0].get("damage"), None);
}

#[test]
fn unquote_is_not_standard_json() {
    let buf = sample_creature();
    let opts = Options {
        unquote: true,
        ..Options::default()
    };
    assert!(print_to_string(&buf, None, print_creature, opts).is_ok());
    assert_eq!(
        print_to_value(&buf, None, print_creature, opts),
        Err(Error::BadInput)
    );
}

#[test]
fn noenum_prints_numbers() {
    let buf = sample_creature();
    let v = print_to_value(
        &buf,
        None,
        print_creature,
        Options {
            noenum: true,
            ..Options::default()
        },
    )
    .unwrap();
    assert_eq!(v["rank"], 2);
    assert_eq!(v["perks"], 5);
    assert_eq!(v["weapon_type"], 1);
}

#[test]
fn identifier_is_enforced() {
    let buf = sample_creature();
    assert_eq!(
        print_to_vec(&buf, Some(b"XXXX"), print_creature, Options::default()),
        Err(Error::BadInput)
    );
}

#[test]
fn writer_one_shot_reports_the_drained_total() {
    let buf = sample_creature();
    let mut out = Vec::new();
    let total =
        print_to_writer(&mut out, &buf, None, print_creature, Options::default()).unwrap();
    assert_eq!(total, out.len());
    // The stream one-shot has no finalize step, so no trailing newline.
    assert_eq!(out, COMPACT.trim_end().as_bytes());
}
