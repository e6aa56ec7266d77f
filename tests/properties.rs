//! Property-based checks for the emitter invariants.
//!
//! Uses proptest to quantify over arbitrary payloads: escaping must
//! round-trip through a JSON parser, indentation must never change parsed
//! values, base64 must decode back to the input bytes, and undersized fixed
//! buffers must overflow cleanly instead of corrupting anything.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use flatjson::{Error, Printer, TableDescriptor};
use proptest::prelude::*;

/// A single-field table whose field 0 is a byte vector.
fn byte_vector_table(data: &[u8]) -> Vec<u8> {
    let mut b = vec![
        12, 0, 0, 0, // root
        6, 0, 8, 0, 4, 0, 0, 0, // vtable, pad
        8, 0, 0, 0, // table: soffset 8
        4, 0, 0, 0, // field 0: uoffset 4
    ];
    b.extend_from_slice(&(data.len() as u32).to_le_bytes());
    b.extend_from_slice(data);
    b
}

/// A single-field table whose field 0 is a string.
fn string_table(s: &str) -> Vec<u8> {
    let mut b = byte_vector_table(s.as_bytes());
    b.push(0);
    b
}

fn print_u16_vector(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
    p.scalar_vector_field::<u16>(td, 0, "v");
}

proptest! {
    /// Every escaped string parses back to the original payload.
    #[test]
    fn escape_roundtrip(s in any::<String>()) {
        let mut p = Printer::dynamic(0);
        p.string(s.as_bytes());
        let parsed: serde_json::Value = serde_json::from_slice(p.output()).unwrap();
        prop_assert_eq!(parsed.as_str().unwrap(), s);
    }

    /// The same holds when the string travels through a wire buffer and the
    /// string-field primitive.
    #[test]
    fn string_field_roundtrip(s in "[ -~\\t\\n\\r]{0,100}") {
        let buf = string_table(&s);
        fn pf(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
            p.string_field(td, 0, "s");
        }
        let mut p = Printer::dynamic(0);
        p.table_as_root(&buf, None, pf).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(p.output()).unwrap();
        prop_assert_eq!(parsed["s"].as_str().unwrap(), s);
    }

    /// Indented and compact renderings parse to the same value.
    #[test]
    fn indent_neutrality(indent in 0usize..9, count in 0usize..20) {
        let values: Vec<u16> = (0..count as u16).map(|i| i.wrapping_mul(257)).collect();
        let mut buf = vec![
            12, 0, 0, 0,
            6, 0, 8, 0, 4, 0, 0, 0,
            8, 0, 0, 0,
            4, 0, 0, 0,
        ];
        buf.extend_from_slice(&(values.len() as u32).to_le_bytes());
        for v in &values {
            buf.extend_from_slice(&v.to_le_bytes());
        }

        let mut compact = Printer::dynamic(0);
        compact.table_as_root(&buf, None, print_u16_vector).unwrap();
        let reference: serde_json::Value = serde_json::from_slice(compact.output()).unwrap();

        let mut pretty = Printer::dynamic(0);
        pretty.set_indent(indent);
        pretty.table_as_root(&buf, None, print_u16_vector).unwrap();
        let indented: serde_json::Value = serde_json::from_slice(pretty.output()).unwrap();

        prop_assert_eq!(reference, indented);
    }

    /// Base64 fields decode back to the stored bytes in both alphabets.
    #[test]
    fn base64_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..200), urlsafe in any::<bool>()) {
        let buf = byte_vector_table(&data);
        fn pf_std(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
            p.uint8_vector_base64_field(td, 0, "b", false);
        }
        fn pf_url(p: &mut Printer<'_>, td: &mut TableDescriptor<'_>) {
            p.uint8_vector_base64_field(td, 0, "b", true);
        }
        let mut p = Printer::dynamic(0);
        p.table_as_root(&buf, None, if urlsafe { pf_url } else { pf_std }).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(p.output()).unwrap();
        let engine = if urlsafe { &URL_SAFE } else { &STANDARD };
        let decoded = engine.decode(parsed["b"].as_str().unwrap()).unwrap();
        prop_assert_eq!(decoded, data);
    }

    /// A fixed sink at or barely above the reserve either succeeds or
    /// overflows; it never panics and the error is sticky.
    #[test]
    fn tiny_fixed_buffers_overflow_cleanly(extra in 0usize..16, count in 0usize..30) {
        let values: Vec<u16> = vec![0xABCD; count];
        let mut buf = vec![
            12, 0, 0, 0,
            6, 0, 8, 0, 4, 0, 0, 0,
            8, 0, 0, 0,
            4, 0, 0, 0,
        ];
        buf.extend_from_slice(&(values.len() as u32).to_le_bytes());
        for v in &values {
            buf.extend_from_slice(&v.to_le_bytes());
        }

        let mut storage = vec![0u8; flatjson::RESERVE + extra];
        let mut p = Printer::fixed(&mut storage).unwrap();
        match p.table_as_root(&buf, None, print_u16_vector) {
            Ok(total) => prop_assert!(total <= flatjson::RESERVE + extra),
            Err(e) => {
                prop_assert_eq!(e, Error::Overflow);
                prop_assert_eq!(p.error(), Some(Error::Overflow));
            }
        }
    }
}
