//! Line store round-trip and decoding tests

use blockedit_core::{Document, Error, Line, Terminator};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const WORKFLOW: &str = include_str!("fixtures/android_build.yml");

#[test]
fn fixture_round_trips_byte_for_byte() {
    let doc = Document::load(WORKFLOW.as_bytes()).unwrap();
    assert_eq!(doc.dump(), WORKFLOW.as_bytes());
    assert_eq!(doc.len(), WORKFLOW.lines().count());
}

#[test]
fn crlf_file_round_trips() {
    let crlf = WORKFLOW.replace('\n', "\r\n");
    let doc = Document::load(crlf.as_bytes()).unwrap();
    assert!(doc.lines().iter().all(|l| l.terminator() == Terminator::CrLf));
    assert_eq!(doc.dump(), crlf.as_bytes());
}

#[test]
fn unterminated_last_line_is_kept() {
    let doc = Document::load(b"jobs:\n  build:").unwrap();
    assert_eq!(doc.lines().last().map(Line::terminator), Some(Terminator::None));
    assert!(!doc.ends_with_newline());
    assert_eq!(doc.dump(), b"jobs:\n  build:");
}

#[test]
fn binary_input_is_decode_error() {
    let result = Document::load(&[0x6a, 0x6f, 0x62, 0x73, 0xc3, 0x28]);
    assert!(matches!(result, Err(Error::Decode { offset: 4 })));
}

proptest! {
    #[test]
    fn load_dump_round_trip(text in "([ \ta-z:#\\-]{0,12}(\n|\r\n|\r)?){0,20}") {
        let doc = Document::load(text.as_bytes()).unwrap();
        prop_assert_eq!(doc.dump(), text.as_bytes().to_vec());
    }

    #[test]
    fn round_trip_arbitrary_unicode(text in "\\PC*(\n|\r\n)?\\PC*") {
        let doc = Document::from_text(&text);
        prop_assert_eq!(doc.to_text(), text);
    }
}
