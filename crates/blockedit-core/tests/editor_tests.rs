//! Block editing behaviour and invariants

use blockedit_core::editor::{apply, edit, edit_all, edit_unique};
use blockedit_core::{
    Block, BlockQuery, Document, Error, Line, Operation, Pattern, Predicate, Terminator, find_block,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const WORKFLOW: &str = include_str!("fixtures/android_build.yml");
const GRADLE: &str = include_str!("fixtures/build.gradle.kts");
const SECRETS: &str = include_str!("fixtures/release_secrets.yml");

fn step(name: &str) -> BlockQuery {
    BlockQuery::dedent(Predicate::starts_with(format!("- name: {name}")))
}

#[test]
fn delete_removes_exactly_the_block() {
    let doc = Document::from_text(WORKFLOW);
    let block = find_block(&doc, &step("Set Gradle version")).unwrap();

    let edited = apply(&doc, block, &Operation::Delete).unwrap();

    assert_eq!(edited.len(), doc.len() - block.len());
    assert_eq!(&edited.lines()[..block.start], &doc.lines()[..block.start]);
    assert_eq!(&edited.lines()[block.start..], &doc.lines()[block.end..]);
    assert!(!edited.to_text().contains("gradlew wrapper"));
}

#[test]
fn replace_three_lines_with_one_keeps_the_rest() {
    let text: String = (0..10).map(|i| format!("line {i}\n")).collect();
    let doc = Document::from_text(&text);
    let block = Block::new(3, 6);

    let edited = apply(&doc, block, &Operation::Replace("replacement".into())).unwrap();

    assert_eq!(edited.len(), 8);
    assert_eq!(&edited.lines()[..3], &doc.lines()[..3]);
    assert_eq!(edited.lines()[3].text(), "replacement");
    assert_eq!(edited.lines()[3].terminator(), Terminator::Lf);
    assert_eq!(&edited.lines()[4..], &doc.lines()[6..]);
}

#[test]
fn replace_inherits_start_line_indentation() {
    let doc = Document::from_text(WORKFLOW);
    let edited = edit(
        &doc,
        &step("Set Gradle version"),
        &Operation::Replace(
            "- name: Set Gradle version\n  run: echo skipped\n\n".into(),
        ),
    )
    .unwrap();

    assert!(edited.to_text().contains(
        "      - name: Set Gradle version\n        run: echo skipped\n\n      - name: Build Android APK"
    ));
}

#[test]
fn insert_before_adds_sibling_step() {
    let doc = Document::from_text(WORKFLOW);
    let listing = "- name: List files in android directory\n  working-directory: ./flutter_dashboard_app/android\n  run: ls -la\n\n";

    let edited = edit(&doc, &step("Set Gradle version"), &Operation::InsertBefore(listing.into())).unwrap();

    assert_eq!(edited.len(), doc.len() + 4);
    let text = edited.to_text();
    let list_at = text.find("      - name: List files in android directory\n").unwrap();
    let gradle_at = text.find("      - name: Set Gradle version").unwrap();
    assert!(list_at < gradle_at);
    assert!(text.contains("        run: ls -la\n\n      - name: Set Gradle version"));
}

#[test]
fn insert_after_keeps_block_contents() {
    let doc = Document::from_text("a:\n  b: 1\nc: 2\n");
    let query = BlockQuery::dedent(Predicate::starts_with("a:"));

    let edited = edit(&doc, &query, &Operation::InsertAfter("d: 3".into())).unwrap();

    assert_eq!(edited.to_text(), "a:\n  b: 1\nd: 3\nc: 2\n");
}

#[test]
fn insert_after_at_eof_preserves_missing_newline() {
    let doc = Document::from_text("x = 1\ny = 2");
    let edited = apply(&doc, Block::new(1, 2), &Operation::InsertAfter("z = 3\n".into())).unwrap();
    assert_eq!(edited.to_text(), "x = 1\ny = 2\nz = 3");
}

#[test]
fn replace_whole_empty_document() {
    let doc = Document::default();
    let edited = apply(&doc, Block::whole(&doc), &Operation::Replace("a\nb\n".into())).unwrap();
    assert_eq!(edited.to_text(), "a\nb\n");

    let unterminated = apply(&doc, Block::whole(&doc), &Operation::Replace("a".into())).unwrap();
    assert_eq!(unterminated.to_text(), "a");
}

#[test]
fn payload_uses_document_line_ending() {
    let doc = Document::from_text("a:\r\n  b: 1\r\nc: 2\r\n");
    let query = BlockQuery::dedent(Predicate::starts_with("a:"));
    let edited = edit(&doc, &query, &Operation::InsertBefore("new: 0\n".into())).unwrap();
    assert_eq!(edited.to_text(), "new: 0\r\na:\r\n  b: 1\r\nc: 2\r\n");
}

#[test]
fn comment_toggle_marks_then_unmarks() {
    let doc = Document::from_text(WORKFLOW);
    let build = step("Build Android APK");

    let commented = edit(&doc, &build, &Operation::CommentToggle("#".into())).unwrap();
    assert!(commented.to_text().contains(
        "      #- name: Build Android APK (Release)\n        #working-directory: ./flutter_dashboard_app\n        #run: |\n          #flutter build apk --release\n\n"
    ));

    let relocated = step_commented("Build Android APK");
    let restored = edit(&commented, &relocated, &Operation::CommentToggle("#".into())).unwrap();
    assert_eq!(restored, doc);
}

fn step_commented(name: &str) -> BlockQuery {
    BlockQuery::dedent(Predicate::starts_with(format!("#- name: {name}")))
}

#[rstest]
#[case("      # - name: Build\n  #  \n", "      ## - name: Build\n  ##  \n")]
#[case("#a\nb\n", "##a\n#b\n")]
#[case("  # already\n  plain\n", "  ## already\n  #plain\n")]
#[case("#a\n\n  #b\n", "a\n\n  b\n")]
fn toggle_round_trips_commented_lines(#[case] original: &str, #[case] toggled: &str) {
    let doc = Document::from_text(original);
    let block = Block::whole(&doc);
    let toggle = Operation::CommentToggle("#".into());

    let once = apply(&doc, block, &toggle).unwrap();
    assert_eq!(once.to_text(), toggled);

    let twice = apply(&once, block, &toggle).unwrap();
    assert_eq!(twice, doc);
}

#[test]
fn substitute_fixes_escaped_secret_braces() {
    let doc = Document::from_text(SECRETS);
    let fix = Operation::SubstituteRegex {
        pattern: Pattern::new(r"\$\{\{\{\{ (secrets\.\w+) \}\}\}\}").unwrap(),
        replace: "$${{ $1 }}".into(),
    };

    let edited = apply(&doc, Block::whole(&doc), &fix).unwrap();

    let text = edited.to_text();
    assert!(!text.contains("{{{{"));
    assert!(text.contains(r#"echo "keyAlias=${{ secrets.RELEASE_KEY_ALIAS }}" >> keystore.properties"#));
    assert!(text.contains(r#"run: echo "${{ secrets.RELEASE_STORE_FILE_BASE64 }}" | base64"#));
    assert_eq!(edited.len(), doc.len());
}

#[test]
fn substitute_only_touches_the_block() {
    let doc = Document::from_text(SECRETS);
    let fix = Operation::Substitute {
        find: "${{{{ secrets.RELEASE_STORE_FILE_BASE64 }}}}".into(),
        replace: "${{ secrets.RELEASE_STORE_FILE_BASE64 }}".into(),
    };

    let edited = edit(&doc, &step("Decode Keystore"), &fix).unwrap();

    let text = edited.to_text();
    assert!(text.contains(r#"run: echo "${{ secrets.RELEASE_STORE_FILE_BASE64 }}" | base64"#));
    assert!(text.contains("storePassword=${{{{ secrets.RELEASE_STORE_PASSWORD }}}}"));
}

#[test]
fn substitute_keeps_terminators_and_splits_on_new_newlines() {
    let doc = Document::from_text("a = 1\r\nb = 2\r\n");
    let block = Block::whole(&doc);

    let renamed = apply(&doc, block, &Operation::Substitute { find: "a".into(), replace: "x".into() }).unwrap();
    assert_eq!(renamed.to_text(), "x = 1\r\nb = 2\r\n");

    let split = apply(&doc, block, &Operation::Substitute { find: " = ".into(), replace: " =\n  ".into() }).unwrap();
    assert_eq!(split.len(), 4);
    assert_eq!(split.lines()[1].text(), "  1");
    assert_eq!(split.lines()[1].terminator(), Terminator::CrLf);
}

#[test]
fn substitute_rejects_empty_search_text() {
    let doc = Document::from_text("a\n");
    let op = Operation::Substitute { find: String::new(), replace: "x".into() };
    let err = apply(&doc, Block::whole(&doc), &op).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
}

#[test]
fn blank_lines_are_never_marked() {
    let doc = Document::from_text("a:\n\n  b: 1\n   \nc:\n");
    let edited = apply(&doc, Block::new(0, 4), &Operation::Comment("# ".into())).unwrap();
    assert_eq!(edited.to_text(), "# a:\n\n  # b: 1\n   \nc:\n");
}

#[test]
fn comment_skips_marked_and_uncomment_skips_plain() {
    let doc = Document::from_text("#a\nb\n");
    let block = Block::whole(&doc);

    let commented = apply(&doc, block, &Operation::Comment("#".into())).unwrap();
    assert_eq!(commented.to_text(), "#a\n#b\n");

    let uncommented = apply(&doc, block, &Operation::Uncomment("#".into())).unwrap();
    assert_eq!(uncommented.to_text(), "a\nb\n");
}

#[rstest]
#[case(0, "build:\n  steps:\n    - run: x\n\nnext:\n")]
#[case(4, "    build:\n      steps:\n        - run: x\n\nnext:\n")]
fn reindent_keeps_relative_structure(#[case] width: usize, #[case] expected: &str) {
    let doc = Document::from_text("  build:\n    steps:\n      - run: x\n  \nnext:\n");
    let query = BlockQuery::dedent(Predicate::starts_with("build:"));
    let edited = edit(&doc, &query, &Operation::Reindent(width)).unwrap();
    assert_eq!(edited.to_text(), expected);
}

#[test]
fn reindent_clamps_at_zero() {
    let doc = Document::from_text("    a\n  b\n");
    let edited = apply(&doc, Block::whole(&doc), &Operation::Reindent(0)).unwrap();
    assert_eq!(edited.to_text(), "a\nb\n");
}

#[test]
fn edit_fails_loudly_when_block_missing() {
    let doc = Document::from_text(GRADLE);
    let query = BlockQuery::dedent(Predicate::starts_with("signingConfigs {"));

    let err = edit(&doc, &query, &Operation::Delete).unwrap_err();

    match err {
        Error::BlockNotFound { query } => assert!(query.contains("signingConfigs {")),
        other => panic!("expected BlockNotFound, got {other:?}"),
    }
}

#[test]
fn edit_unique_rejects_duplicates() {
    let doc = Document::from_text("- run: a\n- run: a\n");
    let query = BlockQuery::dedent(Predicate::equals("- run: a")).close_at_eof();
    let err = edit_unique(&doc, &query, &Operation::Delete).unwrap_err();
    assert!(matches!(err, Error::AmbiguousBlock { count: 2, .. }));
}

#[test]
fn edit_all_comments_every_release_step() {
    let doc = Document::from_text(WORKFLOW);
    let release = BlockQuery::dedent(
        Predicate::starts_with("- name:").and(Predicate::contains("(Release)")),
    )
    .close_at_eof();

    let edited = edit_all(&doc, &release, &Operation::Comment("# ".into())).unwrap();

    let text = edited.to_text();
    assert!(text.contains("      # - name: Build Android APK (Release)"));
    assert!(text.contains("      # - name: Upload APK Artifact (Release)"));
    assert!(text.contains("          # path: flutter_dashboard_app/build"));
    assert!(text.contains("      - name: Set Gradle version"));
    assert_eq!(edited.len(), doc.len());
}

#[test]
fn invalid_block_is_rejected() {
    let doc = Document::from_text("a\n");
    let err = apply(&doc, Block::new(0, 5), &Operation::Delete).unwrap_err();
    assert!(matches!(err, Error::InvalidBlock { start: 0, end: 5, len: 1 }));
}

#[test]
fn empty_marker_is_rejected() {
    let doc = Document::from_text("a\n");
    let err = apply(&doc, Block::whole(&doc), &Operation::CommentToggle(String::new())).unwrap_err();
    assert!(matches!(err, Error::InvalidMarker { .. }));
}

#[test]
fn apply_leaves_input_untouched() {
    let doc = Document::from_text(WORKFLOW);
    let snapshot = doc.clone();
    let _ = edit(&doc, &step("Checkout code"), &Operation::Delete).unwrap();
    assert_eq!(doc, snapshot);
}

prop_compose! {
    fn yaml_line()(
        indent in 0usize..8,
        prefix in prop::sample::select(vec!["", "", "", "#", "# ", "##", "#  "]),
        word in "[a-z][a-z:_-]{0,10}",
        shape in 0u8..10,
    ) -> String {
        let ws = " ".repeat(indent);
        match shape {
            0 => String::new(),
            1 => format!("{ws}{prefix}  "),
            _ => format!("{ws}{prefix}{word}"),
        }
    }
}

fn starts_with_double_marker(line: &Line) -> bool {
    line.content().starts_with("##")
}

proptest! {
    #[test]
    fn toggle_twice_is_identity(lines in prop::collection::vec(yaml_line(), 1..20), start in 0usize..20, len in 0usize..20) {
        let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let doc = Document::from_text(&text);
        let start = start % doc.len();
        let end = (start + len).min(doc.len());
        let block = Block::new(start, end);
        let toggle = Operation::CommentToggle("#".into());
        let non_blank: Vec<&Line> = doc.lines()[start..end].iter().filter(|l| !l.is_blank()).collect();
        prop_assume!(non_blank.is_empty() || !non_blank.iter().all(|l| starts_with_double_marker(l)));

        let once = apply(&doc, block, &toggle).unwrap();
        let twice = apply(&once, block, &toggle).unwrap();
        prop_assert_eq!(twice, doc);
    }

    #[test]
    fn delete_shrinks_by_block_length(lines in prop::collection::vec(yaml_line(), 1..30), start in 0usize..30, len in 1usize..10) {
        let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let doc = Document::from_text(&text);
        let start = start % doc.len();
        let end = (start + len).min(doc.len());
        let block = Block::new(start, end);

        let edited = apply(&doc, block, &Operation::Delete).unwrap();
        prop_assert_eq!(edited.len(), doc.len() - (end - start));
    }
}
