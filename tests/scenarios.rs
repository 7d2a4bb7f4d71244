use formtext::classify::{Classification, classify_tag};
use formtext::document::Document;
use formtext::error::{LoadError, MalformedTree};
use formtext::serialize::serialize_with_store;
use formtext::store::{FieldStore, ValueSnapshot};

const SENTENCE: &str = r#"[{"children":[
    {"text":"Hello "},
    {"type":"text-field","name":"x","children":[{"text":""}]},
    {"text":"!"}
]}]"#;

const RADIO_GROUP: &str = r#"[
    {"type":"radio","name":"r","value":"1","children":[{"text":"choice 1"}]},
    {"type":"radio","name":"r","value":"2","children":[{"text":"choice 2"}]}
]"#;

fn fixture() -> Document {
    Document::from_json5(include_str!("fixtures/form.json5")).unwrap()
}

fn fixture_values() -> ValueSnapshot {
    ValueSnapshot::parse(
        include_str!("fixtures/values.json"),
        formtext::document::SourceFormat::Json,
    )
    .unwrap()
}

#[test]
fn test_unresolved_field_leaves_placeholder_gap() {
    let doc = Document::from_json(SENTENCE).unwrap();
    assert_eq!(doc.plain_text(&ValueSnapshot::new()), "Hello !");
}

#[test]
fn test_resolved_field_fills_sentence() {
    let doc = Document::from_json(SENTENCE).unwrap();
    let values = ValueSnapshot::new().with("x", "world");
    assert_eq!(doc.plain_text(&values), "Hello world!");
}

#[test]
fn test_block_paragraphs_are_newline_joined() {
    let doc =
        Document::from_json(r#"[{"children":[{"text":"A."}]},{"children":[{"text":"B."}]}]"#)
            .unwrap();
    assert_eq!(doc.plain_text(&ValueSnapshot::new()), "A.\nB.");
}

#[test]
fn test_unresolved_radio_group_shows_each_option_label() {
    let doc = Document::from_json(RADIO_GROUP).unwrap();
    assert_eq!(doc.plain_text(&ValueSnapshot::new()), "choice 1\nchoice 2");
}

#[test]
fn test_resolved_radio_group_repeats_group_value_per_option() {
    let doc = Document::from_json(RADIO_GROUP).unwrap();
    let values = ValueSnapshot::new().with("r", "2");
    assert_eq!(doc.plain_text(&values), "2\n2");
}

#[test]
fn test_unknown_type_is_block_with_newline_join() {
    assert_eq!(classify_tag("custom-widget"), Classification::BLOCK);
    let doc = Document::from_json(
        r#"[{"type":"custom-widget","children":[{"text":"one"},{"text":"two"}]}]"#,
    )
    .unwrap();
    assert_eq!(doc.plain_text(&ValueSnapshot::new()), "one\ntwo");
}

#[test]
fn test_duplicate_radio_value_fails_validation() {
    let source = r#"[
        {"type":"radio","name":"g","value":"1","children":[{"text":"a"}]},
        {"type":"radio","name":"g","value":"1","children":[{"text":"b"}]}
    ]"#;
    let err = Document::from_json(source).unwrap_err();
    let LoadError::Malformed(malformed) = err else {
        panic!("expected a malformed tree error, got {err}");
    };
    assert!(matches!(malformed, MalformedTree::DuplicateRadioValue { .. }));
    assert_eq!(malformed.path().to_string(), "1");
}

#[test]
fn test_element_without_children_fails_validation() {
    let err = Document::from_json(r#"[{"children":[{"type":"select","name":"s","children":[]}]}]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Malformed(MalformedTree::EmptyElement { .. })
    ));
}

#[test]
fn test_element_missing_children_key_fails_validation() {
    let err = Document::from_json(r#"[{"type":"radio","name":"r","value":"1"}]"#).unwrap_err();
    let LoadError::Malformed(malformed) = err else {
        panic!("expected a malformed tree error, got {err}");
    };
    assert!(matches!(malformed, MalformedTree::EmptyElement { .. }));
    assert_eq!(malformed.path().to_string(), "0");
}

#[test]
fn test_classification_of_known_tags() {
    for tag in ["text-field", "select"] {
        assert!(classify_tag(tag).inline, "{tag}");
    }
    let textarea = classify_tag("textarea");
    assert!(!textarea.inline);
    assert!(textarea.void);
}

#[test]
fn test_fixture_without_values() {
    let text = fixture().plain_text(&ValueSnapshot::new());
    assert_eq!(
        text,
        "A line of text in a paragraph.\n\
         Your name is  and you live here.\n\
         Preferred option: .\n\
         choice 1\n\
         choice 2\n\
         Anything else?"
    );
}

#[test]
fn test_fixture_with_values() {
    let text = fixture().plain_text(&fixture_values());
    assert_eq!(
        text,
        "A line of text in a paragraph.\n\
         Your name is Ada and you live here.\n\
         Preferred option: 2.\n\
         choice 1\n\
         choice 2\n\
         Nothing else."
    );
}

#[test]
fn test_store_pass_is_repeatable_and_follows_commits() {
    let doc = fixture();
    let mut store = FieldStore::from_snapshot(fixture_values());
    let first = serialize_with_store(&doc, &store);
    assert_eq!(first, serialize_with_store(&doc, &store));

    store.set("text-1", "Grace");
    let second = serialize_with_store(&doc, &store);
    assert!(second.contains("Your name is Grace and"));
    assert!(!second.contains("Ada"));

    store.remove("textarea-1");
    assert!(serialize_with_store(&doc, &store).ends_with("Anything else?"));
}
