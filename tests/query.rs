use std::error::Error;
use std::fmt;

use logcap::{args, registry, scope, Level, Matcher, QueryError, Tag, Value};
use serial_test::serial;

#[derive(Debug)]
struct Boom(&'static str);

impl fmt::Display for Boom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for Boom {}

#[derive(Debug)]
struct Unrelated;

impl fmt::Display for Unrelated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrelated")
    }
}

impl Error for Unrelated {}

fn mismatch(result: Result<(), QueryError>) -> String {
    match result {
        Err(QueryError::Mismatch(description)) => description,
        other => panic!("expected a mismatch, got {other:?}"),
    }
}

#[test]
#[serial]
fn message_fragments_use_and_semantics() {
    let _guard = scope::enter("query-frag");
    let sink = registry::sink("frag");
    sink.info("User {} logged in from {}", args!["alice", "10.0.0.1"]);

    sink.assert_event(
        0,
        &Matcher::new()
            .message_contains("alice")
            .message_contains("10.0.0.1"),
    );

    let failure = mismatch(sink.check_event(
        0,
        &Matcher::new()
            .message_contains("alice")
            .message_contains("bob"),
    ));
    assert!(failure.contains("event #0"));
    assert!(failure.contains("\"bob\""));
    assert!(failure.contains("alice"), "actual message must be shown");
}

#[test]
#[serial]
fn array_arguments_compare_deeply() {
    let _guard = scope::enter("query-deep");
    let sink = registry::sink("deep");
    sink.info("ids: {}", args![vec![Value::from("a"), Value::from(1)]]);

    sink.assert_event(
        0,
        &Matcher::new().arg(vec![Value::from("a"), Value::from(1)]),
    );
    assert!(sink
        .check_event(
            0,
            &Matcher::new().arg(vec![Value::from("a"), Value::from(2)])
        )
        .is_err());
}

#[test]
#[serial]
fn null_arguments_compare_null_safely() {
    let _guard = scope::enter("query-null");
    let sink = registry::sink("null");
    sink.info("value: {}", vec![Value::Null]);

    sink.assert_event(0, &Matcher::new().arg_at(0, Value::Null));
    assert!(sink
        .check_event(0, &Matcher::new().arg_at(0, "something"))
        .is_err());
}

#[test]
#[serial]
fn arg_at_and_arg_count() {
    let _guard = scope::enter("query-args");
    let sink = registry::sink("args");
    sink.info("{} {}", args!["first", 2]);

    sink.assert_event(
        0,
        &Matcher::new().arg_at(0, "first").arg_at(1, 2).arg_count(2),
    );

    let failure = mismatch(sink.check_event(0, &Matcher::new().arg_count(3)));
    assert!(failure.contains("expected 3 argument(s), found 2"));

    let failure = mismatch(sink.check_event(0, &Matcher::new().arg_at(5, "x")));
    assert!(failure.contains("only 2 argument(s)"));
}

#[test]
#[serial]
fn wildcard_tag_matches_anything_in_existence_checks() {
    let _guard = scope::enter("query-tag-wild");
    let sink = registry::sink("tags");
    let tag = Tag::new("audit");
    sink.record_tagged(Level::Info, &tag, "tagged", args![]);
    sink.info("untagged", args![]);

    // default tag expectation is a wildcard: both events qualify
    assert_eq!(sink.count_matching(&Matcher::new().level(Level::Info)), 2);
    sink.assert_any(&Matcher::new().message_contains("tagged"));
}

#[test]
#[serial]
fn missing_tag_is_an_exact_expectation_in_sequences() {
    let _guard = scope::enter("query-tag-missing");
    let sink = registry::sink("tags");
    let tag = Tag::new("audit");
    sink.record_tagged(Level::Info, &tag, "tagged", args![]);
    sink.info("untagged", args![]);

    // position 0 must carry the tag, position 1 must carry none
    sink.assert_sequence(&[
        Matcher::new().tag(&tag),
        Matcher::new().no_tag(),
    ]);

    // requiring no-tag where a tag exists fails, wildcards would not
    let failure = mismatch(sink.check_sequence(&[
        Matcher::new().no_tag(),
        Matcher::new().no_tag(),
    ]));
    assert!(failure.contains("event #0"));
    assert!(failure.contains("expected no tag"));
}

#[test]
#[serial]
fn tags_match_by_identity_not_label() {
    let _guard = scope::enter("query-tag-identity");
    let sink = registry::sink("tags");
    let tag = Tag::new("audit");
    let lookalike = Tag::new("audit");
    sink.record_tagged(Level::Info, &tag, "tagged", args![]);

    sink.assert_event(0, &Matcher::new().tag(&tag));
    let failure = mismatch(sink.check_event(0, &Matcher::new().tag(&lookalike)));
    assert!(failure.contains("identity"));
}

#[test]
#[serial]
fn error_type_matching_uses_downcasts() {
    let _guard = scope::enter("query-err");
    let sink = registry::sink("err");
    sink.error("boom", args![Value::error(Boom("x"))]);

    sink.assert_event(
        0,
        &Matcher::new()
            .error_type::<Boom>()
            .error_message_contains("x"),
    );
    sink.assert_none(&Matcher::new().error_type::<Unrelated>());

    let failure = mismatch(sink.check_event(0, &Matcher::new().error_type::<Unrelated>()));
    assert!(failure.contains("Unrelated"));
    assert!(failure.contains("Boom"), "actual type must be shown");
}

#[test]
#[serial]
fn error_checks_against_events_without_errors() {
    let _guard = scope::enter("query-err-none");
    let sink = registry::sink("err");
    sink.info("fine", args![]);

    let failure = mismatch(sink.check_event(0, &Matcher::new().error_type::<Boom>()));
    assert!(failure.contains("no error was captured"));

    let failure = mismatch(sink.check_event(0, &Matcher::new().error_message_contains("x")));
    assert!(failure.contains("no error was captured"));
}

#[test]
#[serial]
fn existence_failure_dumps_the_sequence() {
    let _guard = scope::enter("query-exists");
    let sink = registry::sink("exists");
    sink.info("present", args![]);
    sink.warn("also present", args![]);

    let failure = mismatch(sink.check_any(&Matcher::new().message_contains("absent")));
    assert!(failure.contains("no captured event matches"));
    assert!(failure.contains("\"absent\""));
    assert!(failure.contains("present"));
    assert!(failure.contains("also present"));
}

#[test]
#[serial]
fn existence_failure_on_empty_sink_says_so() {
    let _guard = scope::enter("query-exists-empty");
    let sink = registry::sink("empty");

    let failure = mismatch(sink.check_any(&Matcher::new().level(Level::Error)));
    assert!(failure.contains("<no events captured>"));
}

#[test]
#[serial]
fn absence_failure_cites_the_offending_index() {
    let _guard = scope::enter("query-absent");
    let sink = registry::sink("absent");
    sink.info("harmless", args![]);
    sink.error("forbidden", args![]);

    let failure = mismatch(sink.check_none(&Matcher::new().level(Level::Error)));
    assert!(failure.contains("event #1"));
    assert!(failure.contains("forbidden"));
}

#[test]
#[serial]
fn sequence_checks_length_before_content() {
    let _guard = scope::enter("query-seq");
    let sink = registry::sink("seq");
    sink.info("a", args![]);
    sink.info("b", args![]);
    sink.info("c", args![]);

    // too few criteria fails on count alone
    let failure = mismatch(sink.check_sequence(&[
        Matcher::new().message_contains("a"),
        Matcher::new().message_contains("b"),
    ]));
    assert!(failure.contains("exactly 2"));
    assert!(failure.contains("3 were captured"));

    // three correct criteria pass
    sink.assert_sequence(&[
        Matcher::new().message_contains("a"),
        Matcher::new().message_contains("b"),
        Matcher::new().message_contains("c"),
    ]);

    // wrong criterion at position 1 passes the count check, fails at #1
    let failure = mismatch(sink.check_sequence(&[
        Matcher::new().message_contains("a"),
        Matcher::new().message_contains("wrong"),
        Matcher::new().message_contains("c"),
    ]));
    assert!(failure.contains("event #1"));
}

#[test]
#[serial]
fn count_matching_composes_criteria() {
    let _guard = scope::enter("query-count");
    let sink = registry::sink("count");
    sink.info("User alice logged in", args![]);
    sink.info("User bob logged in", args![]);
    sink.warn("User bob locked out", args![]);

    assert_eq!(
        sink.count_matching(&Matcher::new().message_contains("bob")),
        2
    );
    assert_eq!(
        sink.count_matching(&Matcher::new().level(Level::Info).message_contains("bob")),
        1
    );
    assert_eq!(sink.count_by_level(Level::Warn), 1);
}

#[test]
#[serial]
#[should_panic(expected = "no captured event matches")]
fn assert_forms_panic_with_the_description() {
    let _guard = scope::enter("query-panic");
    let sink = registry::sink("panic");
    sink.assert_any(&Matcher::new().level(Level::Error));
}
