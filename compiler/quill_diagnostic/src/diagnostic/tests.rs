use pretty_assertions::assert_eq;
use quill_ir::Position;

use crate::{Diagnostic, ErrorCode, Hint, Phase};

#[test]
fn error_defaults_message_to_code_title() {
    let diag = Diagnostic::error(ErrorCode::E2003);
    assert_eq!(diag.message, "division by zero");
    assert_eq!(diag.phase(), Phase::Runtime);
    assert!(diag.labels.is_empty());
}

#[test]
fn primary_pos_skips_secondary_labels() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_secondary_label(Position::new(1, 1), "opened here")
        .with_label(Position::new(2, 5), "unexpected `}`");
    assert_eq!(diag.primary_pos(), Some(Position::new(2, 5)));
    assert_eq!(Diagnostic::error(ErrorCode::E1001).primary_pos(), None);
}

#[test]
fn hints_keep_insertion_order() {
    let diag = Diagnostic::error(ErrorCode::E2011)
        .with_suggestion("first")
        .with_note("second");
    assert_eq!(
        diag.hints,
        vec![Hint::Help("first".into()), Hint::Note("second".into())]
    );
}

#[test]
fn display_lists_labels_and_hints() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("identifier not found: foo")
        .with_label(Position::new(3, 7), "unknown identifier")
        .with_secondary_label(Position::new(1, 1), "scope starts here")
        .with_note("builtins are consulted after the environment")
        .with_suggestion("declare it with `let foo = ...`");
    assert_eq!(
        diag.to_string(),
        "runtime error [E2002]: identifier not found: foo\n  \
         --> 3:7: unknown identifier\n  \
         ... 1:1: scope starts here\n  \
         = note: builtins are consulted after the environment\n  \
         = help: declare it with `let foo = ...`"
    );
}

#[test]
fn syntax_errors_say_so() {
    let diag = Diagnostic::error(ErrorCode::E1005).with_message("expected </ul>, found </li>");
    assert_eq!(diag.to_string(), "syntax error [E1005]: expected </ul>, found </li>");
}

#[test]
fn code_phases() {
    assert!(ErrorCode::E0001.is_syntax_error());
    assert!(ErrorCode::E1005.is_syntax_error());
    assert!(ErrorCode::E2011.is_runtime_error());
    assert_eq!(ErrorCode::E1003.to_string(), "E1003");
    assert_eq!(ErrorCode::E2012.title(), "integer overflow");
}

#[test]
fn every_code_has_a_distinct_name_and_title() {
    let mut names: Vec<_> = ErrorCode::ALL.iter().map(|c| c.as_str()).collect();
    names.dedup();
    assert_eq!(names.len(), ErrorCode::ALL.len());
    assert!(ErrorCode::ALL.iter().all(|c| !c.title().is_empty()));
    assert_eq!(ErrorCode::ALL.first(), Some(&ErrorCode::E0001));
}
