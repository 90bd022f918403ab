#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use quill_ir::Position;

use super::*;
use crate::ErrorCode;

fn plain() -> TerminalEmitter<Vec<u8>> {
    TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
}

fn render(mut emitter: TerminalEmitter<Vec<u8>>, diag: &Diagnostic) -> String {
    emitter.emit(diag);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn snippet_points_caret_at_column() {
    let emitter = plain().with_source("main.qll", "let a = 1\nlet b = (2 + 3\n");
    let diag = Diagnostic::error(ErrorCode::E1003)
        .with_message("unclosed delimiter `(`")
        .with_label(Position::new(2, 9), "opened here");
    assert_eq!(
        render(emitter, &diag),
        "syntax error[E1003]: unclosed delimiter `(`\n  \
         --> main.qll:2:9\n   \
         |\n \
         2 | let b = (2 + 3\n   \
         |         ^ opened here\n\n"
    );
}

#[test]
fn caret_follows_tabs() {
    let emitter = plain().with_source("t.qll", "\tx + 1");
    let diag = Diagnostic::error(ErrorCode::E2002).with_label(Position::new(1, 2), "here");
    let text = render(emitter, &diag);
    assert!(text.contains("  | \t^ here\n"), "{text}");
}

#[test]
fn without_source_prints_position_only() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("identifier not found: x")
        .with_label(Position::new(4, 1), "unknown identifier")
        .with_suggestion("declare it with `let x = ...`");
    assert_eq!(
        render(plain(), &diag),
        "runtime error[E2002]: identifier not found: x\n  \
         --> 4:1\n      \
         unknown identifier\n  \
         = help: declare it with `let x = ...`\n\n"
    );
}

#[test]
fn label_past_last_line_falls_back_to_position() {
    let emitter = plain().with_source("short.qll", "1");
    let diag = Diagnostic::error(ErrorCode::E1002).with_label(Position::new(9, 1), "here");
    assert!(render(emitter, &diag).contains("--> short.qll:9:1\n      here\n"));
}

#[test]
fn colors_emit_ansi_sequences() {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    let text = render(emitter, &Diagnostic::error(ErrorCode::E2003));
    assert!(text.contains("\x1b[1;31mruntime error\x1b[0m"));
    assert!(text.contains("E2003"));
}

#[test]
fn auto_mode_follows_tty() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert!(ColorMode::Always.should_use_colors(false));
}

#[test]
fn summary_counts_errors() {
    let mut emitter = plain().with_source("page.qll", "");
    emitter.emit_summary(2);
    emitter.emit_summary(0);
    let mut single = plain();
    single.emit_summary(1);
    assert_eq!(
        String::from_utf8(emitter.into_inner()).unwrap(),
        "error: 2 errors in page.qll\n"
    );
    assert_eq!(String::from_utf8(single.into_inner()).unwrap(), "error: 1 error\n");
}
