// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests through the host layer.

use pretty_assertions::assert_eq;
use quill_diagnostic::{ErrorCode, Hint};
use quill_eval::{buffer_handler, InterpreterBuilder, Object};
use quillc::{check_source, render, run_source, Error, Interpreter};

fn interpreter() -> Interpreter {
    InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .build()
}

fn run(source: &str) -> Result<Object, Error> {
    let interp = interpreter();
    let env = interp.env().clone();
    run_source(source, &env, &interp)
}

#[test]
fn renders_a_page() {
    let source = r#"
        let items = [{name: "Tea", price: 3}, {name: "Cake", price: 5}]
        let Row = fn({name, price}) { <li>{name}: {price}</li> }
        let Page = fn({title, contents}) {
            <html><h1>{title}</h1><ul>{contents}</ul></html>
        }
        <Page title="Menu">{for (item in items) { <Row name={item.name} price={item.price} /> }}</Page>
    "#;
    let value = run(source).unwrap();
    let interp = interpreter();
    assert_eq!(
        interp.stringify(&value).unwrap(),
        "<html><h1>Menu</h1><ul><li>Tea: 3</li><li>Cake: 5</li></ul></html>"
    );
}

#[test]
fn environment_persists_between_runs() {
    let interp = interpreter();
    let env = interp.env().clone();
    assert_eq!(run_source("let x = 20", &env, &interp), Ok(Object::Null));
    assert_eq!(run_source("let f = fn(n) { n + x }", &env, &interp), Ok(Object::Null));
    assert_eq!(run_source("f(22)", &env, &interp), Ok(Object::Integer(42)));
}

#[test]
fn print_output_goes_to_the_handler() {
    let interp = interpreter();
    let env = interp.env().clone();
    run_source(r#"for (n in range(3)) { print("n =", n) }"#, &env, &interp).unwrap();
    assert_eq!(interp.print_handler().take_output(), "n = 0\nn = 1\nn = 2\n");
    run_source(r#"print("again")"#, &env, &interp).unwrap();
    assert_eq!(interp.print_handler().lines(), vec!["again".to_string()]);
}

#[test]
fn parse_errors_are_all_reported() {
    let Err(Error::Parse(errors)) = run("let = 1\nlet b = (2") else {
        panic!("expected parse errors");
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].line, 1);
    assert_eq!(errors[1].line, 2);
}

#[test]
fn parse_errors_skip_evaluation() {
    let interp = interpreter();
    let env = interp.env().clone();
    let result = run_source("print(\"ran\")\nlet = 1", &env, &interp);
    assert!(matches!(result, Err(Error::Parse(_))));
    assert_eq!(interp.print_handler().output(), "");
}

#[test]
fn runtime_errors_carry_positions() {
    let Err(Error::Runtime(error)) = run("let d = {a: 1}\nd.a / 0") else {
        panic!("expected a runtime error");
    };
    assert_eq!(error.code(), ErrorCode::E2003);
    assert_eq!((error.line, error.column), (2, 5));
}

#[test]
fn errors_convert_to_diagnostics() {
    let parse = run("(1").unwrap_err();
    let diagnostics = parse.to_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].code.is_syntax_error());

    let runtime = run("missing").unwrap_err();
    let diagnostics = runtime.to_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2002);
    assert!(diagnostics[0].code.is_runtime_error());
    assert_eq!(
        diagnostics[0].hints,
        vec![Hint::Help("declare it first with `let missing = ...`".into())]
    );
}

#[test]
fn check_source_does_not_evaluate() {
    let program = check_source("missing(1, 2)").unwrap();
    assert_eq!(program.statements.len(), 1);
    assert!(check_source("let [a = 1").is_err());
}

#[test]
fn render_uses_literal_form() {
    assert_eq!(render(&Object::from("hi")), "\"hi\"");
    assert_eq!(render(&Object::Float(3.0)), "3.0");
    assert_eq!(render(&run("[1, null, true]").unwrap()), "[1, null, true]");
    assert_eq!(render(&run("{a: 1, b: this.a + 1}").unwrap()), "{a: 1, b: 2}");
    assert_eq!(render(&run("@2024-03-01T10:30:00Z").unwrap()), "@2024-03-01T10:30:00Z");
    assert_eq!(render(&run("/a+/g").unwrap()), "/a+/g");
}

#[test]
fn render_reports_failing_fields() {
    let value = run("{bad: 1 / 0}").unwrap();
    assert!(render(&value).starts_with("<error: "));
}

#[test]
fn deep_recursion_hits_the_call_limit() {
    let interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .max_call_depth(64)
        .build();
    let env = interp.env().clone();
    let result = run_source("let down = fn(n) { down(n + 1) }; down(0)", &env, &interp);
    let Err(Error::Runtime(error)) = result else {
        panic!("expected the recursion limit");
    };
    assert_eq!(error.code(), ErrorCode::E2011);
}
