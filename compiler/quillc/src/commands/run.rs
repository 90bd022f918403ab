//! The `run` command: evaluate a Quill file and print its value.

use quill_eval::{stdout_handler, InterpreterBuilder, Object};

use super::{read_file, report};

/// Evaluate the file at `path`.
///
/// The rendered value of the last statement goes to stdout unless `quiet`
/// is set or the value is `null`. `print` output is written as it happens.
pub fn run_file(path: &str, quiet: bool) {
    let source = read_file(path);
    let interpreter = InterpreterBuilder::new()
        .print_handler(stdout_handler())
        .build();
    let env = interpreter.env().clone();

    match crate::run_source(&source, &env, &interpreter) {
        Ok(value) => {
            if quiet || matches!(value, Object::Null) {
                return;
            }
            match interpreter.stringify(&value) {
                Ok(text) => println!("{text}"),
                Err(error) => {
                    report(path, &source, &[error.to_diagnostic()]);
                    std::process::exit(1);
                }
            }
        }
        Err(error) => {
            report(path, &source, &error.to_diagnostics());
            std::process::exit(1);
        }
    }
}
