//! The `eval` command: run source given on the command line.

use quill_eval::{stdout_handler, InterpreterBuilder};

use super::report;

/// Evaluate `source` and print the result in literal form.
pub fn eval_expression(source: &str) {
    let interpreter = InterpreterBuilder::new()
        .print_handler(stdout_handler())
        .build();
    let env = interpreter.env().clone();

    match crate::run_source(source, &env, &interpreter) {
        Ok(value) => println!("{}", crate::render(&value)),
        Err(error) => {
            report("<eval>", source, &error.to_diagnostics());
            std::process::exit(1);
        }
    }
}
