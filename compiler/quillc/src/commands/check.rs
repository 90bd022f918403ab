//! The `check` command: parse files without running them.

use rayon::prelude::*;

use super::{read_error, report};

struct Checked {
    path: String,
    outcome: Result<String, String>,
    diagnostics: Vec<quill_diagnostic::Diagnostic>,
}

/// Parse every file in `paths` in parallel and report problems in input
/// order. Exits with status 1 if any file failed.
pub fn check_files(paths: &[String]) {
    let results: Vec<Checked> = paths.par_iter().map(|path| check_one(path)).collect();

    let mut failed = 0usize;
    for checked in &results {
        match &checked.outcome {
            Ok(_) if checked.diagnostics.is_empty() => println!("ok: {}", checked.path),
            Ok(source) => {
                failed += 1;
                report(&checked.path, source, &checked.diagnostics);
            }
            Err(message) => {
                failed += 1;
                eprintln!("{message}");
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} file(s) failed to parse", results.len());
        std::process::exit(1);
    }
}

fn check_one(path: &str) -> Checked {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            return Checked {
                path: path.to_string(),
                outcome: Err(read_error(path, &e)),
                diagnostics: Vec::new(),
            }
        }
    };
    let diagnostics = match crate::check_source(&source) {
        Ok(_) => Vec::new(),
        Err(error) => error.to_diagnostics(),
    };
    tracing::debug!(path, problems = diagnostics.len(), "checked");
    Checked {
        path: path.to_string(),
        outcome: Ok(source),
        diagnostics,
    }
}
