//! The `quill` command line.

use std::process::exit;

use quillc::commands::{check_files, eval_expression, lex_file, parse_file, run_file};

const USAGE: &str = "\
Quill templating language

Usage: quill <command> [options]
       quill <file.qll>

Commands:
  run <file> [-q]      Evaluate a file and print its value
  check <files...>     Parse files without running them
  lex <file>           Show the token stream
  parse <file>         Show the parsed program
  eval '<source>'      Evaluate source text and print the result
  help                 Show this message
  version              Show the version

Run options:
  --quiet, -q          Don't print the final value

Environment:
  RUST_LOG             Enable tracing, e.g. RUST_LOG=quill_eval=debug
  QUILL_LOG_TREE=1     Show tracing spans as a tree
  NO_COLOR             Disable colored diagnostics

Examples:
  quill page.qll
  quill check templates/*.qll
  quill eval '`1 + 1 = {1 + 1}`'";

/// The operands after the command name, or a usage line and exit 1.
fn operands<'a>(args: &'a [String], usage: &str) -> &'a [String] {
    match args.get(2..) {
        Some(rest) if !rest.is_empty() => rest,
        _ => {
            eprintln!("Usage: quill {usage}");
            exit(1);
        }
    }
}

fn main() {
    quillc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        println!("{USAGE}");
        return;
    };

    match command.as_str() {
        "run" => {
            let rest = operands(&args, "run <file> [--quiet]");
            let quiet = rest.iter().any(|a| a == "--quiet" || a == "-q");
            match rest.iter().find(|a| !a.starts_with('-')) {
                Some(path) => run_file(path, quiet),
                None => {
                    eprintln!("error: missing file path");
                    exit(1);
                }
            }
        }
        "check" => check_files(operands(&args, "check <files...>")),
        "lex" => lex_file(&operands(&args, "lex <file>")[0]),
        "parse" => parse_file(&operands(&args, "parse <file>")[0]),
        "eval" => eval_expression(&operands(&args, "eval '<source>'").join(" ")),
        "help" | "--help" | "-h" => println!("{USAGE}"),
        "version" | "--version" | "-V" => println!("quill {}", env!("CARGO_PKG_VERSION")),
        path if std::path::Path::new(path).is_file() => run_file(path, false),
        other => {
            eprintln!("unknown command `{other}`\n");
            eprintln!("{USAGE}");
            exit(1);
        }
    }
}
