//! Debugging commands: dump tokens or the parsed program.

use quill_parse::ParseError;

use super::{read_file, report};

/// Print the token stream for a file.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = quill_lexer::lex(&content);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {token:?}");
    }
}

/// Print the parsed program in its fully parenthesized form.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let tokens = quill_lexer::lex(&content);
    let output = quill_parse::parse(&tokens);

    println!("Parse result for '{path}':");
    println!("  Statements: {}", output.program.statements.len());
    println!("  Errors: {}", output.errors.len());
    println!();
    println!("{}", output.program);

    if output.has_errors() {
        let diagnostics: Vec<_> = output.errors.iter().map(ParseError::to_diagnostic).collect();
        report(path, &content, &diagnostics);
        std::process::exit(1);
    }
}
