//! Backtick templates and embedded code.
//!
//! `{...}` spans are found by quote-aware brace counting, then lexed,
//! parsed and evaluated as a standalone program in the enclosing scope.
//! Every span gets a fresh lexer and parser.

use quill_ir::{Expr, ExprKind, StmtKind};

use crate::errors::{template_error, EvalError, EvalResult};
use crate::{Environment, Interpreter};

impl Interpreter {
    /// Expand a template body: interpolate `{expr}` spans, decode `\n`,
    /// `\t`, `\r`, `\\` and turn `\0{`/`\0}` into literal braces.
    pub(crate) fn render_template(
        &self,
        raw: &str,
        env: &Environment,
    ) -> Result<String, EvalError> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(c) = rest.chars().next() {
            match c {
                '\\' => {
                    let after = &rest[1..];
                    match after.chars().next() {
                        Some('0') if after[1..].starts_with(['{', '}']) => {
                            out.push_str(&after[1..2]);
                            rest = &after[2..];
                        }
                        Some(escaped @ ('n' | 't' | 'r' | '\\')) => {
                            out.push(match escaped {
                                'n' => '\n',
                                't' => '\t',
                                'r' => '\r',
                                _ => '\\',
                            });
                            rest = &after[1..];
                        }
                        Some(other) => {
                            out.push('\\');
                            out.push(other);
                            rest = &after[other.len_utf8()..];
                        }
                        None => {
                            out.push('\\');
                            rest = after;
                        }
                    }
                }
                '{' => {
                    let close = matching_brace(rest)
                        .ok_or_else(|| template_error("unclosed `{` in template"))?;
                    let source = &rest[1..close];
                    if !source.trim().is_empty() {
                        let value = self.eval_embedded(source, env)?;
                        out.push_str(&self.stringify(&value)?);
                    }
                    rest = &rest[close + 1..];
                }
                c => {
                    out.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        Ok(out)
    }

    /// Lex, parse and run `source` in `env`, returning its last value.
    /// Errors lose their positions, which are relative to `source`, so the
    /// surrounding expression's position is reported instead.
    pub(crate) fn eval_embedded(&self, source: &str, env: &Environment) -> EvalResult {
        tracing::debug!(source, "evaluating embedded code");
        let tokens = quill_lexer::lex(source);
        let program = quill_parse::parse(&tokens)
            .into_result()
            .map_err(|errors| embedded_parse_error(source, &errors))?;
        self.eval_program_in(&program, env)
            .map_err(|e| EvalError::new(e.kind))
    }
}

fn embedded_parse_error(source: &str, errors: &[quill_parse::ParseError]) -> EvalError {
    let detail = errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_default();
    template_error(format!("`{source}`: {detail}"))
}

/// Parse `source` as a single expression, for lazily evaluated props.
pub(crate) fn parse_embedded_expr(source: &str) -> Result<Expr, EvalError> {
    let tokens = quill_lexer::lex(source);
    let mut program = quill_parse::parse(&tokens)
        .into_result()
        .map_err(|errors| embedded_parse_error(source, &errors))?;
    match program.statements.len() {
        0 => Ok(Expr::new(ExprKind::Null, quill_ir::Position::START)),
        1 => match program.statements.remove(0).kind {
            StmtKind::Expression(expr) => Ok(expr),
            _ => Err(template_error(format!("`{source}`: expected an expression"))),
        },
        _ => Err(template_error(format!(
            "`{source}`: expected a single expression"
        ))),
    }
}

/// Byte offset of the `}` closing the `{` that starts `s`. Braces inside
/// `"..."` strings and backtick templates do not count.
pub(crate) fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match quote {
            Some(_) if c == '\\' => {
                chars.next();
            }
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '`' => quote = Some(c),
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
    }
    None
}
