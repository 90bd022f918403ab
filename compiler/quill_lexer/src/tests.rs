use pretty_assertions::assert_eq;
use quill_ir::{Position, TokenKind};

use crate::{lex, Lexer};

use TokenKind::*;

/// `(kind, literal)` pairs without the trailing `Eof`.
fn scan(source: &str) -> Vec<(TokenKind, String)> {
    let tokens = lex(source);
    let mut pairs: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind, t.literal.clone()))
        .collect();
    assert_eq!(pairs.pop().map(|(k, _)| k), Some(Eof));
    pairs
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).into_iter().map(|(k, _)| k).collect()
}

fn tok(kind: TokenKind, literal: &str) -> (TokenKind, String) {
    (kind, literal.to_string())
}

// ─── Code mode ─────────────────────────────────────────────────────────

#[test]
fn let_statement() {
    assert_eq!(
        scan("let x = 1 + 2.5;"),
        vec![
            tok(Let, "let"),
            tok(Ident, "x"),
            tok(Assign, "="),
            tok(Int, "1"),
            tok(Plus, "+"),
            tok(Float, "2.5"),
            tok(Semicolon, ";"),
        ]
    );
}

#[test]
fn multi_char_operators() {
    assert_eq!(
        kinds("a ++ b == c != d <= e >= f && g || h !~ i ~ j ...k"),
        vec![
            Ident, Concat, Ident, Eq, Ident, NotEq, Ident, LtEq, Ident, GtEq, Ident, And, Ident,
            Or, Ident, NotMatch, Ident, Match, Ident, Ellipsis, Ident,
        ]
    );
}

#[test]
fn function_keyword_alias() {
    assert_eq!(kinds("fn function"), vec![Function, Function]);
}

#[test]
fn integer_followed_by_dot_is_not_float() {
    assert_eq!(kinds("1.length"), vec![Int, Dot, Ident]);
}

#[test]
fn line_comments_are_skipped() {
    assert_eq!(kinds("a // comment\nb"), vec![Ident, Ident]);
}

#[test]
fn string_escapes_are_decoded() {
    assert_eq!(
        scan(r#""a\n\t\\\"b\q""#),
        vec![tok(Str, "a\n\t\\\"b\\q")]
    );
}

#[test]
fn unterminated_string_is_illegal() {
    assert_eq!(scan("\"abc"), vec![tok(Illegal, "\"abc")]);
}

#[test]
fn unknown_character_is_illegal_and_scanning_continues() {
    assert_eq!(
        scan("a # b"),
        vec![tok(Ident, "a"), tok(Illegal, "#"), tok(Ident, "b")]
    );
}

#[test]
fn positions_are_one_based() {
    let tokens = lex("let a\n  = 1");
    let positions: Vec<Position> = tokens.iter().map(|t| t.pos()).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(1, 1),
            Position::new(1, 5),
            Position::new(2, 3),
            Position::new(2, 5),
            Position::new(2, 6),
        ]
    );
}

// ─── Regex vs division ─────────────────────────────────────────────────

#[test]
fn slash_after_operand_is_division() {
    assert_eq!(kinds("a / b / c"), vec![Ident, Slash, Ident, Slash, Ident]);
    assert_eq!(kinds("(a) / 2"), vec![LParen, Ident, RParen, Slash, Int]);
}

#[test]
fn slash_after_operator_is_regex() {
    assert_eq!(
        scan("x = /ab+c/i"),
        vec![tok(Ident, "x"), tok(Assign, "="), tok(Regex, "ab+c/i")]
    );
    assert_eq!(scan("s ~ /^a/"), vec![tok(Ident, "s"), tok(Match, "~"), tok(Regex, "^a/")]);
}

#[test]
fn slash_at_start_of_input_is_regex() {
    assert_eq!(scan("/x/"), vec![tok(Regex, "x/")]);
}

#[test]
fn slash_inside_class_does_not_end_regex() {
    assert_eq!(scan("(/[/]+/g)")[1], tok(Regex, "[/]+/g"));
}

#[test]
fn unterminated_regex_is_illegal() {
    assert_eq!(kinds("= /abc\n"), vec![Assign, Illegal]);
}

// ─── @ literals ────────────────────────────────────────────────────────

#[test]
fn durations() {
    assert_eq!(scan("@2h30m"), vec![tok(Duration, "2h30m")]);
    assert_eq!(scan("@1y2mo3w4d5h6m7s"), vec![tok(Duration, "1y2mo3w4d5h6m7s")]);
    assert_eq!(scan("@-1d"), vec![tok(Duration, "-1d")]);
}

#[test]
fn datetimes() {
    assert_eq!(scan("@2024-12-25"), vec![tok(DateTime, "2024-12-25")]);
    assert_eq!(
        scan("@2024-12-25T10:30:00.250+05:30"),
        vec![tok(DateTime, "2024-12-25T10:30:00.250+05:30")]
    );
}

#[test]
fn paths() {
    assert_eq!(scan("@./a/b.txt"), vec![tok(Path, "./a/b.txt")]);
    assert_eq!(scan("@../up"), vec![tok(Path, "../up")]);
    assert_eq!(scan("@~/notes"), vec![tok(Path, "~/notes")]);
    assert_eq!(scan("@/etc/hosts"), vec![tok(Path, "/etc/hosts")]);
}

#[test]
fn urls() {
    assert_eq!(
        scan("@https://example.com/a?b=1#top"),
        vec![tok(Url, "https://example.com/a?b=1#top")]
    );
    assert_eq!(
        scan("f(@http://x.org, 1)"),
        vec![
            tok(Ident, "f"),
            tok(LParen, "("),
            tok(Url, "http://x.org"),
            tok(Comma, ","),
            tok(Int, "1"),
            tok(RParen, ")"),
        ]
    );
}

#[test]
fn bare_at_is_illegal() {
    assert_eq!(scan("@ x"), vec![tok(Illegal, "@"), tok(Ident, "x")]);
}

// ─── Templates ─────────────────────────────────────────────────────────

#[test]
fn template_keeps_interpolations_raw() {
    assert_eq!(scan("`a{1+1}b`"), vec![tok(Template, "a{1+1}b")]);
}

#[test]
fn escaped_braces_become_nul_escapes() {
    assert_eq!(scan(r"`x\{y\}`"), vec![tok(Template, r"x\0{y\0}")]);
    assert_eq!(scan(r"`x\0{y\0}`"), vec![tok(Template, r"x\0{y\0}")]);
}

#[test]
fn backtick_inside_interpolation_string_does_not_close() {
    assert_eq!(scan("`a{\"`\"}b`"), vec![tok(Template, "a{\"`\"}b")]);
}

#[test]
fn nested_template_in_interpolation() {
    assert_eq!(scan("`a{`b{c}`}d`"), vec![tok(Template, "a{`b{c}`}d")]);
}

#[test]
fn unterminated_template_is_illegal() {
    assert_eq!(kinds("`abc"), vec![Illegal]);
}

// ─── Tags ──────────────────────────────────────────────────────────────

#[test]
fn paired_tag_with_text_and_interpolation() {
    assert_eq!(
        scan(r#"<p class="x">Hello {name}!</p>"#),
        vec![
            tok(TagStart, r#"p class="x""#),
            tok(TagText, "Hello "),
            tok(LBrace, "{"),
            tok(Ident, "name"),
            tok(RBrace, "}"),
            tok(TagText, "!"),
            tok(TagEnd, "p"),
        ]
    );
}

#[test]
fn singleton_reads_past_gt_inside_braces_and_quotes() {
    assert_eq!(
        scan(r#"<Card title={a > b} note="x>y" />"#),
        vec![tok(TagSingleton, r#"Card title={a > b} note="x>y""#)]
    );
}

#[test]
fn indentation_between_tags_is_dropped() {
    assert_eq!(
        scan("<ul>\n  <li>a b</li>\n</ul>"),
        vec![
            tok(TagStart, "ul"),
            tok(TagStart, "li"),
            tok(TagText, "a b"),
            tok(TagEnd, "li"),
            tok(TagEnd, "ul"),
        ]
    );
}

#[test]
fn tags_nest_inside_embedded_code() {
    assert_eq!(
        kinds("<ul>{for (x in xs) {<li>{x}</li>}}</ul>"),
        vec![
            TagStart, LBrace, For, LParen, Ident, In, Ident, RParen, LBrace, TagStart, LBrace,
            Ident, RBrace, TagEnd, RBrace, RBrace, TagEnd,
        ]
    );
}

#[test]
fn code_resumes_after_closing_tag() {
    assert_eq!(
        kinds("let a = <b>x</b>; a / 2"),
        vec![Let, Ident, Assign, TagStart, TagText, TagEnd, Semicolon, Ident, Slash, Int]
    );
}

#[test]
fn grouping_tag() {
    assert_eq!(
        scan("<>hi</>"),
        vec![tok(TagStart, ""), tok(TagText, "hi"), tok(TagEnd, "")]
    );
}

#[test]
fn less_than_after_operand_is_comparison() {
    assert_eq!(kinds("a <b"), vec![Ident, Lt, Ident]);
    assert_eq!(kinds("1<2"), vec![Int, Lt, Int]);
    assert_eq!(kinds("(a) <b"), vec![LParen, Ident, RParen, Lt, Ident]);
    assert_eq!(kinds("f(x)<y"), vec![Ident, LParen, Ident, RParen, Lt, Ident]);
}

#[test]
fn tag_after_if_header_is_a_branch() {
    assert_eq!(
        kinds("if (ok) <p>yes</p> else <p>no</p>"),
        vec![If, LParen, Ident, RParen, TagStart, TagText, TagEnd, Else, TagStart, TagText, TagEnd]
    );
    assert_eq!(
        kinds("if ((a) < b) <br/>"),
        vec![If, LParen, LParen, Ident, RParen, Lt, Ident, RParen, TagSingleton]
    );
}

#[test]
fn tag_after_for_header_is_the_body() {
    assert_eq!(
        kinds("for (x in xs) <li>{x}</li>"),
        vec![
            For, LParen, Ident, In, Ident, RParen, TagStart, LBrace, Ident, RBrace, TagEnd,
        ]
    );
}

#[test]
fn slash_after_if_header_is_regex() {
    assert_eq!(kinds("if (a) /x/ else 1"), vec![If, LParen, Ident, RParen, Regex, Else, Int]);
}

#[test]
fn style_body_is_raw_text() {
    assert_eq!(
        scan("<style>a { color: @{c}; }</style>"),
        vec![
            tok(TagStart, "style"),
            tok(TagText, "a { color: "),
            tok(LBrace, "{"),
            tok(Ident, "c"),
            tok(RBrace, "}"),
            tok(TagText, "; }"),
            tok(TagEnd, "style"),
        ]
    );
}

#[test]
fn script_body_keeps_tags_as_text() {
    assert_eq!(
        scan("<script>if (a<b) {}</script>"),
        vec![
            tok(TagStart, "script"),
            tok(TagText, "if (a<b) {}"),
            tok(TagEnd, "script"),
        ]
    );
}

#[test]
fn markup_comments_are_skipped() {
    assert_eq!(kinds("<!-- c --> 1"), vec![Int]);
    assert_eq!(
        scan("<p>a<!-- c -->b</p>"),
        vec![
            tok(TagStart, "p"),
            tok(TagText, "a"),
            tok(TagText, "b"),
            tok(TagEnd, "p"),
        ]
    );
}

#[test]
fn doctype_passes_through_verbatim() {
    assert_eq!(scan("<!DOCTYPE html>"), vec![tok(Str, "<!DOCTYPE html>")]);
    assert_eq!(
        scan("<p><![CDATA[x<y]]></p>"),
        vec![
            tok(TagStart, "p"),
            tok(TagText, "<![CDATA[x<y]]>"),
            tok(TagEnd, "p"),
        ]
    );
}

#[test]
fn unclosed_tag_ends_in_eof() {
    assert_eq!(kinds("<p>text"), vec![TagStart, TagText]);
}

#[test]
fn iterator_yields_eof_once() {
    let kinds: Vec<_> = Lexer::new("a").map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Ident, Eof]);
}

#[test]
fn tag_depth_tracks_open_frames() {
    let mut lexer = Lexer::new("<a><b>{x}</b></a>");
    lexer.next_token();
    lexer.next_token();
    assert_eq!(lexer.tag_depth(), 2);
    lexer.next_token();
    assert_eq!(lexer.tag_depth(), 2);
}

mod properties;
