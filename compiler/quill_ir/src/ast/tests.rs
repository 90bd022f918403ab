use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::Position;

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Position::START)
}

fn int(n: i64) -> Box<Expr> {
    Box::new(expr(ExprKind::Int(n)))
}

#[test]
fn infix_renders_fully_parenthesized() {
    let product = expr(ExprKind::Infix {
        op: InfixOp::Mul,
        left: int(2),
        right: int(3),
    });
    let sum = expr(ExprKind::Infix {
        op: InfixOp::Add,
        left: int(1),
        right: Box::new(product),
    });
    assert_eq!(sum.to_string(), "(1 + (2 * 3))");
}

#[test]
fn float_keeps_fraction_marker() {
    assert_eq!(expr(ExprKind::Float(2.0)).to_string(), "2.0");
    assert_eq!(expr(ExprKind::Float(2.5)).to_string(), "2.5");
}

#[test]
fn strings_are_requoted_with_escapes() {
    assert_eq!(
        expr(ExprKind::Str("a\"b\n".to_string())).to_string(),
        r#""a\"b\n""#
    );
}

#[test]
fn function_with_patterns_renders_params() {
    let func = FunctionLiteral {
        params: vec![
            Param::Ident("a".to_string()),
            Param::Array(ArrayPattern {
                elements: vec![Param::Ident("b".to_string()), Param::Ident("c".to_string())],
            }),
            Param::Dict(DictPattern {
                keys: vec![
                    DictPatternKey {
                        key: "d".to_string(),
                        binding: KeyBinding::Same,
                    },
                    DictPatternKey {
                        key: "e".to_string(),
                        binding: KeyBinding::Alias("f".to_string()),
                    },
                ],
                rest: Some("rest".to_string()),
            }),
        ],
        body: Block::default(),
    };
    assert_eq!(
        expr(ExprKind::Function(Rc::new(func))).to_string(),
        "fn(a, [b, c], {d, e as f, ...rest}) {}"
    );
}

#[test]
fn bound_names_walk_nested_patterns() {
    let param = Param::Dict(DictPattern {
        keys: vec![
            DictPatternKey {
                key: "a".to_string(),
                binding: KeyBinding::Nested(Param::Array(ArrayPattern {
                    elements: vec![Param::Ident("x".to_string()), Param::Ident("y".to_string())],
                })),
            },
            DictPatternKey {
                key: "b".to_string(),
                binding: KeyBinding::Alias("z".to_string()),
            },
        ],
        rest: None,
    });
    assert_eq!(param.bound_names(), vec!["x", "y", "z"]);
}

#[test]
fn tag_pair_wraps_expression_children_in_braces() {
    let tag = expr(ExprKind::TagPair {
        name: "p".to_string(),
        attrs: "class=\"x\"".to_string(),
        children: vec![
            expr(ExprKind::Text("hi ".to_string())),
            expr(ExprKind::Ident("name".to_string())),
        ],
    });
    assert_eq!(tag.to_string(), "<p class=\"x\">hi {name}</p>");
}
