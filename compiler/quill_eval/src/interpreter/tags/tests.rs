use pretty_assertions::assert_eq;

use super::*;

fn attr(name: &str, value: AttrValue) -> Attribute {
    Attribute {
        name: name.to_string(),
        value,
    }
}

#[test]
fn empty_attribute_text() {
    assert_eq!(parse_attributes("").ok(), Some(vec![]));
    assert_eq!(parse_attributes("   ").ok(), Some(vec![]));
}

#[test]
fn all_value_forms() {
    let parsed = parse_attributes(r#"disabled class="a {b}" count={n + 1} size=3"#);
    assert_eq!(
        parsed.ok(),
        Some(vec![
            attr("disabled", AttrValue::Bare),
            attr("class", AttrValue::Quoted("a {b}".to_string())),
            attr("count", AttrValue::Code("n + 1".to_string())),
            attr("size", AttrValue::Quoted("3".to_string())),
        ])
    );
}

#[test]
fn single_quotes_and_escapes() {
    let parsed = parse_attributes(r#"title='it' alt="say \"hi\"""#);
    assert_eq!(
        parsed.ok(),
        Some(vec![
            attr("title", AttrValue::Quoted("it".to_string())),
            attr("alt", AttrValue::Quoted(r#"say \"hi\""#.to_string())),
        ])
    );
}

#[test]
fn braces_inside_code_values() {
    let parsed = parse_attributes(r#"style={{color: "}"}} x = {1}"#);
    assert_eq!(
        parsed.ok(),
        Some(vec![
            attr("style", AttrValue::Code(r#"{color: "}"}"#.to_string())),
            attr("x", AttrValue::Code("1".to_string())),
        ])
    );
}

#[test]
fn malformed_attributes() {
    assert!(parse_attributes(r#"title="open"#).is_err());
    assert!(parse_attributes("count={1").is_err());
    assert!(parse_attributes("=x").is_err());
}
