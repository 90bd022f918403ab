use pretty_assertions::assert_eq;

use super::*;

fn field(value: &Object, key: &str) -> Object {
    value
        .as_dict()
        .and_then(|d| d.value(key))
        .unwrap_or(Object::Null)
}

#[test]
fn duration_units() {
    assert_eq!(parse_duration("2h30m"), Ok((0, 9000)));
    assert_eq!(parse_duration("1y2mo"), Ok((14, 0)));
    assert_eq!(parse_duration("1w1d"), Ok((0, 8 * 86_400)));
    assert_eq!(parse_duration("-90s"), Ok((0, -90)));
}

#[test]
fn duration_rejects_garbage() {
    assert!(parse_duration("").is_err());
    assert!(parse_duration("5x").is_err());
    assert!(parse_duration("h").is_err());
}

#[test]
fn duration_canonical_text() {
    assert_eq!(format_duration(0, 9000), "2h30m");
    assert_eq!(format_duration(14, 0), "1y2mo");
    assert_eq!(format_duration(0, -90), "-1m30s");
    assert_eq!(format_duration(0, 0), "0s");
    assert_eq!(format_duration(1, -3600), "1mo-1h");
}

#[test]
fn datetime_fields() {
    let Ok(value) = datetime("2024-12-25") else {
        panic!("valid datetime rejected");
    };
    assert_eq!(field(&value, TYPE_KEY), Object::from("datetime"));
    assert_eq!(field(&value, "year"), Object::Integer(2024));
    assert_eq!(field(&value, "month"), Object::Integer(12));
    assert_eq!(field(&value, "hour"), Object::Integer(0));
    assert_eq!(field(&value, "weekday"), Object::from("Wednesday"));
    assert_eq!(field(&value, "iso"), Object::from("2024-12-25T00:00:00Z"));
}

#[test]
fn datetime_with_offset() {
    let Ok(value) = datetime("2024-01-01T10:00:00+02:00") else {
        panic!("valid datetime rejected");
    };
    assert_eq!(field(&value, "hour"), Object::Integer(10));
    assert_eq!(field(&value, "unix"), Object::Integer(1_704_096_000));
}

#[test]
fn invalid_datetime() {
    assert!(datetime("2024-13-45").is_err());
}

#[test]
fn datetime_plus_duration() {
    let (Ok(dt), Ok(dur)) = (datetime("2024-01-31"), duration("1mo1d")) else {
        panic!("literals rejected");
    };
    let Some(Ok(shifted)) = binary(InfixOp::Add, &dt, &dur) else {
        panic!("datetime + duration not applied");
    };
    assert_eq!(field(&shifted, "iso"), Object::from("2024-03-01T00:00:00Z"));
}

#[test]
fn datetime_difference_is_duration() {
    let (Ok(a), Ok(b)) = (datetime("2024-01-02"), datetime("2024-01-01")) else {
        panic!("literals rejected");
    };
    let Some(Ok(diff)) = binary(InfixOp::Sub, &a, &b) else {
        panic!("datetime - datetime not applied");
    };
    assert_eq!(field(&diff, "seconds"), Object::Integer(86_400));
    assert_eq!(binary(InfixOp::Lt, &b, &a), Some(Ok(Object::Boolean(true))));
}

#[test]
fn duration_scaling_and_equality() {
    let (Ok(hour), Ok(two)) = (duration("1h"), duration("2h")) else {
        panic!("literals rejected");
    };
    let Some(Ok(doubled)) = binary(InfixOp::Mul, &Object::Integer(2), &hour) else {
        panic!("int * duration not applied");
    };
    assert_eq!(doubled, two);
    assert_eq!(negate(&hour).and_then(Result::ok), duration("-1h").ok());
}

#[test]
fn binary_ignores_plain_values() {
    assert_eq!(binary(InfixOp::Add, &Object::Integer(1), &Object::Integer(2)), None);
}

#[test]
fn path_fields() {
    let value = path("./docs/guide.md");
    assert_eq!(field(&value, "absolute"), Object::Boolean(false));
    assert_eq!(
        field(&value, "segments"),
        Object::Array(vec!["docs".into(), "guide.md".into()])
    );
    assert_eq!(field(&value, "name"), Object::from("guide.md"));
    assert_eq!(field(&value, "ext"), Object::from("md"));
    assert_eq!(field(&path("~/x"), "home"), Object::Boolean(true));
    assert_eq!(field(&path("/.bashrc"), "ext"), Object::from(""));
}

#[test]
fn url_fields() {
    let Ok(value) = url("https://example.com:8080/a/b?q=1&r=two#top") else {
        panic!("valid url rejected");
    };
    assert_eq!(field(&value, "scheme"), Object::from("https"));
    assert_eq!(field(&value, "host"), Object::from("example.com"));
    assert_eq!(field(&value, "port"), Object::Integer(8080));
    assert_eq!(field(&value, "path"), Object::from("/a/b"));
    assert_eq!(field(&value, "fragment"), Object::from("top"));
    let query = field(&value, "query");
    assert_eq!(field(&query, "r"), Object::from("two"));
}

#[test]
fn regex_flags() {
    let Ok(value) = regex("ab+", "ig") else {
        panic!("valid regex rejected");
    };
    let Some(Ok((re, global))) = regex_of(&value) else {
        panic!("regex value not recognized");
    };
    assert!(re.is_match("xABBy"));
    assert!(global);
    assert!(regex("a", "q").is_err());
    assert!(regex("(", "").is_err());
}

#[test]
fn canonical_texts() {
    let render = |value: EvalResult| {
        value
            .ok()
            .and_then(|v| v.as_dict().and_then(|d| canonical_text(d)))
    };
    assert_eq!(render(duration("90m")), Some("1h30m".to_string()));
    assert_eq!(render(Ok(path("/etc/hosts"))), Some("/etc/hosts".to_string()));
    assert_eq!(render(regex("a/b", "i")), Some("/a/b/i".to_string()));
}
