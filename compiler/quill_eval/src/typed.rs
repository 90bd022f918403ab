//! Typed literal values.
//!
//! `@`-literals and regexes evaluate to dictionaries of constant entries
//! tagged with a `__type` key. Datetimes and durations support arithmetic
//! and compare by value; the other kinds are plain records.

use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta,
    Timelike, Utc,
};
use quill_ir::InfixOp;
use regex::{Regex, RegexBuilder};

use crate::errors::{invalid_literal, overflow, EvalError, EvalResult};
use crate::{Dict, Object};

/// Key holding the kind name of a typed dictionary.
pub const TYPE_KEY: &str = "__type";
/// Key holding the literal text of paths and URLs.
pub const TEXT_KEY: &str = "__text";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 604_800;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypedKind {
    DateTime,
    Duration,
    Path,
    Url,
    Regex,
}

impl TypedKind {
    pub fn name(self) -> &'static str {
        match self {
            TypedKind::DateTime => "datetime",
            TypedKind::Duration => "duration",
            TypedKind::Path => "path",
            TypedKind::Url => "url",
            TypedKind::Regex => "regex",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "datetime" => TypedKind::DateTime,
            "duration" => TypedKind::Duration,
            "path" => TypedKind::Path,
            "url" => TypedKind::Url,
            "regex" => TypedKind::Regex,
            _ => return None,
        })
    }
}

fn typed(kind: TypedKind, fields: Vec<(&str, Object)>) -> Object {
    let tag = std::iter::once((TYPE_KEY, Object::from(kind.name())));
    Object::dict(Dict::from_values(tag.chain(fields)))
}

fn kind_of(value: &Object) -> Option<TypedKind> {
    value.as_dict()?.typed_kind()
}

fn int_field(dict: &Dict, key: &str) -> Option<i64> {
    match dict.value(key)? {
        Object::Integer(n) => Some(n),
        _ => None,
    }
}

fn str_field(dict: &Dict, key: &str) -> Option<String> {
    match dict.value(key)? {
        Object::String(s) => Some(s),
        _ => None,
    }
}

// Datetimes

/// Parse `YYYY-MM-DD[THH:MM[:SS[.fff]]][Z|±HH:MM]`. Without an offset the
/// time is UTC; without a time it is midnight.
pub fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

pub fn datetime(text: &str) -> EvalResult {
    parse_datetime(text)
        .map(datetime_from)
        .ok_or_else(|| invalid_literal("datetime", text, "expected YYYY-MM-DD[THH:MM:SS][offset]"))
}

pub fn datetime_from(dt: DateTime<FixedOffset>) -> Object {
    typed(
        TypedKind::DateTime,
        vec![
            ("year", i64::from(dt.year()).into()),
            ("month", i64::from(dt.month()).into()),
            ("day", i64::from(dt.day()).into()),
            ("hour", i64::from(dt.hour()).into()),
            ("minute", i64::from(dt.minute()).into()),
            ("second", i64::from(dt.second()).into()),
            ("unix", dt.timestamp().into()),
            ("weekday", dt.format("%A").to_string().into()),
            ("iso", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true).into()),
        ],
    )
}

pub fn now() -> Object {
    datetime_from(Utc::now().fixed_offset())
}

fn datetime_of(dict: &Dict) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&str_field(dict, "iso")?).ok()
}

// Durations

/// Parse `[-]<N><unit>...` into `(months, seconds)`.
pub fn parse_duration(text: &str) -> Result<(i64, i64), String> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, text),
    };
    if body.is_empty() {
        return Err("empty duration".to_string());
    }
    let (mut months, mut seconds) = (0i64, 0i64);
    let mut rest = body;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("expected a number at `{rest}`"));
        }
        let n: i64 = rest[..digits]
            .parse()
            .map_err(|_| "number too large".to_string())?;
        rest = &rest[digits..];
        let (unit_len, per_month, per_second) = if rest.starts_with("mo") {
            (2, 1, 0)
        } else {
            match rest.chars().next() {
                Some('y') => (1, 12, 0),
                Some('w') => (1, 0, SECONDS_PER_WEEK),
                Some('d') => (1, 0, SECONDS_PER_DAY),
                Some('h') => (1, 0, SECONDS_PER_HOUR),
                Some('m') => (1, 0, SECONDS_PER_MINUTE),
                Some('s') => (1, 0, 1),
                _ => return Err(format!("unknown unit at `{rest}`")),
            }
        };
        let add = |total: i64, per: i64| n.checked_mul(per).and_then(|v| total.checked_add(v));
        months = add(months, per_month).ok_or("duration too large")?;
        seconds = add(seconds, per_second).ok_or("duration too large")?;
        rest = &rest[unit_len..];
    }
    if negative {
        months = -months;
        seconds = -seconds;
    }
    Ok((months, seconds))
}

pub fn duration(text: &str) -> EvalResult {
    let (months, seconds) =
        parse_duration(text).map_err(|reason| invalid_literal("duration", text, reason))?;
    Ok(duration_from(months, seconds))
}

pub fn duration_from(months: i64, seconds: i64) -> Object {
    typed(
        TypedKind::Duration,
        vec![("months", months.into()), ("seconds", seconds.into())],
    )
}

fn duration_of(dict: &Dict) -> Option<(i64, i64)> {
    Some((int_field(dict, "months")?, int_field(dict, "seconds")?))
}

/// Render `(months, seconds)` back into literal form, e.g. `1y2mo3d`.
pub fn format_duration(months: i64, seconds: i64) -> String {
    if months == 0 && seconds == 0 {
        return "0s".to_string();
    }
    let negative = months <= 0 && seconds <= 0;
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    let mut group = |value: i64, units: &[(u64, &str)]| {
        if value == 0 {
            return;
        }
        if value < 0 && !negative {
            out.push('-');
        }
        let mut left = value.unsigned_abs();
        for &(size, unit) in units {
            let count = left / size;
            left %= size;
            if count > 0 {
                out.push_str(&format!("{count}{unit}"));
            }
        }
    };
    group(months, &[(12, "y"), (1, "mo")]);
    group(seconds, &[(86_400, "d"), (3600, "h"), (60, "m"), (1, "s")]);
    out
}

// Paths and URLs

pub fn path(text: &str) -> Object {
    let segments: Vec<Object> = text
        .split('/')
        .filter(|s| !matches!(*s, "" | "." | "~"))
        .map(Object::from)
        .collect();
    let name = text.rsplit('/').next().unwrap_or_default();
    let ext = match name.rfind('.') {
        Some(i) if i > 0 => &name[i + 1..],
        _ => "",
    };
    typed(
        TypedKind::Path,
        vec![
            ("absolute", text.starts_with('/').into()),
            ("home", text.starts_with("~/").into()),
            ("segments", segments.into()),
            ("name", name.into()),
            ("ext", ext.into()),
            (TEXT_KEY, text.into()),
        ],
    )
}

pub fn url(text: &str) -> EvalResult {
    let parsed = url::Url::parse(text).map_err(|e| invalid_literal("url", text, e))?;
    let query = Dict::from_values(
        parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), Object::String(v.into_owned()))),
    );
    Ok(typed(
        TypedKind::Url,
        vec![
            ("scheme", parsed.scheme().into()),
            ("host", parsed.host_str().into()),
            ("port", parsed.port_or_known_default().map(i64::from).into()),
            ("path", parsed.path().into()),
            ("query", Object::dict(query)),
            ("fragment", parsed.fragment().into()),
            (TEXT_KEY, text.into()),
        ],
    ))
}

// Regexes

/// Compile `pattern` with flags `i m s x`; `g` and `u` are accepted and
/// only affect `replace`.
pub fn compile_regex(pattern: &str, flags: &str) -> Result<Regex, EvalError> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'g' | 'u' => {}
            other => {
                return Err(invalid_literal(
                    "regex",
                    &format!("/{pattern}/{flags}"),
                    format!("unknown flag `{other}`"),
                ))
            }
        }
    }
    builder
        .build()
        .map_err(|e| invalid_literal("regex", &format!("/{pattern}/{flags}"), e))
}

pub fn regex(pattern: &str, flags: &str) -> EvalResult {
    compile_regex(pattern, flags)?;
    Ok(typed(
        TypedKind::Regex,
        vec![("pattern", pattern.into()), ("flags", flags.into())],
    ))
}

/// The compiled regex behind a regex value and whether it has the `g`
/// flag. `None` if `value` is not a regex.
pub fn regex_of(value: &Object) -> Option<Result<(Regex, bool), EvalError>> {
    let dict = value.as_dict()?;
    if dict.typed_kind()? != TypedKind::Regex {
        return None;
    }
    let pattern = str_field(dict, "pattern")?;
    let flags = str_field(dict, "flags")?;
    Some(compile_regex(&pattern, &flags).map(|re| (re, flags.contains('g'))))
}

// Shared behavior

/// Literal text of a typed value, used when it is rendered into output.
pub fn canonical_text(dict: &Dict) -> Option<String> {
    match dict.typed_kind()? {
        TypedKind::DateTime => str_field(dict, "iso"),
        TypedKind::Duration => {
            let (months, seconds) = duration_of(dict)?;
            Some(format_duration(months, seconds))
        }
        TypedKind::Path | TypedKind::Url => str_field(dict, TEXT_KEY),
        TypedKind::Regex => Some(format!(
            "/{}/{}",
            str_field(dict, "pattern")?,
            str_field(dict, "flags")?
        )),
    }
}

/// Value equality for datetimes and durations; `None` for other kinds.
pub fn typed_equal(a: &Dict, b: &Dict) -> Option<bool> {
    match (a.typed_kind()?, b.typed_kind()?) {
        (TypedKind::DateTime, TypedKind::DateTime) => Some(datetime_of(a)? == datetime_of(b)?),
        (TypedKind::Duration, TypedKind::Duration) => Some(duration_of(a)? == duration_of(b)?),
        _ => None,
    }
}

/// Negate a duration.
pub fn negate(value: &Object) -> Option<EvalResult> {
    let dict = value.as_dict()?;
    if dict.typed_kind()? != TypedKind::Duration {
        return None;
    }
    let (months, seconds) = duration_of(dict)?;
    Some(
        months
            .checked_neg()
            .zip(seconds.checked_neg())
            .map(|(m, s)| duration_from(m, s))
            .ok_or_else(overflow),
    )
}

/// Datetime and duration arithmetic and datetime ordering. `None` when
/// neither side is a typed value this applies to.
pub fn binary(op: InfixOp, left: &Object, right: &Object) -> Option<EvalResult> {
    use TypedKind::{DateTime as Dt, Duration as Dur};

    fn dict(value: &Object) -> Option<&Dict> {
        value.as_dict().map(|d| &**d)
    }

    let (lk, rk) = (kind_of(left), kind_of(right));
    match (op, lk, rk) {
        (InfixOp::Add | InfixOp::Sub, Some(Dt), Some(Dur)) => {
            let dt = datetime_of(dict(left)?)?;
            let (months, seconds) = duration_of(dict(right)?)?;
            Some(if op == InfixOp::Add {
                shift(dt, months, seconds)
            } else {
                match months.checked_neg().zip(seconds.checked_neg()) {
                    Some((m, s)) => shift(dt, m, s),
                    None => Err(overflow()),
                }
            })
        }
        (InfixOp::Add, Some(Dur), Some(Dt)) => binary(op, right, left),
        (InfixOp::Sub, Some(Dt), Some(Dt)) => {
            let a = datetime_of(dict(left)?)?;
            let b = datetime_of(dict(right)?)?;
            Some(Ok(duration_from(0, a.timestamp() - b.timestamp())))
        }
        (InfixOp::Add | InfixOp::Sub, Some(Dur), Some(Dur)) => {
            let (am, as_) = duration_of(dict(left)?)?;
            let (bm, bs) = duration_of(dict(right)?)?;
            let combined = if op == InfixOp::Add {
                am.checked_add(bm).zip(as_.checked_add(bs))
            } else {
                am.checked_sub(bm).zip(as_.checked_sub(bs))
            };
            Some(combined.map(|(m, s)| duration_from(m, s)).ok_or_else(overflow))
        }
        (InfixOp::Mul, Some(Dur), None) | (InfixOp::Mul, None, Some(Dur)) => {
            let (duration, factor) = if lk.is_some() { (left, right) } else { (right, left) };
            let Object::Integer(factor) = factor else {
                return None;
            };
            let (m, s) = duration_of(dict(duration)?)?;
            Some(
                m.checked_mul(*factor)
                    .zip(s.checked_mul(*factor))
                    .map(|(m, s)| duration_from(m, s))
                    .ok_or_else(overflow),
            )
        }
        (InfixOp::Lt | InfixOp::LtEq | InfixOp::Gt | InfixOp::GtEq, Some(Dt), Some(Dt)) => {
            let a = datetime_of(dict(left)?)?;
            let b = datetime_of(dict(right)?)?;
            let result = match op {
                InfixOp::Lt => a < b,
                InfixOp::LtEq => a <= b,
                InfixOp::Gt => a > b,
                _ => a >= b,
            };
            Some(Ok(Object::Boolean(result)))
        }
        _ => None,
    }
}

fn shift(dt: DateTime<FixedOffset>, months: i64, seconds: i64) -> EvalResult {
    let month_count = u32::try_from(months.unsigned_abs()).map_err(|_| overflow())?;
    let shifted = if months >= 0 {
        dt.checked_add_months(Months::new(month_count))
    } else {
        dt.checked_sub_months(Months::new(month_count))
    };
    let delta = TimeDelta::try_seconds(seconds).ok_or_else(overflow)?;
    shifted
        .and_then(|dt| dt.checked_add_signed(delta))
        .map(datetime_from)
        .ok_or_else(overflow)
}

#[cfg(test)]
mod tests;
