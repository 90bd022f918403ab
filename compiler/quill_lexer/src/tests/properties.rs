#![allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]

use proptest::prelude::*;
use quill_ir::TokenKind;

use crate::lex;

fn duration_unit() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("y"),
        Just("mo"),
        Just("w"),
        Just("d"),
        Just("h"),
        Just("m"),
        Just("s"),
    ]
}

proptest! {
    #[test]
    fn duration_literals_rescan_as_one_token(
        negative in any::<bool>(),
        parts in proptest::collection::vec((0u32..1000, duration_unit()), 1..6),
    ) {
        let mut text = String::new();
        if negative {
            text.push('-');
        }
        for (n, unit) in &parts {
            text.push_str(&n.to_string());
            text.push_str(unit);
        }
        let tokens = lex(&format!("@{text}"));
        prop_assert_eq!(
            tokens.kinds_and_literals(),
            vec![(TokenKind::Duration, text.as_str()), (TokenKind::Eof, "")]
        );
    }

    #[test]
    fn datetime_literals_rescan_as_one_token(
        year in 1000u32..10000,
        month in 1u32..13,
        day in 1u32..29,
        time in proptest::option::of((0u32..24, 0u32..60, 0u32..60)),
    ) {
        let mut text = format!("{year:04}-{month:02}-{day:02}");
        if let Some((h, m, s)) = time {
            text.push_str(&format!("T{h:02}:{m:02}:{s:02}Z"));
        }
        let tokens = lex(&format!("@{text}"));
        prop_assert_eq!(
            tokens.kinds_and_literals(),
            vec![(TokenKind::DateTime, text.as_str()), (TokenKind::Eof, "")]
        );
    }

    #[test]
    fn lexing_is_total(source in "\\PC{0,64}") {
        let tokens = lex(&source);
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        prop_assert_eq!(eofs, 1);
        prop_assert_eq!(tokens.eof().kind, TokenKind::Eof);
    }

    #[test]
    fn markup_heavy_input_is_total(
        source in proptest::collection::vec(
            prop_oneof![
                Just("<"), Just(">"), Just("/"), Just("{"), Just("}"), Just("@{"),
                Just("\""), Just("`"), Just("p"), Just(" "), Just("\n"), Just("style"),
                Just("<!--"), Just("-->"), Just("@"), Just("1"),
            ],
            0..40,
        )
    ) {
        let source: String = source.concat();
        let tokens = lex(&source);
        prop_assert_eq!(tokens.eof().kind, TokenKind::Eof);
    }
}
