use std::fmt;

/// Which stage of running a Quill program produced an error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    /// Lexing or parsing; the program never started.
    Syntax,
    /// Evaluation; output printed before the error still stands.
    Runtime,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Syntax => "syntax error",
            Phase::Runtime => "runtime error",
        })
    }
}

macro_rules! error_codes {
    ($($(#[$doc:meta])* $code:ident => $title:literal,)*) => {
        /// Stable codes for every diagnostic Quill reports.
        ///
        /// `E0xxx` come from the lexer, `E1xxx` from the parser and `E2xxx`
        /// from the evaluator.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum ErrorCode {
            $($(#[$doc])* $code,)*
        }

        impl ErrorCode {
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$code),*];

            /// The code as written in output, e.g. `E1001`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ErrorCode::$code => stringify!($code),)*
                }
            }

            /// Short fallback message for diagnostics without their own.
            pub fn title(self) -> &'static str {
                match self {
                    $(ErrorCode::$code => $title,)*
                }
            }
        }
    };
}

error_codes! {
    /// Unrecognized character or unterminated literal.
    E0001 => "illegal token",

    E1001 => "unexpected token",
    E1002 => "expected expression",
    /// `(`, `[`, `{` or a tag left open at end of input.
    E1003 => "unclosed delimiter",
    E1004 => "expected identifier",
    /// `</b>` closing `<a>`.
    E1005 => "mismatched closing tag",
    E1006 => "invalid binding pattern",
    /// Assignment or `delete` on something that is not a name, index or
    /// property.
    E1007 => "invalid target",

    E2001 => "type mismatch",
    E2002 => "unknown identifier",
    E2003 => "division by zero",
    E2004 => "index out of range",
    E2005 => "unsupported operator",
    E2006 => "not callable",
    E2007 => "wrong number of arguments",
    E2008 => "destructuring mismatch",
    /// An expression embedded in a backtick template did not parse.
    E2009 => "template error",
    /// A `@...` or `/.../` literal that the lexer accepted but whose value
    /// is out of range.
    E2010 => "invalid literal",
    E2011 => "recursion limit exceeded",
    E2012 => "integer overflow",
    /// Raised by a builtin or method with its own message.
    E2013 => "runtime error",
}

impl ErrorCode {
    pub fn phase(self) -> Phase {
        if self.as_str().starts_with("E2") {
            Phase::Runtime
        } else {
            Phase::Syntax
        }
    }

    pub fn is_syntax_error(self) -> bool {
        self.phase() == Phase::Syntax
    }

    pub fn is_runtime_error(self) -> bool {
        self.phase() == Phase::Runtime
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
