//! Shared chumsky combinators for line-oriented diagram scanning

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
///
/// Uses explicit character matching so `repeated()` always makes progress.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse an ASCII word identifier: `[A-Za-z0-9_]+`.
///
/// Unlike `chumsky::text::ident`, a leading digit is allowed.
pub fn word_identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .labelled("identifier")
}

/// Consume whatever is left of the input.
pub fn rest_of_input<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    any().repeated().ignored()
}
