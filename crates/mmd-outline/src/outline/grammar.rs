//! Statement grammar for the two recognized declaration forms
//!
//! Each line of diagram text is one candidate statement:
//!
//! ```text
//! statement := ws* endpoint (ws* arrow ws* endpoint)* <rest of line>
//! endpoint  := ident (ws* '[' '"' label '"' ']')?
//! ident     := [A-Za-z0-9_]+
//! label     := [^"\n]+
//! arrow     := [-.=]{1,4} '>'
//! ws        := ' ' | '\t'
//! ```
//!
//! A labelled endpoint is a node declaration; every consecutive pair of
//! endpoints joined by an arrow is an edge. Arrow styles (`-->`, `==>`,
//! `-.->`, ...) are not distinguished.
//!
//! Ignored: lines whose first token is not an identifier (comments,
//! directives such as `%%{init}%%`), other node shapes (`A(x)`, `A{x}`),
//! unquoted labels, edge labels (`A -->|x| B`, `A -- x --> B`), links without
//! an arrow head (`---`), and anything after the last recognized endpoint.

use crate::core::{inline_whitespace, rest_of_input, word_identifier};
use chumsky::prelude::*;

/// A node reference inside a statement, optionally carrying a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: String,
    pub label: Option<String>,
}

/// One recognized line: a head endpoint and the endpoints it chains to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub head: Endpoint,
    pub links: Vec<Endpoint>,
}

impl Statement {
    /// All endpoints in source order
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        std::iter::once(&self.head).chain(self.links.iter())
    }

    /// Labelled endpoints, i.e. node declarations, as `(id, label)`
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.endpoints()
            .filter_map(|endpoint| Some((endpoint.id.as_str(), endpoint.label.as_deref()?)))
    }

    /// Directed edges as `(parent, child)` in chain order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.endpoints()
            .zip(self.links.iter())
            .map(|(parent, child)| (parent.id.as_str(), child.id.as_str()))
    }
}

/// Chumsky-based statement grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementGrammar;

impl StatementGrammar {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line; `None` when the line holds no recognizable statement
    pub fn parse_line(&self, line: &str) -> Option<Statement> {
        Self::statement_parser().parse(line).into_result().ok()
    }

    /// Parse every line of the input, skipping the unrecognized ones
    pub fn parse_statements(&self, input: &str) -> Vec<Statement> {
        let parser = Self::statement_parser();
        input
            .lines()
            .filter_map(|line| parser.parse(line).into_result().ok())
            .collect()
    }

    fn statement_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        let link = inline_whitespace()
            .then(Self::arrow_parser())
            .then(inline_whitespace())
            .ignore_then(Self::endpoint_parser());

        inline_whitespace()
            .ignore_then(Self::endpoint_parser())
            .then(link.repeated().collect::<Vec<_>>())
            .then_ignore(rest_of_input())
            .map(|(head, links)| Statement { head, links })
    }

    fn endpoint_parser<'src>() -> impl Parser<'src, &'src str, Endpoint> + Clone {
        word_identifier()
            .then(
                inline_whitespace()
                    .ignore_then(Self::label_parser())
                    .or_not(),
            )
            .map(|(id, label)| Endpoint { id, label })
            .labelled("endpoint")
    }

    /// Parse `["label"]`, yielding the trimmed label
    fn label_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        just("[\"")
            .ignore_then(none_of("\"\n").repeated().at_least(1).collect::<String>())
            .then_ignore(just("\"]"))
            .map(|label| label.trim().to_string())
            .labelled("label")
    }

    /// Parse one to four of `-`, `.`, `=` followed by `>`
    fn arrow_parser<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
        one_of("-.=")
            .repeated()
            .at_least(1)
            .at_most(4)
            .then(just('>'))
            .ignored()
            .labelled("arrow")
    }
}
