#![deny(warnings)]

use crate::chart::Chart;
use crate::grammar::Grammar;
use crate::trees::{self, ParseTree};

/// Parser for grammars in Chomsky normal form. Construction gates on the
/// CNF check so chart building never has to deal with other rule shapes.
#[derive(Debug)]
pub struct CykParser {
    grammar: Grammar,
}

impl CykParser {
    pub fn new(grammar: Grammar) -> Result<CykParser, String> {
        if let Some(rule) = grammar.rules.iter().find(|rule| !rule.is_cnf()) {
            return Err(format!("Grammar not in CNF: {}", rule));
        }
        Ok(CykParser{grammar})
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Membership only: does the start symbol derive the token sequence.
    /// Empty input is never a member.
    pub fn is_member<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        Chart::build(tokens, &self.grammar).accepts(&self.grammar)
    }

    /// Every distinct derivation of the full input, empty if not a member.
    /// Repeated calls on the same input return the same trees in the same
    /// order.
    pub fn parse_all<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<ParseTree> {
        let chart = Chart::build(tokens, &self.grammar);
        trees::reconstruct(&chart, &self.grammar, tokens)
    }
}
