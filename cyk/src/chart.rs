#![deny(warnings)]

use crate::grammar::{Grammar, Symbol};
use std::collections::HashSet;
use std::rc::Rc;

/// Triangular recognition table over input spans. Cell (start, end) holds
/// every symbol known to derive exactly tokens[start..end]. Immutable once
/// built; tree reconstruction only reads it.
pub struct Chart {
    n: usize,
    // rows[start] covers spans (start, start+1) .. (start, n)
    rows: Vec<Vec<HashSet<Rc<Symbol>>>>,
}

impl Chart {
    /// Bottom-up span dynamic programming (the CYK method). Assumes the
    /// grammar is in CNF; unknown tokens simply leave their cells empty and
    /// the input gets rejected downstream.
    pub fn build<S: AsRef<str>>(tokens: &[S], grammar: &Grammar) -> Chart {
        let n = tokens.len();
        let mut rows: Vec<Vec<HashSet<Rc<Symbol>>>> = (0..n)
            .map(|start| vec![HashSet::new(); n - start])
            .collect();

        // Seed length-1 spans from unit rules matching each token
        for (i, token) in tokens.iter().enumerate() {
            let pattern = [Rc::new(Symbol::Term(token.as_ref().to_string()))];
            for rule in grammar.rules_producing(&pattern) {
                rows[i][0].insert(rule.head.clone());
            }
        }

        // Longer spans only ever form by binary composition: for every split
        // point, a binary rule fires iff its RHS symbols cover the sub-spans.
        for length in 2..=n {
            for start in 0..=(n - length) {
                let end = start + length;
                for mid in (start + 1)..end {
                    for rule in &grammar.rules {
                        if let [left, right] = rule.spec.as_slice() {
                            if rows[start][mid - start - 1].contains(left)
                                && rows[mid][end - mid - 1].contains(right)
                            {
                                rows[start][end - start - 1].insert(rule.head.clone());
                            }
                        }
                    }
                }
            }
        }

        let chart = Chart{n, rows};
        if cfg!(feature="debug") {
            chart.dump();
        }
        chart
    }

    /// Number of input tokens the chart was built over.
    pub fn input_len(&self) -> usize {
        self.n
    }

    /// Symbols deriving exactly the span [start, end). 0 <= start < end <= n.
    pub fn cell(&self, start: usize, end: usize) -> &HashSet<Rc<Symbol>> {
        &self.rows[start][end - start - 1]
    }

    /// The input is in the language iff the start symbol covers the full
    /// span. Empty input has no derivation since CNF admits no epsilon rules.
    pub fn accepts(&self, grammar: &Grammar) -> bool {
        self.n > 0 && self.cell(0, self.n).contains(&**grammar.start_symbol())
    }

    fn dump(&self) {
        for start in 0..self.n {
            for end in (start + 1)..=self.n {
                eprintln!("({}, {}): {:?}", start, end, self.cell(start, end));
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Chart;
    use crate::grammar::{Grammar, GrammarBuilder, Symbol};

    fn toy_grammar() -> Grammar {
        GrammarBuilder::default()
            .rule("$S", &["$NP", "$VP"])
            .rule("$NP", &["I"])
            .rule("$VP", &["$V", "$NP"])
            .rule("$V", &["saw"])
            .rule("$NP", &["the"])
            .into_grammar("$S")
            .unwrap()
    }

    #[test]
    fn seeds_unit_spans() {
        let g = toy_grammar();
        let chart = Chart::build(&["I", "saw", "the"], &g);
        assert!(chart.cell(0, 1).contains(&Symbol::NonTerm("NP".to_string())));
        assert!(chart.cell(1, 2).contains(&Symbol::NonTerm("V".to_string())));
        assert!(chart.cell(2, 3).contains(&Symbol::NonTerm("NP".to_string())));
        assert_eq!(chart.input_len(), 3);
    }

    #[test]
    fn composes_binary_spans() {
        let g = toy_grammar();
        let chart = Chart::build(&["I", "saw", "the"], &g);
        // (1, 3) = $V . $NP, (0, 3) = $NP . $VP
        assert!(chart.cell(1, 3).contains(&Symbol::NonTerm("VP".to_string())));
        assert!(chart.cell(0, 3).contains(&Symbol::NonTerm("S".to_string())));
        assert!(chart.accepts(&g));
        // no terminal ever lands in a cell, only rule heads do
        assert!(chart.cell(0, 1).iter().all(|sym| !sym.is_terminal()));
    }

    #[test]
    fn rejects_out_of_order() {
        let g = toy_grammar();
        let chart = Chart::build(&["saw", "I"], &g);
        assert!(!chart.accepts(&g));
        assert!(chart.cell(0, 2).is_empty());
    }

    #[test]
    fn unknown_token_leaves_cell_empty() {
        let g = toy_grammar();
        let chart = Chart::build(&["I", "saw", "ducks"], &g);
        assert!(chart.cell(2, 3).is_empty());
        assert!(!chart.accepts(&g));
    }

    #[test]
    fn empty_input_rejected() {
        let g = toy_grammar();
        let tokens: [&str; 0] = [];
        let chart = Chart::build(&tokens, &g);
        assert_eq!(chart.input_len(), 0);
        assert!(!chart.accepts(&g));
    }

    #[test]
    fn single_token_needs_unit_rule() {
        let g = toy_grammar();
        assert!(!Chart::build(&["I"], &g).accepts(&g));
        let g = GrammarBuilder::default()
            .rule("$S", &["go"])
            .into_grammar("$S")
            .unwrap();
        assert!(Chart::build(&["go"], &g).accepts(&g));
        assert!(!Chart::build(&["go", "go"], &g).accepts(&g));
    }
}
