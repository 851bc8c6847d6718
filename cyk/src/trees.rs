#![deny(warnings)]

use crate::chart::Chart;
use crate::grammar::{Grammar, Symbol};
use std::fmt;
use std::rc::Rc;

/// A derivation witness. Leaves pair a terminal with the token it consumed;
/// nodes carry a rule head over one (unit rule) or two (binary rule)
/// children. Decided at construction, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseTree {
    Leaf(Rc<Symbol>, String),
    Node(Rc<Symbol>, Vec<ParseTree>),
}

impl ParseTree {
    pub fn symbol(&self) -> &Rc<Symbol> {
        match self {
            ParseTree::Leaf(sym, _) => sym,
            ParseTree::Node(sym, _) => sym,
        }
    }

    /// Tokens at the leaves, left to right. Reproduces the parsed input.
    pub fn leaf_tokens(&self) -> Vec<&str> {
        match self {
            ParseTree::Leaf(_, token) => vec![token.as_str()],
            ParseTree::Node(_, children) =>
                children.iter().flat_map(|c| c.leaf_tokens()).collect(),
        }
    }

    pub fn print(&self) {
        self.print_helper("")
    }

    fn print_helper(&self, level: &str) {
        match self {
            ParseTree::Leaf(sym, token) => {
                println!("{}`-- {:?} ==> {:?}", level, sym, token);
            },
            ParseTree::Node(sym, children) => {
                println!("{}`-- {:?}", level, sym);
                if let Some((last, rest)) = children.split_last() {
                    let l = format!("{}  |", level);
                    for child in rest { child.print_helper(&l); }
                    let l = format!("{}   ", level);
                    last.print_helper(&l);
                }
            }
        }
    }
}

// Bracketed form, eg: $S[$NP[I] $VP[$V[saw] $NP[the]]]
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseTree::Leaf(_, token) => write!(f, "{}", token),
            ParseTree::Node(sym, children) => {
                write!(f, "{}[", sym)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 { write!(f, " ")?; }
                    write!(f, "{}", child)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Materialize every derivation of the full input rooted at the start
/// symbol. Empty when the final cell lacks the start symbol. Ordering is
/// stable: split point ascending, then rule insertion order, left subtree
/// major within a rule.
pub fn reconstruct<S: AsRef<str>>(
    chart: &Chart,
    grammar: &Grammar,
    tokens: &[S],
) -> Vec<ParseTree> {
    debug_assert_eq!(chart.input_len(), tokens.len());
    let n = tokens.len();
    if n == 0 || !chart.cell(0, n).contains(&**grammar.start_symbol()) {
        return Vec::new();
    }
    trees_over(chart, grammar, tokens, 0, n, grammar.start_symbol())
}

// Re-derives the chart's span/rule matching backwards. Only called for a
// `symbol` present in cell (start, end), so some rule always fires.
fn trees_over<S: AsRef<str>>(
    chart: &Chart,
    grammar: &Grammar,
    tokens: &[S],
    start: usize,
    end: usize,
    symbol: &Rc<Symbol>,
) -> Vec<ParseTree> {
    // Length-1 spans are reachable through unit rules alone: a binary rule
    // has no valid split point there.
    if end - start == 1 {
        let token = tokens[start].as_ref();
        let pattern = [Rc::new(Symbol::Term(token.to_string()))];
        return grammar.rules_producing(&pattern).iter()
            .filter(|rule| rule.head == *symbol)
            .map(|rule| ParseTree::Node(
                rule.head.clone(),
                vec![ParseTree::Leaf(rule.spec[0].clone(), token.to_string())],
            ))
            .collect();
    }
    let mut trees = Vec::new();
    for mid in (start + 1)..end {
        for rule in &grammar.rules {
            if rule.head != *symbol {
                continue;
            }
            let [left, right] = rule.spec.as_slice() else { continue };
            if chart.cell(start, mid).contains(&**left)
                && chart.cell(mid, end).contains(&**right)
            {
                // Every (left, right) subtree combination is a distinct
                // derivation; ambiguity is preserved, not collapsed.
                let left_trees = trees_over(chart, grammar, tokens, start, mid, left);
                let right_trees = trees_over(chart, grammar, tokens, mid, end, right);
                for lt in &left_trees {
                    for rt in &right_trees {
                        trees.push(ParseTree::Node(
                            rule.head.clone(),
                            vec![lt.clone(), rt.clone()],
                        ));
                    }
                }
            }
        }
    }
    trees
}

///////////////////////////////////////////////////////////////////////////////
