#![deny(warnings)]

mod grammar;
pub use crate::grammar::{Grammar, GrammarBuilder, Rule, Symbol, SymbolTable};

mod chart;
pub use crate::chart::Chart;

mod trees;
pub use crate::trees::{ParseTree, reconstruct};

mod parser;
pub use crate::parser::CykParser;
