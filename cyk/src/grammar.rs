#![deny(warnings)]

use std::collections::HashMap;
use std::rc::Rc;
use std::fmt;

/// Grammar symbols. Terminals match literal input tokens, non-terminals are
/// expanded by further rules. In raw (file) form a leading `$` sigil marks a
/// non-terminal, eg: `$NP` vs `saw`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    NonTerm(String),
    Term(String),
}

/// An ordered rewrite of a non-terminal `head` into the `spec` sequence.
#[derive(PartialEq)]
pub struct Rule {
    pub head: Rc<Symbol>,
    pub spec: Vec<Rc<Symbol>>,
}

#[derive(Clone, Debug)]
pub struct Grammar {
    pub start: Rc<Symbol>,
    pub rules: Vec<Rc<Rule>>,
    // Derived lookup from an RHS pattern to the rules producing it. Built
    // once at finalization; `rules` stays the source of truth.
    rhs_index: HashMap<Vec<Rc<Symbol>>, Vec<Rc<Rule>>>,
}

/// Interns raw symbol names so repeated mentions share one `Rc<Symbol>`.
/// Scoped to a single builder/grammar, never global.
#[derive(Default, Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, Rc<Symbol>>,
}

#[derive(Default)]
pub struct GrammarBuilder {
    symbols: SymbolTable,
    rules: Vec<Rc<Rule>>,
    error: Option<String>,
}


impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerm(name) => name,
            Symbol::Term(name) => name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Term(_))
    }

    /// Terminals match exactly their own name against an input token.
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Symbol::Term(name) => name == token,
            Symbol::NonTerm(_) => false,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Term(name) => write!(f, "Term({})", name),
            Symbol::NonTerm(name) => write!(f, "NonTerm({})", name),
        }
    }
}

// Raw sigil form, round-trips with SymbolTable::intern
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Term(name) => write!(f, "{}", name),
            Symbol::NonTerm(name) => write!(f, "${}", name),
        }
    }
}

impl Rule {
    /// A rule fits Chomsky normal form iff it rewrites into exactly one
    /// terminal or exactly two non-terminals.
    pub fn is_cnf(&self) -> bool {
        match self.spec.as_slice() {
            [sym] => sym.is_terminal(),
            [left, right] => !left.is_terminal() && !right.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let spec = self.spec.iter()
            .map(|s| s.to_string()).collect::<Vec<_>>().join(" ");
        write!(f, "{} -> {}", self.head, spec)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl SymbolTable {
    /// Map a raw name to its unique `Rc<Symbol>`, creating it on first sight.
    /// A leading `$` denotes a non-terminal and is stripped from the name.
    /// Raw-name validation (eg: rejecting empty names) is the caller's job.
    pub fn intern(&mut self, raw: &str) -> Rc<Symbol> {
        if let Some(sym) = self.symbols.get(raw) {
            return sym.clone();
        }
        let sym = match raw.strip_prefix('$') {
            Some(name) => Rc::new(Symbol::NonTerm(name.to_string())),
            None => Rc::new(Symbol::Term(raw.to_string())),
        };
        self.symbols.insert(raw.to_string(), sym.clone());
        sym
    }

    pub fn get(&self, raw: &str) -> Option<&Rc<Symbol>> {
        self.symbols.get(raw)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Grammar {
    fn new(start: Rc<Symbol>, rules: Vec<Rc<Rule>>) -> Grammar {
        let mut rhs_index: HashMap<Vec<Rc<Symbol>>, Vec<Rc<Rule>>> = HashMap::new();
        for rule in &rules {
            rhs_index.entry(rule.spec.clone()).or_default().push(rule.clone());
        }
        Grammar{start, rules, rhs_index}
    }

    pub fn start_symbol(&self) -> &Rc<Symbol> {
        &self.start
    }

    /// Exact-match lookup of rules by RHS pattern. Insertion order preserved,
    /// empty on a miss.
    pub fn rules_producing(&self, pattern: &[Rc<Symbol>]) -> &[Rc<Rule>] {
        self.rhs_index.get(pattern).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff every rule is unit-terminal or binary-nonterminal. The chart
    /// builder assumes this holds; gate on it before parsing.
    pub fn is_cnf(&self) -> bool {
        self.rules.iter().all(|rule| rule.is_cnf())
    }
}

/// Builds a Grammar while interning symbols and checking rules.
impl GrammarBuilder {
    fn add_rule<S, S2>(&mut self, head: S, spec: &[S2], quiet: bool)
        where S: AsRef<str>, S2: AsRef<str>
    {
        let head = head.as_ref();
        // Heads must name a non-terminal, the RHS takes either kind
        if !head.starts_with('$') {
            self.error = Some(format!("Terminal head: {}", head));
            return;
        }
        if let Some(bad) = std::iter::once(head)
            .chain(spec.iter().map(|s| s.as_ref()))
            .find(|name| name.is_empty() || *name == "$")
        {
            self.error = Some(format!("Empty Symbol: {:?}", bad));
            return;
        }
        let rule = Rc::new(Rule{
            head: self.symbols.intern(head),
            spec: spec.iter().map(|s| self.symbols.intern(s.as_ref())).collect(),
        });
        // Check this rule is only added once. NOTE: `Rc`s equal on inner value
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        } else if !quiet {
            self.error = Some(format!("Duplicate Rule: {}", rule));
        }
    }

    pub fn rule<S, S2>(mut self, head: S, spec: &[S2]) -> Self
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_rule(head, spec, false);
        self
    }

    // Quiet version silently ignores re-added rules (eg: loaders fed files
    // that repeat productions). Doesn't chain so it can be invoked in loops.
    pub fn quiet_rule<S, S2>(&mut self, head: S, spec: &[S2])
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_rule(head, spec, true)
    }

    pub fn into_grammar(self, start: impl AsRef<str>) -> Result<Grammar, String> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let start = start.as_ref();
        match self.symbols.get(start) {
            Some(sym) if !sym.is_terminal() =>
                Ok(Grammar::new(sym.clone(), self.rules)),
            Some(_) => Err(format!("Terminal start: {}", start)),
            None => Err(format!("Missing Symbol: {}", start)),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
