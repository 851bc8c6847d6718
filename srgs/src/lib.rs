#![deny(warnings)]

//! Loads SRGS/ABNF-style grammar files:
//!
//! ```text
//! #ABNF V1.0 utf-8;
//! language en;
//! public $S = $NP $VP;     // the public rule marks the start symbol
//! $NP = I;
//! ```
//!
//! Rule lines are `$Lhs = sym sym ... ;` with a `$` sigil marking
//! non-terminals. Alternatives are spelled as separate rule lines.

use cyk::{Grammar, GrammarBuilder};

/// Parse grammar file text into a `Grammar`. This is the boundary that
/// rejects malformed raw input; symbol interning itself never fails.
pub fn parse_grammar(text: &str) -> Result<Grammar, String> {
    let mut lines = text.lines()
        .map(|line| match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty());

    match lines.next() {
        Some(header) if header.eq_ignore_ascii_case("#abnf v1.0 utf-8;") => (),
        Some(header) => return Err(format!("Bad SRGS header: {}", header)),
        None => return Err("Bad SRGS header: empty input".to_string()),
    }
    match lines.next() {
        Some(line) if language_tag(line).is_some() => (),
        Some(line) => return Err(format!("Bad language tag: {}", line)),
        None => return Err("Bad language tag: missing".to_string()),
    }

    let mut builder = GrammarBuilder::default();
    let mut start = None;
    for line in lines {
        let (public, lhs, rhs) = rule_parts(line)
            .ok_or_else(|| format!("Cannot parse rule: {}", line))?;
        // Files repeating a production aren't worth failing the load
        builder.quiet_rule(lhs, &rhs);
        if public {
            // last public rule wins
            start = Some(lhs.to_string());
        }
    }
    let start = start.ok_or("No public rule found".to_string())?;
    builder.into_grammar(start)
}

fn language_tag(line: &str) -> Option<&str> {
    let rest = line.strip_suffix(';')?;
    let (keyword, tag) = rest.split_once(char::is_whitespace)?;
    if !keyword.eq_ignore_ascii_case("language") {
        return None;
    }
    let tag = tag.trim();
    if tag.is_empty() { None } else { Some(tag) }
}

// `[public] $Lhs = sym sym ... ;`
fn rule_parts(line: &str) -> Option<(bool, &str, Vec<&str>)> {
    let rest = line.strip_suffix(';')?;
    let (lhs, rhs) = rest.split_once('=')?;
    let mut lhs = lhs.trim();
    let public = match lhs.strip_prefix("public") {
        Some(stripped) => {
            lhs = stripped.trim_start();
            true
        }
        None => false,
    };
    if !lhs.starts_with('$') || lhs.len() < 2 || lhs.contains(char::is_whitespace) {
        return None;
    }
    let rhs: Vec<&str> = rhs.split_whitespace().collect();
    if rhs.is_empty() {
        return None;
    }
    Some((public, lhs, rhs))
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::parse_grammar;
    use cyk::CykParser;

    const TELESCOPE: &str = "
        #ABNF V1.0 utf-8;
        language en;

        public $S = $NP $VP;
        $NP = I;
        $NP = $Det $N;       // noun phrases
        $Det = the;
        $Det = a;
        $N = duck;
        $N = telescope;
        $VP = $VP $PP;
        $VP = $V $NP;
        $V = saw;
        $NP = $NP $PP;
        $PP = $P $NP;
        $P = with;
    ";

    #[test]
    fn loads_telescope_grammar() {
        let grammar = parse_grammar(TELESCOPE).unwrap();
        assert_eq!(grammar.rules.len(), 13);
        assert_eq!(grammar.start_symbol().name(), "S");
        assert!(grammar.is_cnf());
    }

    #[test]
    fn loaded_grammar_parses() {
        let parser = CykParser::new(parse_grammar(TELESCOPE).unwrap()).unwrap();
        let tokens: Vec<&str> =
            "I saw the duck with a telescope".split_whitespace().collect();
        assert_eq!(parser.parse_all(&tokens).len(), 2);
        assert!(!parser.is_member(&["duck", "saw", "I"]));
    }

    #[test]
    fn bad_header() {
        let err = parse_grammar("language en;\npublic $S = x;").unwrap_err();
        assert_eq!(err, "Bad SRGS header: language en;");
        let err = parse_grammar("").unwrap_err();
        assert_eq!(err, "Bad SRGS header: empty input");
    }

    #[test]
    fn bad_language_tag() {
        let err = parse_grammar("#ABNF V1.0 utf-8;\npublic $S = x;").unwrap_err();
        assert_eq!(err, "Bad language tag: public $S = x;");
        let err = parse_grammar("#ABNF V1.0 utf-8;\nlanguage ;\n").unwrap_err();
        assert_eq!(err, "Bad language tag: language ;");
    }

    #[test]
    fn bad_rule_lines() {
        let header = "#ABNF V1.0 utf-8;\nlanguage en;\n";
        // missing semicolon
        let err = parse_grammar(&format!("{}public $S = x\n", header)).unwrap_err();
        assert_eq!(err, "Cannot parse rule: public $S = x");
        // terminal on the left-hand side
        let err = parse_grammar(&format!("{}public S = x;\n", header)).unwrap_err();
        assert_eq!(err, "Cannot parse rule: public S = x;");
        // empty right-hand side
        let err = parse_grammar(&format!("{}public $S = ;\n", header)).unwrap_err();
        assert_eq!(err, "Cannot parse rule: public $S = ;");
    }

    #[test]
    fn no_public_rule() {
        let err = parse_grammar("#ABNF V1.0 utf-8;\nlanguage en;\n$S = x;")
            .unwrap_err();
        assert_eq!(err, "No public rule found");
    }

    #[test]
    fn last_public_rule_wins() {
        let grammar = parse_grammar("
            #ABNF V1.0 utf-8;
            language en;
            public $S = x;
            public $T = y;
        ").unwrap();
        assert_eq!(grammar.start_symbol().name(), "T");
    }

    #[test]
    fn duplicate_rule_tolerated() {
        let grammar = parse_grammar("
            #ABNF V1.0 utf-8;
            language en;
            public $S = x;
            public $S = x;
        ").unwrap();
        assert_eq!(grammar.rules.len(), 1);
    }
}
