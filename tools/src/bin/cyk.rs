use cyk::CykParser;

fn parse_sentence(parser: &CykParser, sentence: &str) {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    let trees = parser.parse_all(&tokens);
    if trees.is_empty() {
        println!("Not in language: {}", sentence);
        return;
    }
    println!("{} derivation(s)", trees.len());
    for tree in &trees {
        println!("{}", tree);
        tree.print();
    }
}

fn main() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let grammar_file = args.next()
        .ok_or("usage: cyk <grammar.srgs> [sentence ...]".to_string())?;
    let text = std::fs::read_to_string(&grammar_file)
        .map_err(|e| format!("{}: {}", grammar_file, e))?;
    let parser = CykParser::new(srgs::parse_grammar(&text)?)?;

    let sentence = args.collect::<Vec<String>>().join(" ");
    if !sentence.is_empty() {
        parse_sentence(&parser, &sentence);
    } else {
        let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
        while let Ok(line) = rl.readline(">> ") {
            rl.add_history_entry(&line).map_err(|e| e.to_string())?;
            parse_sentence(&parser, &line);
        }
    }
    Ok(())
}
