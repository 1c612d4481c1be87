// semcache-tag: Tag text with the technology keywords it mentions.
//
// Reads text from stdin and prints every keyword found as a whole word,
// one per line in sorted order.
//
// Usage:
//   semcache-tag [-v VOCAB_PATH] [--strict] [--positions]
//
// Options:
//   -v, --vocabulary PATH   Word list to use instead of the built-in one
//   --strict                Fail on characters outside the vocabulary alphabet
//   --positions             Print every occurrence with its character offsets
//   -h, --help              Print help

use std::io::{self, Read, Write};

fn main() {
    semcache_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (vocabulary, args) = semcache_cli::take_option(&args, "--vocabulary", "-v")
        .unwrap_or_else(|e| semcache_cli::fatal(&e));
    let (strict, args) = semcache_cli::take_flag(&args, "--strict");
    let (positions, args) = semcache_cli::take_flag(&args, "--positions");

    if semcache_cli::wants_help(&args) {
        println!("semcache-tag: Tag text with technology keywords.");
        println!();
        println!("Usage: semcache-tag [-v VOCAB_PATH] [--strict] [--positions]");
        println!();
        println!("Reads text from stdin and prints matched keywords, one per line.");
        println!("The vocabulary is taken from -v, then $SEMCACHE_VOCABULARY,");
        println!("then the built-in technology list.");
        println!();
        println!("Options:");
        println!("  -v, --vocabulary PATH   Word list, one keyword per line");
        println!("  --strict                Fail on characters outside the alphabet");
        println!("  --positions             Print start, end and keyword per occurrence");
        println!("  -h, --help              Print this help");
        return;
    }

    if let Some(extra) = args.first() {
        semcache_cli::fatal(&format!("unexpected argument: {extra}"));
    }

    let automaton = semcache_cli::load_automaton(vocabulary.as_deref())
        .unwrap_or_else(|e| semcache_cli::fatal(&e));

    let mut text = String::new();
    if let Err(e) = io::stdin().lock().read_to_string(&mut text) {
        semcache_cli::fatal(&format!("error reading stdin: {e}"));
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if positions {
        if strict {
            automaton
                .alphabet()
                .check(&text)
                .unwrap_or_else(|e| semcache_cli::fatal(&e.to_string()));
        }
        for m in automaton.find_matches(&text) {
            let _ = writeln!(out, "{}\t{}\t{}", m.start, m.end, m.keyword);
        }
        return;
    }

    let keywords = if strict {
        automaton
            .search_strict(&text)
            .unwrap_or_else(|e| semcache_cli::fatal(&e.to_string()))
    } else {
        automaton.search(&text)
    };
    for keyword in keywords {
        let _ = writeln!(out, "{keyword}");
    }
}
