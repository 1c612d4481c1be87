// semcache-dedup: Find a near-duplicate of a prompt among earlier prompts.
//
// Reads candidate prompts from stdin (one per line) and prints the line
// number and score of the first candidate at or above the threshold, or
// `no match`.
//
// Usage:
//   semcache-dedup [-t THRESHOLD] [--best] PROMPT
//
// Options:
//   -t, --threshold VALUE   Similarity threshold in (0, 1] (default 0.8)
//   --best                  Print the highest-scoring line instead
//   -h, --help              Print help

use std::io::{self, BufRead};

use semcache_similarity::{PromptMatcher, WordFrequency, calculate_similarity};

fn main() {
    semcache_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (threshold, args) = semcache_cli::take_option(&args, "--threshold", "-t")
        .unwrap_or_else(|e| semcache_cli::fatal(&e));
    let (best, args) = semcache_cli::take_flag(&args, "--best");

    if semcache_cli::wants_help(&args) {
        println!("semcache-dedup: Find a near-duplicate prompt.");
        println!();
        println!("Usage: semcache-dedup [-t THRESHOLD] [--best] PROMPT");
        println!();
        println!("Reads candidate prompts from stdin (one per line) and prints");
        println!("\"LINE SCORE\" for the first near-duplicate, or \"no match\".");
        println!();
        println!("Options:");
        println!("  -t, --threshold VALUE   Similarity threshold in (0, 1] (default 0.8)");
        println!("  --best                  Print the highest-scoring line instead");
        println!("  -h, --help              Print this help");
        return;
    }

    let prompt = match args.as_slice() {
        [prompt] => prompt.as_str(),
        [] => semcache_cli::fatal("missing PROMPT argument"),
        _ => semcache_cli::fatal("expected exactly one PROMPT argument"),
    };

    let matcher = match threshold {
        Some(raw) => {
            let value: f64 = raw
                .parse()
                .unwrap_or_else(|_| semcache_cli::fatal(&format!("invalid threshold: {raw}")));
            PromptMatcher::with_threshold(value)
                .unwrap_or_else(|e| semcache_cli::fatal(&e.to_string()))
        }
        None => PromptMatcher::new(),
    };

    let lines = io::stdin().lock().lines();
    let numbered = lines.enumerate().map(|(i, line)| line.map(|l| (i + 1, l)));

    let hit = if best {
        matcher.try_best_match(prompt, numbered)
    } else {
        let input = WordFrequency::from_text(prompt);
        let candidates = numbered.map(|row| row.map(|(n, text)| ((n, text.clone()), text)));
        matcher
            .try_find_near_duplicate(prompt, candidates)
            .map(|hit| hit.map(|(n, text)| (n, calculate_similarity(&input, &text))))
    }
    .unwrap_or_else(|e| semcache_cli::fatal(&format!("error reading stdin: {e}")));

    match hit {
        Some((line, score)) => println!("{line} {score:.4}"),
        None => println!("no match"),
    }
}
