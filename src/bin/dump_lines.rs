//! Debug tool to dump how a region's OCR tokens are clustered and classified.
//!
//! Usage:
//!   `cargo run --bin dump_lines -- <ocr.json> <key> [--threshold PX] [--json]`
//!
//! Prints every line with its tag, tokens and geometry, which is the quickest
//! way to see why a chord ended up on the wrong lyric offset.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::env;
use std::path::Path;

use leadsheet::analysis::section_lines;
use leadsheet::config::{parse_threshold, Config};
use leadsheet::layout::{classify, ClassifiedLine};
use leadsheet::ocr::load_ocr_file;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <ocr.json> <key> [--threshold PX] [--json]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let key = &args[2];

    // Same settings as the `leadsheet` binary (.env, LEADSHEET_* variables).
    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    if let Some(value) = args.iter().position(|a| a == "--threshold").and_then(|i| args.get(i + 1)) {
        config.y_threshold = parse_threshold(value).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });
    }
    let lexicon = config.lexicon().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let options = config.analysis_options();

    let page = load_ocr_file(path).unwrap_or_else(|e| {
        eprintln!("Failed to load {}: {e}", path.display());
        std::process::exit(1);
    });

    let lines = section_lines(&page, &options);
    let classified: Vec<ClassifiedLine> = lines.iter().map(|l| classify(l, &page, key, &lexicon)).collect();

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&classified).unwrap());
        return;
    }

    println!(
        "{} tokens, {} lines (threshold {}px, key {key}, markers {})",
        page.len(),
        lines.len(),
        options.y_threshold,
        if options.skip_section_markers { "skipped" } else { "kept" }
    );
    for (i, (line, tagged)) in lines.iter().zip(&classified).enumerate() {
        let y = line
            .tokens
            .first()
            .and_then(|&id| page.get(id))
            .map_or(0.0, |t| t.bbox.center_y());
        println!("\n── line {i} ({:?}, y≈{y:.0}) ──", tagged.kind());
        match tagged {
            ClassifiedLine::Chords(chords) => {
                for slot in &chords.chords {
                    let number = slot.chord.map_or_else(|| "?".to_string(), |c| c.to_string());
                    println!("  {:>6}  x={:>7.1}  {:<6} → {number}", slot.id.to_string(), slot.avg_x, slot.text);
                }
            }
            ClassifiedLine::Lyrics(lyrics) => {
                for word in &lyrics.words {
                    println!(
                        "  {:>6}  x={:>7.1}  w={:>6.1}  {}",
                        word.id.to_string(),
                        word.start_x,
                        word.avg_width,
                        word.text
                    );
                }
                println!("  text: {:?}", lyrics.text());
            }
        }
    }
}
