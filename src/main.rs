//! `leadsheet` - turn OCR results of a lead sheet into a Nashville chord chart.
//!
//! Usage:
//!   `leadsheet --key G [--title "Amazing Grace"] [--author NAME]... [--threshold PX]
//!              [--alignment line|nearest] [NAME=]ocr.json...`
//!
//! Each input file is one selected region of the sheet; its section name is
//! `NAME` if given, otherwise the file stem. The chart is printed as JSON.

use std::path::{Path, PathBuf};

use leadsheet::config::{parse_threshold, Config};
use leadsheet::error::{Error, Result};
use leadsheet::ocr::load_ocr_file;
use leadsheet::{analyze_sections, ChartHeader, SectionRequest, SongChart};

const USAGE_HINT: &str =
    "Usage: leadsheet --key KEY [--title T] [--author A]... [--threshold PX] [--alignment line|nearest] [NAME=]ocr.json...";

#[derive(Debug, Default)]
struct Args {
    key: Option<String>,
    title: Option<String>,
    authors: Vec<String>,
    threshold: Option<String>,
    alignment: Option<String>,
    inputs: Vec<(String, PathBuf)>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| Error::config(format!("{flag} needs a value"), USAGE_HINT))
        };
        match arg.as_str() {
            "--key" | "-k" => parsed.key = Some(value("--key")?),
            "--title" | "-t" => parsed.title = Some(value("--title")?),
            "--author" | "-a" => parsed.authors.push(value("--author")?),
            "--threshold" => parsed.threshold = Some(value("--threshold")?),
            "--alignment" => parsed.alignment = Some(value("--alignment")?),
            flag if flag.starts_with('-') => {
                return Err(Error::config(format!("unknown option {flag}"), USAGE_HINT));
            }
            input => parsed.inputs.push(section_input(input)),
        }
    }

    if parsed.inputs.is_empty() {
        return Err(Error::config("no OCR input files given", USAGE_HINT));
    }
    Ok(parsed)
}

/// `Verse 1=verse.json` names the section; a bare path uses its file stem.
fn section_input(arg: &str) -> (String, PathBuf) {
    if let Some((name, path)) = arg.split_once('=') {
        if !name.is_empty() && !path.is_empty() {
            return (name.to_string(), PathBuf::from(path));
        }
    }
    let path = PathBuf::from(arg);
    let name = Path::new(arg)
        .file_stem()
        .map_or_else(|| arg.to_string(), |s| s.to_string_lossy().into_owned());
    (name, path)
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let mut config = Config::load()?;
    if let Some(threshold) = &args.threshold {
        config.y_threshold = parse_threshold(threshold)?;
    }
    if let Some(alignment) = &args.alignment {
        config.alignment = alignment.parse()?;
    }

    let key = args
        .key
        .ok_or_else(|| Error::config("the song key is required", "Pass --key, e.g. --key G"))?;
    let lexicon = config.lexicon()?;
    if !lexicon.contains_key(&key) {
        return Err(Error::config(
            format!("key {key:?} is not in the chord lexicon (known: {})", lexicon.key_names().join(", ")),
            "Use one of the listed key names",
        ));
    }

    let requests = args
        .inputs
        .iter()
        .map(|(name, path)| load_ocr_file(path).map(|page| SectionRequest::new(name.clone(), key.clone(), page)))
        .collect::<Result<Vec<_>>>()?;

    let sections = analyze_sections(&requests, &lexicon, &config.analysis_options());

    let mut chart = SongChart::new(ChartHeader { name: args.title, key: Some(key), authors: args.authors });
    chart.extend(sections);
    println!("{}", chart.to_json_pretty()?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
