//! End-to-end tests: OCR JSON in, chord chart out.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use leadsheet::chords::{is_chord, normalize};
use leadsheet::layout::{cluster_page, line_kind, AlignmentStrategy, LineKind};
use leadsheet::ocr::parse_ocr_json;
use leadsheet::{analyze_section, AnalysisOptions, BoundingBox, ChartHeader, ChordLexicon, OcrPage, OcrToken, SongChart};

/// "G  Em" above "Amazing grace", as EasyOCR reports it (lyrics first, chords later).
const AMAZING_GRACE: &str = r#"[
    [[[0, 42], [140, 42], [140, 62], [0, 62]], "Amazing", 0.93],
    [[[160, 41], [260, 41], [260, 61], [160, 61]], "grace", 0.95],
    [[[8, 2], [22, 2], [22, 20], [8, 20]], "G", 0.99],
    [[[198, 1], [224, 1], [224, 21], [198, 21]], "Em", 0.97]
]"#;

fn token(text: &str, left: f64, top: f64, right: f64) -> OcrToken {
    OcrToken::new(BoundingBox::from_edges(left, top, right, top + 18.0), text, 0.9)
}

#[test]
fn amazing_grace_in_g() {
    let page = parse_ocr_json(AMAZING_GRACE).unwrap();
    let lexicon = ChordLexicon::bundled();

    let lines = cluster_page(&page, 10.0);
    assert_eq!(lines.len(), 2);
    assert_eq!(line_kind(&lines[0], &page), LineKind::Chords);
    assert_eq!(line_kind(&lines[1], &page), LineKind::Lyrics);

    let section = analyze_section(&page, "G", "Verse 1", lexicon, &AnalysisOptions::default());
    assert_eq!(section.lines.len(), 1);
    let line = &section.lines[0];
    assert_eq!(line.lyrics, "Amazing grace");

    let numbers: Vec<String> = line.chords.values().map(ToString::to_string).collect();
    assert_eq!(numbers, vec!["1", "-6"]);
    let len = line.lyrics.chars().count();
    assert!(line.chords.keys().all(|&offset| offset < len));
}

#[test]
fn nearest_token_strategy_on_the_same_sheet() {
    let page = parse_ocr_json(AMAZING_GRACE).unwrap();
    let options = AnalysisOptions { alignment: AlignmentStrategy::NearestToken, ..AnalysisOptions::default() };
    let section = analyze_section(&page, "G", "Verse 1", ChordLexicon::bundled(), &options);

    // G sits 15px into "Amazing" (140px, 7 chars) → 0; Em sits 51px into
    // "grace" (100px, 5 chars) → 2, after the 8 chars of "Amazing ".
    let offsets: Vec<usize> = section.lines[0].chords.keys().copied().collect();
    assert_eq!(offsets, vec![0, 10]);
}

#[test]
fn multi_line_verse_pairs_each_chord_line_with_its_lyrics() {
    let page: OcrPage = vec![
        token("C", 5.0, 0.0, 15.0),
        token("F", 100.0, 0.0, 110.0),
        token("Oh", 0.0, 30.0, 30.0),
        token("happy", 40.0, 30.0, 120.0),
        token("day", 130.0, 30.0, 180.0),
        token("G7", 60.0, 70.0, 80.0),
        token("When", 0.0, 100.0, 70.0),
        token("Jesus", 80.0, 100.0, 160.0),
        token("washed", 170.0, 100.0, 260.0),
    ]
    .into();
    let section = analyze_section(&page, "C", "Chorus", ChordLexicon::bundled(), &AnalysisOptions::default());

    assert_eq!(section.lines.len(), 2);
    assert_eq!(section.lines[0].lyrics, "Oh happy day");
    assert_eq!(section.lines[1].lyrics, "When Jesus washed");
    let first: Vec<String> = section.lines[0].chords.values().map(ToString::to_string).collect();
    assert_eq!(first, vec!["1", "4"]);
    let second: Vec<String> = section.lines[1].chords.values().map(ToString::to_string).collect();
    assert_eq!(second, vec!["5"]);
}

#[test]
fn mixed_annotation_line_is_lyrics() {
    let page: OcrPage = vec![token("Capo", 0.0, 0.0, 40.0), token("3", 50.0, 0.0, 60.0), token("G", 80.0, 0.0, 90.0)].into();
    let lines = cluster_page(&page, 10.0);
    assert_eq!(lines.len(), 1);
    assert_eq!(line_kind(&lines[0], &page), LineKind::Lyrics);
}

#[test]
fn classifier_properties() {
    for letter in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        assert!(is_chord(letter));
    }
    for long in ["Amazing", "Gmaj7/B", "Hallelujah", "Cadd9"] {
        assert!(!is_chord(long));
    }
    assert!(!is_chord("OOH"));
}

#[test]
fn documented_normalizations() {
    let lexicon = ChordLexicon::bundled();
    let nash = |chord: &str, key: &str| normalize(chord, key, lexicon).map(|c| c.to_string());
    assert_eq!(nash("C", "C").as_deref(), Some("1"));
    assert_eq!(nash("Am", "C").as_deref(), Some("-6"));
    assert_eq!(nash("G7", "C").as_deref(), Some("5"));
    assert_eq!(nash("F#", "C"), None);
}

#[test]
fn chart_document_from_sections() {
    let page = parse_ocr_json(AMAZING_GRACE).unwrap();
    let lexicon = ChordLexicon::bundled();
    let mut chart = SongChart::new(ChartHeader {
        name: Some("Amazing Grace".into()),
        key: Some("G".into()),
        authors: vec!["John Newton".into()],
    });
    chart.push_section(analyze_section(&page, "G", "Verse 1", lexicon, &AnalysisOptions::default()));

    let json: serde_json::Value = serde_json::from_str(&chart.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["header"]["name"], "Amazing Grace");
    assert_eq!(json["header"]["authors"][0], "John Newton");
    assert_eq!(json["data"]["Verse 1"][0]["lyrics"], "Amazing grace");
    assert_eq!(json["data"]["Verse 1"][0]["chords"]["0"], "1");
}
