use page_chunker::layout::{LayoutPage, LayoutTextBox, LayoutTextLine};
use page_chunker::{generate_chunks, ChunkingParams, LayoutJsonSource};

use creature_parser::{extract_creatures, Category, ParserConfig, StatValue};

const NAME: (&str, f64) = ("WWROEK+Calibri-Bold", 16.139999999999986);
const LABEL: (&str, f64) = ("WWROEK+Calibri-Bold", 13.2348);
const SECTION: (&str, f64) = ("DXJJCX+GillSans-SemiBold", 21.474);
const BODY: (&str, f64) = ("LUFRKP+Calibri", 13.1167);

fn line(x: f64, top: f64, style: (&str, f64), text: &str) -> LayoutTextLine {
    LayoutTextLine::uniform([x, top - 12.0, x + 240.0, top], text, style.0, style.1)
}

fn stat(x: f64, top: f64, label: &str, value: &str) -> LayoutTextLine {
    let mut l = LayoutTextLine { bbox: [x, top - 12.0, x + 240.0, top], items: Vec::new() };
    l.push_run(&format!("{} ", label), LABEL.0, LABEL.1);
    l.push_run(value, BODY.0, BODY.1);
    l
}

#[test]
fn creatures_are_extracted_from_page_layout() {
    let abilities = ["STR", "CHA", "CON", "DEX", "WIS", "INT"];
    let mut left = vec![
        line(60.0, 760.0, SECTION, "Monsters (A)"),
        line(60.0, 720.0, NAME, "Aboleth"),
        line(60.0, 700.0, BODY, "Large aberration, lawful evil"),
        stat(60.0, 680.0, "Armor Class", "17 (natural armor)"),
        stat(60.0, 660.0, "Hit Points", "135 (18d10 + 36)"),
    ];
    for (i, ability) in abilities.iter().enumerate() {
        left.push(line(60.0 + 40.0 * i as f64, 640.0 - i as f64 * 0.01, LABEL, ability));
    }
    left.push(line(60.0, 620.0, BODY, "21 (+5) 18 (+4) 15 (+2) 9 (\u{2212}1) 15 (+2) 18 (+4)"));
    left.push(stat(60.0, 600.0, "Challenge", "10 (5,900 XP)"));

    let right = vec![
        line(330.0, 720.0, NAME, "Acolyte"),
        stat(330.0, 700.0, "Challenge", "1/4 (50 XP)"),
        line(330.0, 40.0, BODY, "254"),
    ];

    let source = LayoutJsonSource::from_pages(vec![LayoutPage {
        index: 0,
        boxes: vec![LayoutTextBox { lines: left }, LayoutTextBox { lines: right }],
    }]);
    let chunks = generate_chunks(&source, &ChunkingParams::default()).expect("chunks");
    let creatures = extract_creatures(&chunks, &ParserConfig::default()).expect("creatures");

    let names: Vec<&str> = creatures.iter().map(|c| c.record.class_name.as_str()).collect();
    assert_eq!(names, ["Acolyte", "Aboleth"]);

    let aboleth = &creatures[1];
    assert_eq!(aboleth.record.category, Category::Monster);
    assert_eq!(aboleth.record.page_n, Some(254));
    assert_eq!(aboleth.cr, "10");
    assert_eq!(aboleth.xp, 5900);
    assert_eq!(aboleth.record.get("Armor Class"), Some(&StatValue::from("17 (natural armor)")));
    assert_eq!(aboleth.record.get("WIS"), Some(&StatValue::Int(15)));
    assert_eq!(aboleth.record.get("DEXMod"), Some(&StatValue::Int(-1)));
    assert_eq!(creatures[0].cr, "1/4");
}
