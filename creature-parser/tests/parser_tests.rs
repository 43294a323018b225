use chunk_model::{BoundingBox, DocChunk, Fragment};
use creature_parser::{
    extract_creatures, process_chunks, Category, CategoryMarks, Marker, ParseError, ParserConfig, StatBlockParser,
    StatValue,
};

const NAME: (&str, f64) = ("WWROEK+Calibri-Bold", 16.139999999999986);
const SUB: (&str, f64) = ("DXJJCX+GillSans-SemiBold", 16.60656);
const LABEL: (&str, f64) = ("WWROEK+Calibri-Bold", 13.2348);
const SECTION: (&str, f64) = ("DXJJCX+GillSans-SemiBold", 21.474);
const BODY: (&str, f64) = ("LUFRKP+Calibri", 13.1167);

fn styled(page_n: i64, parts: &[((&str, f64), &str)]) -> DocChunk {
    let text = parts.iter().map(|(_, t)| *t).collect::<Vec<_>>().join(" ");
    let mut chunk = DocChunk::new(0, 0, BoundingBox::new(60.0, 600.0, 200.0, 612.0), text);
    chunk.fragments = parts.iter().map(|((font, size), t)| Fragment::new(*t, *font, *size)).collect();
    chunk.page_n = Some(page_n);
    chunk
}

fn one(page_n: i64, style: (&str, f64), text: &str) -> DocChunk { styled(page_n, &[(style, text)]) }

fn aboleth(page_n: i64) -> Vec<DocChunk> {
    let mut chunks = vec![
        one(page_n, NAME, "Aboleth"),
        one(page_n, BODY, "Large aberration, lawful evil"),
        styled(page_n, &[(LABEL, "Armor Class"), (BODY, "17 (natural armor)")]),
        one(page_n, LABEL, "Hit Points"),
        one(page_n, BODY, "135 (18d10 + 36)"),
    ];
    for ability in ["STR", "CHA", "CON", "DEX", "WIS", "INT"] {
        chunks.push(one(page_n, LABEL, ability));
    }
    chunks.push(one(page_n, BODY, "21 (+5) 18 (+4) 15 (+2) 9 (\u{2212}1) 15 (+2) 18 (+4)"));
    chunks.push(styled(page_n, &[(LABEL, "Challenge"), (BODY, "10 (5,900 XP)")]));
    chunks
}

fn monsters(mut body: Vec<DocChunk>) -> Vec<DocChunk> {
    let mut chunks = vec![one(250, SECTION, "Monsters (A)")];
    chunks.append(&mut body);
    chunks
}

#[test]
fn stat_block_is_reconstructed() {
    let mut chunks = monsters(aboleth(254));
    chunks.push(one(255, SECTION, "Monsters (B)"));
    let config = ParserConfig::default();
    let records = process_chunks(&chunks, &config).expect("records");

    assert_eq!(records.len(), 1);
    let aboleth = &records[0];
    assert_eq!(aboleth.class_name, "Aboleth");
    assert_eq!(aboleth.category, Category::Monster);
    assert_eq!(aboleth.subcategory, None);
    assert_eq!(aboleth.page_n, Some(254));
    assert_eq!(aboleth.get("Armor Class"), Some(&StatValue::from("17 (natural armor)")));
    assert_eq!(aboleth.get("Hit Points"), Some(&StatValue::from("135 (18d10 + 36)")));
    assert_eq!(aboleth.get("STR"), Some(&StatValue::Int(21)));
    assert_eq!(aboleth.get("STRMod"), Some(&StatValue::Int(5)));
    assert_eq!(aboleth.get("CHA"), Some(&StatValue::Int(18)));
    assert_eq!(aboleth.get("DEX"), Some(&StatValue::Int(9)));
    assert_eq!(aboleth.get("DEXMod"), Some(&StatValue::Int(-1)));
    assert_eq!(aboleth.get("INTMod"), Some(&StatValue::Int(4)));
    assert_eq!(aboleth.challenge(), Some("10 (5,900 XP)"));
    assert_eq!(aboleth.get("Large aberration, lawful evil"), None, "unknown chunks are not stored");
}

#[test]
fn parser_state_is_observable_between_chunks() {
    let config = ParserConfig::default();
    let mut parser = StatBlockParser::new(&config);
    parser.feed(&one(254, NAME, "Aboleth")).expect("feed");
    assert!(parser.active_creature().is_none(), "nothing is read before a category starts");

    parser.feed(&one(254, SECTION, "Monsters (A)")).expect("feed");
    assert_eq!(parser.category(), Some(Category::Monster));
    parser.feed(&one(254, NAME, "Aboleth")).expect("feed");
    parser.feed(&one(254, LABEL, "Hit Points")).expect("feed");
    assert_eq!(parser.pending_stat(), Some("Hit Points"));
    parser.feed(&one(254, BODY, "135 (18d10 + 36)")).expect("feed");
    assert_eq!(parser.pending_stat(), None);
    assert_eq!(parser.active_creature().map(|c| c.class_name.as_str()), Some("Aboleth"));
    assert!(parser.sealed().is_empty());

    parser.feed(&one(255, NAME, "Angel")).expect("feed");
    assert_eq!(parser.sealed().len(), 1);
    let records = parser.finish();
    let names: Vec<&str> = records.iter().map(|r| r.class_name.as_str()).collect();
    assert_eq!(names, ["Aboleth", "Angel"]);
}

#[test]
fn overlapping_categories_are_an_error() {
    let chunks = monsters(vec![
        one(300, SECTION, "Appendix MM-A:"),
        one(300, SECTION, "Miscellaneous"),
        one(300, SECTION, "Creatures"),
    ]);
    match process_chunks(&chunks, &ParserConfig::default()) {
        Err(ParseError::OverlappingCategory { started, active }) => {
            assert_eq!(started, Category::Creature);
            assert_eq!(active, Category::Monster);
        }
        other => panic!("expected OverlappingCategory, got {other:?}"),
    }
}

#[test]
fn sequence_markers_need_every_part_in_order() {
    let config = ParserConfig::default();
    let mut parser = StatBlockParser::new(&config);
    parser.feed(&one(250, SECTION, "Monsters (A)")).expect("feed");
    parser.feed(&one(250, NAME, "Aboleth")).expect("feed");
    parser.feed(&one(366, SECTION, "Appendix PH-A: Conditions")).expect("feed");
    assert_eq!(parser.category(), None);
    assert_eq!(parser.sealed().len(), 1, "ending a category seals its last creature");

    parser.feed(&one(366, BODY, "Creatures")).expect("feed");
    assert_eq!(parser.category(), None, "parts out of order do not count");
    parser.feed(&one(366, SECTION, "Appendix MM-A:")).expect("feed");
    assert_eq!(parser.category(), None);
    parser.feed(&one(366, SECTION, "Miscellaneous")).expect("feed");
    assert_eq!(parser.category(), None);
    parser.feed(&one(366, SECTION, "Creatures")).expect("feed");
    assert_eq!(parser.category(), Some(Category::Creature));

    parser.feed(&one(366, NAME, "Ape")).expect("feed");
    let records = parser.finish();
    assert_eq!(records[1].class_name, "Ape");
    assert_eq!(records[1].category, Category::Creature);
}

#[test]
fn subcategory_headings_group_creatures() {
    let chunks = monsters(vec![
        one(261, SUB, "Angels"),
        one(261, NAME, "Deva"),
        one(262, NAME, "Planetar"),
        one(320, SUB, "Variant: Demon Summoning"),
        one(320, NAME, "Dretch"),
    ]);
    let records = process_chunks(&chunks, &ParserConfig::default()).expect("records");
    let groups: Vec<(&str, Option<&str>)> =
        records.iter().map(|r| (r.class_name.as_str(), r.subcategory.as_deref())).collect();
    assert_eq!(
        groups,
        [("Deva", Some("Angels")), ("Planetar", Some("Angels")), ("Dretch", None)]
    );
}

#[test]
fn subcategory_ends_at_a_phrase_of_the_next_creature() {
    let chunks = monsters(vec![
        one(279, SUB, "Dinosaurs"),
        one(279, NAME, "Plesiosaurus"),
        one(279, BODY, "Large beast, unaligned"),
        one(280, NAME, "Drider"),
        one(280, BODY, "Large monstrosity (titan), chaotic evil"),
        one(280, NAME, "Dryad"),
    ]);
    let records = process_chunks(&chunks, &ParserConfig::default()).expect("records");
    let groups: Vec<(&str, Option<&str>)> =
        records.iter().map(|r| (r.class_name.as_str(), r.subcategory.as_deref())).collect();
    assert_eq!(
        groups,
        [("Plesiosaurus", Some("Dinosaurs")), ("Drider", None), ("Dryad", None)]
    );
}

#[test]
fn subcategory_ends_at_the_first_creature_of_an_end_page() {
    let chunks = monsters(vec![
        one(331, SUB, "Ghouls"),
        one(331, NAME, "Ghast"),
        one(332, NAME, "Ghost"),
        one(332, SUB, "Giants"),
        one(332, NAME, "Hill Giant"),
    ]);
    let records = process_chunks(&chunks, &ParserConfig::default()).expect("records");
    let groups: Vec<(&str, Option<&str>)> =
        records.iter().map(|r| (r.class_name.as_str(), r.subcategory.as_deref())).collect();
    assert_eq!(
        groups,
        [("Ghast", Some("Ghouls")), ("Ghost", None), ("Hill Giant", Some("Giants"))]
    );
}

#[test]
fn section_heading_closes_the_subcategory() {
    let chunks = monsters(vec![
        one(261, SUB, "Angels"),
        one(261, NAME, "Deva"),
        one(263, SECTION, "Monsters (B)"),
        one(263, NAME, "Basilisk"),
    ]);
    let records = process_chunks(&chunks, &ParserConfig::default()).expect("records");
    assert_eq!(records[1].class_name, "Basilisk");
    assert_eq!(records[1].subcategory, None);
}

#[test]
fn malformed_ability_row_is_an_error() {
    let chunks = monsters(vec![
        one(254, NAME, "Aboleth"),
        one(254, LABEL, "INT"),
        one(254, BODY, "21 (+5) 18"),
    ]);
    match process_chunks(&chunks, &ParserConfig::default()) {
        Err(ParseError::MalformedAbilityRow { creature, text, .. }) => {
            assert_eq!(creature, "Aboleth");
            assert_eq!(text, "21 (+5) 18");
        }
        other => panic!("expected MalformedAbilityRow, got {other:?}"),
    }
}

#[test]
fn stats_outside_a_creature_are_skipped() {
    let chunks = monsters(vec![styled(254, &[(LABEL, "Armor Class"), (BODY, "17")]), one(254, NAME, "Aboleth")]);
    let records = process_chunks(&chunks, &ParserConfig::default()).expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Armor Class"), None);
}

#[test]
fn missing_challenge_sorts_first() {
    let mut body = aboleth(254);
    body.extend([
        one(255, NAME, "Acolyte"),
        styled(255, &[(LABEL, "Challenge"), (BODY, "1/4 (50 XP)")]),
        one(256, NAME, "Mystery"),
        one(257, NAME, "Bandit"),
        styled(257, &[(LABEL, "Challenge"), (BODY, "1/8 (25 XP)")]),
    ]);
    let creatures = extract_creatures(&monsters(body), &ParserConfig::default()).expect("creatures");

    let order: Vec<(&str, &str, i64)> =
        creatures.iter().map(|c| (c.record.class_name.as_str(), c.cr.as_str(), c.xp)).collect();
    assert_eq!(
        order,
        [("Mystery", "-1", -1), ("Bandit", "1/8", 25), ("Acolyte", "1/4", 50), ("Aboleth", "10", 5900)]
    );
}

#[test]
fn bad_challenge_fails_extraction() {
    let chunks = monsters(vec![
        one(254, NAME, "Aboleth"),
        styled(254, &[(LABEL, "Challenge"), (BODY, "10")]),
    ]);
    assert!(matches!(
        extract_creatures(&chunks, &ParserConfig::default()),
        Err(ParseError::Challenge { .. })
    ));
}

fn switch_config(monster_first: bool) -> ParserConfig {
    let monster = CategoryMarks::new(Category::Monster, Marker::single("Monsters (A)"), Marker::single("SWITCH"));
    let creature = CategoryMarks::new(Category::Creature, Marker::single("SWITCH"), Marker::single("Appendix MM-B:"));
    let categories = if monster_first { vec![monster, creature] } else { vec![creature, monster] };
    ParserConfig { categories, ..ParserConfig::default() }
}

#[test]
fn one_chunk_can_end_a_category_and_start_the_next() {
    let chunks = monsters(vec![
        one(254, NAME, "Aboleth"),
        one(366, SECTION, "SWITCH"),
        one(366, NAME, "Ape"),
    ]);
    for monster_first in [true, false] {
        let records = process_chunks(&chunks, &switch_config(monster_first)).expect("records");
        let found: Vec<(&str, Category)> = records.iter().map(|r| (r.class_name.as_str(), r.category)).collect();
        assert_eq!(
            found,
            [("Aboleth", Category::Monster), ("Ape", Category::Creature)],
            "monster_first = {monster_first}"
        );
    }
}
