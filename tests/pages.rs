use slovnik_scanner::{parse_document, parse_page, parse_page_with, LabelTable, PageKind, SampleUse, DEFAULT_LABELS};

const HLAVNI: &str = include_str!("fixtures/hlavni.html");
const PROTOZE: &str = include_str!("fixtures/protoze.html");
const SOUTEZIVY: &str = include_str!("fixtures/soutezivy.html");
const DOBR: &str = include_str!("fixtures/dobr.html");
const NO_RESULTS: &str = include_str!("fixtures/no_results.html");

#[test]
fn full_entry_page() {
    let words = parse_page(HLAVNI.as_bytes()).unwrap();
    assert_eq!(words.len(), 1);
    let w = &words[0];

    assert_eq!(w.word, "hlavní");
    assert_eq!(w.word_type.as_deref(), Some("přídavné jméno"));
    assert_eq!(w.translations, vec!["гла́вный", "основно́й", "центра́льный"]);
    assert_eq!(w.synonyms, vec!["ústřední", "podstatný", "základní", "zásadní"]);
    assert_eq!(w.antonyms, vec!["vedlejší", "podřadný", "podružný"]);
    assert_eq!(w.derived_words, vec!["hlavně"]);
}

#[test]
fn header_outside_results_is_ignored() {
    let words = parse_page(HLAVNI.as_bytes()).unwrap();
    assert!(words.iter().all(|w| w.word != "Slovník"));
}

#[test]
fn unknown_block_label_does_not_leak() {
    let words = parse_page(HLAVNI.as_bytes()).unwrap();
    let w = &words[0];
    for list in [&w.synonyms, &w.antonyms, &w.derived_words, &w.translations] {
        assert!(!list.iter().any(|s| s == "hlavní věc"));
    }
}

#[test]
fn samples_in_document_order() {
    let words = parse_page(HLAVNI.as_bytes()).unwrap();
    let samples = &words[0].samples;
    assert_eq!(samples.len(), 3);
    assert_eq!(
        samples[0],
        SampleUse {
            keyword: "hlavní".into(),
            phrase: "hlavní město".into(),
            translation: "столи́ца".into(),
        }
    );
    assert_eq!(samples[1].translation, "второ́е блю́до");
    // third sample has no translation span
    assert_eq!(samples[2].phrase, "hlavní nádraží");
    assert_eq!(samples[2].translation, "");
}

#[test]
fn split_translations_are_merged() {
    let words = parse_page(PROTOZE.as_bytes()).unwrap();
    let w = &words[0];
    assert_eq!(w.word, "protože");
    assert_eq!(w.word_type.as_deref(), Some("spojka"));
    assert_eq!(w.translations, vec!["так как", "из-за того́", "потому́ что"]);
}

#[test]
fn span_translation_and_derived_word() {
    let words = parse_page(SOUTEZIVY.as_bytes()).unwrap();
    let w = &words[0];
    assert_eq!(w.word, "soutěživý");
    assert_eq!(w.translations, vec!["состяза́тельный"]);
    assert_eq!(w.derived_words, vec!["soutěživost"]);
    assert!(w.synonyms.is_empty());
}

#[test]
fn suggestion_page() {
    let page = parse_document(DOBR.as_bytes(), &DEFAULT_LABELS).unwrap();
    assert_eq!(page.kind, PageKind::Suggestions);

    let expected = [
        ("dobrat se", "добра́ться"),
        ("doba", "вре́мя"),
        ("do", "в"),
        ("dobrý", "хоро́ший"),
        ("dobro", "добро́"),
        ("dobré", "добро́"),
        ("dobrat", "израсхо́довать"),
        ("obr", "гига́нт"),
        ("bobr", "бобр"),
    ];
    assert_eq!(page.words.len(), expected.len());
    for (w, (word, translation)) in page.words.iter().zip(expected) {
        assert_eq!(w.word, word);
        assert_eq!(w.translations, vec![translation]);
        assert_eq!(w.word_type, None);
    }
}

#[test]
fn page_without_results_container() {
    let page = parse_document(NO_RESULTS.as_bytes(), &DEFAULT_LABELS).unwrap();
    assert_eq!(page.kind, PageKind::Missing);
    assert!(page.words.is_empty());
}

#[test]
fn parsing_is_repeatable() {
    for fixture in [HLAVNI, PROTOZE, SOUTEZIVY, DOBR, NO_RESULTS] {
        let first = parse_page(fixture.as_bytes()).unwrap();
        let second = parse_page(fixture.as_bytes()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn custom_labels_change_block_routing() {
    // Swap the meaning of the two headers.
    let labels = LabelTable::from_yaml("synonyms: [Antonyma]\nantonyms: [Synonyma]\n").unwrap();
    let words = parse_page_with(HLAVNI.as_bytes(), &labels).unwrap();
    let w = &words[0];
    assert_eq!(w.synonyms, vec!["vedlejší", "podřadný", "podružný"]);
    assert_eq!(w.antonyms, vec!["ústřední", "podstatný", "základní", "zásadní"]);
    assert!(w.derived_words.is_empty());
}

#[test]
fn json_output_shape() {
    let words = parse_page(SOUTEZIVY.as_bytes()).unwrap();
    let json = serde_json::to_value(&words).unwrap();
    assert_eq!(json[0]["word"], "soutěživý");
    assert_eq!(json[0]["wordType"], "přídavné jméno");
    assert_eq!(json[0]["derivedWords"][0], "soutěživost");
    assert!(json[0]["samples"].as_array().unwrap().is_empty());
}

#[test]
fn parses_on_several_threads() {
    let handles: Vec<_> = [HLAVNI, DOBR]
        .into_iter()
        .map(|html| std::thread::spawn(move || parse_page(html.as_bytes()).unwrap()))
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0][0].word, "hlavní");
    assert_eq!(results[1].len(), 9);
}
