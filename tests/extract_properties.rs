// tests/extract_properties.rs
//
// Behavioural properties of the prize-text extractor over hand-built inputs.

use xoso_notifier::extract_prizes;

const BREAKS: [&str; 7] = ["<br>", "<br/>", "<br />", "<BR>", "<Br />", "<bR/>", "\n"];

fn samples() -> Vec<Vec<&'static str>> {
    vec![
        vec!["G.ĐB: 1", "G.1: 2"],
        vec!["[Huế]", "G.8: 11", "lorem ipsum", "G.7: 222", "[Phú Yên]", "G.8: 33"],
        vec!["intro", "[A]", "[B]", "G.1: x"],
        vec!["G.0: before", "[X]", "G.1: after", "trailing text"],
    ]
}

#[test]
fn without_markers_everything_lands_under_empty_label() {
    let lines = ["note", "G.ĐB: 99", "G.1: 12 - 34", "more notes", "G.2: 5"];
    for br in BREAKS {
        let t = extract_prizes(&lines.join(br));
        assert_eq!(t.labels(), vec![""]);
        assert_eq!(t.get("").unwrap(), &["G.ĐB: 99", "G.1: 12 - 34", "G.2: 5"]);
    }
}

#[test]
fn break_spelling_never_changes_the_table() {
    for sample in samples() {
        let reference = extract_prizes(&sample.join("\n"));
        for br in BREAKS {
            assert_eq!(extract_prizes(&sample.join(br)), reference, "br={br:?}");
        }
    }
}

#[test]
fn repeated_extraction_is_stable() {
    for sample in samples() {
        let text = sample.join("<br/>");
        let a = extract_prizes(&text);
        let b = extract_prizes(&text);
        assert_eq!(a, b);
    }
}

#[test]
fn order_is_preserved_across_locations() {
    let t = extract_prizes("[A]\nG.1: x\nG.2: y\n[B]\nG.3: z");
    assert_eq!(t.labels(), vec!["[A]", "[B]"]);
    assert_eq!(t.get("[A]").unwrap(), &["G.1: x", "G.2: y"]);
    assert_eq!(t.get("[B]").unwrap(), &["G.3: z"]);
}

#[test]
fn unmarked_lines_never_appear_in_values() {
    for sample in samples() {
        let t = extract_prizes(&sample.join("<br>"));
        for (_, lines) in t.iter() {
            for l in lines {
                assert!(l.starts_with("G."), "unexpected line {l:?}");
            }
        }
    }
}
