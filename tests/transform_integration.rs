// End-to-end transform tests over the public API
// WHY: the full pipeline (gate -> compound split -> wrap -> adjust -> merge)
// has cross-pass interactions that unit tests on single passes cannot cover

use langwrap::{BoundaryNormalizer, LanguageConfig, RunWrapEngine};

fn engine() -> RunWrapEngine {
    RunWrapEngine::new(&LanguageConfig::default()).expect("default config must compile")
}

fn legacy_engine() -> RunWrapEngine {
    let mut config = LanguageConfig::default();
    config.legacy_quirks = true;
    RunWrapEngine::new(&config).expect("legacy config must compile")
}

#[test]
fn test_non_target_fragments_pass_through() {
    let engine = engine();
    for input in ["plain english", "123/456", "42!", "", "   "] {
        assert_eq!(engine.transform(input), input, "input: {input:?}");
    }
}

#[test]
fn test_homogeneous_numeric_compound_unwrapped() {
    // Both sides of the slash are non-alpha-only: no split, and nothing to
    // wrap, so the compound survives intact
    let engine = engine();
    assert_eq!(engine.transform("123/456"), "123/456");
}

#[test]
fn test_mixed_compound_wraps_only_target_side() {
    let engine = engine();
    assert_eq!(
        engine.transform("עברית/abc"),
        r#"<wrap dir="auto" lang="he">עברית</wrap>/abc"#
    );
}

#[test]
fn test_compound_rejoin_is_stable() {
    // No sub-token dropped or duplicated, order preserved, no trailing slash
    let engine = engine();
    let result = engine.transform("abc/עברית/def/123");
    assert_eq!(result.matches('/').count(), 3);
    assert!(result.starts_with("abc/"));
    assert!(result.ends_with("/def/123"));
    assert!(result.contains(r#"<wrap dir="auto" lang="he">עברית</wrap>"#));
}

#[test]
fn test_adjacent_runs_collapse_to_single_wrapper() {
    let engine = engine();
    let result = engine.transform("שלום עולם טוב");
    assert_eq!(
        result,
        r#"<wrap dir="auto" lang="he">שלום עולם טוב</wrap>"#
    );
    // Exactly one wrapper pair after normalization
    assert_eq!(result.matches("<wrap").count(), 1);
    assert_eq!(result.matches("</wrap>").count(), 1);
}

#[test]
fn test_number_attaches_to_preceding_run_without_override() {
    let engine = engine();
    assert_eq!(
        engine.transform("שלום 123"),
        r#"<wrap dir="auto" lang="he">שלום 123</wrap>"#
    );
}

#[test]
fn test_leading_number_attaches_to_following_run() {
    let engine = engine();
    assert_eq!(
        engine.transform("123 שלום"),
        r#"<wrap dir="auto" lang="he">123 שלום</wrap>"#
    );
}

#[test]
fn test_legacy_direction_and_number_override() {
    let engine = legacy_engine();
    let result = engine.transform("שלום 123");
    assert!(result.starts_with(r#"<wrap dir="rtl" lang="he">"#));
    assert!(result.contains(r#"<span dir="ltr">"#));
    assert!(result.contains("&nbsp;"));
}

#[test]
fn test_legacy_punctuation_gets_no_override() {
    let engine = legacy_engine();
    let result = engine.transform("שלום !!");
    assert!(!result.contains("<span"));
    assert_eq!(result, r#"<wrap dir="rtl" lang="he">שלום !!</wrap>"#);
}

#[test]
fn test_wrap_boundaries_never_overlap() {
    // Every opening tag is closed before the next one opens
    let engine = engine();
    for input in [
        "שלום עולם",
        "hello שלום world עולם",
        "עברית/abc",
        "שלום 123 עולם",
    ] {
        let result = engine.transform(input);
        let mut depth = 0i32;
        let mut rest = result.as_str();
        loop {
            let open = rest.find("<wrap ");
            let close = rest.find("</wrap>");
            match (open, close) {
                (None, None) => break,
                (Some(o), c) if c.map_or(true, |c| o < c) => {
                    depth += 1;
                    assert!(depth <= 1, "nested wrapper in {result:?}");
                    rest = &rest[o + "<wrap ".len()..];
                }
                (_, Some(c)) => {
                    depth -= 1;
                    assert!(depth >= 0, "unbalanced wrapper in {result:?}");
                    rest = &rest[c + "</wrap>".len()..];
                }
                _ => unreachable!(),
            }
        }
        assert_eq!(depth, 0, "unbalanced wrapper in {result:?}");
    }
}

#[test]
fn test_round_trip_containment() {
    // Every non-whitespace character of the input survives into the output
    let engine = engine();
    for input in [
        "שלום עולם",
        "hello שלום",
        "שלום 123",
        "עברית/abc",
        "שלום, עולם!",
    ] {
        let result = engine.transform(input);
        let stripped = strip_markup(&result);
        for ch in input.chars().filter(|ch| !ch.is_whitespace()) {
            assert!(
                stripped.contains(ch),
                "character {ch:?} of {input:?} missing from {result:?}"
            );
        }
    }
}

#[test]
fn test_transform_is_deterministic() {
    let engine = engine();
    let input = "abc שלום 123 עולם/def";
    assert_eq!(engine.transform(input), engine.transform(input));
}

#[test]
fn test_normalizer_idempotent_on_transformed_output() {
    let engine = engine();
    let normalizer = BoundaryNormalizer::new(false).unwrap();
    for input in ["שלום עולם", "hello שלום world", "שלום 123 עולם"] {
        let result = engine.transform(input);
        assert_eq!(normalizer.normalize(&result), result, "input: {input:?}");
    }
}

/// Drop wrapper/override markup, keeping only rendered text content
fn strip_markup(text: &str) -> String {
    let mut result = String::new();
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        result.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    result.push_str(rest);
    result.replace("&nbsp;", " ")
}
