//! Behavioral tests for the credibility heuristic engine
//!
//! Tests cover:
//! - Rule priority within the text branch
//! - Keyword coverage for every set
//! - Image file name markers (case-insensitive)
//! - URL verdicts are input-invariant
//! - Determinism and JSON shape

use satya_common::engine::rules::{COVID_KEYWORDS, HEALTH_MISINFO_KEYWORDS, NEWS_IMAGE_MARKERS};
use satya_common::{evaluate, ContentSubmission, CredibilityVerdict};

// =============================================================================
// Text branch
// =============================================================================

#[test]
fn test_every_misinfo_phrase_with_covid_is_cure_claim() {
    for phrase in HEALTH_MISINFO_KEYWORDS {
        for covid in COVID_KEYWORDS {
            let text = format!("A {} for {} that will cure you", phrase, covid);
            let verdict = evaluate(&ContentSubmission::text(text.clone()));
            assert_eq!(verdict.rule_name(), "covid-cure-claim", "input: {}", text);
            assert_eq!(verdict.health_score(), 8);
            assert_eq!(verdict.source_credibility_score(), 5);
        }
    }
}

#[test]
fn test_proven_cure_for_covid_resolves_to_cure_claim() {
    let verdict = evaluate(&ContentSubmission::text("proven cure for covid"));
    assert_eq!(verdict.rule_name(), "covid-cure-claim");
    assert_eq!(
        verdict.manipulative_techniques()[1],
        "Promotion of unproven COVID-19 'cures'"
    );
}

#[test]
fn test_plain_cure_with_pandemic_is_cure_claim() {
    // "cure" alone qualifies once a covid keyword is present
    let verdict = evaluate(&ContentSubmission::text("Is there a cure for the pandemic yet?"));
    assert_eq!(verdict.rule_name(), "covid-cure-claim");
}

#[test]
fn test_suspicious_scenario() {
    let verdict = evaluate(&ContentSubmission::text("BREAKING: shocking secret exposed"));
    assert_eq!(verdict.health_score(), 25);
    assert_eq!(verdict.source_credibility_score(), 20);
    assert_eq!(
        verdict.manipulative_techniques(),
        &["Sensational language", "Urgency manipulation", "Unverified claims"]
    );
    assert!(verdict.image_analysis().is_none());
}

#[test]
fn test_neutral_text_is_default_reliable() {
    for text in [
        "The city council meets on Tuesday to discuss the budget.",
        "Rainfall this month was slightly above the seasonal average.",
        "detox smoothies and alkaline diets", // pseudoscience gates nothing
    ] {
        let verdict = evaluate(&ContentSubmission::text(text));
        assert_eq!(verdict.rule_name(), "default-reliable", "input: {}", text);
        assert_eq!(verdict.health_score(), 78);
        assert_eq!(verdict.source_credibility_score(), 72);
        assert!(verdict.manipulative_techniques().is_empty());
    }
}

#[test]
fn test_keyword_match_is_substring_not_word() {
    // "killed" inside "skilled" still counts
    let verdict = evaluate(&ContentSubmission::text("A skilled carpenter"));
    assert_eq!(verdict.rule_name(), "suspicious-content");
}

// =============================================================================
// Image branch
// =============================================================================

#[test]
fn test_news_in_any_case_is_fabricated_image() {
    for name in ["NEWS.png", "daily_News_clip.jpeg", "my-newsletter.gif", "x.news"] {
        let verdict = evaluate(&ContentSubmission::image(name));
        assert_eq!(verdict.rule_name(), "fabricated-news-image", "file: {}", name);
        assert_eq!(verdict.health_score(), 15);
    }
}

#[test]
fn test_every_marker_triggers_fabricated_image() {
    for marker in NEWS_IMAGE_MARKERS {
        let verdict = evaluate(&ContentSubmission::image(format!("img_{}.png", marker)));
        assert_eq!(verdict.rule_name(), "fabricated-news-image");
    }
}

#[test]
fn test_modi_breaking_scenario() {
    let verdict = evaluate(&ContentSubmission::image("modi_breaking.jpg"));
    assert_eq!(verdict.health_score(), 15);
    assert_eq!(verdict.source_credibility_score(), 5);
    assert_eq!(verdict.manipulative_techniques().len(), 6);

    let analysis = verdict.image_analysis().expect("image analysis present");
    assert!(analysis.has_manipulation);
    assert_eq!(analysis.confidence, 95);
}

// =============================================================================
// URL branch
// =============================================================================

#[test]
fn test_url_verdict_is_input_invariant() {
    let reference = evaluate(&ContentSubmission::url("https://example.com"));
    for url in [
        "https://fake-news.example/breaking/covid-miracle-cure",
        "not even a url",
        "http://localhost:1/",
    ] {
        assert_eq!(evaluate(&ContentSubmission::url(url)), reference);
    }
    assert_eq!(reference.health_score(), 68);
    assert_eq!(reference.source_credibility_score(), 65);
    assert!(reference.manipulative_techniques().is_empty());
}

// =============================================================================
// Determinism and serialization
// =============================================================================

#[test]
fn test_evaluate_is_deterministic() {
    let inputs = [
        ContentSubmission::text("urgent: natural cure for coronavirus"),
        ContentSubmission::image("breaking.png"),
        ContentSubmission::url("https://example.org"),
    ];
    for input in &inputs {
        assert_eq!(evaluate(input), evaluate(input));
    }
}

#[test]
fn test_text_verdict_json_has_no_image_analysis() {
    let verdict = evaluate(&ContentSubmission::text("hello"));
    let json = serde_json::to_value(&verdict).unwrap();

    assert_eq!(json["kind"], "text");
    assert_eq!(json["rule"], "default-reliable");
    assert_eq!(json["healthScore"], 78);
    assert_eq!(json["sourceCredibilityScore"], 72);
    assert!(json["overallSummary"].is_string());
    assert!(json["manipulativeTechniques"].as_array().unwrap().is_empty());
    assert!(json.get("imageAnalysis").is_none());
}

#[test]
fn test_image_verdict_json_shape() {
    let verdict = evaluate(&ContentSubmission::image("cat.jpg"));
    let json = serde_json::to_value(&verdict).unwrap();

    assert_eq!(json["kind"], "image");
    assert_eq!(json["rule"], "generic-authentic-image");
    assert_eq!(json["imageAnalysis"]["hasManipulation"], false);
    assert_eq!(json["imageAnalysis"]["confidence"], 82);
    assert!(matches!(verdict, CredibilityVerdict::Image(_)));
}
