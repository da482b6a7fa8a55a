//! Credibility heuristic engine
//!
//! Pure, synchronous, stateless: `evaluate` maps a [`ContentSubmission`] to a
//! [`CredibilityVerdict`] by walking fixed rule tables (see [`rules`]).
//! No I/O, no randomness, safe to call from any number of tasks at once.
//!
//! # Branches
//! - **Image**: file name markers decide fabricated-news vs generic-authentic
//! - **Text**: keyword sets decide covid-cure-claim, general-health-misinfo,
//!   suspicious-content, or default-reliable (first match wins)
//! - **URL**: always the url-generic verdict; the URL is never fetched

pub mod rules;

use crate::submission::{ContentSubmission, ImageRef};
use crate::verdict::{CredibilityVerdict, ImageRule, ImageVerdict, TextRule, TextVerdict, UrlVerdict};
use tracing::debug;

/// Rule name reported by URL verdicts
pub const URL_GENERIC_RULE: &str = "url-generic";

/// Evaluate one submission
pub fn evaluate(submission: &ContentSubmission) -> CredibilityVerdict {
    match submission {
        ContentSubmission::Text { text } => CredibilityVerdict::Text(evaluate_text(text)),
        ContentSubmission::Url { url } => CredibilityVerdict::Url(evaluate_url(url)),
        ContentSubmission::Image { image } => CredibilityVerdict::Image(evaluate_image(image)),
    }
}

fn evaluate_text(text: &str) -> TextVerdict {
    let lowered = text.to_lowercase();
    let matches = rules::match_keywords(&lowered);

    let (rule, template) = rules::TEXT_RULES
        .iter()
        .find(|entry| (entry.applies)(&matches))
        .map(|entry| (entry.rule, entry.template))
        .unwrap_or((TextRule::DefaultReliable, &rules::DEFAULT_RELIABLE));

    debug!(
        rule = rule.as_str(),
        suspicious = matches.suspicious,
        health_misinfo = matches.health_misinfo,
        covid = matches.covid,
        pseudoscience = matches.pseudoscience,
        "Text rule selected"
    );

    TextVerdict {
        rule,
        assessment: template.assessment(),
        matches,
    }
}

fn evaluate_url(_url: &str) -> UrlVerdict {
    UrlVerdict {
        rule: URL_GENERIC_RULE,
        assessment: rules::URL_GENERIC.assessment(),
    }
}

fn evaluate_image(image: &ImageRef) -> ImageVerdict {
    let file_name = image.file_name.to_lowercase();
    let (rule, template) = if rules::contains_any(&file_name, rules::NEWS_IMAGE_MARKERS) {
        (ImageRule::FabricatedNewsImage, &rules::FABRICATED_NEWS_IMAGE)
    } else {
        (ImageRule::GenericAuthenticImage, &rules::GENERIC_AUTHENTIC_IMAGE)
    };

    debug!(rule = rule.as_str(), "Image rule selected");

    ImageVerdict {
        rule,
        assessment: template.verdict.assessment(),
        image_analysis: template.image_analysis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_priority_cure_claim_over_general() {
        let verdict = evaluate(&ContentSubmission::text("proven cure for covid"));
        assert_eq!(verdict.rule_name(), "covid-cure-claim");
        assert_eq!(verdict.health_score(), 8);
        assert_eq!(verdict.source_credibility_score(), 5);
        assert_eq!(verdict.manipulative_techniques().len(), 6);
    }

    #[test]
    fn test_general_health_misinfo_without_covid() {
        let verdict = evaluate(&ContentSubmission::text("This tea cures everything"));
        assert_eq!(verdict.rule_name(), "general-health-misinfo");
        assert_eq!(verdict.health_score(), 18);
        assert_eq!(verdict.source_credibility_score(), 15);
    }

    #[test]
    fn test_health_rules_outrank_suspicious() {
        let verdict = evaluate(&ContentSubmission::text("URGENT: miracle cure exposed"));
        assert_eq!(verdict.rule_name(), "general-health-misinfo");
    }

    #[test]
    fn test_text_verdict_keeps_keyword_matches() {
        let verdict = evaluate(&ContentSubmission::text("Alkaline water and a weekly detox"));
        match verdict {
            CredibilityVerdict::Text(v) => {
                assert_eq!(v.rule, TextRule::DefaultReliable);
                assert!(v.matches.pseudoscience);
            }
            other => panic!("expected text verdict, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_image() {
        let verdict = evaluate(&ContentSubmission::image("holiday.png"));
        let analysis = verdict.image_analysis().expect("image verdict has analysis");
        assert_eq!(verdict.health_score(), 75);
        assert!(!analysis.has_manipulation);
        assert_eq!(analysis.confidence, 82);
        assert!(verdict.manipulative_techniques().is_empty());
    }

    #[test]
    fn test_url_has_no_image_analysis() {
        let verdict = evaluate(&ContentSubmission::url("https://example.com/breaking-news"));
        assert_eq!(verdict.rule_name(), URL_GENERIC_RULE);
        assert_eq!(verdict.health_score(), 68);
        assert!(verdict.image_analysis().is_none());
    }
}
