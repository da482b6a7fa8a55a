//! Credibility verdicts
//!
//! One variant per submission kind. Only image verdicts carry an
//! [`ImageAnalysis`], so the JSON form of text and URL verdicts has no
//! `imageAnalysis` key at all.

use crate::submission::ContentKind;
use serde::Serialize;

/// Score and explanation shared by every verdict variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// 0..=100, higher is more reliable
    pub health_score: u8,
    #[serde(rename = "overallSummary")]
    pub summary: String,
    /// 0..=100, independent axis that co-varies with `health_score`
    pub source_credibility_score: u8,
    /// Detection order, not alphabetical
    pub manipulative_techniques: Vec<String>,
}

/// Image-specific findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub has_manipulation: bool,
    /// 0..=100
    pub confidence: u8,
    pub details: String,
}

/// Which text rule produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextRule {
    CovidCureClaim,
    GeneralHealthMisinfo,
    SuspiciousContent,
    DefaultReliable,
}

impl TextRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextRule::CovidCureClaim => "covid-cure-claim",
            TextRule::GeneralHealthMisinfo => "general-health-misinfo",
            TextRule::SuspiciousContent => "suspicious-content",
            TextRule::DefaultReliable => "default-reliable",
        }
    }
}

/// Which image rule produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageRule {
    FabricatedNewsImage,
    GenericAuthenticImage,
}

impl ImageRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRule::FabricatedNewsImage => "fabricated-news-image",
            ImageRule::GenericAuthenticImage => "generic-authentic-image",
        }
    }
}

/// Which keyword sets a text matched
///
/// `pseudoscience` is recorded but gates no rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordMatches {
    pub suspicious: bool,
    pub health_misinfo: bool,
    pub covid: bool,
    pub pseudoscience: bool,
    pub mentions_cure: bool,
    pub mentions_treatment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextVerdict {
    pub rule: TextRule,
    #[serde(flatten)]
    pub assessment: Assessment,
    #[serde(skip)]
    pub matches: KeywordMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlVerdict {
    pub rule: &'static str,
    #[serde(flatten)]
    pub assessment: Assessment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVerdict {
    pub rule: ImageRule,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub image_analysis: ImageAnalysis,
}

/// Structured output of the credibility heuristic engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CredibilityVerdict {
    Text(TextVerdict),
    Url(UrlVerdict),
    Image(ImageVerdict),
}

impl CredibilityVerdict {
    pub fn kind(&self) -> ContentKind {
        match self {
            CredibilityVerdict::Text(_) => ContentKind::Text,
            CredibilityVerdict::Url(_) => ContentKind::Url,
            CredibilityVerdict::Image(_) => ContentKind::Image,
        }
    }

    /// Name of the rule that fired
    pub fn rule_name(&self) -> &'static str {
        match self {
            CredibilityVerdict::Text(v) => v.rule.as_str(),
            CredibilityVerdict::Url(v) => v.rule,
            CredibilityVerdict::Image(v) => v.rule.as_str(),
        }
    }

    pub fn assessment(&self) -> &Assessment {
        match self {
            CredibilityVerdict::Text(v) => &v.assessment,
            CredibilityVerdict::Url(v) => &v.assessment,
            CredibilityVerdict::Image(v) => &v.assessment,
        }
    }

    pub fn health_score(&self) -> u8 {
        self.assessment().health_score
    }

    pub fn source_credibility_score(&self) -> u8 {
        self.assessment().source_credibility_score
    }

    pub fn summary(&self) -> &str {
        &self.assessment().summary
    }

    pub fn manipulative_techniques(&self) -> &[String] {
        &self.assessment().manipulative_techniques
    }

    /// Present only for image verdicts
    pub fn image_analysis(&self) -> Option<&ImageAnalysis> {
        match self {
            CredibilityVerdict::Image(v) => Some(&v.image_analysis),
            _ => None,
        }
    }
}
