//! Rule tables for the credibility heuristic engine
//!
//! Keyword sets and verdict templates are reproduced verbatim so that
//! verdicts stay identical to the product's published behavior. Rule order
//! in [`TEXT_RULES`] is the evaluation priority: first match wins.

use crate::verdict::{Assessment, ImageAnalysis, KeywordMatches, TextRule};

// ============================================================================
// Keyword sets (lower-case, substring match)
// ============================================================================

pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "breaking", "urgent", "shocking", "died", "killed", "secret", "exposed",
];

pub const HEALTH_MISINFO_KEYWORDS: &[&str] = &[
    "proven cure",
    "cures",
    "miracle cure",
    "natural cure",
    "home remedy for",
    "guaranteed to cure",
];

pub const COVID_KEYWORDS: &[&str] = &["covid", "coronavirus", "covid-19", "pandemic"];

/// Matched and recorded, but no rule is gated on it
pub const PSEUDOSCIENCE_KEYWORDS: &[&str] =
    &["detox", "boost immunity", "alkaline", "natural healing"];

/// Image file name markers for the fabricated-news rule
pub const NEWS_IMAGE_MARKERS: &[&str] = &["breaking", "news", "modi"];

// ============================================================================
// Verdict templates
// ============================================================================

/// Fixed scores, summary and technique labels for one rule outcome
#[derive(Debug, Clone, Copy)]
pub struct VerdictTemplate {
    pub health_score: u8,
    pub source_credibility_score: u8,
    pub summary: &'static str,
    pub techniques: &'static [&'static str],
}

impl VerdictTemplate {
    pub fn assessment(&self) -> Assessment {
        Assessment {
            health_score: self.health_score,
            summary: self.summary.to_string(),
            source_credibility_score: self.source_credibility_score,
            manipulative_techniques: self.techniques.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Image rule outcome: verdict template plus the image findings
#[derive(Debug, Clone, Copy)]
pub struct ImageTemplate {
    pub verdict: VerdictTemplate,
    pub has_manipulation: bool,
    pub confidence: u8,
    pub details: &'static str,
}

impl ImageTemplate {
    pub fn image_analysis(&self) -> ImageAnalysis {
        ImageAnalysis {
            has_manipulation: self.has_manipulation,
            confidence: self.confidence,
            details: self.details.to_string(),
        }
    }
}

pub const COVID_CURE_CLAIM: VerdictTemplate = VerdictTemplate {
    health_score: 8,
    source_credibility_score: 5,
    summary: "⚠️ DANGEROUS HEALTH MISINFORMATION DETECTED. This text promotes unproven treatments for COVID-19, which is extremely dangerous and potentially life-threatening. No home remedies, including ginger and lemon water, have been scientifically proven to cure COVID-19. Such claims violate medical consensus and WHO guidelines. Spreading medical misinformation can lead to delayed proper treatment and increased health risks. Always consult healthcare professionals and follow evidence-based medical advice for COVID-19 treatment.",
    techniques: &[
        "False medical claims without scientific evidence",
        "Promotion of unproven COVID-19 'cures'",
        "Dangerous health misinformation spreading",
        "Misuse of 'proven' terminology for unverified treatments",
        "Potential to delay proper medical care",
        "Violation of health authority guidelines",
    ],
};

pub const GENERAL_HEALTH_MISINFO: VerdictTemplate = VerdictTemplate {
    health_score: 18,
    source_credibility_score: 15,
    summary: "This text contains unverified health claims that lack scientific support. Medical information should always be verified through peer-reviewed sources and healthcare professionals.",
    techniques: &[
        "Unsubstantiated health claims",
        "Lack of scientific evidence",
        "Potential medical misinformation",
    ],
};

pub const SUSPICIOUS_CONTENT: VerdictTemplate = VerdictTemplate {
    health_score: 25,
    source_credibility_score: 20,
    summary: "This text contains language patterns commonly associated with misinformation, including sensational claims and urgency tactics. Further verification recommended.",
    techniques: &["Sensational language", "Urgency manipulation", "Unverified claims"],
};

pub const DEFAULT_RELIABLE: VerdictTemplate = VerdictTemplate {
    health_score: 78,
    source_credibility_score: 72,
    summary: "Text analysis shows typical characteristics of reliable information with appropriate sourcing and measured language.",
    techniques: &[],
};

pub const URL_GENERIC: VerdictTemplate = VerdictTemplate {
    health_score: 68,
    source_credibility_score: 65,
    summary: "URL analysis completed. Domain reputation and content structure evaluated for reliability indicators.",
    techniques: &[],
};

pub const FABRICATED_NEWS_IMAGE: ImageTemplate = ImageTemplate {
    verdict: VerdictTemplate {
        health_score: 15,
        source_credibility_score: 5,
        summary: "⚠️ HIGH RISK OF MISINFORMATION DETECTED. This image contains several red flags typical of fake news: sensational headline claiming death of a public figure without credible sources, unprofessional presentation with dramatic 'BREAKING NEWS' styling, and lack of verifiable information. The claim appears to be completely fabricated as no credible news sources have reported this information. This type of content is often created to spread panic or misinformation on social media.",
        techniques: &[
            "Sensational death claim without evidence",
            "Dramatic 'BREAKING NEWS' presentation to create urgency",
            "Lack of credible source attribution",
            "Emotional manipulation targeting public figure",
            "Social media panic spreading tactics",
            "Fabricated news content designed to go viral",
        ],
    },
    has_manipulation: true,
    confidence: 95,
    details: "Image analysis reveals characteristics typical of fake news graphics: non-standard news layout, suspicious typography, lack of official news channel branding, and content inconsistent with verified news sources. The dramatic presentation and unsubstantiated claim strongly suggest this is fabricated content designed to spread misinformation.",
};

pub const GENERIC_AUTHENTIC_IMAGE: ImageTemplate = ImageTemplate {
    verdict: VerdictTemplate {
        health_score: 75,
        source_credibility_score: 70,
        summary: "This image appears to be authentic with no obvious signs of manipulation or misinformation detected. Standard visual analysis completed.",
        techniques: &[],
    },
    has_manipulation: false,
    confidence: 82,
    details: "No obvious signs of digital manipulation detected. Image metadata and visual characteristics appear consistent with authentic content.",
};

// ============================================================================
// Text rule table
// ============================================================================

/// One gated text rule
pub struct TextRuleEntry {
    pub rule: TextRule,
    pub applies: fn(&KeywordMatches) -> bool,
    pub template: &'static VerdictTemplate,
}

fn covid_cure_claim(m: &KeywordMatches) -> bool {
    (m.health_misinfo || m.mentions_cure) && m.covid
}

fn general_health_misinfo(m: &KeywordMatches) -> bool {
    m.health_misinfo || (m.covid && (m.mentions_cure || m.mentions_treatment))
}

fn suspicious_content(m: &KeywordMatches) -> bool {
    m.suspicious
}

/// Gated rules in priority order; [`DEFAULT_RELIABLE`] applies when none match
pub const TEXT_RULES: &[TextRuleEntry] = &[
    TextRuleEntry {
        rule: TextRule::CovidCureClaim,
        applies: covid_cure_claim,
        template: &COVID_CURE_CLAIM,
    },
    TextRuleEntry {
        rule: TextRule::GeneralHealthMisinfo,
        applies: general_health_misinfo,
        template: &GENERAL_HEALTH_MISINFO,
    },
    TextRuleEntry {
        rule: TextRule::SuspiciousContent,
        applies: suspicious_content,
        template: &SUSPICIOUS_CONTENT,
    },
];

/// True when `haystack` contains any of `keywords`
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Match a lower-cased text against every keyword set
pub fn match_keywords(lowered: &str) -> KeywordMatches {
    KeywordMatches {
        suspicious: contains_any(lowered, SUSPICIOUS_KEYWORDS),
        health_misinfo: contains_any(lowered, HEALTH_MISINFO_KEYWORDS),
        covid: contains_any(lowered, COVID_KEYWORDS),
        pseudoscience: contains_any(lowered, PSEUDOSCIENCE_KEYWORDS),
        mentions_cure: lowered.contains("cure"),
        mentions_treatment: lowered.contains("treatment"),
    }
}
