//! Signal analyzer
//!
//! Pattern-based scoring for free text. Where the credibility engine asks
//! "which rule fires", the signal analyzer counts indicator vocabularies and
//! turns the counts into a graded score, a profile and a technique list.
//!
//! # Scoring
//! - Base 50
//! - +8 per factual indicator, -12 per suspicious, -15 per conspiracy,
//!   -5 per emotional, -2 per `!`, -3 per ALL-CAPS word
//! - Length: < 20 chars `max(score - 20, 10)`, < 100 chars
//!   `max(score - 10, 15)`, > 2000 chars `+5`
//! - Content-hash variation in [-10, 10], then clamp to [10, 95]
//!
//! # Profiles (first match wins)
//! 1. **Factual**: factual >= 3
//! 2. **Suspicious**: suspicious >= 2 or conspiracy >= 2
//! 3. **Emotional**: emotional >= 3 or `!` >= 5
//! 4. **Brief**: fewer than 50 characters
//! 5. **General**: everything else
//!
//! The content hash is the first 32 bits of SHA-256 over the text, so the
//! same text always yields the same report.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

static FACTUAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(research|study|university|professor|peer.reviewed|scientific|evidence|data|statistics|analysis|published|journal|academic|according to|found that)\b")
        .expect("factual pattern is valid")
});

static SUSPICIOUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(cure|miracle|secret|they.{0,10}want|big.pharma|doctors.hate|breakthrough|amazing|shocking|revealed|exposed|hidden truth)\b")
        .expect("suspicious pattern is valid")
});

static CONSPIRACY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(fake|hoax|conspiracy|cover.up|mainstream.media|deep.state|they.control|wake.up|sheeple|truth|lies|manipulation|agenda)\b")
        .expect("conspiracy pattern is valid")
});

static EMOTIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(shocking|amazing|incredible|unbelievable|must.see|you.won.t.believe|mind.blown|urgent|crisis|danger|disaster)\b")
        .expect("emotional pattern is valid")
});

static CAPS_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("caps pattern is valid"));

/// Indicator counts for one text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorCounts {
    pub factual: usize,
    pub suspicious: usize,
    pub conspiracy: usize,
    pub emotional: usize,
    #[serde(skip)]
    pub question_marks: usize,
    #[serde(skip)]
    pub exclamation_marks: usize,
    #[serde(skip)]
    pub caps_words: usize,
}

impl IndicatorCounts {
    pub fn count(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self {
            factual: FACTUAL.find_iter(&lowered).count(),
            suspicious: SUSPICIOUS.find_iter(&lowered).count(),
            conspiracy: CONSPIRACY.find_iter(&lowered).count(),
            emotional: EMOTIONAL.find_iter(&lowered).count(),
            question_marks: text.matches('?').count(),
            exclamation_marks: text.matches('!').count(),
            caps_words: CAPS_WORD.find_iter(text).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalProfile {
    Factual,
    Suspicious,
    Emotional,
    Brief,
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMetadata {
    pub processing_time: String,
    pub confidence: f64,
    pub method: &'static str,
    pub word_count: usize,
    pub analysis_depth: &'static str,
    pub indicators: IndicatorCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub word_count: usize,
    pub readability_score: u8,
    pub analysis_note: String,
    pub language_complexity: &'static str,
}

/// Graded report for one text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    pub profile: SignalProfile,
    pub health_score: u8,
    pub overall_summary: String,
    pub source_credibility_score: u8,
    pub manipulative_techniques: Vec<String>,
    pub analysis_metadata: SignalMetadata,
    pub text_analysis: TextAnalysis,
}

/// Pattern-based text scorer
#[derive(Debug, Clone, Default)]
pub struct SignalAnalyzer;

impl SignalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> SignalReport {
        report(text, content_hash(text))
    }
}

/// Build the report for `text` given its content hash
fn report(text: &str, hash: u32) -> SignalReport {
    let counts = IndicatorCounts::count(text);
    let length = text.chars().count();
    let word_count = text.split_whitespace().count();
    let variation = (hash % 21) as i64 - 10;

    let health = score(&counts, length, variation);
    let profile = classify(&counts, length);
    let mut techniques = profile_techniques(profile, &counts);

    if hash % 3 == 0 && health < 70 {
        techniques.push("Selective Information Presentation".to_string());
    }
    if hash % 4 == 0 && counts.emotional > 0 {
        techniques.push("Persuasive Language Detected".to_string());
    }

    let source_credibility = (health as i64 + variation.div_euclid(2)).clamp(10, 95) as u8;
    // Capped, not floored: heavy suspicious counts drive it below zero
    let confidence =
        (0.6 + counts.factual as f64 * 0.05 - counts.suspicious as f64 * 0.08).min(0.95);

    debug!(
        profile = ?profile,
        score = health,
        factual = counts.factual,
        suspicious = counts.suspicious,
        conspiracy = counts.conspiracy,
        emotional = counts.emotional,
        "Signal analysis complete"
    );

    SignalReport {
        profile,
        health_score: health,
        overall_summary: summary(profile, &counts, word_count),
        source_credibility_score: source_credibility,
        manipulative_techniques: techniques,
        analysis_metadata: SignalMetadata {
            processing_time: format!("{:.1}s", 1.5 + (hash % 10) as f64 / 10.0),
            confidence,
            method: "Advanced Pattern Analysis",
            word_count,
            analysis_depth: if word_count > 100 { "Comprehensive" } else { "Standard" },
            indicators: counts,
        },
        text_analysis: TextAnalysis {
            word_count,
            readability_score: (60 + counts.factual as i64 * 5 - counts.emotional as i64 * 3)
                .clamp(10, 100) as u8,
            analysis_note: format!(
                "Analyzed linguistic patterns: {} factual indicators, {} suspicious elements",
                counts.factual, counts.suspicious
            ),
            language_complexity: if counts.factual >= 3 {
                "Academic"
            } else if word_count < 100 {
                "Simplified"
            } else {
                "Standard"
            },
        },
    }
}

fn content_hash(text: &str) -> u32 {
    let digest = Sha256::digest(text.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

fn score(counts: &IndicatorCounts, length: usize, variation: i64) -> u8 {
    let mut base: i64 = 50;
    base += counts.factual as i64 * 8;
    base -= counts.suspicious as i64 * 12;
    base -= counts.conspiracy as i64 * 15;
    base -= counts.emotional as i64 * 5;
    base -= counts.exclamation_marks as i64 * 2;
    base -= counts.caps_words as i64 * 3;

    if length < 20 {
        base = (base - 20).max(10);
    } else if length < 100 {
        base = (base - 10).max(15);
    } else if length > 2000 {
        base += 5;
    }

    (base + variation).clamp(10, 95) as u8
}

fn classify(counts: &IndicatorCounts, length: usize) -> SignalProfile {
    if counts.factual >= 3 {
        SignalProfile::Factual
    } else if counts.suspicious >= 2 || counts.conspiracy >= 2 {
        SignalProfile::Suspicious
    } else if counts.emotional >= 3 || counts.exclamation_marks >= 5 {
        SignalProfile::Emotional
    } else if length < 50 {
        SignalProfile::Brief
    } else {
        SignalProfile::General
    }
}

fn profile_techniques(profile: SignalProfile, c: &IndicatorCounts) -> Vec<String> {
    let mut techniques: Vec<&str> = match profile {
        SignalProfile::Factual => vec!["Evidence-based Language", "Academic Citations", "Professional Tone"],
        SignalProfile::Suspicious => vec![
            "Unsubstantiated Claims",
            "Emotional Manipulation",
            "Anti-establishment Rhetoric",
        ],
        SignalProfile::Emotional => vec!["Emotional Manipulation", "Sensational Language", "Potential Bias"],
        SignalProfile::Brief => vec!["Insufficient Context", "Brevity Limitations"],
        SignalProfile::General => vec!["Mixed Credibility Signals", "Verification Needed"],
    };

    match profile {
        SignalProfile::Factual if c.suspicious > 0 => techniques.push("Minor Sensational Elements"),
        SignalProfile::Suspicious => {
            if c.suspicious >= 3 {
                techniques.push("Health Misinformation Patterns");
            }
            if c.conspiracy >= 2 {
                techniques.push("Conspiracy Theory Elements");
            }
        }
        SignalProfile::Emotional if c.question_marks >= 3 => techniques.push("Leading Questions"),
        SignalProfile::Brief if c.suspicious > 0 => techniques.push("Unverified Claims"),
        SignalProfile::General => {
            if c.emotional >= 2 {
                techniques.push("Moderate Emotional Appeal");
            }
            if c.suspicious + c.conspiracy >= 2 {
                techniques.push("Some Questionable Claims");
            }
        }
        _ => {}
    }

    techniques.into_iter().map(String::from).collect()
}

fn summary(profile: SignalProfile, c: &IndicatorCounts, word_count: usize) -> String {
    match profile {
        SignalProfile::Factual => format!(
            "This content demonstrates strong factual indicators with {} academic/research references. \
             The analysis shows evidence-based language patterns and appears to cite credible sources. \
             The tone is measured and professional, suggesting educational or informational intent. \
             Content length of {} words provides adequate detail for verification. \
             Risk indicators are minimal ({} suspicious terms, {} conspiracy terms), supporting overall reliability. \
             The language suggests adherence to journalistic or academic standards.",
            c.factual, word_count, c.suspicious, c.conspiracy
        ),
        SignalProfile::Suspicious => format!(
            "This content raises significant credibility concerns with {} suspicious health/miracle claims \
             and {} conspiracy-related terms. The analysis detects language patterns commonly associated \
             with misinformation, including unsubstantiated promises and anti-establishment rhetoric. \
             The presence of {} emotional trigger words and {} exclamation marks suggests persuasive rather \
             than informational intent. Content appears designed to bypass critical thinking through \
             emotional appeal rather than evidence presentation.",
            c.suspicious, c.conspiracy, c.emotional, c.exclamation_marks
        ),
        SignalProfile::Emotional => format!(
            "This content shows high emotional manipulation indicators with {} sensational terms and {} \
             exclamation marks. The analysis suggests content designed to provoke strong emotional responses \
             rather than inform. The use of {} all-caps words and sensational language patterns indicates \
             potential bias or agenda-driven messaging. While not necessarily false, the presentation style \
             raises questions about objectivity and may indicate selective information presentation.",
            c.emotional, c.exclamation_marks, c.caps_words
        ),
        SignalProfile::Brief => format!(
            "This brief content ({} words) provides limited context for comprehensive analysis. \
             While brevity doesn't indicate unreliability, the short format prevents thorough verification \
             of claims and context. The analysis detected {} factual indicators and {} potential red flags. \
             Brief content often oversimplifies complex topics and may omit important nuances or caveats \
             necessary for full understanding.",
            word_count, c.factual, c.suspicious
        ),
        SignalProfile::General => format!(
            "This content presents a mixed credibility profile with {} factual indicators and {} potential \
             concern markers. The analysis suggests moderate reliability with some elements requiring \
             verification. Content length ({} words) provides reasonable detail, though the presence of {} \
             emotional triggers and {} exclamation marks suggests potential bias. Overall tone appears {} \
             with varying degrees of substantiation for claims made.",
            c.factual,
            c.suspicious + c.conspiracy,
            word_count,
            c.emotional,
            c.exclamation_marks,
            if c.exclamation_marks <= 2 { "professional" } else { "informal" }
        ),
    }
}
