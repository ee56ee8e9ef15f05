//! Education requirements: phrase extraction from a JD, open-to-all and
//! full-time-only detection, and the token normalizer shared by the
//! major-mismatch check and the education-fit multiplier.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::text::ScannedText;

/// Education constraints stated by a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRequirements {
    pub raw_education_requirements: Vec<String>,
    pub open_to_all: bool,
    pub full_time_only: bool,
}

impl EducationRequirements {
    pub fn has_requirements(&self) -> bool {
        !self.raw_education_requirements.is_empty()
    }
}

static REQUIREMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"degree in [^,.;]+",
        r"diploma in [^,.;]+",
        r"background in [^,.;]+",
        r"studied [^,.;]+",
        r"major in [^,.;]+",
        r"majoring in [^,.;]+",
        r"bachelor[^,.;]*in [^,.;]+",
        r"master[^,.;]*in [^,.;]+",
        r"phd[^,.;]*in [^,.;]+",
        r"education in [^,.;]+",
        r"qualification in [^,.;]+",
        r"certification in [^,.;]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static education pattern"))
    .collect()
});

static REQUIREMENT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(degree|diploma|background|studied|major|majoring|bachelor|master|phd|education|qualification|certification)\s+(in|of)\s+",
    )
    .expect("static prefix pattern")
});

static EDUCATION_CONTEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(degree|diploma|major|background|education|qualification|studied)")
        .expect("static context pattern")
});

static FULL_TIME_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"full[-\s]time only|must be full[-\s]time|full[-\s]time required|full[-\s]time commitment|not open to part[-\s]time|part[-\s]time not accepted",
    )
    .expect("static full-time pattern")
});

const FIELD_KEYWORDS: &[&str] = &[
    "computer science",
    "engineering",
    "mathematics",
    "statistics",
    "business",
    "economics",
    "finance",
    "accounting",
    "marketing",
    "data science",
    "information systems",
    "software engineering",
    "electrical engineering",
    "mechanical engineering",
    "civil engineering",
];

static FIELD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    FIELD_KEYWORDS
        .iter()
        .map(|field| {
            let pattern = format!(r"\b{}\b", regex::escape(field));
            (*field, Regex::new(&pattern).expect("static field pattern"))
        })
        .collect()
});

const OPEN_TO_ALL_PHRASES: &[&str] = &[
    "open to all majors",
    "all majors welcome",
    "any major",
    "all backgrounds",
    "open to all backgrounds",
    "any degree",
    "all degrees",
    "no specific major required",
    "major agnostic",
];

/// Characters on each side of a field mention searched for education wording.
const CONTEXT_WINDOW: usize = 50;

/// Words that identify a JD line as talking about education.
pub const JD_EDUCATION_LINE_WORDS: &[&str] = &[
    "degree",
    "diploma",
    "major",
    "education",
    "background",
    "qualification",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "at", "to", "for", "of", "with", "and", "or", "but", "is",
    "are", "was", "were", "be", "been", "degree", "degrees", "diploma", "diplomas", "major",
    "majors", "minor", "minors", "bachelor", "bachelors", "master", "masters", "phd",
    "doctorate", "doctorates", "studied", "study", "studying", "background", "field", "fields",
    "from", "university", "college", "school", "institution", "obtained", "completed",
    "pursuing", "pursue", "second", "double", "concentration", "specialization",
    "specializations",
];

/// Extracts education requirements and employment constraints from a JD.
pub fn extract_education_requirements(jd_text: &str) -> EducationRequirements {
    let text = jd_text.to_lowercase();
    EducationRequirements {
        raw_education_requirements: extract_requirement_phrases(&text),
        open_to_all: detect_open_to_all(&text),
        full_time_only: FULL_TIME_ONLY.is_match(&text),
    }
}

fn extract_requirement_phrases(text: &str) -> Vec<String> {
    let mut requirements: Vec<String> = Vec::new();

    for line in text.split(['\n', '.', ';']) {
        for pattern in REQUIREMENT_PATTERNS.iter() {
            for found in pattern.find_iter(line) {
                let cleaned = REQUIREMENT_PREFIX.replace(found.as_str().trim(), "");
                if cleaned.chars().count() > 2 {
                    requirements.push(cleaned.into_owned());
                }
            }
        }
    }

    for (field, pattern) in FIELD_PATTERNS.iter() {
        let Some(found) = pattern.find(text) else {
            continue;
        };
        let window = context_window(text, found.start(), found.end(), CONTEXT_WINDOW);
        if EDUCATION_CONTEXT.is_match(window) && !requirements.iter().any(|r| r.contains(field)) {
            requirements.push((*field).to_string());
        }
    }

    let mut seen = BTreeSet::new();
    requirements.retain(|r| seen.insert(r.clone()));
    requirements
}

/// Slice of `text` around `[start, end)` widened by `radius` bytes, snapped
/// to char boundaries.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let mut lo = start.saturating_sub(radius);
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + radius).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    &text[lo..hi]
}

fn detect_open_to_all(text: &str) -> bool {
    OPEN_TO_ALL_PHRASES.iter().any(|p| text.contains(p))
}

/// Lines of a JD that talk about education, quoted verbatim.
pub fn jd_education_lines(scanned: &ScannedText<'_>) -> Vec<String> {
    scanned.lines_where(|line| JD_EDUCATION_LINE_WORDS.iter().any(|w| line.contains(w)))
}

/// Normalizes free-form education text into meaningful tokens.
///
/// Lowercases, replaces punctuation with spaces, and drops stop words,
/// degree words and tokens shorter than two characters. `"unspecified"`
/// normalizes to nothing.
pub fn normalize_education(text: &str) -> Vec<String> {
    if text.is_empty() || text == "unspecified" {
        return Vec::new();
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(String::from)
        .collect()
}

/// Union of normalized tokens across several requirement phrases, first-seen order.
pub fn normalize_requirements(requirements: &[String]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for requirement in requirements {
        for token in normalize_education(requirement) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }
    tokens
}

/// Two tokens are related when one contains the other.
pub fn tokens_related(a: &str, b: &str) -> bool {
    a != b && (a.contains(b) || b.contains(a))
}

/// True when no JD token matches or relates to any resume token.
///
/// Both sides must carry tokens; an empty side is not evidence of a mismatch.
pub fn is_major_mismatch(jd_tokens: &[String], resume_tokens: &[String]) -> bool {
    if jd_tokens.is_empty() || resume_tokens.is_empty() {
        return false;
    }
    let overlaps = jd_tokens.iter().any(|jd| {
        resume_tokens
            .iter()
            .any(|resume| jd == resume || tokens_related(jd, resume))
    });
    !overlaps
}
