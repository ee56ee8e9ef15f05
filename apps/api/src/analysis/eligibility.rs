//! Education-fit and full-time-fit multipliers applied at the end of the
//! adjustment chain.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::education::{
    normalize_education, normalize_requirements, tokens_related, EducationRequirements,
};
use crate::analysis::resume_signals::UNSPECIFIED;

static ANY_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(any|all)\s+(major|majors|discipline|disciplines|field|fields)\b")
        .expect("static any-field pattern")
});

const BROAD_ENGINEERING_TERMS: &[&str] = &[
    "engineering",
    "engineer",
    "technology",
    "tech",
    "computer",
    "computers",
    "computing",
    "software",
    "cs",
    "it",
    "information",
    "systems",
    "informationtechnology",
    "information-technology",
    "electrical",
    "electronics",
    "mechanical",
];

const MAINSTREAM_TERMS: &[&str] = &[
    "business",
    "finance",
    "financial",
    "economics",
    "marketing",
    "management",
    "accounting",
    "analytics",
    "analyst",
    "analysis",
    "data",
    "statistics",
    "math",
    "mathematics",
    "science",
    "sciences",
    "stem",
    "design",
];

const PART_TIME_INDICATORS: &[&str] = &[
    "part-time",
    "part time",
    "parttime",
    "freelance",
    "contractor",
    "consulting",
    "on-call",
    "on call",
];

pub const FULL_TIME_MISMATCH_MULTIPLIER: f64 = 0.92;

/// Weight of a substring-related token pair relative to an exact match.
const RELATED_MATCH_WEIGHT: f64 = 0.3;

/// Multiplier in `[0.6, 1.0]` for how well the resume education fits the JD.
///
/// Early exits, in order: open-to-all (1.0), unspecified resume education
/// (0.6), no JD requirement (0.9), broad engineering or mainstream asks
/// (lenient 1.0 / 0.9), requirements that normalize to nothing (0.9), resume
/// education that normalizes to nothing (0.7). Anything else is scored by
/// token overlap.
pub fn score_education_fit(jd: &EducationRequirements, resume_background: &str) -> f64 {
    if jd.open_to_all {
        return 1.0;
    }

    let raw = jd.raw_education_requirements.join(" ").to_lowercase();
    if ANY_FIELD.is_match(&raw) {
        return 1.0;
    }

    if resume_background.trim().is_empty() || resume_background == UNSPECIFIED {
        return 0.6;
    }

    if !jd.has_requirements() {
        return 0.9;
    }

    let jd_tokens = normalize_requirements(&jd.raw_education_requirements);
    let resume_tokens = normalize_education(resume_background);

    let is_engineering = |t: &String| BROAD_ENGINEERING_TERMS.contains(&t.as_str());
    let is_mainstream = |t: &String| is_engineering(t) || MAINSTREAM_TERMS.contains(&t.as_str());

    // Leniency outranks the empty-token fallbacks: a tokenless resume on a
    // broad ask still lands on the 0.9 floor.
    if !jd_tokens.is_empty() && jd_tokens.iter().all(is_engineering) {
        return if resume_tokens.iter().any(is_engineering) {
            1.0
        } else {
            0.9
        };
    }

    if !jd_tokens.is_empty() && jd_tokens.iter().all(is_mainstream) {
        return if resume_tokens.iter().any(is_mainstream) {
            1.0
        } else {
            0.9
        };
    }

    if jd_tokens.is_empty() {
        return 0.9;
    }
    if resume_tokens.is_empty() {
        return 0.7;
    }

    overlap_to_multiplier(token_overlap(&jd_tokens, &resume_tokens))
}

/// `(exact + 0.3 * related) / max(|jd|, |resume|)` over distinct tokens.
///
/// Related pairs are only counted between tokens that found no exact match.
fn token_overlap(jd_tokens: &[String], resume_tokens: &[String]) -> f64 {
    let jd: BTreeSet<&str> = jd_tokens.iter().map(String::as_str).collect();
    let resume: BTreeSet<&str> = resume_tokens.iter().map(String::as_str).collect();

    let exact: BTreeSet<&str> = jd.intersection(&resume).copied().collect();

    let related = jd
        .iter()
        .filter(|t| !exact.contains(*t))
        .map(|jd_token| {
            resume
                .iter()
                .filter(|r| !exact.contains(*r))
                .filter(|r| tokens_related(jd_token, r))
                .count()
        })
        .sum::<usize>();

    let denominator = jd.len().max(resume.len());
    if denominator == 0 {
        return 0.0;
    }

    (exact.len() as f64 + related as f64 * RELATED_MATCH_WEIGHT) / denominator as f64
}

/// Piecewise-linear map: 0 → 0.6, 0.1 → 0.75, 0.3 → 0.9, ≥0.6 → 1.0.
fn overlap_to_multiplier(overlap: f64) -> f64 {
    if overlap >= 0.6 {
        1.0
    } else if overlap >= 0.3 {
        0.9 + (overlap - 0.3) * (0.1 / 0.3)
    } else if overlap >= 0.1 {
        0.75 + (overlap - 0.1) * (0.15 / 0.2)
    } else {
        0.6 + overlap * 1.5
    }
}

/// 0.92 when the JD demands full-time and the resume reads as part-time work.
pub fn score_full_time_fit(jd: &EducationRequirements, resume_text: &str) -> f64 {
    if !jd.full_time_only {
        return 1.0;
    }

    let lower = resume_text.to_lowercase();
    if PART_TIME_INDICATORS.iter().any(|i| lower.contains(i)) {
        FULL_TIME_MISMATCH_MULTIPLIER
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requiring(reqs: &[&str]) -> EducationRequirements {
        EducationRequirements {
            raw_education_requirements: reqs.iter().map(|r| r.to_string()).collect(),
            open_to_all: false,
            full_time_only: false,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_open_to_all_is_always_one() {
        let jd = EducationRequirements {
            open_to_all: true,
            ..requiring(&["nursing"])
        };
        assert_eq!(score_education_fit(&jd, "unspecified"), 1.0);
        assert_eq!(score_education_fit(&jd, "B.A. History"), 1.0);
    }

    #[test]
    fn test_any_field_phrasing_counts_as_open() {
        let jd = requiring(&["any discipline welcome"]);
        assert_eq!(score_education_fit(&jd, "unspecified"), 1.0);
    }

    #[test]
    fn test_unspecified_resume_without_requirements() {
        assert_eq!(score_education_fit(&requiring(&[]), "unspecified"), 0.6);
    }

    #[test]
    fn test_no_requirements_with_education() {
        assert_eq!(score_education_fit(&requiring(&[]), "B.A. History"), 0.9);
    }

    #[test]
    fn test_requirements_with_only_stop_words() {
        assert_eq!(score_education_fit(&requiring(&["a degree"]), "B.A. History"), 0.9);
    }

    #[test]
    fn test_resume_education_with_only_stop_words() {
        assert_eq!(
            score_education_fit(&requiring(&["nursing"]), "University degree"),
            0.7
        );
    }

    #[test]
    fn test_leniency_applies_before_tokenless_resume_fallback() {
        let jd = requiring(&["Bachelor's degree in Engineering"]);
        assert_eq!(normalize_requirements(&jd.raw_education_requirements), vec!["engineering"]);
        assert!(normalize_education("University degree").is_empty());
        assert_eq!(score_education_fit(&jd, "University degree"), 0.9);

        let jd = requiring(&["Degree in Finance or Economics"]);
        assert_eq!(score_education_fit(&jd, "University degree"), 0.9);
    }

    #[test]
    fn test_broad_engineering_is_lenient() {
        let jd = requiring(&["computer science"]);
        // "science" is mainstream, so this is the mainstream branch.
        assert_eq!(score_education_fit(&jd, "B.S. Software Engineering"), 1.0);

        let jd = requiring(&["engineering"]);
        assert_eq!(score_education_fit(&jd, "B.S. Electrical Engineering"), 1.0);
        assert_eq!(score_education_fit(&jd, "B.A. History"), 0.9);
    }

    #[test]
    fn test_mainstream_is_lenient() {
        let jd = requiring(&["finance", "economics"]);
        assert_eq!(score_education_fit(&jd, "B.S. Data Analytics"), 1.0);
        assert_eq!(score_education_fit(&jd, "B.A. History"), 0.9);
    }

    #[test]
    fn test_overlap_exact_match() {
        let jd = requiring(&["nursing"]);
        assert_eq!(score_education_fit(&jd, "B.S. Nursing"), 1.0);
    }

    #[test]
    fn test_overlap_no_match_floors_at_point_six() {
        let jd = requiring(&["nursing"]);
        assert!(approx(score_education_fit(&jd, "B.A. History"), 0.6));
    }

    #[test]
    fn test_overlap_related_tokens() {
        // "biology" vs "biologys": one related pair over max(1, 1) tokens.
        assert!(approx(token_overlap(&["biology".into()], &["biologys".into()]), 0.3));
        let jd = requiring(&["biology"]);
        assert!(approx(score_education_fit(&jd, "Biologys"), 0.9));
    }

    #[test]
    fn test_overlap_map_is_continuous_at_breakpoints() {
        assert!(approx(overlap_to_multiplier(0.0), 0.6));
        assert!(approx(overlap_to_multiplier(0.1), 0.75));
        assert!(approx(overlap_to_multiplier(0.3), 0.9));
        assert!(approx(overlap_to_multiplier(0.6), 1.0));
        assert!(overlap_to_multiplier(0.45) > 0.9 && overlap_to_multiplier(0.45) < 1.0);
    }

    #[test]
    fn test_full_time_fit() {
        let mut jd = requiring(&[]);
        assert_eq!(score_full_time_fit(&jd, "Freelance designer"), 1.0);

        jd.full_time_only = true;
        assert_eq!(score_full_time_fit(&jd, "Freelance designer"), 0.92);
        assert_eq!(score_full_time_fit(&jd, "Software intern"), 1.0);
    }
}
