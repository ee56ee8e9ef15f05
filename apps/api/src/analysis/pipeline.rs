//! Analysis entry point: input validation, the pure `analyze` pipeline and the
//! `ReadinessAnalyzer` seam that `AppState` carries.

use async_trait::async_trait;
use tracing::debug;

use crate::analysis::adjustments::{adjust_score, AdjustmentContext};
use crate::analysis::dimensions::score_dimensions;
use crate::analysis::jd_signals::extract_jd_evidence;
use crate::analysis::pairing::pair_jd_with_resume;
use crate::analysis::report::{assemble_analysis, AnalysisResult};
use crate::analysis::resume_signals::extract_resume_evidence;
use crate::analysis::text::word_count;
use crate::errors::{AppError, ValidationError};

/// JDs shorter than this are rejected as too vague to score.
pub const MIN_JD_WORDS: usize = 30;

/// Rejects inputs the pipeline cannot score meaningfully.
pub fn validate_inputs(jd_text: &str, resume_text: &str) -> Result<(), ValidationError> {
    if jd_text.trim().is_empty() {
        return Err(ValidationError::EmptyJd);
    }
    if resume_text.trim().is_empty() {
        return Err(ValidationError::EmptyResume);
    }

    let words = word_count(jd_text);
    if words < MIN_JD_WORDS {
        return Err(ValidationError::LowInformationJd { word_count: words });
    }

    Ok(())
}

/// Runs the full readiness analysis.
///
/// Deterministic: identical inputs always produce an identical result.
pub fn analyze(
    jd_text: &str,
    resume_text: &str,
    cover_letter_text: &str,
) -> Result<AnalysisResult, ValidationError> {
    validate_inputs(jd_text, resume_text)?;

    let jd = extract_jd_evidence(jd_text);
    let role = jd.role_profile();
    let resume = extract_resume_evidence(resume_text, &role.education);
    let signals = resume.signals();
    debug!(?role, ?signals, "Extracted JD and resume signals");

    let bundle = score_dimensions(&role, &signals);
    debug!(?bundle, "Scored dimensions");

    let outcome = adjust_score(
        &bundle,
        &AdjustmentContext {
            role: &role,
            resume: &signals,
            resume_text,
            cover_letter_text,
            jd_requires_cover_letter: jd.requires_cover_letter,
        },
    );
    debug!(adjustments = ?outcome.adjustments, "Applied score adjustments");

    let pairings = pair_jd_with_resume(&jd, &resume);
    Ok(assemble_analysis(&jd, &resume, pairings, &bundle, outcome))
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Swappable analysis backend. Carried in `AppState` as `Arc<dyn ReadinessAnalyzer>`.
#[async_trait]
pub trait ReadinessAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        jd_text: String,
        resume_text: String,
        cover_letter_text: String,
    ) -> Result<AnalysisResult, AppError>;

    /// Short backend name, logged with each analysis.
    fn backend(&self) -> &'static str;
}

/// Keyword/threshold analyzer. CPU-bound, so each run goes to the blocking pool.
pub struct KeywordAnalyzer;

#[async_trait]
impl ReadinessAnalyzer for KeywordAnalyzer {
    async fn analyze(
        &self,
        jd_text: String,
        resume_text: String,
        cover_letter_text: String,
    ) -> Result<AnalysisResult, AppError> {
        let result = tokio::task::spawn_blocking(move || {
            analyze(&jd_text, &resume_text, &cover_letter_text)
        })
        .await
        .map_err(|e| AppError::Analysis(format!("analysis task failed: {e}")))?;

        Ok(result?)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::jd_signals::ExecutionStyle;
    use crate::analysis::pairing::{Classification, Dimension};
    use crate::analysis::report::{Band, Factor, Risk};
    use crate::analysis::resume_signals::SignalStrength;

    const INTERNSHIP_JD: &str = "Software Engineering Intern, Summer Program\n\
        You will build and deploy features for our customer dashboard.\n\
        Work in a fast-paced environment with a small team of engineers.\n\
        Ship code weekly, write tests, and review pull requests with mentors.\n\
        We value curiosity and a willingness to learn new tools as you go.";

    const SCENARIO_RESUME: &str = "Alex Kim\n\
        Built and deployed a React app; led a team project\n\
        Implemented a Python API for course scheduling\n\
        Developed SQL reports for the campus newspaper\n\
        Designed a hackathon project in two days";

    const CS_DEGREE_JD: &str = "Backend Engineer\n\
        Requirements: Bachelor's degree in Computer Science.\n\
        You will implement services, maintain APIs and optimize queries.\n\
        Collaborate with product and design to deliver reliable features.\n\
        Experience with Python or Go is a plus, and good written communication matters.";

    const COVER_LETTER_JD: &str = "Junior Analyst\n\
        Please attach a cover letter with your application.\n\
        You will build dashboards, maintain reports and support the finance team.\n\
        Attention to detail and clear communication are essential for this role.\n\
        Some experience with spreadsheets or SQL is helpful.";

    fn pairing(result: &AnalysisResult, dimension: Dimension) -> Classification {
        result
            .pairings
            .iter()
            .find(|p| p.dimension == dimension)
            .map(|p| p.classification)
            .expect("pairing present")
    }

    #[test]
    fn test_fixture_jds_meet_word_minimum() {
        for jd in [INTERNSHIP_JD, CS_DEGREE_JD, COVER_LETTER_JD] {
            assert!(word_count(jd) >= MIN_JD_WORDS, "{}", word_count(jd));
        }
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(validate_inputs("", ""), Err(ValidationError::EmptyJd));
        assert_eq!(validate_inputs("   ", "resume"), Err(ValidationError::EmptyJd));
        assert_eq!(
            validate_inputs(INTERNSHIP_JD, " \n "),
            Err(ValidationError::EmptyResume)
        );
        assert_eq!(
            validate_inputs("Build things fast", "resume"),
            Err(ValidationError::LowInformationJd { word_count: 3 })
        );
        assert!(validate_inputs(INTERNSHIP_JD, "resume").is_ok());
    }

    #[test]
    fn test_empty_jd_short_circuits() {
        assert_eq!(
            analyze("", SCENARIO_RESUME, "").unwrap_err(),
            ValidationError::EmptyJd
        );
    }

    #[test]
    fn test_execution_match_for_internship() {
        let jd = extract_jd_evidence(INTERNSHIP_JD);
        assert_eq!(jd.execution_style.inference, ExecutionStyle::ExecutionHeavy);

        let resume = extract_resume_evidence(SCENARIO_RESUME, &jd.education.to_requirements());
        assert!(matches!(
            resume.action_evidence.inference,
            SignalStrength::Moderate | SignalStrength::Strong
        ));

        let result = analyze(INTERNSHIP_JD, SCENARIO_RESUME, "").unwrap();
        assert_eq!(
            pairing(&result, Dimension::ExecutionDelivery),
            Classification::Match
        );
    }

    #[test]
    fn test_missing_education_is_a_gap() {
        let result = analyze(CS_DEGREE_JD, SCENARIO_RESUME, "").unwrap();
        assert_eq!(
            pairing(&result, Dimension::EducationEligibility),
            Classification::Gap
        );
        assert_eq!(result.adjustments.education_fit_multiplier, 0.6);
    }

    #[test]
    fn test_missing_required_cover_letter() {
        let result = analyze(COVER_LETTER_JD, SCENARIO_RESUME, "").unwrap();
        assert_eq!(result.cover_letter_impact.modifier, -10);
        assert_eq!(result.adjustments.cover_letter_modifier, -10);
        assert!(result.cover_letter_impact.jd_requires_cover_letter);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let letter = "I want this role because my experience fits and I learn fast.";
        let first = analyze(INTERNSHIP_JD, SCENARIO_RESUME, letter).unwrap();
        let second = analyze(INTERNSHIP_JD, SCENARIO_RESUME, letter).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    const QUIET_RESUME: &str = "Enjoys reading\nLikes hiking";

    const ALL_RISKS_RESUME: &str = "Student at Springfield High\n\
        Bachelor of Arts, major in History\n\
        Wrote a class essay on local archives";

    const ENGINEERING_JD: &str = "Field Engineer Trainee\n\
        Requirements: Bachelor's degree in Engineering.\n\
        You will install equipment at customer sites and document each visit.\n\
        Work with senior engineers to troubleshoot faults and write clear reports.\n\
        Travel within the region is expected, and a driving license helps.";

    const TOKENLESS_EDUCATION_RESUME: &str = "Sam Lee\n\
        University degree\n\
        Fixed bikes at a repair shop\n\
        Built a garden shed";

    fn repeated(text: &str, times: usize) -> String {
        vec![text; times].join("\n")
    }

    fn input_matrix() -> Vec<(String, String)> {
        let jds = [INTERNSHIP_JD, CS_DEGREE_JD, COVER_LETTER_JD, ENGINEERING_JD];
        let resumes = [
            SCENARIO_RESUME,
            QUIET_RESUME,
            ALL_RISKS_RESUME,
            TOKENLESS_EDUCATION_RESUME,
        ];
        let mut cases: Vec<(String, String)> = jds
            .iter()
            .flat_map(|jd| resumes.iter().map(move |r| (jd.to_string(), r.to_string())))
            .collect();
        cases.push((repeated(INTERNSHIP_JD, 300), repeated(SCENARIO_RESUME, 300)));
        cases.push((repeated(CS_DEGREE_JD, 300), repeated(ALL_RISKS_RESUME, 300)));
        cases
    }

    fn assert_grounded(quotes: &[String], source: &str, context: &str) {
        for quote in quotes {
            assert!(source.contains(quote.as_str()), "{context}: {quote:?}");
        }
    }

    fn assert_factors_grounded(explanation: &[Factor], jd: &str, resume: &str) {
        for factor in explanation {
            assert_grounded(&factor.jd_evidence, jd, &factor.factor);
            assert_grounded(&factor.resume_evidence, resume, &factor.factor);
        }
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let letters = ["", "Any organization, any role.", "This role fits my experience; I adapt."];
        for (jd, resume) in input_matrix() {
            for letter in letters {
                let result = analyze(&jd, &resume, letter).unwrap();
                let bundle = &result.score_explanation.dimension_breakdown;
                assert!(result.score <= 100);
                for dim in [
                    &bundle.relevance,
                    &bundle.depth,
                    &bundle.adaptability,
                    &bundle.environment_fit,
                ] {
                    assert!(dim.score <= 25);
                }
                assert!(bundle.risk_penalty.penalty <= 15);
                assert_eq!(bundle.risk_penalty.penalty % 3, 0);
                assert!(result.adjustments.base_readiness_score <= 100);
                assert!(result.adjustments.score_after_cover_letter <= 90);
                let education = result.adjustments.education_fit_multiplier;
                assert!((0.6..=1.0).contains(&education), "{education}");
                assert!([1.0, 0.92].contains(&result.adjustments.full_time_fit_multiplier));
                assert_eq!(result.band, Band::from_score(result.score));
                assert_eq!(result.pairings.len(), 7);
            }
        }
    }

    #[test]
    fn test_every_quote_is_grounded_in_input() {
        for (jd, resume) in input_matrix() {
            let result = analyze(&jd, &resume, "").unwrap();

            for p in &result.pairings {
                assert_grounded(&p.jd_expectation.evidence, &jd, "pairing jd");
                assert_grounded(&p.resume_evidence.evidence, &resume, "pairing resume");
            }
            for claim in &result.role_summary {
                assert_grounded(&claim.evidence, &jd, &claim.claim);
            }
            for strength in &result.strengths {
                assert_grounded(&strength.jd_evidence, &jd, "strength jd");
                assert_grounded(&strength.resume_evidence, &resume, "strength resume");
            }
            for gap in &result.gaps {
                assert_grounded(&gap.jd_expectation.evidence, &jd, "gap jd");
                assert_grounded(&gap.resume_evidence.evidence, &resume, "gap resume");
            }
            for risk in &result.risks {
                match risk {
                    Risk::Pairing {
                        jd_expectation,
                        resume_evidence,
                        ..
                    } => {
                        assert_grounded(&jd_expectation.evidence, &jd, "risk jd");
                        assert_grounded(&resume_evidence.evidence, &resume, "risk resume");
                    }
                    Risk::General { evidence, .. } => {
                        assert_grounded(evidence, &resume, "general risk")
                    }
                }
            }

            let breakdown = &result.score_explanation.dimension_breakdown;
            for dim in [
                &breakdown.relevance,
                &breakdown.depth,
                &breakdown.adaptability,
                &breakdown.environment_fit,
            ] {
                assert_factors_grounded(&dim.what_helped, &jd, &resume);
                assert_factors_grounded(&dim.what_limited, &jd, &resume);
            }
            assert_factors_grounded(&breakdown.risk_penalty.what_helped, &jd, &resume);
            assert_factors_grounded(&breakdown.risk_penalty.what_limited, &jd, &resume);
        }
    }

    #[test]
    fn test_resume_with_every_risk_flag() {
        let result = analyze(CS_DEGREE_JD, ALL_RISKS_RESUME, "").unwrap();
        let general: Vec<&str> = result
            .risks
            .iter()
            .filter_map(|risk| match risk {
                Risk::General { explanation, .. } => Some(explanation.as_str()),
                Risk::Pairing { .. } => None,
            })
            .collect();
        assert_eq!(
            general,
            vec![
                "Limited production exposure",
                "Primarily academic experience",
                "Limited project depth",
                "Potential major/field mismatch",
            ]
        );
        // The mismatch is reported but not scored.
        assert_eq!(result.adjustments.risk_penalty, 9);
    }

    #[test]
    fn test_lenient_requirement_with_tokenless_resume_education() {
        let result = analyze(ENGINEERING_JD, TOKENLESS_EDUCATION_RESUME, "").unwrap();
        assert_eq!(
            pairing(&result, Dimension::EducationEligibility),
            Classification::Match
        );
        assert_eq!(result.adjustments.education_fit_multiplier, 0.9);
    }

    #[tokio::test]
    async fn test_keyword_analyzer_maps_validation_errors() {
        let analyzer = KeywordAnalyzer;
        let err = analyzer
            .analyze(String::new(), "resume".to_string(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyJd)));
        assert_eq!(analyzer.backend(), "keyword");
    }
}
