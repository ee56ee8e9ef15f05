//! Plain-text rendering of an [`AnalysisResult`] for download or copy.
//!
//! Quotes are shortened for display only; the structured result keeps the
//! full snippets.

use std::fmt::{self, Display, Formatter};

use crate::analysis::report::{AnalysisResult, DimensionExplanation, Factor, Risk};
use crate::analysis::text::trim_quote;

const QUOTE_WIDTH: usize = 80;
const RULE: &str = "────────────────────────────────────────────────────────────";

/// Display adapter that writes the full text report.
pub struct TextReport<'a>(pub &'a AnalysisResult);

pub fn render_text_report(result: &AnalysisResult) -> String {
    TextReport(result).to_string()
}

fn quotes(f: &mut Formatter<'_>, indent: &str, evidence: &[String]) -> fmt::Result {
    for quote in evidence {
        writeln!(f, "{indent}\"{}\"", trim_quote(quote, QUOTE_WIDTH))?;
    }
    Ok(())
}

fn section(f: &mut Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{RULE}")
}

fn factors(f: &mut Formatter<'_>, label: &str, items: &[Factor]) -> fmt::Result {
    for item in items {
        writeln!(f, "  {label}: {} ({})", item.factor, item.reason)?;
        if !item.jd_evidence.is_empty() {
            writeln!(f, "    JD:")?;
            quotes(f, "      ", &item.jd_evidence)?;
        }
        if !item.resume_evidence.is_empty() {
            writeln!(f, "    Resume:")?;
            quotes(f, "      ", &item.resume_evidence)?;
        }
    }
    Ok(())
}

fn dimension(f: &mut Formatter<'_>, dim: &DimensionExplanation) -> fmt::Result {
    writeln!(
        f,
        "{}: {}/{}",
        dim.conceptual_group, dim.score, dim.max_score
    )?;
    factors(f, "+", &dim.what_helped)?;
    factors(f, "-", &dim.what_limited)
}

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let explanation = &r.score_explanation;
        let breakdown = &explanation.dimension_breakdown;

        writeln!(f, "RoleAudit Readiness Report")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Score: {}/100 ({})", r.score, r.band)?;
        writeln!(f, "{}", explanation.overall_explanation.breakdown)?;
        writeln!(f, "{}", explanation.overall_explanation.context)?;

        section(f, "Role Summary")?;
        for claim in &r.role_summary {
            writeln!(f, "* {}", claim.claim)?;
            quotes(f, "    ", &claim.evidence)?;
        }

        section(f, "Score Breakdown")?;
        for dim in [
            &breakdown.relevance,
            &breakdown.depth,
            &breakdown.adaptability,
            &breakdown.environment_fit,
        ] {
            dimension(f, dim)?;
        }
        let risk = &breakdown.risk_penalty;
        writeln!(
            f,
            "{}: -{} (max {})",
            risk.conceptual_group, risk.penalty, risk.max_penalty
        )?;
        factors(f, "-", &risk.what_limited)?;

        section(f, "Strengths")?;
        for strength in &r.strengths {
            writeln!(f, "* {}: {}", strength.dimension, strength.explanation)?;
            quotes(f, "    JD: ", &strength.jd_evidence)?;
            quotes(f, "    Resume: ", &strength.resume_evidence)?;
        }

        section(f, "Gaps")?;
        for gap in &r.gaps {
            writeln!(f, "* {}: {}", gap.dimension, gap.explanation)?;
            quotes(f, "    JD: ", &gap.jd_expectation.evidence)?;
            quotes(f, "    Resume: ", &gap.resume_evidence.evidence)?;
        }

        section(f, "Risks")?;
        for risk in &r.risks {
            match risk {
                Risk::Pairing {
                    dimension,
                    explanation,
                    jd_expectation,
                    resume_evidence,
                } => {
                    writeln!(f, "* {dimension}: {explanation}")?;
                    quotes(f, "    JD: ", &jd_expectation.evidence)?;
                    quotes(f, "    Resume: ", &resume_evidence.evidence)?;
                }
                Risk::General {
                    dimension,
                    explanation,
                    evidence,
                    detail,
                } => {
                    writeln!(f, "* {dimension}: {explanation}")?;
                    if let Some(detail) = detail {
                        writeln!(f, "    {detail}")?;
                    }
                    quotes(f, "    Resume: ", evidence)?;
                }
            }
        }

        section(f, "Pairings")?;
        for p in &r.pairings {
            writeln!(
                f,
                "* {} [{}]: {} vs {}",
                p.dimension,
                p.classification,
                p.jd_expectation.inference,
                p.resume_evidence.inference
            )?;
        }

        section(f, "Adjustments")?;
        let adj = &r.adjustments;
        writeln!(f, "Cover letter: {}", r.cover_letter_impact.explanation)?;
        writeln!(
            f,
            "Base {} → after risk {} → after cover letter {} ({:+}) → after smoothing {} ({:+})",
            adj.base_readiness_score,
            adj.score_after_risk,
            adj.score_after_cover_letter,
            adj.cover_letter_modifier,
            adj.score_after_smoothing,
            adj.smoothing_adjustment
        )?;
        writeln!(
            f,
            "Education fit ×{:.2}, full-time fit ×{:.2} → final {}",
            adj.education_fit_multiplier, adj.full_time_fit_multiplier, adj.final_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::analyze;

    const JD: &str = "Software Engineering Intern\n\
        You will build and deploy services to production for thousands of users every day.\n\
        Work in a fast-paced, ambiguous startup and take ownership of features end to end.\n\
        A Bachelor's degree in Computer Science is required. Please include a cover letter.";

    const RESUME: &str = "B.S. Computer Science, State University\n\
        Built and deployed a Flask API serving 2,000 daily requests on a production cluster for the student government office\n\
        Led a team project; learned Docker";

    #[test]
    fn test_report_contains_required_sections() {
        let result = analyze(JD, RESUME, "").unwrap();
        let text = render_text_report(&result);

        assert!(text.starts_with("RoleAudit Readiness Report"));
        assert!(text.contains(&format!("Score: {}/100 ({})", result.score, result.band)));
        for heading in [
            "Role Summary",
            "Score Breakdown",
            "Strengths",
            "Gaps",
            "Risks",
            "Pairings",
            "Adjustments",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Role Alignment: "));
        assert!(text.contains("Context Fit: "));
    }

    #[test]
    fn test_long_quotes_are_trimmed_for_display() {
        let result = analyze(JD, RESUME, "").unwrap();
        let text = render_text_report(&result);
        let long_line = RESUME.lines().nth(1).unwrap();
        assert!(long_line.chars().count() > QUOTE_WIDTH);
        assert!(!text.contains(long_line));
        // The structured result still carries the full snippet.
        assert!(result
            .pairings
            .iter()
            .any(|p| p.resume_evidence.evidence.iter().any(|e| e == long_line)));
    }
}
