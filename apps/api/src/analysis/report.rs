//! Merges pairings, scores and evidence into the final
//! [`AnalysisResult`].
//!
//! Every claim in the report carries the quotes that support it; nothing here
//! invents text that did not come from an extractor or a fixed template.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::adjustments::{AdjustmentOutcome, Adjustments, CoverLetterImpact};
use crate::analysis::dimensions::{
    ScoreBundle, DIMENSION_MAX, RISK_PENALTY_MAX, RISK_PENALTY_PER_FLAG,
};
use crate::analysis::jd_signals::{
    CollaborationLevel, ExecutionStyle, JdEvidence, LearningCurve, StructureLevel,
};
use crate::analysis::pairing::{Classification, Dimension, Pairing, PairingSide};
use crate::analysis::resume_signals::{
    Environment, ResumeEvidence, RiskEvidence, SignalStrength,
};
use crate::analysis::text::top;

pub const GENERAL_RISK: &str = "General Risk";

// ────────────────────────────────────────────────────────────────────────────
// Band
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "Strong readiness")]
    StrongReadiness,
    #[serde(rename = "Viable with gaps")]
    ViableWithGaps,
    #[serde(rename = "High ramp-up risk")]
    HighRampUpRisk,
    #[serde(rename = "Likely mismatch")]
    LikelyMismatch,
}

impl Band {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 75 => Band::StrongReadiness,
            s if s >= 60 => Band::ViableWithGaps,
            s if s >= 45 => Band::HighRampUpRisk,
            _ => Band::LikelyMismatch,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::StrongReadiness => "Strong readiness",
            Band::ViableWithGaps => "Viable with gaps",
            Band::HighRampUpRisk => "High ramp-up risk",
            Band::LikelyMismatch => "Likely mismatch",
        }
    }

    fn context(&self) -> &'static str {
        match self {
            Band::StrongReadiness => "This score indicates strong alignment across multiple dimensions. Strong intern profiles typically fall in the 60-80 range, so this is above average.",
            Band::ViableWithGaps => "This score indicates viable readiness with some gaps. Strong intern profiles typically fall in the 60-80 range, so this is within the expected range.",
            Band::HighRampUpRisk => "This score indicates higher ramp-up risk. Strong intern profiles typically fall in the 60-80 range, so this suggests areas that may need attention.",
            Band::LikelyMismatch => "This score indicates significant gaps. Strong intern profiles typically fall in the 60-80 range, so this suggests substantial misalignment.",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Report types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummaryClaim {
    pub claim: String,
    pub evidence: Vec<String>,
    pub dimension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strength {
    pub dimension: Dimension,
    pub explanation: String,
    pub jd_evidence: Vec<String>,
    pub resume_evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub dimension: Dimension,
    pub explanation: String,
    pub jd_expectation: PairingSide,
    pub resume_evidence: PairingSide,
}

/// A risk either comes from a pairing or from a resume-level check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Risk {
    #[serde(rename_all = "camelCase")]
    Pairing {
        dimension: Dimension,
        explanation: String,
        jd_expectation: PairingSide,
        resume_evidence: PairingSide,
    },
    #[serde(rename_all = "camelCase")]
    General {
        dimension: String,
        explanation: String,
        evidence: Vec<String>,
        detail: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factor {
    pub factor: String,
    pub reason: String,
    pub jd_evidence: Vec<String>,
    pub resume_evidence: Vec<String>,
}

impl Factor {
    fn new(factor: &str, reason: &str) -> Self {
        Self {
            factor: factor.to_string(),
            reason: reason.to_string(),
            ..Default::default()
        }
    }

    fn jd(mut self, quotes: Vec<String>) -> Self {
        self.jd_evidence = quotes;
        self
    }

    fn resume(mut self, quotes: Vec<String>) -> Self {
        self.resume_evidence = quotes;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionExplanation {
    pub score: u32,
    pub max_score: u32,
    pub conceptual_group: String,
    pub description: String,
    pub what_helped: Vec<Factor>,
    pub what_limited: Vec<Factor>,
    pub micro_factors: Vec<String>,
}

impl DimensionExplanation {
    fn new(score: u32, conceptual_group: &str, description: &str) -> Self {
        Self {
            score,
            max_score: DIMENSION_MAX,
            conceptual_group: conceptual_group.to_string(),
            description: description.to_string(),
            what_helped: Vec::new(),
            what_limited: Vec::new(),
            micro_factors: Vec::new(),
        }
    }

    fn helped(&mut self, factor: Factor, micro: impl Into<String>) {
        self.what_helped.push(factor);
        self.micro_factors.push(micro.into());
    }

    fn limited(&mut self, factor: Factor, micro: impl Into<String>) {
        self.what_limited.push(factor);
        self.micro_factors.push(micro.into());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPenaltyExplanation {
    pub penalty: u32,
    pub max_penalty: u32,
    pub conceptual_group: String,
    pub description: String,
    pub what_helped: Vec<Factor>,
    pub what_limited: Vec<Factor>,
    pub micro_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBreakdown {
    pub relevance: DimensionExplanation,
    pub depth: DimensionExplanation,
    pub adaptability: DimensionExplanation,
    pub environment_fit: DimensionExplanation,
    pub risk_penalty: RiskPenaltyExplanation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallExplanation {
    pub score: u32,
    pub base_readiness_score: u32,
    pub risk_penalty: u32,
    pub score_after_risk: u32,
    pub explanation: String,
    pub breakdown: String,
    pub context: String,
    pub composition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityFactors {
    pub description: String,
    pub education_fit_multiplier: f64,
    pub full_time_fit_multiplier: f64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreExplanation {
    pub overall_score: u32,
    pub base_readiness_score: u32,
    pub risk_penalty: u32,
    pub score_after_risk: u32,
    pub overall_explanation: OverallExplanation,
    pub dimension_breakdown: DimensionBreakdown,
    pub eligibility_factors: EligibilityFactors,
}

/// The complete, immutable report for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: u32,
    pub band: Band,
    pub role_summary: Vec<RoleSummaryClaim>,
    pub strengths: Vec<Strength>,
    pub gaps: Vec<Gap>,
    pub risks: Vec<Risk>,
    pub pairings: Vec<Pairing>,
    pub score_explanation: ScoreExplanation,
    pub cover_letter_impact: CoverLetterImpact,
    pub adjustments: Adjustments,
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

pub fn assemble_analysis(
    jd: &JdEvidence,
    resume: &ResumeEvidence,
    pairings: Vec<Pairing>,
    bundle: &ScoreBundle,
    outcome: AdjustmentOutcome,
) -> AnalysisResult {
    let score = outcome.adjustments.final_score;

    AnalysisResult {
        score,
        band: Band::from_score(score),
        role_summary: role_summary(jd),
        strengths: strengths(&pairings),
        gaps: gaps(&pairings),
        risks: risks(&pairings, resume),
        score_explanation: score_explanation(jd, resume, &pairings, bundle, &outcome.adjustments),
        pairings,
        cover_letter_impact: outcome.cover_letter,
        adjustments: outcome.adjustments,
    }
}

fn claim(claim: impl Into<String>, evidence: Vec<String>, dimension: &str) -> RoleSummaryClaim {
    RoleSummaryClaim {
        claim: claim.into(),
        evidence,
        dimension: dimension.to_string(),
    }
}

fn role_summary(jd: &JdEvidence) -> Vec<RoleSummaryClaim> {
    let mut summary = Vec::new();

    if jd.execution_style.inference == ExecutionStyle::ExecutionHeavy {
        summary.push(claim(
            "This role emphasizes hands-on execution and delivery",
            top(&jd.execution_style.execution_triggers, 3),
            "Execution Style",
        ));
    }

    if jd.learning_curve.inference == LearningCurve::Steep {
        summary.push(claim(
            "The role expects rapid learning and adaptation",
            top(&jd.learning_curve.steep_triggers, 3),
            "Learning Curve",
        ));
    }

    if jd.collaboration.inference != CollaborationLevel::Low {
        summary.push(claim(
            format!("Collaboration is {} priority", jd.collaboration.inference),
            top(&jd.collaboration.triggers, 3),
            "Collaboration",
        ));
    }

    if jd.structure_level.inference == StructureLevel::Ambiguous {
        summary.push(claim(
            "Work is loosely defined and requires self-direction",
            top(&jd.structure_level.ambiguous_triggers, 3),
            "Structure Level",
        ));
    }

    if jd.education.has_requirements() {
        summary.push(claim(
            format!("Education requirements: {}", jd.education.requirements.join(", ")),
            top(&jd.education.evidence, 2),
            "Education",
        ));
    } else if jd.education.open_to_all {
        summary.push(claim(
            "Open to all majors",
            top(&jd.education.evidence, 2),
            "Education",
        ));
    }

    summary
}

fn strengths(pairings: &[Pairing]) -> Vec<Strength> {
    pairings
        .iter()
        .filter(|p| {
            matches!(
                p.classification,
                Classification::Match | Classification::Strength
            )
        })
        .map(|p| Strength {
            dimension: p.dimension,
            explanation: p.explanation.clone(),
            jd_evidence: p.jd_expectation.evidence.clone(),
            resume_evidence: p.resume_evidence.evidence.clone(),
        })
        .collect()
}

fn gaps(pairings: &[Pairing]) -> Vec<Gap> {
    pairings
        .iter()
        .filter(|p| p.classification == Classification::Gap)
        .map(|p| Gap {
            dimension: p.dimension,
            explanation: p.explanation.clone(),
            jd_expectation: p.jd_expectation.clone(),
            resume_evidence: p.resume_evidence.clone(),
        })
        .collect()
}

fn general_risk(risk: &RiskEvidence) -> Risk {
    Risk::General {
        dimension: GENERAL_RISK.to_string(),
        explanation: risk.risk.label().to_string(),
        evidence: risk.snippets.clone(),
        detail: risk.detail.clone(),
    }
}

fn risks(pairings: &[Pairing], resume: &ResumeEvidence) -> Vec<Risk> {
    let from_pairings = pairings
        .iter()
        .filter(|p| p.classification == Classification::Risk)
        .map(|p| Risk::Pairing {
            dimension: p.dimension,
            explanation: p.explanation.clone(),
            jd_expectation: p.jd_expectation.clone(),
            resume_evidence: p.resume_evidence.clone(),
        });

    let from_resume = resume
        .risk_flags
        .evidence
        .iter()
        .chain(resume.major_mismatch.as_ref())
        .map(general_risk);

    from_pairings.chain(from_resume).collect()
}

fn find(pairings: &[Pairing], dimension: Dimension) -> Option<&Pairing> {
    pairings.iter().find(|p| p.dimension == dimension)
}

fn score_explanation(
    jd: &JdEvidence,
    resume: &ResumeEvidence,
    pairings: &[Pairing],
    bundle: &ScoreBundle,
    adjustments: &Adjustments,
) -> ScoreExplanation {
    let final_score = adjustments.final_score;

    ScoreExplanation {
        overall_score: final_score,
        base_readiness_score: bundle.base_readiness_score,
        risk_penalty: bundle.risk_penalty,
        score_after_risk: bundle.score_after_risk(),
        overall_explanation: overall_explanation(final_score, bundle),
        dimension_breakdown: DimensionBreakdown {
            relevance: relevance_explanation(bundle.relevance, pairings),
            depth: depth_explanation(bundle.depth, resume),
            adaptability: adaptability_explanation(bundle.adaptability, jd, resume),
            environment_fit: environment_fit_explanation(bundle.environment_fit, jd, resume),
            risk_penalty: risk_penalty_explanation(bundle.risk_penalty, resume),
        },
        eligibility_factors: EligibilityFactors {
            description: "Education fit and full-time constraints are applied as multipliers to the final score.".to_string(),
            education_fit_multiplier: adjustments.education_fit_multiplier,
            full_time_fit_multiplier: adjustments.full_time_fit_multiplier,
            note: "These factors adjust the base score but don't appear as separate dimension scores.".to_string(),
        },
    }
}

fn overall_explanation(final_score: u32, bundle: &ScoreBundle) -> OverallExplanation {
    let score_after_risk = bundle.score_after_risk();
    let deduction = if bundle.risk_penalty > 0 {
        format!(
            " - Risk deduction: {} = {}/100",
            bundle.risk_penalty, score_after_risk
        )
    } else {
        String::new()
    };

    OverallExplanation {
        score: final_score,
        base_readiness_score: bundle.base_readiness_score,
        risk_penalty: bundle.risk_penalty,
        score_after_risk,
        explanation: format!("The overall readiness score is {final_score} out of 100."),
        breakdown: format!(
            "Base readiness: {}/100 (sum of 4 dimensions){deduction}. Additional adjustments (cover letter, smoothing, education/full-time fit) result in the final score.",
            bundle.base_readiness_score
        ),
        context: Band::from_score(final_score).context().to_string(),
        composition: "The base score (100 points max) combines: Role Alignment (25 points), Skill Realism (25 points), Adaptability (25 points), and Context Fit (25 points). Risk deductions are applied separately when risks exist.".to_string(),
    }
}

fn relevance_explanation(score: u32, pairings: &[Pairing]) -> DimensionExplanation {
    let mut out = DimensionExplanation::new(
        score,
        "Role Alignment",
        "Measures how well your experience aligns with the role's core expectations (execution style and learning curve).",
    );

    let quotes = |p: &Pairing| {
        (
            top(&p.jd_expectation.evidence, 2),
            top(&p.resume_evidence.evidence, 2),
        )
    };

    if let Some(p) = find(pairings, Dimension::ExecutionDelivery) {
        let (jd_q, resume_q) = quotes(p);
        match p.classification {
            Classification::Match => out.helped(
                Factor::new(
                    "Execution alignment was strong",
                    "JD emphasizes execution, and your resume shows strong action evidence",
                )
                .jd(jd_q)
                .resume(resume_q),
                "Strong execution alignment: JD emphasizes hands-on delivery, resume shows multiple action verbs",
            ),
            Classification::Gap => out.limited(
                Factor::new(
                    "Execution alignment was limited",
                    "JD emphasizes execution, but your resume shows limited action evidence",
                )
                .jd(jd_q)
                .resume(resume_q),
                "Limited execution alignment: JD emphasizes hands-on delivery, resume shows fewer action verbs",
            ),
            _ => {}
        }
    }

    if let Some(p) = find(pairings, Dimension::LearningAdaptation) {
        let (jd_q, resume_q) = quotes(p);
        match p.classification {
            Classification::Match => out.helped(
                Factor::new(
                    "Learning curve alignment was strong",
                    "JD expects rapid learning, and your resume shows adaptability evidence",
                )
                .jd(jd_q)
                .resume(resume_q),
                "Strong learning curve alignment: JD expects rapid adaptation, resume shows adaptability signals",
            ),
            Classification::Risk => out.limited(
                Factor::new(
                    "Learning curve alignment was limited",
                    "JD expects rapid learning, but your resume shows limited adaptability evidence",
                )
                .jd(jd_q)
                .resume(resume_q),
                "Limited learning curve alignment: JD expects rapid adaptation, resume shows fewer adaptability signals",
            ),
            _ => {}
        }
    }

    out.micro_factors.push(
        match score {
            s if s >= 15 => "High score: strong alignment across execution style and learning curve",
            s if s >= 10 => "Moderate score: alignment present but not strong across both dimensions",
            _ => "Lower score: limited alignment in one or both key dimensions",
        }
        .to_string(),
    );

    out
}

fn depth_explanation(score: u32, resume: &ResumeEvidence) -> DimensionExplanation {
    let mut out = DimensionExplanation::new(
        score,
        "Skill Realism",
        "Measures the depth and repeated usage of technical skills in your resume.",
    );
    let depth = &resume.skill_depth;

    match depth.inference {
        SignalStrength::Strong => {
            let mut quotes = top(&depth.section_snippets, 2);
            quotes.extend(top(&depth.skill_snippets, 2));
            out.helped(
                Factor::new(
                    "Skill depth was strong",
                    "Your resume shows repeated, contextual usage of multiple technical skills",
                )
                .resume(quotes),
                format!(
                    "Strong skill depth: {} skill(s) mentioned 2+ times across multiple projects",
                    depth.repeated_skills
                ),
            );
        }
        SignalStrength::Moderate => out.helped(
            Factor::new(
                "Skill depth was moderate",
                "Your resume shows some repeated skill usage",
            )
            .resume(top(&depth.skill_snippets, 2)),
            "Moderate skill depth: some skills mentioned multiple times, but depth signals are limited",
        ),
        SignalStrength::Weak => out.limited(
            Factor::new(
                "Skill depth was limited",
                "Your resume shows limited repeated usage of technical skills",
            ),
            "Limited skill depth: technical skills appear infrequently, suggesting surface-level exposure",
        ),
    }

    out
}

fn adaptability_explanation(
    score: u32,
    jd: &JdEvidence,
    resume: &ResumeEvidence,
) -> DimensionExplanation {
    let mut out = DimensionExplanation::new(
        score,
        "Adaptability",
        "Measures your ability to learn quickly and adapt, especially important if the role has a steep learning curve.",
    );
    let adaptability = &resume.adaptability;

    match adaptability.inference {
        SignalStrength::Strong => {
            let mut quotes = top(&adaptability.explicit_snippets, 2);
            quotes.extend(top(&adaptability.implicit_snippets, 2));
            out.helped(
                Factor::new(
                    "Adaptability signals were strong",
                    "Your resume shows multiple explicit and implicit learning/adaptation signals",
                )
                .resume(quotes),
                "Strong adaptability: resume shows multiple learning signals (learned, self-taught, explored, adapted)",
            );
        }
        SignalStrength::Moderate => out.helped(
            Factor::new(
                "Adaptability signals were moderate",
                "Your resume shows some learning/adaptation signals",
            )
            .resume(top(&adaptability.explicit_snippets, 2)),
            "Moderate adaptability: some learning signals present, but not consistently",
        ),
        SignalStrength::Weak => out.limited(
            Factor::new(
                "Adaptability signals were limited",
                "Your resume shows few explicit learning/adaptation signals",
            ),
            "Limited adaptability: resume shows few learning/adaptation signals",
        ),
    }

    if jd.learning_curve.inference == LearningCurve::Steep
        && adaptability.inference == SignalStrength::Weak
    {
        out.limited(
            Factor::new(
                "Steep learning curve penalty applied",
                "JD expects rapid learning, but your resume shows limited adaptability evidence",
            )
            .jd(top(&jd.learning_curve.steep_triggers, 2)),
            "Score reduced: JD emphasizes steep learning curve, resume shows limited adaptability",
        );
    }

    out
}

fn environment_fit_explanation(
    score: u32,
    jd: &JdEvidence,
    resume: &ResumeEvidence,
) -> DimensionExplanation {
    let mut out = DimensionExplanation::new(
        score,
        "Context Fit",
        "Measures your exposure to production/real-world environments, especially important for execution-heavy roles.",
    );
    let exposure = &resume.environment_exposure;
    let execution_heavy = jd.execution_style.inference == ExecutionStyle::ExecutionHeavy;
    let has_production = exposure.has(Environment::Production);

    if has_production {
        out.helped(
            Factor::new(
                "Production exposure was present",
                "Your resume shows production/deployment experience",
            )
            .resume(top(&exposure.production, 3)),
            "Strong context fit: resume shows production/deployment experience",
        );
        if execution_heavy {
            out.micro_factors
                .push("Especially valuable: JD emphasizes execution-heavy work".to_string());
        }
    } else {
        out.limited(
            Factor::new(
                "Production exposure was limited",
                "Your resume shows limited production/deployment experience",
            ),
            "Limited context fit: resume shows no production/deployment experience",
        );
        if execution_heavy {
            out.limited(
                Factor::new(
                    "Execution-heavy role penalty",
                    "JD emphasizes execution, but your resume lacks production exposure",
                )
                .jd(top(&jd.execution_style.execution_triggers, 2)),
                "Score reduced: JD emphasizes execution-heavy work, resume lacks production exposure",
            );
        }
    }

    if exposure.has(Environment::Academic)
        && !has_production
        && jd.structure_level.inference == StructureLevel::Ambiguous
    {
        out.limited(
            Factor::new(
                "Academic vs ambiguous structure mismatch",
                "JD requires self-direction, but your resume shows primarily academic experience",
            )
            .jd(top(&jd.structure_level.ambiguous_triggers, 2))
            .resume(top(&exposure.academic, 2)),
            "Score reduced: JD emphasizes self-directed work, resume shows primarily academic experience",
        );
    }

    out
}

fn risk_penalty_explanation(penalty: u32, resume: &ResumeEvidence) -> RiskPenaltyExplanation {
    let mut what_helped = Vec::new();
    let mut what_limited = Vec::new();
    let mut micro_factors = Vec::new();

    if penalty == 0 {
        what_helped.push(Factor::new(
            "No risk flags detected",
            "Your resume does not show major risk indicators",
        ));
        micro_factors
            .push("No risk penalty applied because no major risk flags were detected".to_string());
    } else {
        for risk in &resume.risk_flags.evidence {
            what_limited.push(
                Factor::new(risk.risk.label(), risk.detail.as_deref().unwrap_or_default())
                    .resume(risk.snippets.clone()),
            );
            micro_factors.push(format!("Risk penalty applied: {}", risk.risk));
        }
        micro_factors.push(format!(
            "Total risk penalty: -{penalty} points ({} risk flag(s) × {RISK_PENALTY_PER_FLAG} points each)",
            penalty / RISK_PENALTY_PER_FLAG
        ));
    }

    RiskPenaltyExplanation {
        penalty,
        max_penalty: RISK_PENALTY_MAX,
        conceptual_group: "Constraints & Eligibility".to_string(),
        description: "Penalties applied for risk flags detected in your resume.".to_string(),
        what_helped,
        what_limited,
        micro_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::adjustments::{adjust_score, AdjustmentContext};
    use crate::analysis::dimensions::score_dimensions;
    use crate::analysis::jd_signals::extract_jd_evidence;
    use crate::analysis::pairing::pair_jd_with_resume;
    use crate::analysis::resume_signals::{extract_resume_evidence, RiskFlag};

    const JD: &str = "Software engineering intern\n\
        Build and deploy internal tools.\n\
        Implement features and maintain services.\n\
        Fast-paced and ambiguous; self-directed work.\n\
        Collaborate with the team.\n\
        Degree in nursing required.";

    const RESUME: &str = "Student at State University, B.A. History\n\
        Completed coursework in statistics\n\
        Led a team of volunteers";

    fn assemble(jd_text: &str, resume_text: &str) -> AnalysisResult {
        let jd = extract_jd_evidence(jd_text);
        let role = jd.role_profile();
        let resume = extract_resume_evidence(resume_text, &role.education);
        let signals = resume.signals();
        let bundle = score_dimensions(&role, &signals);
        let outcome = adjust_score(
            &bundle,
            &AdjustmentContext {
                role: &role,
                resume: &signals,
                resume_text,
                cover_letter_text: "",
                jd_requires_cover_letter: jd.requires_cover_letter,
            },
        );
        let pairings = pair_jd_with_resume(&jd, &resume);
        assemble_analysis(&jd, &resume, pairings, &bundle, outcome)
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(Band::from_score(100), Band::StrongReadiness);
        assert_eq!(Band::from_score(75), Band::StrongReadiness);
        assert_eq!(Band::from_score(74), Band::ViableWithGaps);
        assert_eq!(Band::from_score(60), Band::ViableWithGaps);
        assert_eq!(Band::from_score(59), Band::HighRampUpRisk);
        assert_eq!(Band::from_score(45), Band::HighRampUpRisk);
        assert_eq!(Band::from_score(44), Band::LikelyMismatch);
        assert_eq!(Band::from_score(0), Band::LikelyMismatch);
    }

    #[test]
    fn test_role_summary_claims() {
        let result = assemble(JD, RESUME);
        let claims: Vec<&str> = result.role_summary.iter().map(|c| c.claim.as_str()).collect();
        assert!(claims.contains(&"This role emphasizes hands-on execution and delivery"));
        assert!(claims.contains(&"The role expects rapid learning and adaptation"));
        assert!(claims.contains(&"Work is loosely defined and requires self-direction"));
        assert!(claims.iter().any(|c| c.starts_with("Education requirements: ")));
        for claim in &result.role_summary {
            assert!(claim.evidence.len() <= 3);
        }
    }

    #[test]
    fn test_strengths_gaps_and_risks_partition_pairings() {
        let result = assemble(JD, RESUME);
        let matched = result
            .pairings
            .iter()
            .filter(|p| matches!(p.classification, Classification::Match | Classification::Strength))
            .count();
        let gapped = result
            .pairings
            .iter()
            .filter(|p| p.classification == Classification::Gap)
            .count();
        assert_eq!(result.strengths.len(), matched);
        assert_eq!(result.gaps.len(), gapped);
    }

    #[test]
    fn test_resume_risks_become_general_risks() {
        let result = assemble(JD, RESUME);
        let general: Vec<&str> = result
            .risks
            .iter()
            .filter_map(|r| match r {
                Risk::General { explanation, .. } => Some(explanation.as_str()),
                Risk::Pairing { .. } => None,
            })
            .collect();
        assert!(general.contains(&RiskFlag::LimitedProductionExposure.label()));
        assert!(general.contains(&RiskFlag::PrimarilyAcademic.label()));
        assert!(general.contains(&RiskFlag::MajorMismatch.label()));
    }

    #[test]
    fn test_major_mismatch_is_not_penalized() {
        let result = assemble(JD, RESUME);
        let breakdown = &result.score_explanation.dimension_breakdown.risk_penalty;
        assert!(breakdown
            .what_limited
            .iter()
            .all(|f| f.factor != RiskFlag::MajorMismatch.label()));
        assert_eq!(breakdown.penalty, 9);
        assert!(breakdown
            .micro_factors
            .last()
            .is_some_and(|m| m.starts_with("Total risk penalty: -9 points (3 risk flag(s)")));
    }

    #[test]
    fn test_score_explanation_is_consistent() {
        let result = assemble(JD, RESUME);
        let explanation = &result.score_explanation;
        assert_eq!(explanation.overall_score, result.score);
        assert_eq!(explanation.base_readiness_score, result.adjustments.base_readiness_score);
        assert_eq!(
            explanation.eligibility_factors.education_fit_multiplier,
            result.adjustments.education_fit_multiplier
        );
        assert!(explanation
            .overall_explanation
            .breakdown
            .contains("Risk deduction: 9"));
        assert!(explanation.overall_explanation.context.contains("60-80 range"));
        for dim in [
            &explanation.dimension_breakdown.relevance,
            &explanation.dimension_breakdown.depth,
            &explanation.dimension_breakdown.adaptability,
            &explanation.dimension_breakdown.environment_fit,
        ] {
            assert!(dim.score <= dim.max_score);
            assert!(!dim.micro_factors.is_empty());
        }
    }

    #[test]
    fn test_academic_ambiguous_factor_only_without_production() {
        let result = assemble(JD, RESUME);
        let env = &result.score_explanation.dimension_breakdown.environment_fit;
        let factor = env
            .what_limited
            .iter()
            .find(|f| f.factor == "Academic vs ambiguous structure mismatch")
            .expect("academic mismatch factor");
        assert_eq!(factor.resume_evidence, vec!["Completed coursework in statistics"]);
        assert_eq!(env.score, 7);
    }

    #[test]
    fn test_band_serializes_as_label() {
        let json = serde_json::to_string(&Band::HighRampUpRisk).unwrap();
        assert_eq!(json, "\"High ramp-up risk\"");
    }
}
