//! Turns the base readiness score into the final score.
//!
//! Stages run in a fixed order and each consumes the previous stage's output:
//! risk deduction, cover-letter modifier, smoothing, then the education-fit
//! and full-time-fit multipliers.

use serde::{Deserialize, Serialize};

use crate::analysis::dimensions::ScoreBundle;
use crate::analysis::eligibility::{score_education_fit, score_full_time_fit};
use crate::analysis::jd_signals::{CollaborationLevel, RoleProfile, StructureLevel};
use crate::analysis::resume_signals::{Environment, ResumeSignals, SignalStrength};

/// Upper bound of the score after the cover-letter stage.
pub const COVER_LETTER_CEILING: u32 = 90;

const MISSING_REQUIRED_LETTER_PENALTY: i32 = -10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterImpact {
    pub provided: bool,
    pub jd_requires_cover_letter: bool,
    pub signal_count: u32,
    pub modifier: i32,
    pub explanation: String,
}

/// Every intermediate value of the adjustment chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustments {
    pub base_readiness_score: u32,
    pub risk_penalty: u32,
    pub score_after_risk: u32,
    pub cover_letter_modifier: i32,
    pub score_after_cover_letter: u32,
    pub smoothing_adjustment: f64,
    pub score_after_smoothing: u32,
    pub education_fit_multiplier: f64,
    pub full_time_fit_multiplier: f64,
    pub final_score: u32,
}

pub struct AdjustmentOutcome {
    pub adjustments: Adjustments,
    pub cover_letter: CoverLetterImpact,
}

/// Inputs to the adjustment chain beyond the score bundle.
pub struct AdjustmentContext<'a> {
    pub role: &'a RoleProfile,
    pub resume: &'a ResumeSignals,
    pub resume_text: &'a str,
    pub cover_letter_text: &'a str,
    pub jd_requires_cover_letter: bool,
}

pub fn adjust_score(bundle: &ScoreBundle, ctx: &AdjustmentContext<'_>) -> AdjustmentOutcome {
    let score_after_risk = bundle.score_after_risk();

    let (score_after_cover_letter, cover_letter) = apply_cover_letter_modifier(
        score_after_risk,
        ctx.cover_letter_text,
        ctx.jd_requires_cover_letter,
    );

    let smoothing_adjustment = smoothing_adjustment(ctx.role, ctx.resume);
    let score_after_smoothing =
        round_clamped(score_after_cover_letter as f64 + smoothing_adjustment);

    let education_fit_multiplier =
        score_education_fit(&ctx.role.education, &ctx.resume.education_background);
    let full_time_fit_multiplier = score_full_time_fit(&ctx.role.education, ctx.resume_text);
    let final_score = round_clamped(
        score_after_smoothing as f64 * education_fit_multiplier * full_time_fit_multiplier,
    );

    AdjustmentOutcome {
        adjustments: Adjustments {
            base_readiness_score: bundle.base_readiness_score,
            risk_penalty: bundle.risk_penalty,
            score_after_risk,
            cover_letter_modifier: cover_letter.modifier,
            score_after_cover_letter,
            smoothing_adjustment,
            score_after_smoothing,
            education_fit_multiplier,
            full_time_fit_multiplier,
            final_score,
        },
        cover_letter,
    }
}

fn round_clamped(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Points (0-4) a cover letter earns for role understanding, justification,
/// specificity and intent to adapt.
fn cover_letter_signals(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    let checks = [
        has("this role") || has("position"),
        has("experience") || has("because"),
        !has("any organization") && !has("any role"),
        has("learn") || has("grow") || has("adapt"),
    ];
    checks.iter().filter(|passed| **passed).count() as u32
}

/// Applies the cover-letter modifier. The result always lies in `[0, 90]`.
pub fn apply_cover_letter_modifier(
    score: u32,
    cover_letter_text: &str,
    jd_requires_cover_letter: bool,
) -> (u32, CoverLetterImpact) {
    let provided = !cover_letter_text.trim().is_empty();

    let (signal_count, modifier, explanation) = if !provided {
        if jd_requires_cover_letter {
            (
                0,
                MISSING_REQUIRED_LETTER_PENALTY,
                "This role explicitly asks for a cover letter, but none was provided.",
            )
        } else {
            (0, 0, "No cover letter provided; score unchanged.")
        }
    } else {
        let signals = cover_letter_signals(cover_letter_text);
        let modifier = match (signals, jd_requires_cover_letter) {
            (s, true) if s >= 3 => 12,
            (s, false) if s >= 3 => 8,
            (2, true) => 6,
            (2, false) => 4,
            (_, true) => -8,
            (_, false) => -4,
        };
        let explanation = if modifier > 0 {
            "Cover letter demonstrates role understanding and strengthens readiness."
        } else {
            "Cover letter is generic or weakly aligned, reducing confidence in intent."
        };
        (signals, modifier, explanation)
    };

    let adjusted = (score as i32 + modifier).clamp(0, COVER_LETTER_CEILING as i32) as u32;

    (
        adjusted,
        CoverLetterImpact {
            provided,
            jd_requires_cover_letter,
            signal_count,
            modifier,
            explanation: explanation.to_string(),
        },
    )
}

/// Small nudges: +1.5 for production exposure, -1.5 for an ambiguous role
/// without strong adaptability, +1 for a high-collaboration role with strong
/// action evidence.
pub fn smoothing_adjustment(role: &RoleProfile, resume: &ResumeSignals) -> f64 {
    let mut adjustment = 0.0;

    if resume.environment_exposure.contains(&Environment::Production) {
        adjustment += 1.5;
    }
    if role.structure_level == StructureLevel::Ambiguous
        && resume.adaptability_signals != SignalStrength::Strong
    {
        adjustment -= 1.5;
    }
    if role.collaboration == CollaborationLevel::High
        && resume.action_evidence == SignalStrength::Strong
    {
        adjustment += 1.0;
    }

    adjustment
}
