//! Four 25-point sub-scores plus a separate risk deduction.
//!
//! Works on trait projections only ([`RoleProfile`], [`ResumeSignals`]), never
//! on evidence snippets.

use serde::{Deserialize, Serialize};

use crate::analysis::jd_signals::{ExecutionStyle, LearningCurve, RoleProfile, StructureLevel};
use crate::analysis::resume_signals::{Environment, ResumeSignals, SignalStrength};

pub const DIMENSION_MAX: u32 = 25;
pub const RISK_PENALTY_MAX: u32 = 15;
pub const RISK_PENALTY_PER_FLAG: u32 = 3;

const BASE_POINTS: i32 = 12;

/// Output of the scorer. `Default` is the all-zero bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBundle {
    pub relevance: u32,
    pub depth: u32,
    pub adaptability: u32,
    pub environment_fit: u32,
    pub risk_penalty: u32,
    pub base_readiness_score: u32,
}

impl ScoreBundle {
    /// `base_readiness_score - risk_penalty`, floored at zero.
    pub fn score_after_risk(&self) -> u32 {
        self.base_readiness_score.saturating_sub(self.risk_penalty)
    }
}

pub fn score_dimensions(role: &RoleProfile, resume: &ResumeSignals) -> ScoreBundle {
    let relevance = score_relevance(role, resume);
    let depth = score_depth(resume);
    let adaptability = score_adaptability(role, resume);
    let environment_fit = score_environment_fit(role, resume);
    let risk_penalty = score_risk_penalty(resume);

    let base_readiness_score = (relevance + depth + adaptability + environment_fit).min(100);

    ScoreBundle {
        relevance,
        depth,
        adaptability,
        environment_fit,
        risk_penalty,
        base_readiness_score,
    }
}

fn clamp_dimension(points: i32) -> u32 {
    points.clamp(0, DIMENSION_MAX as i32) as u32
}

fn score_relevance(role: &RoleProfile, resume: &ResumeSignals) -> u32 {
    let mut points = BASE_POINTS;

    if role.execution_style == ExecutionStyle::ExecutionHeavy {
        points += match resume.action_evidence {
            SignalStrength::Strong => 8,
            SignalStrength::Moderate => 4,
            SignalStrength::Weak => 0,
        };
    }

    if role.learning_curve == LearningCurve::Steep && resume.adaptability_signals.is_present() {
        points += 5;
    }

    clamp_dimension(points)
}

fn score_depth(resume: &ResumeSignals) -> u32 {
    match resume.skill_depth {
        SignalStrength::Strong => 25,
        SignalStrength::Moderate => 15,
        SignalStrength::Weak => 8,
    }
}

fn score_adaptability(role: &RoleProfile, resume: &ResumeSignals) -> u32 {
    let mut points = BASE_POINTS;

    points += match resume.adaptability_signals {
        SignalStrength::Strong => 10,
        SignalStrength::Moderate => 5,
        SignalStrength::Weak => 0,
    };

    if role.learning_curve == LearningCurve::Steep
        && resume.adaptability_signals == SignalStrength::Weak
    {
        points -= 7;
    }

    clamp_dimension(points)
}

fn score_environment_fit(role: &RoleProfile, resume: &ResumeSignals) -> u32 {
    let mut points = BASE_POINTS;
    let exposure = &resume.environment_exposure;
    let has_production = exposure.contains(&Environment::Production);

    if has_production {
        points += if role.execution_style == ExecutionStyle::ExecutionHeavy {
            8
        } else {
            5
        };
    }

    if exposure.contains(&Environment::Academic)
        && !has_production
        && role.structure_level == StructureLevel::Ambiguous
    {
        points -= 5;
    }

    clamp_dimension(points)
}

fn score_risk_penalty(resume: &ResumeSignals) -> u32 {
    let flags = resume.risk_flags.len() as u32;
    (flags * RISK_PENALTY_PER_FLAG).min(RISK_PENALTY_MAX)
}
