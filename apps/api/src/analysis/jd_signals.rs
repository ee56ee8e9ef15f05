//! Infers categorical role traits from a job description,
//! each backed by the JD lines that produced it.
//!
//! Inference counts evidence *lines*, not raw keyword hits: a line mentioning
//! "build" and "deploy" counts once.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::education::{
    extract_education_requirements, jd_education_lines, EducationRequirements,
};
use crate::analysis::text::ScannedText;

// ────────────────────────────────────────────────────────────────────────────
// Trait vocabularies
// ────────────────────────────────────────────────────────────────────────────

const EXECUTION_KEYWORDS: &[&str] = &[
    "build",
    "implement",
    "develop",
    "deliver",
    "deploy",
    "maintain",
    "optimize",
    "own",
];

const RESEARCH_KEYWORDS: &[&str] = &[
    "research",
    "explore",
    "investigate",
    "experiment",
    "analyze",
    "theoretical",
];

const STRUCTURED_KEYWORDS: &[&str] = &[
    "process",
    "standard",
    "procedure",
    "documentation",
    "compliance",
    "guidelines",
];

const AMBIGUOUS_KEYWORDS: &[&str] = &[
    "ambiguous",
    "0-1",
    "fast-paced",
    "wear many hats",
    "self-directed",
    "ownership",
];

const COLLABORATION_KEYWORDS: &[&str] = &[
    "collaborate",
    "cross-functional",
    "stakeholders",
    "team",
    "mentors",
    "clients",
];

const STEEP_KEYWORDS: &[&str] = &[
    "fast learner",
    "new technologies",
    "rapidly evolving",
    "learn quickly",
    "cutting-edge",
    "intern",
    "internship",
    "hands-on",
    "exposure",
    "training",
    "mentorship",
];

const GRADUAL_KEYWORDS: &[&str] = &[
    "prior experience",
    "domain knowledge",
    "industry experience",
    "years of experience",
];

const SPEED_KEYWORDS: &[&str] = &["fast", "iterate", "iteration", "mvp", "quickly", "agile", "rapid"];

const QUALITY_KEYWORDS: &[&str] = &[
    "accuracy",
    "precision",
    "reliability",
    "performance",
    "robust",
    "metrics",
    "evaluation",
    "quality assurance",
    "correctness",
];

/// Mentions that mark a role as intern/training oriented. Such roles never
/// infer `quality-focused`.
const INTERN_ROLE_MARKERS: &[&str] = &["intern", "internship", "training", "mentorship"];

const COVER_LETTER_PHRASE: &str = "cover letter";

// ────────────────────────────────────────────────────────────────────────────
// Trait values
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionStyle {
    ExecutionHeavy,
    Exploratory,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureLevel {
    Structured,
    Ambiguous,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollaborationLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LearningCurve {
    Steep,
    Gradual,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedVsQuality {
    SpeedFocused,
    QualityFocused,
    Balanced,
}

macro_rules! trait_labels {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

trait_labels!(ExecutionStyle {
    ExecutionHeavy => "execution-heavy",
    Exploratory => "exploratory",
    Balanced => "balanced",
});
trait_labels!(StructureLevel {
    Structured => "structured",
    Ambiguous => "ambiguous",
    Moderate => "moderate",
});
trait_labels!(CollaborationLevel {
    High => "high",
    Medium => "medium",
    Low => "low",
});
trait_labels!(LearningCurve {
    Steep => "steep",
    Gradual => "gradual",
    Moderate => "moderate",
});
trait_labels!(SpeedVsQuality {
    SpeedFocused => "speed-focused",
    QualityFocused => "quality-focused",
    Balanced => "balanced",
});

// ────────────────────────────────────────────────────────────────────────────
// Evidence objects
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStyleEvidence {
    pub inference: ExecutionStyle,
    pub execution_triggers: Vec<String>,
    pub research_triggers: Vec<String>,
    pub execution_count: usize,
    pub research_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureLevelEvidence {
    pub inference: StructureLevel,
    pub structured_triggers: Vec<String>,
    pub ambiguous_triggers: Vec<String>,
    pub structured_count: usize,
    pub ambiguous_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationEvidence {
    pub inference: CollaborationLevel,
    pub triggers: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningCurveEvidence {
    pub inference: LearningCurve,
    pub steep_triggers: Vec<String>,
    pub gradual_triggers: Vec<String>,
    pub steep_count: usize,
    pub gradual_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedVsQualityEvidence {
    pub inference: SpeedVsQuality,
    pub speed_triggers: Vec<String>,
    pub quality_triggers: Vec<String>,
    pub speed_count: usize,
    pub quality_count: usize,
    pub is_intern_role: bool,
}

/// Education constraints plus the JD lines that mention education.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdEducation {
    pub requirements: Vec<String>,
    pub open_to_all: bool,
    pub full_time_only: bool,
    pub evidence: Vec<String>,
}

impl JdEducation {
    pub fn has_requirements(&self) -> bool {
        !self.requirements.is_empty()
    }

    pub fn to_requirements(&self) -> EducationRequirements {
        EducationRequirements {
            raw_education_requirements: self.requirements.clone(),
            open_to_all: self.open_to_all,
            full_time_only: self.full_time_only,
        }
    }
}

/// Everything inferred from one JD. Immutable once built and the only source
/// of quotable JD text downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdEvidence {
    pub execution_style: ExecutionStyleEvidence,
    pub structure_level: StructureLevelEvidence,
    pub collaboration: CollaborationEvidence,
    pub learning_curve: LearningCurveEvidence,
    pub speed_vs_quality: SpeedVsQualityEvidence,
    pub education: JdEducation,
    pub requires_cover_letter: bool,
}

/// Trait-only view of a JD consumed by the scorer and adjuster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfile {
    pub execution_style: ExecutionStyle,
    pub structure_level: StructureLevel,
    pub collaboration: CollaborationLevel,
    pub learning_curve: LearningCurve,
    pub speed_vs_quality: SpeedVsQuality,
    pub education: EducationRequirements,
}

impl JdEvidence {
    pub fn role_profile(&self) -> RoleProfile {
        RoleProfile {
            execution_style: self.execution_style.inference,
            structure_level: self.structure_level.inference,
            collaboration: self.collaboration.inference,
            learning_curve: self.learning_curve.inference,
            speed_vs_quality: self.speed_vs_quality.inference,
            education: self.education.to_requirements(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Runs every JD trait extractor over `jd_text`.
pub fn extract_jd_evidence(jd_text: &str) -> JdEvidence {
    let scanned = ScannedText::new(jd_text);

    JdEvidence {
        execution_style: execution_style(&scanned),
        structure_level: structure_level(&scanned),
        collaboration: collaboration(&scanned),
        learning_curve: learning_curve(&scanned),
        speed_vs_quality: speed_vs_quality(&scanned),
        education: education(jd_text, &scanned),
        requires_cover_letter: scanned.contains(COVER_LETTER_PHRASE),
    }
}

fn execution_style(scanned: &ScannedText<'_>) -> ExecutionStyleEvidence {
    let execution_triggers = scanned.evidence_lines(EXECUTION_KEYWORDS);
    let research_triggers = scanned.evidence_lines(RESEARCH_KEYWORDS);
    let (execution_count, research_count) = (execution_triggers.len(), research_triggers.len());

    let inference = match execution_count.cmp(&research_count) {
        Ordering::Greater => ExecutionStyle::ExecutionHeavy,
        Ordering::Less => ExecutionStyle::Exploratory,
        Ordering::Equal => ExecutionStyle::Balanced,
    };

    ExecutionStyleEvidence {
        inference,
        execution_triggers,
        research_triggers,
        execution_count,
        research_count,
    }
}

fn structure_level(scanned: &ScannedText<'_>) -> StructureLevelEvidence {
    let structured_triggers = scanned.evidence_lines(STRUCTURED_KEYWORDS);
    let ambiguous_triggers = scanned.evidence_lines(AMBIGUOUS_KEYWORDS);
    let (structured_count, ambiguous_count) =
        (structured_triggers.len(), ambiguous_triggers.len());

    let inference = if structured_count >= 2 && structured_count > ambiguous_count {
        StructureLevel::Structured
    } else if ambiguous_count >= 2 && ambiguous_count > structured_count {
        StructureLevel::Ambiguous
    } else {
        StructureLevel::Moderate
    };

    StructureLevelEvidence {
        inference,
        structured_triggers,
        ambiguous_triggers,
        structured_count,
        ambiguous_count,
    }
}

fn collaboration(scanned: &ScannedText<'_>) -> CollaborationEvidence {
    let triggers = scanned.evidence_lines(COLLABORATION_KEYWORDS);
    let count = triggers.len();

    let inference = match count {
        c if c >= 4 => CollaborationLevel::High,
        c if c >= 2 => CollaborationLevel::Medium,
        _ => CollaborationLevel::Low,
    };

    CollaborationEvidence {
        inference,
        triggers,
        count,
    }
}

fn learning_curve(scanned: &ScannedText<'_>) -> LearningCurveEvidence {
    let steep_triggers = scanned.evidence_lines(STEEP_KEYWORDS);
    let gradual_triggers = scanned.evidence_lines(GRADUAL_KEYWORDS);
    let (steep_count, gradual_count) = (steep_triggers.len(), gradual_triggers.len());

    let inference = match steep_count.cmp(&gradual_count) {
        Ordering::Greater => LearningCurve::Steep,
        Ordering::Less => LearningCurve::Gradual,
        Ordering::Equal => LearningCurve::Moderate,
    };

    LearningCurveEvidence {
        inference,
        steep_triggers,
        gradual_triggers,
        steep_count,
        gradual_count,
    }
}

fn speed_vs_quality(scanned: &ScannedText<'_>) -> SpeedVsQualityEvidence {
    let is_intern_role = scanned.contains_any(INTERN_ROLE_MARKERS);
    let speed_triggers = scanned.evidence_lines(SPEED_KEYWORDS);
    let quality_triggers = scanned.evidence_lines(QUALITY_KEYWORDS);
    let (speed_count, quality_count) = (speed_triggers.len(), quality_triggers.len());

    let inference = if !is_intern_role && quality_count >= 2 && quality_count > speed_count {
        SpeedVsQuality::QualityFocused
    } else if speed_count >= 2 && speed_count > quality_count {
        SpeedVsQuality::SpeedFocused
    } else {
        SpeedVsQuality::Balanced
    };

    SpeedVsQualityEvidence {
        inference,
        speed_triggers,
        quality_triggers,
        speed_count,
        quality_count,
        is_intern_role,
    }
}

fn education(jd_text: &str, scanned: &ScannedText<'_>) -> JdEducation {
    let requirements = extract_education_requirements(jd_text);
    JdEducation {
        requirements: requirements.raw_education_requirements,
        open_to_all: requirements.open_to_all,
        full_time_only: requirements.full_time_only,
        evidence: jd_education_lines(scanned),
    }
}
