//! Lines up each JD expectation against the resume evidence
//! for it across seven fixed dimensions.
//!
//! Every classification depends only on the two inferences named by its rule.
//! Evidence slices are cut from what the extractors already collected; nothing
//! is re-scanned here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::jd_signals::{
    CollaborationEvidence, CollaborationLevel, ExecutionStyle, ExecutionStyleEvidence, JdEducation,
    JdEvidence, LearningCurve, LearningCurveEvidence, StructureLevel, StructureLevelEvidence,
};
use crate::analysis::resume_signals::{
    ActionEvidence, AdaptabilityEvidence, Environment, EnvironmentExposureEvidence,
    ResumeEducation, ResumeEvidence, SignalStrength, SkillDepthEvidence,
};
use crate::analysis::text::top;

const COLLABORATION_SIGNALS: &[&str] = &["team", "collaborate", "worked with", "partnered"];

const NOT_EMPHASIZED: &str =
    "This factor is not emphasized in the job description, so it does not affect readiness.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "Execution & Delivery")]
    ExecutionDelivery,
    #[serde(rename = "Learning & Adaptation")]
    LearningAdaptation,
    #[serde(rename = "Production Experience")]
    ProductionExperience,
    #[serde(rename = "Structure & Self-Direction")]
    StructureSelfDirection,
    #[serde(rename = "Collaboration")]
    Collaboration,
    #[serde(rename = "Education & Eligibility")]
    EducationEligibility,
    #[serde(rename = "Technical Depth")]
    TechnicalDepth,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ExecutionDelivery => "Execution & Delivery",
            Dimension::LearningAdaptation => "Learning & Adaptation",
            Dimension::ProductionExperience => "Production Experience",
            Dimension::StructureSelfDirection => "Structure & Self-Direction",
            Dimension::Collaboration => "Collaboration",
            Dimension::EducationEligibility => "Education & Eligibility",
            Dimension::TechnicalDepth => "Technical Depth",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Match,
    Gap,
    Risk,
    Neutral,
    Strength,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Match => "match",
            Classification::Gap => "gap",
            Classification::Risk => "risk",
            Classification::Neutral => "neutral",
            Classification::Strength => "strength",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a pairing: what was inferred and the quotes behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingSide {
    pub inference: String,
    pub evidence: Vec<String>,
}

impl PairingSide {
    fn new(inference: impl Into<String>, evidence: Vec<String>) -> Self {
        Self {
            inference: inference.into(),
            evidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    pub dimension: Dimension,
    pub jd_expectation: PairingSide,
    pub resume_evidence: PairingSide,
    pub classification: Classification,
    pub explanation: String,
}

/// Builds the seven pairings in fixed order.
pub fn pair_jd_with_resume(jd: &JdEvidence, resume: &ResumeEvidence) -> Vec<Pairing> {
    vec![
        pair_execution(&jd.execution_style, &resume.action_evidence),
        pair_learning(&jd.learning_curve, &resume.adaptability),
        pair_production(&jd.execution_style, &resume.environment_exposure),
        pair_structure(&jd.structure_level, &resume.adaptability),
        pair_collaboration(&jd.collaboration, resume),
        pair_education(&jd.education, &resume.education),
        pair_technical_depth(&resume.skill_depth),
    ]
}

fn neutral_explanation(lead: &str) -> String {
    format!("{lead} {NOT_EMPHASIZED}")
}

/// Three-way rule shared by the JD-driven dimensions: neutral unless the JD
/// emphasizes the factor, then match or the given shortfall.
fn classify(
    jd_emphasizes: bool,
    resume_shows: bool,
    shortfall: Classification,
) -> Classification {
    match (jd_emphasizes, resume_shows) {
        (true, true) => Classification::Match,
        (true, false) => shortfall,
        (false, _) => Classification::Neutral,
    }
}

fn pair_execution(jd: &ExecutionStyleEvidence, resume: &ActionEvidence) -> Pairing {
    let classification = classify(
        jd.inference == ExecutionStyle::ExecutionHeavy,
        resume.inference.is_present(),
        Classification::Gap,
    );
    let explanation = match classification {
        Classification::Match => {
            "JD emphasizes execution, and resume shows strong action evidence".to_string()
        }
        Classification::Gap => {
            "JD emphasizes execution, but resume shows limited action evidence".to_string()
        }
        _ => neutral_explanation("JD does not strongly emphasize execution."),
    };

    Pairing {
        dimension: Dimension::ExecutionDelivery,
        jd_expectation: PairingSide::new(jd.inference.as_str(), top(&jd.execution_triggers, 3)),
        resume_evidence: PairingSide::new(resume.inference.as_str(), top(&resume.snippets, 3)),
        classification,
        explanation,
    }
}

fn pair_learning(jd: &LearningCurveEvidence, resume: &AdaptabilityEvidence) -> Pairing {
    let classification = classify(
        jd.inference == LearningCurve::Steep,
        resume.inference.is_present(),
        Classification::Risk,
    );
    let explanation = match classification {
        Classification::Match => {
            "JD expects rapid learning, and resume shows adaptability evidence".to_string()
        }
        Classification::Risk => {
            "JD expects rapid learning, but resume shows limited adaptability evidence".to_string()
        }
        _ => neutral_explanation("JD does not emphasize a steep learning curve."),
    };

    let mut resume_quotes = top(&resume.explicit_snippets, 2);
    resume_quotes.extend(top(&resume.implicit_snippets, 1));

    Pairing {
        dimension: Dimension::LearningAdaptation,
        jd_expectation: PairingSide::new(jd.inference.as_str(), top(&jd.steep_triggers, 3)),
        resume_evidence: PairingSide::new(resume.inference.as_str(), resume_quotes),
        classification,
        explanation,
    }
}

fn pair_production(jd: &ExecutionStyleEvidence, resume: &EnvironmentExposureEvidence) -> Pairing {
    let has_production = resume.has(Environment::Production);
    let classification = classify(
        jd.inference == ExecutionStyle::ExecutionHeavy,
        has_production,
        Classification::Gap,
    );
    let explanation = match classification {
        Classification::Match => {
            "JD emphasizes execution, and resume shows production experience".to_string()
        }
        Classification::Gap => {
            "JD emphasizes execution, but resume lacks production exposure".to_string()
        }
        _ => neutral_explanation("JD does not strongly emphasize execution."),
    };

    let resume_side = if has_production {
        PairingSide::new("production exposure", top(&resume.production, 3))
    } else {
        PairingSide::new("no production exposure", Vec::new())
    };

    Pairing {
        dimension: Dimension::ProductionExperience,
        jd_expectation: PairingSide::new(jd.inference.as_str(), top(&jd.execution_triggers, 2)),
        resume_evidence: resume_side,
        classification,
        explanation,
    }
}

fn pair_structure(jd: &StructureLevelEvidence, resume: &AdaptabilityEvidence) -> Pairing {
    let classification = classify(
        jd.inference == StructureLevel::Ambiguous,
        resume.inference == SignalStrength::Strong,
        Classification::Risk,
    );
    let explanation = match classification {
        Classification::Match => {
            "JD requires self-direction, and resume shows strong adaptability".to_string()
        }
        Classification::Risk => {
            "JD requires self-direction, but resume shows limited adaptability".to_string()
        }
        _ => neutral_explanation("JD does not emphasize ambiguous/self-directed work."),
    };

    Pairing {
        dimension: Dimension::StructureSelfDirection,
        jd_expectation: PairingSide::new(jd.inference.as_str(), top(&jd.ambiguous_triggers, 3)),
        resume_evidence: PairingSide::new(
            resume.inference.as_str(),
            top(&resume.explicit_snippets, 2),
        ),
        classification,
        explanation,
    }
}

/// Resume lines that already back an action or adaptability signal and also
/// mention working with others.
fn collaboration_snippets(resume: &ResumeEvidence) -> Vec<String> {
    let candidates = resume
        .action_evidence
        .snippets
        .iter()
        .chain(&resume.adaptability.explicit_snippets)
        .chain(&resume.adaptability.implicit_snippets);

    let mut found: Vec<String> = Vec::new();
    for snippet in candidates {
        let lower = snippet.to_lowercase();
        if COLLABORATION_SIGNALS.iter().any(|k| lower.contains(k)) && !found.contains(snippet) {
            found.push(snippet.clone());
        }
    }
    found
}

fn pair_collaboration(jd: &CollaborationEvidence, resume: &ResumeEvidence) -> Pairing {
    let snippets = collaboration_snippets(resume);
    let has_signals = !snippets.is_empty();
    let classification = classify(
        jd.inference == CollaborationLevel::High,
        has_signals,
        Classification::Gap,
    );
    let explanation = match classification {
        Classification::Match => {
            "JD emphasizes collaboration, and resume shows collaboration experience".to_string()
        }
        Classification::Gap => {
            "JD emphasizes collaboration, but resume shows limited collaboration signals"
                .to_string()
        }
        _ => neutral_explanation("JD does not strongly emphasize collaboration."),
    };

    let resume_inference = if has_signals {
        "collaboration signals present"
    } else {
        "limited collaboration signals"
    };

    Pairing {
        dimension: Dimension::Collaboration,
        jd_expectation: PairingSide::new(jd.inference.as_str(), top(&jd.triggers, 3)),
        resume_evidence: PairingSide::new(resume_inference, top(&snippets, 3)),
        classification,
        explanation,
    }
}

fn pair_education(jd: &JdEducation, resume: &ResumeEducation) -> Pairing {
    let (classification, explanation) = if jd.open_to_all {
        (Classification::Match, "JD is open to all majors".to_string())
    } else if !jd.has_requirements() {
        let explanation = if resume.is_specified() {
            neutral_explanation("JD does not specify education requirements.")
        } else {
            "JD does not specify education requirements, but resume education is \
             unspecified, so the education multiplier still lowers the final score."
                .to_string()
        };
        (Classification::Neutral, explanation)
    } else if resume.is_specified() {
        (
            Classification::Match,
            "Resume shows education background".to_string(),
        )
    } else {
        (
            Classification::Gap,
            "JD specifies education requirements, but resume education is unspecified"
                .to_string(),
        )
    };

    let jd_inference = if jd.open_to_all {
        "open to all majors".to_string()
    } else if jd.has_requirements() {
        jd.requirements.join(", ")
    } else {
        "not specified".to_string()
    };

    Pairing {
        dimension: Dimension::EducationEligibility,
        jd_expectation: PairingSide::new(jd_inference, top(&jd.evidence, 3)),
        resume_evidence: PairingSide::new(resume.background.clone(), top(&resume.evidence, 3)),
        classification,
        explanation,
    }
}

fn pair_technical_depth(resume: &SkillDepthEvidence) -> Pairing {
    let classification = if resume.inference == SignalStrength::Strong {
        Classification::Strength
    } else {
        Classification::Neutral
    };

    let mut quotes = top(&resume.section_snippets, 2);
    quotes.extend(top(&resume.skill_snippets, 2));

    Pairing {
        dimension: Dimension::TechnicalDepth,
        jd_expectation: PairingSide::new("general technical competence expected", Vec::new()),
        resume_evidence: PairingSide::new(resume.inference.as_str(), quotes),
        classification,
        explanation: format!("Resume shows {} technical depth", resume.inference),
    }
}
