//! Infers candidate signals from resume text, each
//! backed by the resume lines that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::education::{
    is_major_mismatch, normalize_education, normalize_requirements, EducationRequirements,
};
use crate::analysis::text::ScannedText;

const ACTION_VERBS: &[&str] = &[
    "built",
    "implemented",
    "developed",
    "designed",
    "integrated",
    "deployed",
    "maintained",
    "optimized",
    "contributed",
    "led",
];

const SECTION_WORDS: &[&str] = &["projects", "experience", "work"];

const SKILL_WORDS: &[&str] = &["react", "python", "java", "sql", "api", "backend", "frontend"];

const EXPLICIT_ADAPTABILITY: &[&str] = &[
    "learned",
    "self-taught",
    "explored",
    "adapted",
    "iterated",
    "improved",
];

const IMPLICIT_ADAPTABILITY: &[&str] = &["project", "hackathon", "intern", "built"];

const INTERNSHIP_WORDS: &[&str] = &["intern", "internship"];
const PROJECT_WORDS: &[&str] = &["project"];
const ACADEMIC_WORDS: &[&str] = &["course", "coursework"];
const PRODUCTION_WORDS: &[&str] = &["deployed", "production"];

const EDUCATION_LINE_WORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "diploma",
    "degree",
    "major",
    "concentration",
    "specialization",
    "minor",
    "education",
    "university",
    "college",
];

/// Background value used when the resume has no education lines.
pub const UNSPECIFIED: &str = "unspecified";

/// A skill must appear this many times to count as repeated.
const REPEATED_SKILL_MIN: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Signal values
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalStrength {
    Strong,
    Moderate,
    Weak,
}

impl SignalStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "strong",
            SignalStrength::Moderate => "moderate",
            SignalStrength::Weak => "weak",
        }
    }

    /// Strong or moderate.
    pub fn is_present(&self) -> bool {
        !matches!(self, SignalStrength::Weak)
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    Internship,
    ProjectBased,
    Academic,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFlag {
    #[serde(rename = "Limited production exposure")]
    LimitedProductionExposure,
    #[serde(rename = "Primarily academic experience")]
    PrimarilyAcademic,
    #[serde(rename = "Limited project depth")]
    LimitedProjectDepth,
    #[serde(rename = "Potential major/field mismatch")]
    MajorMismatch,
}

impl RiskFlag {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFlag::LimitedProductionExposure => "Limited production exposure",
            RiskFlag::PrimarilyAcademic => "Primarily academic experience",
            RiskFlag::LimitedProjectDepth => "Limited project depth",
            RiskFlag::MajorMismatch => "Potential major/field mismatch",
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Evidence objects
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvidence {
    pub inference: SignalStrength,
    pub snippets: Vec<String>,
    pub count: usize,
    pub action_verbs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCount {
    pub skill: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDepthEvidence {
    pub inference: SignalStrength,
    pub section_snippets: Vec<String>,
    pub skill_snippets: Vec<String>,
    pub skill_counts: Vec<SkillCount>,
    pub depth_signals: usize,
    pub repeated_skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptabilityEvidence {
    pub inference: SignalStrength,
    pub explicit_snippets: Vec<String>,
    pub implicit_snippets: Vec<String>,
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentExposureEvidence {
    pub environments: Vec<Environment>,
    pub internship: Vec<String>,
    pub project: Vec<String>,
    pub academic: Vec<String>,
    pub production: Vec<String>,
}

impl EnvironmentExposureEvidence {
    pub fn has(&self, environment: Environment) -> bool {
        self.environments.contains(&environment)
    }
}

/// One detected risk with whatever supports it: quoted lines, an explanation, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEvidence {
    pub risk: RiskFlag,
    pub snippets: Vec<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlagsEvidence {
    pub flags: Vec<RiskFlag>,
    pub evidence: Vec<RiskEvidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEducation {
    pub background: String,
    pub evidence: Vec<String>,
}

impl ResumeEducation {
    pub fn is_specified(&self) -> bool {
        self.background != UNSPECIFIED
    }
}

/// Everything inferred from one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEvidence {
    pub action_evidence: ActionEvidence,
    pub skill_depth: SkillDepthEvidence,
    pub adaptability: AdaptabilityEvidence,
    pub environment_exposure: EnvironmentExposureEvidence,
    pub risk_flags: RiskFlagsEvidence,
    pub education: ResumeEducation,
    /// Set only when the JD names specific fields and the resume education
    /// shares no token with them. Reported as a risk, not scored.
    pub major_mismatch: Option<RiskEvidence>,
}

/// Trait-only view of a resume consumed by the scorer and adjuster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSignals {
    pub action_evidence: SignalStrength,
    pub skill_depth: SignalStrength,
    pub adaptability_signals: SignalStrength,
    pub environment_exposure: Vec<Environment>,
    pub risk_flags: Vec<RiskFlag>,
    pub education_background: String,
}

impl ResumeEvidence {
    pub fn signals(&self) -> ResumeSignals {
        ResumeSignals {
            action_evidence: self.action_evidence.inference,
            skill_depth: self.skill_depth.inference,
            adaptability_signals: self.adaptability.inference,
            environment_exposure: self.environment_exposure.environments.clone(),
            risk_flags: self.risk_flags.flags.clone(),
            education_background: self.education.background.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Runs every resume extractor. `jd_education` only feeds the major-mismatch check.
pub fn extract_resume_evidence(
    resume_text: &str,
    jd_education: &EducationRequirements,
) -> ResumeEvidence {
    let scanned = ScannedText::new(resume_text);
    let education = education(resume_text);
    let major_mismatch = major_mismatch(jd_education, &education);

    ResumeEvidence {
        action_evidence: action_evidence(&scanned),
        skill_depth: skill_depth(&scanned),
        adaptability: adaptability(&scanned),
        environment_exposure: environment_exposure(&scanned),
        risk_flags: risk_flags(&scanned),
        education,
        major_mismatch,
    }
}

fn action_evidence(scanned: &ScannedText<'_>) -> ActionEvidence {
    let snippets = scanned.evidence_lines(ACTION_VERBS);
    let count = snippets.len();

    let inference = match count {
        c if c >= 8 => SignalStrength::Strong,
        c if c >= 4 => SignalStrength::Moderate,
        _ => SignalStrength::Weak,
    };

    ActionEvidence {
        inference,
        snippets,
        count,
        action_verbs: scanned
            .matched_keywords(ACTION_VERBS)
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

fn skill_depth(scanned: &ScannedText<'_>) -> SkillDepthEvidence {
    let section_snippets = scanned.evidence_lines(SECTION_WORDS);

    let skill_counts: Vec<SkillCount> = SKILL_WORDS
        .iter()
        .map(|skill| SkillCount {
            skill: skill.to_string(),
            occurrences: scanned.occurrences(skill),
        })
        .filter(|sc| sc.occurrences > 0)
        .collect();

    let repeated: Vec<&str> = skill_counts
        .iter()
        .filter(|sc| sc.occurrences >= REPEATED_SKILL_MIN)
        .map(|sc| sc.skill.as_str())
        .collect();
    let skill_snippets = scanned.evidence_lines(&repeated);

    let depth_signals = section_snippets.len();
    let repeated_skills = repeated.len();

    let inference = if repeated_skills >= 3 && depth_signals >= 2 {
        SignalStrength::Strong
    } else if repeated_skills >= 1 {
        SignalStrength::Moderate
    } else {
        SignalStrength::Weak
    };

    SkillDepthEvidence {
        inference,
        section_snippets,
        skill_snippets,
        skill_counts,
        depth_signals,
        repeated_skills,
    }
}

fn adaptability(scanned: &ScannedText<'_>) -> AdaptabilityEvidence {
    let explicit_snippets = scanned.evidence_lines(EXPLICIT_ADAPTABILITY);
    let implicit_snippets = scanned.evidence_lines(IMPLICIT_ADAPTABILITY);
    let score = explicit_snippets.len() + implicit_snippets.len();

    let inference = match score {
        s if s >= 5 => SignalStrength::Strong,
        s if s >= 3 => SignalStrength::Moderate,
        _ => SignalStrength::Weak,
    };

    AdaptabilityEvidence {
        inference,
        explicit_snippets,
        implicit_snippets,
        score,
    }
}

fn environment_exposure(scanned: &ScannedText<'_>) -> EnvironmentExposureEvidence {
    let families = [
        (Environment::Internship, INTERNSHIP_WORDS),
        (Environment::ProjectBased, PROJECT_WORDS),
        (Environment::Academic, ACADEMIC_WORDS),
        (Environment::Production, PRODUCTION_WORDS),
    ];

    let environments = families
        .iter()
        .filter(|(_, words)| scanned.contains_any(words))
        .map(|(env, _)| *env)
        .collect();

    EnvironmentExposureEvidence {
        environments,
        internship: scanned.evidence_lines(INTERNSHIP_WORDS),
        project: scanned.evidence_lines(PROJECT_WORDS),
        academic: scanned.evidence_lines(ACADEMIC_WORDS),
        production: scanned.evidence_lines(PRODUCTION_WORDS),
    }
}

fn risk_flags(scanned: &ScannedText<'_>) -> RiskFlagsEvidence {
    let mut flags = Vec::new();
    let mut evidence = Vec::new();

    if !scanned.contains("deploy") && !scanned.contains("production") {
        flags.push(RiskFlag::LimitedProductionExposure);
        evidence.push(RiskEvidence {
            risk: RiskFlag::LimitedProductionExposure,
            snippets: Vec::new(),
            detail: Some("No mentions of 'deploy' or 'production' found in resume".to_string()),
        });
    }

    if scanned.contains("student") && !scanned.contains("intern") {
        flags.push(RiskFlag::PrimarilyAcademic);
        evidence.push(RiskEvidence {
            risk: RiskFlag::PrimarilyAcademic,
            snippets: scanned.lines_where(|l| l.contains("student") && !l.contains("intern")),
            detail: Some("Resume describes student work without internship experience".to_string()),
        });
    }

    let project_mentions = scanned.occurrences("project");
    if project_mentions < 2 {
        flags.push(RiskFlag::LimitedProjectDepth);
        evidence.push(RiskEvidence {
            risk: RiskFlag::LimitedProjectDepth,
            snippets: Vec::new(),
            detail: Some(format!(
                "Found {project_mentions} mention(s) of 'project' (expected 2+)"
            )),
        });
    }

    RiskFlagsEvidence { flags, evidence }
}

fn education(resume_text: &str) -> ResumeEducation {
    let lines = ScannedText::newline_only(resume_text)
        .lines_where(|line| EDUCATION_LINE_WORDS.iter().any(|w| line.contains(w)));

    let background = if lines.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        lines.join(" ")
    };

    ResumeEducation {
        background,
        evidence: lines,
    }
}

fn major_mismatch(
    jd_education: &EducationRequirements,
    education: &ResumeEducation,
) -> Option<RiskEvidence> {
    if jd_education.open_to_all || !jd_education.has_requirements() || !education.is_specified() {
        return None;
    }

    let jd_tokens = normalize_requirements(&jd_education.raw_education_requirements);
    let resume_tokens = normalize_education(&education.background);
    if !is_major_mismatch(&jd_tokens, &resume_tokens) {
        return None;
    }

    Some(RiskEvidence {
        risk: RiskFlag::MajorMismatch,
        snippets: education.evidence.clone(),
        detail: Some(format!(
            "JD asks for {}, but the resume education names no related field",
            jd_education.raw_education_requirements.join(", ")
        )),
    })
}
