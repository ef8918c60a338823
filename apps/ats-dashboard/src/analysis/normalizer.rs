//! Result normalizer: turns a loosely populated `AnalysisResult` into a complete set of 0–100
//! scores. Missing or placeholder data is replaced by defaults, never surfaced as an error.

use serde::Serialize;
use tracing::warn;

use crate::analysis::score_extraction::{extract_match_score, DEFAULT_MATCH_SCORE};
use crate::models::analysis::{AnalysisResult, JobRequirementScores};

/// Used when the service returns no section scores, or only zeros.
pub const DEFAULT_SECTION_SCORES: ProfileScores = ProfileScores {
    technical_skills: 75,
    work_experience: 80,
    education: 85,
    projects: 70,
    certifications: 60,
    soft_skills: 80,
};

/// Baseline job requirement intensity when the service sends none.
pub const BASE_JOB_REQUIREMENTS: ProfileScores = ProfileScores {
    technical_skills: 85,
    work_experience: 80,
    education: 75,
    projects: 70,
    certifications: 60,
    soft_skills: 75,
};

/// Six-dimension score profile plotted on the radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileScores {
    pub technical_skills: u32,
    pub work_experience: u32,
    pub education: u32,
    pub projects: u32,
    pub certifications: u32,
    pub soft_skills: u32,
}

impl ProfileScores {
    /// Values in radar axis order.
    pub fn as_array(&self) -> [u32; 6] {
        [
            self.technical_skills,
            self.work_experience,
            self.education,
            self.projects,
            self.certifications,
            self.soft_skills,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedScores {
    pub match_score: u32,
    pub technical_match: u32,
    pub section_scores: ProfileScores,
    pub job_requirements: ProfileScores,
    /// True when `section_scores` came from `DEFAULT_SECTION_SCORES`.
    pub section_scores_defaulted: bool,
}

impl NormalizedScores {
    pub fn from_result(result: Option<&AnalysisResult>) -> Self {
        let (section_scores, section_scores_defaulted) = section_scores(result);

        Self {
            match_score: match_score(result),
            technical_match: technical_match(result),
            section_scores,
            job_requirements: job_requirements(result),
            section_scores_defaulted,
        }
    }
}

/// Structured scores first, then the free-text cascade.
pub fn match_score(result: Option<&AnalysisResult>) -> u32 {
    let Some(result) = result else {
        return DEFAULT_MATCH_SCORE;
    };

    if let Some(overall) = non_zero(result.overall_score) {
        return to_percent(overall);
    }

    let keyword_score = result
        .keyword_analysis
        .as_ref()
        .and_then(|k| k.match_score)
        .filter(|s| *s > 0.0);

    match keyword_score {
        Some(score) => to_percent(score),
        None => extract_match_score(&result.analysis),
    }
}

/// Share of required technical skills present in the resume.
pub fn technical_match(result: Option<&AnalysisResult>) -> u32 {
    let tech = result.and_then(|r| r.technical_skills_matching.as_ref());

    if let Some(pct) = non_zero(tech.and_then(|t| t.match_percentage)) {
        return to_percent(pct);
    }

    if let Some(t) = tech {
        if let (Some(required), Some(matched)) = (&t.required_skills, &t.matched_skills) {
            if !required.is_empty() {
                return to_percent(matched.len() as f64 / required.len() as f64 * 100.0);
            }
        }
    }

    match non_zero(result.and_then(|r| r.overall_score)) {
        Some(overall) => to_percent((overall - 10.0).max(60.0)),
        None => DEFAULT_MATCH_SCORE,
    }
}

fn section_scores(result: Option<&AnalysisResult>) -> (ProfileScores, bool) {
    let Some(scores) = result.and_then(|r| r.section_scores.as_ref()) else {
        return (DEFAULT_SECTION_SCORES, true);
    };

    if scores.is_unpopulated() {
        warn!("All section scores are 0, using fallback values");
        return (DEFAULT_SECTION_SCORES, true);
    }

    let value = |v: Option<f64>| to_percent(v.unwrap_or(0.0));
    let profile = ProfileScores {
        technical_skills: value(scores.technical_skills),
        work_experience: value(scores.work_experience),
        education: value(scores.education),
        projects: value(scores.projects),
        certifications: value(scores.certifications),
        soft_skills: value(scores.soft_skills),
    };
    (profile, false)
}

fn job_requirements(result: Option<&AnalysisResult>) -> ProfileScores {
    if let Some(explicit) = result.and_then(|r| r.job_requirements_scores.as_ref()) {
        return explicit_requirements(explicit);
    }

    let mut requirements = BASE_JOB_REQUIREMENTS;

    let tech_pct = result
        .and_then(|r| r.technical_skills_matching.as_ref())
        .and_then(|t| non_zero(t.match_percentage));
    if let Some(tech) = tech_pct {
        requirements.technical_skills = to_percent((tech + 20.0).clamp(75.0, 95.0));
    }

    let work_pct = result
        .and_then(|r| r.work_experience_matching.as_ref())
        .and_then(|w| non_zero(w.match_percentage));
    if let Some(work) = work_pct {
        requirements.work_experience = to_percent((work + 15.0).clamp(70.0, 90.0));
    }

    requirements
}

fn explicit_requirements(scores: &JobRequirementScores) -> ProfileScores {
    let or_base = |v: Option<f64>, base: u32| non_zero(v).map(to_percent).unwrap_or(base);
    let base = BASE_JOB_REQUIREMENTS;

    ProfileScores {
        technical_skills: or_base(scores.technical_skills, base.technical_skills),
        work_experience: or_base(scores.work_experience, base.work_experience),
        education: or_base(scores.education, base.education),
        projects: or_base(scores.projects, base.projects),
        certifications: or_base(scores.certifications, base.certifications),
        soft_skills: or_base(scores.soft_skills, base.soft_skills),
    }
}

/// A zero from the service means "not populated".
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

fn to_percent(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}
