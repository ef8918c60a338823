//! Wire types for the analysis service's `/analyze-resume` response.
//!
//! The service is loosely typed: every structured block is optional, numbers may arrive as
//! ints or floats, and any field may be `null`. Nothing here is allowed to fail decoding
//! just because a block is missing, so consumers degrade to defaults instead.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Free-text markdown produced by the model.
    #[serde(default, deserialize_with = "nullable")]
    pub analysis: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub analysis_type: String,
    #[serde(default)]
    pub keyword_analysis: Option<KeywordAnalysis>,
    #[serde(default)]
    pub section_scores: Option<SectionScores>,
    #[serde(default)]
    pub job_requirements_scores: Option<JobRequirementScores>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub technical_skills_matching: Option<TechnicalSkillsMatching>,
    #[serde(default)]
    pub work_experience_matching: Option<WorkExperienceMatching>,
    #[serde(default)]
    pub action_verb_analysis: Option<ActionVerbAnalysis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    #[serde(default)]
    pub keywords_found: Option<Vec<String>>,
    #[serde(default)]
    pub missing_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub match_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionScores {
    #[serde(default)]
    pub professional_summary: Option<f64>,
    #[serde(default)]
    pub technical_skills: Option<f64>,
    #[serde(default)]
    pub work_experience: Option<f64>,
    #[serde(default)]
    pub education: Option<f64>,
    #[serde(default)]
    pub projects: Option<f64>,
    #[serde(default)]
    pub certifications: Option<f64>,
    #[serde(default)]
    pub soft_skills: Option<f64>,
}

impl SectionScores {
    /// True when the service sent the block but never filled it in.
    pub fn is_unpopulated(&self) -> bool {
        [
            self.professional_summary,
            self.technical_skills,
            self.work_experience,
            self.education,
            self.projects,
            self.certifications,
            self.soft_skills,
        ]
        .iter()
        .all(|score| score.map_or(true, |s| s == 0.0))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirementScores {
    #[serde(default)]
    pub technical_skills: Option<f64>,
    #[serde(default)]
    pub work_experience: Option<f64>,
    #[serde(default)]
    pub education: Option<f64>,
    #[serde(default)]
    pub projects: Option<f64>,
    #[serde(default)]
    pub certifications: Option<f64>,
    #[serde(default)]
    pub soft_skills: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalSkillsMatching {
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
    #[serde(default)]
    pub matched_skills: Option<Vec<String>>,
    #[serde(default)]
    pub missing_skills: Option<Vec<String>>,
    #[serde(default)]
    pub match_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkExperienceMatching {
    #[serde(default)]
    pub required_experience: Option<Vec<String>>,
    #[serde(default)]
    pub matched_experience: Option<Vec<String>>,
    #[serde(default)]
    pub missing_experience: Option<Vec<String>>,
    /// Qualitative label such as "Senior" or "Partial".
    #[serde(default)]
    pub experience_level_match: Option<String>,
    #[serde(default)]
    pub years_experience_match: Option<bool>,
    #[serde(default)]
    pub industry_relevance: Option<f64>,
    #[serde(default)]
    pub match_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionVerbAnalysis {
    #[serde(default)]
    pub repeated_verbs: Option<Vec<RepeatedVerb>>,
    #[serde(default)]
    pub suggested_replacements: Option<Vec<SuggestedReplacement>>,
    #[serde(default)]
    pub verb_diversity_score: Option<f64>,
    #[serde(default)]
    pub improvement_suggestions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepeatedVerb {
    #[serde(default, deserialize_with = "nullable")]
    pub verb: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestedReplacement {
    #[serde(default, deserialize_with = "nullable")]
    pub original_verb: String,
    #[serde(default, deserialize_with = "nullable")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
}

/// Validation verdict from `/validate-api-key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyValidation {
    #[serde(default)]
    pub valid: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
}

/// Treats an explicit `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
