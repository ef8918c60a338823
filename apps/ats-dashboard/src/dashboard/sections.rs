//! Section renderer: maps a section key to a title, description, and layout.
//!
//! Specialized layouts only apply when the matching structured block is present. Otherwise the
//! free-text analysis is shown (as markdown for the comprehensive report, plain text elsewhere).
//! Every optional list or number inside a layout defaults to empty or zero.

use serde::Serialize;

use crate::models::analysis::{
    ActionVerbAnalysis, AnalysisResult, KeywordAnalysis, TechnicalSkillsMatching,
    WorkExperienceMatching,
};

pub const OVERVIEW: &str = "overview";
pub const COMPREHENSIVE_ANALYSIS: &str = "comprehensive_analysis";
pub const KEYWORD_ANALYSIS: &str = "keyword_analysis";
pub const TECHNICAL_SKILLS: &str = "technical_skills";
pub const WORK_EXPERIENCE: &str = "work_experience";

/// Sidebar entries on the dashboard, in display order.
pub const NAVIGATION: &[NavEntry] = &[
    NavEntry { id: OVERVIEW, label: "Overview" },
    NavEntry { id: COMPREHENSIVE_ANALYSIS, label: "Comprehensive Report" },
    NavEntry { id: KEYWORD_ANALYSIS, label: "Keyword Analysis" },
    NavEntry { id: TECHNICAL_SKILLS, label: "Technical Skills" },
    NavEntry { id: WORK_EXPERIENCE, label: "Work Experience" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: &'static str,
    pub label: &'static str,
}

pub fn section_title(key: &str) -> &'static str {
    match key {
        COMPREHENSIVE_ANALYSIS => "Comprehensive Analysis",
        KEYWORD_ANALYSIS => "Keyword Analysis",
        TECHNICAL_SKILLS => "Technical Skills Analysis",
        WORK_EXPERIENCE => "Work Experience Analysis",
        "skills_optimization" => "Skills Analysis",
        "leadership" => "Leadership Analysis",
        "action_verbs" => "Action Verbs Analysis",
        "tailor" => "Resume Tailoring",
        _ => "Analysis",
    }
}

pub fn section_description(key: &str) -> &'static str {
    match key {
        COMPREHENSIVE_ANALYSIS => {
            "Complete resume analysis with technical skills, experience, and match percentage"
        }
        KEYWORD_ANALYSIS => "Analysis of keyword matching between resume and job description",
        TECHNICAL_SKILLS => "Detailed analysis of technical skills and proficiency",
        WORK_EXPERIENCE => "Analysis of work experience relevance and achievements",
        "skills_optimization" => {
            "Analyze and optimize the skills section for better ATS compatibility"
        }
        "leadership" => "Identify and highlight leadership qualities",
        "action_verbs" => "Improve action verbs and detect repetitions",
        "tailor" => "Tailor resume content to specific job requirements",
        _ => "Detailed analysis of this section",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub key: String,
    pub title: &'static str,
    pub description: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SectionBody {
    /// No analysis has completed yet for this session.
    Empty { message: &'static str },
    Keywords(KeywordView),
    TechnicalSkills(TechnicalSkillsView),
    WorkExperience(WorkExperienceView),
    Markdown { source: String },
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordView {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub match_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagCounts {
    pub required: usize,
    pub matched: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalSkillsView {
    pub match_percentage: u32,
    pub required: Vec<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub counts: TagCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkExperienceView {
    pub match_percentage: u32,
    pub required: Vec<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub counts: TagCounts,
    pub level_match: String,
    pub years_match: bool,
    /// Out of 100.
    pub industry_relevance: u32,
    pub action_verbs: Option<ActionVerbView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionVerbView {
    pub diversity_score: f64,
    pub repeated_verbs: Vec<RepeatedVerbView>,
    pub suggestions: Vec<VerbSuggestionView>,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatedVerbView {
    pub verb: String,
    pub count: u32,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerbSuggestionView {
    pub original_verb: String,
    pub category: String,
    pub alternatives: Vec<String>,
}

/// Renders `key` for a completed analysis.
pub fn render_section(key: &str, result: &AnalysisResult) -> SectionView {
    SectionView {
        key: key.to_string(),
        title: section_title(key),
        description: section_description(key),
        body: special_layout(key, result).unwrap_or_else(|| fallback_layout(key, result)),
    }
}

/// Placeholder shown before the first analysis finishes.
pub fn render_empty_section(key: &str) -> SectionView {
    SectionView {
        key: key.to_string(),
        title: section_title(key),
        description: section_description(key),
        body: SectionBody::Empty {
            message: "Click \"Run Analysis\" to analyze this section of your resume",
        },
    }
}

fn special_layout(key: &str, result: &AnalysisResult) -> Option<SectionBody> {
    match key {
        KEYWORD_ANALYSIS => result
            .keyword_analysis
            .as_ref()
            .map(|k| SectionBody::Keywords(keyword_view(k))),
        TECHNICAL_SKILLS => result
            .technical_skills_matching
            .as_ref()
            .map(|t| SectionBody::TechnicalSkills(technical_view(t))),
        WORK_EXPERIENCE => result.work_experience_matching.as_ref().map(|w| {
            SectionBody::WorkExperience(work_view(w, result.action_verb_analysis.as_ref()))
        }),
        _ => None,
    }
}

fn fallback_layout(key: &str, result: &AnalysisResult) -> SectionBody {
    if key == COMPREHENSIVE_ANALYSIS {
        SectionBody::Markdown {
            source: result.analysis.clone(),
        }
    } else {
        SectionBody::Text {
            text: result.analysis.clone(),
        }
    }
}

fn keyword_view(keywords: &KeywordAnalysis) -> KeywordView {
    KeywordView {
        found: list(&keywords.keywords_found),
        missing: list(&keywords.missing_keywords),
        match_score: percent(keywords.match_score),
    }
}

fn technical_view(tech: &TechnicalSkillsMatching) -> TechnicalSkillsView {
    let required = list(&tech.required_skills);
    let matched = list(&tech.matched_skills);
    let missing = list(&tech.missing_skills);

    TechnicalSkillsView {
        match_percentage: percent(tech.match_percentage),
        counts: counts(&required, &matched, &missing),
        required,
        matched,
        missing,
    }
}

fn work_view(work: &WorkExperienceMatching, verbs: Option<&ActionVerbAnalysis>) -> WorkExperienceView {
    let required = list(&work.required_experience);
    let matched = list(&work.matched_experience);
    let missing = list(&work.missing_experience);

    WorkExperienceView {
        match_percentage: percent(work.match_percentage),
        counts: counts(&required, &matched, &missing),
        required,
        matched,
        missing,
        level_match: work
            .experience_level_match
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "Not Specified".to_string()),
        years_match: work.years_experience_match.unwrap_or(false),
        industry_relevance: percent(work.industry_relevance),
        action_verbs: verbs.map(action_verb_view),
    }
}

fn action_verb_view(verbs: &ActionVerbAnalysis) -> ActionVerbView {
    let repeated_verbs = verbs
        .repeated_verbs
        .iter()
        .flatten()
        .map(|v| RepeatedVerbView {
            verb: v.verb.clone(),
            count: if v.count.is_finite() && v.count > 0.0 {
                v.count.round() as u32
            } else {
                0
            },
            locations: v.locations.clone(),
        })
        .collect();

    let suggestions = verbs
        .suggested_replacements
        .iter()
        .flatten()
        .map(|s| VerbSuggestionView {
            original_verb: s.original_verb.clone(),
            category: s.category.clone(),
            alternatives: s.suggestions.clone(),
        })
        .collect();

    ActionVerbView {
        diversity_score: verbs.verb_diversity_score.filter(|s| s.is_finite()).unwrap_or(0.0),
        repeated_verbs,
        suggestions,
        improvement_suggestions: list(&verbs.improvement_suggestions),
    }
}

fn list(items: &Option<Vec<String>>) -> Vec<String> {
    items.clone().unwrap_or_default()
}

fn counts(required: &[String], matched: &[String], missing: &[String]) -> TagCounts {
    TagCounts {
        required: required.len(),
        matched: matched.len(),
        missing: missing.len(),
    }
}

fn percent(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u32,
        _ => 0,
    }
}
