//! Analysis types the remote service understands, with the labels shown on the upload page.

use serde::Serialize;

use crate::errors::AppError;

pub const DEFAULT_ANALYSIS_TYPE: &str = "comprehensive_analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisType {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const ANALYSIS_TYPES: &[AnalysisType] = &[
    AnalysisType {
        value: "comprehensive_analysis",
        label: "Comprehensive Analysis",
        description: "Complete resume analysis with technical skills, experience, and match percentage",
    },
    AnalysisType {
        value: "summary_optimization",
        label: "Summary Optimization",
        description: "Optimize the professional summary section",
    },
    AnalysisType {
        value: "skills_optimization",
        label: "Skills Optimization",
        description: "Analyze and optimize the skills section",
    },
    AnalysisType {
        value: "work_experience",
        label: "Work Experience",
        description: "Improve work experience descriptions and formatting",
    },
    AnalysisType {
        value: "education",
        label: "Education",
        description: "Optimize education section and certifications",
    },
    AnalysisType {
        value: "projects",
        label: "Projects",
        description: "Analyze and improve project descriptions",
    },
    AnalysisType {
        value: "certifications",
        label: "Certifications",
        description: "Review and suggest relevant certifications",
    },
    AnalysisType {
        value: "leadership",
        label: "Leadership",
        description: "Identify and highlight leadership qualities",
    },
    AnalysisType {
        value: "quantify",
        label: "Quantify Achievements",
        description: "Add quantifiable metrics and achievements",
    },
    AnalysisType {
        value: "action_verbs",
        label: "Action Verbs",
        description: "Improve action verbs and descriptions",
    },
    AnalysisType {
        value: "bullet_points",
        label: "Bullet Points",
        description: "Optimize bullet point formatting and content",
    },
    AnalysisType {
        value: "tailor",
        label: "Tailor Resume",
        description: "Tailor resume content to specific job requirements",
    },
    AnalysisType {
        value: "data_analysis",
        label: "Data Analysis",
        description: "Focus on data analysis skills and projects",
    },
    AnalysisType {
        value: "marketing",
        label: "Marketing",
        description: "Analyze marketing-related skills and experience",
    },
];

impl AnalysisType {
    /// Looks up a type by key. Blank input selects the comprehensive analysis.
    pub fn parse(key: Option<&str>) -> Result<&'static AnalysisType, AppError> {
        let key = key.map(str::trim).filter(|k| !k.is_empty()).unwrap_or(DEFAULT_ANALYSIS_TYPE);

        ANALYSIS_TYPES.iter().find(|t| t.value == key).ok_or_else(|| {
            let available: Vec<&str> = ANALYSIS_TYPES.iter().map(|t| t.value).collect();
            AppError::Validation(format!(
                "Invalid analysis type. Available types: {}",
                available.join(", ")
            ))
        })
    }
}
