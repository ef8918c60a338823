//! Chart configurations derived from normalized scores.
//!
//! Pure functions: the same scores always produce the same charts. The serialized shape
//! follows Chart.js (`labels` + `datasets`) so a frontend can hand it straight to a renderer.

use serde::Serialize;

use crate::analysis::NormalizedScores;

const MATCH_FILL: &str = "rgba(16, 185, 129, 0.8)";
const MATCH_BORDER: &str = "rgba(16, 185, 129, 1)";
const GAP_FILL: &str = "rgba(239, 68, 68, 0.8)";
const GAP_BORDER: &str = "rgba(239, 68, 68, 1)";
const PROFILE_FILL: &str = "rgba(59, 130, 246, 0.2)";
const PROFILE_BORDER: &str = "rgba(59, 130, 246, 1)";
const REQUIREMENT_FILL: &str = "rgba(16, 185, 129, 0.2)";

pub const RADAR_AXES: [&str; 6] = [
    "Technical Skills",
    "Work Experience",
    "Education",
    "Projects",
    "Certifications",
    "Soft Skills",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutChart {
    pub title: &'static str,
    pub description: &'static str,
    pub labels: [&'static str; 2],
    pub datasets: Vec<DoughnutDataset>,
    /// Big number shown in the middle of the ring, e.g. "82%".
    pub headline: String,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoughnutDataset {
    pub data: [u32; 2],
    pub background_color: [&'static str; 2],
    pub border_color: [&'static str; 2],
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub title: &'static str,
    pub description: &'static str,
    pub labels: [&'static str; 6],
    pub datasets: Vec<RadarDataset>,
    pub scale_max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarDataset {
    pub label: &'static str,
    pub data: [u32; 6],
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
    pub point_background_color: &'static str,
}

/// Everything the overview page plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub match_chart: DoughnutChart,
    pub technical_chart: DoughnutChart,
    pub profile_chart: RadarChart,
}

impl ChartSet {
    pub fn from_scores(scores: &NormalizedScores) -> Self {
        Self {
            match_chart: ratio_chart(
                "Job Match Score",
                "Overall compatibility with the job requirements",
                ["Match", "Gap"],
                scores.match_score,
                "Match",
            ),
            technical_chart: ratio_chart(
                "Technical Skills Match",
                "Percentage of required technical skills found in resume",
                ["Matched", "Missing"],
                scores.technical_match,
                "Tech Match",
            ),
            profile_chart: profile_chart(scores),
        }
    }
}

/// Two-slice ring of `value` against `100 - value`.
fn ratio_chart(
    title: &'static str,
    description: &'static str,
    labels: [&'static str; 2],
    value: u32,
    caption: &'static str,
) -> DoughnutChart {
    let value = value.min(100);
    DoughnutChart {
        title,
        description,
        labels,
        datasets: vec![DoughnutDataset {
            data: [value, 100 - value],
            background_color: [MATCH_FILL, GAP_FILL],
            border_color: [MATCH_BORDER, GAP_BORDER],
            border_width: 1,
        }],
        headline: format!("{value}%"),
        caption,
    }
}

fn profile_chart(scores: &NormalizedScores) -> RadarChart {
    RadarChart {
        title: "Profile Analysis",
        description: "Your resume scores vs estimated job requirements based on analysis",
        labels: RADAR_AXES,
        datasets: vec![
            RadarDataset {
                label: "Your Profile",
                data: scores.section_scores.as_array(),
                background_color: PROFILE_FILL,
                border_color: PROFILE_BORDER,
                border_width: 2,
                point_background_color: PROFILE_BORDER,
            },
            RadarDataset {
                label: "Job Requirements",
                data: scores.job_requirements.as_array(),
                background_color: REQUIREMENT_FILL,
                border_color: MATCH_BORDER,
                border_width: 2,
                point_background_color: MATCH_BORDER,
            },
        ],
        scale_max: 100,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::{BASE_JOB_REQUIREMENTS, DEFAULT_SECTION_SCORES};

    fn scores(match_score: u32, technical_match: u32) -> NormalizedScores {
        NormalizedScores {
            match_score,
            technical_match,
            section_scores: DEFAULT_SECTION_SCORES,
            job_requirements: BASE_JOB_REQUIREMENTS,
            section_scores_defaulted: true,
        }
    }

    #[test]
    fn test_ratio_charts_sum_to_100() {
        let charts = ChartSet::from_scores(&scores(82, 60));
        assert_eq!(charts.match_chart.datasets[0].data, [82, 18]);
        assert_eq!(charts.match_chart.headline, "82%");
        assert_eq!(charts.technical_chart.datasets[0].data, [60, 40]);
        assert_eq!(charts.technical_chart.labels, ["Matched", "Missing"]);
        assert_eq!(charts.technical_chart.caption, "Tech Match");
    }

    #[test]
    fn test_full_match_has_empty_gap() {
        let charts = ChartSet::from_scores(&scores(100, 0));
        assert_eq!(charts.match_chart.datasets[0].data, [100, 0]);
        assert_eq!(charts.technical_chart.datasets[0].data, [0, 100]);
    }

    #[test]
    fn test_radar_plots_profile_against_requirements() {
        let charts = ChartSet::from_scores(&scores(75, 75));
        let radar = &charts.profile_chart;
        assert_eq!(radar.labels.len(), 6);
        assert_eq!(radar.datasets[0].label, "Your Profile");
        assert_eq!(radar.datasets[0].data, [75, 80, 85, 70, 60, 80]);
        assert_eq!(radar.datasets[1].label, "Job Requirements");
        assert_eq!(radar.datasets[1].data, [85, 80, 75, 70, 60, 75]);
        assert_eq!(radar.scale_max, 100);
    }

    #[test]
    fn test_serialized_shape_uses_chartjs_keys() {
        let json = serde_json::to_value(ChartSet::from_scores(&scores(50, 50))).unwrap();
        let dataset = &json["match_chart"]["datasets"][0];
        assert_eq!(dataset["backgroundColor"][0], "rgba(16, 185, 129, 0.8)");
        assert_eq!(dataset["borderWidth"], 1);
        assert_eq!(
            json["profile_chart"]["datasets"][0]["pointBackgroundColor"],
            "rgba(59, 130, 246, 1)"
        );
    }
}
