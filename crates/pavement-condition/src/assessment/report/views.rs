use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::aggregate::{ConditionLengthStats, PavementTypePercentages};
use super::super::domain::{DamageAssessment, ResultId, RoadSummary, Segment, SegmentInventory};
use super::super::summary::SegmentResultSummary;

/// Response of a result generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResults {
    pub result_id: ResultId,
    pub segment_results: Vec<SegmentResultSummary>,
    pub pavement_type_percentages: PavementTypePercentages,
    pub condition_length_stats: ConditionLengthStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadReport {
    pub road: RoadSummary,
    pub report: ConditionReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionReport {
    pub id: ResultId,
    pub updated_at: DateTime<Utc>,
    pub pavement_type_percentages: PavementTypePercentages,
    pub condition_length_stats: ConditionLengthStats,
    pub segments: Vec<ReportSegmentDetail>,
}

/// Stored segment score joined with the segment's current attributes. Scores reflect the
/// survey at generation time while `segment` reflects the store at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSegmentDetail {
    #[serde(flatten)]
    pub summary: SegmentResultSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetadata {
    pub segment_number: u32,
    pub stationing_from_m: f64,
    pub stationing_to_m: f64,
    pub pavement_width_m: f64,
    pub inventory: SegmentInventory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_assessment: Option<DamageAssessment>,
}

impl SegmentMetadata {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            segment_number: segment.segment_number,
            stationing_from_m: segment.geometry.stationing_from_m,
            stationing_to_m: segment.geometry.stationing_to_m,
            pavement_width_m: segment.geometry.pavement_width_m,
            inventory: segment.inventory.clone(),
            damage_assessment: segment.damage_assessment.clone(),
        }
    }
}
