use super::domain::{Condition, PavementType, Segment, SegmentId};
use super::rating::RatingLookup;
use super::rounding::round2;
use super::strategies::{score_assessment, DistressChannel, SectionContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// TTI assigned to every unpaved segment regardless of its survey. Gravel segments are
/// scored by formula.
pub const UNPAVED_TTI: f64 = 150.0;

/// Scored view of one segment, regenerated wholesale on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResultSummary {
    pub segment_id: SegmentId,
    pub pavement_type: PavementType,
    pub section_area: f64,
    pub weighted_distress: f64,
    pub tti: f64,
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distress_areas: Option<BTreeMap<DistressChannel, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_components: Option<BTreeMap<DistressChannel, f64>>,
}

/// Turns a segment's geometry and survey into a TTI and condition bucket.
pub struct SegmentSummaryBuilder<'a> {
    ratings: &'a dyn RatingLookup,
}

impl<'a> SegmentSummaryBuilder<'a> {
    pub fn new(ratings: &'a dyn RatingLookup) -> Self {
        Self { ratings }
    }

    pub fn build(&self, segment: &Segment, include_details: bool) -> SegmentResultSummary {
        let section = SectionContext::from_geometry(&segment.geometry);
        let score = score_assessment(
            segment.pavement_type,
            segment.damage_assessment.as_ref(),
            &section,
            self.ratings,
        );

        if score.is_none() {
            match &segment.damage_assessment {
                None => debug!(segment_id = %segment.id, "segment has no damage assessment"),
                Some(assessment) => warn!(
                    segment_id = %segment.id,
                    pavement_type = segment.pavement_type.label(),
                    assessment_type = assessment.pavement_type().map(PavementType::label),
                    "damage assessment does not match pavement type; scoring as zero"
                ),
            }
        }

        let weighted_distress = score
            .as_ref()
            .map(|score| score.weighted_distress)
            .unwrap_or(0.0);

        let tti = if segment.pavement_type == PavementType::Unpaved {
            UNPAVED_TTI
        } else {
            tti_for(weighted_distress, section.area_m2)
        };

        let (distress_areas, weighted_components) = match score {
            Some(score) if include_details => (
                Some(rounded(score.distress_areas)),
                Some(rounded(score.weighted_components)),
            ),
            _ => (None, None),
        };

        SegmentResultSummary {
            segment_id: segment.id.clone(),
            pavement_type: segment.pavement_type,
            section_area: round2(section.area_m2),
            weighted_distress: round2(weighted_distress),
            tti,
            condition: Condition::from_tti(tti),
            distress_areas,
            weighted_components,
        }
    }
}

/// Weighted distress per 100 m² of section, rounded; zero-area sections score zero.
pub fn tti_for(weighted_distress: f64, area_m2: f64) -> f64 {
    if area_m2 > 0.0 {
        round2(weighted_distress / area_m2 * 100.0)
    } else {
        0.0
    }
}

fn rounded(values: BTreeMap<DistressChannel, f64>) -> BTreeMap<DistressChannel, f64> {
    values
        .into_iter()
        .map(|(channel, value)| (channel, round2(value)))
        .collect()
}
