//! Road-level distributions folded from scored segments. Both distributions are rounded to
//! two decimals and reconciled so their percentages sum to exactly 100.

use super::domain::{Condition, PavementType, Segment};
use super::rounding::{reconcile_to_hundred, round2};
use super::summary::SegmentResultSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type PavementTypePercentages = BTreeMap<PavementType, f64>;
pub type ConditionLengthStats = BTreeMap<Condition, ConditionLengthStat>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionLengthStat {
    pub length_km: f64,
    pub percentage: f64,
}

/// Both normalized distributions for one road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadAggregate {
    pub pavement_type_percentages: PavementTypePercentages,
    pub condition_length_stats: ConditionLengthStats,
}

/// Folds `segments` and their summaries (same order, same length) into road distributions.
pub fn aggregate_road(segments: &[Segment], summaries: &[SegmentResultSummary]) -> RoadAggregate {
    let lengths = segments
        .iter()
        .zip(summaries)
        .map(|(segment, summary)| (segment.geometry.length_m(), summary.condition));

    RoadAggregate {
        pavement_type_percentages: pavement_type_percentages(summaries),
        condition_length_stats: condition_length_stats(lengths),
    }
}

/// Share of segments per pavement type, counted rather than length-weighted. Every type
/// is present; an empty input yields all zeros.
pub fn pavement_type_percentages(summaries: &[SegmentResultSummary]) -> PavementTypePercentages {
    let ordered = PavementType::ordered();
    let mut counts = [0usize; 5];
    for summary in summaries {
        if let Some(index) = ordered.iter().position(|kind| *kind == summary.pavement_type) {
            counts[index] += 1;
        }
    }

    let total = summaries.len();
    let mut percentages = [0.0f64; 5];
    if total > 0 {
        for (slot, count) in percentages.iter_mut().zip(counts) {
            *slot = round2(count as f64 / total as f64 * 100.0);
        }
        reconcile_to_hundred(&mut percentages);
    }

    ordered.into_iter().zip(percentages).collect()
}

/// Length per condition bucket from `(length_m, condition)` pairs. Each segment length is
/// rounded to 0.01 km before summing; percentages divide by the unrounded total.
pub fn condition_length_stats<I>(segments: I) -> ConditionLengthStats
where
    I: IntoIterator<Item = (f64, Condition)>,
{
    let ordered = Condition::ordered();
    let mut bucket_km = [0.0f64; 4];
    let mut total_km = 0.0f64;

    for (length_m, condition) in segments {
        let length_km = length_m.max(0.0) / 1000.0;
        total_km += length_km;
        if let Some(index) = ordered.iter().position(|bucket| *bucket == condition) {
            bucket_km[index] += round2(length_km);
        }
    }

    let divisor = if total_km > 0.0 { total_km } else { 1.0 };
    let mut percentages = [0.0f64; 4];
    for (slot, km) in percentages.iter_mut().zip(bucket_km) {
        *slot = round2(km / divisor * 100.0);
    }
    reconcile_to_hundred(&mut percentages);

    ordered
        .into_iter()
        .zip(bucket_km.into_iter().zip(percentages))
        .map(|(condition, (km, percentage))| {
            (
                condition,
                ConditionLengthStat {
                    length_km: round2(km),
                    percentage,
                },
            )
        })
        .collect()
}
