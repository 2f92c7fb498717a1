use std::collections::HashMap;

use super::super::domain::{Segment, SegmentId};
use super::super::summary::SegmentResultSummary;
use super::views::{ReportSegmentDetail, SegmentMetadata};

/// Pairs stored summaries with live segment rows by id, keeping the stored order.
/// Summaries whose segment no longer exists are returned without metadata.
pub(crate) fn join_segment_details(
    summaries: Vec<SegmentResultSummary>,
    segments: &[Segment],
) -> Vec<ReportSegmentDetail> {
    let by_id: HashMap<&SegmentId, &Segment> = segments
        .iter()
        .map(|segment| (&segment.id, segment))
        .collect();

    summaries
        .into_iter()
        .map(|summary| {
            let segment = by_id
                .get(&summary.segment_id)
                .map(|segment| SegmentMetadata::from_segment(segment));
            ReportSegmentDetail { summary, segment }
        })
        .collect()
}
