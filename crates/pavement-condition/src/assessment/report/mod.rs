mod join;
pub mod views;

pub(crate) use join::join_segment_details;
pub use views::{
    ConditionReport, GeneratedResults, ReportSegmentDetail, RoadReport, SegmentMetadata,
};
