//! Pavement condition scoring: segment damage surveys in, road condition reports out.
//!
//! Scoring is layered leaf-first: [`distress`] turns categorical ratings into areas,
//! [`strategies`] weight those areas per pavement material, [`summary`] derives each
//! segment's treatment trigger index and condition, and [`aggregate`] folds a road's
//! segments into normalized distributions. [`service`] wires the engine to the stores.

pub mod aggregate;
pub mod distress;
pub mod domain;
pub mod fixture;
pub mod rating;
pub mod report;
pub mod repository;
pub mod rounding;
pub mod router;
pub mod service;
pub mod strategies;
pub mod summary;

#[cfg(test)]
mod tests;

pub use aggregate::{
    aggregate_road, condition_length_stats, pavement_type_percentages, ConditionLengthStat,
    ConditionLengthStats, PavementTypePercentages, RoadAggregate,
};
pub use domain::{
    AsphaltDamage, BlockDamage, ConcreteDamage, Condition, DamageAssessment, PavementType,
    ResultId, RoadId, RoadSummary, Segment, SegmentGeometry, SegmentId, SegmentInventory,
    UnpavedDamage, UserId,
};
pub use fixture::{FixtureError, RoadFixture};
pub use rating::{RatingLookup, RatingTable, RatingTableError, RatingTableKind};
pub use report::{ConditionReport, GeneratedResults, ReportSegmentDetail, RoadReport};
pub use repository::{
    ConditionResult, ConditionResultUpdate, NewConditionResult, RepositoryError, ResultStore,
    RoadStore, SegmentStore,
};
pub use router::{condition_router, GenerateResultsRequest};
pub use service::{ConditionReportError, ConditionReportService, ReportErrorKind};
pub use strategies::{DistressChannel, DistressScore, ScoringStrategy, SectionContext};
pub use summary::{SegmentResultSummary, SegmentSummaryBuilder, UNPAVED_TTI};
