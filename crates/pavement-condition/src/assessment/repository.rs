use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{ConditionLengthStats, PavementTypePercentages};
use super::domain::{ResultId, RoadId, RoadSummary, Segment, UserId};
use super::summary::SegmentResultSummary;

/// Stored condition result; exactly one per road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionResult {
    pub id: ResultId,
    pub road_id: RoadId,
    pub user_id: UserId,
    pub segment_results: Vec<SegmentResultSummary>,
    pub pavement_type_percentages: PavementTypePercentages,
    pub condition_length_stats: ConditionLengthStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for the first result written for a road; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConditionResult {
    pub road_id: RoadId,
    pub user_id: UserId,
    pub segment_results: Vec<SegmentResultSummary>,
    pub pavement_type_percentages: PavementTypePercentages,
    pub condition_length_stats: ConditionLengthStats,
    pub created_at: DateTime<Utc>,
}

impl NewConditionResult {
    pub fn into_result(self, id: ResultId) -> ConditionResult {
        ConditionResult {
            id,
            road_id: self.road_id,
            user_id: self.user_id,
            segment_results: self.segment_results,
            pavement_type_percentages: self.pavement_type_percentages,
            condition_length_stats: self.condition_length_stats,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Full overwrite of a stored result. `created_at` and `road_id` are never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionResultUpdate {
    pub user_id: UserId,
    pub segment_results: Vec<SegmentResultSummary>,
    pub pavement_type_percentages: PavementTypePercentages,
    pub condition_length_stats: ConditionLengthStats,
    pub updated_at: DateTime<Utc>,
}

impl ConditionResultUpdate {
    pub fn apply_to(self, result: &mut ConditionResult) {
        result.user_id = self.user_id;
        result.segment_results = self.segment_results;
        result.pavement_type_percentages = self.pavement_type_percentages;
        result.condition_length_stats = self.condition_length_stats;
        result.updated_at = self.updated_at;
    }
}

/// Source of surveyed segments, ordered by segment number.
pub trait SegmentStore: Send + Sync {
    fn list_by_road_id(&self, road_id: &RoadId) -> Result<Vec<Segment>, RepositoryError>;
}

pub trait RoadStore: Send + Sync {
    fn get_summary(&self, road_id: &RoadId) -> Result<Option<RoadSummary>, RepositoryError>;
}

/// Storage for generated results. Implementations must reject a second insert for the
/// same road with [`RepositoryError::Conflict`].
pub trait ResultStore: Send + Sync {
    fn get_by_road_id(&self, road_id: &RoadId) -> Result<Option<ConditionResult>, RepositoryError>;
    fn insert(&self, result: NewConditionResult) -> Result<ResultId, RepositoryError>;
    fn update_by_id(
        &self,
        id: &ResultId,
        update: ConditionResultUpdate,
    ) -> Result<(), RepositoryError>;
    /// Removes the road's result, returning whether one existed.
    fn delete_by_road_id(&self, road_id: &RoadId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
