use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::info;

use super::aggregate::aggregate_road;
use super::domain::{RoadId, UserId};
use super::rating::{RatingLookup, RatingTable};
use super::report::{join_segment_details, ConditionReport, GeneratedResults, RoadReport};
use super::repository::{
    ConditionResultUpdate, NewConditionResult, RepositoryError, ResultStore, RoadStore,
    SegmentStore,
};
use super::summary::{SegmentResultSummary, SegmentSummaryBuilder};

/// Service composing the segment, road, and result stores with the scoring engine.
///
/// Generation for a single road is serialized: the road's lock is held from reading the
/// segments until the result upsert completes, so concurrent runs never interleave their
/// read-compute-write cycles. Different roads do not contend.
pub struct ConditionReportService<S, R, P> {
    segments: Arc<S>,
    roads: Arc<R>,
    results: Arc<P>,
    ratings: Arc<dyn RatingLookup>,
    road_locks: Mutex<HashMap<RoadId, Arc<Mutex<()>>>>,
}

impl<S, R, P> ConditionReportService<S, R, P>
where
    S: SegmentStore + 'static,
    R: RoadStore + 'static,
    P: ResultStore + 'static,
{
    pub fn new(segments: Arc<S>, roads: Arc<R>, results: Arc<P>) -> Self {
        Self::with_ratings(segments, roads, results, Arc::new(RatingTable::standard()))
    }

    pub fn with_ratings(
        segments: Arc<S>,
        roads: Arc<R>,
        results: Arc<P>,
        ratings: Arc<dyn RatingLookup>,
    ) -> Self {
        Self {
            segments,
            roads,
            results,
            ratings,
            road_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Score every segment of a road and upsert the road's single result.
    pub fn generate_results_for_road(
        &self,
        road_id: &RoadId,
        user_id: &UserId,
        include_details: bool,
    ) -> Result<GeneratedResults, ConditionReportError> {
        let road = self
            .roads
            .get_summary(road_id)?
            .ok_or_else(|| ConditionReportError::RoadNotFound(road_id.clone()))?;

        let lock = self.road_lock(road_id);
        let outcome = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.score_and_store(&road.name, road_id, user_id, include_details)
        };
        self.release_road_lock(road_id, lock);
        outcome
    }

    fn score_and_store(
        &self,
        road_name: &str,
        road_id: &RoadId,
        user_id: &UserId,
        include_details: bool,
    ) -> Result<GeneratedResults, ConditionReportError> {
        let segments = self.segments.list_by_road_id(road_id)?;
        if segments.is_empty() {
            return Err(ConditionReportError::NoSegments(road_id.clone()));
        }

        let builder = SegmentSummaryBuilder::new(self.ratings.as_ref());
        let segment_results: Vec<SegmentResultSummary> = segments
            .iter()
            .map(|segment| builder.build(segment, include_details))
            .collect();
        let aggregate = aggregate_road(&segments, &segment_results);

        let now = Utc::now();
        let result_id = match self.results.get_by_road_id(road_id)? {
            Some(existing) => {
                self.results.update_by_id(
                    &existing.id,
                    ConditionResultUpdate {
                        user_id: user_id.clone(),
                        segment_results: segment_results.clone(),
                        pavement_type_percentages: aggregate.pavement_type_percentages.clone(),
                        condition_length_stats: aggregate.condition_length_stats.clone(),
                        updated_at: now,
                    },
                )?;
                existing.id
            }
            None => self.results.insert(NewConditionResult {
                road_id: road_id.clone(),
                user_id: user_id.clone(),
                segment_results: segment_results.clone(),
                pavement_type_percentages: aggregate.pavement_type_percentages.clone(),
                condition_length_stats: aggregate.condition_length_stats.clone(),
                created_at: now,
            })?,
        };

        info!(
            road_id = %road_id,
            road = %road_name,
            result_id = %result_id,
            segments = segment_results.len(),
            "condition results generated"
        );

        Ok(GeneratedResults {
            result_id,
            segment_results,
            pavement_type_percentages: aggregate.pavement_type_percentages,
            condition_length_stats: aggregate.condition_length_stats,
        })
    }

    /// Fetch the stored report for a road, joined with the segments' current attributes.
    pub fn get_report_by_road_id(
        &self,
        road_id: &RoadId,
    ) -> Result<RoadReport, ConditionReportError> {
        let road = self
            .roads
            .get_summary(road_id)?
            .ok_or_else(|| ConditionReportError::RoadNotFound(road_id.clone()))?;
        let result = self
            .results
            .get_by_road_id(road_id)?
            .ok_or_else(|| ConditionReportError::NoReport(road_id.clone()))?;
        let segments = self.segments.list_by_road_id(road_id)?;

        Ok(RoadReport {
            road,
            report: ConditionReport {
                id: result.id,
                updated_at: result.updated_at,
                pavement_type_percentages: result.pavement_type_percentages,
                condition_length_stats: result.condition_length_stats,
                segments: join_segment_details(result.segment_results, &segments),
            },
        })
    }

    fn road_lock(&self, road_id: &RoadId) -> Arc<Mutex<()>> {
        let mut locks = self
            .road_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(road_id.clone()).or_default().clone()
    }

    /// Drops the road's lock entry once no other run holds or waits on it.
    fn release_road_lock(&self, road_id: &RoadId, lock: Arc<Mutex<()>>) {
        let mut locks = self
            .road_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // One reference in the map plus ours.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(road_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_road_locks(&self) -> usize {
        self.road_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Broad classification used by transports to map service errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportErrorKind {
    NotFound,
    Precondition,
    Repository,
}

/// Error raised by the condition report service.
#[derive(Debug, thiserror::Error)]
pub enum ConditionReportError {
    #[error("road {0} not found")]
    RoadNotFound(RoadId),
    #[error("road {0} has no segments to score")]
    NoSegments(RoadId),
    #[error("no condition report has been generated for road {0}")]
    NoReport(RoadId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ConditionReportError {
    pub fn kind(&self) -> ReportErrorKind {
        match self {
            Self::RoadNotFound(_) | Self::NoReport(_) => ReportErrorKind::NotFound,
            Self::NoSegments(_) => ReportErrorKind::Precondition,
            Self::Repository(_) => ReportErrorKind::Repository,
        }
    }
}
