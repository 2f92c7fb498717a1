use metrics_exporter_prometheus::PrometheusHandle;
use pavement_condition::assessment::{
    ConditionResult, ConditionResultUpdate, NewConditionResult, RatingTable, RatingTableError,
    RepositoryError, ResultId, ResultStore, RoadFixture, RoadId, RoadStore, RoadSummary, Segment,
    SegmentStore,
};
use pavement_condition::config::ScoringConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local road network backing all three stores.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRoadNetwork {
    roads: Arc<Mutex<HashMap<RoadId, RoadSummary>>>,
    segments: Arc<Mutex<HashMap<RoadId, Vec<Segment>>>>,
    results: Arc<Mutex<HashMap<RoadId, ConditionResult>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryRoadNetwork {
    /// Registers a road with its segments. Re-seeding a known road replaces it wholesale,
    /// including dropping its stored result.
    pub(crate) fn seed(&self, fixture: RoadFixture) -> Result<(), RepositoryError> {
        let RoadFixture { road, mut segments } = fixture;
        segments.sort_by_key(|segment| segment.segment_number);
        let road_id = road.id.clone();
        let count = segments.len();

        if self.delete_road(&road_id)? {
            info!(road_id = %road_id, "replacing previously seeded road");
        }

        lock(&self.segments, "segments")?.insert(road_id.clone(), segments);
        lock(&self.roads, "roads")?.insert(road_id.clone(), road);

        info!(road_id = %road_id, segments = count, "road seeded");
        Ok(())
    }

    /// Removes a road with its segments and its result.
    pub(crate) fn delete_road(&self, road_id: &RoadId) -> Result<bool, RepositoryError> {
        let existed = lock(&self.roads, "roads")?.remove(road_id).is_some();
        lock(&self.segments, "segments")?.remove(road_id);
        if self.delete_by_road_id(road_id)? {
            info!(road_id = %road_id, "stored condition result removed with its road");
        }
        Ok(existed)
    }

    pub(crate) fn road_ids(&self) -> Result<Vec<RoadId>, RepositoryError> {
        let mut ids: Vec<RoadId> = lock(&self.roads, "roads")?.keys().cloned().collect();
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(ids)
    }

    fn next_result_id(&self) -> ResultId {
        let next = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ResultId(format!("res-{next:06}"))
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{name} mutex poisoned")))
}

impl SegmentStore for InMemoryRoadNetwork {
    fn list_by_road_id(&self, road_id: &RoadId) -> Result<Vec<Segment>, RepositoryError> {
        let guard = lock(&self.segments, "segments")?;
        Ok(guard.get(road_id).cloned().unwrap_or_default())
    }
}

impl RoadStore for InMemoryRoadNetwork {
    fn get_summary(&self, road_id: &RoadId) -> Result<Option<RoadSummary>, RepositoryError> {
        let guard = lock(&self.roads, "roads")?;
        Ok(guard.get(road_id).cloned())
    }
}

impl ResultStore for InMemoryRoadNetwork {
    fn get_by_road_id(&self, road_id: &RoadId) -> Result<Option<ConditionResult>, RepositoryError> {
        let guard = lock(&self.results, "results")?;
        Ok(guard.get(road_id).cloned())
    }

    fn insert(&self, result: NewConditionResult) -> Result<ResultId, RepositoryError> {
        let mut guard = lock(&self.results, "results")?;
        if guard.contains_key(&result.road_id) {
            return Err(RepositoryError::Conflict);
        }
        let id = self.next_result_id();
        guard.insert(result.road_id.clone(), result.into_result(id.clone()));
        Ok(id)
    }

    fn update_by_id(
        &self,
        id: &ResultId,
        update: ConditionResultUpdate,
    ) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.results, "results")?;
        match guard.values_mut().find(|stored| &stored.id == id) {
            Some(stored) => {
                update.apply_to(stored);
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete_by_road_id(&self, road_id: &RoadId) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.results, "results")?;
        Ok(guard.remove(road_id).is_some())
    }
}

/// Standard rating tables, overlaid with the configured CSV when one is set.
pub(crate) fn load_ratings(config: &ScoringConfig) -> Result<RatingTable, RatingTableError> {
    match &config.rating_table_path {
        Some(path) => {
            let table = RatingTable::from_path(path)?;
            info!(path = %path.display(), "rating table overrides loaded");
            Ok(table)
        }
        None => Ok(RatingTable::standard()),
    }
}
