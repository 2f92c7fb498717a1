use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    AsphaltDamage, BlockDamage, ConcreteDamage, DamageAssessment, PavementType, ResultId, RoadId,
    RoadSummary, Segment, SegmentGeometry, SegmentId, SegmentInventory, UnpavedDamage, UserId,
};
use crate::assessment::repository::{
    ConditionResult, ConditionResultUpdate, NewConditionResult, RepositoryError, ResultStore,
    RoadStore, SegmentStore,
};
use crate::assessment::service::ConditionReportService;

pub(super) fn road_id() -> RoadId {
    RoadId("road-1".to_string())
}

pub(super) fn user_id() -> UserId {
    UserId("surveyor-1".to_string())
}

pub(super) fn road() -> RoadSummary {
    RoadSummary {
        id: road_id(),
        name: "Jalan Lingkar Timur".to_string(),
        code: Some("R-014".to_string()),
        region: Some("East District".to_string()),
        length_km: Some(0.4),
    }
}

pub(super) fn segment(
    number: u32,
    pavement_type: PavementType,
    assessment: Option<DamageAssessment>,
) -> Segment {
    Segment {
        id: SegmentId(format!("seg-{number}")),
        road_id: road_id(),
        segment_number: number,
        geometry: SegmentGeometry {
            stationing_from_m: f64::from(number - 1) * 100.0,
            stationing_to_m: f64::from(number) * 100.0,
            pavement_width_m: 6.0,
        },
        pavement_type,
        inventory: SegmentInventory {
            lane_count: Some(2),
            ..SegmentInventory::default()
        },
        damage_assessment: assessment,
    }
}

/// Four 100 m segments: good asphalt, fair concrete, poor block, unpaved.
pub(super) fn mixed_segments() -> Vec<Segment> {
    vec![
        segment(
            1,
            PavementType::Asphalt,
            Some(DamageAssessment::Asphalt(AsphaltDamage {
                bleeding: Some("0-10%".to_string()),
                ..AsphaltDamage::default()
            })),
        ),
        segment(
            2,
            PavementType::Concrete,
            Some(DamageAssessment::Concrete(ConcreteDamage {
                cracking: Some(">50%".to_string()),
                pumping: Some("yes".to_string()),
                ..ConcreteDamage::default()
            })),
        ),
        segment(
            3,
            PavementType::Block,
            Some(DamageAssessment::Block(BlockDamage {
                reflective_cracking: Some(">50%".to_string()),
                ..BlockDamage::default()
            })),
        ),
        segment(
            4,
            PavementType::Unpaved,
            Some(DamageAssessment::Unpaved(UnpavedDamage::default())),
        ),
    ]
}

#[derive(Default)]
pub(super) struct MemoryNetwork {
    roads: Mutex<HashMap<RoadId, RoadSummary>>,
    segments: Mutex<HashMap<RoadId, Vec<Segment>>>,
    results: Mutex<HashMap<RoadId, ConditionResult>>,
    sequence: AtomicU64,
    pub(super) inserts: AtomicU64,
    pub(super) updates: AtomicU64,
}

impl MemoryNetwork {
    pub(super) fn with_road(road: RoadSummary, segments: Vec<Segment>) -> Self {
        let network = Self::default();
        network.put_road(road, segments);
        network
    }

    pub(super) fn put_road(&self, road: RoadSummary, segments: Vec<Segment>) {
        self.segments
            .lock()
            .expect("segments mutex poisoned")
            .insert(road.id.clone(), segments);
        self.roads
            .lock()
            .expect("roads mutex poisoned")
            .insert(road.id.clone(), road);
    }

    pub(super) fn replace_segments(&self, road_id: &RoadId, segments: Vec<Segment>) {
        self.segments
            .lock()
            .expect("segments mutex poisoned")
            .insert(road_id.clone(), segments);
    }

    pub(super) fn stored(&self, road_id: &RoadId) -> Option<ConditionResult> {
        self.results
            .lock()
            .expect("results mutex poisoned")
            .get(road_id)
            .cloned()
    }
}

impl SegmentStore for MemoryNetwork {
    fn list_by_road_id(&self, road_id: &RoadId) -> Result<Vec<Segment>, RepositoryError> {
        let guard = self.segments.lock().expect("segments mutex poisoned");
        let mut segments = guard.get(road_id).cloned().unwrap_or_default();
        segments.sort_by_key(|segment| segment.segment_number);
        Ok(segments)
    }
}

impl RoadStore for MemoryNetwork {
    fn get_summary(&self, road_id: &RoadId) -> Result<Option<RoadSummary>, RepositoryError> {
        let guard = self.roads.lock().expect("roads mutex poisoned");
        Ok(guard.get(road_id).cloned())
    }
}

impl ResultStore for MemoryNetwork {
    fn get_by_road_id(&self, road_id: &RoadId) -> Result<Option<ConditionResult>, RepositoryError> {
        Ok(self.stored(road_id))
    }

    fn insert(&self, result: NewConditionResult) -> Result<ResultId, RepositoryError> {
        let mut guard = self.results.lock().expect("results mutex poisoned");
        if guard.contains_key(&result.road_id) {
            return Err(RepositoryError::Conflict);
        }
        let id = ResultId(format!(
            "res-{:06}",
            self.sequence.fetch_add(1, Ordering::Relaxed) + 1
        ));
        guard.insert(result.road_id.clone(), result.into_result(id.clone()));
        self.inserts.fetch_add(1, Ordering::Relaxed);
        Ok(id)
    }

    fn update_by_id(
        &self,
        id: &ResultId,
        update: ConditionResultUpdate,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.results.lock().expect("results mutex poisoned");
        let stored = guard
            .values_mut()
            .find(|result| &result.id == id)
            .ok_or(RepositoryError::NotFound)?;
        update.apply_to(stored);
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn delete_by_road_id(&self, road_id: &RoadId) -> Result<bool, RepositoryError> {
        let mut guard = self.results.lock().expect("results mutex poisoned");
        Ok(guard.remove(road_id).is_some())
    }
}

pub(super) struct UnavailableNetwork;

impl SegmentStore for UnavailableNetwork {
    fn list_by_road_id(&self, _road_id: &RoadId) -> Result<Vec<Segment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl RoadStore for UnavailableNetwork {
    fn get_summary(&self, _road_id: &RoadId) -> Result<Option<RoadSummary>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl ResultStore for UnavailableNetwork {
    fn get_by_road_id(
        &self,
        _road_id: &RoadId,
    ) -> Result<Option<ConditionResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _result: NewConditionResult) -> Result<ResultId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_by_id(
        &self,
        _id: &ResultId,
        _update: ConditionResultUpdate,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_by_road_id(&self, _road_id: &RoadId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = ConditionReportService<MemoryNetwork, MemoryNetwork, MemoryNetwork>;

pub(super) fn build_service(segments: Vec<Segment>) -> (MemoryService, Arc<MemoryNetwork>) {
    let network = Arc::new(MemoryNetwork::with_road(road(), segments));
    let service = ConditionReportService::new(network.clone(), network.clone(), network.clone());
    (service, network)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
