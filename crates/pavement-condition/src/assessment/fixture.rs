use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{RoadSummary, Segment, SegmentId};

/// A road header together with its surveyed segments, as exported for offline scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadFixture {
    pub road: RoadSummary,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureDocument {
    Many(Vec<RoadFixture>),
    One(RoadFixture),
}

impl RoadFixture {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, FixtureError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Accepts either a single fixture object or an array of them. Segments are returned
    /// ordered by segment number.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Self>, FixtureError> {
        let document: FixtureDocument = serde_json::from_reader(reader)?;
        let mut fixtures = match document {
            FixtureDocument::Many(fixtures) => fixtures,
            FixtureDocument::One(fixture) => vec![fixture],
        };

        for fixture in &mut fixtures {
            if let Some(stray) = fixture
                .segments
                .iter()
                .find(|segment| segment.road_id != fixture.road.id)
            {
                return Err(FixtureError::RoadMismatch {
                    segment: stray.id.clone(),
                    road: fixture.road.id.0.clone(),
                });
            }
            fixture.segments.sort_by_key(|segment| segment.segment_number);
        }

        Ok(fixtures)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read road fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid road fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("segment {segment} does not belong to road {road}")]
    RoadMismatch { segment: SegmentId, road: String },
}
