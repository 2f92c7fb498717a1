use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for surveyed roads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoadId(pub String);

/// Identifier wrapper for stationing segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub String);

/// Identifier of the editor who requested a result generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier assigned by the result store on first insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultId(pub String);

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PavementType {
    Asphalt,
    Concrete,
    Block,
    Unpaved,
    Gravel,
}

impl PavementType {
    /// Enumeration order used for report maps and tie-breaking.
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Asphalt,
            Self::Concrete,
            Self::Block,
            Self::Unpaved,
            Self::Gravel,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Asphalt => "Asphalt",
            Self::Concrete => "Concrete",
            Self::Block => "Block",
            Self::Unpaved => "Unpaved",
            Self::Gravel => "Gravel",
        }
    }
}

/// Condition bucket assigned from a segment's treatment trigger index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    Good,
    Fair,
    Poor,
    Bad,
}

impl Condition {
    pub const fn ordered() -> [Self; 4] {
        [Self::Good, Self::Fair, Self::Poor, Self::Bad]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Bad => "Bad",
        }
    }

    /// Thresholds: below 25 good, below 75 fair, up to and including 100 poor.
    pub fn from_tti(tti: f64) -> Self {
        if tti < 25.0 {
            Self::Good
        } else if tti < 75.0 {
            Self::Fair
        } else if tti <= 100.0 {
            Self::Poor
        } else {
            Self::Bad
        }
    }
}

/// Stationing interval and paved width of a segment, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentGeometry {
    pub stationing_from_m: f64,
    pub stationing_to_m: f64,
    pub pavement_width_m: f64,
}

impl SegmentGeometry {
    pub fn length_m(&self) -> f64 {
        (self.stationing_to_m - self.stationing_from_m).max(0.0)
    }

    pub fn width_m(&self) -> f64 {
        self.pavement_width_m.max(0.0)
    }
}

/// Inventory attributes captured alongside the survey; not used for scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentInventory {
    pub lane_count: Option<u8>,
    pub shoulder_width_m: Option<f64>,
    pub drainage: Option<String>,
    pub terrain: Option<String>,
    pub land_use: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AsphaltDamage {
    pub bleeding: Option<String>,
    pub disintegration: Option<String>,
    pub other_crack_area: Option<String>,
    pub reflective_cracking: Option<String>,
    pub pothole_area: Option<String>,
    pub rutting: Option<String>,
    pub edge_damage_left: Option<String>,
    pub edge_damage_right: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConcreteDamage {
    pub cracking: Option<String>,
    pub spalling: Option<String>,
    pub structural_cracking: Option<String>,
    pub faulting: Option<String>,
    /// "yes" or "no".
    pub pumping: Option<String>,
    /// "yes" or "no".
    pub corner_break: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockDamage {
    pub reflective_cracking: Option<String>,
    pub disintegration: Option<String>,
    pub pothole_area: Option<String>,
    pub rutting: Option<String>,
    pub edge_damage_left: Option<String>,
    pub edge_damage_right: Option<String>,
}

/// Survey payload shared by unpaved and gravel segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnpavedDamage {
    /// One of ">5%", "3-5%", "flat", "concave".
    pub crossfall_condition: Option<String>,
    pub crossfall_area: Option<String>,
    pub settlement: Option<String>,
    pub erosion: Option<String>,
    pub potholes: Option<String>,
    pub rutting: Option<String>,
}

/// Damage survey tagged by the pavement material it was recorded for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DamageAssessment {
    Asphalt(AsphaltDamage),
    Concrete(ConcreteDamage),
    Block(BlockDamage),
    Unpaved(UnpavedDamage),
    Gravel(UnpavedDamage),
    #[serde(other)]
    Unrecognized,
}

impl DamageAssessment {
    pub fn pavement_type(&self) -> Option<PavementType> {
        match self {
            Self::Asphalt(_) => Some(PavementType::Asphalt),
            Self::Concrete(_) => Some(PavementType::Concrete),
            Self::Block(_) => Some(PavementType::Block),
            Self::Unpaved(_) => Some(PavementType::Unpaved),
            Self::Gravel(_) => Some(PavementType::Gravel),
            Self::Unrecognized => None,
        }
    }
}

/// A stationing segment as supplied by the segment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub road_id: RoadId,
    pub segment_number: u32,
    #[serde(flatten)]
    pub geometry: SegmentGeometry,
    pub pavement_type: PavementType,
    #[serde(default)]
    pub inventory: SegmentInventory,
    #[serde(default)]
    pub damage_assessment: Option<DamageAssessment>,
}

/// Road header returned alongside reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSummary {
    pub id: RoadId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub length_km: Option<f64>,
}
