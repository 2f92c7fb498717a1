mod asphalt;
mod block;
mod concrete;
mod unpaved;
pub mod weights;

pub use asphalt::AsphaltStrategy;
pub use block::BlockStrategy;
pub use concrete::ConcreteStrategy;
pub use unpaved::UnpavedStrategy;

use super::domain::{DamageAssessment, PavementType, SegmentGeometry};
use super::rating::RatingLookup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geometry a strategy scores against. `area_m2` is always `length_m * width_m`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionContext {
    pub length_m: f64,
    pub width_m: f64,
    pub area_m2: f64,
}

impl SectionContext {
    pub fn new(length_m: f64, width_m: f64) -> Self {
        let length_m = length_m.max(0.0);
        let width_m = width_m.max(0.0);
        Self {
            length_m,
            width_m,
            area_m2: length_m * width_m,
        }
    }

    pub fn from_geometry(geometry: &SegmentGeometry) -> Self {
        Self::new(geometry.length_m(), geometry.width_m())
    }
}

/// Individual distress measurements that feed the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistressChannel {
    Bleeding,
    Disintegration,
    OtherCrackArea,
    ReflectiveCracking,
    PotholeArea,
    Rutting,
    EdgeDamageLeft,
    EdgeDamageRight,
    Cracking,
    Spalling,
    StructuralCracking,
    Faulting,
    Pumping,
    CornerBreak,
    Crossfall,
    Depressions,
    Erosion,
    Potholes,
}

/// Per-channel areas, their weighted contributions, and the weighted total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistressScore {
    pub distress_areas: BTreeMap<DistressChannel, f64>,
    pub weighted_components: BTreeMap<DistressChannel, f64>,
    pub weighted_distress: f64,
}

impl DistressScore {
    pub(crate) fn record(&mut self, channel: DistressChannel, area: f64, weight: f64) {
        let weighted = area * weight;
        self.distress_areas.insert(channel, area);
        self.weighted_components.insert(channel, weighted);
        self.weighted_distress += weighted;
    }
}

/// One weighted-distress formula per pavement material.
pub trait ScoringStrategy {
    type Damage;

    fn score(
        &self,
        damage: &Self::Damage,
        section: &SectionContext,
        ratings: &dyn RatingLookup,
    ) -> DistressScore;
}

/// Selects the strategy matching `pavement_type`. Returns `None` when the assessment is
/// missing, unrecognised, or tagged for a different material.
pub fn score_assessment(
    pavement_type: PavementType,
    assessment: Option<&DamageAssessment>,
    section: &SectionContext,
    ratings: &dyn RatingLookup,
) -> Option<DistressScore> {
    let score = match (pavement_type, assessment?) {
        (PavementType::Asphalt, DamageAssessment::Asphalt(damage)) => {
            AsphaltStrategy.score(damage, section, ratings)
        }
        (PavementType::Concrete, DamageAssessment::Concrete(damage)) => {
            ConcreteStrategy.score(damage, section, ratings)
        }
        (PavementType::Block, DamageAssessment::Block(damage)) => {
            BlockStrategy.score(damage, section, ratings)
        }
        (PavementType::Unpaved, DamageAssessment::Unpaved(damage))
        | (PavementType::Gravel, DamageAssessment::Gravel(damage)) => {
            UnpavedStrategy.score(damage, section, ratings)
        }
        _ => return None,
    };

    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{AsphaltDamage, UnpavedDamage};
    use crate::assessment::rating::RatingTable;

    #[test]
    fn section_context_clamps_negative_dimensions() {
        let section = SectionContext::new(-5.0, 6.0);
        assert_eq!(section.length_m, 0.0);
        assert_eq!(section.area_m2, 0.0);
    }

    #[test]
    fn dispatch_requires_matching_tag() {
        let ratings = RatingTable::standard();
        let section = SectionContext::new(100.0, 6.0);
        let asphalt = DamageAssessment::Asphalt(AsphaltDamage::default());

        assert!(score_assessment(PavementType::Asphalt, Some(&asphalt), &section, &ratings)
            .is_some());
        assert!(
            score_assessment(PavementType::Concrete, Some(&asphalt), &section, &ratings)
                .is_none()
        );
        assert!(score_assessment(PavementType::Asphalt, None, &section, &ratings).is_none());
        assert!(score_assessment(
            PavementType::Block,
            Some(&DamageAssessment::Unrecognized),
            &section,
            &ratings
        )
        .is_none());
    }

    #[test]
    fn gravel_and_unpaved_share_the_same_formula() {
        let ratings = RatingTable::standard();
        let section = SectionContext::new(100.0, 5.0);
        let damage = UnpavedDamage {
            crossfall_condition: Some("3-5%".to_string()),
            potholes: Some("1-5%".to_string()),
            ..UnpavedDamage::default()
        };

        let unpaved = score_assessment(
            PavementType::Unpaved,
            Some(&DamageAssessment::Unpaved(damage.clone())),
            &section,
            &ratings,
        )
        .expect("unpaved scores");
        let gravel = score_assessment(
            PavementType::Gravel,
            Some(&DamageAssessment::Gravel(damage)),
            &section,
            &ratings,
        )
        .expect("gravel scores");

        assert_eq!(unpaved, gravel);
    }
}
