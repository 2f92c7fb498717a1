use super::weights::ASPHALT_WEIGHTS;
use super::{DistressChannel, DistressScore, ScoringStrategy, SectionContext};
use crate::assessment::distress::{damage_area, edge_damage_area, pothole_area};
use crate::assessment::domain::AsphaltDamage;
use crate::assessment::rating::RatingLookup;

pub struct AsphaltStrategy;

impl ScoringStrategy for AsphaltStrategy {
    type Damage = AsphaltDamage;

    fn score(
        &self,
        damage: &AsphaltDamage,
        section: &SectionContext,
        ratings: &dyn RatingLookup,
    ) -> DistressScore {
        let (length, width) = (section.length_m, section.width_m);
        let weights = ASPHALT_WEIGHTS;
        let mut score = DistressScore::default();

        score.record(
            DistressChannel::Bleeding,
            damage_area(ratings, damage.bleeding.as_deref(), length, width),
            weights.bleeding,
        );
        score.record(
            DistressChannel::Disintegration,
            damage_area(ratings, damage.disintegration.as_deref(), length, width),
            weights.disintegration,
        );
        score.record(
            DistressChannel::OtherCrackArea,
            damage_area(ratings, damage.other_crack_area.as_deref(), length, width),
            weights.other_crack,
        );
        score.record(
            DistressChannel::ReflectiveCracking,
            damage_area(ratings, damage.reflective_cracking.as_deref(), length, width),
            weights.reflective_crack,
        );
        score.record(
            DistressChannel::PotholeArea,
            pothole_area(ratings, damage.pothole_area.as_deref(), length, width),
            weights.pothole,
        );
        score.record(
            DistressChannel::Rutting,
            damage_area(ratings, damage.rutting.as_deref(), length, width),
            weights.rutting,
        );
        score.record(
            DistressChannel::EdgeDamageLeft,
            edge_damage_area(ratings, damage.edge_damage_left.as_deref(), length),
            weights.edge_damage,
        );
        score.record(
            DistressChannel::EdgeDamageRight,
            edge_damage_area(ratings, damage.edge_damage_right.as_deref(), length),
            weights.edge_damage,
        );

        score
    }
}
