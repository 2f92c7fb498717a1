use super::weights::BLOCK_WEIGHTS;
use super::{DistressChannel, DistressScore, ScoringStrategy, SectionContext};
use crate::assessment::distress::{damage_area, edge_damage_area};
use crate::assessment::domain::BlockDamage;
use crate::assessment::rating::RatingLookup;

pub struct BlockStrategy;

impl ScoringStrategy for BlockStrategy {
    type Damage = BlockDamage;

    // Block pothole ratings are recorded on the generic damage-range scale.
    fn score(
        &self,
        damage: &BlockDamage,
        section: &SectionContext,
        ratings: &dyn RatingLookup,
    ) -> DistressScore {
        let (length, width) = (section.length_m, section.width_m);
        let weights = BLOCK_WEIGHTS;
        let mut score = DistressScore::default();

        score.record(
            DistressChannel::ReflectiveCracking,
            damage_area(ratings, damage.reflective_cracking.as_deref(), length, width),
            weights.reflective_cracking,
        );
        score.record(
            DistressChannel::Disintegration,
            damage_area(ratings, damage.disintegration.as_deref(), length, width),
            weights.disintegration,
        );
        score.record(
            DistressChannel::PotholeArea,
            damage_area(ratings, damage.pothole_area.as_deref(), length, width),
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
