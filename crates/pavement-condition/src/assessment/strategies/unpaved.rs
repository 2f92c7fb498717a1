use super::weights::UNPAVED_WEIGHTS;
use super::{DistressChannel, DistressScore, ScoringStrategy, SectionContext};
use crate::assessment::distress::{crossfall_percent_from_condition, damage_area, pothole_area};
use crate::assessment::domain::UnpavedDamage;
use crate::assessment::rating::RatingLookup;

/// Formula shared by unpaved and gravel segments.
pub struct UnpavedStrategy;

impl ScoringStrategy for UnpavedStrategy {
    type Damage = UnpavedDamage;

    fn score(
        &self,
        damage: &UnpavedDamage,
        section: &SectionContext,
        ratings: &dyn RatingLookup,
    ) -> DistressScore {
        let (length, width) = (section.length_m, section.width_m);
        let weights = UNPAVED_WEIGHTS;
        let mut score = DistressScore::default();

        // Worse of the condition-derived estimate and the directly rated area.
        let from_condition = damage
            .crossfall_condition
            .as_deref()
            .map(crossfall_percent_from_condition)
            .unwrap_or(0.0)
            / 100.0
            * section.area_m2;
        let rated = damage_area(ratings, damage.crossfall_area.as_deref(), length, width);

        score.record(
            DistressChannel::Crossfall,
            from_condition.max(rated),
            weights.crossfall,
        );
        score.record(
            DistressChannel::Depressions,
            damage_area(ratings, damage.settlement.as_deref(), length, width),
            weights.depressions,
        );
        score.record(
            DistressChannel::Erosion,
            damage_area(ratings, damage.erosion.as_deref(), length, width),
            weights.erosion,
        );
        score.record(
            DistressChannel::Potholes,
            pothole_area(ratings, damage.potholes.as_deref(), length, width),
            weights.potholes,
        );
        score.record(
            DistressChannel::Rutting,
            damage_area(ratings, damage.rutting.as_deref(), length, width),
            weights.rutting,
        );

        score
    }
}
