use super::weights::CONCRETE_WEIGHTS;
use super::{DistressChannel, DistressScore, ScoringStrategy, SectionContext};
use crate::assessment::distress::damage_area;
use crate::assessment::domain::ConcreteDamage;
use crate::assessment::rating::RatingLookup;

pub struct ConcreteStrategy;

impl ScoringStrategy for ConcreteStrategy {
    type Damage = ConcreteDamage;

    fn score(
        &self,
        damage: &ConcreteDamage,
        section: &SectionContext,
        ratings: &dyn RatingLookup,
    ) -> DistressScore {
        let (length, width) = (section.length_m, section.width_m);
        let weights = CONCRETE_WEIGHTS;
        let mut score = DistressScore::default();

        score.record(
            DistressChannel::Cracking,
            damage_area(ratings, damage.cracking.as_deref(), length, width),
            weights.cracking,
        );
        score.record(
            DistressChannel::Spalling,
            damage_area(ratings, damage.spalling.as_deref(), length, width),
            weights.spalling,
        );
        score.record(
            DistressChannel::StructuralCracking,
            damage_area(ratings, damage.structural_cracking.as_deref(), length, width),
            weights.structural_cracking,
        );
        score.record(
            DistressChannel::Faulting,
            damage_area(ratings, damage.faulting.as_deref(), length, width),
            weights.faulting,
        );
        score.record(
            DistressChannel::Pumping,
            yes_no_count(damage.pumping.as_deref()),
            weights.pumping,
        );
        score.record(
            DistressChannel::CornerBreak,
            yes_no_count(damage.corner_break.as_deref()),
            weights.corner_break,
        );

        score
    }
}

fn yes_no_count(answer: Option<&str>) -> f64 {
    match answer {
        Some(value) if value.trim().eq_ignore_ascii_case("yes") => 1.0,
        _ => 0.0,
    }
}
