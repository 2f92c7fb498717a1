//! Distress-area calculator: converts categorical survey ratings plus segment geometry
//! into absolute distress areas in square metres.

use super::rating::RatingLookup;
use tracing::debug;

/// Area affected by a generic percentage-range rating.
pub fn damage_area(
    ratings: &dyn RatingLookup,
    rating: Option<&str>,
    length_m: f64,
    width_m: f64,
) -> f64 {
    area_from_fraction(rating, length_m, width_m, "damage", |value| {
        ratings.damage_fraction(value)
    })
}

/// Area affected by potholes; pothole categories use their own bucket boundaries.
pub fn pothole_area(
    ratings: &dyn RatingLookup,
    rating: Option<&str>,
    length_m: f64,
    width_m: f64,
) -> f64 {
    area_from_fraction(rating, length_m, width_m, "pothole", |value| {
        ratings.pothole_fraction(value)
    })
}

/// Edge damage is scored along the running length, without a width term.
pub fn edge_damage_area(ratings: &dyn RatingLookup, rating: Option<&str>, length_m: f64) -> f64 {
    if length_m <= 0.0 {
        return 0.0;
    }

    match rating {
        Some(value) => match ratings.edge_damage_factor(value) {
            Some(factor) => factor * length_m,
            None => {
                debug!(rating = value, table = "edge", "unknown rating scored as zero");
                0.0
            }
        },
        None => 0.0,
    }
}

/// Fixed crossfall condition table; unknown conditions map to zero.
pub fn crossfall_percent_from_condition(condition: &str) -> f64 {
    match condition.trim() {
        ">5%" => 7.5,
        "3-5%" => 4.0,
        "flat" => 0.0,
        "concave" => 10.0,
        _ => 0.0,
    }
}

fn area_from_fraction<F>(
    rating: Option<&str>,
    length_m: f64,
    width_m: f64,
    table: &'static str,
    lookup: F,
) -> f64
where
    F: Fn(&str) -> Option<f64>,
{
    if length_m <= 0.0 || width_m <= 0.0 {
        return 0.0;
    }

    let Some(value) = rating else {
        return 0.0;
    };

    match lookup(value) {
        Some(fraction) => fraction.clamp(0.0, 1.0) * length_m * width_m,
        None => {
            debug!(rating = value, table, "unknown rating scored as zero");
            0.0
        }
    }
}
