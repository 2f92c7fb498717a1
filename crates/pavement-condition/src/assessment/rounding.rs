/// Rounds to two decimals, half away from zero, nudged by machine epsilon so values
/// such as `1.005` land on `1.01` instead of drifting down through binary representation.
pub fn round2(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Difference below which a rounded distribution is considered to already sum to 100.
pub(crate) const RECONCILE_TOLERANCE: f64 = 0.001;

/// Forces independently rounded percentages to sum to exactly 100 by moving the whole
/// remainder onto the largest entry. Ties go to the earliest entry in `values`.
pub(crate) fn reconcile_to_hundred(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    let difference = 100.0 - total;
    if difference.abs() <= RECONCILE_TOLERANCE {
        return;
    }

    let mut largest: Option<usize> = None;
    for (index, value) in values.iter().enumerate() {
        match largest {
            Some(current) if *value <= values[current] => {}
            _ => largest = Some(index),
        }
    }

    if let Some(index) = largest {
        values[index] = round2(values[index] + difference);
    }
}
