use geo::{Distance, Haversine, Point};

pub const MILES_PER_KM: f64 = 0.621371;

/// Great-circle distance in kilometres using the mean Earth radius.
pub fn haversine_km(from: Point, to: Point) -> f64 {
    Haversine::distance(from, to) / 1000.0
}

pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

/// Distance from each point to the one after it. The last point gets 0, so
/// the result is always as long as `points`.
pub fn leg_distances(points: &[Point]) -> Vec<f64> {
    let mut legs: Vec<f64> = points
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .collect();
    if !points.is_empty() {
        legs.push(0.0);
    }
    legs
}
