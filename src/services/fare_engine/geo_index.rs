use crate::error::{AppError, Result};
use crate::models::{GeoPoint, Located};

/// Nearest candidate to `point` by degree-space distance.
///
/// Linear scan: the known infrastructure of one municipality is tens to a few
/// hundred points. Equidistant candidates resolve to the first one in input order.
/// An empty candidate set yields `NoInfrastructureNearby`, which callers treat as
/// "nothing known nearby" and degrade to formula pricing.
pub fn nearest<'a, T, I>(point: &GeoPoint, candidates: I) -> Result<(&'a T, f64)>
where
    T: Located + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut best: Option<(&'a T, f64)> = None;

    for candidate in candidates {
        let distance = point.degree_distance_to(&candidate.location());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.ok_or_else(|| {
        AppError::NoInfrastructureNearby(format!(
            "no candidates near ({:.5}, {:.5})",
            point.lat, point.lng
        ))
    })
}

/// Like [`nearest`], but only accepts a match within `threshold` degrees.
pub fn nearest_within<'a, T, I>(point: &GeoPoint, candidates: I, threshold: f64) -> Option<&'a T>
where
    T: Located + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match nearest(point, candidates) {
        Ok((candidate, distance)) if distance <= threshold => Some(candidate),
        _ => None,
    }
}
