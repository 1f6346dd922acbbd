use crate::models::{CandidatePath, CorridorPath, GeoPoint, TransportType};

/// Tests points and paths against registered corridor polylines.
///
/// "Near" means within `threshold_deg` of a corridor vertex. This approximates
/// "on the same physical road"; it is not road snapping.
#[derive(Debug, Clone, Copy)]
pub struct CorridorClassifier {
    threshold_deg: f64,
}

impl CorridorClassifier {
    pub fn new(threshold_deg: f64) -> Self {
        Self { threshold_deg }
    }

    pub fn is_near_any_corridor(
        &self,
        point: &GeoPoint,
        corridors: &[CorridorPath],
        transport_type: TransportType,
    ) -> bool {
        corridors
            .iter()
            .filter(|corridor| corridor.transport_type == transport_type)
            .flat_map(|corridor| corridor.points.iter())
            .any(|vertex| point.degree_distance_to(vertex) <= self.threshold_deg)
    }

    pub fn is_near_jeepney_corridor(&self, point: &GeoPoint, corridors: &[CorridorPath]) -> bool {
        self.is_near_any_corridor(point, corridors, TransportType::Jeepney)
    }

    /// Whether any point of the path's trace lies on a jeepney corridor.
    /// With no corridors loaded this is always false, so callers fall back to
    /// tricycle-only pricing.
    pub fn path_uses_corridor(&self, path: &CandidatePath, corridors: &[CorridorPath]) -> bool {
        self.first_corridor_sample(path, corridors).is_some()
    }

    /// First point of the path's trace, in travel order, that touches a jeepney corridor.
    pub fn first_corridor_sample(
        &self,
        path: &CandidatePath,
        corridors: &[CorridorPath],
    ) -> Option<GeoPoint> {
        path.trace()
            .find(|point| self.is_near_jeepney_corridor(point, corridors))
            .copied()
    }

    /// Last point of the path's trace that touches a jeepney corridor.
    pub fn last_corridor_sample(
        &self,
        path: &CandidatePath,
        corridors: &[CorridorPath],
    ) -> Option<GeoPoint> {
        path.trace()
            .filter(|point| self.is_near_jeepney_corridor(point, corridors))
            .last()
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_CORRIDOR_THRESHOLD_DEG;
    use crate::models::PathLeg;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn jeepney_corridor() -> CorridorPath {
        CorridorPath {
            transport_type: TransportType::Jeepney,
            points: vec![p(13.900, 121.800), p(13.910, 121.800), p(13.920, 121.800)],
        }
    }

    fn path_through(samples: Vec<GeoPoint>) -> CandidatePath {
        CandidatePath::single_leg(PathLeg {
            start_location: p(13.900, 121.850),
            end_location: p(13.920, 121.850),
            distance_km: 3.0,
            sample_points: samples,
            summary_label: String::new(),
        })
    }

    fn classifier() -> CorridorClassifier {
        CorridorClassifier::new(DEFAULT_CORRIDOR_THRESHOLD_DEG)
    }

    #[test]
    fn point_near_vertex_is_on_corridor() {
        let corridors = vec![jeepney_corridor()];
        assert!(classifier().is_near_jeepney_corridor(&p(13.9101, 121.8015), &corridors));
        assert!(!classifier().is_near_jeepney_corridor(&p(13.9101, 121.8100), &corridors));
    }

    #[test]
    fn only_requested_transport_type_counts() {
        let tricycle = CorridorPath {
            transport_type: TransportType::Tricycle,
            ..jeepney_corridor()
        };
        let corridors = vec![tricycle];
        let point = p(13.910, 121.800);

        assert!(!classifier().is_near_jeepney_corridor(&point, &corridors));
        assert!(classifier().is_near_any_corridor(&point, &corridors, TransportType::Tricycle));
    }

    #[test]
    fn union_of_corridors_is_checked() {
        let second = CorridorPath {
            transport_type: TransportType::Jeepney,
            points: vec![p(14.000, 122.000)],
        };
        let corridors = vec![jeepney_corridor(), second];
        assert!(classifier().is_near_jeepney_corridor(&p(14.001, 122.001), &corridors));
    }

    #[test]
    fn empty_corridors_never_match() {
        let path = path_through(vec![p(13.910, 121.800)]);
        assert!(!classifier().path_uses_corridor(&path, &[]));
    }

    #[test]
    fn path_uses_corridor_when_any_sample_is_near() {
        let corridors = vec![jeepney_corridor()];
        let on = path_through(vec![p(13.905, 121.840), p(13.910, 121.801)]);
        let off = path_through(vec![p(13.905, 121.840), p(13.910, 121.830)]);

        assert!(classifier().path_uses_corridor(&on, &corridors));
        assert!(!classifier().path_uses_corridor(&off, &corridors));
    }

    #[test]
    fn first_and_last_corridor_samples_follow_travel_order() {
        let corridors = vec![jeepney_corridor()];
        let path = path_through(vec![
            p(13.901, 121.830),
            p(13.901, 121.801),
            p(13.910, 121.800),
            p(13.919, 121.801),
            p(13.919, 121.830),
        ]);

        assert_eq!(
            classifier().first_corridor_sample(&path, &corridors),
            Some(p(13.901, 121.801))
        );
        assert_eq!(
            classifier().last_corridor_sample(&path, &corridors),
            Some(p(13.919, 121.801))
        );
    }
}
