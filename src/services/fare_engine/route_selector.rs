use crate::models::trip::RouteSelection;
use crate::models::TripPlan;

/// Pick the default "most efficient" and "cheapest" routes.
///
/// `plans` pairs each plan with its original candidate index and must be in input
/// order; ties are broken by that order. Returns `None` for an empty list.
pub fn select(plans: &[(usize, TripPlan)]) -> Option<RouteSelection> {
    let mut most_efficient: Option<(usize, f64)> = None;
    let mut cheapest: Option<(usize, f64)> = None;

    for (index, plan) in plans {
        if most_efficient.map_or(true, |(_, best)| plan.distance_km < best) {
            most_efficient = Some((*index, plan.distance_km));
        }

        if plan.is_out_of_service_area() {
            continue;
        }
        if let Some(fare) = plan.total_final_fare {
            if cheapest.map_or(true, |(_, best)| fare < best) {
                cheapest = Some((*index, fare));
            }
        }
    }

    let (most_efficient, _) = most_efficient?;
    Some(RouteSelection {
        most_efficient,
        cheapest: cheapest.map_or(most_efficient, |(index, _)| index),
    })
}
