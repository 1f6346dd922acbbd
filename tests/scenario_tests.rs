use sakay::config::FareConfig;
use sakay::models::geo::round_centavos;
use sakay::models::{
    DiscountCategory, FareSource, InfrastructurePoint, LegMode, PlanClassification,
};
use sakay::services::fare_engine::{geo_index, FareEngine, TripComposer};
use sakay::AppError;

mod common;
use common::*;

fn composer() -> TripComposer {
    TripComposer::new(FareConfig::default())
}

#[test]
fn test_long_trip_is_out_of_service_area() {
    let snapshot = municipality_snapshot();
    let path = straight_path(p(13.9000, 121.6500), p(14.1200, 121.6500), 25.0);

    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::None)
        .unwrap();

    assert_eq!(plan.classification, PlanClassification::OutOfServiceArea);
    assert!(plan.legs.is_empty());
    assert_eq!(plan.total_base_fare, None);
    assert_eq!(plan.total_final_fare, None);
}

#[test]
fn test_off_corridor_trip_is_single_special_trip() {
    let snapshot = municipality_snapshot();
    // Runs along the tricycle road, which never counts as a jeepney corridor
    let path = straight_path(p(13.9000, 121.6500), p(13.9270, 121.6500), 3.0);

    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::None)
        .unwrap();

    assert_eq!(plan.classification, PlanClassification::TricycleOnly);
    assert!(!plan.uses_corridor);
    assert_eq!(plan.legs.len(), 1);
    assert_eq!(plan.legs[0].mode, LegMode::Tricycle);
    assert_eq!(plan.legs[0].fare_source, FareSource::SpecialTrip);
    assert_eq!(plan.legs[0].fare_final, 56.0);
    assert_eq!(plan.total_final_fare, Some(56.0));
    assert!(!plan.discount_applied);
}

#[test]
fn test_student_discount_on_special_trip() {
    let snapshot = municipality_snapshot();
    let path = straight_path(p(13.9000, 121.6500), p(13.9270, 121.6500), 3.0);

    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::Student)
        .unwrap();

    assert_eq!(plan.total_base_fare, Some(56.0));
    assert_eq!(plan.total_final_fare, Some(44.8));
    assert!(plan.discount_applied);
    assert!(plan.legs[0].description.contains("₱44.80 discounted from ₱56.00"));
}

#[test]
fn test_fixed_toda_fare_from_terminal() {
    let snapshot = municipality_snapshot();
    // ~150 m from the terminal, destination ~300 m from the market row
    let path = straight_path(p(13.9310, 121.6310), p(13.9520, 121.6320), 2.4);

    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::None)
        .unwrap();

    assert_eq!(plan.classification, PlanClassification::TricycleOnly);
    assert_eq!(plan.legs.len(), 1);
    assert_eq!(plan.legs[0].fare_final, 25.0);
    assert_eq!(plan.legs[0].to_name, "Public Market");
    assert_eq!(
        plan.legs[0].fare_source,
        FareSource::FixedRoute {
            toda: "PB-GVMPTODA".to_string(),
            destination: "Public Market".to_string(),
        }
    );
}

#[test]
fn test_on_corridor_trip_is_single_jeepney_leg() {
    let snapshot = municipality_snapshot();
    let path = straight_path(p(13.9100, HIGHWAY_LNG), p(13.9487, HIGHWAY_LNG), 4.3);

    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::None)
        .unwrap();

    assert_eq!(plan.classification, PlanClassification::JeepneyCombined);
    assert!(plan.uses_corridor);
    assert_eq!(plan.legs.len(), 1);
    assert_eq!(plan.legs[0].mode, LegMode::Jeepney);
    assert_eq!(plan.legs[0].fare_final, 15.0);
    assert_eq!(
        plan.legs[0].fare_source,
        FareSource::JeepneyTier {
            tier_distance_km: 5.0
        }
    );
}

#[test]
fn test_corridor_trip_with_pickup_and_walk() {
    let snapshot = municipality_snapshot();
    let path = path_with_samples(
        p(13.9100, 121.6200),
        p(13.9420, 121.6040),
        5.2,
        vec![
            p(13.9100, 121.6100),
            p(13.9120, HIGHWAY_LNG),
            p(13.9300, HIGHWAY_LNG),
            p(13.9398, HIGHWAY_LNG),
            p(13.9405, 121.6035),
        ],
    );

    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::Student)
        .unwrap();

    assert_eq!(plan.classification, PlanClassification::JeepneyCombined);
    let modes: Vec<LegMode> = plan.legs.iter().map(|leg| leg.mode).collect();
    assert_eq!(modes, vec![LegMode::Tricycle, LegMode::Jeepney, LegMode::Walk]);

    let pickup = &plan.legs[0];
    assert_eq!(pickup.to_name, "Bayan Junction");
    assert_eq!(pickup.fare_source, FareSource::SpecialTrip);

    let jeepney = &plan.legs[1];
    assert_eq!(jeepney.from_name, "Bayan Junction");
    assert_eq!(jeepney.to_name, "Diversion Crossing");
    assert_eq!(jeepney.fare_base, 16.75);
    assert_eq!(jeepney.fare_final, 13.4);

    let walk = &plan.legs[2];
    assert_eq!(walk.fare_final, 0.0);
    assert!(!walk.discount_applied);
    assert!(walk.distance_km < 0.5);

    let leg_sum: f64 = plan.legs.iter().map(|leg| leg.fare_final).sum();
    assert_eq!(plan.total_final_fare, Some(round_centavos(leg_sum)));
}

#[test]
fn test_corridor_trip_with_far_dropoff_rides_tricycle() {
    let snapshot = municipality_snapshot();
    let path = path_with_samples(
        p(13.9100, 121.6200),
        p(13.9650, 121.6400),
        9.8,
        vec![p(13.9120, HIGHWAY_LNG), p(13.9400, HIGHWAY_LNG)],
    );

    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::None)
        .unwrap();

    let modes: Vec<LegMode> = plan.legs.iter().map(|leg| leg.mode).collect();
    assert_eq!(
        modes,
        vec![LegMode::Tricycle, LegMode::Jeepney, LegMode::Tricycle]
    );
    assert_eq!(plan.legs[2].from_name, "Diversion Crossing");
    assert!(plan.legs[2].distance_km > 0.5);
    assert_eq!(plan.legs[2].fare_source, FareSource::SpecialTrip);
}

#[test]
fn test_discount_is_exactly_twenty_percent() {
    let snapshot = municipality_snapshot();
    for step in 1..=40 {
        let distance = step as f64 * 0.45;
        let path = straight_path(p(13.9000, 121.6500), p(13.9270, 121.6500), distance);

        for category in [
            DiscountCategory::Student,
            DiscountCategory::Senior,
            DiscountCategory::Pwd,
        ] {
            let plan = composer().compose(&path, &snapshot, category).unwrap();
            for leg in &plan.legs {
                assert_eq!(leg.fare_final, round_centavos(leg.fare_base * 0.80));
            }
        }

        let plan = composer()
            .compose(&path, &snapshot, DiscountCategory::None)
            .unwrap();
        for leg in &plan.legs {
            assert_eq!(leg.fare_final, leg.fare_base);
        }
    }
}

#[test]
fn test_jeepney_fare_monotonic_along_corridor() {
    let snapshot = municipality_snapshot();
    let mut previous = 0.0;
    for step in 0..=38 {
        let distance = 0.5 + step as f64 * 0.5;
        let path = straight_path(p(13.9100, HIGHWAY_LNG), p(13.9487, HIGHWAY_LNG), distance);
        let plan = composer()
            .compose(&path, &snapshot, DiscountCategory::None)
            .unwrap();
        let fare = plan.total_final_fare.unwrap();
        assert!(fare >= previous, "fare dropped at {distance}km");
        previous = fare;
    }
}

#[test]
fn test_nearest_is_deterministic() {
    // Two transfer points at the same spot: the first one listed always wins
    let spot = p(13.9200, 121.6100);
    let points = vec![
        InfrastructurePoint::transfer_point("a", "North Waiting Shed", spot),
        InfrastructurePoint::transfer_point("b", "South Waiting Shed", spot),
    ];

    let query = p(13.9210, 121.6110);
    for _ in 0..10 {
        let (nearest, _) = geo_index::nearest(&query, &points).unwrap();
        assert_eq!(nearest.id, "a");
    }
}

#[test]
fn test_feeder_legs_measure_to_boarding_and_alighting_points() {
    let snapshot = municipality_snapshot();
    let bayan_junction = p(13.9100, 121.6005);
    let diversion_crossing = p(13.9400, 121.6010);

    let origin = p(13.9100, 121.6200);
    let destination = p(13.9420, 121.6040);
    let path = path_with_samples(
        origin,
        destination,
        5.2,
        vec![
            p(13.9100, 121.6100),
            p(13.9120, HIGHWAY_LNG),
            p(13.9300, HIGHWAY_LNG),
            p(13.9398, HIGHWAY_LNG),
            p(13.9405, 121.6035),
        ],
    );
    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::None)
        .unwrap();

    let pickup = &plan.legs[0];
    assert_eq!(pickup.mode, LegMode::Tricycle);
    assert!((pickup.distance_km - origin.distance_to(&bayan_junction)).abs() < 1e-9);
    let walk = &plan.legs[2];
    assert_eq!(walk.mode, LegMode::Walk);
    assert!((walk.distance_km - diversion_crossing.distance_to(&destination)).abs() < 1e-9);

    let far_destination = p(13.9650, 121.6400);
    let path = path_with_samples(
        origin,
        far_destination,
        9.8,
        vec![p(13.9120, HIGHWAY_LNG), p(13.9400, HIGHWAY_LNG)],
    );
    let plan = composer()
        .compose(&path, &snapshot, DiscountCategory::None)
        .unwrap();

    let dropoff = &plan.legs[2];
    assert_eq!(dropoff.mode, LegMode::Tricycle);
    let expected = diversion_crossing.distance_to(&far_destination);
    assert!((dropoff.distance_km - expected).abs() < 1e-9);
    assert!((plan.legs[0].distance_km - origin.distance_to(&bayan_junction)).abs() < 1e-9);
}

#[test]
fn test_empty_snapshot_still_prices_trips() {
    let engine = FareEngine::new(FareConfig::default());
    let paths = vec![
        straight_path(p(13.9100, HIGHWAY_LNG), p(13.9487, HIGHWAY_LNG), 4.3),
        straight_path(p(13.9000, 121.6500), p(13.9270, 121.6500), 3.0),
    ];

    let batch = engine
        .plan_batch(&paths, &Default::default(), DiscountCategory::None)
        .unwrap();

    // Without corridors every path is tricycle-only
    for (_, plan) in &batch.plans {
        assert_eq!(plan.classification, PlanClassification::TricycleOnly);
    }
    assert_eq!(batch.selection.cheapest, 1);
}

#[test]
fn test_batch_selection_over_municipality() {
    let engine = FareEngine::new(FareConfig::default());
    let snapshot = municipality_snapshot();
    let paths = vec![
        // Longest, out of area
        straight_path(p(13.9000, 121.6500), p(14.1200, 121.6500), 25.0),
        // Shortest but priced as a special trip (56.00)
        straight_path(p(13.9000, 121.6500), p(13.9270, 121.6500), 3.0),
        // Longer but on the corridor (15.00)
        straight_path(p(13.9100, HIGHWAY_LNG), p(13.9487, HIGHWAY_LNG), 4.3),
    ];

    let batch = engine
        .plan_batch(&paths, &snapshot, DiscountCategory::None)
        .unwrap();

    assert_eq!(batch.plans.len(), 3);
    assert_eq!(batch.selection.most_efficient, 1);
    assert_eq!(batch.selection.cheapest, 2);
}

#[test]
fn test_batch_of_only_invalid_paths_fails() {
    let engine = FareEngine::new(FareConfig::default());
    let mut broken = straight_path(p(13.9000, 121.6500), p(13.9270, 121.6500), 3.0);
    broken.legs.clear();

    let result = engine.plan_batch(
        &[broken],
        &municipality_snapshot(),
        DiscountCategory::None,
    );
    assert!(matches!(result, Err(AppError::NoRouteComputed(_))));
}
