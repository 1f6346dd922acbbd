use super::corridor::CorridorClassifier;
use super::discount::DiscountPolicy;
use super::geo_index;
use super::tariff::{FareResolution, FareTariffResolver};
use crate::config::FareConfig;
use crate::error::{AppError, Result};
use crate::models::geo::round_centavos;
use crate::models::trip::format_fare;
use crate::models::{
    CandidatePath, DiscountCategory, FareSource, GeoPoint, InfrastructureSnapshot, LegMode,
    PlanClassification, TripLeg, TripPlan,
};

const ORIGIN_LABEL: &str = "your origin";
const DESTINATION_LABEL: &str = "your destination";
const CORRIDOR_LABEL: &str = "the jeepney route";

/// Where a rider gets on or off the jeepney.
struct Stop {
    location: GeoPoint,
    name: String,
}

/// Classifies a candidate path and composes its multi-leg trip plan.
#[derive(Debug, Clone)]
pub struct TripComposer {
    config: FareConfig,
    classifier: CorridorClassifier,
    resolver: FareTariffResolver,
}

impl TripComposer {
    pub fn new(config: FareConfig) -> Self {
        let classifier = CorridorClassifier::new(config.corridor_threshold_deg);
        let resolver = FareTariffResolver::new(&config);
        Self {
            config,
            classifier,
            resolver,
        }
    }

    /// Compose one plan. Only malformed input fails (`InvalidInput`); every other
    /// branch degrades to a documented fallback.
    pub fn compose(
        &self,
        path: &CandidatePath,
        snapshot: &InfrastructureSnapshot,
        discount: DiscountCategory,
    ) -> Result<TripPlan> {
        path.validate().map_err(AppError::InvalidInput)?;
        let (origin, destination) = match (path.origin(), path.destination()) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => {
                return Err(AppError::InvalidInput(
                    "Candidate path has no endpoints".to_string(),
                ))
            }
        };

        let distance_km = path.distance_km();
        let summary_label = path.summary_label();

        if distance_km > self.config.service_area_km {
            tracing::debug!(
                distance_km,
                "Path of {:.2}km exceeds the {:.0}km service area",
                distance_km,
                self.config.service_area_km
            );
            return Ok(TripPlan::out_of_service_area(distance_km, summary_label));
        }

        let legs = if self.classifier.path_uses_corridor(path, &snapshot.corridors) {
            self.jeepney_combined_legs(path, origin, destination, distance_km, snapshot, discount)
        } else {
            self.tricycle_only_legs(origin, destination, distance_km, snapshot, discount)
        };

        let classification = if legs.iter().any(|leg| leg.mode == LegMode::Jeepney) {
            PlanClassification::JeepneyCombined
        } else {
            PlanClassification::TricycleOnly
        };

        let total_base: f64 = legs.iter().map(|leg| leg.fare_base).sum();
        let total_final: f64 = legs.iter().map(|leg| leg.fare_final).sum();
        let discount_applied = legs.iter().any(|leg| leg.discount_applied);

        tracing::debug!(
            classification = ?classification,
            legs = legs.len(),
            "Composed {:?} plan: {:.2}km, {}",
            classification,
            distance_km,
            format_fare(total_final)
        );

        Ok(TripPlan {
            classification,
            legs,
            total_base_fare: Some(round_centavos(total_base)),
            total_final_fare: Some(round_centavos(total_final)),
            distance_km,
            uses_corridor: classification == PlanClassification::JeepneyCombined,
            discount_applied,
            summary_label,
        })
    }

    fn tricycle_only_legs(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        distance_km: f64,
        snapshot: &InfrastructureSnapshot,
        discount: DiscountCategory,
    ) -> Vec<TripLeg> {
        let resolution = self
            .resolver
            .tricycle_fare(&origin, &destination, distance_km, snapshot);

        let to_name = match &resolution.source {
            FareSource::FixedRoute { destination, .. } => destination.clone(),
            _ => DESTINATION_LABEL.to_string(),
        };

        vec![build_leg(
            LegMode::Tricycle,
            ORIGIN_LABEL.to_string(),
            to_name,
            distance_km,
            resolution,
            discount,
        )]
    }

    fn jeepney_combined_legs(
        &self,
        path: &CandidatePath,
        origin: GeoPoint,
        destination: GeoPoint,
        distance_km: f64,
        snapshot: &InfrastructureSnapshot,
        discount: DiscountCategory,
    ) -> Vec<TripLeg> {
        let corridors = &snapshot.corridors;
        let mut legs = Vec::with_capacity(3);

        let boarding = if self.classifier.is_near_jeepney_corridor(&origin, corridors) {
            Stop {
                location: origin,
                name: ORIGIN_LABEL.to_string(),
            }
        } else {
            let stop = self.boarding_stop(path, origin, snapshot);
            let pickup_km = origin.distance_to(&stop.location);
            legs.push(special_trip_leg(
                ORIGIN_LABEL.to_string(),
                stop.name.clone(),
                pickup_km,
                discount,
            ));
            stop
        };

        let alighting = if self.classifier.is_near_jeepney_corridor(&destination, corridors) {
            None
        } else {
            Some(self.alighting_stop(path, destination, snapshot))
        };

        let jeepney_to = alighting
            .as_ref()
            .map(|stop| stop.name.clone())
            .unwrap_or_else(|| DESTINATION_LABEL.to_string());
        legs.push(build_leg(
            LegMode::Jeepney,
            boarding.name,
            jeepney_to,
            distance_km,
            self.resolver.jeepney_fare(distance_km, &snapshot.fare_tiers),
            discount,
        ));

        if let Some(stop) = alighting {
            let dropoff_km = stop.location.distance_to(&destination);
            if dropoff_km <= self.config.walk_threshold_km {
                legs.push(build_leg(
                    LegMode::Walk,
                    stop.name,
                    DESTINATION_LABEL.to_string(),
                    dropoff_km,
                    FareResolution {
                        base_fare: 0.0,
                        source: FareSource::Walk,
                    },
                    discount,
                ));
            } else {
                legs.push(special_trip_leg(
                    stop.name,
                    DESTINATION_LABEL.to_string(),
                    dropoff_km,
                    discount,
                ));
            }
        }

        legs
    }

    /// Nearest known point to where the path first meets the corridor.
    fn boarding_stop(
        &self,
        path: &CandidatePath,
        origin: GeoPoint,
        snapshot: &InfrastructureSnapshot,
    ) -> Stop {
        let entry = self
            .classifier
            .first_corridor_sample(path, &snapshot.corridors)
            .unwrap_or(origin);

        match geo_index::nearest(&entry, &snapshot.points) {
            Ok((point, _)) => Stop {
                location: point.location,
                name: point.name.clone(),
            },
            Err(e) => {
                tracing::debug!("{}; boarding where the path meets the corridor", e);
                Stop {
                    location: entry,
                    name: CORRIDOR_LABEL.to_string(),
                }
            }
        }
    }

    /// Corridor-adjacent known point nearest to the destination.
    fn alighting_stop(
        &self,
        path: &CandidatePath,
        destination: GeoPoint,
        snapshot: &InfrastructureSnapshot,
    ) -> Stop {
        let corridors = &snapshot.corridors;
        let on_corridor = snapshot
            .points
            .iter()
            .filter(|point| self.classifier.is_near_jeepney_corridor(&point.location, corridors));

        match geo_index::nearest(&destination, on_corridor) {
            Ok((point, _)) => Stop {
                location: point.location,
                name: point.name.clone(),
            },
            Err(e) => {
                tracing::debug!("{}; alighting where the path leaves the corridor", e);
                Stop {
                    location: self
                        .classifier
                        .last_corridor_sample(path, corridors)
                        .unwrap_or(destination),
                    name: CORRIDOR_LABEL.to_string(),
                }
            }
        }
    }
}

fn special_trip_leg(
    from_name: String,
    to_name: String,
    distance_km: f64,
    discount: DiscountCategory,
) -> TripLeg {
    build_leg(
        LegMode::Tricycle,
        from_name,
        to_name,
        distance_km,
        FareResolution {
            base_fare: FareTariffResolver::special_trip_fare(distance_km),
            source: FareSource::SpecialTrip,
        },
        discount,
    )
}

fn build_leg(
    mode: LegMode,
    from_name: String,
    to_name: String,
    distance_km: f64,
    resolution: FareResolution,
    discount: DiscountCategory,
) -> TripLeg {
    let fare = DiscountPolicy::apply(resolution.base_fare, discount);
    let mut leg = TripLeg {
        mode,
        description: String::new(),
        from_name,
        to_name,
        distance_km,
        fare_base: fare.base,
        fare_final: fare.final_fare,
        fare_source: resolution.source,
        discount_applied: fare.applied,
    };
    leg.description = describe_leg(&leg);
    leg
}

fn describe_leg(leg: &TripLeg) -> String {
    let fare = if leg.discount_applied {
        format!(
            "{} discounted from {}",
            format_fare(leg.fare_final),
            format_fare(leg.fare_base)
        )
    } else {
        format_fare(leg.fare_final)
    };

    match (&leg.mode, &leg.fare_source) {
        (LegMode::Walk, _) => format!(
            "Walk from {} to {} (about {:.0} m)",
            leg.from_name,
            leg.to_name,
            leg.distance_km * 1000.0
        ),
        (LegMode::Tricycle, FareSource::FixedRoute { toda, .. }) => format!(
            "Ride a {} tricycle from {} to {} (fixed fare {})",
            toda, leg.from_name, leg.to_name, fare
        ),
        (LegMode::Tricycle, _) => format!(
            "Ride a tricycle from {} to {} ({:.2} km, special trip fare {})",
            leg.from_name, leg.to_name, leg.distance_km, fare
        ),
        (LegMode::Jeepney, _) => format!(
            "Ride a jeepney from {} to {} ({:.2} km, {})",
            leg.from_name, leg.to_name, leg.distance_km, fare
        ),
    }
}
