use super::geo_index;
use crate::config::FareConfig;
use crate::constants::*;
use crate::models::geo::round_centavos;
use crate::models::{FareSource, FareTierTable, GeoPoint, InfrastructureSnapshot};

/// A resolved base fare and where it came from. Discounts are applied later.
#[derive(Debug, Clone, PartialEq)]
pub struct FareResolution {
    pub base_fare: f64,
    pub source: FareSource,
}

/// Resolves base fares for jeepney and tricycle legs.
#[derive(Debug, Clone)]
pub struct FareTariffResolver {
    at_terminal_threshold_deg: f64,
    same_zone_threshold_deg: f64,
}

impl FareTariffResolver {
    pub fn new(config: &FareConfig) -> Self {
        Self {
            at_terminal_threshold_deg: config.at_terminal_threshold_deg,
            same_zone_threshold_deg: config.same_zone_threshold_deg,
        }
    }

    /// Tier lookup on the distance rounded up to the next whole kilometer.
    /// Falls back to `max(12, km * 2)` when no tier qualifies.
    pub fn jeepney_fare(&self, distance_km: f64, tiers: &FareTierTable) -> FareResolution {
        let rounded_km = distance_km.max(0.0).ceil();

        match tiers.tier_for(rounded_km) {
            Some(tier) => FareResolution {
                base_fare: round_centavos(tier.regular_fare),
                source: FareSource::JeepneyTier {
                    tier_distance_km: tier.distance_km,
                },
            },
            None => {
                tracing::debug!(
                    rounded_km,
                    "No jeepney fare tier for {}km, using minimum fare formula",
                    rounded_km
                );
                FareResolution {
                    base_fare: round_centavos(
                        JEEPNEY_MINIMUM_FARE.max(rounded_km * JEEPNEY_FALLBACK_PER_KM),
                    ),
                    source: FareSource::JeepneyMinimum,
                }
            }
        }
    }

    /// Special-trip formula: flat boarding fare for the first kilometer plus a
    /// per-kilometer increment after it.
    pub fn special_trip_fare(distance_km: f64) -> f64 {
        let extra_km = (distance_km - SPECIAL_TRIP_BASE_KM).max(0.0);
        round_centavos(SPECIAL_TRIP_BASE_FARE + extra_km * SPECIAL_TRIP_PER_KM)
    }

    /// Tricycle fare: a fixed TODA route when the origin is at a terminal and the
    /// destination is in the zone of one of its fixed fares, else the special-trip formula.
    pub fn tricycle_fare(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        distance_km: f64,
        snapshot: &InfrastructureSnapshot,
    ) -> FareResolution {
        if let Some(resolution) = self.fixed_route_fare(origin, destination, snapshot) {
            return resolution;
        }

        FareResolution {
            base_fare: Self::special_trip_fare(distance_km),
            source: FareSource::SpecialTrip,
        }
    }

    fn fixed_route_fare(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        snapshot: &InfrastructureSnapshot,
    ) -> Option<FareResolution> {
        let terminal = geo_index::nearest_within(
            origin,
            snapshot.terminals(),
            self.at_terminal_threshold_deg,
        )?;
        let association = terminal.association_name.as_deref()?;

        let Some(fixed) = geo_index::nearest_within(
            destination,
            snapshot.fixed_fares_for(association),
            self.same_zone_threshold_deg,
        ) else {
            tracing::debug!(
                terminal = %terminal.name,
                "Origin is at {} ({}) but no fixed destination is in the same zone",
                terminal.name,
                association
            );
            return None;
        };

        tracing::debug!(
            "Fixed route fare {} -> {}: {:.2}",
            association,
            fixed.destination_name,
            fixed.fare
        );

        Some(FareResolution {
            base_fare: round_centavos(fixed.fare),
            source: FareSource::FixedRoute {
                toda: association.to_string(),
                destination: fixed.destination_name.clone(),
            },
        })
    }
}
