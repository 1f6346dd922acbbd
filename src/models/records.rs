use crate::constants::DISCOUNT_RATE;
use crate::models::geo::round_centavos;
use crate::models::{
    CorridorPath, FareTier, FareTierTable, FixedDestinationFare, GeoPoint, InfrastructurePoint,
    InfrastructureSnapshot, PointKind, TransportType,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw records as exported by the infrastructure store. They are validated and
// converted into an `InfrastructureSnapshot`; bad rows are skipped, never fatal.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalRecord {
    pub id: String,
    pub name: String,
    pub association_name: String,
    #[serde(default)]
    pub barangay: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub transport_type_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPointRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub barangay: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type", default)]
    pub point_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedFareRecord {
    /// TODA association name
    pub place: String,
    /// Destination name
    pub location: String,
    pub fare: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorRecord {
    pub transport_type_id: i64,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfrastructureRecords {
    #[serde(default)]
    pub terminals: Vec<TerminalRecord>,
    #[serde(default)]
    pub transfer_points: Vec<TransferPointRecord>,
    #[serde(default)]
    pub jeepney_fares: Vec<FareTier>,
    #[serde(default)]
    pub fixed_fares: Vec<FixedFareRecord>,
    #[serde(default)]
    pub corridors: Vec<CorridorRecord>,
}

impl InfrastructureRecords {
    pub fn into_snapshot(self) -> InfrastructureSnapshot {
        let mut points = Vec::with_capacity(self.terminals.len() + self.transfer_points.len());

        for record in self.terminals {
            match GeoPoint::new(record.latitude, record.longitude) {
                Ok(location) => points.push(InfrastructurePoint {
                    id: record.id,
                    name: record.name,
                    kind: PointKind::Terminal,
                    location,
                    association_name: Some(record.association_name),
                }),
                Err(e) => tracing::warn!(
                    "Skipping terminal '{}' (id: {}): {}",
                    record.name,
                    record.id,
                    e
                ),
            }
        }

        for record in self.transfer_points {
            match GeoPoint::new(record.latitude, record.longitude) {
                Ok(location) => points.push(InfrastructurePoint {
                    id: record.id,
                    name: record.name,
                    kind: PointKind::TransferPoint,
                    location,
                    association_name: None,
                }),
                Err(e) => tracing::warn!(
                    "Skipping transfer point '{}' (id: {}): {}",
                    record.name,
                    record.id,
                    e
                ),
            }
        }

        let corridors = self
            .corridors
            .into_iter()
            .filter_map(|record| {
                let Some(transport_type) = TransportType::from_id(record.transport_type_id) else {
                    tracing::warn!(
                        "Skipping corridor with unknown transport type id {}",
                        record.transport_type_id
                    );
                    return None;
                };
                let total = record.points.len();
                let points: Vec<GeoPoint> = record
                    .points
                    .into_iter()
                    .filter(|p| p.validate().is_ok())
                    .collect();
                if points.len() < total {
                    tracing::warn!(
                        "Dropped {} invalid vertices from {} corridor",
                        total - points.len(),
                        transport_type
                    );
                }
                Some(CorridorPath {
                    transport_type,
                    points,
                })
            })
            .collect();

        let tiers: Vec<FareTier> = self
            .jeepney_fares
            .into_iter()
            .filter(|tier| {
                let valid = tier.distance_km.is_finite()
                    && tier.distance_km >= 0.0
                    && tier.regular_fare.is_finite()
                    && tier.regular_fare >= 0.0;
                if !valid {
                    tracing::warn!("Skipping invalid fare tier: {:?}", tier);
                }
                valid
            })
            .inspect(|tier| {
                let expected = round_centavos(tier.regular_fare * (1.0 - DISCOUNT_RATE));
                if (tier.discounted_fare - expected).abs() > 0.01 {
                    tracing::warn!(
                        distance_km = tier.distance_km,
                        "Tier discounted fare {:.2} is not 80% of {:.2}; using the system rate",
                        tier.discounted_fare,
                        tier.regular_fare
                    );
                }
            })
            .collect();

        let fixed_fares = self
            .fixed_fares
            .into_iter()
            .filter_map(|record| {
                let location = match GeoPoint::new(record.latitude, record.longitude) {
                    Ok(location) => location,
                    Err(e) => {
                        tracing::warn!(
                            "Skipping fixed fare {} -> {}: {}",
                            record.place,
                            record.location,
                            e
                        );
                        return None;
                    }
                };
                if !record.fare.is_finite() || record.fare < 0.0 {
                    tracing::warn!(
                        "Skipping fixed fare {} -> {} with invalid amount {}",
                        record.place,
                        record.location,
                        record.fare
                    );
                    return None;
                }
                Some(FixedDestinationFare {
                    toda_association_name: record.place,
                    destination_name: record.location,
                    location,
                    fare: record.fare,
                })
            })
            .collect();

        InfrastructureSnapshot {
            points,
            corridors,
            fare_tiers: FareTierTable::new(tiers),
            fixed_fares,
        }
    }
}
