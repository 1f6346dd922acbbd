use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Terminal,
    TransferPoint,
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointKind::Terminal => write!(f, "terminal"),
            PointKind::TransferPoint => write!(f, "transfer_point"),
        }
    }
}

impl FromStr for PointKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(PointKind::Terminal),
            "transfer_point" | "point" => Ok(PointKind::TransferPoint),
            _ => Err(format!("Invalid point kind: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Jeepney,
    Tricycle,
}

impl TransportType {
    /// Map the numeric id used by the infrastructure store
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(TransportType::Jeepney),
            2 => Some(TransportType::Tricycle),
            _ => None,
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportType::Jeepney => write!(f, "jeepney"),
            TransportType::Tricycle => write!(f, "tricycle"),
        }
    }
}

/// Anything with a position that the nearest-neighbor search can rank.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructurePoint {
    pub id: String,
    pub name: String,
    pub kind: PointKind,
    pub location: GeoPoint,
    /// TODA the terminal belongs to; ignored for transfer points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_name: Option<String>,
}

impl InfrastructurePoint {
    pub fn terminal(id: &str, name: &str, association_name: &str, location: GeoPoint) -> Self {
        InfrastructurePoint {
            id: id.to_string(),
            name: name.to_string(),
            kind: PointKind::Terminal,
            location,
            association_name: Some(association_name.to_string()),
        }
    }

    pub fn transfer_point(id: &str, name: &str, location: GeoPoint) -> Self {
        InfrastructurePoint {
            id: id.to_string(),
            name: name.to_string(),
            kind: PointKind::TransferPoint,
            location,
            association_name: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == PointKind::Terminal
    }
}

impl Located for InfrastructurePoint {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorPath {
    pub transport_type: TransportType,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FareTier {
    pub distance_km: f64,
    pub regular_fare: f64,
    pub discounted_fare: f64,
}

/// Jeepney fare brackets, kept sorted by `distance_km`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FareTierTable {
    tiers: Vec<FareTier>,
}

impl FareTierTable {
    /// Build a table from tiers in any order. Sorting is stable, so duplicate
    /// thresholds keep their input order.
    pub fn new(mut tiers: Vec<FareTier>) -> Self {
        tiers.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        FareTierTable { tiers }
    }

    pub fn tiers(&self) -> &[FareTier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Greatest tier whose threshold does not exceed `rounded_km`.
    pub fn tier_for(&self, rounded_km: f64) -> Option<&FareTier> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.distance_km <= rounded_km)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDestinationFare {
    pub toda_association_name: String,
    pub destination_name: String,
    pub location: GeoPoint,
    pub fare: f64,
}

impl Located for FixedDestinationFare {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Read-only view of the known infrastructure for one or more trip computations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfrastructureSnapshot {
    pub points: Vec<InfrastructurePoint>,
    pub corridors: Vec<CorridorPath>,
    pub fare_tiers: FareTierTable,
    pub fixed_fares: Vec<FixedDestinationFare>,
}

impl InfrastructureSnapshot {
    pub fn terminals(&self) -> impl Iterator<Item = &InfrastructurePoint> {
        self.points.iter().filter(|p| p.is_terminal())
    }

    pub fn fixed_fares_for<'a>(
        &'a self,
        association_name: &'a str,
    ) -> impl Iterator<Item = &'a FixedDestinationFare> + 'a {
        self.fixed_fares
            .iter()
            .filter(move |f| f.toda_association_name == association_name)
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            terminals: self.terminals().count(),
            transfer_points: self.points.iter().filter(|p| !p.is_terminal()).count(),
            corridors: self.corridors.len(),
            fare_tiers: self.fare_tiers.len(),
            fixed_fares: self.fixed_fares.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub terminals: usize,
    pub transfer_points: usize,
    pub corridors: usize,
    pub fare_tiers: usize,
    pub fixed_fares: usize,
}
