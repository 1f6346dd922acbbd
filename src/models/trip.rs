use crate::constants::CURRENCY_SYMBOL;
use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountCategory {
    #[default]
    None,
    Student,
    Senior,
    Pwd,
}

impl DiscountCategory {
    pub fn is_active(&self) -> bool {
        *self != DiscountCategory::None
    }
}

impl fmt::Display for DiscountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountCategory::None => write!(f, "none"),
            DiscountCategory::Student => write!(f, "student"),
            DiscountCategory::Senior => write!(f, "senior"),
            DiscountCategory::Pwd => write!(f, "pwd"),
        }
    }
}

impl FromStr for DiscountCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "regular" | "" => Ok(DiscountCategory::None),
            "student" => Ok(DiscountCategory::Student),
            "senior" | "senior_citizen" => Ok(DiscountCategory::Senior),
            "pwd" => Ok(DiscountCategory::Pwd),
            _ => Err(format!("Invalid discount category: '{}'", s)),
        }
    }
}

/// Format a peso amount with the currency marker, e.g. `₱44.80`.
pub fn format_fare(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}

/// One leg of a path returned by the directions provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathLeg {
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
    pub distance_km: f64,
    /// Dense trace of the road geometry, used only for corridor proximity
    #[serde(default)]
    pub sample_points: Vec<GeoPoint>,
    #[serde(default)]
    pub summary_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePath {
    pub legs: Vec<PathLeg>,
}

impl CandidatePath {
    pub fn single_leg(leg: PathLeg) -> Self {
        CandidatePath { legs: vec![leg] }
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        self.legs.first().map(|leg| leg.start_location)
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        self.legs.last().map(|leg| leg.end_location)
    }

    pub fn distance_km(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_km).sum()
    }

    /// Every point that can place the path on a corridor: leg endpoints and samples,
    /// in travel order.
    pub fn trace(&self) -> impl Iterator<Item = &GeoPoint> {
        self.legs.iter().flat_map(|leg| {
            std::iter::once(&leg.start_location)
                .chain(leg.sample_points.iter())
                .chain(std::iter::once(&leg.end_location))
        })
    }

    pub fn summary_label(&self) -> String {
        self.legs
            .iter()
            .map(|leg| leg.summary_label.trim())
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.legs.is_empty() {
            return Err("Candidate path has no legs".to_string());
        }

        for (i, leg) in self.legs.iter().enumerate() {
            if !leg.distance_km.is_finite() || leg.distance_km < 0.0 {
                return Err(format!(
                    "Leg {} has invalid distance: {}",
                    i, leg.distance_km
                ));
            }
            leg.start_location
                .validate()
                .map_err(|e| format!("Leg {} start: {}", i, e))?;
            leg.end_location
                .validate()
                .map_err(|e| format!("Leg {} end: {}", i, e))?;
            if let Some(bad) = leg.sample_points.iter().find(|p| p.validate().is_err()) {
                return Err(format!(
                    "Leg {} has an invalid sample point ({}, {})",
                    i, bad.lat, bad.lng
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegMode {
    Tricycle,
    Jeepney,
    Walk,
}

impl fmt::Display for LegMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegMode::Tricycle => write!(f, "tricycle"),
            LegMode::Jeepney => write!(f, "jeepney"),
            LegMode::Walk => write!(f, "walk"),
        }
    }
}

/// How a leg's base fare was resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FareSource {
    JeepneyTier { tier_distance_km: f64 },
    JeepneyMinimum,
    FixedRoute { toda: String, destination: String },
    SpecialTrip,
    Walk,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripLeg {
    pub mode: LegMode,
    pub description: String,
    pub from_name: String,
    pub to_name: String,
    pub distance_km: f64,
    pub fare_base: f64,
    pub fare_final: f64,
    pub fare_source: FareSource,
    pub discount_applied: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanClassification {
    OutOfServiceArea,
    TricycleOnly,
    JeepneyCombined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub classification: PlanClassification,
    pub legs: Vec<TripLeg>,
    /// Absent when the trip is outside the service area
    pub total_base_fare: Option<f64>,
    pub total_final_fare: Option<f64>,
    pub distance_km: f64,
    pub uses_corridor: bool,
    pub discount_applied: bool,
    #[serde(default)]
    pub summary_label: String,
}

impl TripPlan {
    pub fn out_of_service_area(distance_km: f64, summary_label: String) -> Self {
        TripPlan {
            classification: PlanClassification::OutOfServiceArea,
            legs: Vec::new(),
            total_base_fare: None,
            total_final_fare: None,
            distance_km,
            uses_corridor: false,
            discount_applied: false,
            summary_label,
        }
    }

    pub fn is_out_of_service_area(&self) -> bool {
        self.classification == PlanClassification::OutOfServiceArea
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    #[serde(default)]
    pub discount: DiscountCategory,
}

impl PlanTripRequest {
    pub fn validate(&self) -> Result<(), String> {
        self.origin
            .validate()
            .map_err(|e| format!("origin: {}", e))?;
        self.destination
            .validate()
            .map_err(|e| format!("destination: {}", e))?;
        Ok(())
    }
}

/// A candidate as received: the decoded path, or why it could not be read.
pub type ParsedCandidate = Result<CandidatePath, String>;

#[derive(Debug, Deserialize)]
pub struct ComposeTripRequest {
    /// Decoded one by one so a malformed candidate is dropped on its own
    pub candidates: Vec<serde_json::Value>,
    #[serde(default)]
    pub discount: DiscountCategory,
}

impl ComposeTripRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.candidates.is_empty() {
            return Err("candidates must not be empty".to_string());
        }
        Ok(())
    }

    pub fn into_candidates(self) -> Vec<ParsedCandidate> {
        self.candidates
            .into_iter()
            .map(|value| {
                serde_json::from_value(value).map_err(|e| format!("Unreadable candidate: {}", e))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSelection {
    /// Input index of the shortest plan
    pub most_efficient: usize,
    /// Input index of the cheapest in-area plan
    pub cheapest: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Position of the candidate in the provider's response
    pub index: usize,
    pub plan: TripPlan,
    /// Structured leg-by-leg description, always present
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlanResponse {
    pub routes: Vec<PlannedRoute>,
    pub selection: RouteSelection,
    /// Input indices of candidates dropped as malformed
    pub dropped_candidates: Vec<usize>,
}
