pub mod coordinates;
pub mod geo;
pub mod infrastructure;
pub mod records;
pub mod trip;

pub use coordinates::GeoPoint;
pub use infrastructure::{
    CorridorPath, FareTier, FareTierTable, FixedDestinationFare, InfrastructurePoint,
    InfrastructureSnapshot, Located, PointKind, SnapshotSummary, TransportType,
};
pub use records::InfrastructureRecords;
pub use trip::{
    CandidatePath, DiscountCategory, FareSource, LegMode, ParsedCandidate, PathLeg,
    PlanClassification, TripLeg, TripPlan,
};
