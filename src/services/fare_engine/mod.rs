//! Route classification and fare composition.
//!
//! Everything in here is a pure function of its inputs: a candidate path from the
//! directions provider, a read-only [`InfrastructureSnapshot`], and the rider's
//! discount category. No I/O, no shared mutable state.

pub mod corridor;
pub mod discount;
pub mod geo_index;
pub mod route_selector;
pub mod tariff;
pub mod trip_composer;

use crate::config::FareConfig;
use crate::error::{AppError, Result};
use crate::models::trip::RouteSelection;
use crate::models::{
    CandidatePath, DiscountCategory, InfrastructureSnapshot, ParsedCandidate, TripPlan,
};
use rayon::prelude::*;

pub use corridor::CorridorClassifier;
pub use discount::{DiscountPolicy, DiscountedFare};
pub use tariff::{FareResolution, FareTariffResolver};
pub use trip_composer::TripComposer;

/// Plans composed for one batch of candidate paths.
#[derive(Debug, Clone)]
pub struct TripPlanBatch {
    /// Composed plans paired with their candidate index, in input order
    pub plans: Vec<(usize, TripPlan)>,
    /// Candidate indices dropped as malformed
    pub dropped: Vec<usize>,
    pub selection: RouteSelection,
}

pub struct FareEngine {
    composer: TripComposer,
}

impl FareEngine {
    pub fn new(config: FareConfig) -> Self {
        FareEngine {
            composer: TripComposer::new(config),
        }
    }

    /// Compose every candidate in parallel and select the default routes.
    ///
    /// Malformed candidates are dropped and logged. The batch fails only when no
    /// candidate produced an in-area plan.
    pub fn plan_batch(
        &self,
        candidates: &[CandidatePath],
        snapshot: &InfrastructureSnapshot,
        discount: DiscountCategory,
    ) -> Result<TripPlanBatch> {
        self.plan_indexed(candidates.iter().map(Ok).collect(), snapshot, discount)
    }

    /// Like [`plan_batch`](Self::plan_batch), for candidates decoded one by one.
    /// Undecodable entries keep their index and are reported as dropped.
    pub fn plan_parsed(
        &self,
        candidates: &[ParsedCandidate],
        snapshot: &InfrastructureSnapshot,
        discount: DiscountCategory,
    ) -> Result<TripPlanBatch> {
        let candidates = candidates
            .iter()
            .map(|candidate| candidate.as_ref().map_err(String::as_str))
            .collect();
        self.plan_indexed(candidates, snapshot, discount)
    }

    fn plan_indexed(
        &self,
        candidates: Vec<std::result::Result<&CandidatePath, &str>>,
        snapshot: &InfrastructureSnapshot,
        discount: DiscountCategory,
    ) -> Result<TripPlanBatch> {
        let outcomes: Vec<(usize, Result<TripPlan>)> = candidates
            .par_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let outcome = match candidate {
                    Ok(path) => self.composer.compose(path, snapshot, discount),
                    Err(reason) => Err(AppError::InvalidInput(reason.to_string())),
                };
                (index, outcome)
            })
            .collect();

        let mut plans = Vec::with_capacity(outcomes.len());
        let mut dropped = Vec::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(plan) => plans.push((index, plan)),
                Err(e) => {
                    tracing::warn!(candidate = index, "Dropping candidate {}: {}", index, e);
                    dropped.push(index);
                }
            }
        }
        plans.sort_by_key(|(index, _)| *index);

        if plans.iter().all(|(_, plan)| plan.is_out_of_service_area()) {
            let reason = if plans.is_empty() {
                format!("all {} candidate paths were invalid", candidates.len())
            } else {
                "every valid candidate path is outside the service area".to_string()
            };
            return Err(AppError::NoRouteComputed(reason));
        }

        let selection = route_selector::select(&plans).ok_or_else(|| {
            AppError::Internal("route selection over a non-empty plan list failed".to_string())
        })?;

        tracing::info!(
            candidates = candidates.len(),
            plans = plans.len(),
            dropped = dropped.len(),
            "Planned {} of {} candidates (most efficient #{}, cheapest #{})",
            plans.len(),
            candidates.len(),
            selection.most_efficient,
            selection.cheapest
        );

        Ok(TripPlanBatch {
            plans,
            dropped,
            selection,
        })
    }
}
