use crate::constants::CURRENCY_SYMBOL;
use crate::error::{AppError, Result};
use crate::models::trip::format_fare;
use crate::models::{TripLeg, TripPlan};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Turns a composed plan into rider-facing prose.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(&self, plan: &TripPlan) -> Result<String>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}

/// Narrator backed by an HTTP text-generation endpoint.
///
/// The endpoint receives `{legs, total_fare, currency}` and answers `{text}`.
pub struct HttpNarrator {
    client: Client,
    url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct NarrationRequest<'a> {
    legs: &'a [TripLeg],
    total_fare: Option<f64>,
    currency: &'static str,
}

impl<'a> NarrationRequest<'a> {
    fn from_plan(plan: &'a TripPlan) -> Self {
        NarrationRequest {
            legs: &plan.legs,
            total_fare: plan.total_final_fare,
            currency: CURRENCY_SYMBOL,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NarrationResponse {
    text: String,
}

impl HttpNarrator {
    pub fn new(url: String, api_key: Option<String>) -> Self {
        HttpNarrator {
            client: Client::new(),
            url,
            api_key,
        }
    }
}

#[async_trait]
impl Narrator for HttpNarrator {
    async fn narrate(&self, plan: &TripPlan) -> Result<String> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&NarrationRequest::from_plan(plan));
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Narration(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Narration(format!(
                "{} answered HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body: NarrationResponse = response
            .json()
            .await
            .map_err(|e| AppError::Narration(format!("Failed to parse response: {}", e)))?;

        let text = body.text.trim();
        if text.is_empty() {
            return Err(AppError::Narration(format!("{} returned empty text", self.url)));
        }
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        &self.url
    }
}

/// Ordered list of narrators tried in sequence, each under its own timeout.
#[derive(Clone)]
pub struct NarratorChain {
    providers: Vec<Arc<dyn Narrator>>,
    timeout: Duration,
}

impl NarratorChain {
    pub fn new(providers: Vec<Arc<dyn Narrator>>, timeout: Duration) -> Self {
        NarratorChain { providers, timeout }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// First successful narration wins. Fails with `AppError::Narration` once every
    /// provider has failed or timed out.
    pub async fn narrate(&self, plan: &TripPlan) -> Result<String> {
        if self.providers.is_empty() {
            return Err(AppError::Narration(
                "no narration providers configured".to_string(),
            ));
        }

        for provider in &self.providers {
            match tokio::time::timeout(self.timeout, provider.narrate(plan)).await {
                Ok(Ok(text)) => {
                    tracing::debug!(provider = provider.name(), "Narration succeeded");
                    return Ok(text);
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        provider = provider.name(),
                        "Narrator {} failed: {}",
                        provider.name(),
                        e
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        provider = provider.name(),
                        "Narrator {} timed out after {:?}",
                        provider.name(),
                        self.timeout
                    );
                }
            }
        }

        Err(AppError::Narration(format!(
            "all {} narration providers failed",
            self.providers.len()
        )))
    }
}

/// Deterministic leg-by-leg description, used whenever narration is unavailable.
pub fn describe_plan(plan: &TripPlan) -> String {
    let (Some(base), Some(total)) = (plan.total_base_fare, plan.total_final_fare) else {
        return format!(
            "This trip is {:.2} km long, outside the service area. No fare can be quoted.",
            plan.distance_km
        );
    };

    let mut lines: Vec<String> = plan
        .legs
        .iter()
        .enumerate()
        .map(|(i, leg)| format!("{}. {}", i + 1, leg.description))
        .collect();

    if plan.discount_applied {
        lines.push(format!(
            "Total fare: {} (discounted from {})",
            format_fare(total),
            format_fare(base)
        ));
    } else {
        lines.push(format!("Total fare: {}", format_fare(total)));
    }
    lines.join("\n")
}
