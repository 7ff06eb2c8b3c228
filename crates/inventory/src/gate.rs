//! Stock availability gate.
//!
//! Callers ask this before raising a procurement request so existing
//! inventory can be used instead of buying. The answer is advisory: nothing is
//! reserved, so two callers may both see the same unit as available.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use tiergate_core::ApplianceModelId;

use crate::source::{InventoryUnitSource, SourceError};
use crate::unit::InventoryUnit;

/// Why a stock lookup produced no answer.
///
/// None of these mean "no stock"; callers decide whether to retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockLookupError {
    #[error("inventory lookup failed: {0}")]
    LookupFailure(String),

    #[error("inventory lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("inventory lookup cancelled")]
    Cancelled,
}

impl From<SourceError> for StockLookupError {
    fn from(value: SourceError) -> Self {
        StockLookupError::LookupFailure(value.to_string())
    }
}

/// Per-call limits supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Overrides the gate's default timeout when set.
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl LookupOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Read-only existence check over an [`InventoryUnitSource`].
#[derive(Clone)]
pub struct StockAvailabilityGate {
    source: Arc<dyn InventoryUnitSource>,
    default_timeout: Option<Duration>,
}

impl core::fmt::Debug for StockAvailabilityGate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StockAvailabilityGate")
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

impl StockAvailabilityGate {
    pub fn new(source: impl InventoryUnitSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn InventoryUnitSource>) -> Self {
        Self {
            source,
            default_timeout: None,
        }
    }

    /// Timeout applied when the caller does not pass one.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    pub async fn is_stock_available(
        &self,
        model_id: &ApplianceModelId,
    ) -> Result<bool, StockLookupError> {
        self.is_stock_available_with(model_id, LookupOptions::default())
            .await
    }

    /// `true` iff at least one unit of `model_id` is in stock.
    ///
    /// One read against the source, no retries. Store errors, deadline expiry
    /// and cancellation are all returned as errors, never as `false`.
    pub async fn is_stock_available_with(
        &self,
        model_id: &ApplianceModelId,
        options: LookupOptions,
    ) -> Result<bool, StockLookupError> {
        let timeout = options.timeout.or(self.default_timeout);
        let cancel = options.cancel.unwrap_or_default();
        let started = Instant::now();

        debug!(%model_id, ?timeout, "checking stock availability");

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StockLookupError::Cancelled),
            units = bounded(self.source.find_in_stock_units(model_id), timeout) => units,
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(units) => {
                // Re-check: an adapter that returns too much must not widen the answer.
                let in_stock = units.iter().filter(|u| u.is_available_for(model_id)).count();
                let available = in_stock > 0;
                info!(%model_id, available, in_stock, elapsed_ms, "stock lookup complete");
                Ok(available)
            }
            Err(err) => {
                warn!(%model_id, error = %err, elapsed_ms, "stock lookup failed");
                Err(err)
            }
        }
    }
}

async fn bounded<F>(
    lookup: F,
    timeout: Option<Duration>,
) -> Result<Vec<InventoryUnit>, StockLookupError>
where
    F: Future<Output = Result<Vec<InventoryUnit>, SourceError>>,
{
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, lookup).await {
            Ok(result) => result.map_err(StockLookupError::from),
            Err(_) => Err(StockLookupError::Timeout(limit)),
        },
        None => lookup.await.map_err(StockLookupError::from),
    }
}
