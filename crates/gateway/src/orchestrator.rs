//! Aggregation rounds
//!
//! One round fans a search out to every provider at once. Each provider runs
//! in its own task and pushes its items, or its single failure, onto a channel
//! owned by the round. The delivery loop hands events to the sink in arrival
//! order, so a slow provider never holds back a fast one. The round ends only
//! when every provider task has finished.

use async_trait::async_trait;
use realty_core::{ProviderFailure, ProviderId, ProviderOutcome, ResultItem, SearchRequest};
use realty_ports::ProviderSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::error::SinkClosed;

/// Receives the events of one round
#[async_trait]
pub trait RoundSink: Send {
    async fn emit_item(&mut self, item: ResultItem) -> Result<(), SinkClosed>;

    async fn emit_failure(&mut self, failure: ProviderFailure) -> Result<(), SinkClosed>;
}

/// What happened during a round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    /// Items produced by providers
    pub items: usize,
    /// Providers that failed
    pub failures: usize,
    /// False when the sink closed before the round ended
    pub delivered: bool,
    pub elapsed: Duration,
}

enum RoundEvent {
    Item(ResultItem),
    Failure(ProviderFailure),
}

/// Runs rounds against a fixed set of providers
pub struct AggregationOrchestrator {
    sources: Vec<Arc<dyn ProviderSource>>,
}

impl AggregationOrchestrator {
    pub fn new(sources: Vec<Arc<dyn ProviderSource>>) -> Self {
        AggregationOrchestrator { sources }
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        self.sources.iter().map(|s| s.provider()).collect()
    }

    /// Run one round, streaming every outcome into `sink`.
    ///
    /// Never fails. Provider failures are forwarded as failure events, and a
    /// closed sink only stops forwarding: the provider tasks are still joined
    /// before returning.
    pub async fn run<S>(&self, request: SearchRequest, sink: &mut S) -> RoundSummary
    where
        S: RoundSink + ?Sized,
    {
        let started = Instant::now();
        let request = Arc::new(request);
        let (tx, mut rx) = mpsc::unbounded_channel::<RoundEvent>();

        let mut tasks = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let source = Arc::clone(source);
            let request = Arc::clone(&request);
            let tx = tx.clone();
            let provider = source.provider();

            let handle = tokio::spawn(async move {
                let outcome = source.fetch_results(&request).await;
                debug!(provider = %source.provider(), items = outcome.item_count(), "Provider settled");
                match outcome {
                    ProviderOutcome::Items(items) => {
                        for item in items {
                            if tx.send(RoundEvent::Item(item)).is_err() {
                                break;
                            }
                        }
                    }
                    ProviderOutcome::Failed(failure) => {
                        let _ = tx.send(RoundEvent::Failure(failure));
                    }
                }
            });
            tasks.push((provider, handle));
        }
        // The loop below ends once every task has dropped its sender
        drop(tx);

        let mut summary = RoundSummary {
            items: 0,
            failures: 0,
            delivered: true,
            elapsed: Duration::ZERO,
        };

        while let Some(event) = rx.recv().await {
            let result = match event {
                RoundEvent::Item(item) => {
                    summary.items += 1;
                    if !summary.delivered {
                        continue;
                    }
                    sink.emit_item(item).await
                }
                RoundEvent::Failure(failure) => {
                    summary.failures += 1;
                    if !summary.delivered {
                        continue;
                    }
                    debug!(provider = %failure.provider, kind = %failure.kind, "Provider failed");
                    sink.emit_failure(failure).await
                }
            };

            if result.is_err() {
                warn!("Sink closed mid-round, waiting for remaining providers");
                summary.delivered = false;
            }
        }

        for (provider, handle) in tasks {
            if let Err(e) = handle.await {
                error!(provider = %provider, error = %e, "Provider task aborted");
                summary.failures += 1;
                if summary.delivered {
                    let failure =
                        ProviderFailure::transport(provider, format!("provider task aborted: {}", e));
                    if sink.emit_failure(failure).await.is_err() {
                        summary.delivered = false;
                    }
                }
            }
        }

        summary.elapsed = started.elapsed();
        summary
    }
}
