//! Static provider registry
//!
//! Maps provider ids to their adapters and builds one `ProviderClient` per
//! enabled provider at startup. There is no runtime discovery: adding a
//! provider means adding an adapter here.

use realty_core::ProviderId;
use realty_ports::{HttpFetcher, ProviderAdapter};
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::adapters::{City24Adapter, Kinnisvara24Adapter, RendinAdapter};
use crate::client::ProviderClient;
use crate::error::RegistryError;
use crate::settings::ProviderConfig;

/// Every provider with a built-in adapter
pub fn known_providers() -> Vec<ProviderId> {
    vec![
        ProviderId::kinnisvara24(),
        ProviderId::rendin(),
        ProviderId::city24(),
    ]
}

/// Look up the adapter for a provider id
pub fn adapter_for(id: &ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
    match id.as_str() {
        "kinnisvara24" => Some(Arc::new(Kinnisvara24Adapter::new())),
        "rendin" => Some(Arc::new(RendinAdapter::new())),
        "city24" => Some(Arc::new(City24Adapter::new())),
        _ => None,
    }
}

/// Build clients for all enabled providers, in configuration order
pub fn build_provider_clients(
    configs: &[ProviderConfig],
    fetcher: Arc<dyn HttpFetcher>,
) -> Result<Vec<ProviderClient>, RegistryError> {
    let mut clients = Vec::new();

    for config in configs.iter().filter(|c| c.enabled) {
        let id = ProviderId::new(&config.id);
        let adapter =
            adapter_for(&id).ok_or_else(|| RegistryError::UnknownProvider(config.id.clone()))?;

        Url::parse(&config.base_url).map_err(|e| RegistryError::InvalidBaseUrl {
            id: config.id.clone(),
            reason: e.to_string(),
        })?;

        info!(
            provider = %id,
            method = adapter.method().as_str(),
            url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "Registered provider"
        );

        clients.push(ProviderClient::new(
            adapter,
            config.target(),
            Arc::clone(&fetcher),
        ));
    }

    Ok(clients)
}
