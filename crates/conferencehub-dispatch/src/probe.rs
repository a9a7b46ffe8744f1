//! Secrets store probe.

use async_trait::async_trait;
use reqwest::{Client, Url};

use conferencehub_core::config::messaging::KeyVaultConfig;
use conferencehub_core::result::AppResult;
use conferencehub_core::traits::SecretProbe;

use crate::endpoint;

const API_VERSION: &str = "7.4";

/// Reads the configured probe secret over HTTP.
///
/// Disabled when the vault URI or the secret name is blank, or when the URI
/// does not parse.
#[derive(Debug, Clone)]
pub struct KeyVaultProbe {
    client: Client,
    url: Option<Url>,
    host: String,
    secret_name: String,
    access_token: String,
}

impl KeyVaultProbe {
    /// Build a probe from configuration.
    pub fn new(client: Client, config: &KeyVaultConfig) -> Self {
        let url = if config.is_configured() {
            endpoint::resolve(
                "key_vault",
                &config.vault_uri,
                &["secrets", &config.probe_secret_name],
            )
            .map(|mut url| {
                url.query_pairs_mut().append_pair("api-version", API_VERSION);
                url
            })
        } else {
            None
        };
        let host = url
            .as_ref()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        Self {
            client,
            url,
            host,
            secret_name: config.probe_secret_name.trim().to_string(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl SecretProbe for KeyVaultProbe {
    fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    fn target(&self) -> String {
        self.host.clone()
    }

    fn secret_name(&self) -> &str {
        &self.secret_name
    }

    async fn probe(&self, operation: &str) -> AppResult<()> {
        let Some(url) = &self.url else {
            return Ok(());
        };

        tracing::trace!(operation, secret = %self.secret_name, "Probing secrets store");
        endpoint::authorize(self.client.get(url.clone()), &self.access_token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
