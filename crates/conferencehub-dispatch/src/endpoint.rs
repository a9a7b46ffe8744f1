//! Endpoint URL resolution shared by the HTTP channels and the probe.

use reqwest::{RequestBuilder, Url};
use tracing::warn;

/// Join `base` and `segments` into a URL.
///
/// A base that does not parse is a configuration mistake, not a fatal one:
/// it is logged and the caller treats the channel as disabled.
pub(crate) fn resolve(channel: &str, base: &str, segments: &[&str]) -> Option<Url> {
    let mut raw = base.trim().trim_end_matches('/').to_string();
    for segment in segments {
        raw.push('/');
        raw.push_str(segment.trim().trim_matches('/'));
    }

    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            warn!(channel, scheme = url.scheme(), "Unsupported endpoint scheme; channel disabled");
            None
        }
        Err(e) => {
            warn!(channel, endpoint = %raw, error = %e, "Invalid endpoint configuration; channel disabled");
            None
        }
    }
}

/// Attach `key` as a bearer credential when one is configured.
pub(crate) fn authorize(request: RequestBuilder, key: &str) -> RequestBuilder {
    if key.trim().is_empty() {
        request
    } else {
        request.bearer_auth(key.trim())
    }
}
