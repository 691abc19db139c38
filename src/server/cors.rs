use crate::{Error, Result, config::CorsConfig};
use axum::http::HeaderValue;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tracing::info;

/// Builds the CORS layer for the configured allow-list.
///
/// Browsers refuse wildcard responses on credentialed requests, so with
/// `allow_credentials` the wildcards become request mirroring.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let origins = if config.allows_any_origin() {
        None
    } else {
        let list = config
            .allow_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim_end_matches('/'))
                    .map_err(|_| Error::config(format!("invalid CORS origin: {}", origin)))
            })
            .collect::<Result<Vec<_>>>()?;
        Some(list)
    };

    info!(
        "CORS allow-list: {:?} (credentials: {})",
        config.allow_origins, config.allow_credentials
    );

    let layer = CorsLayer::new().max_age(Duration::from_secs(config.max_age_secs));
    let layer = if config.allow_credentials {
        layer
            .allow_origin(origins.map_or_else(AllowOrigin::mirror_request, AllowOrigin::list))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    } else {
        let layer = match origins {
            Some(list) => layer.allow_origin(AllowOrigin::list(list)),
            None => layer.allow_origin(Any),
        };
        layer.allow_methods(Any).allow_headers(Any)
    };
    Ok(layer)
}
