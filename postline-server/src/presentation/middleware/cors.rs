use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};

/// The session cookie is a credential, so credentialed CORS is only enabled
/// for an explicit origin list; a `*` entry falls back to a cookie-less
/// wildcard.
pub(crate) fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .map(|origin| {
                origin
                    .parse()
                    .with_context(|| format!("invalid CORS origin '{origin}'"))
            })
            .collect::<Result<_>>()?;

        CorsLayer::new().allow_origin(allowed).allow_credentials(true)
    };

    Ok(layer
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::COOKIE,
        ])))
}
