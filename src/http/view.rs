//! `RequestView` over an axum request

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query, RawPathParams};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use tracing::debug;

use crate::request::RequestView;

/// Headers, query parameters and matched route parameters of one request
#[derive(Debug)]
pub struct HttpRequestView<'a> {
    headers: &'a HeaderMap,
    query: HashMap<String, String>,
    params: HashMap<String, String>,
}

impl<'a> HttpRequestView<'a> {
    /// Build a view from request parts and already extracted route parameters
    pub fn new(parts: &'a Parts, params: HashMap<String, String>) -> Self {
        let query = match Query::<HashMap<String, String>>::try_from_uri(&parts.uri) {
            Ok(Query(query)) => query,
            Err(e) => {
                debug!("Ignoring unparseable query string: {}", e);
                HashMap::new()
            }
        };

        Self {
            headers: &parts.headers,
            query,
            params,
        }
    }
}

/// Route parameters matched by the router, empty outside a parameterized route
pub async fn path_params(parts: &mut Parts) -> HashMap<String, String> {
    match RawPathParams::from_request_parts(parts, &()).await {
        Ok(params) => params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        Err(_) => HashMap::new(),
    }
}

impl RequestView for HttpRequestView<'_> {
    fn header(&self, name: &str) -> Option<String> {
        let value = self.headers.get(name)?;
        match value.to_str() {
            Ok(text) => Some(text.to_string()),
            Err(_) => {
                debug!("Header {} is not visible ASCII, decoding lossily", name);
                Some(String::from_utf8_lossy(value.as_bytes()).into_owned())
            }
        }
    }

    fn query(&self, name: &str) -> Option<String> {
        self.query.get(name).cloned()
    }

    fn param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let parts = parts("/", &[("accept-version", "^1.0")]);
        let view = HttpRequestView::new(&parts, HashMap::new());

        assert_eq!(view.header("Accept-Version"), Some("^1.0".to_string()));
        assert_eq!(view.header("X-Missing"), None);
    }

    #[test]
    fn opaque_header_bytes_are_kept_rather_than_dropped() {
        let mut parts = parts("/", &[]);
        parts.headers.insert(
            "accept-version",
            HeaderValue::from_bytes(b"\xe9").unwrap(),
        );
        let view = HttpRequestView::new(&parts, HashMap::new());

        assert_eq!(view.header("accept-version"), Some("\u{FFFD}".to_string()));
    }

    #[test]
    fn query_parameters_are_decoded() {
        let parts = parts("/?api-version=%5E1.0&other=1", &[]);
        let view = HttpRequestView::new(&parts, HashMap::new());

        assert_eq!(view.query("api-version"), Some("^1.0".to_string()));
        assert_eq!(view.query("missing"), None);
    }

    #[test]
    fn params_come_from_the_supplied_map() {
        let parts = parts("/1.0.0/", &[]);
        let params = HashMap::from([("ver".to_string(), "1.0.0".to_string())]);
        let view = HttpRequestView::new(&parts, params);

        assert_eq!(view.param("ver"), Some("1.0.0".to_string()));
    }

    #[tokio::test]
    async fn path_params_are_empty_outside_a_router() {
        let mut parts = parts("/1.0.0/", &[]);

        assert!(path_params(&mut parts).await.is_empty());
    }
}
