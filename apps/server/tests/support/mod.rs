pub mod assertions;
pub mod builders;
pub mod fixtures;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use catalog::{api::create_router, db::MemoryProductStore, models::Product, AppState, Config};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

// Re-export commonly used items
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

/// Signing secret shared by the test config and [`admin_token`].
pub const TEST_SESSION_SECRET: &str = "test-secret-test-secret-test-secret!";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryProductStore>,
}

impl TestApp {
    pub fn new(products: Vec<Product>) -> Self {
        Self::new_with_config(products, |_| {})
    }

    pub fn new_with_config(products: Vec<Product>, configure: impl FnOnce(&mut Config)) -> Self {
        init_tracing();

        let mut config = Config::default();
        config.admin.session_secret = Some(TEST_SESSION_SECRET.to_string());
        configure(&mut config);

        let store = Arc::new(MemoryProductStore::with_products(products));
        let state = AppState::new(config, store.clone());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            store,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, &[])
            .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "catalog.example.com")
            .header("accept", "application/json")
            .body(Body::empty())
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.get_json_with_headers(path_and_query, &[]).await
    }

    pub async fn get_json_with_headers(
        &self,
        path_and_query: &str,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _headers, body) = self
            .request_with_extra_headers(Method::GET, path_and_query, extra_headers)
            .await?;
        let value = serde_json::from_slice(&body)
            .with_context(|| format!("decode JSON body of {path_and_query}"))?;
        Ok((status, value))
    }
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "catalog=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
