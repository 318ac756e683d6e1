#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{Request, Response, StatusCode},
};
use sampler::{MetricsProvider, Sampler};
use server::{AppState, Assets};
use tower::ServiceExt;

pub mod macros;
pub mod providers;

pub const WINDOW: Duration = Duration::from_millis(200);

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ui")
}

pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(provider: impl MetricsProvider + 'static) -> Self {
        Self::with_assets(provider, Assets::new(fixtures_dir(), "index.html"))
    }

    pub fn with_assets(provider: impl MetricsProvider + 'static, assets: Assets) -> Self {
        tracing_init();

        let router = server::server(AppState {
            sampler: Sampler::new(provider, WINDOW),
            assets,
        });
        Self { router }
    }

    pub async fn send(&self, request: Request<Body>) -> Asserter {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap(/* Infallible */);
        Asserter::from(response)
    }
}

pub struct Asserter {
    response: Response<Body>,
}

impl Asserter {
    pub fn into_response(self) -> Response<Body> {
        self.response
    }

    pub fn status_code(&self) -> StatusCode {
        self.response.status()
    }

    pub fn status(self, expected: u16) -> Self {
        assert_eq!(
            self.response.status().as_u16(),
            expected,
            "expected status {}, got {}",
            expected,
            self.response.status()
        );
        self
    }

    pub fn is_success(self) -> Self {
        assert!(
            self.response.status().is_success(),
            "expected 2xx status, got {}",
            self.response.status()
        );
        self
    }

    pub fn is_server_error(self) -> Self {
        assert!(
            self.response.status().is_server_error(),
            "expected 5xx status, got {}",
            self.response.status()
        );
        self
    }

    pub fn header(self, name: &str, expected: &str) -> Self {
        let actual = self
            .response
            .headers()
            .get(name)
            .unwrap_or_else(|| panic!("missing header `{name}`"))
            .to_str()
            .expect("header is not visible ascii");
        assert_eq!(actual, expected, "header `{name}`");
        self
    }

    pub fn header_starts_with(self, name: &str, prefix: &str) -> Self {
        let actual = self
            .response
            .headers()
            .get(name)
            .unwrap_or_else(|| panic!("missing header `{name}`"))
            .to_str()
            .expect("header is not visible ascii");
        assert!(
            actual.starts_with(prefix),
            "header `{name}` :: expected prefix {prefix:?}, got {actual:?}"
        );
        self
    }

    pub async fn json_body<T>(self, f: impl FnOnce(T))
    where
        T: serde::de::DeserializeOwned,
    {
        f(self.into_deserialized_json_body::<T>().await)
    }

    pub async fn into_deserialized_json_body<T>(self) -> T
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice::<T>(&self.into_bytes().await)
            .expect("unable to deserialize response body")
    }

    pub async fn into_bytes(self) -> Bytes {
        to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body")
    }
}

impl From<Response<Body>> for Asserter {
    fn from(response: Response<Body>) -> Self {
        Self { response }
    }
}

static TRACING_INIT: std::sync::Once = std::sync::Once::new();

pub fn tracing_init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
