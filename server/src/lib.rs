mod api;
mod middleware;
mod span;

pub use sampler::DEFAULT_SAMPLE_WINDOW;

use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use axum::{Router, extract::FromRef, middleware::from_fn, routing::get};
use contextual::Context;
use sampler::Sampler;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

#[derive(Debug, Clone)]
pub struct ServerOpts {
    pub host: IpAddr,
    pub port: u16,

    /// directory served verbatim, `index` is resolved against it
    pub static_dir: PathBuf,
    pub index: PathBuf,

    pub sample_window: Duration,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub sampler: Sampler,
    pub assets: Assets,
}

#[derive(Debug, Clone)]
pub struct Assets {
    dir: PathBuf,
    index: PathBuf,
}

impl Assets {
    pub fn new(dir: impl Into<PathBuf>, index: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            index: index.into(),
        }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[inline]
    pub fn index(&self) -> &Path {
        &self.index
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index)
    }
}

/// The route table:
///
/// - `GET /metrics` one [`sampler::MetricsSnapshot`] as json
/// - `GET /` the index page
/// - everything else is looked up in the static directory
pub fn server(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(middleware::mw_client_ip))
        .layer(TraceLayer::new_for_http().make_span_with(span::span))
        .layer(from_fn(middleware::latency_ms))
        .layer(cors());

    let static_files = ServeDir::new(state.assets.dir());

    Router::new()
        .route(api::metrics::PATH, get(api::metrics::handler))
        .route(api::index::PATH, get(api::index::handler))
        .fallback_service(static_files)
        .with_state(state)
        .layer(middleware)
}

/// Any origin, any method, any header. The dashboard is usually opened from
/// a dev server on another port.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn serve(opts: ServerOpts) -> Result<(), ServerError> {
    tracing::info!("{:?}", opts);

    // the provider applies the minimum itself, this only reports it
    let window = sampler::effective_window(opts.sample_window);
    if window != opts.sample_window {
        tracing::warn!(
            "sample window {:?} is below the OS minimum, {:?} will be used",
            opts.sample_window,
            window
        );
    }

    let state = AppState {
        sampler: Sampler::sysinfo(opts.sample_window),
        assets: Assets::new(opts.static_dir, opts.index),
    };

    let index_path = state.assets.index_path();
    if !index_path.is_file() {
        tracing::warn!(
            "index page not found :: {} :: `/` will answer 404",
            index_path.display()
        );
    }

    let app = server(state).into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::new(opts.host, opts.port);
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("bind :: {addr}"))?;
    tracing::info!(
        "listening on {}",
        listener.local_addr().context("local_addr")?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("axum::serve")
        .map_err(|e| e.into())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("ctrl-c received, shutting down"),
        Err(e) => {
            tracing::error!("unable to listen for ctrl-c :: {:?}", e);
            std::future::pending::<()>().await
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Io(#[from] contextual::Error<std::io::Error>),
}

impl FromRef<AppState> for Sampler {
    fn from_ref(input: &AppState) -> Self {
        input.sampler.clone()
    }
}

impl FromRef<AppState> for Assets {
    fn from_ref(input: &AppState) -> Self {
        input.assets.clone()
    }
}
