use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response, header::FORWARDED},
    middleware::Next,
};
use forwarded_header_value::ForwardedHeaderValue;

/// Stores `Option<IpAddr>` in the request extensions for [`crate::span::span`].
pub async fn mw_client_ip(mut request: Request<Body>, next: Next) -> Response<Body> {
    let ip = client_ip(&request);
    request.extensions_mut().insert(ip);
    next.run(request).await
}

fn client_ip<B>(request: &Request<B>) -> Option<IpAddr> {
    forwarded_for(request).or_else(|| peer_ip(request))
}

/// The first `for=` of the `Forwarded` header, i.e. the hop furthest from us.
fn forwarded_for<B>(request: &Request<B>) -> Option<IpAddr> {
    let header = request.headers().get(FORWARDED)?.to_str().ok()?;
    ForwardedHeaderValue::from_str(header)
        .ok()?
        .remotest_forwarded_for_ip()
}

fn peer_ip<B>(request: &Request<B>) -> Option<IpAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
