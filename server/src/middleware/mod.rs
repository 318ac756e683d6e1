mod client_ip;
mod latency;

pub use client_ip::mw_client_ip;
pub use latency::latency_ms;
