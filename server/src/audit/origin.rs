//! Where a request came from, as recorded in the audit trail.

use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::Serialize;
use woothee::parser::Parser;

use crate::api::AppState;

/// Client IP and a short device label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestOrigin {
    pub ip: String,
    pub device: String,
}

impl RequestOrigin {
    /// Derive the origin from request headers and the peer address.
    pub fn from_request(
        headers: &HeaderMap,
        connect_info: Option<&ConnectInfo<SocketAddr>>,
        trust_proxy: bool,
    ) -> Self {
        Self {
            ip: extract_client_ip(headers, connect_info, trust_proxy).to_string(),
            device: describe_device(extract_user_agent(headers).as_deref()),
        }
    }
}

impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let connect_info = parts.extensions.get::<ConnectInfo<SocketAddr>>();
        Ok(Self::from_request(&parts.headers, connect_info, state.config.trust_proxy))
    }
}

/// Extract client IP from request headers or connection info.
///
/// When `trust_proxy` is true, checks X-Forwarded-For and X-Real-IP headers.
/// Falls back to direct connection IP, or 127.0.0.1 if unavailable.
pub fn extract_client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
    trust_proxy: bool,
) -> IpAddr {
    if trust_proxy {
        let forwarded = headers
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|first| first.trim().parse().ok());
        if let Some(ip) = forwarded {
            return ip;
        }
        let real_ip = headers
            .get("X-Real-IP")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse().ok());
        if let Some(ip) = real_ip {
            return ip;
        }
    }
    connect_info
        .map(|c| c.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(|s| {
            // Strip control characters and cap length before it reaches the audit trail
            s.chars()
                .filter(|c| !c.is_control() || c.is_whitespace())
                .take(512)
                .collect()
        })
}

/// Turn a User-Agent into "Browser on OS".
fn describe_device(user_agent: Option<&str>) -> String {
    let Some(ua) = user_agent.filter(|ua| !ua.trim().is_empty()) else {
        return "unknown".into();
    };
    match Parser::new().parse(ua) {
        Some(parsed) if parsed.name != "UNKNOWN" => {
            if parsed.os == "UNKNOWN" {
                parsed.name.to_string()
            } else {
                format!("{} on {}", parsed.name, parsed.os)
            }
        }
        _ => ua.chars().take(64).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    fn socket() -> ConnectInfo<SocketAddr> {
        ConnectInfo(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 12345))
    }

    #[test]
    fn test_extract_client_ip_no_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", "203.0.113.50".parse().unwrap());
        let ip = extract_client_ip(&headers, Some(&socket()), false);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_extract_client_ip_forwarded_for_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", "203.0.113.50, 70.41.3.18".parse().unwrap());
        headers.insert("X-Real-IP", "198.51.100.25".parse().unwrap());
        let ip = extract_client_ip(&headers, Some(&socket()), true);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(203, 0, 113, 50)));
    }

    #[test]
    fn test_extract_client_ip_real_ip_when_forwarded_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", "not-an-ip".parse().unwrap());
        headers.insert("X-Real-IP", "198.51.100.25".parse().unwrap());
        let ip = extract_client_ip(&headers, Some(&socket()), true);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(198, 51, 100, 25)));
    }

    #[test]
    fn test_extract_client_ip_fallback_to_localhost() {
        let ip = extract_client_ip(&HeaderMap::new(), None, false);
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_device_from_browser_user_agent() {
        let device = describe_device(Some(CHROME_MAC));
        assert!(device.starts_with("Chrome"), "got {device}");
        assert!(device.contains(" on "), "got {device}");
    }

    #[test]
    fn test_device_unknown_without_user_agent() {
        assert_eq!(describe_device(None), "unknown");
        assert_eq!(describe_device(Some("  ")), "unknown");
    }

    #[test]
    fn test_origin_from_request() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, CHROME_MAC.parse().unwrap());
        let origin = RequestOrigin::from_request(&headers, Some(&socket()), false);
        assert_eq!(origin.ip, "10.0.0.1");
        assert_ne!(origin.device, "unknown");
    }
}
