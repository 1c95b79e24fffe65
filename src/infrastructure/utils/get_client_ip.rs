use actix_web::{http::header, HttpRequest};

/// Client address for analytics records.
/// Proxy headers are only honoured when `trust_forwarded` is set.
pub fn get_client_ip(req: &HttpRequest, trust_forwarded: bool) -> Option<String> {
    if trust_forwarded {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }

        if let Some(real_ip) = req.headers().get("x-real-ip").and_then(|v| v.to_str().ok()) {
            return Some(real_ip.trim().to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

pub fn get_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
