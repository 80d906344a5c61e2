//! `_method` query override for HTML forms
//!
//! Browsers only submit GET and POST. A POST to `...?_method=PUT` (or DELETE)
//! is rewritten to that method before routing, so the edit and delete forms
//! reach the PUT/DELETE routes.

use axum::extract::Request;
use axum::http::Method;
use tracing::debug;

const OVERRIDE_PARAM: &str = "_method";

pub fn apply(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let Some(method) = request.uri().query().and_then(requested_method) else {
        return request;
    };

    debug!(uri = %request.uri(), %method, "overriding POST");
    *request.method_mut() = method;
    request
}

fn requested_method(query: &str) -> Option<Method> {
    let (_, value) = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == OVERRIDE_PARAM)?;

    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
