use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

use super::extractor::actor_from_headers;

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let actor = actor_from_headers(req.headers())?.ok_or(StatusCode::UNAUTHORIZED)?;

    if !actor.is_admin() {
        tracing::warn!(actor = %actor.id, path = %req.uri().path(), "Admin route refused");
        return Err(StatusCode::FORBIDDEN);
    }

    // Add actor to request extensions for use in handlers
    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}
