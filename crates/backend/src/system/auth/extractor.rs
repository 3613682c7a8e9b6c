use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};
use contracts::system::auth::{Actor, ActorRole};

use super::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};

/// Читает вызывающую сторону из заголовков внешней сессии.
///
/// Без `X-Actor-Id` возвращает `None`, без `X-Actor-Role` считает вызывающего клиентом.
/// Неизвестная роль даёт ошибку.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Actor>, StatusCode> {
    let id = match headers
        .get(ACTOR_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        Some(id) => id.to_string(),
        None => return Ok(None),
    };
    let role = match headers.get(ACTOR_ROLE_HEADER) {
        Some(value) => value
            .to_str()
            .ok()
            .and_then(ActorRole::from_code)
            .ok_or(StatusCode::UNAUTHORIZED)?,
        None => ActorRole::Customer,
    };
    Ok(Some(Actor { id, role }))
}

/// Extractor for the calling actor
/// Usage in handlers: `async fn handler(CurrentActor(actor): CurrentActor) -> Response`
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Actor already resolved by middleware
        if let Some(actor) = parts.extensions.get::<Actor>() {
            return Ok(CurrentActor(actor.clone()));
        }
        actor_from_headers(&parts.headers)?
            .map(CurrentActor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
