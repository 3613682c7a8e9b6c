use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;

use super::error::{AppError, AppResult};

/// Поле, к которому относится ошибка разбора тела целиком
const BODY_FIELD: &str = "body";

/// JSON-тело запроса. В отличие от `axum::Json` ошибки разбора
/// возвращаются как `AppError::Validation` с путём к полю.
#[derive(Debug, Clone)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Err(AppError::field(
                BODY_FIELD,
                "expected request with `Content-Type: application/json`",
            ));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::field(BODY_FIELD, e.body_text()))?;
        parse_body(&bytes).map(AppJson)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
}

/// Разбор тела с сохранением пути к ошибочному полю
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> AppResult<T> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        let field = if path == "." { BODY_FIELD } else { path.as_str() };
        AppError::field(field, e.inner().to_string())
    })?;
    de.end()
        .map_err(|e| AppError::field(BODY_FIELD, e.to_string()))?;
    Ok(value)
}
