use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use shared::{domain::response::ErrorResponse, utils::AppError};
use validator::Validate;

/// JSON body that has passed its `Validate` rules.
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value
            .validate()
            .map_err(|e| AppError::ValidationError(e).into_response())?;

        Ok(SimpleValidatedJson(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    (status, Json(ErrorResponse::error(rejection.body_text()))).into_response()
}
