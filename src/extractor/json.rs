use axum::{
    async_trait,
    extract::{FromRequest, Json as AxumJson, Request},
};
use schemars::{schema_for, JsonSchema};
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    book::FromPayload,
    error::{ApiError, BodyError, ErrorVerbosityProvider, InternalServerError, PayloadError},
};

/// A Wrapper around [`axum::extract::Json`] that rejects with an [`ApiError`].
///
/// Extracts the request body as JSON consuming the request and builds `T` from it
/// with [`FromPayload`].
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: FromPayload + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "json_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        let payload = match AxumJson::<Value>::from_request(req, state).await {
            Ok(AxumJson(payload)) => payload,
            Err(json_rejection) => {
                tracing::warn!(rejection=?json_rejection, "Rejection");

                return Err(BodyError::from_json_rejection(verbosity, json_rejection).into());
            }
        };

        match T::from_payload(payload) {
            Ok(extracted) => {
                tracing::trace!(?extracted, "Extracted");

                Ok(ApiJson(extracted))
            }
            Err(validation_error) => {
                tracing::warn!(%validation_error, "Validation failed");

                let payload_expected_schema = serde_yaml::to_string(&schema_for!(T))
                    .map_err(|err| InternalServerError::from_generic_error(verbosity, err))?;

                Err(PayloadError::new(verbosity, &validation_error, payload_expected_schema).into())
            }
        }
    }
}
