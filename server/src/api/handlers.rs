//! HTTP request handlers for the geographic reference API

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use refdata_core::constants::{COUNTRIES, LGAS, STATES};
use refdata_core::core::{AppState, HealthResponse};
use refdata_core::storage::{typed, StorageImpl};
use refdata_core::{log_info, log_warn, City, Country, CountryStatus, EntityId, Error, Filter, Lga, Result};

use crate::cities::{self, CityAppendOutcome};

/// Response for a city append
#[derive(Debug, Serialize)]
pub struct CityAppendResponse {
    /// Confirmation message
    pub message: String,
    /// Per-name outcome
    #[serde(flatten)]
    pub outcome: CityAppendOutcome,
}

/// JSON body extractor whose rejections surface as [`Error::InvalidInput`]
pub struct JsonRequest<T>(pub T);

impl<T, S> FromRequest<S> for JsonRequest<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonRequest(value)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(_) => "expected a JSON array of strings".to_string(),
                    JsonRejection::JsonSyntaxError(_) => "malformed JSON body".to_string(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "missing or invalid Content-Type header, expected 'application/json'".to_string()
                    }
                    JsonRejection::BytesRejection(_) => "failed to read request body".to_string(),
                    _ => "invalid JSON request".to_string(),
                };

                log_warn!("JSON parsing error: {}", error_message);
                Err(Error::invalid_input(error_message))
            }
        }
    }
}

/// Parse a path parameter as an entity identifier
pub fn parse_reference(raw: &str) -> Result<EntityId> {
    raw.parse()
        .map_err(|e| Error::invalid_identifier(format!("{} ({})", raw, e)))
}

/// `GET /countries`
pub async fn list_countries<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Country>>> {
    let countries = typed::find_all(app_state.store(), COUNTRIES, &Filter::all()).await?;
    Ok(Json(countries))
}

/// `GET /countries/active`
pub async fn list_active_countries<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Country>>> {
    let filter = Filter::eq("status", CountryStatus::Active.as_str());
    let countries = typed::find_all(app_state.store(), COUNTRIES, &filter).await?;
    Ok(Json(countries))
}

/// `GET /states/{countryId}`
pub async fn list_states<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(country_id): Path<String>,
) -> Result<Json<Vec<refdata_core::State>>> {
    let country_id = parse_reference(&country_id)?;
    let filter = Filter::eq("country_id", country_id.to_string());
    let states = typed::find_all(app_state.store(), STATES, &filter).await?;
    Ok(Json(states))
}

/// `GET /lgas/{stateId}`
pub async fn list_lgas<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(state_id): Path<String>,
) -> Result<Json<Vec<Lga>>> {
    let state_id = parse_reference(&state_id)?;
    let filter = Filter::eq("state_id", state_id.to_string());
    let lgas = typed::find_all(app_state.store(), LGAS, &filter).await?;
    Ok(Json(lgas))
}

/// `GET /cities/{stateId}`
pub async fn list_cities<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(state_id): Path<String>,
) -> Result<Json<Vec<City>>> {
    let state_id = parse_reference(&state_id)?;
    Ok(Json(cities::list_cities(app_state.store(), state_id).await?))
}

/// `POST /cities/{stateId}`
pub async fn add_cities<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(state_id): Path<String>,
    JsonRequest(names): JsonRequest<Vec<String>>,
) -> Result<Json<CityAppendResponse>> {
    let state_id = parse_reference(&state_id)?;
    let outcome = cities::append_cities(app_state.store(), state_id, &names).await?;

    log_info!(
        "Appended {} cities to state {} ({} duplicates, {} blank)",
        outcome.inserted.len(),
        state_id,
        outcome.duplicates.len(),
        outcome.blank
    );

    Ok(Json(CityAppendResponse {
        message: "Cities added successfully".to_string(),
        outcome,
    }))
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
}
