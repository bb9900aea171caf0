//! `/strings` endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::error::CoreError;
use crate::filter::FilterSet;
use crate::record::AnalyzedRecord;
use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;

/// Request payload for storing a string.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStringRequest {
    /// The string to analyse. Stored verbatim.
    pub value: String,
}

/// Query parameters accepted by `GET /strings`. Documentation only; the
/// handler validates the raw map through `FilterSet::from_params`.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StringFilterParams {
    pub is_palindrome: Option<bool>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub word_count: Option<usize>,
    /// Exactly one character.
    pub contains_character: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NaturalLanguageParams {
    /// Free-text description, e.g. "single word palindromic strings".
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StringListResponse {
    pub data: Vec<AnalyzedRecord>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSet,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NaturalLanguageResponse {
    pub data: Vec<AnalyzedRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

#[utoipa::path(
    post,
    path = "/strings",
    tag = "strings",
    request_body = CreateStringRequest,
    responses(
        (status = 201, description = "String analysed and stored", body = AnalyzedRecord),
        (status = 400, body = ApiErrorResponse),
        (status = 409, body = ApiErrorResponse),
        (status = 422, body = ApiErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn create_string(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<AnalyzedRecord>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("rejected request body: {rejection}");
        ApiError::bad_request("Invalid request body")
    })?;
    let value = extract_value(&payload)?;
    let record = state.service.create(value).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/strings/{value}",
    tag = "strings",
    params(("value" = String, Path, description = "The exact stored string")),
    responses(
        (status = 200, body = AnalyzedRecord),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub(crate) async fn get_string(
    State(state): State<Arc<ServerState>>,
    Path(value): Path<String>,
) -> Result<Json<AnalyzedRecord>, ApiError> {
    Ok(Json(state.service.get(&value).await?))
}

#[utoipa::path(
    get,
    path = "/strings",
    tag = "strings",
    params(StringFilterParams),
    responses(
        (status = 200, body = StringListResponse),
        (status = 400, body = ApiErrorResponse),
    ),
    description = "List stored strings matching every supplied filter."
)]
pub(crate) async fn list_strings(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<StringListResponse>, ApiError> {
    let filters = FilterSet::from_params(&params)?;
    let data = state.service.list(&filters).await?;
    Ok(Json(StringListResponse {
        count: data.len(),
        data,
        filters_applied: filters,
    }))
}

#[utoipa::path(
    get,
    path = "/strings/filter-by-natural-language",
    tag = "strings",
    params(NaturalLanguageParams),
    responses(
        (status = 200, body = NaturalLanguageResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 422, body = ApiErrorResponse),
    ),
    description = "Interpret a free-text query as filters and list the matching strings."
)]
pub(crate) async fn filter_by_natural_language(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<NaturalLanguageParams>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let raw = params.query.unwrap_or_default();
    // Clients sometimes encode twice; a failed second decode keeps the text as sent.
    let original = urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw);

    let result = state.service.search_natural_language(&original).await?;
    Ok(Json(NaturalLanguageResponse {
        count: result.records.len(),
        data: result.records,
        interpreted_query: InterpretedQuery {
            original,
            parsed_filters: result.filters,
        },
    }))
}

#[utoipa::path(
    delete,
    path = "/strings/{value}",
    tag = "strings",
    params(("value" = String, Path, description = "The exact stored string")),
    responses(
        (status = 204, description = "String deleted"),
        (status = 404, body = ApiErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn delete_string(
    State(state): State<Arc<ServerState>>,
    Path(value): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&value).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn extract_value(payload: &Value) -> Result<&str, CoreError> {
    match payload.get("value") {
        None => Err(CoreError::InvalidInput("Missing value field".to_string())),
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(CoreError::InvalidType("Value must be a string".to_string())),
    }
}
