//! HTTP API for the featreg spec service.
//!
//! Every route is a thin JSON adapter over one [`SpecService`] operation.
//! Service calls touch the repositories synchronously, so they run on the
//! blocking pool.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use featreg_model::{wire, FeatureKey};
use featreg_service::{
    ApplyFeatureSetResponse, GetFeatureSetRequest, ListFeatureSetsFilter, ListFeaturesFilter,
    ListStoresFilter, SpecError, SpecResult, SpecService, UpdateStoreResponse,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListFeatureSetsResponse {
    pub feature_sets: Vec<wire::FeatureSet>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListFeaturesResponse {
    pub features: BTreeMap<FeatureKey, wire::FeatureSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListStoresResponse {
    pub stores: Vec<wire::Store>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListProjectsResponse {
    pub projects: Vec<String>,
}

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// A failed request, rendered as an [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_argument",
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: message.into(),
        }
    }
}

impl From<SpecError> for ApiError {
    fn from(err: SpecError) -> Self {
        let status = match &err {
            SpecError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            SpecError::NotFound(_) => StatusCode::NOT_FOUND,
            SpecError::Conflict(_) => StatusCode::CONFLICT,
            SpecError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!("Request failed: {}", self.message);
        } else {
            debug!("Request rejected: {}", self.message);
        }
        let body = ErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Runs a service call on the blocking pool.
async fn call<T, F>(service: Arc<SpecService>, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&SpecService) -> SpecResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| ApiError::internal(format!("service task failed: {}", e)))?;
    Ok(Json(result?))
}

/// Splits repeated `label=key:value` query parameters into a label map.
fn parse_labels(params: &[(String, String)]) -> Result<BTreeMap<String, String>, ApiError> {
    params
        .iter()
        .filter(|(key, _)| key == "label")
        .map(|(_, value)| {
            value
                .split_once(':')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| {
                    ApiError::invalid_argument(format!("label must be key:value, got \"{}\"", value))
                })
        })
        .collect()
}

fn single(params: &[(String, String)], name: &str) -> String {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

async fn apply_feature_set(
    State(service): State<Arc<SpecService>>,
    Json(feature_set): Json<wire::FeatureSet>,
) -> ApiResult<ApplyFeatureSetResponse> {
    call(service, move |s| s.apply_feature_set(feature_set)).await
}

async fn get_feature_set(
    State(service): State<Arc<SpecService>>,
    Path((project, name)): Path<(String, String)>,
) -> ApiResult<wire::FeatureSet> {
    call(service, move |s| {
        s.get_feature_set(GetFeatureSetRequest::new(project, name))
    })
    .await
}

async fn list_feature_sets(
    State(service): State<Arc<SpecService>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<ListFeatureSetsResponse> {
    let filter = ListFeatureSetsFilter {
        feature_set_name: single(&params, "name"),
        project: single(&params, "project"),
        labels: parse_labels(&params)?,
    };
    call(service, move |s| {
        s.list_feature_sets(filter)
            .map(|feature_sets| ListFeatureSetsResponse { feature_sets })
    })
    .await
}

async fn list_features(
    State(service): State<Arc<SpecService>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<ListFeaturesResponse> {
    let filter = ListFeaturesFilter {
        project: single(&params, "project"),
        entities: params
            .iter()
            .filter(|(key, _)| key == "entity")
            .map(|(_, value)| value.clone())
            .collect(),
        labels: parse_labels(&params)?,
    };
    call(service, move |s| {
        s.list_features(filter)
            .map(|features| ListFeaturesResponse { features })
    })
    .await
}

async fn update_store(
    State(service): State<Arc<SpecService>>,
    Json(store): Json<wire::Store>,
) -> ApiResult<UpdateStoreResponse> {
    call(service, move |s| s.update_store(store)).await
}

async fn list_stores(
    State(service): State<Arc<SpecService>>,
    Query(filter): Query<ListStoresFilter>,
) -> ApiResult<ListStoresResponse> {
    call(service, move |s| {
        s.list_stores(filter).map(|stores| ListStoresResponse { stores })
    })
    .await
}

async fn list_subscribed_feature_sets(
    State(service): State<Arc<SpecService>>,
    Path(name): Path<String>,
) -> ApiResult<ListFeatureSetsResponse> {
    call(service, move |s| {
        s.list_subscribed_feature_sets(&name)
            .map(|feature_sets| ListFeatureSetsResponse { feature_sets })
    })
    .await
}

async fn list_projects(State(service): State<Arc<SpecService>>) -> ApiResult<ListProjectsResponse> {
    call(service, |s| {
        s.list_projects().map(|projects| ListProjectsResponse {
            projects: projects.into_iter().map(|p| p.name).collect(),
        })
    })
    .await
}

/// Build the HTTP API router over the given service.
pub fn build_router(service: Arc<SpecService>) -> Router {
    Router::new()
        .route(
            "/api/v1/feature-sets",
            post(apply_feature_set).get(list_feature_sets),
        )
        .route("/api/v1/feature-sets/{project}/{name}", get(get_feature_set))
        .route("/api/v1/features", get(list_features))
        .route("/api/v1/stores", post(update_store).get(list_stores))
        .route(
            "/api/v1/stores/{name}/feature-sets",
            get(list_subscribed_feature_sets),
        )
        .route("/api/v1/projects", get(list_projects))
        .with_state(service)
}
