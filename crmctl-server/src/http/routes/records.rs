//! Financial record endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crmctl_core::models::{CreateRecordInput, FinancialRecord, ListQuery, RecordPage};

use crate::connection::Connector;
use crate::db::RecordStore;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::service::RecordService;

const LIST_FAILED: &str = "Failed to fetch financial records";
const CREATE_FAILED: &str = "Failed to create financial record";

/// Success envelope
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// GET /financial-records - filtered page with pagination and stats
async fn list_records<C>(
    State(state): State<Arc<AppState<C>>>,
    ValidQuery(query): ValidQuery<ListQuery>,
) -> Result<Json<ApiResponse<RecordPage>>, ApiError>
where
    C: Connector,
    C::Connection: RecordStore,
{
    let filter = query.filter();
    let page = query.pagination();

    let result = RecordService::new(&state.connections)
        .list_records(&filter, page)
        .await
        .map_err(|e| ApiError::service(LIST_FAILED, e))?;

    Ok(Json(ApiResponse::ok(result)))
}

/// POST /financial-records - validate and create a record
async fn create_record<C>(
    State(state): State<Arc<AppState<C>>>,
    ValidJson(input): ValidJson<CreateRecordInput>,
) -> Result<(StatusCode, Json<ApiResponse<FinancialRecord>>), ApiError>
where
    C: Connector,
    C::Connection: RecordStore,
{
    let record = RecordService::new(&state.connections)
        .create_record(input)
        .await
        .map_err(|e| ApiError::service(CREATE_FAILED, e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Financial record created",
            record,
        )),
    ))
}

/// Financial record routes
pub fn router<C>() -> Router<Arc<AppState<C>>>
where
    C: Connector,
    C::Connection: RecordStore,
{
    Router::new().route(
        "/financial-records",
        get(list_records::<C>).post(create_record::<C>),
    )
}
