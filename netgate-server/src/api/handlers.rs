//! HTTP request handlers.
//!
//! Bodies are taken as raw bytes and parsed here rather than through the
//! `Json` extractor, so a malformed or incomplete body is reported with the
//! same 500 `{"error": ...}` shape as a device failure.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use log::info;
use netgate::DeviceAdapter;

use super::commands::{self, SHOW_INTERFACES};
use super::format::format_response;
use super::types::{ConfigureLoopbackRequest, DeleteLoopbackRequest, DeviceOutput, RunCommandRequest};
use crate::error::ApiResult;

/// Application state shared across handlers.
pub struct AppState<A> {
    pub adapter: Arc<A>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
        }
    }
}

/// Run an arbitrary command.
///
/// POST /network_interaction
pub async fn network_interaction<A: DeviceAdapter>(
    State(state): State<AppState<A>>,
    body: Bytes,
) -> ApiResult<Json<DeviceOutput>> {
    let request: RunCommandRequest = serde_json::from_slice(&body)?;
    info!("network_interaction: {:?}", request.command);

    let output = state.adapter.run_query(&request.command).await?;
    Ok(Json(format_response(&output)))
}

/// Create a loopback interface.
///
/// POST /configure_loopback
pub async fn configure_loopback<A: DeviceAdapter>(
    State(state): State<AppState<A>>,
    body: Bytes,
) -> ApiResult<Json<DeviceOutput>> {
    let request: ConfigureLoopbackRequest = serde_json::from_slice(&body)?;
    info!(
        "configure_loopback: Loopback{} {}",
        request.loopback_number, request.ip_address
    );

    let config = commands::configure_loopback(request.loopback_number, &request.ip_address);
    let output = state.adapter.run_config_set(&config).await?;
    Ok(Json(format_response(&output)))
}

/// Delete a loopback interface.
///
/// POST /delete_loopback
pub async fn delete_loopback<A: DeviceAdapter>(
    State(state): State<AppState<A>>,
    body: Bytes,
) -> ApiResult<Json<DeviceOutput>> {
    let request: DeleteLoopbackRequest = serde_json::from_slice(&body)?;
    info!("delete_loopback: Loopback{}", request.loopback_number);

    let config = commands::delete_loopback(request.loopback_number);
    let output = state.adapter.run_config_set(&config).await?;
    Ok(Json(format_response(&output)))
}

/// List interfaces. Any request body is ignored.
///
/// POST /device_interfaces
pub async fn device_interfaces<A: DeviceAdapter>(
    State(state): State<AppState<A>>,
) -> ApiResult<Json<DeviceOutput>> {
    let output = state.adapter.run_query(SHOW_INTERFACES).await?;
    Ok(Json(format_response(&output)))
}
