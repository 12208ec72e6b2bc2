//! Router and request handlers.
//!
//! Audio calls block on COM, so every operation runs on the blocking pool
//! where it opens its own session.

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use mixer_rs::audio::AudioPlatform;
use mixer_rs::{AudioError, AudioService, Device, DeviceType, DeviceUpdate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type SharedService<P> = Arc<AudioService<P>>;

/// Query string of `GET /audio/devices`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub device_type: Option<String>,
}

/// Response containing a list of devices.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceListResponse {
    pub devices: Vec<Device>,
}

/// Build the `/audio` routes over `service`.
pub fn router<P>(service: SharedService<P>) -> Router
where
    P: AudioPlatform + 'static,
{
    Router::new()
        .route("/audio/devices", get(list_devices::<P>))
        .route(
            "/audio/:device",
            get(get_device::<P>).post(update_device::<P>),
        )
        .with_state(service)
}

async fn list_devices<P>(
    State(service): State<SharedService<P>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<DeviceListResponse>, ApiError>
where
    P: AudioPlatform + 'static,
{
    let Query(query) =
        query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let filter = DeviceType::validate(query.device_type.as_deref().unwrap_or("all"))
        .map_err(ApiError::bad_request)?;

    let devices = blocking(move || service.list_devices(filter)).await?;
    Ok(Json(DeviceListResponse { devices }))
}

async fn get_device<P>(
    State(service): State<SharedService<P>>,
    device_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Device>, ApiError>
where
    P: AudioPlatform + 'static,
{
    let Path(device_id) =
        device_id.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let device = blocking(move || service.get_device(&device_id)).await?;
    Ok(Json(device))
}

async fn update_device<P>(
    State(service): State<SharedService<P>>,
    device_id: Result<Path<String>, PathRejection>,
    body: Result<Json<DeviceUpdate>, JsonRejection>,
) -> Result<Json<Device>, ApiError>
where
    P: AudioPlatform + 'static,
{
    let Path(device_id) =
        device_id.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let Json(update) = body.map_err(|rejection| ApiError::internal(rejection.body_text()))?;
    update.validate()?;

    let device = blocking(move || service.update_device(&device_id, &update)).await?;
    Ok(Json(device))
}

async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, AudioError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(ApiError::internal)?;
    Ok(result?)
}
