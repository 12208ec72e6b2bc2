//! HTTP interface for the audio endpoint mixer.
//!
//! Exposes `GET /audio/devices`, `GET /audio/:id` and `POST /audio/:id`
//! over a shared [`mixer_rs::AudioService`].

pub mod config;
pub mod env;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody};
pub use routes::{router, DeviceListResponse};
