//! HTTP relay service: upload a media file, get a short link, resolve the
//! short link into a time-limited signed download URL.

pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;
