//! Core library exports for the supplier intake service.
//!
//! This crate exposes the forms, domain model, repositories, storage and
//! notification clients, routes and service layers used by the supplier
//! registration backend.

pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod notify;
pub mod rate_limit;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;

/// Hard ceiling on a single uploaded file after base64 decoding.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of product images accepted per submission.
pub const MAX_PRODUCT_IMAGES: usize = 10;

/// Client identifier used when no forwarded address header is present.
pub const UNKNOWN_CLIENT: &str = "unknown";
