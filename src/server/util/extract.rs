//! Extractors whose rejections render as the uniform error envelope.
//!
//! Axum's stock `Json`, `Query` and `Path` reject with plain-text bodies. These
//! wrappers route every rejection through `AppError`, producing a 400
//! `INVALID_REQUEST` envelope instead.

use axum::extract::{FromRequest, FromRequestParts};

use crate::server::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
