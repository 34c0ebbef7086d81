//! Host policy HTTP handlers.
//!
//! Each handler forwards to one store operation; success without a payload is
//! an empty 200. `welcomes` answers with the status alone: 200 welcome, 404 not.

pub mod error;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use hostgate_core::{HostId, HostPolicy};

use crate::app_state::AppState;

pub use error::ApiError;

/// Guest path segment that stands for an anonymous visitor.
pub const NONAME: &str = "NONAME";

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct OnlyFriendsBody {
    pub only_friends: bool,
}

#[derive(Debug, Deserialize)]
pub struct AllowNonamesBody {
    pub allow_nonames: bool,
}

pub async fn create(
    State(app): State<AppState>,
    Path(host): Path<String>,
) -> ApiResult<Json<HostPolicy>> {
    Ok(Json(app.store().create(&host)?))
}

pub async fn get_host(
    State(app): State<AppState>,
    Path(host): Path<String>,
) -> ApiResult<Json<HostPolicy>> {
    Ok(Json(app.store().get(&host)?))
}

pub async fn set_only_friends(
    State(app): State<AppState>,
    Path(host): Path<String>,
    Json(body): Json<OnlyFriendsBody>,
) -> ApiResult<StatusCode> {
    app.store().set_only_friends(&host, body.only_friends)?;
    Ok(StatusCode::OK)
}

pub async fn set_allow_nonames(
    State(app): State<AppState>,
    Path(host): Path<String>,
    Json(body): Json<AllowNonamesBody>,
) -> ApiResult<StatusCode> {
    app.store().set_allow_nonames(&host, body.allow_nonames)?;
    Ok(StatusCode::OK)
}

pub async fn befriend(
    State(app): State<AppState>,
    Path((host, other)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    app.store().befriend(&host, &other)?;
    Ok(StatusCode::OK)
}

pub async fn unfriend(
    State(app): State<AppState>,
    Path((host, other)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    app.store().unfriend(&host, &other)?;
    Ok(StatusCode::OK)
}

pub async fn ban(
    State(app): State<AppState>,
    Path((host, other)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    app.store().ban(&host, &other)?;
    Ok(StatusCode::OK)
}

pub async fn unban(
    State(app): State<AppState>,
    Path((host, other)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    app.store().unban(&host, &other)?;
    Ok(StatusCode::OK)
}

pub async fn welcomes(
    State(app): State<AppState>,
    Path((host, guest)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let visitor = (guest != NONAME).then_some(guest.as_str());
    if app.store().welcomes(&host, visitor)? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

pub async fn filter_welcomes(
    State(app): State<AppState>,
    Path(host): Path<String>,
    Json(visitors): Json<Vec<String>>,
) -> ApiResult<Json<Vec<HostId>>> {
    Ok(Json(app.store().filter_welcomes(&host, &visitors)?))
}
