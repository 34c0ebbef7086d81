//! Axum router wiring.
//!
//! Path ids are forwarded as received; the store canonicalizes them.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/:host", post(api::create).get(api::get_host))
        .route("/:host/only_friends", put(api::set_only_friends))
        .route("/:host/allow_nonames", put(api::set_allow_nonames))
        .route("/:host/friends/:other", post(api::befriend).delete(api::unfriend))
        .route("/:host/banlist/:other", post(api::ban).delete(api::unban))
        .route("/:host/welcomes", post(api::filter_welcomes))
        .route("/:host/welcomes/:guest", get(api::welcomes))
        .with_state(state)
}
