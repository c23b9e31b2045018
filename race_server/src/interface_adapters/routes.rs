use crate::interface_adapters::handlers::{
    build_grid, hire_driver, market, pause_race, purchase_upgrade, race_results, race_snapshot,
    release_driver, reset_race, start_race, team, upgrades,
};
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/race", get(race_snapshot))
        .route("/race/results", get(race_results))
        .route("/race/start", post(start_race))
        .route("/race/pause", post(pause_race))
        .route("/race/reset", post(reset_race))
        .route("/ws", get(ws_handler))
        .route("/market", get(market))
        .route("/team", get(team))
        .route("/team/hire", post(hire_driver))
        .route("/team/release", post(release_driver))
        .route("/upgrades", get(upgrades))
        .route("/upgrades/purchase", post(purchase_upgrade))
        .route("/grid", post(build_grid))
        .with_state(state)
}
