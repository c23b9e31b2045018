use crate::domain::upgrades::CATALOG;
use crate::domain::{RaceError, RosterError};
use crate::interface_adapters::http::{ApiError, error_response};
use crate::interface_adapters::protocol::{
    CompetitorDto, DriverDto, DriverRequest, GridResponse, RaceUpdateDto, TeamDto, UpgradeDto,
    UpgradeRequest,
};
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::warn;

pub async fn race_snapshot(State(state): State<Arc<AppState>>) -> Json<RaceUpdateDto> {
    Json(RaceUpdateDto::from(&state.race.snapshot()))
}

pub async fn race_results(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CompetitorDto>>, ApiError> {
    RaceUpdateDto::from(&state.race.snapshot())
        .results
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "race not finished"))
}

pub async fn start_race(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RaceUpdateDto>, ApiError> {
    state.race.start().await.map_err(map_race_error)?;
    Ok(race_snapshot(State(state)).await)
}

pub async fn pause_race(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RaceUpdateDto>, ApiError> {
    state.race.pause().await.map_err(map_race_error)?;
    Ok(race_snapshot(State(state)).await)
}

pub async fn reset_race(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RaceUpdateDto>, ApiError> {
    state.race.reset().await.map_err(map_race_error)?;
    Ok(race_snapshot(State(state)).await)
}

pub async fn market(State(state): State<Arc<AppState>>) -> Json<Vec<DriverDto>> {
    let garage = state.garage.lock().await;
    Json(garage.market().iter().map(DriverDto::from).collect())
}

pub async fn team(State(state): State<Arc<AppState>>) -> Json<TeamDto> {
    let garage = state.garage.lock().await;
    Json(TeamDto::from(&*garage))
}

pub async fn hire_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DriverRequest>,
) -> Result<Json<TeamDto>, ApiError> {
    let mut garage = state.garage.lock().await;
    garage
        .hire(payload.driver_id.trim())
        .map_err(map_roster_error)?;
    Ok(Json(TeamDto::from(&*garage)))
}

pub async fn release_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DriverRequest>,
) -> Result<Json<TeamDto>, ApiError> {
    let mut garage = state.garage.lock().await;
    garage
        .release(payload.driver_id.trim())
        .map_err(map_roster_error)?;
    Ok(Json(TeamDto::from(&*garage)))
}

pub async fn upgrades(State(state): State<Arc<AppState>>) -> Json<Vec<UpgradeDto>> {
    let garage = state.garage.lock().await;
    Json(
        CATALOG
            .iter()
            .map(|u| UpgradeDto::new(u, garage.is_purchased(u.id)))
            .collect(),
    )
}

pub async fn purchase_upgrade(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpgradeRequest>,
) -> Result<Json<TeamDto>, ApiError> {
    let mut garage = state.garage.lock().await;
    garage
        .purchase_upgrade(payload.upgrade_id.trim())
        .map_err(map_roster_error)?;
    Ok(Json(TeamDto::from(&*garage)))
}

pub async fn build_grid(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GridResponse>, ApiError> {
    // Release the garage before awaiting the race loop.
    let grid = {
        let mut garage = state.garage.lock().await;
        garage.build_grid().map_err(map_roster_error)?
    };
    let grid_size = grid.len();
    state.race.load_grid(grid).await.map_err(map_race_error)?;

    Ok(Json(GridResponse {
        grid_size,
        race: RaceUpdateDto::from(&state.race.snapshot()),
    }))
}

fn map_race_error(err: RaceError) -> ApiError {
    match err {
        RaceError::EmptyGrid | RaceError::AlreadyFinished => {
            error_response(StatusCode::CONFLICT, err)
        }
        RaceError::LoopClosed => {
            warn!("race loop unavailable");
            error_response(StatusCode::SERVICE_UNAVAILABLE, err)
        }
    }
}

fn map_roster_error(err: RosterError) -> ApiError {
    match err {
        RosterError::DriverNotFound | RosterError::UpgradeNotFound => {
            error_response(StatusCode::NOT_FOUND, err)
        }
        RosterError::AlreadyPurchased => error_response(StatusCode::CONFLICT, err),
        RosterError::TeamFull { .. }
        | RosterError::InsufficientFunds { .. }
        | RosterError::NoDrivers => error_response(StatusCode::BAD_REQUEST, err),
    }
}
