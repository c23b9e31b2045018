// Framework bootstrap for the race server runtime.

use crate::domain::{GridRules, noise_from_seed};
use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{Garage, GarageSettings, RaceHandle, RaceSettings};

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::Mutex;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state();
    let race = state.race.clone();

    tracing::info!(%address, "listening");

    let served = axum::serve(listener, app(state)).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    });
    race.shutdown();
    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Arc<AppState> {
    let seed = config::race_seed();
    let settings = RaceSettings {
        command_channel_capacity: config::COMMAND_CHANNEL_CAPACITY,
        update_broadcast_capacity: config::UPDATE_BROADCAST_CAPACITY,
        tick_interval: config::tick_interval(),
        lap_target: config::lap_target(),
    };
    tracing::debug!(
        lap_target = settings.lap_target,
        tick_ms = settings.tick_interval.as_millis(),
        seeded = seed.is_some(),
        "race configured"
    );

    // One race loop per process; its task owns the session.
    let race = RaceHandle::spawn(settings, noise_from_seed(seed));

    let garage = Garage::new(GarageSettings {
        starting_budget: config::STARTING_BUDGET,
        market_size: config::MARKET_SIZE,
        team_name: config::TEAM_NAME.to_string(),
        team_color: config::TEAM_COLOR.to_string(),
        grid: GridRules {
            grid_size: config::GRID_SIZE,
            max_team_drivers: config::MAX_TEAM_DRIVERS,
        },
    });

    Arc::new(AppState {
        race,
        garage: Mutex::new(garage),
    })
}
