//! HTTP API for the team randomizer.
//!
//! This module provides the REST API endpoints for:
//! - Health monitoring
//! - Mode listing
//! - Lobby generation and hero rerolls
//! - Portrait thumbnails

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::randomizer::{Mode, Role, SlotCount};
use crate::service::RandomizerService;

pub mod generate;
pub mod portraits;
use generate::{characters_handler, generate_handler};
use portraits::portrait_handler;

/// Application state
pub struct AppState {
    pub service: Arc<RandomizerService>,
    pub start_time: Instant,
}

/// Build the API router
pub fn router(service: Arc<RandomizerService>) -> Router {
    let state = Arc::new(AppState {
        service,
        start_time: Instant::now(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/modes", get(modes_handler))
        .route("/generate", post(generate_handler))
        .route("/characters", post(characters_handler))
        .route("/portraits/{key}", get(portrait_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// === Health ===

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
}

// === Modes ===

#[derive(Serialize)]
struct ModesResponse {
    modes: Vec<ModeDto>,
    custom_slot_range: SlotRange,
}

#[derive(Serialize)]
struct ModeDto {
    name: String,
    /// `None` for modes where the player picks the count
    slot_count: Option<usize>,
    restricted: bool,
    quota: Vec<QuotaEntry>,
    /// Slots reserved by the quota; the rest are filled at random
    quota_total: usize,
}

#[derive(Serialize)]
struct QuotaEntry {
    role: Role,
    count: usize,
}

#[derive(Serialize)]
struct SlotRange {
    min: usize,
    max: usize,
}

async fn modes_handler(State(state): State<Arc<AppState>>) -> Json<ModesResponse> {
    let table = &state.service.modes;
    let modes = Mode::ALL
        .into_iter()
        .map(|mode| {
            let quota = table.quota(mode);
            ModeDto {
                name: mode.to_string(),
                slot_count: mode.fixed_slot_count().map(SlotCount::get),
                restricted: mode.is_restricted(),
                quota: quota
                    .entries()
                    .iter()
                    .map(|(role, count)| QuotaEntry {
                        role: *role,
                        count: *count,
                    })
                    .collect(),
                quota_total: quota.total(),
            }
        })
        .collect();

    Json(ModesResponse {
        modes,
        custom_slot_range: SlotRange {
            min: SlotCount::MIN,
            max: SlotCount::MAX,
        },
    })
}
