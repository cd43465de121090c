//! Endpoint handlers. Each one locks `AppState::core` for the shortest
//! span that correctness allows, then releases it before touching the
//! (async) leaderboard sink.

use crate::auth::BearerToken;
use crate::errors::ApiError;
use crate::errors::bad_request_body;
use crate::state::AppState;
use actix_web::HttpResponse;
use actix_web::web;
use packfinder_core::Error;
use packfinder_core::MapId;
use packfinder_dto::ActionRequest;
use packfinder_dto::BagItemDto;
use packfinder_dto::BuildingDto;
use packfinder_dto::JoinRequest;
use packfinder_dto::JoinResponse;
use packfinder_dto::LostObjectState;
use packfinder_dto::MapDetail;
use packfinder_dto::MapSummary;
use packfinder_dto::OfficeDto;
use packfinder_dto::PlayerName;
use packfinder_dto::PlayerState;
use packfinder_dto::PlayersResponse;
use packfinder_dto::RecordEntry;
use packfinder_dto::RoadDto;
use packfinder_dto::StateResponse;
use packfinder_dto::TickRequest;
use packfinder_world::geometry::Road;
use std::collections::HashMap;

pub async fn list_maps(state: web::Data<AppState>) -> HttpResponse {
    let core = state.core.lock().await;
    let maps: Vec<MapSummary> = core
        .manager
        .catalog()
        .iter()
        .map(|m| MapSummary {
            id: m.id().as_str().to_owned(),
            name: m.name().to_owned(),
        })
        .collect();
    HttpResponse::Ok().json(maps)
}

pub async fn get_map(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let map_id = MapId::new(path.into_inner());
    let core = state.core.lock().await;
    let map = core
        .manager
        .catalog()
        .find(&map_id)
        .ok_or_else(|| Error::MapNotFound(map_id.to_string()))?;

    let roads = map
        .roads()
        .iter()
        .map(|r| match *r {
            Road::Horizontal { y, x0, x1 } => RoadDto {
                x0,
                y0: y,
                x1: Some(x1),
                y1: None,
            },
            Road::Vertical { x, y0, y1 } => RoadDto {
                x0: x,
                y0,
                x1: None,
                y1: Some(y1),
            },
        })
        .collect();
    let buildings = map
        .buildings()
        .iter()
        .map(|b| BuildingDto {
            x: b.position.x,
            y: b.position.y,
            w: b.width,
            h: b.height,
        })
        .collect();
    let offices = map
        .offices()
        .iter()
        .map(|o| OfficeDto {
            id: o.id.to_string(),
            x: o.position.x,
            y: o.position.y,
            offset_x: o.offset.0,
            offset_y: o.offset.1,
        })
        .collect();
    let loot_types = core
        .manager
        .catalog()
        .loot_types(&map_id)
        .iter()
        .map(|lt| lt.raw.clone())
        .collect();

    Ok(HttpResponse::Ok().json(MapDetail {
        id: map.id().as_str().to_owned(),
        name: map.name().to_owned(),
        roads,
        buildings,
        offices,
        loot_types,
    }))
}

pub async fn join(
    state: web::Data<AppState>,
    body: web::Json<JoinRequest>,
) -> Result<HttpResponse, ApiError> {
    let map_id = MapId::new(body.map_id.clone());
    let mut core = state.core.lock().await;
    let (token, dog_id) = core.manager.join(&body.user_name, &map_id)?;
    Ok(HttpResponse::Ok().json(JoinResponse {
        auth_token: token.as_str().to_owned(),
        player_id: dog_id.value(),
    }))
}

pub async fn players(
    state: web::Data<AppState>,
    auth: BearerToken,
) -> Result<HttpResponse, ApiError> {
    let core = state.core.lock().await;
    let player = core.manager.find_player(&auth.0).ok_or(Error::UnknownToken)?;
    let map_id = player.map_id.clone();
    let session = core.manager.session(&map_id).ok_or(Error::UnknownToken)?;
    let mut out = HashMap::new();
    for dog in session.dogs() {
        out.insert(
            dog.id().value().to_string(),
            PlayerName { name: dog.name().to_owned() },
        );
    }
    Ok(HttpResponse::Ok().json(PlayersResponse(out)))
}

pub async fn state(
    state: web::Data<AppState>,
    auth: BearerToken,
) -> Result<HttpResponse, ApiError> {
    let core = state.core.lock().await;
    let player = core.manager.find_player(&auth.0).ok_or(Error::UnknownToken)?;
    let map_id = player.map_id.clone();
    let session = core.manager.session(&map_id).ok_or(Error::UnknownToken)?;

    let mut players = HashMap::new();
    for dog in session.dogs() {
        let (sx, sy) = dog.speed();
        let pos = dog.position();
        players.insert(
            dog.id().value().to_string(),
            PlayerState {
                pos: [pos.x, pos.y],
                speed: [sx, sy],
                dir: dog.direction().to_command().to_owned(),
                bag: dog
                    .bag()
                    .iter()
                    .map(|b| BagItemDto { id: b.id, loot_type: b.loot_type })
                    .collect(),
                score: dog.score(),
            },
        );
    }
    let mut lost_objects = HashMap::new();
    for (idx, obj) in session.lost_objects().iter().enumerate() {
        lost_objects.insert(
            idx.to_string(),
            LostObjectState {
                loot_type: obj.loot_type,
                pos: [obj.position.x, obj.position.y],
            },
        );
    }
    Ok(HttpResponse::Ok().json(StateResponse { players, lost_objects }))
}

pub async fn player_action(
    state: web::Data<AppState>,
    auth: BearerToken,
    body: web::Json<ActionRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut core = state.core.lock().await;
    core.manager.set_move(&auth.0, &body.r#move)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

pub async fn tick(
    state: web::Data<AppState>,
    body: web::Json<TickRequest>,
) -> Result<HttpResponse, ApiError> {
    if !state.manual_tick_allowed {
        return Ok(bad_request_body(
            "manual ticking is disabled; the server is running with --tick-period",
        ));
    }
    if body.time_delta < 0 {
        return Ok(bad_request_body("timeDelta must not be negative"));
    }
    let mut core = state.core.lock().await;
    let dt_ms = body.time_delta as u64;
    core.manager.tick(dt_ms, state.leaderboard.as_ref()).await?;
    core.listener.on_tick(dt_ms, &core.manager);
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

#[derive(serde::Deserialize)]
pub struct RecordsQuery {
    #[serde(default)]
    pub start: usize,
    #[serde(default = "default_max_items", rename = "maxItems")]
    pub max_items: usize,
}

fn default_max_items() -> usize {
    100
}

pub async fn records(
    state: web::Data<AppState>,
    query: web::Query<RecordsQuery>,
) -> Result<HttpResponse, ApiError> {
    const HARD_MAX: usize = 100;
    if query.max_items > HARD_MAX {
        return Err(Error::InvalidAction(format!("maxItems must not exceed {HARD_MAX}")).into());
    }
    let rows = state.leaderboard.get(query.start, query.max_items).await?;
    let out: Vec<RecordEntry> = rows
        .into_iter()
        .map(|r| RecordEntry {
            name: r.name,
            score: r.score,
            play_time: r.play_time_seconds,
        })
        .collect();
    Ok(HttpResponse::Ok().json(out))
}
