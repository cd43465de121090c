//! JSON request/response shapes for the HTTP API. No business logic lives
//! here — only the wire format, kept separate from the domain types so
//! the core crate stays free of serde-for-HTTP concerns.

use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct MapSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RoadDto {
    pub x0: i32,
    pub y0: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BuildingDto {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Serialize)]
pub struct OfficeDto {
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "offsetX")]
    pub offset_x: i32,
    #[serde(rename = "offsetY")]
    pub offset_y: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDetail {
    pub id: String,
    pub name: String,
    pub roads: Vec<RoadDto>,
    pub buildings: Vec<BuildingDto>,
    pub offices: Vec<OfficeDto>,
    pub loot_types: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub user_name: String,
    pub map_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub auth_token: String,
    pub player_id: u64,
}

#[derive(Debug, Serialize)]
pub struct PlayerName {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlayersResponse(pub HashMap<String, PlayerName>);

#[derive(Debug, Serialize)]
pub struct BagItemDto {
    pub id: usize,
    #[serde(rename = "type")]
    pub loot_type: i64,
}

#[derive(Debug, Serialize)]
pub struct PlayerState {
    pub pos: [f64; 2],
    pub speed: [f64; 2],
    pub dir: String,
    pub bag: Vec<BagItemDto>,
    pub score: u64,
}

#[derive(Debug, Serialize)]
pub struct LostObjectState {
    #[serde(rename = "type")]
    pub loot_type: i64,
    pub pos: [f64; 2],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub players: HashMap<String, PlayerState>,
    pub lost_objects: HashMap<String, LostObjectState>,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "move")]
    pub r#move: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickRequest {
    pub time_delta: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEntry {
    pub name: String,
    pub score: u64,
    pub play_time: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
