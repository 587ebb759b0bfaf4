//! Deterministic stand-in for the Roblox endpoints the client consumes.
//!
//! Every route answers from generated fixtures keyed by id, so tests can
//! predict responses without shared data files. Id `0` ([`FAILING_ID`]) or a
//! non-numeric id makes any endpoint answer with an `{"error": ...}` body.
//! All requests are recorded in [`MockState`].

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

/// Any request naming this id fails.
pub const FAILING_ID: u64 = 0;

pub const AVATAR_HEADSHOT_SIZES: [u32; 11] = [48, 50, 60, 75, 100, 110, 150, 180, 352, 420, 720];
pub const GROUP_ICON_SIZES: [u32; 2] = [150, 420];

type Reply = (StatusCode, Json<Value>);

/// Records the path and query of every request the app receives.
#[derive(Clone, Debug, Default)]
pub struct MockState {
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockState {
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

pub fn app() -> Router {
    app_with_state(MockState::default())
}

pub fn app_with_state(state: MockState) -> Router {
    Router::new()
        .route("/v1/games", get(get_games))
        .route("/v2/groups", get(get_groups))
        .route("/v1/groups/{id}/roles", get(get_group_roles))
        .route("/v1/groups/icons", get(get_group_icons))
        .route("/v1/groups/search/lookup", get(search_groups))
        .route("/v1/users/avatar-headshot", get(get_avatar_headshots))
        .route("/user-profile-api/v1/user/profiles/get-profiles", post(get_profiles))
        .layer(middleware::from_fn_with_state(state, record))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn record(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_default();
    debug!(method = %request.method(), %uri, "mock request");
    state.requests.write().await.push(uri);
    next.run(request).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn universe(id: u64) -> Value {
    let creator_type = if id % 2 == 0 { "Group" } else { "User" };
    let price = if id % 3 == 0 { Value::from(25) } else { Value::Null };
    json!({
        "id": id,
        "rootPlaceId": id * 10,
        "name": format!("Experience {id}"),
        "description": format!("Localized description {id}"),
        "sourceName": format!("experience_{id}"),
        "sourceDescription": format!("Description {id}"),
        "creator": {
            "id": 1000 + id,
            "name": format!("creator{id}"),
            "type": creator_type,
            "isRNVAccount": false,
            "hasVerifiedBadge": false
        },
        "price": price,
        "allowedGearGenres": ["All"],
        "allowedGearCategories": [],
        "isGenreEnforced": false,
        "copyingAllowed": id % 2 == 1,
        "playing": id * 3,
        "visits": id * 1000,
        "maxPlayers": 30,
        "created": "2020-01-01T00:00:00.000Z",
        "updated": "2024-06-01T12:00:00.000Z",
        "studioAccessToApisAllowed": true,
        "createVipServersAllowed": false,
        "universeAvatarType": "MorphToR15",
        "genre": "All",
        "isAllGenre": true,
        "isFavoritedByUser": false,
        "favoritedCount": id * 7
    })
}

/// Groups whose id is a multiple of 5 have no owner.
pub fn group(id: u64) -> Value {
    let owner = if id % 5 == 0 {
        Value::Null
    } else {
        json!({"id": 2000 + id, "type": "User"})
    };
    json!({
        "id": id,
        "name": format!("Group {id}"),
        "description": format!("About group {id}"),
        "owner": owner,
        "created": "2018-03-04T05:06:07.000Z",
        "hasVerifiedBadge": id % 2 == 0
    })
}

pub fn roles(group_id: u64) -> Value {
    json!({
        "groupId": group_id,
        "roles": [
            {"id": group_id * 10, "name": "Guest", "rank": 0, "memberCount": 0},
            {"id": group_id * 10 + 1, "name": "Member", "rank": 1, "memberCount": group_id * 4},
            {"id": group_id * 10 + 2, "name": "Owner", "rank": 255, "memberCount": 1}
        ]
    })
}

/// `id % 3`: 0 Blocked, 1 Completed, 2 Pending. Only Completed has a URL.
pub fn thumbnail(kind: &str, id: u64, size: u32) -> Value {
    let (state, url) = match id % 3 {
        0 => ("Blocked", String::new()),
        1 => (
            "Completed",
            format!("https://tr.rbxcdn.com/mock/{kind}/{id}/{size}/{size}/Png"),
        ),
        _ => ("Pending", String::new()),
    };
    json!({"targetId": id, "state": state, "imageUrl": url, "version": "TN3"})
}

pub fn profile(user_id: u64) -> Value {
    json!({
        "userId": user_id,
        "names": {
            "alias": null,
            "username": format!("user{user_id}"),
            "contactName": null,
            "displayName": format!("User {user_id}"),
            "combinedName": format!("User {user_id}")
        },
        "platformProfileId": null
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn failure(message: impl Into<String>) -> Reply {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": {"code": 1, "message": message.into()}})),
    )
}

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn parse_id(raw: &str) -> Result<u64, Reply> {
    match raw.trim().parse::<u64>() {
        Ok(FAILING_ID) => Err(failure(format!("id {FAILING_ID} is invalid"))),
        Ok(id) => Ok(id),
        Err(_) => Err(failure(format!("'{raw}' is not a valid id"))),
    }
}

fn parse_ids(params: &HashMap<String, String>, key: &str) -> Result<Vec<u64>, Reply> {
    let raw = params
        .get(key)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| failure(format!("{key} is required")))?;
    raw.split(',').map(parse_id).collect()
}

fn parse_size(params: &HashMap<String, String>, allowed: &[u32]) -> Result<u32, Reply> {
    let raw = params.get("size").map(String::as_str).unwrap_or("150x150");
    let size = raw
        .split_once('x')
        .filter(|(w, h)| w == h)
        .and_then(|(w, _)| w.parse::<u32>().ok())
        .filter(|size| allowed.contains(size));
    size.ok_or_else(|| failure(format!("size {raw} is not supported")))
}

fn data_list(items: Vec<Value>) -> Reply {
    ok(json!({"data": items}))
}

async fn get_games(Query(params): Query<HashMap<String, String>>) -> Reply {
    match parse_ids(&params, "universeIds") {
        Ok(ids) if ids.len() > 100 => failure("too many ids"),
        Ok(ids) => data_list(ids.into_iter().map(universe).collect()),
        Err(reply) => reply,
    }
}

async fn get_groups(Query(params): Query<HashMap<String, String>>) -> Reply {
    match parse_ids(&params, "groupIds") {
        Ok(ids) => data_list(ids.into_iter().map(group).collect()),
        Err(reply) => reply,
    }
}

async fn get_group_roles(Path(id): Path<String>) -> Reply {
    match parse_id(&id) {
        Ok(id) => ok(roles(id)),
        Err(reply) => reply,
    }
}

fn thumbnails(params: &HashMap<String, String>, ids_key: &str, kind: &str, allowed: &[u32]) -> Reply {
    if params.get("format").map(String::as_str) != Some("Png") {
        return failure("format must be Png");
    }
    let size = match parse_size(params, allowed) {
        Ok(size) => size,
        Err(reply) => return reply,
    };
    match parse_ids(params, ids_key) {
        Ok(ids) => data_list(ids.into_iter().map(|id| thumbnail(kind, id, size)).collect()),
        Err(reply) => reply,
    }
}

async fn get_group_icons(Query(params): Query<HashMap<String, String>>) -> Reply {
    thumbnails(&params, "groupIds", "GroupIcon", &GROUP_ICON_SIZES)
}

async fn get_avatar_headshots(Query(params): Query<HashMap<String, String>>) -> Reply {
    thumbnails(&params, "userIds", "AvatarHeadshot", &AVATAR_HEADSHOT_SIZES)
}

/// The exact match comes first, followed by a looser one.
async fn search_groups(Query(params): Query<HashMap<String, String>>) -> Reply {
    let name = params.get("groupName").map(String::as_str).unwrap_or_default();
    if name.is_empty() {
        return failure("groupName is required");
    }
    data_list(vec![
        json!({"id": 1, "name": name, "memberCount": 100, "hasVerifiedBadge": true}),
        json!({"id": 2, "name": format!("{name} Fans"), "memberCount": 5, "hasVerifiedBadge": false}),
    ])
}

/// Answers with every profile field regardless of the requested ones.
async fn get_profiles(Json(body): Json<Value>) -> Reply {
    let Some(user_ids) = body.get("userIds").and_then(Value::as_array) else {
        return failure("userIds is required");
    };
    let mut profiles = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        let raw = match user_id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        };
        match parse_id(&raw) {
            Ok(id) => profiles.push(profile(id)),
            Err(reply) => return reply,
        }
    }
    ok(json!({"profileDetails": profiles}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_states_cycle_by_id() {
        assert_eq!(thumbnail("GroupIcon", 3, 150)["state"], "Blocked");
        assert_eq!(thumbnail("GroupIcon", 4, 150)["state"], "Completed");
        assert_eq!(thumbnail("GroupIcon", 5, 150)["imageUrl"], "");
        assert_eq!(
            thumbnail("GroupIcon", 4, 150)["imageUrl"],
            "https://tr.rbxcdn.com/mock/GroupIcon/4/150/150/Png"
        );
    }

    #[test]
    fn every_fifth_group_is_ownerless() {
        assert!(group(10)["owner"].is_null());
        assert_eq!(group(11)["owner"]["id"], 2011);
    }

    #[test]
    fn failing_and_non_numeric_ids_are_rejected() {
        assert!(parse_id("0").is_err());
        assert!(parse_id("abc").is_err());
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn size_must_be_square_and_allowed() {
        let params = |size: &str| HashMap::from([("size".to_string(), size.to_string())]);
        assert_eq!(parse_size(&params("420x420"), &GROUP_ICON_SIZES).unwrap(), 420);
        assert!(parse_size(&params("48x48"), &GROUP_ICON_SIZES).is_err());
        assert!(parse_size(&params("150x420"), &GROUP_ICON_SIZES).is_err());
        assert!(parse_size(&params("big"), &AVATAR_HEADSHOT_SIZES).is_err());
    }

    #[test]
    fn profile_has_every_field() {
        let value = profile(7);
        assert_eq!(value["userId"], 7);
        assert_eq!(value["names"]["username"], "user7");
        assert!(value["names"]["alias"].is_null());
        assert!(value.get("platformProfileId").is_some());
    }
}
