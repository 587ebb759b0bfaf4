//! Wire shapes returned by the Roblox endpoints and the stable shapes handed
//! to callers.
//!
//! # Design
//! Each upstream record has an `Api*` twin that deserializes the documented
//! camelCase fields. The stable record uses snake_case names and is produced
//! by a `From` conversion that moves every field across exactly once, so a
//! field added to one side without the other fails to compile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// A unique ID that identifies something on Roblox.
///
/// Numeric and string forms are distinct values: `1` and `"1"` do not
/// deduplicate against each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Numeric(id) => write!(f, "{id}"),
            Id::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Id::Numeric(id)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Id::Text(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Id::Text(id)
    }
}

/// A common response wrapper returned by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataList<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Group,
}

/// Represents an entity on Roblox, such as a user or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

// ---------------------------------------------------------------------------
// Thumbnails
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThumbnailState {
    Error,
    Completed,
    InReview,
    Pending,
    Blocked,
    TemporarilyUnavailable,
}

/// Raw image descriptor from the thumbnails API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub state: ThumbnailState,
    pub version: String,
    /// Empty (or null) until the thumbnail has been rendered.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    pub target_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageType {
    UserAvatarHeadshot,
    GroupIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageState {
    Ready,
    Unknown,
}

/// An image mapped from a [`Thumbnail`].
///
/// When the thumbnail has no URL yet, `url` holds a Roblox-provided fallback
/// image reflecting the thumbnail's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Usually a sub-domain of rbxcdn.com.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ImageType,
    pub state: ImageState,
    /// The requested width, not a measured one.
    pub width: u32,
    pub height: u32,
    /// The asset or entity the image was rendered for.
    pub source_id: u64,
}

/// Square sizes accepted by the avatar headshot endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvatarHeadshotSize {
    S48,
    S50,
    S60,
    S75,
    S100,
    S110,
    #[default]
    S150,
    S180,
    S352,
    S420,
    S720,
}

impl AvatarHeadshotSize {
    pub fn pixels(self) -> u32 {
        match self {
            AvatarHeadshotSize::S48 => 48,
            AvatarHeadshotSize::S50 => 50,
            AvatarHeadshotSize::S60 => 60,
            AvatarHeadshotSize::S75 => 75,
            AvatarHeadshotSize::S100 => 100,
            AvatarHeadshotSize::S110 => 110,
            AvatarHeadshotSize::S150 => 150,
            AvatarHeadshotSize::S180 => 180,
            AvatarHeadshotSize::S352 => 352,
            AvatarHeadshotSize::S420 => 420,
            AvatarHeadshotSize::S720 => 720,
        }
    }
}

/// Square sizes accepted by the group icon endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupIconSize {
    #[default]
    S150,
    S420,
}

impl GroupIconSize {
    pub fn pixels(self) -> u32 {
        match self {
            GroupIconSize::S150 => 150,
            GroupIconSize::S420 => 420,
        }
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGroupV2 {
    pub id: u64,
    pub name: String,
    pub owner: Option<Entity>,
    pub created: String,
    pub description: String,
    pub has_verified_badge: bool,
}

/// A mini-community within Roblox for communication, discussions, and more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupV2 {
    pub id: u64,
    /// At most 50 characters.
    pub display_name: String,
    /// Always a user; `None` when the group has no owner.
    pub owner: Option<Entity>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    pub description: String,
    pub is_verified: bool,
}

impl From<ApiGroupV2> for GroupV2 {
    fn from(group: ApiGroupV2) -> Self {
        Self {
            id: group.id,
            owner: group.owner,
            created_at: group.created,
            description: group.description,
            display_name: group.name,
            is_verified: group.has_verified_badge,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPartialGroup {
    pub id: u64,
    pub name: String,
    pub member_count: u64,
    pub has_verified_badge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialGroup {
    pub id: u64,
    pub display_name: String,
    pub member_count: u64,
    pub is_verified: bool,
}

impl From<ApiPartialGroup> for PartialGroup {
    fn from(group: ApiPartialGroup) -> Self {
        Self {
            id: group.id,
            display_name: group.name,
            member_count: group.member_count,
            is_verified: group.has_verified_badge,
        }
    }
}

/// A configurable set of privileges for members within a group. Passed
/// through exactly as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRole {
    pub id: u64,
    /// At most 100 characters.
    pub name: String,
    pub rank: u8,
    pub member_count: u64,
}

// ---------------------------------------------------------------------------
// Experiences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUniverse {
    pub id: u64,
    pub root_place_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub source_name: String,
    pub source_description: Option<String>,
    pub creator: Entity,
    pub price: Option<u64>,
    pub allowed_gear_genres: Vec<String>,
    pub allowed_gear_categories: Vec<String>,
    pub is_genre_enforced: bool,
    pub copying_allowed: bool,
    pub playing: u64,
    pub visits: u64,
    pub max_players: u32,
    pub created: String,
    pub updated: String,
    pub studio_access_to_apis_allowed: bool,
    pub create_vip_servers_allowed: bool,
    pub genre: String,
    pub is_all_genre: bool,
    pub is_favorited_by_user: bool,
    pub favorited_count: u64,
}

/// A published experience, composed of one or more places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub id: u64,
    /// The name as entered by the creator, before localization.
    pub name: String,
    pub genre: String,
    pub owner: Entity,
    pub created_at: String,
    pub updated_at: String,
    pub visit_count: u64,
    pub is_copyable: bool,
    pub description: Option<String>,
    /// The localized name shown to the requesting user.
    pub display_name: String,
    pub player_count: u64,
    pub is_all_genres: bool,
    pub root_place_id: u64,
    pub is_favourited: bool,
    pub user_entry_price: Option<u64>,
    pub is_genre_enforced: bool,
    pub display_description: Option<String>,
    pub allowed_gear_genres: Vec<String>,
    pub user_favourite_count: u64,
    pub max_server_player_count: u32,
    pub allowed_gear_categories: Vec<String>,
    pub private_servers_enabled: bool,
    pub is_apis_enabled_in_studio: bool,
}

impl From<ApiUniverse> for Universe {
    fn from(universe: ApiUniverse) -> Self {
        Self {
            id: universe.id,
            name: universe.source_name,
            genre: universe.genre,
            owner: universe.creator,
            created_at: universe.created,
            updated_at: universe.updated,
            visit_count: universe.visits,
            is_copyable: universe.copying_allowed,
            description: universe.source_description,
            display_name: universe.name,
            player_count: universe.playing,
            is_all_genres: universe.is_all_genre,
            root_place_id: universe.root_place_id,
            is_favourited: universe.is_favorited_by_user,
            user_entry_price: universe.price,
            is_genre_enforced: universe.is_genre_enforced,
            display_description: universe.description,
            allowed_gear_genres: universe.allowed_gear_genres,
            user_favourite_count: universe.favorited_count,
            max_server_player_count: universe.max_players,
            allowed_gear_categories: universe.allowed_gear_categories,
            private_servers_enabled: universe.create_vip_servers_allowed,
            is_apis_enabled_in_studio: universe.studio_access_to_apis_allowed,
        }
    }
}

// ---------------------------------------------------------------------------
// User profiles
// ---------------------------------------------------------------------------

/// A selectable path into the user profile schema.
///
/// Only plain dot-separated property access is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Names,
    NamesAlias,
    NamesUsername,
    NamesContactName,
    NamesDisplayName,
    NamesCombinedName,
    /// Requesting this currently makes the upstream endpoint fail.
    PlatformProfileId,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Names,
        ProfileField::NamesAlias,
        ProfileField::NamesUsername,
        ProfileField::NamesContactName,
        ProfileField::NamesDisplayName,
        ProfileField::NamesCombinedName,
        ProfileField::PlatformProfileId,
    ];

    pub fn path(self) -> &'static str {
        match self {
            ProfileField::Names => "names",
            ProfileField::NamesAlias => "names.alias",
            ProfileField::NamesUsername => "names.username",
            ProfileField::NamesContactName => "names.contactName",
            ProfileField::NamesDisplayName => "names.displayName",
            ProfileField::NamesCombinedName => "names.combinedName",
            ProfileField::PlatformProfileId => "platformProfileId",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ProfileField {
    type Err = ClientError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.path() == path)
            .ok_or_else(|| ClientError::UnknownField {
                path: path.to_string(),
            })
    }
}

impl Serialize for ProfileField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

/// Name fields of a profile. A field is `None` when it was not requested or
/// when upstream returned null for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ProfileNames {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub combined_name: Option<String>,
}

/// A user profile holding the base `user_id` plus whichever fields were
/// requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct UserProfile {
    pub user_id: u64,
    #[serde(default)]
    pub names: Option<ProfileNames>,
    #[serde(default)]
    pub platform_profile_id: Option<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
