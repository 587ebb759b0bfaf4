//! User profiles and avatar headshots.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::ClientCore;
use crate::error::ClientError;
use crate::http::{HttpMethod, Payload};
use crate::select::select_paths;
use crate::thumbnails::map_thumbnails_to_images;
use crate::transport::Transport;
use crate::types::{AvatarHeadshotSize, DataList, Id, Image, ImageType, ProfileField, Thumbnail, UserProfile};
use crate::util::{dedup, join_csv};

const PROFILE_BASE_FIELDS: [&str; 1] = ["userId"];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDetails {
    profile_details: Vec<Value>,
}

#[derive(Debug)]
pub struct Users<T> {
    core: Arc<ClientCore<T>>,
}

impl<T> Clone for Users<T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T: Transport> Users<T> {
    pub(crate) fn new(core: Arc<ClientCore<T>>) -> Self {
        Self { core }
    }

    /// Returns profiles holding `userId` plus the requested fields.
    ///
    /// Uses an undocumented endpoint that may change without warning.
    pub async fn get_profiles(
        &self,
        user_ids: &[Id],
        fields: &[ProfileField],
    ) -> Result<Vec<UserProfile>, ClientError> {
        let ids = dedup(user_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let fields = dedup(fields);
        let payload = json!({
            "fields": fields,
            "userIds": ids,
        });

        let details: ProfileDetails = self
            .core
            .call(
                "user-profile-api/v1/user/profiles/get-profiles",
                HttpMethod::Post,
                Some(Payload::Json(payload)),
            )
            .await?;

        let selected = PROFILE_BASE_FIELDS
            .iter()
            .copied()
            .chain(fields.iter().map(|field| field.path()))
            .collect::<Vec<_>>();
        details
            .profile_details
            .iter()
            .map(|profile| {
                serde_json::from_value(select_paths(profile, selected.iter().copied()))
                    .map_err(|e| ClientError::web_request(format!("unexpected profile shape: {e}")))
            })
            .collect()
    }

    /// Returns square PNG avatar headshots, not cropped to a circle.
    pub async fn get_avatar_headshots(
        &self,
        user_ids: &[Id],
        size: AvatarHeadshotSize,
    ) -> Result<Vec<Image>, ClientError> {
        let ids = dedup(user_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let pixels = size.pixels();
        let url = format!(
            "{}/v1/users/avatar-headshot?userIds={}&format=Png&size={pixels}x{pixels}&circular=false",
            self.core.config().thumbnails_base_url,
            join_csv(&ids)
        );
        let list: DataList<Thumbnail> = self.core.call(&url, HttpMethod::Get, None).await?;
        Ok(map_thumbnails_to_images(list.data, ImageType::UserAvatarHeadshot, pixels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RobloxApiClient;
    use crate::config::ClientConfig;
    use crate::testing::{json_response, RecordingTransport};
    use crate::types::{ImageState, ProfileNames};

    fn client() -> (RobloxApiClient<Arc<RecordingTransport>>, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let client = RobloxApiClient::with_transport(ClientConfig::single_host("http://mock"), Arc::clone(&transport));
        (client, transport)
    }

    fn full_profile(user_id: u64) -> Value {
        json!({
            "userId": user_id,
            "names": {
                "alias": null,
                "username": format!("user{user_id}"),
                "contactName": null,
                "displayName": format!("User {user_id}"),
                "combinedName": format!("User {user_id}")
            },
            "platformProfileId": "ignored"
        })
    }

    #[tokio::test]
    async fn profiles_with_no_ids_make_no_call() {
        let (client, transport) = client();
        let profiles = client
            .users()
            .get_profiles(&[], &[ProfileField::NamesUsername])
            .await
            .unwrap();
        assert!(profiles.is_empty());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn profiles_post_deduplicated_body() {
        let (client, transport) = client();
        transport.push(json_response(r#"{"profileDetails":[]}"#));
        client
            .users()
            .get_profiles(
                &[Id::from(1u64), Id::from(2u64), Id::from(1u64)],
                &[ProfileField::NamesUsername, ProfileField::NamesUsername],
            )
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://mock/user-profile-api/v1/user/profiles/get-profiles");
        assert_eq!(request.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"fields": ["names.username"], "userIds": [1, 2]}));
    }

    #[tokio::test]
    async fn profiles_are_narrowed_to_requested_fields() {
        let (client, transport) = client();
        let body = json!({"profileDetails": [full_profile(2), full_profile(1)]});
        transport.push(json_response(&body.to_string()));
        let profiles = client
            .users()
            .get_profiles(&[Id::from(1u64), Id::from(2u64)], &[ProfileField::NamesDisplayName])
            .await
            .unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].user_id, 2);
        assert_eq!(
            profiles[0].names,
            Some(ProfileNames {
                display_name: Some("User 2".to_string()),
                ..ProfileNames::default()
            })
        );
        assert_eq!(profiles[0].platform_profile_id, None);
    }

    #[tokio::test]
    async fn profiles_without_fields_keep_only_user_id() {
        let (client, transport) = client();
        let body = json!({"profileDetails": [full_profile(9)]});
        transport.push(json_response(&body.to_string()));
        let profiles = client.users().get_profiles(&[Id::from(9u64)], &[]).await.unwrap();
        assert_eq!(
            profiles,
            vec![UserProfile {
                user_id: 9,
                names: None,
                platform_profile_id: None
            }]
        );
    }

    #[tokio::test]
    async fn whole_names_object_can_be_selected() {
        let (client, transport) = client();
        let body = json!({"profileDetails": [full_profile(4)]});
        transport.push(json_response(&body.to_string()));
        let profiles = client
            .users()
            .get_profiles(&[Id::from(4u64)], &[ProfileField::Names])
            .await
            .unwrap();
        let names = profiles[0].names.clone().unwrap();
        assert_eq!(names.username.as_deref(), Some("user4"));
        assert_eq!(names.alias, None);
        assert_eq!(names.combined_name.as_deref(), Some("User 4"));
    }

    #[tokio::test]
    async fn profile_failure_is_generic_request_error() {
        let (client, transport) = client();
        transport.push(json_response(r#"{"error":{"code":504}}"#));
        let err = client
            .users()
            .get_profiles(&[Id::from(1u64)], &[ProfileField::PlatformProfileId])
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::GenericRequest));
    }

    #[tokio::test]
    async fn headshots_with_no_ids_make_no_call() {
        let (client, transport) = client();
        let images = client
            .users()
            .get_avatar_headshots(&[], AvatarHeadshotSize::default())
            .await
            .unwrap();
        assert!(images.is_empty());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn headshots_map_to_images() {
        let (client, transport) = client();
        transport.push(json_response(
            r#"{"data":[{"targetId":1,"state":"Completed","imageUrl":"https://tr.rbxcdn.com/h/48/48/AvatarHeadshot/Png","version":"TN3"}]}"#,
        ));
        let images = client
            .users()
            .get_avatar_headshots(&[Id::from(1u64), Id::from(1u64)], AvatarHeadshotSize::S48)
            .await
            .unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "http://mock/v1/users/avatar-headshot?userIds=1&format=Png&size=48x48&circular=false"
        );
        assert_eq!(images[0].state, ImageState::Ready);
        assert_eq!(images[0].kind, ImageType::UserAvatarHeadshot);
        assert_eq!(images[0].url, "https://tr.rbxcdn.com/h/48/48/AvatarHeadshot/Png");
    }
}
