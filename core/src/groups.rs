//! Group lookups, roles, icons and name search.
//!
//! See <https://groups.roblox.com/docs>.

use std::sync::Arc;

use serde::Deserialize;

use crate::client::ClientCore;
use crate::error::ClientError;
use crate::http::HttpMethod;
use crate::thumbnails::map_thumbnails_to_images;
use crate::transport::Transport;
use crate::types::{
    ApiGroupV2, ApiPartialGroup, DataList, GroupIconSize, GroupRole, GroupV2, Id, Image, ImageType,
    PartialGroup, Thumbnail,
};
use crate::util::{dedup, encode_component, join_csv};

#[derive(Deserialize)]
struct RoleList {
    roles: Vec<GroupRole>,
}

#[derive(Debug)]
pub struct Groups<T> {
    core: Arc<ClientCore<T>>,
}

impl<T> Clone for Groups<T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T: Transport> Groups<T> {
    pub(crate) fn new(core: Arc<ClientCore<T>>) -> Self {
        Self { core }
    }

    fn groups_url(&self, path: &str) -> String {
        format!("{}/{path}", self.core.config().groups_base_url)
    }

    /// Returns the groups for the given ids.
    pub async fn get(&self, group_ids: &[Id]) -> Result<Vec<GroupV2>, ClientError> {
        let ids = dedup(group_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.groups_url(&format!("v2/groups?groupIds={}", join_csv(&ids)));
        let list: DataList<ApiGroupV2> = self.core.call(&url, HttpMethod::Get, None).await?;
        Ok(list.data.into_iter().map(GroupV2::from).collect())
    }

    /// Returns every role of one group, unmodified.
    pub async fn get_roles(&self, group_id: &Id) -> Result<Vec<GroupRole>, ClientError> {
        let url = self.groups_url(&format!(
            "v1/groups/{}/roles",
            encode_component(&group_id.to_string())
        ));
        let list: RoleList = self.core.call(&url, HttpMethod::Get, None).await?;
        Ok(list.roles)
    }

    /// Returns group icons, historically known as emblems.
    pub async fn get_icons(&self, group_ids: &[Id], size: GroupIconSize) -> Result<Vec<Image>, ClientError> {
        let ids = dedup(group_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let pixels = size.pixels();
        let url = format!(
            "{}/v1/groups/icons?groupIds={}&format=Png&size={pixels}x{pixels}&circular=false",
            self.core.config().thumbnails_base_url,
            join_csv(&ids)
        );
        let list: DataList<Thumbnail> = self.core.call(&url, HttpMethod::Get, None).await?;
        Ok(map_thumbnails_to_images(list.data, ImageType::GroupIcon, pixels))
    }

    /// Looks up groups by name. Upstream puts an exact match first; the
    /// order is returned as-is.
    pub async fn search_exact(&self, query: &str) -> Result<Vec<PartialGroup>, ClientError> {
        let url = self.groups_url(&format!(
            "v1/groups/search/lookup?groupName={}",
            encode_component(query)
        ));
        let list: DataList<ApiPartialGroup> = self.core.call(&url, HttpMethod::Get, None).await?;
        Ok(list.data.into_iter().map(PartialGroup::from).collect())
    }
}
