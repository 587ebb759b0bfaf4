//! Experience (universe) lookups.
//!
//! See <https://games.roblox.com/docs>.

use std::sync::Arc;

use crate::client::ClientCore;
use crate::error::ClientError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{ApiUniverse, DataList, Id, Universe};
use crate::util::{dedup, join_csv};

/// Upstream limit on ids per `/v1/games` call.
pub const MAX_EXPERIENCE_IDS: usize = 100;

#[derive(Debug)]
pub struct Experiences<T> {
    core: Arc<ClientCore<T>>,
}

impl<T> Clone for Experiences<T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T: Transport> Experiences<T> {
    pub(crate) fn new(core: Arc<ClientCore<T>>) -> Self {
        Self { core }
    }

    /// Build the lookup URL, or `None` when there is nothing to look up.
    ///
    /// Fails with `RequestTooLarge` when more than 100 distinct ids are given.
    pub fn get_url(&self, experience_ids: &[Id]) -> Result<Option<String>, ClientError> {
        let ids = dedup(experience_ids);
        if ids.is_empty() {
            return Ok(None);
        }
        if ids.len() > MAX_EXPERIENCE_IDS {
            return Err(ClientError::RequestTooLarge {
                parameter: "experienceIds",
                limit: MAX_EXPERIENCE_IDS,
                count: ids.len(),
            });
        }
        Ok(Some(format!(
            "{}/v1/games?universeIds={}",
            self.core.config().games_base_url,
            join_csv(&ids)
        )))
    }

    /// Returns the experiences for up to 100 distinct ids, in upstream order.
    pub async fn get(&self, experience_ids: &[Id]) -> Result<Vec<Universe>, ClientError> {
        let Some(url) = self.get_url(experience_ids)? else {
            return Ok(Vec::new());
        };
        let list: DataList<ApiUniverse> = self.core.call(&url, HttpMethod::Get, None).await?;
        Ok(list.data.into_iter().map(Universe::from).collect())
    }
}
