use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::Result;
use crate::zbx_client::{Params, ZbxClient};

use super::ZbxObject;
use super::de::StrInt;

/// User group. Also used as the `usrgrps` member of a user, where only the
/// id is sent.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct UserGroup {
    #[serde(rename = "usrgrpid", skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gui_access: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_status: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<i32>,
    #[serde(rename = "userdirectoryid", skip_serializing_if = "String::is_empty")]
    pub user_directory_id: String,
}

impl ZbxObject for UserGroup {
    const API: &'static str = "usergroup";
    const IDS_FIELD: &'static str = "usrgrpids";

    fn id(&self) -> &str {
        &self.group_id
    }

    fn set_id(&mut self, id: String) {
        self.group_id = id;
    }
}

impl ZbxClient {
    /// `usergroup.get`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn user_groups_get(&self, params: Params) -> Result<Vec<UserGroup>> {
        self.get_objects(params).await
    }

    /// # Errors
    ///
    /// `ExpectedOneResult` unless exactly one group matches.
    pub async fn user_group_get_by_id(&self, id: &str) -> Result<UserGroup> {
        self.get_object_by_id(id).await
    }

    /// `usergroup.create`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn user_groups_create(&self, groups: &mut [UserGroup]) -> Result<()> {
        self.create_objects(groups).await
    }

    /// `usergroup.update`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn user_groups_update(&self, groups: &[UserGroup]) -> Result<()> {
        self.update_objects(groups).await
    }

    /// `usergroup.delete`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn user_groups_delete_by_ids(&self, ids: &[String]) -> Result<()> {
        self.delete_objects_by_ids::<UserGroup>(ids).await
    }

    /// # Errors
    ///
    /// See [`ZbxClient::user_groups_delete_by_ids`].
    pub async fn user_groups_delete(&self, groups: &mut [UserGroup]) -> Result<()> {
        self.delete_objects(groups).await
    }
}
