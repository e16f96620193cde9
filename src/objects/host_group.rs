use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::Result;
use crate::zbx_client::{Params, ZbxClient};

use super::ZbxObject;
use super::de::StrInt;

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct HostGroup {
    #[serde(rename = "groupid", skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    pub name: String,
    /// 0 for plain groups, 4 for discovered ones. Read-only.
    #[serde_as(deserialize_as = "Option<StrInt>")]
    #[serde(skip_serializing)]
    pub flags: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

impl ZbxObject for HostGroup {
    const API: &'static str = "hostgroup";
    const IDS_FIELD: &'static str = "groupids";

    fn id(&self) -> &str {
        &self.group_id
    }

    fn set_id(&mut self, id: String) {
        self.group_id = id;
    }
}

impl ZbxClient {
    /// `hostgroup.get`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn host_groups_get(&self, params: Params) -> Result<Vec<HostGroup>> {
        self.get_objects(params).await
    }

    /// # Errors
    ///
    /// `ExpectedOneResult` unless exactly one group matches.
    pub async fn host_group_get_by_id(&self, id: &str) -> Result<HostGroup> {
        self.get_object_by_id(id).await
    }

    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn host_groups_create(&self, groups: &mut [HostGroup]) -> Result<()> {
        self.create_objects(groups).await
    }

    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn host_groups_update(&self, groups: &[HostGroup]) -> Result<()> {
        self.update_objects(groups).await
    }

    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn host_groups_delete_by_ids(&self, ids: &[String]) -> Result<()> {
        self.delete_objects_by_ids::<HostGroup>(ids).await
    }

    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn host_groups_delete(&self, groups: &mut [HostGroup]) -> Result<()> {
        self.delete_objects(groups).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::HostGroup;

    #[test]
    fn discovered_flag_is_read_but_never_written() {
        let group: HostGroup = serde_json::from_value(json!({
            "groupid": "22",
            "name": "Discovered/Linux",
            "flags": "4",
            "uuid": "dc579cd7a1a34222933f24f52a68bcd8"
        }))
        .unwrap();
        assert_eq!(group.flags, Some(4));

        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({
                "groupid": "22",
                "name": "Discovered/Linux",
                "uuid": "dc579cd7a1a34222933f24f52a68bcd8"
            })
        );
    }

    #[test]
    fn create_payload_always_carries_name() {
        assert_eq!(
            serde_json::to_value(HostGroup::default()).unwrap(),
            json!({ "name": "" })
        );
    }
}
