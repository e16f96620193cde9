use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::Result;
use crate::zbx_client::{Params, ZbxClient};

use super::ZbxObject;
use super::de::StrInt;

zbx_enum! {
    pub enum RoleType {
        User = 1 => "user",
        Admin = 2 => "admin",
        SuperAdmin = 3 => "super-admin",
    }
}

/// User role (Zabbix 5.2+).
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct Role {
    #[serde(rename = "roleid", skip_serializing_if = "String::is_empty")]
    pub role_id: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub role_type: Option<RoleType>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(rename = "readonly", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<i32>,
}

impl ZbxObject for Role {
    const API: &'static str = "role";
    const IDS_FIELD: &'static str = "roleids";

    fn id(&self) -> &str {
        &self.role_id
    }

    fn set_id(&mut self, id: String) {
        self.role_id = id;
    }
}

impl ZbxClient {
    /// `role.get`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn roles_get(&self, params: Params) -> Result<Vec<Role>> {
        self.get_objects(params).await
    }

    /// # Errors
    ///
    /// `ExpectedOneResult` unless exactly one role matches.
    pub async fn role_get_by_id(&self, id: &str) -> Result<Role> {
        self.get_object_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::{Role, RoleType};

    #[test]
    fn role_type_codes_match_zabbix() {
        assert_eq!(RoleType::User.code(), 1);
        assert_eq!(RoleType::Admin.code(), 2);
        assert_eq!(RoleType::SuperAdmin.code(), 3);
        assert_eq!(RoleType::from_code(0), None);
        assert_eq!(RoleType::from_str("Super-Admin"), Ok(RoleType::SuperAdmin));
        assert_eq!(RoleType::from_str("2"), Ok(RoleType::Admin));
        assert!(RoleType::from_str("guest").is_err());
    }

    #[test]
    fn decodes_role_row() {
        let role: Role = serde_json::from_value(json!({
            "roleid": "3",
            "name": "Super admin role",
            "type": "3",
            "readonly": "1"
        }))
        .unwrap();
        assert_eq!(role.role_type, Some(RoleType::SuperAdmin));
        assert_eq!(role.read_only, Some(1));
    }
}
