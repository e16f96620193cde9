use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::Result;
use crate::zbx_client::{Params, ZbxClient};

use super::ZbxObject;
use super::de::StrInt;
use super::user_group::UserGroup;

zbx_enum! {
    /// Legacy user type, replaced by roles in Zabbix 5.2.
    pub enum UserType {
        User = 0 => "user",
        Admin = 1 => "admin",
        SuperAdmin = 2 => "super-admin",
    }
}

zbx_enum! {
    pub enum MediaStatus {
        Active = 0 => "active",
        Disabled = 1 => "disabled",
    }
}

/// User object, see `user/object` in the Zabbix API reference.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "userid", skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub surname: String,
    #[serde(rename = "passwd", skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(rename = "current_passwd", skip_serializing_if = "String::is_empty")]
    pub current_password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autologin: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub autologout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub refresh: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub theme: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_failed: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub attempt_ip: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_clock: Option<i64>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timezone: String,
    #[serde(rename = "roleid", skip_serializing_if = "String::is_empty")]
    pub role_id: String,
    #[serde(rename = "userdirectoryid", skip_serializing_if = "String::is_empty")]
    pub user_directory_id: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_provisioned: Option<i64>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub medias: Vec<Media>,
    #[serde(rename = "usrgrps", skip_serializing_if = "Vec::is_empty")]
    pub user_groups: Vec<UserGroup>,

    /// Pre-5.4 login name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alias: String,
    /// Pre-5.2 user type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

/// Recipient of a user media. Email media take a list of addresses, every
/// other media type a single string.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SendTo {
    One(String),
    Many(Vec<String>),
}

impl Default for SendTo {
    fn default() -> Self {
        Self::One(String::new())
    }
}

impl From<&str> for SendTo {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for SendTo {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

/// User media, see `user/object#media`.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Media {
    #[serde(rename = "mediaid", skip_serializing_if = "String::is_empty")]
    pub media_id: String,
    #[serde(rename = "mediatypeid")]
    pub media_type_id: String,
    #[serde(rename = "sendto")]
    pub send_to: SendTo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<MediaStatus>,
    /// Bitmask of trigger severities, 63 selects all of them.
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub period: String,
    #[serde(rename = "userdirectory_mediaid", skip_serializing_if = "String::is_empty")]
    pub user_directory_media_id: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned: Option<i32>,
}

impl ZbxObject for User {
    const API: &'static str = "user";
    const IDS_FIELD: &'static str = "userids";

    fn id(&self) -> &str {
        &self.user_id
    }

    fn set_id(&mut self, id: String) {
        self.user_id = id;
    }
}

impl ZbxClient {
    /// `user.get`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn users_get(&self, params: Params) -> Result<Vec<User>> {
        self.get_objects(params).await
    }

    /// Fetch the user with the given id.
    ///
    /// # Errors
    ///
    /// `ExpectedOneResult` unless exactly one user matches.
    pub async fn user_get_by_id(&self, id: &str) -> Result<User> {
        self.get_object_by_id(id).await
    }

    /// `user.create`; assigns the new ids to `users` in order.
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or `ExpectedMore` when the server
    /// returns a different number of ids.
    pub async fn users_create(&self, users: &mut [User]) -> Result<()> {
        self.create_objects(users).await
    }

    /// `user.update`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn users_update(&self, users: &[User]) -> Result<()> {
        self.update_objects(users).await
    }

    /// `user.delete`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or `ExpectedMore` when fewer users
    /// were deleted than requested.
    pub async fn users_delete_by_ids(&self, ids: &[String]) -> Result<()> {
        self.delete_objects_by_ids::<User>(ids).await
    }

    /// Delete `users` by id and clear their ids.
    ///
    /// # Errors
    ///
    /// See [`ZbxClient::users_delete_by_ids`].
    pub async fn users_delete(&self, users: &mut [User]) -> Result<()> {
        self.delete_objects(users).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Media, MediaStatus, SendTo, User, UserType};
    use crate::objects::UserGroup;

    #[test]
    fn decodes_user_get_row_with_string_numbers() {
        let user: User = serde_json::from_value(json!({
            "userid": "1",
            "username": "Admin",
            "name": "Zabbix",
            "surname": "Administrator",
            "url": "",
            "autologin": "1",
            "autologout": "0",
            "lang": "default",
            "refresh": "30s",
            "theme": "default",
            "attempt_failed": "0",
            "attempt_ip": "",
            "attempt_clock": "0",
            "rows_per_page": "50",
            "timezone": "system",
            "roleid": "3",
            "userdirectoryid": "0",
            "ts_provisioned": "0",
            "medias": [
                {
                    "mediaid": "1",
                    "mediatypeid": "1",
                    "sendto": ["admin@example.com"],
                    "active": "0",
                    "severity": "63",
                    "period": "1-7,00:00-24:00"
                }
            ]
        }))
        .unwrap();

        assert_eq!(user.user_id, "1");
        assert_eq!(user.autologin, Some(1));
        assert_eq!(user.rows_per_page, Some(50));
        assert_eq!(user.role_id, "3");
        assert_eq!(user.medias.len(), 1);
        let media = &user.medias[0];
        assert_eq!(media.active, Some(MediaStatus::Active));
        assert_eq!(media.severity, Some(63));
        assert_eq!(
            media.send_to,
            SendTo::Many(vec!["admin@example.com".to_string()])
        );
    }

    #[test]
    fn create_payload_omits_unset_members() {
        let user = User {
            username: "jdoe".to_string(),
            password: "S3cure-pass!".to_string(),
            role_id: "1".to_string(),
            user_groups: vec![UserGroup {
                group_id: "7".to_string(),
                ..UserGroup::default()
            }],
            medias: vec![Media {
                media_type_id: "3".to_string(),
                send_to: SendTo::from("+15550100"),
                active: Some(MediaStatus::Active),
                ..Media::default()
            }],
            ..User::default()
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({
                "username": "jdoe",
                "passwd": "S3cure-pass!",
                "roleid": "1",
                "usrgrps": [{ "usrgrpid": "7" }],
                "medias": [
                    { "mediatypeid": "3", "sendto": "+15550100", "active": "0" }
                ]
            })
        );
    }

    #[test]
    fn legacy_user_type_round_trips_through_codes() {
        assert_eq!(UserType::User.code(), 0);
        assert_eq!(UserType::Admin.code(), 1);
        assert_eq!(UserType::SuperAdmin.code(), 2);
        assert_eq!(MediaStatus::Active.code(), 0);
        assert_eq!(MediaStatus::Disabled.code(), 1);

        let user: User = serde_json::from_value(json!({ "alias": "guest", "type": 0 })).unwrap();
        assert_eq!(user.user_type, Some(UserType::User));
        assert!(serde_json::from_value::<User>(json!({ "type": "9" })).is_err());
    }
}
