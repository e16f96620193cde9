use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::Result;
use crate::zbx_client::{Params, ZbxClient};

use super::ZbxObject;
use super::de::StrInt;

zbx_enum! {
    pub enum MediaTypeKind {
        Email = 0 => "email",
        Script = 1 => "script",
        Sms = 2 => "sms",
        Webhook = 4 => "webhook",
    }
}

/// Media type object.
///
/// Zabbix 7.0 renamed `content_type` to `message_format`. Both members are
/// kept; [`MediaType::message_format`] and [`MediaType::set_message_format`]
/// work against either server generation.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct MediaType {
    #[serde(rename = "mediatypeid", skip_serializing_if = "String::is_empty")]
    pub media_type_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaTypeKind>,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_server: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_helo: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_email: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_authentication: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(rename = "maxsessions", skip_serializing_if = "Option::is_none")]
    pub max_sessions: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(rename = "maxattempts", skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub attempt_interval: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(rename = "message_format", skip_serializing_if = "Option::is_none")]
    pub message_format_code: Option<i32>,
    /// Zabbix 6.4 and earlier.
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_tags: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_event_menu: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event_menu_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event_menu_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<i32>,

    // OAuth, used by the Gmail and Office365 providers.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirection_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub authorization_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token_url: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_status: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_token: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_updated: Option<i64>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_expires_in: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,
}

impl MediaType {
    /// Message format, preferring `message_format` over the legacy
    /// `content_type`. Zero when neither is set.
    #[must_use]
    pub fn message_format(&self) -> i32 {
        self.message_format_code
            .filter(|code| *code != 0)
            .or(self.content_type)
            .unwrap_or_default()
    }

    /// Set both `message_format` and `content_type`.
    pub const fn set_message_format(&mut self, format: i32) {
        self.message_format_code = Some(format);
        self.content_type = Some(format);
    }
}

impl ZbxObject for MediaType {
    const API: &'static str = "mediatype";
    const IDS_FIELD: &'static str = "mediatypeids";

    fn id(&self) -> &str {
        &self.media_type_id
    }

    fn set_id(&mut self, id: String) {
        self.media_type_id = id;
    }
}

impl ZbxClient {
    /// `mediatype.get`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn media_types_get(&self, params: Params) -> Result<Vec<MediaType>> {
        self.get_objects(params).await
    }

    /// # Errors
    ///
    /// `ExpectedOneResult` unless exactly one media type matches.
    pub async fn media_type_get_by_id(&self, id: &str) -> Result<MediaType> {
        self.get_object_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{MediaType, MediaTypeKind};

    #[test]
    fn message_format_falls_back_to_content_type() {
        let legacy: MediaType = serde_json::from_value(json!({
            "mediatypeid": "1",
            "type": "0",
            "name": "Email",
            "content_type": "1"
        }))
        .unwrap();
        assert_eq!(legacy.kind, Some(MediaTypeKind::Email));
        assert_eq!(legacy.message_format(), 1);

        let current: MediaType = serde_json::from_value(json!({
            "mediatypeid": "2",
            "type": "4",
            "name": "Slack",
            "message_format": "0",
            "content_type": "1"
        }))
        .unwrap();
        assert_eq!(current.kind, Some(MediaTypeKind::Webhook));
        assert_eq!(current.message_format(), 1);

        assert_eq!(MediaType::default().message_format(), 0);
    }

    #[test]
    fn set_message_format_writes_both_members() {
        let mut media_type = MediaType {
            name: "Email (HTML)".to_string(),
            kind: Some(MediaTypeKind::Email),
            ..MediaType::default()
        };
        media_type.set_message_format(1);

        assert_eq!(
            serde_json::to_value(&media_type).unwrap(),
            json!({
                "name": "Email (HTML)",
                "type": "0",
                "message_format": "1",
                "content_type": "1"
            })
        );
    }

    #[test]
    fn kind_codes_skip_the_retired_jabber_slot() {
        assert_eq!(MediaTypeKind::Webhook.code(), 4);
        assert_eq!(MediaTypeKind::from_code(3), None);
    }
}
