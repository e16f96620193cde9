use serde::{Deserialize, Serialize};

use crate::Result;
use crate::zbx_client::{Params, ZbxClient};

use super::ZbxObject;

zbx_enum! {
    pub enum MacroKind {
        Text = 0 => "text",
        Secret = 1 => "secret",
        Vault = 2 => "vault",
    }
}

/// Host-level user macro (`usermacro` API).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct Macro {
    #[serde(rename = "hostmacroid", skip_serializing_if = "String::is_empty")]
    pub macro_id: String,
    #[serde(rename = "hostid")]
    pub host_id: String,
    /// Macro name including the braces, `{$SNMP_COMMUNITY}`.
    #[serde(rename = "macro")]
    pub name: String,
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MacroKind>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ZbxObject for Macro {
    const API: &'static str = "usermacro";
    const IDS_FIELD: &'static str = "hostmacroids";

    fn id(&self) -> &str {
        &self.macro_id
    }

    fn set_id(&mut self, id: String) {
        self.macro_id = id;
    }
}

impl ZbxClient {
    /// `usermacro.get`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn macros_get(&self, params: Params) -> Result<Vec<Macro>> {
        self.get_objects(params).await
    }

    /// # Errors
    ///
    /// `ExpectedOneResult` unless exactly one macro matches.
    pub async fn macro_get_by_id(&self, id: &str) -> Result<Macro> {
        self.get_object_by_id(id).await
    }

    /// `usermacro.create`; assigns the new `hostmacroid`s in order.
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn macros_create(&self, macros: &mut [Macro]) -> Result<()> {
        self.create_objects(macros).await
    }

    /// `usermacro.update`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn macros_update(&self, macros: &[Macro]) -> Result<()> {
        self.update_objects(macros).await
    }

    /// `usermacro.delete`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or `ExpectedMore` when fewer
    /// macros were deleted than requested.
    pub async fn macros_delete_by_ids(&self, ids: &[String]) -> Result<()> {
        self.delete_objects_by_ids::<Macro>(ids).await
    }

    /// Delete `macros` by id and clear their ids.
    ///
    /// # Errors
    ///
    /// See [`ZbxClient::macros_delete_by_ids`].
    pub async fn macros_delete(&self, macros: &mut [Macro]) -> Result<()> {
        self.delete_objects(macros).await
    }
}
