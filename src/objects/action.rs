use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::Result;
use crate::zbx_client::{Params, ZbxClient};

use super::ZbxObject;
use super::de::{StrInt, object_or_empty};

zbx_enum! {
    pub enum EventSource {
        Trigger = 0 => "trigger",
        Discovery = 1 => "discovery",
        AutoRegistration = 2 => "autoregistration",
        Internal = 3 => "internal",
        Service = 4 => "service",
    }
}

zbx_enum! {
    pub enum ActionStatus {
        Enabled = 0 => "enabled",
        Disabled = 1 => "disabled",
    }
}

zbx_enum! {
    /// How filter or operation conditions combine.
    pub enum EvaluationType {
        AndOr = 0 => "and/or",
        And = 1 => "and",
        Or = 2 => "or",
        Custom = 3 => "custom",
    }
}

zbx_enum! {
    #[derive(Default)]
    pub enum ConditionType {
        #[default]
        HostGroup = 0 => "host-group",
        Host = 1 => "host",
        Trigger = 2 => "trigger",
        EventName = 3 => "event-name",
        TriggerSeverity = 4 => "trigger-severity",
        TimePeriod = 6 => "time-period",
        HostIp = 7 => "host-ip",
        DiscoveredServiceType = 8 => "discovered-service-type",
        DiscoveredServicePort = 9 => "discovered-service-port",
        DiscoveryStatus = 10 => "discovery-status",
        UptimeDowntime = 11 => "uptime-downtime",
        ReceivedValue = 12 => "received-value",
        HostTemplate = 13 => "host-template",
        ProblemSuppressed = 16 => "problem-suppressed",
        DiscoveryRule = 18 => "discovery-rule",
        DiscoveryCheck = 19 => "discovery-check",
        Proxy = 20 => "proxy",
        DiscoveryObject = 21 => "discovery-object",
        HostName = 22 => "host-name",
        EventType = 23 => "event-type",
        HostMetadata = 24 => "host-metadata",
        EventTag = 25 => "event-tag",
        EventTagValue = 26 => "event-tag-value",
        Service = 27 => "service",
        ServiceName = 28 => "service-name",
    }
}

zbx_enum! {
    #[derive(Default)]
    pub enum ConditionOperator {
        #[default]
        Equals = 0 => "equals",
        NotEquals = 1 => "not-equals",
        Contains = 2 => "contains",
        NotContains = 3 => "not-contains",
        In = 4 => "in",
        GreaterOrEqual = 5 => "greater-or-equal",
        LessOrEqual = 6 => "less-or-equal",
        NotIn = 7 => "not-in",
        Matches = 8 => "matches",
        DoesNotMatch = 9 => "does-not-match",
        Yes = 10 => "yes",
        No = 11 => "no",
    }
}

zbx_enum! {
    /// Operation type shared by problem, recovery and update operations.
    /// Recovery operations only accept `SendMessage`, `GlobalScript` and
    /// `NotifyRecoveryAllInvolved`; update operations the same with
    /// `NotifyUpdateAllInvolved`.
    #[derive(Default)]
    pub enum OperationType {
        #[default]
        SendMessage = 0 => "send-message",
        GlobalScript = 1 => "global-script",
        AddHost = 2 => "add-host",
        RemoveHost = 3 => "remove-host",
        AddToHostGroup = 4 => "add-to-host-group",
        RemoveFromHostGroup = 5 => "remove-from-host-group",
        LinkTemplate = 6 => "link-template",
        UnlinkTemplate = 7 => "unlink-template",
        EnableHost = 8 => "enable-host",
        DisableHost = 9 => "disable-host",
        SetHostInventoryMode = 10 => "set-host-inventory-mode",
        NotifyRecoveryAllInvolved = 11 => "notify-recovery-all-involved",
        NotifyUpdateAllInvolved = 12 => "notify-update-all-involved",
        AddHostTags = 13 => "add-host-tags",
        RemoveHostTags = 14 => "remove-host-tags",
    }
}

/// Action object. A `get` selects the filter and all three operation lists.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct Action {
    #[serde(rename = "actionid", skip_serializing_if = "String::is_empty")]
    pub action_id: String,
    /// Default escalation step duration, e.g. `1h`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub esc_period: String,
    /// Cannot be changed by `action.update`.
    #[serde(rename = "eventsource", skip_serializing_if = "Option::is_none")]
    pub event_source: Option<EventSource>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
    /// Trigger actions only.
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_suppressed: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_if_canceled: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_symptoms: Option<i32>,
    /// Always sent, `{}` when no condition is set.
    pub filter: ActionFilter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<ActionOperation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recovery_operations: Vec<ActionRecoveryOperation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update_operations: Vec<ActionUpdateOperation>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ActionFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ActionFilterCondition>,
    #[serde(rename = "evaltype", skip_serializing_if = "Option::is_none")]
    pub evaluation_type: Option<EvaluationType>,
    /// Required with [`EvaluationType::Custom`], references `formulaid`s.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub formula: String,
    /// Server generated.
    #[serde(skip_serializing)]
    pub eval_formula: String,
}


#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ActionFilterCondition {
    #[serde(rename = "conditionid", skip_serializing)]
    pub condition_id: String,
    #[serde(rename = "conditiontype")]
    pub condition_type: ConditionType,
    pub operator: ConditionOperator,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value2: String,
    #[serde(rename = "formulaid", skip_serializing_if = "String::is_empty")]
    pub formula_id: String,
    #[serde(rename = "actionid", skip_serializing)]
    pub action_id: String,
}

/// Problem (escalation) operation.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ActionOperation {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "operationtype")]
    pub operation_type: OperationType,
    #[serde(rename = "actionid", skip_serializing)]
    pub action_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub esc_period: String,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esc_step_from: Option<i32>,
    #[serde_as(as = "Option<StrInt>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esc_step_to: Option<i32>,
    #[serde(rename = "evaltype", skip_serializing_if = "Option::is_none")]
    pub evaluation_type: Option<EvaluationType>,
    #[serde(
        rename = "opcommand",
        deserialize_with = "object_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub command: Option<OpCommand>,
    #[serde(rename = "opcommand_grp", skip_serializing_if = "Vec::is_empty")]
    pub command_host_groups: Vec<OpCommandGroup>,
    #[serde(rename = "opcommand_hst", skip_serializing_if = "Vec::is_empty")]
    pub command_hosts: Vec<OpCommandHost>,
    #[serde(rename = "opconditions", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<OpCondition>,
    #[serde(rename = "opgroup", skip_serializing_if = "Vec::is_empty")]
    pub host_groups: Vec<OpGroup>,
    #[serde(
        rename = "opmessage",
        deserialize_with = "object_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<OpMessage>,
    #[serde(rename = "opmessage_grp", skip_serializing_if = "Vec::is_empty")]
    pub message_user_groups: Vec<OpMessageGroup>,
    #[serde(rename = "opmessage_usr", skip_serializing_if = "Vec::is_empty")]
    pub message_users: Vec<OpMessageUser>,
    #[serde(rename = "optemplate", skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<OpTemplate>,
    #[serde(
        rename = "opinventory",
        deserialize_with = "object_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub inventory: Option<OpInventory>,
    #[serde(rename = "optag", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<OpTag>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ActionRecoveryOperation {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "operationtype")]
    pub operation_type: OperationType,
    #[serde(rename = "actionid", skip_serializing)]
    pub action_id: String,
    #[serde(
        rename = "opcommand",
        deserialize_with = "object_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub command: Option<OpCommand>,
    #[serde(rename = "opcommand_grp", skip_serializing_if = "Vec::is_empty")]
    pub command_host_groups: Vec<OpCommandGroup>,
    #[serde(rename = "opcommand_hst", skip_serializing_if = "Vec::is_empty")]
    pub command_hosts: Vec<OpCommandHost>,
    #[serde(
        rename = "opmessage",
        deserialize_with = "object_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<OpMessage>,
    #[serde(rename = "opmessage_grp", skip_serializing_if = "Vec::is_empty")]
    pub message_user_groups: Vec<OpMessageGroup>,
    #[serde(rename = "opmessage_usr", skip_serializing_if = "Vec::is_empty")]
    pub message_users: Vec<OpMessageUser>,
}

/// Same members as a recovery operation, run when a problem is updated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ActionUpdateOperation {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "operationtype")]
    pub operation_type: OperationType,
    #[serde(rename = "actionid", skip_serializing)]
    pub action_id: String,
    #[serde(
        rename = "opcommand",
        deserialize_with = "object_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub command: Option<OpCommand>,
    #[serde(rename = "opcommand_grp", skip_serializing_if = "Vec::is_empty")]
    pub command_host_groups: Vec<OpCommandGroup>,
    #[serde(rename = "opcommand_hst", skip_serializing_if = "Vec::is_empty")]
    pub command_hosts: Vec<OpCommandHost>,
    #[serde(
        rename = "opmessage",
        deserialize_with = "object_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<OpMessage>,
    #[serde(rename = "opmessage_grp", skip_serializing_if = "Vec::is_empty")]
    pub message_user_groups: Vec<OpMessageGroup>,
    #[serde(rename = "opmessage_usr", skip_serializing_if = "Vec::is_empty")]
    pub message_users: Vec<OpMessageUser>,
}

/// Global script run by a `GlobalScript` operation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpCommand {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "scriptid")]
    pub script_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpCommandGroup {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "groupid")]
    pub group_id: String,
}

/// Target host of a script; host id `0` means the current host.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpCommandHost {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "hostid")]
    pub host_id: String,
}

/// Escalation step condition. The only condition type Zabbix supports here
/// is 14, "event acknowledged".
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpCondition {
    #[serde(rename = "opconditionid", skip_serializing)]
    pub op_condition_id: String,
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde_as(as = "StrInt")]
    #[serde(rename = "conditiontype")]
    pub condition_type: i32,
    pub operator: ConditionOperator,
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpGroup {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "groupid")]
    pub group_id: String,
}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpMessage {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    /// `1` to use the media type's default subject and body.
    #[serde_as(as = "Option<StrInt>")]
    #[serde(rename = "default_msg", skip_serializing_if = "Option::is_none")]
    pub default_message: Option<i32>,
    /// `0` sends through every media type of the recipient.
    #[serde(rename = "mediatypeid", skip_serializing_if = "String::is_empty")]
    pub media_type_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpMessageGroup {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "usrgrpid")]
    pub user_group_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpMessageUser {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "userid")]
    pub user_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpTemplate {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde(rename = "templateid")]
    pub template_id: String,
}

/// Inventory mode: -1 disabled, 0 manual, 1 automatic.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpInventory {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    #[serde_as(as = "StrInt")]
    pub inventory_mode: i32,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct OpTag {
    #[serde(rename = "operationid", skip_serializing)]
    pub operation_id: String,
    pub tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl ZbxObject for Action {
    const API: &'static str = "action";
    const IDS_FIELD: &'static str = "actionids";

    fn id(&self) -> &str {
        &self.action_id
    }

    fn set_id(&mut self, id: String) {
        self.action_id = id;
    }

    fn get_defaults(params: Params) -> Params {
        params
            .with_default("output", "extend")
            .with_default("selectFilter", "extend")
            .with_default("selectOperations", "extend")
            .with_default("selectRecoveryOperations", "extend")
            .with_default("selectUpdateOperations", "extend")
    }
}

impl ZbxClient {
    /// `action.get`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn actions_get(&self, params: Params) -> Result<Vec<Action>> {
        self.get_objects(params).await
    }

    /// # Errors
    ///
    /// `ExpectedOneResult` unless exactly one action matches.
    pub async fn action_get_by_id(&self, id: &str) -> Result<Action> {
        self.get_object_by_id(id).await
    }

    /// `action.create`; assigns the new ids to `actions` in order.
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn actions_create(&self, actions: &mut [Action]) -> Result<()> {
        self.create_objects(actions).await
    }

    /// `action.update`. Clear `event_source` first, the server rejects it.
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors.
    pub async fn actions_update(&self, actions: &[Action]) -> Result<()> {
        self.update_objects(actions).await
    }

    /// `action.delete`
    ///
    /// # Errors
    ///
    /// Transport, decoding and API errors, or an id count mismatch.
    pub async fn actions_delete_by_ids(&self, ids: &[String]) -> Result<()> {
        self.delete_objects_by_ids::<Action>(ids).await
    }

    /// # Errors
    ///
    /// See [`ZbxClient::actions_delete_by_ids`].
    pub async fn actions_delete(&self, actions: &mut [Action]) -> Result<()> {
        self.delete_objects(actions).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        Action, ActionStatus, ConditionOperator, ConditionType, EvaluationType, EventSource,
        OperationType,
    };
    use crate::objects::ZbxObject;
    use crate::zbx_client::Params;

    #[test]
    fn decodes_trigger_action_from_get() {
        let action: Action = serde_json::from_value(json!({
            "actionid": "3",
            "name": "Report problems to Zabbix administrators",
            "eventsource": "0",
            "status": "1",
            "esc_period": "1h",
            "pause_suppressed": "1",
            "notify_if_canceled": "1",
            "pause_symptoms": "1",
            "filter": {
                "evaltype": "0",
                "formula": "",
                "conditions": [
                    {
                        "conditionid": "11",
                        "conditiontype": "4",
                        "operator": "5",
                        "value": "3",
                        "value2": "",
                        "formulaid": "A"
                    }
                ],
                "eval_formula": "A"
            },
            "operations": [
                {
                    "operationid": "3",
                    "actionid": "3",
                    "operationtype": "0",
                    "esc_period": "0",
                    "esc_step_from": "1",
                    "esc_step_to": "1",
                    "evaltype": "0",
                    "opconditions": [],
                    "opmessage": {
                        "default_msg": "1",
                        "subject": "",
                        "message": "",
                        "mediatypeid": "0"
                    },
                    "opmessage_grp": [{ "usrgrpid": "7" }],
                    "opmessage_usr": []
                }
            ],
            "recovery_operations": [
                {
                    "operationid": "7",
                    "actionid": "3",
                    "operationtype": "11",
                    "opmessage": []
                }
            ],
            "update_operations": []
        }))
        .unwrap();

        assert_eq!(action.event_source, Some(EventSource::Trigger));
        assert_eq!(action.status, Some(ActionStatus::Disabled));
        assert_eq!(action.filter.eval_formula, "A");
        let condition = &action.filter.conditions[0];
        assert_eq!(condition.condition_type, ConditionType::TriggerSeverity);
        assert_eq!(condition.operator, ConditionOperator::GreaterOrEqual);

        let operation = &action.operations[0];
        assert_eq!(operation.operation_type, OperationType::SendMessage);
        assert_eq!(operation.esc_step_from, Some(1));
        let message = operation.message.as_ref().unwrap();
        assert_eq!(message.default_message, Some(1));
        assert_eq!(message.media_type_id, "0");
        assert_eq!(operation.message_user_groups[0].user_group_id, "7");

        let recovery = &action.recovery_operations[0];
        assert_eq!(
            recovery.operation_type,
            OperationType::NotifyRecoveryAllInvolved
        );
        assert!(recovery.message.is_none());
    }

    #[test]
    fn update_payload_drops_server_generated_members() {
        let mut action: Action = serde_json::from_value(json!({
            "actionid": "9",
            "name": "Register Linux servers",
            "eventsource": "2",
            "status": "0",
            "filter": {
                "evaltype": "3",
                "formula": "A",
                "eval_formula": "A",
                "conditions": [
                    {
                        "conditionid": "40",
                        "actionid": "9",
                        "conditiontype": "24",
                        "operator": "2",
                        "value": "Linux",
                        "formulaid": "A"
                    }
                ]
            }
        }))
        .unwrap();
        action.event_source = None;
        action.name = "Register CentOS servers".to_string();

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "actionid": "9",
                "name": "Register CentOS servers",
                "status": "0",
                "filter": {
                    "evaltype": "3",
                    "formula": "A",
                    "conditions": [
                        {
                            "conditiontype": "24",
                            "operator": "2",
                            "value": "Linux",
                            "formulaid": "A"
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn default_filter_is_still_sent() {
        let action = Action {
            name: "Discovered hosts".to_string(),
            ..Action::default()
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "name": "Discovered hosts", "filter": {} })
        );
    }

    #[test]
    fn get_selects_filter_and_operations_unless_overridden() {
        let params = Action::get_defaults(Params::new().set("selectFilter", json!(["evaltype"])));
        assert_eq!(params.get("output"), Some(&json!("extend")));
        assert_eq!(params.get("selectFilter"), Some(&json!(["evaltype"])));
        assert_eq!(params.get("selectRecoveryOperations"), Some(&json!("extend")));
        assert_eq!(params.get("selectUpdateOperations"), Some(&json!("extend")));
    }

    #[test]
    fn evaluation_type_labels_parse() {
        assert_eq!("and/or".parse::<EvaluationType>(), Ok(EvaluationType::AndOr));
        assert_eq!("Custom".parse::<EvaluationType>(), Ok(EvaluationType::Custom));
        assert_eq!(OperationType::NotifyUpdateAllInvolved.code(), 12);
        assert_eq!(ConditionType::from_code(5), None);
    }
}
