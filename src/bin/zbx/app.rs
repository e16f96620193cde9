use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};
use zabbix_api::config::{Auth, Config};
use zabbix_api::error::{Error as ZabbixError, ZbxError};
use zabbix_api::telemetry::init_tracing;
use zabbix_api::{Params, Result, ZbxClient};

use super::cli::{Cli, Command};

const DEFAULT_CONFIG: &str = "zbx.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;
    config.insecure |= cli.insecure;

    let mut client = ZbxClient::connect(&config).await?;
    info!(url = %client.base_url(), "connected");

    let outcome = execute(&client, cli.command).await;

    if matches!(config.auth, Auth::Credentials { .. }) {
        if let Err(err) = client.logout().await {
            warn!(error = %err, "logout failed");
        }
    }

    print_json(&outcome?)
}

async fn execute(client: &ZbxClient, command: Command) -> Result<Value> {
    match command {
        Command::Version => {
            let version = client.api_version().await?;
            Ok(json!({ "version": version.to_string() }))
        }
        Command::Users { username } => {
            let mut params = Params::new();
            if let Some(username) = username {
                params.insert("filter", json!({ "username": username }));
            }
            to_value(&client.users_get(params).await?)
        }
        Command::Roles => to_value(&client.roles_get(Params::new()).await?),
        Command::MediaTypes { kind } => {
            let mut params = Params::new();
            if let Some(kind) = kind {
                params.insert("filter", json!({ "type": kind.code().to_string() }));
            }
            to_value(&client.media_types_get(params).await?)
        }
        Command::Macros { host_id } => {
            let mut params = Params::new();
            if let Some(host_id) = host_id {
                params.insert("hostids", vec![host_id]);
            }
            to_value(&client.macros_get(params).await?)
        }
        Command::Actions { id: Some(id) } => to_value(&client.action_get_by_id(&id).await?),
        Command::Actions { id: None } => to_value(&client.actions_get(Params::new()).await?),
        Command::UserGroups => to_value(&client.user_groups_get(Params::new()).await?),
        Command::HostGroups => to_value(&client.host_groups_get(Params::new()).await?),
        Command::Call { method, params } => {
            let params: Value = match params.as_deref() {
                Some(raw) => serde_json::from_str(raw).map_err(|err| ZbxError::InvalidField {
                    field: "params",
                    message: err.to_string(),
                })?,
                None => json!({}),
            };
            client.call_value(&method, &params).await
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|err| ZabbixError::from(ZbxError::from(err)))
}

fn print_json(value: &Value) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| ZabbixError::from(ZbxError::from(err)))?;
    println!("{rendered}");
    Ok(())
}
