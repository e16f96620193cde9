use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use zabbix_api::objects::MediaTypeKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "Command line client for the Zabbix API", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Accept plain HTTP endpoints.
    #[arg(long, action = ArgAction::SetTrue)]
    pub insecure: bool,

    /// JSON log lines (needs `--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter, e.g. "zabbix_api=debug".
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the server API version.
    Version,
    /// List users.
    Users {
        #[arg(long)]
        username: Option<String>,
    },
    /// List roles.
    Roles,
    /// List media types.
    MediaTypes {
        /// email, script, sms, webhook or a numeric code.
        #[arg(long, value_parser = clap::value_parser!(MediaTypeKind))]
        kind: Option<MediaTypeKind>,
    },
    /// List host macros.
    Macros {
        #[arg(long, value_name = "HOSTID")]
        host_id: Option<String>,
    },
    /// List actions with their filter and operations.
    Actions {
        #[arg(long, value_name = "ACTIONID")]
        id: Option<String>,
    },
    /// List user groups.
    UserGroups,
    /// List host groups.
    HostGroups,
    /// Call any API method and print its raw result.
    Call {
        method: String,
        /// JSON parameters, `{}` when omitted.
        params: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
