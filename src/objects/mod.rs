//! Zabbix object schemas and their typed API wrappers.
//!
//! Every struct mirrors the remote object with Zabbix's wire conventions:
//! integers travel as strings, unset members are omitted from requests and
//! enumerated codes map to Rust enums through [`zbx_enum!`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::zbx_client::Params;

/// Declares a Zabbix code enum. Codes serialize as strings (`"2"`) and
/// decode from either a string or a number.
macro_rules! zbx_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            #[must_use]
            pub const fn code(self) -> i64 {
                match self {
                    $( Self::$variant => $code ),+
                }
            }

            #[must_use]
            pub const fn from_code(code: i64) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                $(
                    if wanted == $label {
                        return Ok(Self::$variant);
                    }
                )+
                wanted
                    .parse::<i64>()
                    .ok()
                    .and_then(Self::from_code)
                    .ok_or_else(|| format!("unknown {}: {s}", stringify!($name)))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.collect_str(&self.code())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let code = $crate::objects::de::code_from_str_or_int(deserializer)?;
                Self::from_code(code).ok_or_else(|| {
                    ::serde::de::Error::custom(format!(
                        "unknown {} code {}",
                        stringify!($name),
                        code
                    ))
                })
            }
        }
    };
}

pub mod action;
pub(crate) mod de;
pub mod host_group;
pub mod media_type;
pub mod role;
pub mod user;
pub mod user_group;
pub mod user_macro;

pub use action::{
    Action, ActionFilter, ActionFilterCondition, ActionOperation, ActionRecoveryOperation,
    ActionStatus, ActionUpdateOperation, ConditionOperator, ConditionType, EvaluationType,
    EventSource, OperationType,
};
pub use host_group::HostGroup;
pub use media_type::{MediaType, MediaTypeKind};
pub use role::{Role, RoleType};
pub use user::{Media, MediaStatus, SendTo, User, UserType};
pub use user_group::UserGroup;
pub use user_macro::{Macro, MacroKind};

/// A Zabbix object reachable through the `<api>.get/create/update/delete`
/// method family.
pub trait ZbxObject: Serialize + DeserializeOwned {
    /// Method prefix, `user` in `user.get`.
    const API: &'static str;
    /// Id list member used both as the `get` filter and in mutation results.
    const IDS_FIELD: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Parameters merged into every `get` call unless the caller set them.
    #[must_use]
    fn get_defaults(params: Params) -> Params {
        params.with_default("output", "extend")
    }
}
