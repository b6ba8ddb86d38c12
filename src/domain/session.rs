use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Signed-in user as exposed by the session provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: String,
    pub user_type: UserType,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum UserType {
    Customer,
    Agent,
    Other(String),
}

impl Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Customer => write!(f, "Customer"),
            UserType::Agent => write!(f, "Agent"),
            UserType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for UserType {
    fn from(s: &str) -> Self {
        match s {
            "Customer" => UserType::Customer,
            "Agent" => UserType::Agent,
            _ => UserType::Other(s.to_string()),
        }
    }
}

impl From<String> for UserType {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<UserType> for String {
    fn from(value: UserType) -> Self {
        value.to_string()
    }
}
