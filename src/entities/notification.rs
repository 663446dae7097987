use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Text-entry prompt shown when the user adds an address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddressPrompt {
    pub title: String,
    pub placeholder: String,
}

impl Default for AddressPrompt {
    fn default() -> Self {
        Self {
            title: "Route".into(),
            placeholder: "Enter place".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    pub add_address: bool,
    pub compute_route: bool,
    pub reset: bool,
}

impl Actions {
    pub fn new(routing_visible: bool) -> Self {
        Self {
            add_address: true,
            compute_route: routing_visible,
            reset: routing_visible,
        }
    }
}
