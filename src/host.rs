//! Contract with the host editor: theme tokens, translation, notifications, toolbox metadata.

use crate::constants::{TOOLBOX_ICON, TOOLBOX_TITLE};
use serde::{Deserialize, Serialize};

/// Base class-name tokens provided by the host's styling API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStyles {
    pub block: String,
    pub loader: String,
    pub input: String,
    pub button: String,
}

impl Default for HostStyles {
    fn default() -> Self {
        Self {
            block: "cdx-block".to_string(),
            loader: "cdx-loader".to_string(),
            input: "cdx-input".to_string(),
            button: "cdx-button".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub style: NotificationStyle,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: NotificationStyle::Error,
        }
    }
}

/// API the host editor hands to every block it constructs.
pub trait HostApi {
    fn styles(&self) -> HostStyles;

    /// Translates a user-facing string. Unknown keys come back unchanged.
    fn t(&self, key: &str) -> String;

    fn notify(&self, notification: Notification);
}

/// Toolbox entry used by the host's block picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbox {
    pub title: &'static str,
    pub icon: &'static str,
}

pub const TOOLBOX: Toolbox = Toolbox {
    title: TOOLBOX_TITLE,
    icon: TOOLBOX_ICON,
};
