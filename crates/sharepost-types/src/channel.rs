use serde::{Deserialize, Serialize};

use std::fmt;

/// Channel visibility as reported by the host (`"O"`, `"P"`, `"D"`, `"G"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    /// Public channel, visible without an invitation.
    #[serde(rename = "O")]
    Open,
    #[serde(rename = "P")]
    Private,
    /// One-to-one direct message.
    #[serde(rename = "D")]
    Direct,
    /// Group direct message.
    #[serde(rename = "G")]
    Group,
    /// Any type code this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelType::Open => write!(f, "O"),
            ChannelType::Private => write!(f, "P"),
            ChannelType::Direct => write!(f, "D"),
            ChannelType::Group => write!(f, "G"),
            ChannelType::Unknown => write!(f, "?"),
        }
    }
}

impl std::str::FromStr for ChannelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "o" | "open" | "public" => Ok(ChannelType::Open),
            "p" | "private" => Ok(ChannelType::Private),
            "d" | "direct" | "dm" => Ok(ChannelType::Direct),
            "g" | "group" | "gm" => Ok(ChannelType::Group),
            other => Err(format!("invalid channel type: '{other}'")),
        }
    }
}

/// A channel as returned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub team_id: String,
    /// URL-safe handle, rendered as `~name` in messages.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
}

impl Channel {
    pub fn is_open(&self) -> bool {
        self.channel_type == ChannelType::Open
    }

    pub fn is_direct(&self) -> bool {
        self.channel_type == ChannelType::Direct
    }
}

/// Whether the (possibly absent) channel is an open/public channel.
///
/// An absent channel counts as not open so callers fall back to the more
/// conservative behavior.
pub fn is_open_channel(channel: Option<&Channel>) -> bool {
    channel.is_some_and(Channel::is_open)
}
