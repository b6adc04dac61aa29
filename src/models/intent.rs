use serde::{Deserialize, Serialize};

use super::slots::{DesiredTime, Location};

/// Sample payloads the bot can show on request by keyword.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Showcase {
    Image,
    Gif,
    Audio,
    Video,
    File,
    Button,
    Generic,
    Receipt,
    QuickReply,
    ReadReceipt,
    TypingOn,
    TypingOff,
    AccountLinking,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Hello,
    GetStarted,
    GetPreferredCuisine,
    DebugOn,
    DebugOff,
    Reset,
    /// Free text that matched nothing else; treated as a restaurant request.
    Restaurant(String),
    Showcase(Showcase),
    AttachmentLocation(Location),
    AttachmentOther,
    QuickReply(String),
    Echo,
    TimeSelection(DesiredTime),
    BookingConfirm(String),
    Unknown(String),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Hello => "hello",
            Intent::GetStarted => "get_started",
            Intent::GetPreferredCuisine => "get_preferred_cuisine",
            Intent::DebugOn => "debug_on",
            Intent::DebugOff => "debug_off",
            Intent::Reset => "reset",
            Intent::Restaurant(_) => "restaurant",
            Intent::Showcase(_) => "showcase",
            Intent::AttachmentLocation(_) => "attachment_location",
            Intent::AttachmentOther => "attachment_other",
            Intent::QuickReply(_) => "quick_reply",
            Intent::Echo => "echo",
            Intent::TimeSelection(_) => "time_selection",
            Intent::BookingConfirm(_) => "booking_confirm",
            Intent::Unknown(_) => "unknown",
        }
    }
}
