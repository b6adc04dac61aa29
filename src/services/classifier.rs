use crate::models::webhook::InboundMessage;
use crate::models::{DesiredTime, Intent, Location, Showcase};

pub const GET_STARTED_PAYLOAD: &str = "GET_STARTED_PAYLOAD";
pub const WHATTIME_NOW: &str = "WHATTIME_NOW";
pub const WHATTIME_TONIGHT: &str = "WHATTIME_TONIGHT";

/// Clock times offered by the booking prompt. Postbacks are matched against
/// these strings verbatim.
pub const BOOKING_SLOTS: [&str; 3] = ["7:45", "8:45", "9:30"];

/// Matched as substrings in this order; a later match overwrites an earlier
/// one, so "korean and thai" resolves to "thai".
const CUISINES: [&str; 13] = [
    "mexican",
    "italian",
    "chinese",
    "korean",
    "japanese",
    "american",
    "french",
    "german",
    "sushi",
    "indian",
    "thai",
    "russian",
    "south african",
];

/// Returns `None` for a message with nothing to classify (no text, quick
/// reply or attachment).
pub fn classify_message(message: &InboundMessage) -> Option<Intent> {
    if message.is_echo {
        return Some(Intent::Echo);
    }

    if let Some(quick_reply) = &message.quick_reply {
        return Some(Intent::QuickReply(quick_reply.payload.clone()));
    }

    if let Some(first) = message.attachments.first() {
        let coordinates = first.payload.as_ref().and_then(|p| p.coordinates);
        return Some(match coordinates {
            Some(c) => Intent::AttachmentLocation(Location {
                lat: c.lat,
                long: c.long,
            }),
            None => Intent::AttachmentOther,
        });
    }

    message.text.as_deref().map(classify_text)
}

/// Exact, case-insensitive phrase lookup. Anything else is a restaurant
/// request; surrounding whitespace or punctuation is not stripped.
pub fn classify_text(text: &str) -> Intent {
    let normalized = text.to_lowercase();
    match normalized.as_str() {
        "preferred cuisine" => Intent::GetPreferredCuisine,
        "hi" | "hello" | "hey" => Intent::Hello,
        "get started" => Intent::GetStarted,
        "debug on" => Intent::DebugOn,
        "debug off" => Intent::DebugOff,
        "debug reset" => Intent::Reset,
        "image" => Intent::Showcase(Showcase::Image),
        "gif" => Intent::Showcase(Showcase::Gif),
        "audio" => Intent::Showcase(Showcase::Audio),
        "video" => Intent::Showcase(Showcase::Video),
        "file" => Intent::Showcase(Showcase::File),
        "button" => Intent::Showcase(Showcase::Button),
        "generic" => Intent::Showcase(Showcase::Generic),
        "receipt" => Intent::Showcase(Showcase::Receipt),
        "quick reply" => Intent::Showcase(Showcase::QuickReply),
        "read receipt" => Intent::Showcase(Showcase::ReadReceipt),
        "typing on" => Intent::Showcase(Showcase::TypingOn),
        "typing off" => Intent::Showcase(Showcase::TypingOff),
        "account linking" => Intent::Showcase(Showcase::AccountLinking),
        _ => Intent::Restaurant(text.to_string()),
    }
}

pub fn classify_postback(payload: &str) -> Intent {
    match payload {
        GET_STARTED_PAYLOAD => Intent::GetStarted,
        WHATTIME_NOW => Intent::TimeSelection(DesiredTime::Now),
        WHATTIME_TONIGHT => Intent::TimeSelection(DesiredTime::Tonight),
        slot if BOOKING_SLOTS.contains(&slot) => Intent::BookingConfirm(slot.to_string()),
        other => Intent::Unknown(other.to_string()),
    }
}

pub fn extract_cuisine(text: &str) -> Option<&'static str> {
    let normalized = text.to_lowercase();
    let mut found = None;
    for cuisine in CUISINES {
        if normalized.contains(cuisine) {
            found = Some(cuisine);
        }
    }
    found
}
