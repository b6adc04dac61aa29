//! Builds outbound payloads for decided actions.
//!
//! Nothing here performs I/O. Actions that need collaborator data (a
//! user's first name, a search result) have dedicated builders that the
//! turn driver calls once it has that data.

use crate::models::{
    Attachment, Business, Button, GenericElement, OutboundMessage, QuickReply, Template,
};
use crate::services::classifier::{BOOKING_SLOTS, WHATTIME_NOW, WHATTIME_TONIGHT};
use crate::services::policy::Action;
use crate::services::showcase;

pub const PROMPT_LOCATION: &str = "Where are you? (use the location button)";
pub const PROMPT_CUISINE: &str = "What type of food would you like to eat? (eg. Mexican food).";
pub const PROMPT_TIME: &str = "When would you like to eat?";
pub const PROMPT_BOOKING_TIME: &str = "What time should I book a table for tonight?";
pub const BOOKED_SOON: &str = "Done! Your table will be ready in 15 minutes.";
pub const NO_PREFERRED_CUISINE: &str = "No preferred cuisine specified";
pub const QUICK_REPLY_ACK: &str = "Quick reply tapped";
pub const ATTACHMENT_ACK: &str = "Message with attachment received";
pub const AUTHENTICATION_ACK: &str = "Authentication successful";
pub const SLOTS_RESET: &str = "Conversation reset. Let's start over!";
pub const DISCOUNT_NOTE: &str = "Show this message when you arrive to get 10% off your bill.";

/// Renders actions whose payloads need nothing beyond the action itself.
/// Returns an empty list for `NoAction` and for the collaborator-backed
/// actions (`Greet`, `ConfirmBooking`, `Recommend`).
pub fn render(action: &Action, recipient_id: &str, server_url: &str) -> Vec<OutboundMessage> {
    match action {
        Action::PromptLocation => vec![prompt_location(recipient_id)],
        Action::PromptCuisine => vec![OutboundMessage::text(recipient_id, PROMPT_CUISINE)],
        Action::PromptTime => vec![prompt_time(recipient_id)],
        Action::ReportCuisine(cuisine) => vec![cuisine_report(recipient_id, cuisine.as_deref())],
        Action::DebugToggled(enabled) => {
            let text = if *enabled { "Debug mode on" } else { "Debug mode off" };
            vec![OutboundMessage::text(recipient_id, text)]
        }
        Action::SlotsReset => vec![OutboundMessage::text(recipient_id, SLOTS_RESET)],
        Action::AcknowledgeQuickReply => vec![OutboundMessage::text(recipient_id, QUICK_REPLY_ACK)],
        Action::AcknowledgeAttachment => vec![OutboundMessage::text(recipient_id, ATTACHMENT_ACK)],
        Action::Showcase(kind) => vec![showcase::render(*kind, recipient_id, server_url)],
        Action::NoAction
        | Action::Greet
        | Action::ConfirmBooking { .. }
        | Action::Recommend { .. } => Vec::new(),
    }
}

pub fn prompt_location(recipient_id: &str) -> OutboundMessage {
    OutboundMessage::text_with_quick_replies(
        recipient_id,
        PROMPT_LOCATION,
        vec![QuickReply::Location],
    )
}

pub fn prompt_time(recipient_id: &str) -> OutboundMessage {
    OutboundMessage::attachment(
        recipient_id,
        Attachment::Template(Template::Button {
            text: PROMPT_TIME.to_string(),
            buttons: vec![
                Button::postback("Now", WHATTIME_NOW),
                Button::postback("Tonight", WHATTIME_TONIGHT),
            ],
        }),
    )
}

pub fn booking_time_prompt(recipient_id: &str) -> OutboundMessage {
    OutboundMessage::attachment(
        recipient_id,
        Attachment::Template(Template::Button {
            text: PROMPT_BOOKING_TIME.to_string(),
            buttons: BOOKING_SLOTS
                .iter()
                .map(|slot| Button::postback(slot, slot))
                .collect(),
        }),
    )
}

pub fn booked_soon(recipient_id: &str) -> OutboundMessage {
    OutboundMessage::text(recipient_id, BOOKED_SOON)
}

pub fn greeting(recipient_id: &str, first_name: &str) -> OutboundMessage {
    OutboundMessage::text(
        recipient_id,
        format!(
            "Hi {first_name}! What would you like me to pick you today? (ex: \"Pick me a mexican restaurant\")."
        ),
    )
}

pub fn booking_confirmation(recipient_id: &str, first_name: &str, slot: &str) -> OutboundMessage {
    OutboundMessage::text(
        recipient_id,
        format!("Thanks {first_name}! Your table is booked for {slot} tonight. {DISCOUNT_NOTE}"),
    )
}

pub fn cuisine_report(recipient_id: &str, cuisine: Option<&str>) -> OutboundMessage {
    let text = match cuisine {
        Some(c) => format!("Preferred cuisine is {c}"),
        None => NO_PREFERRED_CUISINE.to_string(),
    };
    OutboundMessage::text(recipient_id, text)
}

pub fn recommendation(recipient_id: &str, cuisine: &str, business: &Business) -> OutboundMessage {
    OutboundMessage::text(
        recipient_id,
        format!(
            "I highly recommend {}. It has great {cuisine} food.",
            business.name
        ),
    )
}

/// Generic-template card with a static map of the business. `None` when
/// the search result has no coordinates.
pub fn map_card(recipient_id: &str, business: &Business) -> Option<OutboundMessage> {
    let point = business.coordinates?;
    let ll = format!("{},{}", point.latitude, point.longitude);
    let maps_url = format!("http://maps.apple.com/maps?q={ll}&z=16");

    let mut subtitle = format!("{} stars, {} reviews", business.rating, business.review_count);
    if let Some(address) = &business.address {
        subtitle.push_str(" - ");
        subtitle.push_str(address);
    }

    let mut buttons = vec![Button::web_url("Open in Maps", &maps_url)];
    if let Some(phone) = business.phone.as_deref().filter(|p| !p.is_empty()) {
        buttons.push(Button::PhoneNumber {
            title: "Call".to_string(),
            payload: phone.to_string(),
        });
    }

    Some(OutboundMessage::attachment(
        recipient_id,
        Attachment::Template(Template::Generic {
            elements: vec![GenericElement {
                title: business.name.clone(),
                subtitle: Some(subtitle),
                item_url: Some(maps_url.clone()),
                image_url: Some(format!(
                    "https://maps.googleapis.com/maps/api/staticmap?size=764x400&center={ll}&zoom=16&markers={ll}"
                )),
                buttons,
            }],
        }),
    ))
}

pub fn debug_line(recipient_id: &str, line: &str) -> OutboundMessage {
    OutboundMessage::text(recipient_id, format!("[debug] {line}"))
}
