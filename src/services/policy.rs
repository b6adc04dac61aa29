use crate::models::{DesiredTime, Intent, Location, Showcase, UserSlots};
use crate::services::classifier::extract_cuisine;

/// What the bot does in response to one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    NoAction,
    PromptLocation,
    PromptCuisine,
    PromptTime,
    Recommend {
        cuisine: String,
        location: Location,
        time: DesiredTime,
    },
    ConfirmBooking {
        slot: String,
    },
    Greet,
    ReportCuisine(Option<String>),
    DebugToggled(bool),
    SlotsReset,
    AcknowledgeQuickReply,
    AcknowledgeAttachment,
    Showcase(Showcase),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::NoAction => "no_action",
            Action::PromptLocation => "prompt_location",
            Action::PromptCuisine => "prompt_cuisine",
            Action::PromptTime => "prompt_time",
            Action::Recommend { .. } => "recommend",
            Action::ConfirmBooking { .. } => "confirm_booking",
            Action::Greet => "greet",
            Action::ReportCuisine(_) => "report_cuisine",
            Action::DebugToggled(_) => "debug_toggled",
            Action::SlotsReset => "slots_reset",
            Action::AcknowledgeQuickReply => "acknowledge_quick_reply",
            Action::AcknowledgeAttachment => "acknowledge_attachment",
            Action::Showcase(_) => "showcase",
        }
    }
}

/// Slot-fullness decision table for restaurant requests.
///
/// | cuisine | location | time | action          |
/// |---------|----------|------|-----------------|
/// | yes     | yes      | yes  | recommend       |
/// | yes     | yes      | no   | prompt time     |
/// | no      | yes      | -    | prompt cuisine  |
/// | -       | no       | -    | prompt location |
pub fn decide(slots: &UserSlots) -> Action {
    match (&slots.preferred_cuisine, slots.location, &slots.desired_time) {
        (Some(cuisine), Some(location), Some(time)) => Action::Recommend {
            cuisine: cuisine.clone(),
            location,
            time: time.clone(),
        },
        (Some(_), Some(_), None) => Action::PromptTime,
        (None, Some(_), _) => Action::PromptCuisine,
        (_, None, _) => Action::PromptLocation,
    }
}

/// Applies the slot updates carried by `intent`, then picks the action.
/// The decision always sees the post-update slots.
pub fn plan(intent: &Intent, slots: &mut UserSlots) -> Action {
    match intent {
        Intent::Restaurant(text) => {
            if let Some(cuisine) = extract_cuisine(text) {
                slots.preferred_cuisine = Some(cuisine.to_string());
            }
            decide(slots)
        }
        Intent::AttachmentLocation(location) => {
            slots.location = Some(*location);
            decide(slots)
        }
        Intent::TimeSelection(time) => {
            slots.desired_time = Some(time.clone());
            decide(slots)
        }
        Intent::BookingConfirm(slot) => {
            slots.desired_time = Some(DesiredTime::Booked(slot.clone()));
            Action::ConfirmBooking { slot: slot.clone() }
        }
        Intent::GetPreferredCuisine => Action::ReportCuisine(slots.preferred_cuisine.clone()),
        Intent::Hello | Intent::GetStarted => Action::Greet,
        Intent::DebugOn => {
            slots.debug_enabled = true;
            Action::DebugToggled(true)
        }
        Intent::DebugOff => {
            slots.debug_enabled = false;
            Action::DebugToggled(false)
        }
        Intent::Reset => {
            slots.reset();
            Action::SlotsReset
        }
        Intent::QuickReply(_) => Action::AcknowledgeQuickReply,
        Intent::AttachmentOther => Action::AcknowledgeAttachment,
        Intent::Showcase(showcase) => Action::Showcase(*showcase),
        Intent::Echo | Intent::Unknown(_) => Action::NoAction,
    }
}
