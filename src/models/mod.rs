pub mod business;
pub mod intent;
pub mod outbound;
pub mod slots;
pub mod webhook;

pub use business::{Business, GeoPoint};
pub use intent::{Intent, Showcase};
pub use outbound::{
    Attachment, Button, GenericElement, MediaPayload, OutboundMessage, QuickReply, SenderAction,
    Template,
};
pub use slots::{DesiredTime, Location, UserSlots};
pub use webhook::{InboundMessage, MessagingEvent, WebhookPayload};
