use serde::{Deserialize, Serialize};

const DEVELOPER_METADATA: &str = "DEVELOPER_DEFINED_METADATA";

/// One Send API request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboundMessage {
    pub recipient: Recipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_action: Option<SenderAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipient {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    MarkSeen,
    TypingOn,
    TypingOff,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Attachment {
    Image(MediaPayload),
    Audio(MediaPayload),
    Video(MediaPayload),
    File(MediaPayload),
    Template(Template),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaPayload {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "template_type", rename_all = "snake_case")]
pub enum Template {
    Button { text: String, buttons: Vec<Button> },
    Generic { elements: Vec<GenericElement> },
    Receipt(ReceiptTemplate),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    WebUrl { url: String, title: String },
    Postback { title: String, payload: String },
    PhoneNumber { title: String, payload: String },
    AccountLink { url: String },
}

impl Button {
    pub fn postback(title: &str, payload: &str) -> Self {
        Button::Postback {
            title: title.to_string(),
            payload: payload.to_string(),
        }
    }

    pub fn web_url(title: &str, url: &str) -> Self {
        Button::WebUrl {
            url: url.to_string(),
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenericElement {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum QuickReply {
    Text { title: String, payload: String },
    Location,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptTemplate {
    pub recipient_name: String,
    pub order_number: String,
    pub currency: String,
    pub payment_method: String,
    pub timestamp: String,
    pub elements: Vec<ReceiptElement>,
    pub address: ReceiptAddress,
    pub summary: ReceiptSummary,
    pub adjustments: Vec<ReceiptAdjustment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptElement {
    pub title: String,
    pub subtitle: String,
    pub quantity: u32,
    pub price: f64,
    pub currency: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptAddress {
    pub street_1: String,
    pub street_2: String,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptSummary {
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub total_tax: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptAdjustment {
    pub name: String,
    pub amount: f64,
}

impl OutboundMessage {
    pub fn text(recipient_id: &str, text: impl Into<String>) -> Self {
        Self::message(
            recipient_id,
            MessageBody {
                text: Some(text.into()),
                metadata: Some(DEVELOPER_METADATA.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn text_with_quick_replies(
        recipient_id: &str,
        text: impl Into<String>,
        quick_replies: Vec<QuickReply>,
    ) -> Self {
        Self::message(
            recipient_id,
            MessageBody {
                text: Some(text.into()),
                quick_replies,
                metadata: Some(DEVELOPER_METADATA.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn attachment(recipient_id: &str, attachment: Attachment) -> Self {
        Self::message(
            recipient_id,
            MessageBody {
                attachment: Some(attachment),
                ..Default::default()
            },
        )
    }

    pub fn sender_action(recipient_id: &str, action: SenderAction) -> Self {
        Self {
            recipient: Recipient {
                id: recipient_id.to_string(),
            },
            message: None,
            sender_action: Some(action),
        }
    }

    fn message(recipient_id: &str, body: MessageBody) -> Self {
        Self {
            recipient: Recipient {
                id: recipient_id.to_string(),
            },
            message: Some(body),
            sender_action: None,
        }
    }

    pub fn text_body(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.text.as_deref())
    }

    pub fn template(&self) -> Option<&Template> {
        match self.message.as_ref()?.attachment.as_ref()? {
            Attachment::Template(t) => Some(t),
            _ => None,
        }
    }
}
