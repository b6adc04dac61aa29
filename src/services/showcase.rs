//! Fixed sample payloads, one per `Showcase` keyword.

use crate::models::outbound::{
    ReceiptAddress, ReceiptAdjustment, ReceiptElement, ReceiptSummary, ReceiptTemplate,
};
use crate::models::{
    Attachment, Button, GenericElement, MediaPayload, OutboundMessage, QuickReply, SenderAction,
    Showcase, Template,
};

pub fn render(kind: Showcase, recipient_id: &str, server_url: &str) -> OutboundMessage {
    let asset = |name: &str| format!("{}/assets/{name}", server_url.trim_end_matches('/'));

    match kind {
        Showcase::Image => media(recipient_id, Attachment::Image, asset("rift.png")),
        Showcase::Gif => media(recipient_id, Attachment::Image, asset("instagram_logo.gif")),
        Showcase::Audio => media(recipient_id, Attachment::Audio, asset("sample.mp3")),
        Showcase::Video => media(recipient_id, Attachment::Video, asset("allofus480.mov")),
        Showcase::File => media(recipient_id, Attachment::File, asset("test.txt")),
        Showcase::Button => OutboundMessage::attachment(
            recipient_id,
            Attachment::Template(Template::Button {
                text: "This is test text".to_string(),
                buttons: vec![
                    Button::web_url("Open Web URL", "https://www.oculus.com/en-us/rift/"),
                    Button::postback("Trigger Postback", "DEVELOPER_DEFINED_PAYLOAD"),
                    Button::PhoneNumber {
                        title: "Call Phone Number".to_string(),
                        payload: "+16505551234".to_string(),
                    },
                ],
            }),
        ),
        Showcase::Generic => OutboundMessage::attachment(
            recipient_id,
            Attachment::Template(Template::Generic {
                elements: vec![
                    GenericElement {
                        title: "rift".to_string(),
                        subtitle: Some("Next-generation virtual reality".to_string()),
                        item_url: Some("https://www.oculus.com/en-us/rift/".to_string()),
                        image_url: Some(asset("rift.png")),
                        buttons: vec![
                            Button::web_url("Open Web URL", "https://www.oculus.com/en-us/rift/"),
                            Button::postback("Call Postback", "Payload for first bubble"),
                        ],
                    },
                    GenericElement {
                        title: "touch".to_string(),
                        subtitle: Some("Your Hands, Now in VR".to_string()),
                        item_url: Some("https://www.oculus.com/en-us/touch/".to_string()),
                        image_url: Some(asset("touch.png")),
                        buttons: vec![
                            Button::web_url("Open Web URL", "https://www.oculus.com/en-us/touch/"),
                            Button::postback("Call Postback", "Payload for second bubble"),
                        ],
                    },
                ],
            }),
        ),
        Showcase::Receipt => OutboundMessage::attachment(
            recipient_id,
            Attachment::Template(Template::Receipt(sample_receipt(&asset))),
        ),
        Showcase::QuickReply => OutboundMessage::text_with_quick_replies(
            recipient_id,
            "What's your favorite movie genre?",
            ["Action", "Comedy", "Drama"]
                .into_iter()
                .map(|genre| QuickReply::Text {
                    title: genre.to_string(),
                    payload: format!(
                        "DEVELOPER_DEFINED_PAYLOAD_FOR_PICKING_{}",
                        genre.to_uppercase()
                    ),
                })
                .collect(),
        ),
        Showcase::ReadReceipt => {
            OutboundMessage::sender_action(recipient_id, SenderAction::MarkSeen)
        }
        Showcase::TypingOn => OutboundMessage::sender_action(recipient_id, SenderAction::TypingOn),
        Showcase::TypingOff => {
            OutboundMessage::sender_action(recipient_id, SenderAction::TypingOff)
        }
        Showcase::AccountLinking => OutboundMessage::attachment(
            recipient_id,
            Attachment::Template(Template::Button {
                text: "Welcome. Link your account.".to_string(),
                buttons: vec![Button::AccountLink {
                    url: format!("{}/authorize", server_url.trim_end_matches('/')),
                }],
            }),
        ),
    }
}

fn media(
    recipient_id: &str,
    kind: fn(MediaPayload) -> Attachment,
    url: String,
) -> OutboundMessage {
    OutboundMessage::attachment(recipient_id, kind(MediaPayload { url }))
}

fn sample_receipt(asset: &dyn Fn(&str) -> String) -> ReceiptTemplate {
    // The Send API requires a unique order number per receipt.
    let order_number = format!("order{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

    ReceiptTemplate {
        recipient_name: "Peter Chang".to_string(),
        order_number,
        currency: "USD".to_string(),
        payment_method: "Visa 1234".to_string(),
        timestamp: chrono::Utc::now().timestamp().to_string(),
        elements: vec![
            ReceiptElement {
                title: "Oculus Rift".to_string(),
                subtitle: "Includes: headset, sensor, remote".to_string(),
                quantity: 1,
                price: 599.00,
                currency: "USD".to_string(),
                image_url: asset("riftsq.png"),
            },
            ReceiptElement {
                title: "Samsung Gear VR".to_string(),
                subtitle: "Frost White".to_string(),
                quantity: 1,
                price: 99.99,
                currency: "USD".to_string(),
                image_url: asset("gearvrsq.png"),
            },
        ],
        address: ReceiptAddress {
            street_1: "1 Hacker Way".to_string(),
            street_2: String::new(),
            city: "Menlo Park".to_string(),
            postal_code: "94025".to_string(),
            state: "CA".to_string(),
            country: "US".to_string(),
        },
        summary: ReceiptSummary {
            subtotal: 698.99,
            shipping_cost: 20.00,
            total_tax: 57.67,
            total_cost: 626.66,
        },
        adjustments: vec![
            ReceiptAdjustment {
                name: "New Customer Discount".to_string(),
                amount: -50.0,
            },
            ReceiptAdjustment {
                name: "$100 Off Coupon".to_string(),
                amount: -100.0,
            },
        ],
    }
}
