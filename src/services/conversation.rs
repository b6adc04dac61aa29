use std::sync::Arc;

use anyhow::Context;

use crate::models::webhook::MessagingEvent;
use crate::models::{DesiredTime, Intent, OutboundMessage};
use crate::services::classifier;
use crate::services::dispatcher;
use crate::services::policy::{self, Action};
use crate::services::search::SearchQuery;
use crate::state::AppState;

const SEARCH_TERM: &str = "restaurants";

/// Routes one messaging event. Message and postback events become turns;
/// the rest are logged.
pub async fn handle_event(state: &Arc<AppState>, event: &MessagingEvent) {
    let sender = event.sender.id.as_str();
    let at = event
        .timestamp
        .and_then(chrono::DateTime::from_timestamp_millis);

    if let Some(optin) = &event.optin {
        tracing::info!(
            sender,
            page = %event.recipient.id,
            reference = optin.reference.as_deref().unwrap_or(""),
            at = ?at,
            "received authentication"
        );
        let ack = OutboundMessage::text(sender, dispatcher::AUTHENTICATION_ACK);
        if let Err(e) = state.messaging.send(&ack).await {
            tracing::error!(
                error = %e,
                cause = %e.root_cause(),
                sender,
                "failed to acknowledge opt-in"
            );
        }
    } else if let Some(message) = &event.message {
        tracing::info!(
            sender,
            page = %event.recipient.id,
            mid = message.mid.as_deref().unwrap_or(""),
            at = ?at,
            "received message"
        );
        let Some(intent) = classifier::classify_message(message) else {
            tracing::warn!(
                sender,
                mid = message.mid.as_deref().unwrap_or(""),
                attachments = message.attachments.len(),
                has_quick_reply = message.quick_reply.is_some(),
                "message has no text, quick reply or attachment"
            );
            return;
        };
        if intent == Intent::Echo {
            tracing::info!(
                mid = message.mid.as_deref().unwrap_or(""),
                app_id = ?message.app_id,
                metadata = message.metadata.as_deref().unwrap_or(""),
                "received echo"
            );
            return;
        }
        run_turn(state, sender, intent).await;
    } else if let Some(delivery) = &event.delivery {
        for mid in &delivery.mids {
            tracing::info!(mid = %mid, "received delivery confirmation");
        }
        tracing::info!(watermark = delivery.watermark, "all messages before watermark delivered");
    } else if let Some(postback) = &event.postback {
        tracing::info!(
            sender,
            page = %event.recipient.id,
            payload = %postback.payload,
            at = ?at,
            "received postback"
        );
        run_turn(state, sender, classifier::classify_postback(&postback.payload)).await;
    } else if let Some(read) = &event.read {
        tracing::info!(watermark = read.watermark, seq = ?read.seq, "received message read event");
    } else if let Some(linking) = &event.account_linking {
        tracing::info!(
            sender,
            status = %linking.status,
            auth_code = linking.authorization_code.as_deref().unwrap_or(""),
            "received account link event"
        );
    } else {
        tracing::warn!(sender, "webhook received unknown messaging event");
    }
}

/// Runs one turn for `user_id` while holding that user's turn lock.
/// Failures are logged and end the turn.
pub async fn run_turn(state: &Arc<AppState>, user_id: &str, intent: Intent) {
    let _guard = state.turn_locks.acquire(user_id).await;

    match process_turn(state, user_id, &intent).await {
        Ok(action) => {
            tracing::info!(
                user = user_id,
                intent = intent.name(),
                action = action.name(),
                "turn complete"
            );
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                cause = %e.root_cause(),
                user = user_id,
                intent = intent.name(),
                "turn failed"
            );
        }
    }
}

async fn process_turn(
    state: &Arc<AppState>,
    user_id: &str,
    intent: &Intent,
) -> anyhow::Result<Action> {
    let mut slots = state.slots.get(user_id)?;
    let action = policy::plan(intent, &mut slots);
    state.slots.upsert(user_id, &slots)?;

    if let Intent::Unknown(payload) = intent {
        tracing::info!(user = user_id, payload = %payload, "ignoring unrecognized payload");
        return Ok(action);
    }

    let debug = DebugEcho {
        state,
        user_id,
        enabled: slots.debug_enabled,
    };
    debug.note(&format!("intent={}", intent.name())).await?;
    debug.note(&slots.summary()).await?;
    debug.note(&format!("action={}", action.name())).await?;

    match &action {
        Action::Greet => {
            let name = state
                .profiles
                .first_name(user_id)
                .await
                .context("profile lookup failed")?;
            send(state, &dispatcher::greeting(user_id, &name)).await?;
        }
        Action::ConfirmBooking { slot } => {
            let name = state
                .profiles
                .first_name(user_id)
                .await
                .context("profile lookup failed")?;
            send(state, &dispatcher::booking_confirmation(user_id, &name, slot)).await?;
        }
        Action::Recommend {
            cuisine,
            location,
            time,
        } => {
            let query = SearchQuery {
                term: SEARCH_TERM.to_string(),
                cuisine: cuisine.clone(),
                location: *location,
                radius_meters: state.config.search_radius_meters,
            };
            let business = state
                .search
                .search(&query)
                .await
                .context("business search failed")?;
            debug
                .note(&format!(
                    "picked {} (rating {}, {} reviews)",
                    business.name, business.rating, business.review_count
                ))
                .await?;

            send(state, &dispatcher::recommendation(user_id, cuisine, &business)).await?;
            match dispatcher::map_card(user_id, &business) {
                Some(card) => send(state, &card).await?,
                None => {
                    tracing::warn!(business = %business.name, "no coordinates, skipping map card")
                }
            }
            let follow_up = match time {
                DesiredTime::Tonight => dispatcher::booking_time_prompt(user_id),
                _ => dispatcher::booked_soon(user_id),
            };
            send(state, &follow_up).await?;
        }
        other => {
            for message in dispatcher::render(other, user_id, &state.config.server_url) {
                send(state, &message).await?;
            }
        }
    }

    Ok(action)
}

async fn send(state: &AppState, message: &OutboundMessage) -> anyhow::Result<()> {
    state
        .messaging
        .send(message)
        .await
        .with_context(|| format!("failed to send to {}", message.recipient.id))
}

/// Diagnostic lines for a turn. Always logged; also sent to the user while
/// their debug flag is set.
struct DebugEcho<'a> {
    state: &'a AppState,
    user_id: &'a str,
    enabled: bool,
}

impl DebugEcho<'_> {
    async fn note(&self, line: &str) -> anyhow::Result<()> {
        tracing::debug!(user = self.user_id, "{line}");
        if self.enabled {
            send(self.state, &dispatcher::debug_line(self.user_id, line)).await?;
        }
        Ok(())
    }
}
