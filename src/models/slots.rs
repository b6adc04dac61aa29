use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DesiredTime {
    Now,
    Tonight,
    /// A literal clock time picked from the booking prompt, e.g. "7:45".
    Booked(String),
}

impl DesiredTime {
    pub fn as_str(&self) -> &str {
        match self {
            DesiredTime::Now => "now",
            DesiredTime::Tonight => "tonight",
            DesiredTime::Booked(slot) => slot,
        }
    }
}

/// Facts collected from one user over the course of a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserSlots {
    pub preferred_cuisine: Option<String>,
    pub location: Option<Location>,
    pub desired_time: Option<DesiredTime>,
    pub debug_enabled: bool,
}

impl UserSlots {
    pub fn reset(&mut self) {
        *self = UserSlots::default();
    }

    /// One-line rendering used in logs and debug echoes.
    pub fn summary(&self) -> String {
        let location = self
            .location
            .map(|l| format!("{},{}", l.lat, l.long))
            .unwrap_or_default();
        format!(
            "cuisine={} location={} time={} debug={}",
            self.preferred_cuisine.as_deref().unwrap_or(""),
            location,
            self.desired_time.as_ref().map(|t| t.as_str()).unwrap_or(""),
            self.debug_enabled,
        )
    }
}
