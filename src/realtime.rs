//! Push-channel event seam.
//!
//! The portal's socket emits named events that pages answer with a
//! re-fetch or a direct content update. The transport lives elsewhere;
//! this module is only the "event name → callback" mapping.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

/// Named events emitted on the portal's push channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PortalEvent {
    AnalyticsUpdate,
    AppointmentUpdate,
    ChatUpdate,
}

impl PortalEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnalyticsUpdate => "analyticsUpdate",
            Self::AppointmentUpdate => "appointmentUpdate",
            Self::ChatUpdate => "chatUpdate",
        }
    }

    /// Resolves a wire name to an event, if known.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "analyticsUpdate" => Some(Self::AnalyticsUpdate),
            "appointmentUpdate" => Some(Self::AppointmentUpdate),
            "chatUpdate" => Some(Self::ChatUpdate),
            _ => None,
        }
    }
}

type Callback = Box<dyn FnMut(&JsonValue) + Send>;

/// Registry of per-event callbacks.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<PortalEvent, Vec<Callback>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for an event. Multiple callbacks per event run
    /// in registration order.
    pub fn on<F>(&mut self, event: PortalEvent, callback: F)
    where
        F: FnMut(&JsonValue) + Send + 'static,
    {
        self.handlers
            .entry(event)
            .or_default()
            .push(Box::new(callback));
    }

    /// Dispatches a named event to its callbacks.
    ///
    /// Returns the number of callbacks run; unknown event names run none.
    pub fn dispatch(&mut self, event_name: &str, payload: &JsonValue) -> usize {
        let Some(event) = PortalEvent::from_name(event_name) else {
            return 0;
        };
        let Some(callbacks) = self.handlers.get_mut(&event) else {
            return 0;
        };
        for callback in callbacks.iter_mut() {
            callback(payload);
        }
        callbacks.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use serde_json::json;

    use super::{EventDispatcher, PortalEvent};

    #[test]
    fn event_names_round_trip() {
        for event in [
            PortalEvent::AnalyticsUpdate,
            PortalEvent::AppointmentUpdate,
            PortalEvent::ChatUpdate,
        ] {
            assert_eq!(PortalEvent::from_name(event.name()), Some(event));
        }
        assert_eq!(PortalEvent::from_name("billingUpdate"), None);
    }

    #[test]
    fn dispatch_runs_only_matching_callbacks() {
        let appointment_hits = Arc::new(AtomicUsize::new(0));
        let chat_hits = Arc::new(AtomicUsize::new(0));

        let mut dispatcher = EventDispatcher::new();
        let counter = Arc::clone(&appointment_hits);
        dispatcher.on(PortalEvent::AppointmentUpdate, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&chat_hits);
        dispatcher.on(PortalEvent::ChatUpdate, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let ran = dispatcher.dispatch("appointmentUpdate", &json!({}));
        assert_eq!(ran, 1);
        assert_eq!(appointment_hits.load(Ordering::SeqCst), 1);
        assert_eq!(chat_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_event_dispatches_to_nobody() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.on(PortalEvent::ChatUpdate, |_| {});
        assert_eq!(dispatcher.dispatch("somethingElse", &json!({})), 0);
    }

    #[test]
    fn callback_receives_payload() {
        let mut dispatcher = EventDispatcher::new();
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&seen);
        dispatcher.on(PortalEvent::ChatUpdate, move |payload| {
            *sink.lock().unwrap() = payload["message"].as_str().map(str::to_owned);
        });

        dispatcher.dispatch("chatUpdate", &json!({"from": "Dr. Osei", "message": "hello"}));
        assert_eq!(seen.lock().unwrap().as_deref(), Some("hello"));
    }
}
