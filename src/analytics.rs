use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{json, Value};

/// A GA-style analytics command, one of the two shapes the reporting policy
/// emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalyticsCommand {
    TrackEvent {
        category: String,
        action: String,
        label: String,
        value: u64,
    },
    SetCustomVar {
        slot: u32,
        name: String,
        value: String,
        scope: u32,
    },
}

impl AnalyticsCommand {
    pub fn command_name(&self) -> &'static str {
        match self {
            AnalyticsCommand::TrackEvent { .. } => "_trackEvent",
            AnalyticsCommand::SetCustomVar { .. } => "_setCustomVar",
        }
    }

    /// The positional tuple form pushed onto classic analytics queues:
    /// `["_trackEvent", category, action, label, value]` or
    /// `["_setCustomVar", slot, name, value, scope]`.
    pub fn to_wire(&self) -> Value {
        match self {
            AnalyticsCommand::TrackEvent {
                category,
                action,
                label,
                value,
            } => json!([self.command_name(), category, action, label, value]),
            AnalyticsCommand::SetCustomVar {
                slot,
                name,
                value,
                scope,
            } => json!([self.command_name(), slot, name, value, scope]),
        }
    }
}

/// Append-only outbound queue of analytics commands. Fire-and-forget: the
/// tracker never observes delivery, a transport drains the queue on its own
/// schedule. Handles share one queue and are cheap to clone.
pub struct AnalyticsQueue {
    inner: Arc<Mutex<Vec<AnalyticsCommand>>>,
}

impl AnalyticsQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, command: AnalyticsCommand) {
        self.inner
            .lock()
            .expect("analytics queue lock poisoned")
            .push(command);
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("analytics queue lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take everything queued so far, leaving the queue empty.
    pub fn drain(&self) -> Vec<AnalyticsCommand> {
        let mut queue = self.inner.lock().expect("analytics queue lock poisoned");
        std::mem::take(&mut *queue)
    }

    /// Copy of the queued commands, in emission order.
    pub fn snapshot(&self) -> Vec<AnalyticsCommand> {
        self.inner
            .lock()
            .expect("analytics queue lock poisoned")
            .clone()
    }
}

impl Default for AnalyticsQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AnalyticsQueue {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_event_wire_shape() {
        let command = AnalyticsCommand::TrackEvent {
            category: "Reading".into(),
            action: "Progress".into(),
            label: "30%".into(),
            value: 60,
        };
        assert_eq!(
            command.to_wire(),
            json!(["_trackEvent", "Reading", "Progress", "30%", 60])
        );
    }

    #[test]
    fn custom_var_wire_shape() {
        let command = AnalyticsCommand::SetCustomVar {
            slot: 5,
            name: "ReaderType".into(),
            value: "Reader".into(),
            scope: 3,
        };
        assert_eq!(
            command.to_wire(),
            json!(["_setCustomVar", 5, "ReaderType", "Reader", 3])
        );
    }

    #[test]
    fn queue_preserves_order_and_drains() {
        let queue = AnalyticsQueue::new();
        let handle = queue.clone();
        handle.push(AnalyticsCommand::TrackEvent {
            category: "Reading".into(),
            action: "Progress".into(),
            label: "10%".into(),
            value: 1,
        });
        handle.push(AnalyticsCommand::TrackEvent {
            category: "Reading".into(),
            action: "Progress".into(),
            label: "20%".into(),
            value: 2,
        });

        assert_eq!(queue.len(), 2);
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(
            &drained[0],
            AnalyticsCommand::TrackEvent { label, .. } if label == "10%"
        ));
        assert!(queue.is_empty());
    }
}
