use std::sync::{Mutex, PoisonError};

use crate::api::Notifier;
use crate::entities::Notification;

/// Pending notifications, acknowledged by draining.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Mutex<Vec<Notification>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Vec<Notification> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn acknowledge(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }
}

impl Notifier for Notifications {
    fn present(&self, notification: Notification) {
        tracing::info!("{}: {}", notification.title, notification.message);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[test]
fn acknowledge_dismisses_everything() {
    let notifications = Notifications::new();
    notifications.present(Notification::new("Error", "first"));
    notifications.present(Notification::new("Error", "second"));

    assert_eq!(notifications.pending().len(), 2);
    assert_eq!(notifications.acknowledge().len(), 2);
    assert!(notifications.pending().is_empty());
}
