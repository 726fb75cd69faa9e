use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_CAPACITY: usize = 100;

/// Toast variant. `Error` is the destructive style used for validation and
/// contract failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notice produced by a dashboard action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppNotification {
    pub id: String,
    pub notification_type: NotificationType,
    pub title: Option<String>,
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl AppNotification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            notification_type,
            title: None,
            message: message.into(),
            read: false,
            timestamp: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationType::Success, message).with_title(title)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationType::Error, message).with_title(title)
    }

    pub fn is_error(&self) -> bool {
        self.notification_type == NotificationType::Error
    }
}

/// In-memory toast history, newest first, bounded.
#[derive(Debug)]
pub struct NotificationStore {
    notifications: Vec<AppNotification>,
    max_notifications: usize,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(max_notifications: usize) -> Self {
        Self {
            notifications: Vec::new(),
            max_notifications: max_notifications.max(1),
        }
    }

    pub fn push(&mut self, notification: AppNotification) {
        self.notifications.insert(0, notification);
        self.notifications.truncate(self.max_notifications);
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Marks every unread toast as read and returns them oldest first, the
    /// order a terminal should print them in.
    pub fn drain_unread(&mut self) -> Vec<AppNotification> {
        let mut fresh: Vec<AppNotification> = self
            .notifications
            .iter_mut()
            .filter(|n| !n.read)
            .map(|n| {
                n.read = true;
                n.clone()
            })
            .collect();
        fresh.reverse();
        fresh
    }

    pub fn latest(&self) -> Option<&AppNotification> {
        self.notifications.first()
    }

    pub fn all(&self) -> &[AppNotification] {
        &self.notifications
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_error_constructors() {
        let ok = AppNotification::success("Success", "Zed has been added as a contributor.");
        assert_eq!(ok.notification_type, NotificationType::Success);
        assert_eq!(ok.title.as_deref(), Some("Success"));
        assert!(!ok.is_error());

        let err = AppNotification::error("Validation Error", "Please fill in all required fields.");
        assert!(err.is_error());
        assert!(!err.read);
    }

    #[test]
    fn store_newest_first() {
        let mut store = NotificationStore::new();
        store.push(AppNotification::new(NotificationType::Info, "first"));
        store.push(AppNotification::new(NotificationType::Info, "second"));
        assert_eq!(store.all()[0].message, "second");
        assert_eq!(store.latest().unwrap().message, "second");
    }

    #[test]
    fn store_truncates_at_capacity() {
        let mut store = NotificationStore::with_capacity(3);
        for i in 0..5 {
            store.push(AppNotification::new(NotificationType::Info, format!("msg{i}")));
        }
        assert_eq!(store.all().len(), 3);
        assert_eq!(store.all()[0].message, "msg4");
    }

    #[test]
    fn drain_unread_returns_oldest_first_once() {
        let mut store = NotificationStore::new();
        store.push(AppNotification::new(NotificationType::Info, "a"));
        store.push(AppNotification::new(NotificationType::Info, "b"));

        let drained: Vec<_> = store.drain_unread().into_iter().map(|n| n.message).collect();
        assert_eq!(drained, ["a", "b"]);
        assert_eq!(store.unread_count(), 0);
        assert!(store.drain_unread().is_empty());
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn clear_empties_store() {
        let mut store = NotificationStore::new();
        store.push(AppNotification::new(NotificationType::Error, "err"));
        store.clear();
        assert!(store.all().is_empty());
        assert!(store.latest().is_none());
    }
}
