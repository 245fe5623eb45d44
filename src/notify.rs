use std::time::{Duration, Instant};

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    created_at: Instant,
}

impl Notification {
    fn expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.created_at) >= ttl
    }
}

// Stacked transient banners. No queue discipline: entries accumulate and
// each one expires on its own, a fixed TTL after it was pushed.
#[derive(Debug)]
pub struct Notifications {
    entries: Vec<Notification>,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            ttl: NOTIFICATION_TTL,
        }
    }
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.entries.push(Notification {
            message: message.into(),
            kind,
            created_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, NotificationKind::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, NotificationKind::Error, now);
    }

    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries.retain(|entry| !entry.expired(now, ttl));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationKind, Notifications};
    use std::time::{Duration, Instant};

    #[test]
    fn entry_survives_until_its_ttl_elapses() {
        let mut notifications = Notifications::with_ttl(Duration::from_secs(3));
        let start = Instant::now();
        notifications.success("Product deleted successfully!", start);

        notifications.prune(start + Duration::from_millis(2_999));
        assert_eq!(notifications.iter().count(), 1);

        notifications.prune(start + Duration::from_secs(3));
        assert!(notifications.is_empty());
    }

    #[test]
    fn stacked_entries_expire_independently() {
        let mut notifications = Notifications::with_ttl(Duration::from_secs(3));
        let start = Instant::now();
        notifications.success("first", start);
        notifications.error("second", start + Duration::from_secs(2));

        notifications.prune(start + Duration::from_secs(3));
        let remaining: Vec<&str> = notifications
            .iter()
            .map(|entry| entry.message.as_str())
            .collect();
        assert_eq!(remaining, ["second"]);

        notifications.prune(start + Duration::from_secs(5));
        assert!(notifications.is_empty());
    }

    #[test]
    fn error_styling_is_carried_on_the_entry() {
        let mut notifications = Notifications::default();
        let now = Instant::now();
        notifications.error("Error adding product: boom", now);
        let entry = notifications.iter().next().expect("entry should exist");
        assert_eq!(entry.kind, NotificationKind::Error);
    }
}
