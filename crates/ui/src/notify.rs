use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Background colour of the toast.
    pub fn colour(self) -> &'static str {
        match self {
            Level::Info => "#17a2b8",
            Level::Success => "#28a745",
            Level::Warning => "#ffc107",
            Level::Error => "#dc3545",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub level: Level,
    pub message: String,
}

/// Shows transient notifications and dismisses each one after `ttl`.
/// No queue, no dedup: concurrent notifications simply stack.
#[derive(Clone)]
pub struct Notifier {
    view: Arc<dyn View>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(view: Arc<dyn View>, ttl: Duration) -> Self {
        Self { view, ttl }
    }

    pub fn notify(&self, level: Level, message: impl Into<String>) -> Uuid {
        let n = Notification { id: Uuid::new_v4(), level, message: message.into() };
        debug!(id = %n.id, level = %n.level, message = %n.message, "notification");
        self.view.show_notification(&n);

        let view = Arc::clone(&self.view);
        let ttl = self.ttl;
        let id = n.id;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            view.dismiss_notification(id);
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(Level::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.notify(Level::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(Level::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.notify(Level::Info, message)
    }
}
