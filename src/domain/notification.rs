//! User-facing notifications (toasts).

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    #[must_use]
    pub fn prediction_complete() -> Self {
        Self::info("Prediction Complete", "Your diabetes risk assessment is ready.")
    }

    #[must_use]
    pub fn prediction_failed() -> Self {
        Self::destructive(
            "Error",
            "There was a problem processing your request. Please try again.",
        )
    }
}
