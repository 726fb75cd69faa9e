use paydao_core::{AppNotification, NotificationType};

/// Visual severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn icon(self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }
}

impl From<NotificationType> for ToastKind {
    fn from(kind: NotificationType) -> Self {
        match kind {
            NotificationType::Info => Self::Info,
            NotificationType::Success => Self::Success,
            NotificationType::Warning => Self::Warning,
            NotificationType::Error => Self::Error,
        }
    }
}

/// Render a toast as a single line: icon, optional title, message.
pub fn render_toast(kind: ToastKind, title: Option<&str>, message: &str) -> String {
    match title {
        Some(title) => format!("[{}] {title}: {message}", kind.icon()),
        None => format!("[{}] {message}", kind.icon()),
    }
}

pub fn render_notification(notification: &AppNotification) -> String {
    render_toast(
        notification.notification_type.into(),
        notification.title.as_deref(),
        &notification.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_title_and_message() {
        let line = render_toast(ToastKind::Success, Some("Success"), "Zed has been added.");
        assert_eq!(line, "[✓] Success: Zed has been added.");
    }

    #[test]
    fn renders_without_title() {
        assert_eq!(render_toast(ToastKind::Warning, None, "careful"), "[!] careful");
    }

    #[test]
    fn error_notification_uses_error_icon() {
        let n = AppNotification::error("Validation Error", "Please fill in all required fields.");
        assert!(render_notification(&n).starts_with("[✗] Validation Error"));
    }
}
