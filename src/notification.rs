use maud::{Markup, Render, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A transient toast shown next to whatever the wizard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl Render for Notification {
    fn render(&self) -> Markup {
        let (classes, heading) = match self.kind {
            NotificationKind::Info => ("bg-blue-100 border-blue-400 text-blue-700", "Info"),
            NotificationKind::Success => ("bg-green-100 border-green-400 text-green-700", "Success"),
            NotificationKind::Error => ("bg-red-100 border-red-400 text-red-700", "Error"),
        };

        html! {
            div class={"border px-4 py-3 rounded shadow-md " (classes)} role="alert" data-kind=(heading.to_lowercase()) {
                strong class="font-bold mr-2" {(heading)}
                span {(self.message)}
            }
        }
    }
}

/// Out-of-band swap that replaces whatever toasts are on screen.
pub fn toasts(notifications: &[Notification]) -> Markup {
    html! {
        div id="toasts" hx-swap-oob="true" class="fixed top-4 right-4 flex flex-col space-y-2 z-50" {
            @for notification in notifications {
                (notification)
            }
        }
    }
}

/// Shown by htmx while a submission request is in flight.
pub fn loading_indicator(message: &str) -> Markup {
    html! {
        div id="loading" class="htmx-indicator fixed bottom-4 right-4 bg-gray-700 text-gray-100 px-4 py-3 rounded shadow-md" {
            (message)
        }
    }
}
