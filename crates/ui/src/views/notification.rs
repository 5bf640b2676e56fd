use dioxus::prelude::*;

use crate::vm::{NOTIFICATION_TIMEOUT, Notification};

/// Show `note` and dismiss it after the notification timeout, unless a newer
/// notification replaced it first.
pub fn show_notification(slot: Signal<Option<Notification>>, note: Notification) {
    let mut slot = slot;
    slot.set(Some(note.clone()));
    spawn(async move {
        tokio::time::sleep(NOTIFICATION_TIMEOUT).await;
        if slot.peek().as_ref() == Some(&note) {
            slot.set(None);
        }
    });
}

#[component]
pub fn NotificationToast(notification: Signal<Option<Notification>>) -> Element {
    let current = notification.read().clone();
    let Some(note) = current else {
        return rsx! {};
    };
    let mut notification = notification;

    rsx! {
        div { class: note.class_name(), role: "status",
            div { class: "toast-text",
                strong { "{note.title()}" }
                p { "{note.message()}" }
            }
            button {
                class: "toast-close",
                title: "Dismiss",
                onclick: move |_| notification.set(None),
                "×"
            }
        }
    }
}
