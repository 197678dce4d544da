use api::models::unread_count;
use api::sync::{self, ResourceCell};
use api::Notification;
use dioxus::prelude::*;

use crate::feedback::{report_action_error, report_load_error, NoticeBanner, ViewFeedback};
use crate::session::{use_client, use_session};
use crate::shell::NavTarget;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
pub fn NotificationsView(on_navigate: EventHandler<NavTarget>) -> Element {
    let client = use_client();
    let session = use_session();
    let mut notifications = use_signal(ResourceCell::<Vec<Notification>>::new);
    let feedback = use_signal(ViewFeedback::default);

    let load = {
        let client = client.clone();
        use_callback(move |_: ()| {
            let client = client.clone();
            let ticket = notifications.write().begin_load();
            spawn(async move {
                let result = client.notifications().await;
                if let Err(err) = &result {
                    report_load_error(err, session, &client, on_navigate);
                }
                notifications.write().finish_load(ticket, result);
            });
        })
    };

    use_effect(move || load.call(()));

    let mark_read = use_callback(move |notification: Notification| {
        let client = client.clone();
        let phase = notifications.peek().phase();
        spawn(async move {
            match sync::notifications::mark_read(&client, phase, &notification).await {
                Ok(true) => load.call(()),
                Ok(false) => {}
                Err(err) => report_action_error(&err, feedback, session, &client, on_navigate),
            }
        });
    });

    let cell = notifications.read();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            NoticeBanner { feedback }

            if let Some(err) = cell.state().error() {
                div {
                    class: "empty-state",
                    p { "Could not load notifications. " {err.user_message()} }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| load.call(()),
                        "Retry"
                    }
                }
            } else if let Some(list) = cell.state().value() {
                div {
                    class: "view-header",
                    h1 { class: "view-title", "Notifications" }
                    span { class: "badge", {format!("{} unread", unread_count(list))} }
                }
                if list.is_empty() {
                    div {
                        class: "empty-state",
                        p { "You have no notifications." }
                    }
                }
                for notification in list.iter() {
                    NotificationRow {
                        key: "{notification.id}",
                        notification: notification.clone(),
                        on_mark_read: move |n| mark_read.call(n),
                    }
                }
            } else {
                p { class: "view-muted", "Loading notifications..." }
            }
        }
    }
}

#[component]
fn NotificationRow(notification: Notification, on_mark_read: EventHandler<Notification>) -> Element {
    let read = notification.is_read();
    let target = notification.clone();
    let class = if read {
        "notification"
    } else {
        "notification notification-unread"
    };
    let at = notification
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string());

    rsx! {
        div {
            class,
            div {
                class: "notification-body",
                p { "{notification.message}" }
                if let Some(at) = at {
                    small { class: "view-muted", "{at}" }
                }
            }
            if !read {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_mark_read.call(target.clone()),
                    "Mark as read"
                }
            }
        }
    }
}
