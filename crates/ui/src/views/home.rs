use dioxus::prelude::*;
use services::SessionRunner;

use crate::context::AppContext;
use crate::views::{
    NotificationToast, ProgressWidgets, SessionFormView, SessionRunnerView, ViewError,
    show_notification, start_generation, view_state_from_resource,
};
use crate::vm::{Notification, SessionFormVm, map_progress};

const RECENT_TOPICS: usize = 5;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let study = ctx.study();
    let progress = ctx.progress();

    let form = use_signal(SessionFormVm::new);
    let runner = use_signal(|| None::<SessionRunner>);
    let notification = use_signal(|| None::<Notification>);

    let mut progress_resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let overview = progress
                .overview(RECENT_TOPICS)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_progress(&overview))
        }
    });
    let progress_state = view_state_from_resource(&progress_resource);

    let on_submit = {
        let study = study.clone();
        use_callback(move |()| {
            let mut form = form;
            let mut runner = runner;
            let submitted = form.write().submit();
            match submitted {
                Ok(params) => {
                    let message = format!("Studying {}", params.topic());
                    runner.set(Some(study.activate(params)));
                    start_generation(study.clone(), runner, notification);
                    show_notification(
                        notification,
                        Notification::success("Session started", message),
                    );
                }
                Err(_) => show_notification(
                    notification,
                    Notification::failure(
                        "Could not start the session",
                        "Fix the highlighted fields and try again.",
                    ),
                ),
            }
        })
    };

    let on_end = use_callback(move |()| {
        let mut runner = runner;
        let mut form = form;
        let Some(mut active) = runner.write().take() else {
            return;
        };
        form.write().reset();

        let study = study.clone();
        let mut progress_resource = progress_resource;
        spawn(async move {
            let ended = study.end_session(&mut active).await;
            if ended.record_id.is_some() {
                progress_resource.restart();
            }
        });
    });

    let has_session = runner.read().is_some();

    rsx! {
        div { class: "page home",
            div { class: "home-main",
                if has_session {
                    SessionRunnerView { runner, notification, on_end }
                } else {
                    SessionFormView { form, on_submit }
                }
            }
            ProgressWidgets {
                state: progress_state,
                on_retry: move |()| progress_resource.restart(),
            }
            NotificationToast { notification }
        }
    }
}
