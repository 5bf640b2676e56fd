use dioxus::prelude::*;

use crate::views::ViewState;
use crate::vm::{ProgressVm, RecentTopicVm};

#[component]
pub fn ProgressWidgets(state: ViewState<ProgressVm>, on_retry: EventHandler<()>) -> Element {
    rsx! {
        aside { class: "widgets",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    section { class: "widget card",
                        h3 { "Your progress" }
                        p { class: "muted", "Loading..." }
                    }
                },
                ViewState::Ready(progress) => rsx! {
                    ProgressWidget { progress: progress.clone() }
                    RecentTopicsWidget { recent: progress.recent }
                },
                ViewState::Error(err) => rsx! {
                    section { class: "widget card",
                        h3 { "Your progress" }
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| on_retry.call(()),
                            "Retry"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ProgressWidget(progress: ProgressVm) -> Element {
    rsx! {
        section { class: "widget card",
            h3 { "Your progress" }
            if progress.has_sessions {
                dl { class: "stats",
                    div { class: "stat",
                        dt { "Sessions" }
                        dd { "{progress.sessions_label}" }
                    }
                    div { class: "stat",
                        dt { "Average score" }
                        dd { "{progress.average_label}" }
                    }
                    div { class: "stat",
                        dt { "Study time" }
                        dd { "{progress.study_time_label}" }
                    }
                }
            } else {
                p { class: "muted", "No sessions yet. Finish one to see your progress." }
            }
        }
    }
}

#[component]
fn RecentTopicsWidget(recent: Vec<RecentTopicVm>) -> Element {
    rsx! {
        section { class: "widget card",
            h3 { "Recent topics" }
            if recent.is_empty() {
                p { class: "muted", "Topics you study will show up here." }
            } else {
                ul { class: "recent-topics",
                    for item in recent {
                        li { key: "{item.topic}",
                            span { class: "recent-topic", "{item.topic}" }
                            span { class: "recent-detail muted", "{item.detail}" }
                            span { class: "recent-score", "{item.score_label}" }
                        }
                    }
                }
            }
        }
    }
}
