use dioxus::prelude::*;
use study_core::model::FormField;

use crate::vm::{SessionFormVm, difficulty_choices, focus_choices};

#[component]
pub fn SessionFormView(form: Signal<SessionFormVm>, on_submit: EventHandler<()>) -> Element {
    let mut form = form;
    let (topic, difficulty, focus, topic_error, difficulty_error, focus_error) = {
        let vm = form.read();
        (
            vm.topic().to_string(),
            vm.difficulty().to_string(),
            vm.focus().to_string(),
            vm.error_for(FormField::Topic),
            vm.error_for(FormField::Difficulty),
            vm.error_for(FormField::Focus),
        )
    };

    rsx! {
        section { class: "session-form card",
            h2 { "Start a study session" }
            p { class: "muted", "Tell us what you want to learn and how." }

            div { class: "field",
                label { r#for: "topic", "Topic" }
                input {
                    id: "topic",
                    class: if topic_error.is_some() { "input input--invalid" } else { "input" },
                    r#type: "text",
                    placeholder: "e.g. Photosynthesis, Linear algebra, The French Revolution",
                    value: "{topic}",
                    oninput: move |evt| form.write().set_topic(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.data.key() == Key::Enter {
                            on_submit.call(());
                        }
                    },
                }
                if let Some(message) = topic_error {
                    p { class: "field-error", "{message}" }
                }
            }

            div { class: "field-row",
                div { class: "field",
                    label { r#for: "difficulty", "Difficulty" }
                    select {
                        id: "difficulty",
                        class: "input",
                        value: "{difficulty}",
                        onchange: move |evt| form.write().set_difficulty(evt.value()),
                        for choice in difficulty_choices() {
                            option {
                                value: choice.value,
                                selected: choice.value == difficulty,
                                "{choice.label}"
                            }
                        }
                    }
                    if let Some(message) = difficulty_error {
                        p { class: "field-error", "{message}" }
                    }
                }

                div { class: "field",
                    label { r#for: "focus", "Focus" }
                    select {
                        id: "focus",
                        class: "input",
                        value: "{focus}",
                        onchange: move |evt| form.write().set_focus(evt.value()),
                        for choice in focus_choices() {
                            option {
                                value: choice.value,
                                selected: choice.value == focus,
                                "{choice.label}"
                            }
                        }
                    }
                    if let Some(message) = focus_error {
                        p { class: "field-error", "{message}" }
                    }
                }
            }

            button {
                id: "start-session",
                class: "btn btn-primary",
                onclick: move |_| on_submit.call(()),
                "Start studying"
            }
        }
    }
}
