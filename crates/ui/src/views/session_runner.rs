use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use services::{GenerationOutcome, SessionRunner, StudySessionService, log_resolution};
use study_core::model::SessionEvent;

use crate::context::AppContext;
use crate::views::{ViewError, show_notification};
use crate::vm::{
    ConceptsVm, Notification, OptionVm, QuestionVm, ReviewItemVm, ReviewVm, RunnerBodyVm,
    RunnerVm,
};

const TICK: Duration = Duration::from_secs(1);

/// Begin a generation attempt for the active runner and resolve it in the
/// background. Results for an ended or replaced runner are dropped.
pub fn start_generation(
    study: Arc<StudySessionService>,
    runner: Signal<Option<SessionRunner>>,
    notification: Signal<Option<Notification>>,
) {
    let mut runner = runner;
    let begun = runner.write().as_mut().map(|active| {
        active
            .begin_generation()
            .map(|ticket| (ticket, active.id(), active.params().clone()))
    });
    let Some(Ok((ticket, session, params))) = begun else {
        return;
    };

    spawn(async move {
        let result = study.generate(session, &params).await;
        let outcome = match runner.write().as_mut() {
            Some(active) if active.id() == session => active.resolve_generation(ticket, result),
            _ => GenerationOutcome::Stale,
        };
        log_resolution(session, outcome);
        if outcome == GenerationOutcome::Failed {
            show_notification(
                notification,
                Notification::failure(
                    "Could not load study material",
                    ViewError::GenerationFailed.message(),
                ),
            );
        }
    });
}

#[component]
pub fn SessionRunnerView(
    runner: Signal<Option<SessionRunner>>,
    notification: Signal<Option<Notification>>,
    on_end: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let study = ctx.study();

    let mut now = use_signal({
        let study = study.clone();
        move || study.now()
    });
    {
        let study = study.clone();
        use_future(move || {
            let study = study.clone();
            async move {
                loop {
                    tokio::time::sleep(TICK).await;
                    now.set(study.now());
                }
            }
        });
    }

    let dispatch = {
        let mut runner = runner;
        use_callback(move |event: SessionEvent| {
            let result = match runner.write().as_mut() {
                Some(active) => active.dispatch(event).map(|_| ()),
                None => return,
            };
            if let Err(err) = result {
                show_notification(
                    notification,
                    Notification::failure("That didn't work", err.to_string()),
                );
            }
        })
    };

    let retry = use_callback(move |()| start_generation(study.clone(), runner, notification));

    let vm = runner
        .read()
        .as_ref()
        .map(|active| RunnerVm::from_runner(active, now()));
    let Some(vm) = vm else {
        return rsx! {};
    };
    let step = match &vm.body {
        RunnerBodyVm::Loading | RunnerBodyVm::Unavailable | RunnerBodyVm::Concepts(_) => 0,
        RunnerBodyVm::Practice(_) => 1,
        RunnerBodyVm::Review(_) => 2,
    };
    let unavailable_message = ViewError::GenerationFailed.message();

    rsx! {
        section { class: "runner card",
            header { class: "runner-header",
                div {
                    h2 { "{vm.topic}" }
                    p { class: "muted", "{vm.difficulty_label} · {vm.focus_label}" }
                }
                div { class: "runner-meta",
                    span { class: "timer", title: "Elapsed time", "{vm.elapsed_label}" }
                    button {
                        id: "end-session",
                        class: "btn btn-secondary",
                        onclick: move |_| on_end.call(()),
                        "End session"
                    }
                }
            }

            PhaseSteps { active: step }

            match vm.body {
                RunnerBodyVm::Loading => rsx! {
                    div { class: "runner-loading",
                        div { class: "spinner" }
                        p { "Preparing your study material..." }
                    }
                },
                RunnerBodyVm::Unavailable => rsx! {
                    div { class: "runner-error",
                        p { "{unavailable_message}" }
                        button {
                            id: "retry-generation",
                            class: "btn btn-primary",
                            onclick: move |_| retry.call(()),
                            "Try again"
                        }
                    }
                },
                RunnerBodyVm::Concepts(concepts) => rsx! {
                    ConceptsPanel { concepts, dispatch }
                },
                RunnerBodyVm::Practice(question) => rsx! {
                    PracticePanel { key: "{question.id}", question, dispatch }
                },
                RunnerBodyVm::Review(review) => rsx! {
                    ReviewPanel { review, dispatch }
                },
            }
        }
    }
}

#[component]
fn PhaseSteps(active: usize) -> Element {
    rsx! {
        ol { class: "phase-steps",
            for (index, label) in ["Concepts", "Practice", "Review"].into_iter().enumerate() {
                li {
                    key: "{label}",
                    class: if index == active {
                        "phase-step phase-step--active"
                    } else {
                        "phase-step"
                    },
                    "{label}"
                }
            }
        }
    }
}

#[component]
fn ConceptsPanel(concepts: ConceptsVm, dispatch: EventHandler<SessionEvent>) -> Element {
    rsx! {
        section { class: "concepts",
            h3 { "Key concepts" }
            ol { class: "concept-list",
                for (index, concept) in concepts.concepts.iter().enumerate() {
                    li { key: "{index}", "{concept}" }
                }
            }
            button {
                id: "start-practice",
                class: "btn btn-primary",
                onclick: move |_| dispatch.call(SessionEvent::Advance),
                "Start practice ({concepts.question_count} questions)"
            }
        }
    }
}

#[component]
fn PracticePanel(question: QuestionVm, dispatch: EventHandler<SessionEvent>) -> Element {
    let mut draft = use_signal(|| question.answer.clone().unwrap_or_default());
    let draft_is_blank = draft.read().trim().is_empty();
    let feedback = match question.answered_correctly {
        Some(true) => "Correct!",
        Some(false) => "Not quite.",
        None => "Explanation",
    };
    let explanation_class = if question.answered_correctly == Some(false) {
        "explanation explanation--wrong"
    } else {
        "explanation"
    };

    rsx! {
        section { class: "practice",
            div { class: "practice-meta",
                span { "{question.position_label}" }
                span { class: "badge", "{question.kind_label}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {question.progress_percent}%" }
            }

            p { class: "question-prompt", "{question.prompt}" }

            if question.open_ended {
                textarea {
                    class: "input",
                    rows: 4,
                    placeholder: "Type your answer...",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    id: "submit-answer",
                    class: "btn btn-primary",
                    disabled: draft_is_blank,
                    onclick: move |_| dispatch.call(SessionEvent::SubmitAnswer(draft())),
                    "Submit answer"
                }
            } else {
                div { class: "options",
                    for option in question.options.clone() {
                        OptionButton {
                            key: "{option.text}",
                            option,
                            on_pick: move |text| dispatch.call(SessionEvent::SubmitAnswer(text)),
                        }
                    }
                }
            }

            if let Some(explanation) = question.explanation.clone() {
                div { class: explanation_class,
                    strong { "{feedback}" }
                    p { "{explanation}" }
                }
            }

            div { class: "runner-nav",
                button {
                    id: "prev-question",
                    class: "btn btn-secondary",
                    disabled: question.is_first,
                    onclick: move |_| dispatch.call(SessionEvent::Previous),
                    "Previous"
                }
                button {
                    id: "next-question",
                    class: "btn btn-primary",
                    onclick: move |_| dispatch.call(SessionEvent::Next),
                    if question.is_last { "Finish" } else { "Next" }
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_pick: EventHandler<String>) -> Element {
    let class = match (option.selected, option.correct) {
        (_, Some(true)) => "option option--correct",
        (true, Some(false)) => "option option--wrong",
        (true, None) => "option option--selected",
        _ => "option",
    };
    let text = option.text.clone();

    rsx! {
        button { class, onclick: move |_| on_pick.call(text.clone()), "{option.text}" }
    }
}

#[component]
fn ReviewPanel(review: ReviewVm, dispatch: EventHandler<SessionEvent>) -> Element {
    rsx! {
        section { class: "review",
            div { class: "score",
                span { class: "score-value", "{review.score_label}" }
                p { "{review.tally_label}" }
                if let Some(note) = review.denominator_note {
                    p { class: "muted", "{note}" }
                }
            }

            h3 { "Summary" }
            p { class: "summary", "{review.summary}" }

            h3 { "Your answers" }
            ul { class: "review-items",
                for (index, item) in review.items.iter().enumerate() {
                    ReviewItem { key: "{index}", item: item.clone() }
                }
            }

            button {
                id: "review-again",
                class: "btn btn-secondary",
                onclick: move |_| dispatch.call(SessionEvent::ReviewAgain),
                "Review again"
            }
        }
    }
}

#[component]
fn ReviewItem(item: ReviewItemVm) -> Element {
    let class = match item.correct {
        Some(true) => "review-item review-item--correct",
        Some(false) => "review-item review-item--wrong",
        None => "review-item",
    };

    rsx! {
        li { class,
            p { class: "review-prompt", "{item.prompt}" }
            p { "Your answer: {item.your_answer}" }
            if let Some(correct) = item.correct_answer {
                p { class: "muted", "Correct answer: {correct}" }
            }
        }
    }
}
