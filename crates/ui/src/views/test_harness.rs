use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    Clock, GenerationError, ProgressService, SessionRunner, StudySessionService,
    TemplateContentGenerator,
};
use storage::{SessionRecordRepository, Storage};
use study_core::model::{Difficulty, Focus, SessionEvent, SessionParameters};
use study_core::time::fixed_now;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{HomeView, SessionRunnerView, start_generation};
use crate::vm::Notification;

pub const TOPIC: &str = "Photosynthesis";

#[derive(Clone)]
struct TestApp {
    study: Arc<StudySessionService>,
    progress: Arc<ProgressService>,
}

impl UiApp for TestApp {
    fn study(&self) -> Arc<StudySessionService> {
        Arc::clone(&self.study)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

/// How far a pre-built runner has progressed before rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerStage {
    Loading,
    Unavailable,
    Concepts,
    Practice,
    Review,
}

/// What happens to the runner while its generation is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InFlight {
    Kept,
    /// A new session with its own pending attempt takes its place.
    Replaced,
    /// The session ended and the runner was taken.
    Taken,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Runner(RunnerStage),
    Generation(InFlight),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Runner(stage) => rsx! { RunnerHarness { stage } },
        ViewKind::Generation(in_flight) => rsx! { GenerationHarness { in_flight } },
    }
}

#[component]
fn RunnerHarness(stage: RunnerStage) -> Element {
    let ctx = use_context::<AppContext>();
    let runner = use_signal(|| Some(staged_runner(&ctx.study(), stage)));
    let notification = use_signal(|| None::<Notification>);
    rsx! {
        SessionRunnerView { runner, notification, on_end: move |()| {} }
    }
}

#[component]
fn GenerationHarness(in_flight: InFlight) -> Element {
    let ctx = use_context::<AppContext>();
    let study = ctx.study();
    let mut runner = use_signal(|| None::<SessionRunner>);
    let notification = use_signal(|| None::<Notification>);

    use_hook(move || {
        let params = SessionParameters::new(TOPIC, Difficulty::Beginner, Focus::Mixed).unwrap();
        runner.set(Some(study.activate(params.clone())));
        start_generation(study.clone(), runner, notification);
        match in_flight {
            InFlight::Kept => {}
            InFlight::Replaced => {
                let mut next = study.activate(params);
                next.begin_generation().unwrap();
                runner.set(Some(next));
            }
            InFlight::Taken => runner.set(None),
        }
    });

    let status = match runner.read().as_ref() {
        None => "no session",
        Some(active) if active.is_loading() => "loading",
        Some(active) if active.content().is_some() => "ready",
        Some(_) => "unavailable",
    };
    rsx! {
        p { id: "generation-status", "status: {status}" }
        if runner.read().is_some() {
            SessionRunnerView { runner, notification, on_end: move |()| {} }
        }
    }
}

fn staged_runner(study: &StudySessionService, stage: RunnerStage) -> SessionRunner {
    let params = SessionParameters::new(TOPIC, Difficulty::Beginner, Focus::Mixed).unwrap();
    let content = TemplateContentGenerator::build(&params).unwrap();
    let mut runner = study.activate(params);
    if stage == RunnerStage::Loading {
        return runner;
    }

    let ticket = runner.begin_generation().unwrap();
    if stage == RunnerStage::Unavailable {
        runner.resolve_generation(ticket, Err(GenerationError::EmptyResponse));
        return runner;
    }
    runner.resolve_generation(ticket, Ok(content));

    let correct = format!("It describes the fundamental principles of {TOPIC}");
    let events = match stage {
        RunnerStage::Practice => vec![SessionEvent::Advance, SessionEvent::SubmitAnswer(correct)],
        RunnerStage::Review => vec![
            SessionEvent::Advance,
            SessionEvent::SubmitAnswer(correct),
            SessionEvent::Next,
            SessionEvent::SubmitAnswer("True".into()),
            SessionEvent::Next,
            SessionEvent::Next,
        ],
        _ => Vec::new(),
    };
    for event in events {
        runner.dispatch(event).unwrap();
    }
    runner
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let records = Arc::clone(&storage.session_records);
    setup_view_harness_with_records(view, storage, records)
}

pub fn setup_view_harness_with_records(
    view: ViewKind,
    storage: Storage,
    records: Arc<dyn SessionRecordRepository>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let study = Arc::new(StudySessionService::new(
        clock,
        Arc::new(TemplateContentGenerator::new()),
        Arc::clone(&records),
    ));
    let progress = Arc::new(ProgressService::new(records));
    let app = Arc::new(TestApp { study, progress });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, storage }
}
