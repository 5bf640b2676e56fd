use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use storage::{SessionRecordId, SessionRecordRepository, SessionTotals, Storage, StorageError};
use study_core::model::{Difficulty, Focus, SessionId, SessionParameters, SessionRecord};
use study_core::time::fixed_now;

use super::test_harness::{
    InFlight, RunnerStage, TOPIC, ViewKind, setup_view_harness, setup_view_harness_with_records,
};

async fn settle(harness: &mut super::test_harness::ViewHarness) {
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_form_and_empty_widgets() {
    let mut harness = setup_view_harness(ViewKind::Home);
    settle(&mut harness).await;
    let html = harness.render();

    assert!(html.contains("Start a study session"), "missing title in {html}");
    assert!(html.contains("Start studying"), "missing submit in {html}");
    assert!(html.contains("Mixed approach"), "missing focus option in {html}");
    assert!(html.contains("No sessions yet"), "missing progress placeholder in {html}");
    assert!(
        html.contains("Topics you study will show up here"),
        "missing recent placeholder in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_recorded_progress() {
    let mut harness = setup_view_harness(ViewKind::Home);
    let params = SessionParameters::new(TOPIC, Difficulty::Intermediate, Focus::Practice).unwrap();
    let record = SessionRecord::new(
        SessionId::new(),
        &params,
        fixed_now(),
        fixed_now() + Duration::minutes(12),
        3,
        2,
        Some(67),
    )
    .unwrap();
    harness
        .storage
        .session_records
        .append_record(&record)
        .await
        .expect("append record");

    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains(TOPIC), "missing topic in {html}");
    assert!(html.contains("67%"), "missing score in {html}");
    assert!(html.contains("12m"), "missing study time in {html}");
}

struct FailingRecords;

#[async_trait::async_trait]
impl SessionRecordRepository for FailingRecords {
    async fn append_record(
        &self,
        _record: &SessionRecord,
    ) -> Result<SessionRecordId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_record(&self, _id: SessionRecordId) -> Result<SessionRecord, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_recent(
        &self,
        _ended_from: Option<DateTime<Utc>>,
        _limit: u32,
    ) -> Result<Vec<SessionRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn totals(&self) -> Result<SessionTotals, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_progress_error_state() {
    let mut harness = setup_view_harness_with_records(
        ViewKind::Home,
        Storage::in_memory(),
        Arc::new(FailingRecords),
    );
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("Start studying"), "form should still render in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_renders_loading_indicator() {
    let mut harness = setup_view_harness(ViewKind::Runner(RunnerStage::Loading));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Preparing your study material"), "missing loading in {html}");
    assert!(html.contains(TOPIC), "missing topic in {html}");
    assert!(html.contains("0:00"), "missing timer in {html}");
    assert!(html.contains("End session"), "missing end button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_offers_retry_when_generation_failed() {
    let mut harness = setup_view_harness(ViewKind::Runner(RunnerStage::Unavailable));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Try again"), "missing retry in {html}");
    assert!(!html.contains("Key concepts"), "no partial content expected in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_renders_concepts() {
    let mut harness = setup_view_harness(ViewKind::Runner(RunnerStage::Concepts));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Key concepts"), "missing concepts in {html}");
    assert!(html.contains("Start practice (3 questions)"), "missing advance in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_renders_answered_question() {
    let mut harness = setup_view_harness(ViewKind::Runner(RunnerStage::Practice));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("Correct!"), "missing feedback in {html}");
    assert!(html.contains("option--correct"), "missing option state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn runner_smoke_renders_review_score() {
    let mut harness = setup_view_harness(ViewKind::Runner(RunnerStage::Review));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("67%"), "missing score in {html}");
    assert!(html.contains("Review again"), "missing review again in {html}");
    assert!(html.contains("No answer"), "missing unanswered item in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generation_result_reaches_the_runner_that_requested_it() {
    let mut harness = setup_view_harness(ViewKind::Generation(InFlight::Kept));
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("status: ready"), "expected content in {html}");
    assert!(html.contains("Key concepts"), "missing concepts in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generation_result_for_a_replaced_runner_is_dropped() {
    let mut harness = setup_view_harness(ViewKind::Generation(InFlight::Replaced));
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("status: loading"), "new session must keep loading in {html}");
    assert!(html.contains("Preparing your study material"), "missing loading in {html}");
    assert!(!html.contains("Key concepts"), "stale content applied in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generation_result_after_the_runner_was_taken_is_dropped() {
    let mut harness = setup_view_harness(ViewKind::Generation(InFlight::Taken));
    settle(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("status: no session"), "runner came back in {html}");
    assert!(!html.contains("Key concepts"), "stale content rendered in {html}");
}
