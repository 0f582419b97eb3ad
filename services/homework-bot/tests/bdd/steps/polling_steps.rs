//! BDD step definitions for the polling feature

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use homework_bot::api_client::PracticumClient;
use homework_bot::engine::{CycleOutcome, PollState, Poller};
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;

use crate::world::HomeworkBotWorld;

fn docstring(step: &Step) -> String {
    step.docstring
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[given(expr = "a poller whose watermark is {int}")]
fn poller_with_watermark(world: &mut HomeworkBotWorld, watermark: i64) {
    world.state = Some(PollState::new(watermark));
}

#[given("the API responds with:")]
fn api_responds_with(world: &mut HomeworkBotWorld, step: &Step) {
    world.http.push(Ok(HttpResponse {
        status: 200,
        body: docstring(step),
    }));
}

#[given(regex = r"^the API responds with the single homework record (.+)$")]
fn api_responds_with_record(world: &mut HomeworkBotWorld, record: String) {
    world.http.push(Ok(HttpResponse {
        status: 200,
        body: format!(r#"{{"homeworks": [{}], "current_date": 3000}}"#, record),
    }));
}

#[given(expr = "the API responds with HTTP status {int}")]
fn api_responds_with_status(world: &mut HomeworkBotWorld, status: u16) {
    world.http.push(Ok(HttpResponse {
        status,
        body: String::new(),
    }));
}

#[given("the API is unreachable")]
fn api_unreachable(world: &mut HomeworkBotWorld) {
    world
        .http
        .push(Err("GET failed: connection refused".to_string()));
}

#[given("message delivery fails")]
fn delivery_fails(world: &mut HomeworkBotWorld) {
    *world.notifier.fail.lock().unwrap() = true;
}

#[when(expr = "{int} poll cycle(s) run(s)")]
async fn cycles_run(world: &mut HomeworkBotWorld, count: usize) {
    let http: Arc<dyn HttpClient> = world.http.clone();
    let notifier: Arc<dyn Notifier> = world.notifier.clone();
    let poller = Poller::new(
        PracticumClient::new("http://api.test/homework_statuses/", "token", http),
        notifier,
        "chat",
        Duration::from_secs(600),
        CancellationToken::new(),
    );

    let mut state = world.state.expect("poller not configured");
    world.started_at = now_secs();
    for _ in 0..count {
        let outcome = poller.run_cycle(&mut state).await;
        world.outcomes.push(outcome);
    }
    world.state = Some(state);
}

#[then(expr = "{int} notification(s) is/are sent")]
fn notifications_sent(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(world.notifier.sent.lock().unwrap().len(), count);
}

#[then(expr = "notification {int} contains {string}")]
fn notification_contains(world: &mut HomeworkBotWorld, index: usize, text: String) {
    let sent = world.notifier.sent.lock().unwrap();
    let message = &sent[index - 1];
    assert!(message.contains(&text), "{message:?} does not contain {text:?}");
}

#[then(expr = "the watermark is {int}")]
fn watermark_is(world: &mut HomeworkBotWorld, watermark: i64) {
    assert_eq!(world.state.unwrap().watermark, watermark);
}

#[then("the watermark has advanced to the current time")]
fn watermark_is_now(world: &mut HomeworkBotWorld) {
    let watermark = world.state.unwrap().watermark;
    assert!(watermark >= world.started_at, "watermark {watermark} is stale");
}

#[then(expr = "the last cycle fails with {word}")]
fn last_cycle_fails_with(world: &mut HomeworkBotWorld, kind: String) {
    match world.outcomes.last() {
        Some(CycleOutcome::Failed { kind: actual, .. }) => {
            assert_eq!(format!("{:?}", actual), kind)
        }
        other => panic!("expected a failed cycle, got {other:?}"),
    }
}

#[then("the last cycle reports no changes")]
fn last_cycle_no_changes(world: &mut HomeworkBotWorld) {
    assert_eq!(world.outcomes.last(), Some(&CycleOutcome::NoChanges));
}

#[then(expr = "the last cycle delivered {int} message(s)")]
fn last_cycle_delivered(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(world.outcomes.last(), Some(&CycleOutcome::Delivered(count)));
}

#[then("no error is remembered")]
fn no_error_remembered(world: &mut HomeworkBotWorld) {
    assert_eq!(world.state.unwrap().last_error, None);
}
