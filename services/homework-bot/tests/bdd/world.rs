//! BDD test world for the homework bot

use std::sync::{Arc, Mutex};

use cucumber::World;
use homework_bot::engine::{CycleOutcome, PollState};
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::HomeworkBotError;

/// HTTP client that replays scripted GET results, repeating the last one
#[derive(Debug, Default)]
pub struct ScriptedHttp {
    responses: Mutex<Vec<Result<HttpResponse, String>>>,
    calls: Mutex<usize>,
}

impl ScriptedHttp {
    pub fn push(&self, response: Result<HttpResponse, String>) {
        self.responses.lock().unwrap().push(response);
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttp {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        let responses = self.responses.lock().unwrap();
        let mut calls = self.calls.lock().unwrap();
        let index = (*calls).min(responses.len().saturating_sub(1));
        *calls += 1;
        match responses.get(index) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(msg)) => Err(HomeworkBotError::Http(msg.clone())),
            None => Err(HomeworkBotError::Http("no scripted response".to_string())),
        }
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            body: r#"{"ok":true}"#.to_string(),
        })
    }
}

/// Notifier that records every delivered text
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub fail: Mutex<bool>,
    pub sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, _chat_id: &str, text: &str) -> homework_bot::Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        if *self.fail.lock().unwrap() {
            Err(HomeworkBotError::Notifier("delivery refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default, World)]
pub struct HomeworkBotWorld {
    pub http: Arc<ScriptedHttp>,
    pub notifier: Arc<RecordingNotifier>,
    pub state: Option<PollState>,
    pub outcomes: Vec<CycleOutcome>,
    pub started_at: i64,
}
