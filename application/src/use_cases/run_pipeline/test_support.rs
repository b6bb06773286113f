//! Scripted collaborators shared by the pipeline tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::PipelineProgressNotifier;
use crate::ports::run_logger::{RunEvent, RunLogger};
use crate::ports::vector_search::{PatientRecord, SearchError, SearchHit, VectorSearchPort};
use async_trait::async_trait;
use medguard_domain::{Completion, Message, PipelineStage};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// ==================== Vector search ====================

/// In-memory search that returns the first `k` records with fixed distances.
pub(crate) struct MockSearch {
    records: Vec<PatientRecord>,
    distances: Vec<f32>,
    failure: Option<String>,
    delay: Option<Duration>,
    pub(crate) calls: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    pub(crate) fn with_records(summaries: &[&str]) -> Self {
        let records = summaries
            .iter()
            .enumerate()
            .map(|(i, summary)| PatientRecord {
                patient_id: format!("patient-{}", i + 1),
                summary: summary.to_string(),
            })
            .collect::<Vec<_>>();
        let distances = (1..=records.len()).map(|i| i as f32 / 10.0).collect();
        Self {
            records,
            distances,
            failure: None,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Five records with distances 0.1..0.5.
    pub(crate) fn five() -> Self {
        Self::with_records(&[
            "Patient takes metformin 500 mg twice daily.",
            "Patient has a history of hypertension.",
            "Patient is allergic to penicillin.",
            "Patient underwent appendectomy in 2015.",
            "Patient reports seasonal asthma.",
        ])
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::with_records(&[])
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VectorSearchPort for MockSearch {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.lock().unwrap().push((query.to_string(), k));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(SearchError::IndexUnavailable(message.clone()));
        }
        Ok(self
            .distances
            .iter()
            .take(k)
            .enumerate()
            .map(|(index, distance)| SearchHit::new(index, *distance))
            .collect())
    }

    async fn record(&self, index: usize) -> Result<Option<PatientRecord>, SearchError> {
        Ok(self.records.get(index).cloned())
    }
}

// ==================== Text generation ====================

/// A scripted reply for [`ScriptedGateway`]
pub(crate) enum Scripted {
    Reply(Completion),
    Fail(String),
    /// Never answers within any reasonable timeout
    Hang,
    /// Cancel the token, then answer
    CancelThen(CancellationToken, Completion),
}

impl Scripted {
    pub(crate) fn text(text: &str) -> Self {
        Scripted::Reply(Completion::message(text))
    }
}

/// Gateway that returns scripted replies in order and records every prompt.
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Scripted>>,
    pub(crate) prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub(crate) fn new(replies: Vec<Scripted>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::new(vec![Scripted::text(text)])
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn prompt(&self, i: usize) -> String {
        self.prompts.lock().unwrap()[i].clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, messages: &[Message]) -> Result<Completion, GatewayError> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(completion)) => Ok(completion),
            Some(Scripted::Fail(message)) => Err(GatewayError::RequestFailed(message)),
            Some(Scripted::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(GatewayError::Timeout)
            }
            Some(Scripted::CancelThen(token, completion)) => {
                token.cancel();
                Ok(completion)
            }
            None => Err(GatewayError::Other("no scripted reply left".to_string())),
        }
    }
}

// ==================== Observers ====================

#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub(crate) events: Mutex<Vec<(&'static str, Value)>>,
}

impl RunLogger for RecordingLogger {
    fn log(&self, event: RunEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) events: Mutex<Vec<String>>,
}

impl PipelineProgressNotifier for RecordingProgress {
    fn on_stage_start(&self, stage: PipelineStage) {
        self.events.lock().unwrap().push(format!("start:{stage}"));
    }

    fn on_stage_complete(&self, stage: PipelineStage) {
        self.events.lock().unwrap().push(format!("done:{stage}"));
    }

    fn on_stage_failed(&self, stage: PipelineStage, _error: &str) {
        self.events.lock().unwrap().push(format!("failed:{stage}"));
    }
}
