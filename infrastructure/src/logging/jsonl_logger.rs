//! JSONL file writer for pipeline run events.
//!
//! Each [`RunEvent`] is serialized as a single JSON line with a `type` field
//! and `timestamp`, appended to the file via a buffered writer.

use medguard_application::ports::run_logger::{RunEvent, RunLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL run logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
/// Existing files are appended to, so one log can span many sessions.
pub struct JsonlRunLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlRunLogger {
    /// Open a logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create run log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open run log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunLogger for JsonlRunLogger {
    fn log(&self, event: RunEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Merge payload with type + timestamp
        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlRunLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medguard_domain::{
        Chunk, ConversationHistory, GuardrailResult, PipelineState, Query, ValidationResult,
    };
    use std::io::Read;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn finished_state() -> PipelineState {
        let mut state = PipelineState::new(
            Query::try_new("What medications?").unwrap(),
            ConversationHistory::new(),
        );
        let chunks = vec![Chunk::new(1, "patient-1", "Metformin 500 mg daily", 0.1)];
        state.record_retrieval(chunks.clone()).unwrap();
        state.record_ranking(chunks).unwrap();
        state.record_prompt("prompt".to_string()).unwrap();
        state
            .record_response("Metformin 500 mg daily".to_string())
            .unwrap();
        state
            .record_guardrails(GuardrailResult::from_flags(false, false))
            .unwrap();
        state
            .record_validation(ValidationResult {
                approved: true,
                message: "Approved".to_string(),
            })
            .unwrap();
        state.append_to_history().unwrap();
        state
    }

    #[test]
    fn test_jsonl_logger_writes_completed_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let logger = JsonlRunLogger::new(&path).unwrap();

        logger.log(RunEvent::completed(&finished_state()));
        logger.log(RunEvent::failed("What allergies?", "Retrieval unavailable: index missing"));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line.get("timestamp").is_some());
        }

        assert_eq!(lines[0]["type"], "pipeline_completed");
        assert_eq!(lines[0]["state"]["query"], "What medications?");
        assert_eq!(lines[0]["state"]["stage"], "history_appended");
        assert_eq!(lines[0]["params"]["response"], "Metformin 500 mg daily");

        assert_eq!(lines[1]["type"], "pipeline_failed");
        assert_eq!(lines[1]["query"], "What allergies?");
        assert!(lines[1].get("state").is_none());
    }

    #[test]
    fn test_jsonl_logger_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");

        for query in ["first", "second"] {
            let logger = JsonlRunLogger::new(&path).unwrap();
            logger.log(RunEvent::failed(query, "cancelled"));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["query"], "first");
        assert_eq!(lines[1]["query"], "second");
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runs.jsonl");
        let logger = JsonlRunLogger::new(&path).unwrap();

        logger.log(RunEvent::new("simple_event", serde_json::json!("just a string")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "simple_event");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_jsonl_logger_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(JsonlRunLogger::new(blocker.join("runs.jsonl")).is_none());
    }

    mod turn {
        use super::super::JsonlRunLogger;
        use async_trait::async_trait;
        use medguard_application::{
            GatewayError, LlmGateway, PatientRecord, PipelineError, PipelineGateways,
            PipelineParams, RunPipelineUseCase, SearchError, SearchHit, VectorSearchPort,
        };
        use medguard_domain::{Completion, Message};
        use std::sync::Arc;

        struct OneRecordSearch;

        #[async_trait]
        impl VectorSearchPort for OneRecordSearch {
            async fn search(
                &self,
                _query: &str,
                _k: usize,
            ) -> Result<Vec<SearchHit>, SearchError> {
                Ok(vec![SearchHit::new(0, 0.2)])
            }

            async fn record(&self, _index: usize) -> Result<Option<PatientRecord>, SearchError> {
                Ok(Some(PatientRecord {
                    patient_id: "patient-1".to_string(),
                    summary: "Type 2 diabetes on metformin 500 mg".to_string(),
                }))
            }
        }

        /// Cites record 1, answers, and approves with the same reply.
        struct FixedReply;

        #[async_trait]
        impl LlmGateway for FixedReply {
            fn model(&self) -> &str {
                "fixed"
            }

            async fn invoke(&self, _messages: &[Message]) -> Result<Completion, GatewayError> {
                Ok(Completion::text("[1]\nApproved: metformin 500 mg daily."))
            }
        }

        fn use_case(logger: JsonlRunLogger) -> RunPipelineUseCase {
            RunPipelineUseCase::new(
                Arc::new(OneRecordSearch),
                PipelineGateways::shared(Arc::new(FixedReply)),
                PipelineParams::default(),
            )
            .with_run_logger(Arc::new(logger))
        }

        #[tokio::test]
        async fn test_turn_is_logged_to_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("runs.jsonl");
            let use_case = use_case(JsonlRunLogger::new(&path).unwrap());

            let state = use_case.execute("What medications?", None).await.unwrap();
            assert!(state.is_complete());
            drop(use_case);

            let lines = super::read_lines(&path);
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0]["type"], "pipeline_completed");
            assert_eq!(lines[0]["state"]["ranked_chunks"][0]["patient_id"], "patient-1");
        }

        // Every write to /dev/full fails with ENOSPC.
        #[cfg(target_os = "linux")]
        #[tokio::test]
        async fn test_unwritable_log_does_not_fail_the_turn() {
            let Some(logger) = JsonlRunLogger::new("/dev/full") else {
                return;
            };
            let use_case = use_case(logger);

            let state = use_case.execute("What medications?", None).await.unwrap();
            assert!(state.is_complete());
            assert!(state.validation().unwrap().approved);

            let err = use_case.execute("   ", None).await.unwrap_err();
            assert!(matches!(err, PipelineError::EmptyQuery));
        }
    }
}
