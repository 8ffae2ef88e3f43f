//! Batch Orchestrator
//!
//! Runs one batch on a background tokio task:
//!
//! ```text
//! collect ─► for each file (≤ concurrency in flight):
//!              encode ─► extract ─► parse ─► aggregate ─► record_completion
//!                                                              │
//!                                         last file ──► completion sink
//! ```
//!
//! Per-file failures are recorded and reported but never stop the batch.

use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio::task::JoinHandle;

use super::aggregator::ResultAggregator;
use super::collector::collect_image_files;
use super::tracker::CompletionTracker;
use super::types::{
    Batch, BatchOptions, BatchResult, BatchState, FailurePolicy, FileFailure, FileTask,
    TaskOutcome,
};
use crate::ai::extraction::types::{ChatResponse, ExtractionRecord, IMAGE_FIELD};
use crate::ai::extraction::{encode_image, parse_extraction, ExtractionService};
use crate::ai::prompts::build_extraction_prompt;
use crate::error::{FailureKind, ForminatorError, Result};

/// Receives human-readable progress lines
pub type ProgressSender = mpsc::UnboundedSender<String>;

/// Forwards progress to the caller, if the caller is listening
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    sender: Option<ProgressSender>,
}

impl ProgressReporter {
    pub fn new(sender: Option<ProgressSender>) -> Self {
        Self { sender }
    }

    pub fn report(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("{}", message);
        if let Some(sender) = &self.sender {
            // Receiver gone means nobody is displaying progress any more
            let _ = sender.send(message);
        }
    }
}

pub struct Orchestrator {
    service: Arc<dyn ExtractionService>,
    options: BatchOptions,
    state: Arc<Mutex<BatchState>>,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn ExtractionService>) -> Self {
        Self {
            service,
            options: BatchOptions::default(),
            state: Arc::new(Mutex::new(BatchState::Idle)),
        }
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn state(&self) -> BatchState {
        *lock_state(&self.state)
    }

    /// Scan `directory` and process it in the background
    ///
    /// Discovery errors are returned here and no batch starts. Otherwise
    /// `on_complete` is called exactly once, from the background task, after
    /// every file has completed. An empty directory completes immediately.
    /// Aborting the returned handle before then puts the orchestrator back
    /// to `Idle` without calling `on_complete`.
    pub fn start<F>(
        &self,
        directory: &Path,
        progress: Option<ProgressSender>,
        on_complete: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(BatchResult) + Send + 'static,
    {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| ForminatorError::NoRuntime)?;

        let previous = {
            let mut state = lock_state(&self.state);
            if *state == BatchState::Running {
                return Err(ForminatorError::AlreadyRunning);
            }
            std::mem::replace(&mut *state, BatchState::Running)
        };

        let files = match collect_image_files(directory) {
            Ok(files) => files,
            Err(e) => {
                *lock_state(&self.state) = previous;
                return Err(e);
            }
        };

        let batch = Batch::new(directory, files);
        let aggregator = Arc::new(ResultAggregator::new());

        let state = Arc::clone(&self.state);
        let batch_id = batch.id;
        let batch_dir = batch.directory.clone();
        let file_count = batch.len();
        let started_at = batch.created_at;

        let tracker = CompletionTracker::new(
            batch.len(),
            Arc::clone(&aggregator),
            Box::new(move |snapshot| {
                let result = BatchResult {
                    batch_id,
                    directory: batch_dir,
                    file_count,
                    records: snapshot.records,
                    tokens: snapshot.tokens,
                    failures: snapshot.failures,
                    tasks: snapshot.tasks,
                    started_at,
                    finished_at: Utc::now(),
                };
                tracing::info!(
                    batch_id = %result.batch_id,
                    files = result.file_count,
                    failed = result.failures.len(),
                    prompt_tokens = result.tokens.prompt_tokens,
                    completion_tokens = result.tokens.completion_tokens,
                    "Batch complete"
                );
                *lock_state(&state) = BatchState::Completed;
                on_complete(result);
            }),
        );

        let ctx = Arc::new(WorkerContext {
            service: Arc::clone(&self.service),
            options: self.options.clone(),
            aggregator,
            tracker,
            progress: ProgressReporter::new(progress),
        });

        let guard = RunningGuard {
            state: Arc::clone(&self.state),
            ctx: Arc::clone(&ctx),
        };
        Ok(runtime.spawn(run_batch(batch, ctx, guard)))
    }

    /// Process `directory` and wait for the result
    pub async fn run(
        &self,
        directory: &Path,
        progress: Option<ProgressSender>,
    ) -> Result<BatchResult> {
        let (tx, rx) = oneshot::channel();
        let handle = self.start(directory, progress, move |result| {
            let _ = tx.send(result);
        })?;

        match rx.await {
            Ok(result) => Ok(result),
            Err(_) => {
                let reason = match handle.await {
                    Err(e) => e.to_string(),
                    Ok(()) => "completion was never signalled".to_string(),
                };
                *lock_state(&self.state) = BatchState::Idle;
                Err(ForminatorError::BatchAborted(reason))
            }
        }
    }
}

fn lock_state(state: &Mutex<BatchState>) -> std::sync::MutexGuard<'_, BatchState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Shared by every worker of one batch
struct WorkerContext {
    service: Arc<dyn ExtractionService>,
    options: BatchOptions,
    aggregator: Arc<ResultAggregator>,
    tracker: CompletionTracker,
    progress: ProgressReporter,
}

impl WorkerContext {
    /// Record a failed file and report it
    fn fail(&self, path: &Path, kind: FailureKind, message: String) -> TaskOutcome {
        tracing::warn!(
            file = %path.display(),
            kind = kind.as_str(),
            "Error processing image: {}",
            message
        );
        self.progress.report(format!(
            "Error processing image {}: {}",
            path.display(),
            message
        ));

        let placeholder = match self.options.failure_policy {
            FailurePolicy::Placeholder => Some(placeholder_record(path)),
            FailurePolicy::Skip => None,
        };
        self.aggregator.record_failure(
            FileFailure {
                path: path.to_path_buf(),
                kind,
                message,
            },
            placeholder,
        );

        TaskOutcome::Failure(kind)
    }
}

/// Releases the `Running` state if the batch task goes away before completing
struct RunningGuard {
    state: Arc<Mutex<BatchState>>,
    ctx: Arc<WorkerContext>,
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        if self.ctx.tracker.is_complete() {
            return;
        }
        let mut state = lock_state(&self.state);
        if *state == BatchState::Running {
            tracing::warn!(
                "Batch stopped after {} of {} files",
                self.ctx.tracker.completed(),
                self.ctx.tracker.expected()
            );
            *state = BatchState::Idle;
        }
    }
}

async fn run_batch(batch: Batch, ctx: Arc<WorkerContext>, _guard: RunningGuard) {
    tracing::info!(
        batch_id = %batch.id,
        files = batch.len(),
        concurrency = ctx.options.concurrency,
        "Starting batch in {}",
        batch.directory.display()
    );

    if batch.is_empty() {
        ctx.progress.report(format!(
            "No image files found in {}",
            batch.directory.display()
        ));
        ctx.tracker.complete_if_empty();
        return;
    }

    let semaphore = Arc::new(Semaphore::new(ctx.options.concurrency.max(1)));
    let mut workers = FuturesUnordered::new();

    for task in batch.tasks() {
        // Acquired before spawning so files start in discovery order
        let permit = Arc::clone(&semaphore).acquire_owned().await.ok();
        let worker_ctx = Arc::clone(&ctx);
        let (index, path) = (task.index, task.path.clone());

        let handle = tokio::spawn(async move {
            let _permit = permit;
            process_file(task, &worker_ctx).await;
        });
        workers.push(async move { (index, path, handle.await) });
    }

    while let Some((index, path, joined)) = workers.next().await {
        if let Err(e) = joined {
            tracing::error!("Worker for {} stopped: {}", path.display(), e);
            let outcome = ctx.fail(
                &path,
                FailureKind::Aborted,
                format!("worker stopped: {}", e),
            );
            let mut task = FileTask::new(index, path);
            task.complete(outcome);
            ctx.aggregator.record_task(task);
            ctx.tracker.record_completion();
        }
    }
}

async fn process_file(mut task: FileTask, ctx: &WorkerContext) {
    let file_name = task.file_name();
    ctx.progress.report(format!("Processing {}...", file_name));
    task.dispatch();

    let outcome = match extract_file(&task.path, &file_name, ctx.service.as_ref()).await {
        Ok(response) => match parse_extraction(&response) {
            Some(mut record) => {
                record.insert(IMAGE_FIELD.to_string(), Value::String(file_name));
                tracing::debug!("Extracted {:?}", record);
                ctx.aggregator.record_success(record, response.usage);
                ctx.progress
                    .report(format!("Processed image {}", task.path.display()));
                TaskOutcome::Success
            }
            None => ctx.fail(
                &task.path,
                FailureKind::Unparseable,
                "no JSON object found in response".to_string(),
            ),
        },
        Err(e) => {
            let kind = e.failure_kind().unwrap_or(FailureKind::Transport);
            ctx.fail(&task.path, kind, e.to_string())
        }
    };

    task.complete(outcome);
    ctx.aggregator.record_task(task);
    ctx.tracker.record_completion();
}

async fn extract_file(
    path: &Path,
    file_name: &str,
    service: &dyn ExtractionService,
) -> Result<ChatResponse> {
    let image = encode_image(path).await?;
    let prompt = build_extraction_prompt(file_name);
    service.extract(&prompt, &image).await
}

/// Stand-in row for a file without usable data
fn placeholder_record(path: &Path) -> ExtractionRecord {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    let mut record = ExtractionRecord::new();
    record.insert(IMAGE_FIELD.to_string(), Value::String(file_name));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::extraction::types::{Choice, ResponseMessage, Usage};
    use crate::ai::extraction::EncodedImage;
    use crate::batch::types::TaskState;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Scripted extraction service keyed by the file name in the prompt
    #[derive(Default)]
    struct ScriptedService {
        replies: HashMap<String, Reply>,
        delay: Option<Duration>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    #[derive(Clone)]
    enum Reply {
        Content(String, Usage),
        Status(u16),
        Panic,
    }

    impl ScriptedService {
        fn reply(mut self, file: &str, content: &str, prompt_tokens: u64) -> Self {
            self.replies.insert(
                file.to_string(),
                Reply::Content(
                    content.to_string(),
                    Usage {
                        prompt_tokens,
                        completion_tokens: prompt_tokens / 10,
                    },
                ),
            );
            self
        }

        fn fail(mut self, file: &str, status: u16) -> Self {
            self.replies.insert(file.to_string(), Reply::Status(status));
            self
        }

        fn panic_on(mut self, file: &str) -> Self {
            self.replies.insert(file.to_string(), Reply::Panic);
            self
        }
    }

    #[async_trait]
    impl ExtractionService for ScriptedService {
        async fn extract(&self, prompt: &str, _image: &EncodedImage) -> Result<ChatResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let reply = self
                .replies
                .iter()
                .find(|(file, _)| prompt.contains(&format!("file name is {}.", file)))
                .map(|(_, reply)| reply.clone())
                .unwrap_or(Reply::Status(404));

            match reply {
                Reply::Content(content, usage) => Ok(ChatResponse {
                    choices: vec![Choice {
                        message: ResponseMessage {
                            content: Some(content),
                        },
                    }],
                    usage,
                }),
                Reply::Status(status) => Err(ForminatorError::Status {
                    status,
                    body: "scripted failure".to_string(),
                }),
                Reply::Panic => panic!("scripted worker panic"),
            }
        }
    }

    fn forms_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"\xFF\xD8\xFF fake jpeg").unwrap();
        }
        dir
    }

    fn fenced(value: serde_json::Value) -> String {
        format!("```json\n{}\n```", value)
    }

    fn drain(mut rx: mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    #[tokio::test]
    async fn test_mixed_batch_with_placeholder_policy() {
        let dir = forms_dir(&["a.jpg", "b.png", "c.jpeg"]);
        let service = ScriptedService::default()
            .reply("a.jpg", &fenced(json!({"first_name": "Ada", "email": "ada@example.com"})), 100)
            .reply(
                "b.png",
                &fenced(json!({"first_name": "Bob", "email": "bob@example.com", "city": "Boston"})),
                200,
            )
            .fail("c.jpeg", 503);

        let orchestrator = Orchestrator::new(Arc::new(service));
        let (tx, rx) = mpsc::unbounded_channel();
        let result = orchestrator.run(dir.path(), Some(tx)).await.unwrap();

        assert_eq!(result.file_count, 3);
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].kind, FailureKind::Status);
        assert_eq!(result.succeeded(), 2);
        assert_eq!(result.tokens.prompt_tokens, 300);
        assert_eq!(result.tokens.completion_tokens, 30);

        assert_eq!(result.records[0]["image"], json!("a.jpg"));
        assert_eq!(result.records[1]["city"], json!("Boston"));
        assert_eq!(result.records[2].len(), 1);
        assert_eq!(result.records[2]["image"], json!("c.jpeg"));

        let messages = drain(rx);
        assert!(messages.len() >= 6, "got {:?}", messages);
        assert_eq!(messages[0], "Processing a.jpg...");
        assert!(messages
            .iter()
            .any(|m| m.starts_with("Error processing image") && m.contains("c.jpeg")));
        assert_eq!(orchestrator.state(), BatchState::Completed);

        assert_eq!(result.tasks.len(), 3);
        for task in &result.tasks {
            let expected = if task.file_name() == "c.jpeg" {
                TaskOutcome::Failure(FailureKind::Status)
            } else {
                TaskOutcome::Success
            };
            assert_eq!(task.state(), TaskState::Completed(expected));
        }
    }

    #[tokio::test]
    async fn test_skip_policy_omits_failed_rows() {
        let dir = forms_dir(&["a.jpg", "b.png", "c.jpeg"]);
        let service = ScriptedService::default()
            .reply("a.jpg", &fenced(json!({"first_name": "Ada"})), 10)
            .reply("b.png", "I could not read this form.", 10)
            .fail("c.jpeg", 500);

        let orchestrator = Orchestrator::new(Arc::new(service)).with_options(BatchOptions {
            concurrency: 1,
            failure_policy: FailurePolicy::Skip,
        });
        let result = orchestrator.run(dir.path(), None).await.unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.failures.len(), 2);
        // Unparsed responses contribute no tokens
        assert_eq!(result.tokens.prompt_tokens, 10);
        let kinds: Vec<FailureKind> = result.failures.iter().map(|f| f.kind).collect();
        assert!(kinds.contains(&FailureKind::Unparseable));
        assert!(kinds.contains(&FailureKind::Status));
    }

    #[tokio::test]
    async fn test_empty_directory_completes_immediately() {
        let dir = forms_dir(&[]);
        fs::write(dir.path().join("readme.txt"), b"not a form").unwrap();
        let service = Arc::new(ScriptedService::default());

        let orchestrator = Orchestrator::new(service.clone());
        let result = orchestrator.run(dir.path(), None).await.unwrap();

        assert_eq!(result.file_count, 0);
        assert!(result.records.is_empty());
        assert_eq!(result.tokens.total(), 0);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(orchestrator.state(), BatchState::Completed);
    }

    #[tokio::test]
    async fn test_missing_directory_does_not_start() {
        let dir = TempDir::new().unwrap();
        let orchestrator = Orchestrator::new(Arc::new(ScriptedService::default()));

        let err = orchestrator
            .run(&dir.path().join("nope"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ForminatorError::Discovery { .. }));
        assert_eq!(orchestrator.state(), BatchState::Idle);
    }

    #[tokio::test]
    async fn test_completion_sink_fires_once() {
        let dir = forms_dir(&["1.jpg", "2.jpg", "3.jpg", "4.jpg"]);
        let mut service = ScriptedService::default();
        for name in ["1.jpg", "2.jpg", "3.jpg", "4.jpg"] {
            service = service.reply(name, &fenced(json!({"zip": name})), 1);
        }

        let orchestrator = Orchestrator::new(Arc::new(service)).with_options(BatchOptions {
            concurrency: 3,
            failure_policy: FailurePolicy::Placeholder,
        });
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let handle = orchestrator
            .start(dir.path(), None, move |result| {
                assert_eq!(result.records.len(), 4);
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        handle.await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_start_while_running_is_rejected() {
        let dir = forms_dir(&["a.jpg"]);
        let service = ScriptedService {
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        }
        .reply("a.jpg", &fenced(json!({"first_name": "Ada"})), 1);

        let orchestrator = Orchestrator::new(Arc::new(service));
        let handle = orchestrator.start(dir.path(), None, |_| {}).unwrap();
        assert_eq!(orchestrator.state(), BatchState::Running);
        assert!(matches!(
            orchestrator.start(dir.path(), None, |_| {}),
            Err(ForminatorError::AlreadyRunning)
        ));

        handle.await.unwrap();
        assert_eq!(orchestrator.state(), BatchState::Completed);

        // A finished orchestrator can run again
        let result = orchestrator.run(dir.path(), None).await.unwrap();
        assert_eq!(result.records.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_is_bounded() {
        let names: Vec<String> = (0..8).map(|i| format!("form-{}.png", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let dir = forms_dir(&refs);

        let mut service = ScriptedService {
            delay: Some(Duration::from_millis(30)),
            ..Default::default()
        };
        for name in &names {
            service = service.reply(name, &fenced(json!({"image": name})), 5);
        }
        let service = Arc::new(service);

        let orchestrator = Orchestrator::new(service.clone()).with_options(BatchOptions {
            concurrency: 2,
            failure_policy: FailurePolicy::Placeholder,
        });
        let result = orchestrator.run(dir.path(), None).await.unwrap();

        assert_eq!(result.records.len(), 8);
        assert_eq!(result.tokens.prompt_tokens, 40);
        assert!(service.max_in_flight.load(Ordering::SeqCst) <= 2);
        assert_eq!(service.calls.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_unreadable_image_is_a_failed_completion() {
        let dir = forms_dir(&["a.jpg", "b.jpg"]);
        let service = ScriptedService {
            delay: Some(Duration::from_millis(100)),
            ..Default::default()
        }
        .reply("a.jpg", &fenced(json!({"first_name": "Ada"})), 1)
        .reply("b.jpg", &fenced(json!({"first_name": "Bea"})), 1);

        let orchestrator = Orchestrator::new(Arc::new(service));
        let (tx, rx) = oneshot::channel();
        let handle = orchestrator
            .start(dir.path(), None, move |result| {
                let _ = tx.send(result);
            })
            .unwrap();

        // Deleted between discovery and processing; the batch task has not run yet
        fs::remove_file(dir.path().join("b.jpg")).unwrap();
        handle.await.unwrap();

        let result = rx.await.unwrap();
        assert_eq!(result.file_count, 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].kind, FailureKind::ImageRead);
        assert_eq!(result.tokens.prompt_tokens, 1);
        assert_eq!(result.records.len(), 2);
    }

    #[tokio::test]
    async fn test_panicking_worker_is_an_aborted_completion() {
        let dir = forms_dir(&["a.jpg", "b.jpg", "c.jpg"]);
        let service = ScriptedService::default()
            .reply("a.jpg", &fenced(json!({"first_name": "Ada"})), 10)
            .panic_on("b.jpg")
            .fail("c.jpg", 500);

        let orchestrator = Orchestrator::new(Arc::new(service));
        let result = orchestrator.run(dir.path(), None).await.unwrap();

        assert_eq!(result.records.len(), 3);
        assert!(result.records.iter().any(|r| r["image"] == json!("b.jpg")));
        let mut kinds: Vec<FailureKind> = result.failures.iter().map(|f| f.kind).collect();
        kinds.sort_by_key(|k| k.as_str());
        assert_eq!(kinds, vec![FailureKind::Aborted, FailureKind::Status]);
        assert_eq!(result.tasks.len(), 3);
        assert_eq!(orchestrator.state(), BatchState::Completed);
    }

    #[test]
    fn test_start_outside_runtime_is_rejected() {
        let dir = forms_dir(&["a.jpg"]);
        let orchestrator = Orchestrator::new(Arc::new(ScriptedService::default()));

        assert!(matches!(
            orchestrator.start(dir.path(), None, |_| {}),
            Err(ForminatorError::NoRuntime)
        ));
        assert_eq!(orchestrator.state(), BatchState::Idle);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_aborted_batch_releases_running_state() {
        let dir = forms_dir(&["a.jpg", "b.jpg", "c.jpg"]);
        let mut service = ScriptedService {
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        };
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            service = service.reply(name, &fenced(json!({"first_name": name})), 1);
        }

        let orchestrator = Orchestrator::new(Arc::new(service));
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let handle = orchestrator
            .start(dir.path(), None, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        assert_eq!(orchestrator.state(), BatchState::Idle);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        let result = orchestrator.run(dir.path(), None).await.unwrap();
        assert_eq!(result.records.len(), 3);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_placeholder_record_holds_image_name() {
        let record = placeholder_record(Path::new("/forms/scan 1.png"));
        assert_eq!(record.len(), 1);
        assert_eq!(record["image"], json!("scan 1.png"));
    }
}
