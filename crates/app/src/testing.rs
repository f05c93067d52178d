//! In-memory fakes for every port, shared by the unit tests of this crate.

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use playhook_domain::action::{Action, ActionKind, Phase};
use playhook_domain::display::DisplayMode;
use playhook_domain::document::Document;
use playhook_domain::error::PlayhookError;
use playhook_domain::id::ActionId;
use playhook_domain::log::LogEntry;
use playhook_domain::notification::Notification;

use crate::executors::{Dispatch, ExecutionContext, ExecutionOutcome};
use crate::ports::{
    ActionRecorder, AudioControl, CommandOutput, CommandRunner, DisplayControl, DocumentStore,
    Invocation, Notifier, ProcessControl, ProcessInfo,
};

fn host_error(message: &str) -> PlayhookError {
    PlayhookError::Host(message.to_string().into())
}

// ── Actions ────────────────────────────────────────────────────────

pub fn action(kind: ActionKind, priority: i32) -> Action {
    Action::builder(kind)
        .name(format!("action {priority}"))
        .priority(priority)
        .build()
        .unwrap()
}

/// A before-start mirror that closes `process`.
pub fn close_app(process: &str, priority: i32) -> Action {
    Action::builder(ActionKind::TerminateProcess {
        path: process.to_string(),
        arguments: String::new(),
    })
    .name(format!("Close {process}"))
    .phase(Phase::BeforeStart)
    .mirror(true)
    .priority(priority)
    .build()
    .unwrap()
}

pub fn command(name: &str, phase: Phase, priority: i32) -> Action {
    Action::builder(ActionKind::RunSystemCommand {
        command: format!("echo {name}"),
        arguments: String::new(),
    })
    .name(name)
    .phase(phase)
    .priority(priority)
    .build()
    .unwrap()
}

// ── Processes ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeProcesses {
    running: Mutex<Vec<ProcessInfo>>,
    launched: Mutex<Vec<(String, Vec<String>)>>,
    terminated: Mutex<Vec<u32>>,
    next_pid: AtomicU32,
    fail_list: AtomicBool,
    fail_launch: AtomicBool,
    fail_terminate: AtomicBool,
}

impl FakeProcesses {
    pub fn with_running(names: &[&str]) -> Self {
        let processes = Self::default();
        for name in names {
            processes.spawn(name);
        }
        processes
    }

    fn spawn(&self, name: &str) -> u32 {
        let pid = self.next_pid.fetch_add(1, Ordering::SeqCst) + 100;
        self.running.lock().unwrap().push(ProcessInfo {
            pid,
            name: name.to_string(),
        });
        pid
    }

    pub fn fail_listing(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_launching(&self) {
        self.fail_launch.store(true, Ordering::SeqCst);
    }

    pub fn fail_terminating(&self) {
        self.fail_terminate.store(true, Ordering::SeqCst);
    }

    pub fn launched(&self) -> Vec<(String, Vec<String>)> {
        self.launched.lock().unwrap().clone()
    }

    pub fn launched_paths(&self) -> Vec<String> {
        self.launched().into_iter().map(|(path, _)| path).collect()
    }

    pub fn terminated(&self) -> Vec<u32> {
        self.terminated.lock().unwrap().clone()
    }

    pub fn is_running_now(&self, name: &str) -> bool {
        self.running.lock().unwrap().iter().any(|p| p.matches(name))
    }
}

impl ProcessControl for FakeProcesses {
    fn list(&self) -> impl Future<Output = Result<Vec<ProcessInfo>, PlayhookError>> + Send {
        let result = if self.fail_list.load(Ordering::SeqCst) {
            Err(host_error("process table unavailable"))
        } else {
            Ok(self.running.lock().unwrap().clone())
        };
        async move { result }
    }

    fn launch(
        &self,
        path: &str,
        args: &[String],
    ) -> impl Future<Output = Result<u32, PlayhookError>> + Send {
        let result = if self.fail_launch.load(Ordering::SeqCst) {
            Err(host_error("no such file"))
        } else {
            self.launched
                .lock()
                .unwrap()
                .push((path.to_string(), args.to_vec()));
            Ok(self.spawn(path))
        };
        async move { result }
    }

    fn terminate(&self, pid: u32) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        let result = if self.fail_terminate.load(Ordering::SeqCst) {
            Err(host_error("access denied"))
        } else {
            self.running.lock().unwrap().retain(|p| p.pid != pid);
            self.terminated.lock().unwrap().push(pid);
            Ok(())
        };
        async move { result }
    }
}

// ── Commands ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeCommands {
    invocations: Mutex<Vec<Invocation>>,
    responses: Mutex<VecDeque<CommandOutput>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeCommands {
    /// Queue the output of the next run. Unqueued runs exit with code 0.
    pub fn respond(&self, exit_code: i32, stdout: &str, stderr: &str) {
        self.responses.lock().unwrap().push_back(CommandOutput {
            exit_code: Some(exit_code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        });
    }

    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeCommands {
    fn run(
        &self,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<CommandOutput, PlayhookError>> + Send {
        self.invocations.lock().unwrap().push(invocation.clone());
        let output = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(CommandOutput {
                exit_code: Some(0),
                ..CommandOutput::default()
            });
        let delay = *self.delay.lock().unwrap();
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok(output)
        }
    }
}

// ── Display ────────────────────────────────────────────────────────

pub struct FakeDisplay {
    current: Mutex<DisplayMode>,
    /// `None` accepts every mode.
    accepted: Mutex<Option<Vec<DisplayMode>>>,
    attempts: Mutex<Vec<DisplayMode>>,
}

impl Default for FakeDisplay {
    fn default() -> Self {
        Self {
            current: Mutex::new(DisplayMode::new(2560, 1440, 144)),
            accepted: Mutex::new(None),
            attempts: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDisplay {
    pub fn accept_only(&self, modes: &[DisplayMode]) {
        *self.accepted.lock().unwrap() = Some(modes.to_vec());
    }

    pub fn set_current(&self, mode: DisplayMode) {
        *self.current.lock().unwrap() = mode;
    }

    pub fn current(&self) -> DisplayMode {
        *self.current.lock().unwrap()
    }

    pub fn attempts(&self) -> Vec<DisplayMode> {
        self.attempts.lock().unwrap().clone()
    }
}

impl DisplayControl for FakeDisplay {
    fn current_mode(&self) -> impl Future<Output = Result<DisplayMode, PlayhookError>> + Send {
        let mode = self.current();
        async move { Ok(mode) }
    }

    fn apply_mode(
        &self,
        mode: DisplayMode,
    ) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        self.attempts.lock().unwrap().push(mode);
        let accepted = self
            .accepted
            .lock()
            .unwrap()
            .as_ref()
            .is_none_or(|modes| modes.contains(&mode));
        let result = if accepted {
            self.set_current(mode);
            Ok(())
        } else {
            Err(host_error("mode not supported"))
        };
        async move { result }
    }
}

// ── Audio ──────────────────────────────────────────────────────────

pub struct FakeAudio {
    volume: Mutex<u8>,
    changes: Mutex<Vec<u8>>,
    mutes: Mutex<Vec<(String, bool, &'static str)>>,
    sessions: AtomicBool,
    fallback: AtomicBool,
}

impl FakeAudio {
    pub fn with_volume(volume: u8) -> Self {
        Self {
            volume: Mutex::new(volume),
            changes: Mutex::new(Vec::new()),
            mutes: Mutex::new(Vec::new()),
            sessions: AtomicBool::new(true),
            fallback: AtomicBool::new(true),
        }
    }

    pub fn volume(&self) -> u8 {
        *self.volume.lock().unwrap()
    }

    /// Change the volume behind the controller's back, like a user would.
    pub fn set_external_volume(&self, volume: u8) {
        *self.volume.lock().unwrap() = volume;
    }

    pub fn volume_changes(&self) -> Vec<u8> {
        self.changes.lock().unwrap().clone()
    }

    pub fn mutes(&self) -> Vec<(String, bool, &'static str)> {
        self.mutes.lock().unwrap().clone()
    }

    pub fn without_sessions(&self) {
        self.sessions.store(false, Ordering::SeqCst);
    }

    pub fn without_fallback(&self) {
        self.fallback.store(false, Ordering::SeqCst);
    }
}

impl AudioControl for FakeAudio {
    fn master_volume(&self) -> impl Future<Output = Result<u8, PlayhookError>> + Send {
        let volume = self.volume();
        async move { Ok(volume) }
    }

    fn set_master_volume(
        &self,
        percent: u8,
    ) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        self.set_external_volume(percent);
        self.changes.lock().unwrap().push(percent);
        async { Ok(()) }
    }

    fn set_session_mute(
        &self,
        process: &str,
        mute: bool,
    ) -> impl Future<Output = Result<bool, PlayhookError>> + Send {
        let found = self.sessions.load(Ordering::SeqCst);
        if found {
            self.mutes
                .lock()
                .unwrap()
                .push((process.to_string(), mute, "session"));
        }
        async move { Ok(found) }
    }

    fn set_mute_fallback(
        &self,
        process: &str,
        mute: bool,
    ) -> impl Future<Output = Result<bool, PlayhookError>> + Send {
        let found = self.fallback.load(Ordering::SeqCst);
        let result = if found {
            self.mutes
                .lock()
                .unwrap()
                .push((process.to_string(), mute, "fallback"));
            Ok(true)
        } else {
            Err(host_error("pactl not available"))
        };
        async move { result }
    }
}

// ── Document store ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Option<Document>>,
    corrupt: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn with_document(document: Document) -> Self {
        let store = Self::default();
        *store.document.lock().unwrap() = Some(document);
        store
    }

    pub fn corrupt(&self) {
        self.corrupt.store(true, Ordering::SeqCst);
    }

    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Option<Document> {
        self.document.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> impl Future<Output = Result<Option<Document>, PlayhookError>> + Send {
        let result = if self.corrupt.load(Ordering::SeqCst) {
            Err(PlayhookError::Storage("expected value at line 1".into()))
        } else {
            Ok(self.stored())
        };
        async move { result }
    }

    fn save(&self, document: &Document) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        let result = if self.fail_saves.load(Ordering::SeqCst) {
            Err(PlayhookError::Storage("disk full".into()))
        } else {
            *self.document.lock().unwrap() = Some(document.clone());
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };
        async move { result }
    }
}

impl DocumentStore for std::sync::Arc<MemoryStore> {
    fn load(&self) -> impl Future<Output = Result<Option<Document>, PlayhookError>> + Send {
        MemoryStore::load(self)
    }

    fn save(&self, document: &Document) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        MemoryStore::save(self, document)
    }
}

// ── Notifications and log ──────────────────────────────────────────

#[derive(Default)]
pub struct SpyNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl SpyNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for SpyNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct SpyRecorder {
    entries: Mutex<Vec<LogEntry>>,
}

impl SpyRecorder {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl ActionRecorder for SpyRecorder {
    fn record(&self, entry: LogEntry) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        self.entries.lock().unwrap().push(entry);
        async { Ok(()) }
    }
}

// ── Dispatcher ─────────────────────────────────────────────────────

/// Records every dispatched action and succeeds unless told otherwise.
#[derive(Default)]
pub struct RecordingDispatcher {
    calls: Mutex<Vec<Action>>,
    failing: Mutex<HashSet<ActionId>>,
    sessions: AtomicUsize,
}

impl RecordingDispatcher {
    pub fn fail(&self, id: ActionId) {
        self.failing.lock().unwrap().insert(id);
    }

    pub fn calls(&self) -> Vec<Action> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|a| a.name).collect()
    }

    pub fn sessions(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }
}

impl Dispatch for RecordingDispatcher {
    fn execute(
        &self,
        action: &Action,
        _ctx: &ExecutionContext,
    ) -> impl Future<Output = ExecutionOutcome> + Send {
        self.calls.lock().unwrap().push(action.clone());
        let outcome = if self.failing.lock().unwrap().contains(&action.id) {
            ExecutionOutcome::failed(1, "failed")
        } else {
            ExecutionOutcome::ok("ok")
        };
        async move { outcome }
    }

    fn begin_session(&self) -> impl Future<Output = ()> + Send {
        self.sessions.fetch_add(1, Ordering::SeqCst);
        async {}
    }
}
