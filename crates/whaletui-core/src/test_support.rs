//! Test doubles shared by the whaletui crates
//!
//! [`MockProvider`] stands in for a container runtime; [`ScriptedExec`]
//! is a canned exec function for driving a `Session` directly.

use crate::{CoreError, ExecFn};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use whaletui_provider::*;

/// A provider method invocation seen by [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Exec {
        id: String,
        cmd: Vec<String>,
        tty: bool,
    },
    List {
        all: bool,
    },
    Inspect {
        id: String,
    },
    Logs {
        id: String,
        tail: Option<usize>,
    },
    Start {
        id: String,
    },
    Stop {
        id: String,
        timeout: Option<u32>,
    },
    Ping,
}

/// Canned answers; `None` failures mean success
struct MockState {
    calls: Vec<MockCall>,
    containers: Vec<ContainerInfo>,
    details: ContainerDetails,
    exec_exit_code: i64,
    exec_output: String,
    exec_failure: Option<ProviderError>,
    list_failure: Option<ProviderError>,
    inspect_failure: Option<ProviderError>,
    logs: String,
    logs_failure: Option<ProviderError>,
    start_failure: Option<ProviderError>,
    stop_failure: Option<ProviderError>,
    ping_failure: Option<ProviderError>,
}

/// In-memory [`ContainerProvider`] that records every call
///
/// Every method succeeds until told otherwise: exec prints nothing and
/// exits 0, list returns the configured containers.
pub struct MockProvider {
    provider_type: ProviderType,
    state: Mutex<MockState>,
}

impl MockProvider {
    pub fn new(provider_type: ProviderType) -> Self {
        Self::with_containers(provider_type, Vec::new())
    }

    /// Mock whose `list` returns `containers`
    pub fn with_containers(provider_type: ProviderType, containers: Vec<ContainerInfo>) -> Self {
        Self {
            provider_type,
            state: Mutex::new(MockState {
                calls: Vec::new(),
                containers,
                details: mock_container_details("mock_container_id", ContainerStatus::Running),
                exec_exit_code: 0,
                exec_output: String::new(),
                exec_failure: None,
                list_failure: None,
                inspect_failure: None,
                logs: String::new(),
                logs_failure: None,
                start_failure: None,
                stop_failure: None,
                ping_failure: None,
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn set_exec_output(&self, output: impl Into<String>) {
        self.state().exec_output = output.into();
    }

    pub fn set_exec_exit_code(&self, code: i64) {
        self.state().exec_exit_code = code;
    }

    pub fn set_containers(&self, containers: Vec<ContainerInfo>) {
        let mut state = self.state();
        state.containers = containers;
        state.list_failure = None;
    }

    pub fn set_details(&self, details: ContainerDetails) {
        self.state().details = details;
    }

    pub fn set_logs(&self, logs: impl Into<String>) {
        self.state().logs = logs.into();
    }

    pub fn fail_exec(&self, err: ProviderError) {
        self.state().exec_failure = Some(err);
    }

    pub fn fail_list(&self, err: ProviderError) {
        self.state().list_failure = Some(err);
    }

    pub fn fail_inspect(&self, err: ProviderError) {
        self.state().inspect_failure = Some(err);
    }

    pub fn fail_logs(&self, err: ProviderError) {
        self.state().logs_failure = Some(err);
    }

    pub fn fail_start(&self, err: ProviderError) {
        self.state().start_failure = Some(err);
    }

    pub fn fail_stop(&self, err: ProviderError) {
        self.state().stop_failure = Some(err);
    }

    pub fn fail_ping(&self, err: ProviderError) {
        self.state().ping_failure = Some(err);
    }

    pub fn get_calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    pub fn was_called(&self, call: &MockCall) -> bool {
        self.state().calls.contains(call)
    }

    /// Record `call`, then fail if `failure` is set
    fn answer(&self, call: MockCall, failure: fn(&MockState) -> &Option<ProviderError>) -> Result<()> {
        let mut state = self.state();
        state.calls.push(call);
        match failure(&*state) {
            Some(err) => Err(duplicate(err)),
            None => Ok(()),
        }
    }
}

/// ProviderError is not Clone because of its io variant
fn duplicate(err: &ProviderError) -> ProviderError {
    match err {
        ProviderError::ConnectionError(m) => ProviderError::ConnectionError(m.clone()),
        ProviderError::ContainerNotFound(m) => ProviderError::ContainerNotFound(m.clone()),
        ProviderError::ExecError(m) => ProviderError::ExecError(m.clone()),
        ProviderError::RuntimeError(m) => ProviderError::RuntimeError(m.clone()),
        ProviderError::IoError(e) => {
            ProviderError::IoError(std::io::Error::new(e.kind(), e.to_string()))
        }
    }
}

/// Container named `name` with a plausible image and status text
pub fn mock_container(id: &str, name: &str, status: ContainerStatus) -> ContainerInfo {
    let status_text = if status.is_running() {
        "Up 5 minutes".to_string()
    } else {
        status.to_string()
    };
    ContainerInfo {
        id: ContainerId::new(id),
        name: name.to_string(),
        image: format!("{}:latest", name),
        status,
        status_text,
        created: 1_700_000_000,
        labels: HashMap::new(),
    }
}

pub fn mock_container_details(id: &str, status: ContainerStatus) -> ContainerDetails {
    ContainerDetails {
        id: ContainerId::new(id),
        name: "mock_container".to_string(),
        image: "mock_image:latest".to_string(),
        status,
        created: None,
        working_dir: None,
        user: None,
        env: vec!["PATH=/usr/local/bin:/usr/bin:/bin".to_string()],
        command: vec!["nginx".to_string(), "-g".to_string(), "daemon off;".to_string()],
        ports: vec!["80/tcp -> 0.0.0.0:8080".to_string()],
        labels: HashMap::new(),
    }
}

#[async_trait]
impl ContainerProvider for MockProvider {
    async fn exec(&self, id: &ContainerId, config: &ExecConfig) -> Result<ExecResult> {
        let call = MockCall::Exec {
            id: id.0.clone(),
            cmd: config.cmd.clone(),
            tty: config.tty,
        };
        self.answer(call, |s| &s.exec_failure)?;
        let state = self.state();
        Ok(ExecResult {
            exit_code: state.exec_exit_code,
            output: state.exec_output.clone(),
        })
    }

    async fn list(&self, all: bool) -> Result<Vec<ContainerInfo>> {
        self.answer(MockCall::List { all }, |s| &s.list_failure)?;
        Ok(self.state().containers.clone())
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetails> {
        self.answer(MockCall::Inspect { id: id.0.clone() }, |s| &s.inspect_failure)?;
        Ok(self.state().details.clone())
    }

    async fn logs(&self, id: &ContainerId, tail: Option<usize>) -> Result<String> {
        let call = MockCall::Logs {
            id: id.0.clone(),
            tail,
        };
        self.answer(call, |s| &s.logs_failure)?;
        Ok(self.state().logs.clone())
    }

    async fn start(&self, id: &ContainerId) -> Result<()> {
        self.answer(MockCall::Start { id: id.0.clone() }, |s| &s.start_failure)
    }

    async fn stop(&self, id: &ContainerId, timeout: Option<u32>) -> Result<()> {
        let call = MockCall::Stop {
            id: id.0.clone(),
            timeout,
        };
        self.answer(call, |s| &s.stop_failure)
    }

    async fn ping(&self) -> Result<()> {
        self.answer(MockCall::Ping, |s| &s.ping_failure)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            provider_type: self.provider_type,
            version: "mock-1.0".to_string(),
            api_version: "mock".to_string(),
            os: "test".to_string(),
            arch: "test".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Exit(i64, String),
    Error(String),
}

/// One recorded exec invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ExecCall {
    pub container: String,
    pub argv: Vec<String>,
    pub tty: bool,
}

/// Exec function with canned replies keyed by argv
///
/// Unscripted argv exits with status 1 and no output, the way `ls` fails
/// on a missing path. Clones share replies and the call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExec {
    replies: Arc<Mutex<HashMap<Vec<String>, Reply>>>,
    calls: Arc<Mutex<Vec<ExecCall>>>,
    fail_all: bool,
}

fn to_argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

impl ScriptedExec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `argv` with `output` and exit status 0
    pub fn with_output(self, argv: &[&str], output: &str) -> Self {
        self.script(argv, Reply::Output(output.to_string()))
    }

    /// Reply to `argv` with `output` and a non-zero exit status
    pub fn with_exit(self, argv: &[&str], code: i64, output: &str) -> Self {
        self.script(argv, Reply::Exit(code, output.to_string()))
    }

    /// Fail `argv` with a provider error
    pub fn with_error(self, argv: &[&str], message: &str) -> Self {
        self.script(argv, Reply::Error(message.to_string()))
    }

    /// Fail every call with a provider error
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    fn script(self, argv: &[&str], reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(to_argv(argv), reply);
        self
    }

    /// Run `argv` as if in `container`
    pub fn run(&self, container: &str, argv: &[String], tty: bool) -> crate::Result<String> {
        self.calls.lock().unwrap().push(ExecCall {
            container: container.to_string(),
            argv: argv.to_vec(),
            tty,
        });

        if self.fail_all {
            return Err(ProviderError::ExecError("exec unavailable".to_string()).into());
        }

        match self.replies.lock().unwrap().get(argv).cloned() {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Exit(code, output)) => Err(CoreError::ExitStatus { code, output }),
            Some(Reply::Error(message)) => Err(ProviderError::ExecError(message).into()),
            None => Err(CoreError::ExitStatus {
                code: 1,
                output: String::new(),
            }),
        }
    }

    /// Boxed exec function sharing this script
    pub fn exec_fn(&self) -> ExecFn {
        let scripted = self.clone();
        Box::new(move |container: &str, argv: &[String], tty: bool| {
            scripted.run(container, argv, tty)
        })
    }

    /// Probe for the completion engine
    pub fn probe(&mut self) -> impl FnMut(&[String]) -> crate::Result<String> + '_ {
        move |argv: &[String]| self.run("test", argv, false)
    }

    /// Argv of every call so far
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.argv.clone())
            .collect()
    }

    /// Every call with its container and TTY flag
    pub fn exec_calls(&self) -> Vec<ExecCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, argv: &[&str]) -> bool {
        let argv = to_argv(argv);
        self.calls.lock().unwrap().iter().any(|c| c.argv == argv)
    }

    /// Calls other than completion probes (`ls -1 ...`)
    pub fn command_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|argv| !(argv.len() == 3 && argv[0] == "ls" && argv[1] == "-1"))
            .collect()
    }
}
