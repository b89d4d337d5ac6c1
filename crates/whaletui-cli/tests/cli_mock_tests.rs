//! Mock-based command tests.
//!
//! These call command functions directly with a `MockProvider`, avoiding
//! any real container runtime.

use whaletui_cli::commands;
use whaletui_config::GlobalConfig;
use std::sync::Arc;
use whaletui_core::test_support::{mock_container, mock_container_details, MockCall, MockProvider};
use whaletui_provider::{ContainerStatus, ProviderError, ProviderType};

fn mock() -> MockProvider {
    MockProvider::with_containers(
        ProviderType::Docker,
        vec![
            mock_container("abc123def4567890", "web", ContainerStatus::Running),
            mock_container("abd999000111", "web-worker", ContainerStatus::Running),
            mock_container("fff000111222", "db", ContainerStatus::Exited),
        ],
    )
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn exec_calls(mock: &MockProvider) -> Vec<Vec<String>> {
    mock.get_calls()
        .into_iter()
        .filter_map(|c| match c {
            MockCall::Exec { cmd, .. } => Some(cmd),
            _ => None,
        })
        .collect()
}

// ---- resolution ----

#[tokio::test]
async fn test_find_by_exact_name() {
    let mock = mock();
    let found = commands::find_container(&mock, "web").await.unwrap();
    assert_eq!(found.name, "web");
}

#[tokio::test]
async fn test_find_by_unique_prefix() {
    let mock = mock();
    let found = commands::find_container(&mock, "abc").await.unwrap();
    assert_eq!(found.name, "web");

    let found = commands::find_container(&mock, "d").await.unwrap();
    assert_eq!(found.name, "db");
}

#[tokio::test]
async fn test_ambiguous_prefix_lists_matches() {
    let mock = mock();
    let err = commands::find_container(&mock, "ab").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Ambiguous"));
    assert!(msg.contains("web (abc123def456)"));
    assert!(msg.contains("web-worker (abd999000111)"));
}

#[tokio::test]
async fn test_not_found() {
    let mock = mock();
    let err = commands::find_container(&mock, "cache").await.unwrap_err();
    assert_eq!(err.to_string(), "Container 'cache' not found");
}

// ---- exec ----

#[tokio::test]
async fn test_exec_simple_command() {
    let mock = mock();
    mock.set_exec_output("hello".to_string());
    let mut out = Vec::new();

    let code = commands::exec(
        &mock,
        &GlobalConfig::default(),
        "web",
        &argv(&["echo", "hello"]),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(code, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
    assert_eq!(exec_calls(&mock), vec![argv(&["echo", "hello"])]);
}

#[tokio::test]
async fn test_exec_multiple_arguments_pass_through() {
    let mock = mock();
    let mut out = Vec::new();

    commands::exec(
        &mock,
        &GlobalConfig::default(),
        "web",
        &argv(&["echo", "hello world"]),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(exec_calls(&mock), vec![argv(&["echo", "hello world"])]);
}

#[tokio::test]
async fn test_exec_shell_line_goes_through_sh() {
    let mock = mock();
    let mut out = Vec::new();

    commands::exec(
        &mock,
        &GlobalConfig::default(),
        "web",
        &argv(&["ps aux | grep nginx"]),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(
        exec_calls(&mock),
        vec![argv(&["/bin/sh", "-c", "ps aux | grep nginx"])]
    );
}

#[tokio::test]
async fn test_exec_returns_exit_code() {
    let mock = mock();
    mock.set_exec_exit_code(3);
    mock.set_exec_output("boom\n".to_string());
    let mut out = Vec::new();

    let code = commands::exec(&mock, &GlobalConfig::default(), "web", &argv(&["false"]), &mut out)
        .await
        .unwrap();

    assert_eq!(code, 3);
    assert_eq!(String::from_utf8(out).unwrap(), "boom\n");
}

#[tokio::test]
async fn test_exec_refuses_interactive_command() {
    let mock = mock();
    let mut out = Vec::new();

    let err = commands::exec(&mock, &GlobalConfig::default(), "web", &argv(&["top"]), &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("interactive"));
    assert!(exec_calls(&mock).is_empty());
}

#[tokio::test]
async fn test_exec_refuses_interactive_program_with_arguments() {
    let mock = mock();
    let mut out = Vec::new();

    let err = commands::exec(
        &mock,
        &GlobalConfig::default(),
        "web",
        &argv(&["vim", "notes.txt"]),
        &mut out,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("'vim notes.txt'"));
    assert!(exec_calls(&mock).is_empty());
}

#[tokio::test]
async fn test_exec_refuses_configured_interactive_command() {
    let mock = mock();
    let mut config = GlobalConfig::default();
    config.shell.extra_interactive_commands = vec!["k9s".to_string()];
    let mut out = Vec::new();

    let err = commands::exec(&mock, &config, "web", &argv(&["k9s"]), &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("interactive"));
    assert!(exec_calls(&mock).is_empty());
}

#[tokio::test]
async fn test_exec_on_stopped_container_fails() {
    let mock = mock();
    let mut out = Vec::new();

    let err = commands::exec(&mock, &GlobalConfig::default(), "db", &argv(&["ls"]), &mut out)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Container 'db' is not running (status: exited)"
    );
}

#[tokio::test]
async fn test_exec_blank_command_fails() {
    let mock = mock();
    let mut out = Vec::new();

    let err = commands::exec(&mock, &GlobalConfig::default(), "web", &argv(&["   "]), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No command specified");
}

#[tokio::test]
async fn test_exec_provider_error_propagates() {
    let mock = mock();
    mock.fail_exec(ProviderError::ExecError("no such exec".to_string()));
    let mut out = Vec::new();

    let err = commands::exec(&mock, &GlobalConfig::default(), "web", &argv(&["ls"]), &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("no such exec"));
}

// ---- shell ----

#[tokio::test]
async fn test_shell_rechecks_live_status() {
    let mock = Arc::new(mock());
    mock.set_details(mock_container_details("abc123def4567890", ContainerStatus::Exited));

    let err = commands::shell(mock.clone(), GlobalConfig::default(), "web")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Container 'web' is not running (status: exited)"
    );
    assert!(mock.was_called(&MockCall::Inspect {
        id: "abc123def4567890".to_string()
    }));
}

#[tokio::test]
async fn test_shell_unknown_container() {
    let mock = Arc::new(mock());
    let err = commands::shell(mock, GlobalConfig::default(), "cache")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Container 'cache' not found");
}

// ---- logs ----

#[tokio::test]
async fn test_logs_prints_tail() {
    let mock = mock();
    mock.set_logs("starting\nready\n");
    let mut out = Vec::new();

    commands::logs(&mock, "db", Some(50), &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "starting\nready\n");
    assert!(mock.was_called(&MockCall::Logs {
        id: "fff000111222".to_string(),
        tail: Some(50),
    }));
}

#[tokio::test]
async fn test_logs_failure_propagates() {
    let mock = mock();
    mock.fail_logs(ProviderError::RuntimeError("log driver none".to_string()));
    let mut out = Vec::new();

    let err = commands::logs(&mock, "web", None, &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("log driver none"));
    assert!(out.is_empty());
}

// ---- list ----

#[tokio::test]
async fn test_list_table() {
    let mock = mock();
    let mut out = Vec::new();

    commands::list(&mock, true, false, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("CONTAINER ID"));
    assert!(lines[1].starts_with("abc123def456  web"));
    assert!(lines[1].contains("Up 5 minutes"));
    assert!(mock.was_called(&MockCall::List { all: true }));
}

#[tokio::test]
async fn test_list_json() {
    let mock = mock();
    let mut out = Vec::new();

    commands::list(&mock, false, true, &mut out).await.unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(value[2]["name"], "db");
    assert_eq!(value[2]["status"], "exited");
    assert!(mock.was_called(&MockCall::List { all: false }));
}

#[tokio::test]
async fn test_list_empty() {
    let mock = MockProvider::new(ProviderType::Podman);
    let mut out = Vec::new();

    commands::list(&mock, false, false, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "No containers found\n");
}

// ---- config ----

#[test]
fn test_config_prints_toml() {
    let mut config = GlobalConfig::default();
    config.defaults.provider = "podman".to_string();
    let mut out = Vec::new();

    commands::config(&config, false, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("# "));
    assert!(text.contains("provider = \"podman\""));
}
