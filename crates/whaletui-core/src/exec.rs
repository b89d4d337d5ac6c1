//! Bridges the async provider into the session's blocking exec function

use crate::{CoreError, Result};
use std::sync::Arc;
use tokio::runtime::Handle;
use whaletui_provider::{ContainerId, ContainerProvider, ExecConfig};

/// Blocking command runner owned by a session
///
/// Arguments are the container id, the argv and whether to allocate a TTY.
/// Returns the combined stdout and stderr.
pub type ExecFn = Box<dyn FnMut(&str, &[String], bool) -> Result<String> + Send>;

/// Build an [`ExecFn`] that runs commands through `provider`
///
/// Each call blocks the calling thread until the command finishes. When
/// called from a runtime worker the runtime must be multi-threaded, since
/// the worker is handed off with `block_in_place` for the duration.
pub fn provider_exec(provider: Arc<dyn ContainerProvider>, handle: Handle) -> ExecFn {
    Box::new(move |container_id: &str, argv: &[String], tty: bool| {
        let id = ContainerId::new(container_id);
        let config = ExecConfig {
            tty,
            ..ExecConfig::command(argv.to_vec())
        };

        let result = tokio::task::block_in_place(|| handle.block_on(provider.exec(&id, &config)))?;

        if result.exit_code != 0 {
            tracing::debug!(
                container = %id.short(),
                cmd = ?argv,
                code = result.exit_code,
                "command exited non-zero"
            );
            return Err(CoreError::ExitStatus {
                code: result.exit_code,
                output: result.output,
            });
        }

        Ok(result.output)
    })
}
