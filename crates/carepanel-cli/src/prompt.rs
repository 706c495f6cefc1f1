//! Interactive notification permission prompt.

use async_trait::async_trait;
use dialoguer::Confirm;
use tracing::warn;

use carepanel_notify::{PermissionDecision, PermissionPrompt};

/// Asks the operator on the terminal. Anything other than an explicit yes,
/// including a closed or non-interactive terminal, counts as a denial.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl PermissionPrompt for TerminalPrompt {
    async fn ask(&self) -> PermissionDecision {
        let answer = tokio::task::spawn_blocking(|| {
            Confirm::new()
                .with_prompt("Allow CarePanel to send push notifications?")
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(true)) => PermissionDecision::Granted,
            Ok(Ok(false)) => PermissionDecision::Denied,
            Ok(Err(e)) => {
                warn!(error = %e, "Permission prompt unavailable, treating as denied");
                PermissionDecision::Denied
            }
            Err(e) => {
                warn!(error = %e, "Permission prompt task failed, treating as denied");
                PermissionDecision::Denied
            }
        }
    }
}
