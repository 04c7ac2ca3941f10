//! Checkout front-end run as a blocking subprocess

use std::path::PathBuf;
use std::process::Command;

use scalecart_domain::device::CheckoutFrontend;
use scalecart_domain::model::Receipt;
use scalecart_types::FrontendError;
use tracing::info;

/// Runs the configured command with the receipt path appended and waits for it
pub struct CommandFrontend {
    command: Option<String>,
    receipt_path: PathBuf,
}

impl CommandFrontend {
    pub fn new(command: Option<String>, receipt_path: PathBuf) -> Self {
        Self {
            command,
            receipt_path,
        }
    }
}

impl CheckoutFrontend for CommandFrontend {
    fn hand_off(&mut self, receipt: &Receipt) -> Result<(), FrontendError> {
        let cmd_str = match self.command.as_deref() {
            Some(cmd) if !cmd.trim().is_empty() => cmd,
            _ => return Err(FrontendError::NotConfigured),
        };
        let mut parts = shell_words::split(cmd_str)
            .map_err(|e| FrontendError::Launch(format!("invalid command '{}': {}", cmd_str, e)))?;
        if parts.is_empty() {
            return Err(FrontendError::NotConfigured);
        }
        let program = parts.remove(0);

        info!(
            program = %program,
            receipt = %self.receipt_path.display(),
            lines = receipt.lines.len(),
            "handing off to checkout front-end"
        );
        let status = Command::new(&program)
            .args(&parts)
            .arg(&self.receipt_path)
            .status()
            .map_err(|e| FrontendError::Launch(format!("{}: {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(FrontendError::Exited(status.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured() {
        let mut frontend = CommandFrontend::new(None, PathBuf::from("receipt.json"));
        assert!(matches!(
            frontend.hand_off(&Receipt::default()),
            Err(FrontendError::NotConfigured)
        ));
    }

    #[test]
    fn test_launch_failure() {
        let mut frontend = CommandFrontend::new(
            Some("scalecart-no-such-frontend-binary --serve".to_string()),
            PathBuf::from("receipt.json"),
        );
        assert!(matches!(
            frontend.hand_off(&Receipt::default()),
            Err(FrontendError::Launch(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status() {
        let mut ok = CommandFrontend::new(Some("true".to_string()), PathBuf::from("receipt.json"));
        assert!(ok.hand_off(&Receipt::default()).is_ok());

        let mut failing = CommandFrontend::new(Some("false".to_string()), PathBuf::from("receipt.json"));
        assert!(matches!(
            failing.hand_off(&Receipt::default()),
            Err(FrontendError::Exited(_))
        ));
    }
}
