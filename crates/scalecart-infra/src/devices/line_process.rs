//! Long-lived helper process spoken to one line at a time

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::debug;

struct Running {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// A helper program holding a device handle while it runs
///
/// Spawning the process acquires the device; killing it releases it.
pub struct LineProcess {
    program: String,
    args: Vec<String>,
    running: Option<Running>,
}

impl LineProcess {
    /// Parse a shell-style command line
    pub fn from_command_line(cmd_str: &str) -> Result<Self, String> {
        let mut parts = match shell_words::split(cmd_str) {
            Ok(parts) if !parts.is_empty() => parts,
            Ok(_) => return Err("command is empty".to_string()),
            Err(e) => return Err(format!("invalid command '{}': {}", cmd_str, e)),
        };
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
            running: None,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn start(&mut self) -> io::Result<()> {
        if self.running.is_some() {
            return Ok(());
        }
        debug!(program = %self.program, args = ?self.args, "spawning device helper");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "helper stdin unavailable"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "helper stdout unavailable"))?;
        self.running = Some(Running {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        });
        Ok(())
    }

    /// Send one request line and read one reply line (without the newline)
    pub fn request(&mut self, line: &str) -> io::Result<String> {
        let running = self
            .running
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "helper not running"))?;
        writeln!(running.stdin, "{}", line)?;
        running.stdin.flush()?;

        let mut reply = String::new();
        let read = running.stdout.read_line(&mut reply)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} closed its output", self.program),
            ));
        }
        Ok(reply.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn stop(&mut self) {
        if let Some(mut running) = self.running.take() {
            debug!(program = %self.program, "stopping device helper");
            let _ = running.child.kill();
            let _ = running.child.wait();
        }
    }
}

impl Drop for LineProcess {
    fn drop(&mut self) {
        self.stop();
    }
}
