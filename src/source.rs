// Scoped, bounded text acquisition from platform tools and files

use std::collections::HashMap;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::CommandConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(5);
/// Minimum wait for the output reader once the child is gone.
const DRAIN_GRACE: Duration = Duration::from_millis(50);

/// Where adapters get tool output and file contents from.
///
/// Every failure (missing binary, non-zero exit, timeout, unreadable file,
/// empty output) is reported as `None`; callers turn that into a default.
pub trait TextSource: Send + Sync {
    fn command(&self, program: &str, args: &[&str]) -> Option<String>;
    fn file(&self, path: &str) -> Option<String>;
}

/// Runs real processes and reads real files.
#[derive(Debug, Clone)]
pub struct ProcessTextSource {
    timeout: Duration,
    max_output_bytes: usize,
    max_file_bytes: u64,
}

impl Default for ProcessTextSource {
    fn default() -> Self {
        Self::new(&CommandConfig::default())
    }
}

impl ProcessTextSource {
    pub fn new(config: &CommandConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.timeout_ms),
            max_output_bytes: config.max_output_bytes,
            max_file_bytes: config.max_file_bytes,
        }
    }
}

impl TextSource for ProcessTextSource {
    fn command(&self, program: &str, args: &[&str]) -> Option<String> {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                debug!(program, ?args, error = %e, "command not started");
                return None;
            }
        };

        // Drain on a helper thread so a chatty tool cannot stall on a full pipe.
        // Grandchildren can keep the pipe open after the child exits, so the
        // result is awaited with a deadline and the thread is never joined.
        let reader = child.stdout.take().map(|stdout| {
            let limit = self.max_output_bytes;
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let _ = tx.send(read_bounded(stdout, limit));
            });
            rx
        });

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Some(status),
                Ok(None) if start.elapsed() >= self.timeout => {
                    warn!(program, ?args, timeout_ms = self.timeout.as_millis() as u64, "command timed out, killing");
                    let _ = child.kill();
                    let _ = child.wait();
                    break None;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    debug!(program, error = %e, "waiting on command failed");
                    let _ = child.kill();
                    let _ = child.wait();
                    break None;
                }
            }
        };

        let status = status?;
        let wait = self
            .timeout
            .saturating_sub(start.elapsed())
            .max(DRAIN_GRACE);
        let output = match reader.map(|rx| rx.recv_timeout(wait)) {
            Some(Ok(Ok(bytes))) => Some(bytes),
            Some(Ok(Err(e))) => {
                debug!(program, error = %e, "reading command output failed");
                None
            }
            Some(Err(_)) => {
                warn!(program, ?args, "command output still open after exit, giving up");
                None
            }
            None => None,
        };
        if !status.success() {
            debug!(program, ?args, %status, "command exited unsuccessfully");
            return None;
        }
        non_empty(decode(&output?))
    }

    fn file(&self, path: &str) -> Option<String> {
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) => {
                debug!(path, error = %e, "file not readable");
                return None;
            }
        };
        let mut buf = Vec::new();
        if let Err(e) = file.take(self.max_file_bytes).read_to_end(&mut buf) {
            debug!(path, error = %e, "file read failed");
            return None;
        }
        non_empty(decode(&buf))
    }
}

/// Keep the first `limit` bytes, discard the rest until EOF.
fn read_bounded(mut stdout: impl Read, limit: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    (&mut stdout).take(limit as u64).read_to_end(&mut buf)?;
    io::copy(&mut stdout, &mut io::sink())?;
    Ok(buf)
}

/// Tool output is UTF-8 almost everywhere; some Windows tools emit UTF-16LE with a BOM.
fn decode(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Replays recorded tool output. Lookups that were not recorded fail like a
/// missing binary would.
#[derive(Debug, Clone, Default)]
pub struct CannedSource {
    commands: HashMap<String, String>,
    files: HashMap<String, String>,
}

impl CannedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the output of `command_line`, e.g. `"sysctl -n hw.ncpu"`.
    pub fn with_command(mut self, command_line: &str, output: &str) -> Self {
        self.commands.insert(command_line.to_string(), output.to_string());
        self
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl TextSource for CannedSource {
    fn command(&self, program: &str, args: &[&str]) -> Option<String> {
        let line = command_line(program, args);
        let output = self.commands.get(&line).cloned();
        if output.is_none() {
            debug!(command = %line, "no recorded output");
        }
        output.and_then(non_empty)
    }

    fn file(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned().and_then(non_empty)
    }
}
