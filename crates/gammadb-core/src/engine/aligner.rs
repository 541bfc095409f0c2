use super::config::AlignerConfig;
use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

/// Raw text produced by one aligner invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignerOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("Aligner executable '{executable}' was not found")]
    NotFound { executable: String },

    #[error("Aligner '{executable}' timed out after {timeout:?}")]
    Timeout {
        executable: String,
        timeout: Duration,
    },

    #[error("Aligner '{executable}' exited with {status}: {stderr}")]
    Failed {
        executable: String,
        status: String,
        stderr: String,
    },

    #[error("Aligner {stream} exceeded the {limit}-byte limit")]
    OutputTooLarge { stream: &'static str, limit: usize },

    #[error("Failed to run aligner '{executable}': {source}")]
    Io {
        executable: String,
        #[source]
        source: std::io::Error,
    },
}

/// A structural aligner that compares two structure files.
///
/// Implementations must be safe to share across tasks; the comparison engine
/// only ever calls them through `&self`.
pub trait Aligner: Send + Sync {
    fn name(&self) -> &str;

    /// Reports whether the tool can currently be invoked. Never fails.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Aligns `target` onto `reference` and returns the tool's raw report.
    fn run(
        &self,
        reference: &Path,
        target: &Path,
    ) -> impl Future<Output = Result<AlignerOutput, AlignerError>> + Send;
}

/// The US-align command-line tool, run as a subprocess.
#[derive(Debug)]
pub struct UsAlign {
    config: AlignerConfig,
    resolved: Mutex<Option<String>>,
}

impl UsAlign {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            resolved: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Returns the first candidate executable that answers the probe, if any.
    pub async fn probe(&self) -> Option<String> {
        for candidate in self.config.candidates() {
            match self.probe_one(candidate).await {
                Ok(()) => {
                    debug!(executable = candidate, "Aligner probe succeeded.");
                    if let Ok(mut resolved) = self.resolved.lock() {
                        *resolved = Some(candidate.to_string());
                    }
                    return Some(candidate.to_string());
                }
                Err(e) => debug!(executable = candidate, "Aligner probe failed: {}", e),
            }
        }
        warn!(
            "No aligner executable answered the probe (tried: {}).",
            self.config.candidates().join(", ")
        );
        None
    }

    async fn probe_one(&self, executable: &str) -> Result<(), AlignerError> {
        let child = Command::new(executable)
            .args(&self.config.probe_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(executable, e))?;

        let output = timeout(self.config.probe_timeout, child.wait_with_output())
            .await
            .map_err(|_| AlignerError::Timeout {
                executable: executable.to_string(),
                timeout: self.config.probe_timeout,
            })?
            .map_err(|source| AlignerError::Io {
                executable: executable.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(AlignerError::Failed {
                executable: executable.to_string(),
                status: output.status.to_string(),
                stderr: String::new(),
            })
        }
    }

    /// The executable confirmed by the last successful probe, or the configured one.
    fn active_executable(&self) -> String {
        self.resolved
            .lock()
            .ok()
            .and_then(|r| r.clone())
            .unwrap_or_else(|| self.config.executable.clone())
    }
}

/// Reads at most `limit` bytes from a pipe; one byte more means the tool is
/// over budget and the caller stops waiting for it.
async fn read_capped<R: AsyncRead + Unpin>(
    pipe: Option<R>,
    stream: &'static str,
    limit: usize,
    executable: &str,
) -> Result<Vec<u8>, AlignerError> {
    let mut buffer = Vec::new();
    if let Some(pipe) = pipe {
        pipe.take((limit as u64).saturating_add(1))
            .read_to_end(&mut buffer)
            .await
            .map_err(|source| AlignerError::Io {
                executable: executable.to_string(),
                source,
            })?;
    }
    if buffer.len() > limit {
        return Err(AlignerError::OutputTooLarge { stream, limit });
    }
    Ok(buffer)
}

fn spawn_error(executable: &str, e: std::io::Error) -> AlignerError {
    if e.kind() == ErrorKind::NotFound {
        AlignerError::NotFound {
            executable: executable.to_string(),
        }
    } else {
        AlignerError::Io {
            executable: executable.to_string(),
            source: e,
        }
    }
}

impl Aligner for UsAlign {
    fn name(&self) -> &str {
        "US-align"
    }

    async fn is_available(&self) -> bool {
        self.probe().await.is_some()
    }

    #[instrument(level = "debug", skip(self))]
    async fn run(&self, reference: &Path, target: &Path) -> Result<AlignerOutput, AlignerError> {
        let executable = self.active_executable();
        debug!("Executing: {} {:?} {:?}", executable, target, reference);

        let mut child = Command::new(&executable)
            .arg(target)
            .arg(reference)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&executable, e))?;

        let limit = self.config.max_output_bytes;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let collected = timeout(self.config.run_timeout, async {
            let (stdout, stderr) = tokio::try_join!(
                read_capped(stdout_pipe, "stdout", limit, &executable),
                read_capped(stderr_pipe, "stderr", limit, &executable),
            )?;
            let status = child.wait().await.map_err(|source| AlignerError::Io {
                executable: executable.clone(),
                source,
            })?;
            Ok::<_, AlignerError>((status, stdout, stderr))
        })
        .await;

        let (status, stdout, stderr) = match collected {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                let _ = child.start_kill();
                return Err(e);
            }
            Err(_) => {
                let _ = child.start_kill();
                return Err(AlignerError::Timeout {
                    executable,
                    timeout: self.config.run_timeout,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let stderr = String::from_utf8_lossy(&stderr).into_owned();

        if !status.success() {
            return Err(AlignerError::Failed {
                executable,
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        if !stderr.trim().is_empty() {
            warn!("Aligner stderr: {}", stderr.trim());
        }

        Ok(AlignerOutput { stdout, stderr })
    }
}
