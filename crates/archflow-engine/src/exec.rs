//! Sandboxed renderer execution.
//!
//! Emitted (or user-supplied) renderer source is an opaque program executed by
//! an interpreter subprocess with its working directory pinned to the output
//! directory. The subprocess runs in its own process group on Unix so that a
//! timeout kill also takes down the `dot` children the renderer spawns.

use crate::emit;
use crate::error::{truncate_output, EngineError, STDERR_LIMIT};
use crate::filename::sanitize_stem;
use archflow::spec::{ArchitectureSpec, OutFormat};
use archflow_resolver::Resolution;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, SystemTime};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

/// Outcome of a successful render.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Artifact files, one per requested format, in request order
    pub artifact_paths: Vec<PathBuf>,

    /// The source that was executed
    pub source: String,

    /// Captured interpreter stdout (truncated)
    pub stdout: String,

    /// Captured interpreter stderr (truncated)
    pub stderr: String,
}

/// The renderer: owns the output directory, interpreter command and budget.
#[derive(Debug, Clone)]
pub struct Renderer {
    output_dir: PathBuf,
    command: String,
    timeout: Duration,
}

impl Renderer {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, command: impl Into<String>, timeout: Duration) -> Self {
        Renderer {
            output_dir: output_dir.into(),
            command: command.into(),
            timeout,
        }
    }

    /// The directory artifacts land in.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Emit source for a spec and execute it.
    ///
    /// `stem` must already be unique per generation; the expected artifacts
    /// are `<stem>.<ext>` for every requested format.
    ///
    /// # Errors
    ///
    /// [`EngineError`] on emission, spawn, timeout, non-zero exit or missing
    /// artifact.
    pub async fn render(
        &self,
        spec: &ArchitectureSpec,
        resolutions: &BTreeMap<String, Resolution>,
        stem: &str,
    ) -> Result<RenderOutcome, EngineError> {
        let stem = sanitize_stem(stem);
        let source = emit::emit(spec, resolutions, &stem)?;
        let expected: Vec<String> = spec
            .out_formats
            .iter()
            .map(|f| format!("{stem}.{}", f.extension()))
            .collect();
        self.run_source(&source, &stem, &expected).await
    }

    /// Execute user-supplied renderer source in the same sandbox.
    ///
    /// The source names its own outputs, so artifacts are detected by
    /// scanning the output directory for renderer-format files created
    /// during the run.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Renderer::render`], except that producing no
    /// artifact at all is reported as [`EngineError::NoArtifact`] with the
    /// output directory as the expectation.
    pub async fn execute_source(
        &self,
        source: &str,
        stem: &str,
    ) -> Result<RenderOutcome, EngineError> {
        let started = SystemTime::now();
        let mut outcome = self.run_source(source, stem, &[]).await?;
        outcome.artifact_paths = self.artifacts_since(started).await?;
        if outcome.artifact_paths.is_empty() {
            return Err(EngineError::NoArtifact {
                expected: self.output_dir.display().to_string(),
            });
        }
        Ok(outcome)
    }

    async fn run_source(
        &self,
        source: &str,
        stem: &str,
        expected: &[String],
    ) -> Result<RenderOutcome, EngineError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let script_name = format!("{}.py", sanitize_stem(stem));
        let script_path = self.output_dir.join(&script_name);
        tokio::fs::write(&script_path, source).await?;

        let result = self.run_script(&script_name).await;

        // The script is scratch; losing the cleanup race is harmless.
        let _ = tokio::fs::remove_file(&script_path).await;

        let (stdout, stderr, exit_code) = result?;

        if exit_code != Some(0) {
            return Err(EngineError::RenderFailed {
                exit_code,
                stderr: truncate_output(&stderr, STDERR_LIMIT),
            });
        }

        let mut artifact_paths = Vec::new();
        for name in expected {
            let path = self.output_dir.join(name);
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Err(EngineError::NoArtifact {
                    expected: name.clone(),
                });
            }
            artifact_paths.push(path);
        }

        Ok(RenderOutcome {
            artifact_paths,
            source: source.to_string(),
            stdout: truncate_output(&stdout, STDERR_LIMIT),
            stderr: truncate_output(&stderr, STDERR_LIMIT),
        })
    }

    async fn run_script(
        &self,
        script_name: &str,
    ) -> Result<(String, String, Option<i32>), EngineError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg(script_name)
            .current_dir(&self.output_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Request cancellation (client disconnect) drops this future; the
            // interpreter must not outlive it.
            .kill_on_drop(true);

        // New process group so a timeout kill reaches the renderer's own
        // children (the `dot` processes Graphviz spawns).
        #[cfg(unix)]
        #[allow(unsafe_code)]
        unsafe {
            cmd.pre_exec(|| {
                libc::setpgid(0, 0);
                Ok(())
            });
        }

        let mut child = cmd.spawn()?;

        let mut stdout_pipe = child.stdout.take();
        let mut stderr_pipe = child.stderr.take();
        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(pipe) = stdout_pipe.as_mut() {
                let _ = pipe.read_to_end(&mut buf).await;
            }
            buf
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(pipe) = stderr_pipe.as_mut() {
                let _ = pipe.read_to_end(&mut buf).await;
            }
            buf
        });

        let status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                kill_child_and_group(&mut child);
                let _ = child.wait().await;
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "renderer timed out; process group killed"
                );
                return Err(EngineError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let stdout = String::from_utf8_lossy(&stdout_task.await.unwrap_or_default()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_task.await.unwrap_or_default()).into_owned();

        Ok((stdout, stderr, status.code()))
    }

    /// Renderer-format files in the output directory modified at or after
    /// `since`, sorted by name for determinism.
    async fn artifacts_since(&self, since: SystemTime) -> Result<Vec<PathBuf>, EngineError> {
        let mut found = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.output_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_artifact = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| OutFormat::ALL.iter().any(|f| f.extension() == ext));
            if !is_artifact {
                continue;
            }
            let modified = entry.metadata().await?.modified()?;
            if modified >= since {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }
}

/// Kill a child and its whole process group on Unix; plain kill elsewhere.
fn kill_child_and_group(child: &mut Child) {
    #[cfg(unix)]
    #[allow(unsafe_code)]
    {
        if let Some(pid) = child.id() {
            let pid = pid as libc::pid_t;
            let pgid = unsafe { libc::getpgid(pid) };
            if pgid != -1 {
                unsafe { libc::killpg(pgid, libc::SIGKILL) };
            }
        }
    }
    let _ = child.start_kill();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn renderer(dir: &Path, command: &str, secs: u64) -> Renderer {
        Renderer::new(dir, command, Duration::from_secs(secs))
    }

    /// An interpreter stand-in: `sh` runs the emitted file as a shell script,
    /// so tests exercise the full subprocess path without python installed.
    #[tokio::test]
    async fn test_execute_source_collects_new_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let r = renderer(dir.path(), "sh", 10);
        let outcome = r
            .execute_source("echo x > out.png\necho noise > notes.txt\n", "job")
            .await
            .unwrap();
        assert_eq!(outcome.artifact_paths.len(), 1);
        assert!(outcome.artifact_paths[0].ends_with("out.png"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_render_failed() {
        let dir = tempfile::tempdir().unwrap();
        let r = renderer(dir.path(), "sh", 10);
        let err = r
            .execute_source("echo broken >&2\nexit 3\n", "job")
            .await
            .unwrap_err();
        match err {
            EngineError::RenderFailed { exit_code, stderr } => {
                assert_eq!(exit_code, Some(3));
                assert!(stderr.contains("broken"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_no_artifact_detected() {
        let dir = tempfile::tempdir().unwrap();
        let r = renderer(dir.path(), "sh", 10);
        let err = r.execute_source("true\n", "job").await.unwrap_err();
        assert!(matches!(err, EngineError::NoArtifact { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_subprocess() {
        let dir = tempfile::tempdir().unwrap();
        let r = renderer(dir.path(), "sh", 1);
        let started = std::time::Instant::now();
        let err = r.execute_source("sleep 30\n", "job").await.unwrap_err();
        assert!(matches!(err, EngineError::Timeout { seconds: 1 }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_script_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let r = renderer(dir.path(), "sh", 10);
        let _ = r.execute_source("echo x > out.png\n", "cleanup").await;
        assert!(!dir.path().join("cleanup.py").exists());
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let r = renderer(dir.path(), "definitely-not-a-real-interpreter", 5);
        let err = r.execute_source("true\n", "job").await.unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[tokio::test]
    async fn test_output_dir_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deeper/out");
        let r = renderer(&nested, "sh", 10);
        let _ = r.execute_source("echo x > out.png\n", "job").await;
        assert!(nested.is_dir());
    }
}
