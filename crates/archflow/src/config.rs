//! Service configuration.
//!
//! Options are enumerated and closed; everything is overridable through
//! `ARCHFLOW_*` environment variables and through builder methods. Durations
//! are configured in whole seconds on the wire and exposed as [`Duration`]s.

use crate::spec::{Direction, OutFormat, Provider};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration for the diagram service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Directory artifacts are rendered into; created if missing
    pub output_dir: PathBuf,

    /// Idle time after which a session is evicted
    pub session_ttl: Duration,

    /// Age after which artifact files are deleted
    pub artifact_ttl: Duration,

    /// How often the session sweeper wakes
    pub session_sweep_interval: Duration,

    /// How often the artifact sweeper wakes
    pub artifact_sweep_interval: Duration,

    /// Budget for one spec-generator (LLM) call
    pub llm_timeout: Duration,

    /// Budget for one renderer subprocess run
    pub render_timeout: Duration,

    /// Overall budget for one request
    pub request_timeout: Duration,

    /// Provider assumed when the request does not name one
    pub provider_default: Provider,

    /// Direction default; the natural-language path hard-coerces to LR
    pub direction_default: Direction,

    /// Format assumed when the request does not name one
    pub out_format_default: OutFormat,

    /// Interpreter that executes emitted renderer source
    pub renderer_command: String,

    /// Bounded depth of each session's undo stack
    pub undo_depth: usize,

    /// CORS origins; empty means no CORS headers
    pub cors_allowed_origins: Vec<String>,

    /// Log filter directive handed to the tracing subscriber
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            output_dir: PathBuf::from("generated-diagrams"),
            session_ttl: Duration::from_secs(3600),
            artifact_ttl: Duration::from_secs(86_400),
            session_sweep_interval: Duration::from_secs(300),
            artifact_sweep_interval: Duration::from_secs(300),
            llm_timeout: Duration::from_secs(60),
            render_timeout: Duration::from_secs(60),
            request_timeout: Duration::from_secs(120),
            provider_default: Provider::Aws,
            direction_default: Direction::LR,
            out_format_default: OutFormat::Png,
            renderer_command: "python3".to_string(),
            undo_depth: 10,
            cors_allowed_origins: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Defaults overlaid with any `ARCHFLOW_*` environment variables set.
    ///
    /// Unparseable values are ignored with a warning rather than failing
    /// startup.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = ServiceConfig::default();

        if let Some(addr) = env_parsed::<SocketAddr>("ARCHFLOW_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(dir) = std::env::var("ARCHFLOW_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                config.output_dir = PathBuf::from(dir);
            }
        }
        if let Some(secs) = env_parsed::<u64>("ARCHFLOW_SESSION_TTL_SECONDS") {
            config.session_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parsed::<u64>("ARCHFLOW_ARTIFACT_TTL_SECONDS") {
            config.artifact_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parsed::<u64>("ARCHFLOW_SESSION_SWEEP_INTERVAL_SECONDS") {
            config.session_sweep_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parsed::<u64>("ARCHFLOW_ARTIFACT_SWEEP_INTERVAL_SECONDS") {
            config.artifact_sweep_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parsed::<u64>("ARCHFLOW_LLM_TIMEOUT_SECONDS") {
            config.llm_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parsed::<u64>("ARCHFLOW_RENDER_TIMEOUT_SECONDS") {
            config.render_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parsed::<u64>("ARCHFLOW_REQUEST_TIMEOUT_SECONDS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(provider) = env_parsed::<Provider>("ARCHFLOW_PROVIDER_DEFAULT") {
            config.provider_default = provider;
        }
        if let Some(direction) = env_parsed::<Direction>("ARCHFLOW_DIRECTION_DEFAULT") {
            config.direction_default = direction;
        }
        if let Some(format) = env_parsed::<OutFormat>("ARCHFLOW_OUT_FORMAT_DEFAULT") {
            config.out_format_default = format;
        }
        if let Ok(cmd) = std::env::var("ARCHFLOW_RENDERER_COMMAND") {
            if !cmd.trim().is_empty() {
                config.renderer_command = cmd;
            }
        }
        if let Some(depth) = env_parsed::<usize>("ARCHFLOW_UNDO_DEPTH") {
            config.undo_depth = depth;
        }
        if let Ok(origins) = std::env::var("ARCHFLOW_CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(level) = std::env::var("ARCHFLOW_LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.log_level = level;
            }
        }

        config
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the session idle TTL.
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Set the artifact retention TTL.
    #[must_use]
    pub fn with_artifact_ttl(mut self, ttl: Duration) -> Self {
        self.artifact_ttl = ttl;
        self
    }

    /// Set both sweeper intervals at once.
    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.session_sweep_interval = interval;
        self.artifact_sweep_interval = interval;
        self
    }

    /// Set the renderer subprocess budget.
    #[must_use]
    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    /// Set the spec-generator budget.
    #[must_use]
    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }

    /// Set the interpreter command for emitted renderer source.
    #[must_use]
    pub fn with_renderer_command(mut self, command: impl Into<String>) -> Self {
        self.renderer_command = command.into();
        self
    }

    /// Set the CORS allow-list.
    #[must_use]
    pub fn with_cors_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_allowed_origins = origins;
        self
    }
}

fn env_parsed<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(%key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
