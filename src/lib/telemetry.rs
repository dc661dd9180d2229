//! Telemetry initialization and launch stage span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, debug_span, info, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs.
///
/// Defaults to `warn` so menus and prompts are not interleaved with log lines.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of one pipeline stage.
pub struct StageSpan {
    span: Span,
    started_at: Instant,
    stage: &'static str,
}

impl StageSpan {
    /// Start a stage span.
    pub fn start(stage: &'static str) -> Self {
        let span = debug_span!(target: "bedrock_launch::stage", "launch_stage", stage);
        debug!(target: "bedrock_launch::stage", stage, "Starting launch stage");
        Self {
            span,
            started_at: Instant::now(),
            stage,
        }
    }

    /// Close the span while recording the outcome.
    pub fn finish(self, outcome: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        debug!(
            target: "bedrock_launch::stage",
            stage = self.stage,
            outcome,
            elapsed_ms,
            "Completed launch stage"
        );
    }

    /// Finish with `ok` or `error` depending on the result.
    pub fn finish_with<T, E>(self, result: &Result<T, E>) {
        self.finish(if result.is_ok() { "ok" } else { "error" });
    }
}

/// Fields logged once the launch plan is resolved.
#[derive(Debug)]
pub struct LaunchTelemetry<'a> {
    pub profile: &'a str,
    pub region: &'a str,
    pub mode: &'a str,
    pub max_output_tokens: u32,
    pub max_thinking_tokens: u32,
    pub program: &'a str,
    pub passthrough: &'a [String],
}

/// Emit the resolved launch to `tracing`.
pub fn emit_launch(telemetry: &LaunchTelemetry<'_>) {
    info!(
        target: "bedrock_launch::launch",
        profile = telemetry.profile,
        region = telemetry.region,
        mode = telemetry.mode,
        max_output_tokens = telemetry.max_output_tokens,
        max_thinking_tokens = telemetry.max_thinking_tokens,
        program = telemetry.program,
        passthrough = ?telemetry.passthrough,
        "Launching assistant"
    );
}
