use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use readywait::{Config, Poller, ScriptedInspector, StepCtx, TargetScript};
use tracing::info;

#[derive(Args, Clone, Debug)]
pub struct SimulateArgs {
    /// Target identifier to wait for
    #[arg(long, default_value = "#target")]
    pub target: String,

    /// Timeout in milliseconds (defaults to the configured timeout)
    #[arg(long, allow_negative_numbers = true)]
    pub timeout_ms: Option<i64>,

    /// When the scripted target becomes visible
    #[arg(long, default_value_t = 0)]
    pub visible_after_ms: u64,

    /// When the scripted target becomes enabled
    #[arg(long, default_value_t = 0)]
    pub enabled_after_ms: u64,

    /// Keep the target disabled for the whole run
    #[arg(long)]
    pub never_enabled: bool,

    /// Do not register the target at all
    #[arg(long, conflicts_with = "never_enabled")]
    pub missing: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

impl SimulateArgs {
    fn script(&self) -> TargetScript {
        TargetScript {
            present_after: Duration::ZERO,
            visible_after: Some(Duration::from_millis(self.visible_after_ms)),
            enabled_after: if self.never_enabled {
                None
            } else {
                Some(Duration::from_millis(self.enabled_after_ms))
            },
            failure: None,
        }
    }
}

pub async fn cmd_simulate(args: SimulateArgs, config: &Config) -> Result<()> {
    let mut inspector = ScriptedInspector::new();
    if !args.missing {
        inspector = inspector.with_target(args.target.clone(), args.script());
    }

    let poller = Poller::new(inspector, config.poller);
    let mut request = poller.request(args.target.clone());
    if let Some(timeout_ms) = args.timeout_ms {
        request = request.with_timeout_ms(timeout_ms);
    }

    let ctx = StepCtx::default();
    info!(
        step_id = %ctx.step_id,
        target_id = %request.target,
        poll_interval_ms = poller.config().poll_interval_ms,
        "Running simulated wait"
    );

    let report = poller
        .wait_until_ready(&ctx, &request)
        .await
        .with_context(|| format!("wait for '{}' failed", request.target))?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", rendered);
    Ok(())
}
