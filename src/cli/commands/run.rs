//! Implementation of the `curriculum run` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use crate::cli::extras::parse_extra_args;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Metrics, RunConfig, TrainerState};
use crate::domain::DSL_VERSION;
use crate::infrastructure::files::{
    model_from_json_file, to_pretty_json, write_all_or_nothing, PendingFile, METRICS_FILE,
    SUGGESTION_FILE,
};
use crate::template;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the session data directory
    #[arg(required_unless_present = "demo")]
    pub data_directory: Option<PathBuf>,

    /// Path to a deserializable trainer state
    #[arg(long, required_unless_present = "demo")]
    pub input_trainer_state: Option<PathBuf>,

    /// Evaluate the built-in demo state and metrics instead of reading a session
    #[arg(long, conflicts_with_all = ["data_directory", "input_trainer_state"])]
    pub demo: bool,

    /// Disables the output of the trainer state suggestion
    #[arg(long, overrides_with = "no_mute_trainer_state")]
    pub mute_trainer_state: bool,

    /// Shows the trainer state suggestion even if configuration mutes it
    #[arg(long, overrides_with = "mute_trainer_state")]
    pub no_mute_trainer_state: bool,

    /// Disables the output of the calculated metrics
    #[arg(long, overrides_with = "no_mute_metrics")]
    pub mute_metrics: bool,

    /// Shows the calculated metrics even if configuration mutes them
    #[arg(long, overrides_with = "mute_metrics")]
    pub no_mute_metrics: bool,

    /// Directory to save the used metrics to (as metrics.json)
    #[arg(long)]
    pub output_metrics: Option<PathBuf>,

    /// Directory to save the suggestion to (as suggestion.json)
    #[arg(long)]
    pub output_suggestion: Option<PathBuf>,

    /// Extra arguments to be passed to the curriculum in the form of 'k1:v1, k2:v2'
    #[arg(long, default_value = "")]
    pub extras: String,
}

/// An explicit `--flag` or `--no-flag` wins over the configured value.
const fn toggle(set: bool, unset: bool, configured: bool) -> bool {
    if set {
        true
    } else if unset {
        false
    } else {
        configured
    }
}

/// Run options after merging CLI flags over configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub mute_trainer_state: bool,
    pub mute_metrics: bool,
    pub output_metrics: Option<PathBuf>,
    pub output_suggestion: Option<PathBuf>,
}

impl RunSettings {
    /// Flags that are set win; unset flags fall back to `config`.
    pub fn resolve(args: &RunArgs, config: &RunConfig) -> Self {
        Self {
            mute_trainer_state: toggle(
                args.mute_trainer_state,
                args.no_mute_trainer_state,
                config.mute_trainer_state,
            ),
            mute_metrics: toggle(args.mute_metrics, args.no_mute_metrics, config.mute_metrics),
            output_metrics: args
                .output_metrics
                .clone()
                .or_else(|| config.output_metrics.clone()),
            output_suggestion: args
                .output_suggestion
                .clone()
                .or_else(|| config.output_suggestion.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub version: String,
    pub dsl_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer_state: Option<TrainerState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    pub stage_transition: Option<String>,
    pub policy_transition: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
    pub written: Vec<PathBuf>,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        match (&self.stage_transition, &self.policy_transition) {
            (Some(st), _) => lines.push(format!("Stage transition: {}", style(st).green().bold())),
            (None, Some(pt)) => lines.push(format!("Policy transition: {}", style(pt).cyan())),
            (None, None) => lines.push("No transition".to_string()),
        }

        if let Some(ref state) = self.trainer_state {
            lines.push(format!("Stage: {}", style(&state.stage).bold()));
            lines.push(format!(
                "Task: {} (mode {}, example_parameter {})",
                state.task.name(),
                state.task.parameters().mode,
                state.task.parameters().example_parameter
            ));
            lines.push(format!("On curriculum: {}", state.is_on_curriculum));
            let policies = if state.active_policies.is_empty() {
                "-".to_string()
            } else {
                state.active_policies.join(", ")
            };
            lines.push(format!("Active policies: {policies}"));
        }

        if let Some(ref metrics) = self.metrics {
            lines.push(format!(
                "Metrics: metric1 = {}, metric2_history = {:?}",
                metrics.metric1, metrics.metric2_history
            ));
        }

        for (key, value) in &self.extras {
            lines.push(format!("Extra: {key} = {value}"));
        }

        for path in &self.written {
            lines.push(format!("Wrote {}", path.display()));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, config: &RunConfig, json_mode: bool) -> Result<()> {
    let extras = parse_extra_args(&args.extras)?;
    let settings = RunSettings::resolve(&args, config);
    let trainer = template::build_trainer().context("Failed to build curriculum")?;

    let (state, metrics) = if args.demo {
        info!("running demo trainer state");
        (template::demo_trainer_state(&trainer)?, template::demo_metrics())
    } else {
        let state_path = args
            .input_trainer_state
            .context("--input-trainer-state is required")?;
        let data_directory = args
            .data_directory
            .context("DATA_DIRECTORY is required")?;

        let state: TrainerState = model_from_json_file(&state_path, "trainer state").await?;
        trainer.validate(&state)?;
        let metrics = trainer
            .compute_metrics(&state, &data_directory)
            .with_context(|| format!("Failed to compute metrics from {}", data_directory.display()))?;
        (state, metrics)
    };

    let evaluation = trainer.evaluate_with_trace(&state, &metrics)?;
    info!(
        from = %state.stage,
        to = %evaluation.state.stage,
        mode = %evaluation.state.task.parameters().mode,
        "suggestion computed"
    );

    let suggestion_json = to_pretty_json(&evaluation.state, "trainer state")?;
    let metrics_json = to_pretty_json(&metrics, "metrics")?;

    let mut pending = Vec::new();
    if let Some(ref dir) = settings.output_suggestion {
        pending.push(PendingFile {
            dir,
            file_name: SUGGESTION_FILE,
            contents: &suggestion_json,
        });
    }
    if let Some(ref dir) = settings.output_metrics {
        pending.push(PendingFile {
            dir,
            file_name: METRICS_FILE,
            contents: &metrics_json,
        });
    }
    let written = write_all_or_nothing(&pending).await?;

    let result = RunOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        dsl_version: DSL_VERSION.to_string(),
        trainer_state: (!settings.mute_trainer_state).then_some(evaluation.state),
        metrics: (!settings.mute_metrics).then_some(metrics),
        stage_transition: evaluation.stage_transition,
        policy_transition: evaluation.policy_transition,
        extras,
        written,
    };
    output(&result, json_mode);
    Ok(())
}
