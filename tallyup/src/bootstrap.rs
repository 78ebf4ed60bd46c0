use anyhow::{Context as _, Result};
use clap::ValueEnum;
use std::{env, path::Path};
use tallyup_application::{
    EmptyBeneficiaryPolicy, LedgerProcessor, LedgerSnapshot, ProcessingError, SettlementResult,
};
use tallyup_infrastructure::{JsonSnapshotReader, render_result};
use tallyup_presentation::{SettlementPresenter, format_snapshot_error};
use tracing_subscriber::EnvFilter;

pub const OUTPUT_FORMAT_VAR: &str = "TALLYUP_OUTPUT_FORMAT";
pub const EMPTY_BENEFICIARIES_VAR: &str = "TALLYUP_EMPTY_BENEFICIARIES";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings resolved from the environment, then overridden by CLI flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub output_format: OutputFormat,
    pub empty_beneficiaries: EmptyBeneficiaryPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(OUTPUT_FORMAT_VAR) {
            config.output_format = OutputFormat::from_str(value.trim(), true)
                .map_err(|err| anyhow::anyhow!("invalid {OUTPUT_FORMAT_VAR}: {err}"))?;
        }
        if let Some(value) = lookup(EMPTY_BENEFICIARIES_VAR) {
            config.empty_beneficiaries = value
                .parse::<EmptyBeneficiaryPolicy>()
                .with_context(|| format!("invalid {EMPTY_BENEFICIARIES_VAR}"))?;
        }

        Ok(config)
    }

    pub fn with_overrides(
        mut self,
        output_format: Option<OutputFormat>,
        empty_beneficiaries: Option<EmptyBeneficiaryPolicy>,
    ) -> Self {
        if let Some(output_format) = output_format {
            self.output_format = output_format;
        }
        if let Some(empty_beneficiaries) = empty_beneficiaries {
            self.empty_beneficiaries = empty_beneficiaries;
        }
        self
    }
}

/// Logs go to stderr so stdout carries only the settlement output.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run(snapshot_path: &Path, config: AppConfig) -> Result<String> {
    tracing::debug!(
        path = %snapshot_path.display(),
        format = ?config.output_format,
        policy = %config.empty_beneficiaries,
        "Starting settlement"
    );

    let reader = JsonSnapshotReader::from_path(snapshot_path);
    let processor = LedgerProcessor::new(config.empty_beneficiaries);
    let (snapshot, result) = processor.load_and_settle(&reader).map_err(|err| match err {
        ProcessingError::Invalid(err) => anyhow::anyhow!(format_snapshot_error(&err)),
        err @ ProcessingError::Load(_) => anyhow::Error::new(err),
    })?;

    render(config.output_format, &snapshot, &result)
}

pub fn render(
    format: OutputFormat,
    snapshot: &LedgerSnapshot,
    result: &SettlementResult,
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            Ok(SettlementPresenter::render_with_participants(result, snapshot).to_text())
        }
        OutputFormat::Json => {
            let mut json = render_result(result).context("failed to serialize settlement")?;
            json.push('\n');
            Ok(json)
        }
    }
}
