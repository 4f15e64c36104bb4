//! Implementation of the `tailor check` command.
//!
//! Runs the pipeline (generation disabled, so the gate is deterministic)
//! and reports validation only; the exit code carries the verdict for CI.

use tracing::instrument;

use tailor_core::{
    application::{TemplateProcessor, Validator},
    domain::ThemeRegistry,
};

use crate::{
    cli::CheckArgs,
    commands::{resolve_template, resolve_user_data},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `tailor check` command.
#[instrument(skip_all)]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let template = resolve_template(args.template.as_ref(), args.builtin)?;
    let user = resolve_user_data(args.data.as_ref(), args.theme.as_deref(), &config)?;

    let processor = TemplateProcessor::new(ThemeRegistry::with_builtin(), Validator::standard());
    let artifact = processor.process(&template, &user)?;
    let validation = &artifact.validation;

    output.print(&format!(
        "Score {}/100 \u{2022} {} error(s), {} warning(s)",
        validation.score,
        validation.errors.len(),
        validation.warnings.len()
    ))?;

    for issue in validation.errors.iter().chain(validation.warnings.iter()) {
        let location = issue.file.as_deref().unwrap_or("(all files)");
        let line = format!("[{}] {location}: {}", issue.severity, issue.message);
        match issue.severity {
            tailor_core::domain::Severity::Error => output.error(&line)?,
            _ => output.warning(&line)?,
        }
    }

    if validation.is_valid {
        output.success("Validation passed")?;
        Ok(())
    } else {
        Err(CliError::ChecksFailed {
            errors: validation.errors.len(),
            score: validation.score,
        })
    }
}
