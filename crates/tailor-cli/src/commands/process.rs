//! Implementation of the `tailor process` command.
//!
//! Responsibility: load inputs, run the core pipeline, and present or
//! materialize the artifact. No business logic lives here.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use tailor_adapters::{GeneratorConfig, HttpContentGenerator, LocalArtifactWriter};
use tailor_core::{
    application::{TemplateProcessor, Validator, ports::ArtifactSink},
    domain::{ProcessedTemplate, ThemeRegistry},
};

use crate::{
    cli::{GlobalArgs, ProcessArgs},
    commands::{resolve_template, resolve_user_data},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `tailor process` command.
#[instrument(skip_all)]
pub fn execute(
    args: ProcessArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let template = resolve_template(args.template.as_ref(), args.builtin)?;
    let user = resolve_user_data(args.data.as_ref(), args.theme.as_deref(), &config)?;

    let processor = build_processor(args.ai, &config)?;

    if !args.json {
        output.header(&format!("Processing '{}'...", template.label))?;
    }
    let artifact = processor.process(&template, &user)?;
    info!(
        files = artifact.manifest.file_count,
        score = artifact.validation.score,
        "processing finished"
    );

    if args.json {
        // Machine output goes to stdout verbatim, quiet or not.
        println!(
            "{}",
            serde_json::to_string_pretty(&artifact).map_err(|e| CliError::InvalidInput {
                message: format!("artifact serialization failed: {e}"),
            })?
        );
    }

    if let Some(out_dir) = &args.out {
        let writer = LocalArtifactWriter::new();
        if writer.exists(out_dir) && !args.force {
            return Err(CliError::OutputExists {
                path: out_dir.clone(),
            });
        }
        writer.write(&artifact, out_dir)?;
        output.success(&format!(
            "Wrote {} files to {}",
            artifact.manifest.file_count,
            out_dir.display()
        ))?;
    }

    if !args.json {
        summarize(&artifact, &global, &output)?;
    }

    Ok(())
}

/// Build the processor, wiring a generator only when `--ai` is given and
/// a credential is configured.
fn build_processor(ai: bool, config: &AppConfig) -> CliResult<TemplateProcessor> {
    let processor = TemplateProcessor::new(ThemeRegistry::with_builtin(), Validator::standard());

    if !ai {
        return Ok(processor);
    }

    let mut generator_config = GeneratorConfig::from_env().ok_or(CliError::MissingCredential)?;
    if let Some(model) = &config.generation.model {
        generator_config.model = model.clone();
    }
    if let Some(endpoint) = &config.generation.endpoint {
        generator_config.endpoint = endpoint.clone();
    }
    generator_config =
        generator_config.with_timeout(Duration::from_secs(config.generation.timeout_secs));

    let generator = HttpContentGenerator::new(generator_config)
        .map_err(|e| CliError::ConfigError {
            message: format!("cannot build content generator: {e}"),
        })?;

    Ok(processor.with_generator(Arc::new(generator)))
}

/// Human-readable run summary.
fn summarize(
    artifact: &ProcessedTemplate,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<()> {
    output.print("")?;
    output.print(&format!("  Template:  {}", artifact.manifest.template))?;
    output.print(&format!("  Theme:     {}", artifact.manifest.theme))?;
    output.print(&format!("  Files:     {}", artifact.manifest.file_count))?;
    output.print(&format!(
        "  Markers:   {} resolved",
        artifact.metadata.placeholder_count
    ))?;
    output.print(&format!(
        "  Score:     {}/100 ({} error(s), {} warning(s))",
        artifact.validation.score,
        artifact.validation.errors.len(),
        artifact.validation.warnings.len()
    ))?;

    for warning in &artifact.metadata.warnings {
        output.warning(warning)?;
    }

    if !global.quiet {
        for issue in &artifact.validation.errors {
            let location = issue.file.as_deref().unwrap_or("(all files)");
            output.error(&format!("{location}: {}", issue.message))?;
        }
    }

    if artifact.validation.is_valid {
        output.success("Validation passed")?;
    } else {
        output.error("Validation failed")?;
    }

    Ok(())
}
