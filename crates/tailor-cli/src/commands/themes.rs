//! Implementation of the `tailor themes` command.

use tracing::instrument;

use tailor_core::domain::ThemeRegistry;

use crate::{
    cli::ThemesArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `tailor themes` command.
#[instrument(skip_all)]
pub fn execute(args: ThemesArgs, output: OutputManager) -> CliResult<()> {
    let registry = ThemeRegistry::with_builtin();

    if let Some(name) = &args.css {
        let theme = registry.get(name).ok_or_else(|| CliError::UnknownTheme {
            name: name.clone(),
            available: registry.names().iter().map(|n| n.to_string()).collect(),
        })?;
        // CSS goes to stdout verbatim for redirection.
        print!("{}", theme.css_variables());
        return Ok(());
    }

    output.header("Available themes")?;
    for name in registry.names() {
        let Some(theme) = registry.get(name) else {
            continue;
        };
        output.print(&format!(
            "  {:<10} primary={:<8} secondary={:<8} accent={:<8} heading='{}'",
            theme.name,
            theme.colors.primary.family,
            theme.colors.secondary.family,
            theme.colors.accent.family,
            theme.typography.heading_font,
        ))?;
    }

    Ok(())
}
