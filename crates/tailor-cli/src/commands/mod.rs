//! Command handlers. Each submodule owns one subcommand; shared input
//! loading lives here.

pub mod check;
pub mod completions;
pub mod process;
pub mod themes;

use std::path::PathBuf;

use tailor_adapters::{builtin_templates, load_template, load_user_data};
use tailor_core::domain::{Template, UserData};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Resolve the template input: an explicit file, or the built-in.
pub fn resolve_template(template: Option<&PathBuf>, builtin: bool) -> CliResult<Template> {
    match (template, builtin) {
        (Some(path), _) => Ok(load_template(path)?),
        (None, true) => Ok(builtin_templates::landing_starter()),
        (None, false) => Err(CliError::InvalidInput {
            message: "no template given; pass --template FILE or --builtin".into(),
        }),
    }
}

/// Resolve user data: an explicit file or an empty payload, with theme
/// precedence CLI flag → data file → config default.
pub fn resolve_user_data(
    data: Option<&PathBuf>,
    theme_flag: Option<&str>,
    config: &AppConfig,
) -> CliResult<UserData> {
    let mut user = match data {
        Some(path) => load_user_data(path)?,
        None => UserData::default(),
    };

    if let Some(theme) = theme_flag {
        user.theme = Some(theme.to_string());
    } else if user.theme.is_none() {
        user.theme = config.defaults.theme.clone();
    }

    Ok(user)
}
