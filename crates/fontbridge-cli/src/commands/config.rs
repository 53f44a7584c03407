use crate::errors::CliError;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::Colorize;
use fontbridge_config::{venv_paths, Config, ConfigError};
use fontbridge_logger as logger;
use std::fs;
use std::path::Path;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set a configuration value (venv-path, module, python-home)
    Set { key: String, value: String },
    /// Get or set the path to the config file.
    /// If `new_path` is provided, later runs read the config from there.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> Result<(), CliError> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
            println!("  {}: {}", "module in use".cyan(), config.module_name());
            if let Some(venv) = config.venv_path() {
                show_venv(&venv);
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, value.clone())?;
            config.save()?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Path { new_path } => {
            let config_path = Config::path()?;
            logger::debug(&format!("Reading config from: {}", config_path.display()));

            match new_path {
                Some(p) => {
                    let pointer_path = Config::pointer_path()?;
                    if let Some(parent) = pointer_path.parent() {
                        fs::create_dir_all(parent).map_err(ConfigError::from)?;
                    }
                    fs::write(&pointer_path, p.as_bytes())
                        .map_err(ConfigError::from)?;
                    logger::success(&format!("Config path set to {}", p));
                }
                None => {
                    println!("{}", config_path.display());

                    let pointer_path = Config::pointer_path()?;
                    if let Ok(contents) = fs::read_to_string(&pointer_path) {
                        let trimmed = contents.trim();
                        if !trimmed.is_empty() {
                            println!("{} {}", "overridden-by".cyan(), trimmed);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Report what the session will find inside the configured venv
fn show_venv(venv: &Path) {
    let rows = [
        ("site-packages", venv_paths::resolve_site_packages(venv)),
        ("interpreter", venv_paths::resolve_python_exe(venv)),
        ("base home", venv_paths::resolve_python_home(venv)),
    ];
    for (label, resolved) in rows {
        match resolved {
            Ok(path) => println!("  {}: {}", label.cyan(), path.display()),
            Err(e) => println!("  {}: {}", label.cyan(), e.to_string().yellow()),
        }
    }
}
