use crate::errors::CliError;
use clap::Subcommand;
use colored::Colorize;
use fontbridge_python::version;
use semver::Version;

#[derive(Subcommand, Debug, Clone)]
pub enum VersionAction {
    /// Print a version string with fontforge's decorations stripped
    Normalize { raw: String },
    /// Parse a version string and print its components
    Parse { raw: String },
}

pub fn handle_version(action: VersionAction) -> Result<(), CliError> {
    match action {
        VersionAction::Normalize { raw } => {
            println!("{}", version::normalize(&raw));
        }
        VersionAction::Parse { raw } => {
            let parsed = version::parse(&raw)?;
            print!("{}", describe(&parsed));
        }
    }
    Ok(())
}

fn describe(v: &Version) -> String {
    let mut out = format!(
        "{}\n  {}: {}\n  {}: {}\n  {}: {}\n",
        v.to_string().bold(),
        "major".cyan(),
        v.major,
        "minor".cyan(),
        v.minor,
        "patch".cyan(),
        v.patch
    );
    if !v.pre.is_empty() {
        out.push_str(&format!("  {}: {}\n", "pre-release".cyan(), v.pre));
    }
    if !v.build.is_empty() {
        out.push_str(&format!("  {}: {}\n", "build".cyan(), v.build));
    }
    out
}
