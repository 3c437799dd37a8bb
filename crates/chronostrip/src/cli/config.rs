//! The `chronostrip config` command for configuration management.

use clap::{Args, Subcommand};
use chronostrip_core::Config;
use std::path::Path;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let path = Config::default_path();
            let config = Config::load()?;
            println!("{}", render_config(&config, &path)?);
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(not created yet; run `chronostrip config init`)");
            }
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // Write default config
            let config = Config::default();
            let toml = config.to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
            println!(
                "Sections: [processing] worker threads and accepted formats, \
                 [barcode] output format and date labels, [logging] level and format"
            );
        }
    }

    Ok(())
}

/// Render the resolved configuration as TOML, prefixed with a comment
/// saying where it came from.
fn render_config(config: &Config, path: &Path) -> anyhow::Result<String> {
    let source = if path.exists() {
        format!("# loaded from {}", path.display())
    } else {
        format!(
            "# built-in defaults ({} not found; `chronostrip config init` creates it)",
            path.display()
        )
    };
    Ok(format!("{source}\n{}", config.to_toml()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_notes_missing_file() {
        let config = Config::default();
        let text = render_config(&config, Path::new("/nonexistent/config.toml")).unwrap();

        assert!(text.starts_with("# built-in defaults"));
        assert!(text.contains("config init"));
        assert!(text.contains("[processing]"));
        assert!(text.contains("[barcode]"));
        assert!(text.contains("[logging]"));
    }

    #[test]
    fn test_render_config_notes_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::default();
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let text = render_config(&config, &path).unwrap();
        assert!(text.starts_with("# loaded from"));
        assert!(text.contains("config.toml"));
    }
}
