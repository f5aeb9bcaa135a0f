//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "geocoder.backend")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                let keys = Config::available_keys().join(", ");
                return Err(Error::Config(format!(
                    "Unknown config key: {} (available: {})",
                    key, keys
                )));
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[chart]");
    println!("size_inches = {}", config.chart.size_inches);
    println!("dpi = {}", config.chart.dpi);
    println!();

    println!("[animation]");
    println!("frames = {}", config.animation.frames);
    println!("step_hours = {}", config.animation.step_hours);
    println!("frame_delay_ms = {}", config.animation.frame_delay_ms);
    println!();

    println!("[geocoder]");
    println!("backend = \"{}\"", config.geocoder.backend);
    println!("timeout_secs = {}", config.geocoder.timeout_secs);
    println!();

    println!("[data]");
    println!("hipparcos_url = \"{}\"", config.data.hipparcos_url);
    println!("constellations_url = \"{}\"", config.data.constellations_url);
    println!();

    println!("[display]");
    if config.display.viewer.is_empty() {
        println!("viewer = \"\" # platform default");
    } else {
        println!("viewer = \"{}\"", config.display.viewer);
    }
}
