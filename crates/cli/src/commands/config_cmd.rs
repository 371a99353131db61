//! `agendum config` — Print configuration.

use agendum_config::AppConfig;
use agendum_core::Result;

pub async fn run(default: bool) -> Result<()> {
    let toml_str = if default {
        AppConfig::default_toml()
    } else {
        AppConfig::load()?.to_toml()
    };

    println!("# {}", AppConfig::config_dir().join("config.toml").display());
    println!("{toml_str}");
    Ok(())
}
