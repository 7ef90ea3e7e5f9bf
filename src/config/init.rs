use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, ReportConfig};
use crate::report::DEFAULT_TITLE;
use crate::scoring::ScoringConfig;

const HEADER: &str = "\
# fm-scout configuration
#
# scoring.attributes        attribute columns recognized in the export
# scoring.weights           per-position weights (positive numbers)
# scoring.reference_position  table whose max score (sum of weight * 20)
#                             normalizes every position score
# scoring.general_weighting   score Current_Score with one position's table
#                             instead of the sum of all tables
# scoring.unknown_attributes  tolerate | reject codes missing from attributes
#
# CF lists 'OtB' while the catalog spells it 'Otb'; rename it to make CF's
# off-the-ball weight count.
";

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// The built-in settings as a config document.
pub fn default_config_yaml() -> Result<String> {
    let config = Config {
        scoring: Some(ScoringConfig::builtin()),
        report: Some(ReportConfig {
            title: Some(DEFAULT_TITLE.to_string()),
        }),
    };
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
    Ok(format!("{}\n{}", HEADER, yaml))
}

/// Write the built-in settings to `path` (default ~/.config/fm-scout/config.yaml).
///
/// An existing file is only replaced with `force` or after confirmation.
/// Returns the path written, or None if the user declined.
pub fn run_init(path: Option<PathBuf>, force: bool) -> Result<Option<PathBuf>> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            return Ok(None);
        }
    }

    write_config(&config_path, &default_config_yaml()?)?;
    Ok(Some(config_path))
}

fn write_config(path: &Path, yaml: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open config file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;
    Ok(())
}
