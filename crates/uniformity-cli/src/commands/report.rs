use std::path::Path;
use std::time::Instant;

use uniformity_tests::{BatteryConfig, SignificanceLevel, run_battery};

use super::{InputArgs, load_sample};
use crate::error::CliError;
use crate::present;

pub struct ReportCommandConfig<'a> {
    pub input: &'a InputArgs,
    pub config_path: Option<&'a str>,
    pub alpha: Option<f64>,
    pub output_path: Option<&'a str>,
    pub json_path: Option<&'a str>,
}

/// Read a battery configuration from JSON. Missing fields take defaults.
pub fn load_config(path: &Path) -> Result<BatteryConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Configuration from file (or defaults), with `--alpha` taking precedence.
fn resolve_config(cfg: &ReportCommandConfig<'_>) -> Result<BatteryConfig, CliError> {
    let mut config = match cfg.config_path {
        Some(path) => load_config(Path::new(path))?,
        None => BatteryConfig::default(),
    };
    if let Some(alpha) = cfg.alpha {
        config.alpha = SignificanceLevel::new(alpha)?;
    }
    Ok(config)
}

pub fn run(cfg: ReportCommandConfig<'_>) -> Result<(), CliError> {
    let config = resolve_config(&cfg)?;
    let sample = load_sample(cfg.input)?;
    let n = sample.values.len();

    println!(
        "Running full test battery on {} ({n} values, alpha={})...\n",
        sample.label, config.alpha
    );
    let t0 = Instant::now();
    let entries = run_battery(&sample.values, &config);
    log::info!("battery finished in {:.3}s", t0.elapsed().as_secs_f64());

    print!("{}", present::format_summary(&entries));

    if let Some(path) = cfg.output_path {
        let report = present::markdown_report(&sample.label, n, config.alpha, &entries);
        std::fs::write(path, report).map_err(|e| CliError::write(path, e))?;
        println!("\nReport saved to: {path}");
    }

    if let Some(path) = cfg.json_path {
        let value = present::battery_json(&sample.label, n, config.alpha, &entries);
        let json = serde_json::to_string_pretty(&value)?;
        std::fs::write(path, json).map_err(|e| CliError::write(path, e))?;
        println!("JSON saved to: {path}");
    }
    Ok(())
}
