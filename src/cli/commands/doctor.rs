//! Doctor command - verify external requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use crate::gateway::{HttpFetcher, JsonFetcher, UpstreamRequest};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(config_path: Option<&PathBuf>, settings: &Settings) -> anyhow::Result<()> {
    Output::header("Combined Services Doctor");
    println!();
    println!("Checking external requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let ytdlp = check_ytdlp(&settings.ytdlp_path());
    ytdlp.print();
    checks.push(ytdlp);

    println!();

    println!("{}", style("Weather API").bold());
    let weather = check_weather_api(settings).await;
    weather.print();
    checks.push(weather);

    println!();

    println!("{}", style("Configuration").bold());
    let path = config_path
        .cloned()
        .unwrap_or_else(Settings::default_config_path);
    let config_check = check_config_file(&path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. The affected tools will answer with failure text.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! The server is ready to use.");
    }

    Ok(())
}

/// Check that yt-dlp runs.
fn check_ytdlp(binary: &Path) -> CheckResult {
    match Command::new(binary).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok("yt-dlp", &version)
        }
        Ok(_) => CheckResult::error("yt-dlp", "installed but not working", install_hint_ytdlp()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error("yt-dlp", &format!("{} not found", binary.display()), install_hint_ytdlp())
        }
        Err(e) => CheckResult::error("yt-dlp", &format!("error: {}", e), install_hint_ytdlp()),
    }
}

/// Check that the weather API answers with JSON.
async fn check_weather_api(settings: &Settings) -> CheckResult {
    let request = UpstreamRequest::get(settings.weather.base_url.as_str())
        .header("User-Agent", &settings.weather.user_agent)
        .header("Accept", "application/geo+json");

    match HttpFetcher::new().fetch_json(&request).await {
        Some(_) => CheckResult::ok("api.weather.gov", &format!("reachable at {}", settings.weather.base_url)),
        None => CheckResult::warning(
            "api.weather.gov",
            &format!("no JSON response from {}", settings.weather.base_url),
            "Check network access; weather tools will report that data is unavailable",
        ),
    }
}

/// Check if config file exists.
fn check_config_file(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok("Config file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: combined-services config init",
        )
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_missing_ytdlp_is_an_error() {
        let result = check_ytdlp(Path::new("/nonexistent/yt-dlp-for-tests"));
        assert_eq!(result.status, CheckStatus::Error);
        assert!(result.message.contains("not found"));
    }

    #[test]
    fn test_missing_config_file_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_config_file(&dir.path().join("config.toml"));
        assert_eq!(result.status, CheckStatus::Warning);
    }
}
