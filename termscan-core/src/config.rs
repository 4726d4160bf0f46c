//! Configuration file support for termscan
//!
//! Loads optional settings from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.termscanrc.json` in the working directory
//! 3. `termscan.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.
//! The lexicon and extraction limits are fixed and cannot be configured.

use crate::fetch::{FetchOptions, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::risk::RiskTier;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default file name for the HTML report
pub const DEFAULT_REPORT_OUTPUT: &str = "tnc_analysis_report.html";
const MAX_TIMEOUT_SECS: u64 = 300;

/// termscan configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermscanConfig {
    /// Remote fetch settings
    #[serde(default)]
    pub fetch: Option<FetchConfig>,

    /// Hide clauses below this tier (the summary still counts them)
    #[serde(default)]
    pub min_risk: Option<RiskTier>,

    /// Where the HTML report is written (default: tnc_analysis_report.html)
    #[serde(default)]
    pub report_output: Option<PathBuf>,
}

/// Remote fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with requests (default: desktop Chrome)
    pub user_agent: Option<String>,
}

/// Effective configuration after defaults are applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub fetch: FetchOptions,
    pub min_risk: Option<RiskTier>,
    pub report_output: PathBuf,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl TermscanConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref fetch) = self.fetch {
            if let Some(secs) = fetch.timeout_secs {
                if secs == 0 {
                    anyhow::bail!("fetch.timeout_secs must be positive (got 0)");
                }
                if secs > MAX_TIMEOUT_SECS {
                    anyhow::bail!(
                        "fetch.timeout_secs must be at most {} (got {})",
                        MAX_TIMEOUT_SECS,
                        secs
                    );
                }
            }
            if let Some(ref agent) = fetch.user_agent {
                if agent.trim().is_empty() {
                    anyhow::bail!("fetch.user_agent must not be empty");
                }
            }
        }

        if let Some(ref output) = self.report_output {
            if output.as_os_str().is_empty() {
                anyhow::bail!("report_output must not be empty");
            }
        }

        Ok(())
    }

    /// Resolve config into the values used at runtime
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let (timeout_secs, user_agent) = match &self.fetch {
            Some(f) => (
                f.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
                f.user_agent
                    .clone()
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            ),
            None => (DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT.to_string()),
        };

        Ok(ResolvedConfig {
            fetch: FetchOptions {
                timeout: Duration::from_secs(timeout_secs),
                user_agent,
            },
            min_risk: self.min_risk,
            report_output: self
                .report_output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_OUTPUT)),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Configuration with all defaults applied
    pub fn defaults() -> Result<Self> {
        TermscanConfig::default().resolve()
    }
}

/// Discover a config file in `dir`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(TermscanConfig, PathBuf)>> {
    for name in [".termscanrc.json", "termscan.config.json"] {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<TermscanConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: TermscanConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (TermscanConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let resolved = ResolvedConfig::defaults().expect("default config should resolve");
        assert_eq!(resolved.fetch.timeout, Duration::from_secs(30));
        assert_eq!(resolved.fetch.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(resolved.min_risk, None);
        assert_eq!(resolved.report_output, PathBuf::from(DEFAULT_REPORT_OUTPUT));
        assert!(resolved.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: TermscanConfig = serde_json::from_str("{}").unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "fetch": { "timeout_secs": 10, "user_agent": "termscan-test/1.0" },
            "min_risk": "high",
            "report_output": "out/report.html"
        }"#;
        let config: TermscanConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.fetch.timeout, Duration::from_secs(10));
        assert_eq!(resolved.fetch.user_agent, "termscan-test/1.0");
        assert_eq!(resolved.min_risk, Some(RiskTier::High));
        assert_eq!(resolved.report_output, PathBuf::from("out/report.html"));
    }

    #[test]
    fn test_reject_unknown_fields() {
        let result: Result<TermscanConfig, _> = serde_json::from_str(r#"{"unknown_field": true}"#);
        assert!(result.is_err());
        let result: Result<TermscanConfig, _> =
            serde_json::from_str(r#"{"fetch": {"retries": 3}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_unknown_tier() {
        let result: Result<TermscanConfig, _> = serde_json::from_str(r#"{"min_risk": "severe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_zero_timeout() {
        let config: TermscanConfig =
            serde_json::from_str(r#"{"fetch": {"timeout_secs": 0}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_oversized_timeout() {
        let config: TermscanConfig =
            serde_json::from_str(r#"{"fetch": {"timeout_secs": 301}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_empty_user_agent() {
        let config: TermscanConfig =
            serde_json::from_str(r#"{"fetch": {"user_agent": "  "}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_rc_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".termscanrc.json");
        fs::write(&config_path, r#"{"min_risk": "medium"}"#).unwrap();

        let (config, path) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.min_risk, Some(RiskTier::Medium));
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_discover_priority_order() {
        let dir = tempfile::tempdir().unwrap();

        // .termscanrc.json should win
        fs::write(dir.path().join(".termscanrc.json"), r#"{"min_risk": "low"}"#).unwrap();
        fs::write(
            dir.path().join("termscan.config.json"),
            r#"{"min_risk": "critical"}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.min_risk, Some(RiskTier::Low));
    }

    #[test]
    fn test_discover_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(resolved.config_path.is_none());
    }

    #[test]
    fn test_explicit_path_overrides_discovery() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".termscanrc.json"), r#"{"min_risk": "low"}"#).unwrap();
        let explicit = dir.path().join("custom.json");
        fs::write(&explicit, r#"{"min_risk": "high"}"#).unwrap();

        let resolved = load_and_resolve(dir.path(), Some(&explicit)).unwrap();
        assert_eq!(resolved.min_risk, Some(RiskTier::High));
        assert_eq!(resolved.config_path, Some(explicit));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termscan.config.json");
        fs::write(&path, r#"{"fetch": {"timeout_secs": 0}}"#).unwrap();

        let err = discover_config(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("termscan.config.json"));
    }
}
