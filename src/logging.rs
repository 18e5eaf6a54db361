/// Filter used when neither the config nor `RUST_LOG` names one. wgpu's
/// internals log every resource at `info`, so they are held to warnings.
pub const DEFAULT_FILTER: &str = "triangle_bootstrap=info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. "triangle_bootstrap=debug".
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Picks the directives to install: the configured filter, then `rust_log`,
/// then `DEFAULT_FILTER`. Blank values count as unset.
pub fn filter_spec(config: &LoggingConfig, rust_log: Option<&str>) -> String {
    fn set(spec: Option<&str>) -> Option<&str> {
        spec.map(str::trim).filter(|spec| !spec.is_empty())
    }

    set(config.filter.as_deref())
        .or_else(|| set(rust_log))
        .unwrap_or(DEFAULT_FILTER)
        .to_owned()
}

/// Installs the stderr logger. Returns `false` when a logger was already set,
/// which happens under the test harness or on a second call.
pub fn init_logging(config: LoggingConfig) -> bool {
    let rust_log = std::env::var("RUST_LOG").ok();
    let spec = filter_spec(&config, rust_log.as_deref());

    let installed = env_logger::Builder::new()
        .parse_filters(&spec)
        .write_style(config.write_style)
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        log::debug!("logging with filter {:?}", spec);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_filter(filter: &str) -> LoggingConfig {
        LoggingConfig {
            filter: Some(filter.to_owned()),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn configured_filter_wins_over_environment() {
        let config = with_filter("triangle_bootstrap=trace");
        assert_eq!(filter_spec(&config, Some("warn")), "triangle_bootstrap=trace");
    }

    #[test]
    fn environment_used_when_config_is_silent() {
        let config = LoggingConfig::default();
        assert_eq!(filter_spec(&config, Some(" debug ")), "debug");
    }

    #[test]
    fn default_filter_quiets_wgpu_internals() {
        let config = LoggingConfig::default();
        assert_eq!(filter_spec(&config, None), DEFAULT_FILTER);
        assert!(DEFAULT_FILTER.starts_with("triangle_bootstrap=info"));
        assert!(DEFAULT_FILTER.contains("wgpu_core=warn"));
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        assert_eq!(filter_spec(&with_filter("  "), None), DEFAULT_FILTER);
        assert_eq!(filter_spec(&LoggingConfig::default(), Some("")), DEFAULT_FILTER);
        assert_eq!(filter_spec(&with_filter(""), Some("warn")), "warn");
    }

    #[test]
    fn second_init_is_refused() {
        init_logging(LoggingConfig::default());
        assert!(!init_logging(LoggingConfig::default()));
    }
}
