//! Conversion from the resolved `[logging]` section.

use vexil_config::LoggingSection;

use crate::logging::{LogConfig, LogFormat};

impl From<&LoggingSection> for LogConfig {
    fn from(section: &LoggingSection) -> Self {
        let mut config =
            LogConfig::new(&section.level).with_format(LogFormat::from_name(&section.format));
        for directive in &section.directives {
            config = config.with_directive(directive);
        }
        config
    }
}

/// Build a [`LogConfig`] from the `[logging]` section, then apply the
/// `VEXIL_LOG_*` output tweaks from the process environment.
#[must_use]
pub fn to_log_config(section: &LoggingSection) -> LogConfig {
    LogConfig::from(section).with_env(&vexil_env::ProcessEnv)
}
