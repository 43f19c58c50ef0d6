use axum::http::HeaderValue;
use thiserror::Error;

use super::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

/// Non-fatal findings collected while loading, logged once at startup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("websocket.outbound_buffer must be at least 1")]
    ZeroOutboundBuffer,
    #[error("streaming.char_delay_ms must be at least 1")]
    ZeroCharDelay,
    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.websocket.outbound_buffer == 0 {
        return Err(ConfigGuardRailError::ZeroOutboundBuffer);
    }
    if config.streaming.char_delay_ms == 0 {
        return Err(ConfigGuardRailError::ZeroCharDelay);
    }
    if let Some(bad) = config
        .cors
        .allowed_origins
        .iter()
        .find(|origin| {
            origin.as_str() != "*"
                && HeaderValue::from_str(origin.as_str()).is_err()
        })
    {
        return Err(ConfigGuardRailError::InvalidCorsOrigin(bad.clone()));
    }

    if config.cors.is_permissive() {
        warnings.push_with_hint(
            "CORS allows any origin",
            "Set CORS_ALLOWED_ORIGINS to restrict browser access",
        );
    }
    if config.directory.user_count == 0 {
        warnings.push("directory.user_count is 0; /api/users will be empty");
    }
    if config.worker.processing_delay_ms == 0 {
        warnings.push(
            "worker.processing_delay_ms is 0; requests complete immediately",
        );
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_only_warns_about_cors() {
        let warnings = apply_guard_rails(&Config::default()).unwrap();
        assert_eq!(warnings.items.len(), 1);
        assert_eq!(warnings.items[0].message, "CORS allows any origin");
    }

    #[test]
    fn zero_outbound_buffer_is_rejected() {
        let mut config = Config::default();
        config.websocket.outbound_buffer = 0;
        assert_eq!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::ZeroOutboundBuffer)
        );
    }

    #[test]
    fn origin_with_control_chars_is_rejected() {
        let mut config = Config::default();
        config.cors.allowed_origins = vec!["http://ok".into(), "bad\n".into()];
        assert_eq!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::InvalidCorsOrigin("bad\n".into()))
        );
    }
}
