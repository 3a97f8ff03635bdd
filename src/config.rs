use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub service_name: String,
    /// Default tracing filter, used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub otel_exporter_endpoint: Option<String>,
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_name = lookup("SERVICE_NAME").unwrap_or_else(|| "deskcore".to_string());

        let log_filter = lookup("LOG_FILTER").unwrap_or_else(|| "deskcore=debug".to_string());

        let otel_exporter_endpoint =
            lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|endpoint| !endpoint.is_empty());

        let metrics_port = match lookup("METRICS_PORT") {
            Some(port) => Some(
                port.parse()
                    .map_err(|_| ConfigError::InvalidMetricsPort(port))?,
            ),
            None => None,
        };

        Ok(Config {
            service_name,
            log_filter,
            otel_exporter_endpoint,
            metrics_port,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid metrics port: {0}")]
    InvalidMetricsPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.service_name, "deskcore");
        assert_eq!(config.log_filter, "deskcore=debug");
        assert_eq!(config.otel_exporter_endpoint, None);
        assert_eq!(config.metrics_port, None);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVICE_NAME", "helpdesk-api"),
            ("LOG_FILTER", "info"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
            ("METRICS_PORT", "9100"),
        ]))
        .unwrap();

        assert_eq!(config.service_name, "helpdesk-api");
        assert_eq!(config.log_filter, "info");
        assert_eq!(
            config.otel_exporter_endpoint.as_deref(),
            Some("http://collector:4317")
        );
        assert_eq!(config.metrics_port, Some(9100));
    }

    #[test]
    fn test_empty_otel_endpoint_is_ignored() {
        let config =
            Config::from_lookup(lookup_from(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "")])).unwrap();
        assert_eq!(config.otel_exporter_endpoint, None);
    }

    #[test]
    fn test_invalid_metrics_port() {
        let err = Config::from_lookup(lookup_from(&[("METRICS_PORT", "ninety")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid metrics port: ninety");
    }
}
