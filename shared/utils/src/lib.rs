pub mod config;
pub mod logging;
pub mod error;
pub mod validation;
pub mod table;

pub use config::*;
pub use logging::*;
pub use error::*;
pub use validation::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_error_handling() {
        let error = PriceCheckError::parse("bad row");
        assert_eq!(error.error_code(), "PARSE_ERROR");
        assert_eq!(error.to_string(), "Parse error: bad row");
    }
}
