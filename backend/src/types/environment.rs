//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};

use super::settings::SettingsError;

/// `LocalStack` edge endpoint used in development
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack` unless overridden)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable, defaulting to development
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidEnvironment` if `APP_ENV` holds an unknown value
    pub fn from_env() -> Result<Self, SettingsError> {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(SettingsError::InvalidEnvironment(env)),
        }
    }

    /// Whether logs should be emitted as JSON lines
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    ///
    /// `AWS_ENDPOINT_URL` wins in every stage; development falls back to `LocalStack`.
    #[must_use]
    pub fn override_aws_endpoint_url(&self) -> Option<String> {
        if let Ok(url) = env::var("AWS_ENDPOINT_URL") {
            return Some(url);
        }

        match self {
            Self::Production | Self::Staging => None,
            Self::Development => Some(LOCALSTACK_ENDPOINT.to_string()),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self, region: &str) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self, region: &str) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config(region).await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Test development (default)
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Ok(Environment::Development));

        env::set_var("APP_ENV", " Staging ");
        assert_eq!(Environment::from_env(), Ok(Environment::Staging));

        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Ok(Environment::Production));

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        assert_eq!(
            Environment::from_env(),
            Err(SettingsError::InvalidEnvironment("invalid".to_string()))
        );
        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    fn test_endpoint_override() {
        env::remove_var("AWS_ENDPOINT_URL");
        assert_eq!(Environment::Production.override_aws_endpoint_url(), None);
        assert_eq!(
            Environment::Development.override_aws_endpoint_url().as_deref(),
            Some(LOCALSTACK_ENDPOINT)
        );

        env::set_var("AWS_ENDPOINT_URL", "http://minio:9000");
        assert_eq!(
            Environment::Staging.override_aws_endpoint_url().as_deref(),
            Some("http://minio:9000")
        );
        env::remove_var("AWS_ENDPOINT_URL");
    }

    #[test]
    fn test_json_logs() {
        assert!(Environment::Production.json_logs());
        assert!(Environment::Staging.json_logs());
        assert!(!Environment::Development.json_logs());
    }
}
