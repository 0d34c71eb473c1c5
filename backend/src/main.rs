use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use photobooth_backend::{
    media_storage::{ObjectStore, S3ObjectStore},
    server,
    types::{Environment, Settings},
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env()?;

    // Use JSON format for staging/production, regular format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let settings = Arc::new(Settings::from_env()?);

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(settings.aws_region()).await,
    ));
    let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(s3_client));

    tracing::info!(
        bucket = settings.photos_bucket(),
        region = settings.aws_region(),
        ?environment,
        "Configured photo storage"
    );

    server::start(settings, store).await
}
