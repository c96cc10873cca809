//! Session factory over aws-sdk-s3

use async_trait::async_trait;
use skbn_core::{Config, Result, Session, SessionFactory};

use crate::client::S3Client;

/// Builds [`S3Client`]s from one validated configuration
#[derive(Debug, Clone)]
pub struct S3SessionFactory {
    config: Config,
}

impl S3SessionFactory {
    /// Validate `config` and keep it for later builds
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl SessionFactory for S3SessionFactory {
    type Store = S3Client;

    fn region(&self) -> &str {
        &self.config.region
    }

    async fn build(&self) -> Result<S3Client> {
        Ok(S3Client::new(&self.config).await)
    }
}

/// Connect to S3 with the configured region and retry policy
pub async fn connect(config: Config) -> Result<Session<S3Client>> {
    let factory = S3SessionFactory::new(config)?;
    skbn_core::connect(&factory, &factory.config().retry).await
}
