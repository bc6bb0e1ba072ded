use async_trait::async_trait;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("URL launcher task for {url} did not complete: {details}")]
    Interrupted { url: String, details: String },
}

/// Opens a fully formed store URL in the external browser or store app.
#[async_trait]
pub trait UrlLauncher: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), LaunchError>;
}

/// Delegates to the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUrlLauncher;

#[async_trait]
impl UrlLauncher for SystemUrlLauncher {
    async fn open(&self, url: &str) -> Result<(), LaunchError> {
        debug!("Opening store URL {url}");

        let target = url.to_string();
        let result = tokio::task::spawn_blocking(move || open::that(&target)).await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(LaunchError::Open {
                url: url.to_string(),
                source,
            }),
            Err(error) => Err(LaunchError::Interrupted {
                url: url.to_string(),
                details: error.to_string(),
            }),
        }
    }
}
