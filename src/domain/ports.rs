use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// One self-contained exercise. `run` does the whole thing and returns a
/// one-line summary for the CLI to print.
#[async_trait]
pub trait Lab: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self) -> Result<String>;
}
