use crate::core::{Lab, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

const SAMPLE_TEXT: &str = "Hello World\n\
This is a sample file created automatically.\n\
Plain text goes in, shouting comes out.\n";

/// Reads an input file, uppercases it and writes the result to an output
/// file. A missing input file is created with sample text first.
pub struct FileTransformLab<S: Storage> {
    storage: S,
    input: String,
    output: String,
}

impl<S: Storage> FileTransformLab<S> {
    pub fn new(storage: S, input: String, output: String) -> Self {
        Self {
            storage,
            input,
            output,
        }
    }

    async fn read_or_seed_input(&self) -> Result<String> {
        if !self.storage.exists(&self.input).await? {
            tracing::info!("ℹ {} not found. Creating it with sample text...", self.input);
            self.storage
                .write_file(&self.input, SAMPLE_TEXT.as_bytes())
                .await?;
        }

        let bytes = self.storage.read_file(&self.input).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub fn transform_content(content: &str) -> String {
    content.to_uppercase()
}

#[async_trait]
impl<S: Storage> Lab for FileTransformLab<S> {
    fn name(&self) -> &'static str {
        "transform"
    }

    async fn run(&self) -> Result<String> {
        let content = self.read_or_seed_input().await?;
        let modified = transform_content(&content);

        self.storage
            .write_file(&self.output, modified.as_bytes())
            .await?;

        let summary = format!(
            "File has been read and modified version written to {}",
            self.output
        );
        println!("✅ SUCCESS: {}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::LabError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        async fn get(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().await.get(path).cloned().ok_or_else(|| {
                LabError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &str) -> Result<bool> {
            Ok(self.files.lock().await.contains_key(path))
        }
    }

    #[test]
    fn test_transform_uppercases() {
        assert_eq!(transform_content("Hello World"), "HELLO WORLD");
        assert_eq!(transform_content("mixed CASE 123!"), "MIXED CASE 123!");
        assert_eq!(transform_content(""), "");
    }

    #[tokio::test]
    async fn test_existing_input_is_transformed() {
        let storage = MockStorage::new();
        storage.put("input.txt", b"hello there").await;

        let lab = FileTransformLab::new(
            storage.clone(),
            "input.txt".to_string(),
            "output.txt".to_string(),
        );
        lab.run().await.unwrap();

        let output = storage.get("output.txt").await.unwrap();
        assert_eq!(output, b"HELLO THERE");
    }

    #[tokio::test]
    async fn test_missing_input_is_seeded_with_sample_text() {
        let storage = MockStorage::new();

        let lab = FileTransformLab::new(
            storage.clone(),
            "input.txt".to_string(),
            "output.txt".to_string(),
        );
        lab.run().await.unwrap();

        let input = storage.get("input.txt").await.unwrap();
        assert_eq!(input, SAMPLE_TEXT.as_bytes());

        let output = String::from_utf8(storage.get("output.txt").await.unwrap()).unwrap();
        assert_eq!(output, SAMPLE_TEXT.to_uppercase());
    }
}
