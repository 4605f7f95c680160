use crate::core::Lab;
use crate::utils::error::{LabError, Result};
use async_trait::async_trait;

/// Opens a user-named file and prints it, mapping each failure mode onto its
/// own error so the CLI can tell the user what actually went wrong.
pub struct FileViewerLab {
    path: String,
}

impl FileViewerLab {
    pub fn new(path: String) -> Self {
        Self { path }
    }

    pub fn read_content(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| LabError::from_read_error(e, &self.path))
    }
}

#[async_trait]
impl Lab for FileViewerLab {
    fn name(&self) -> &'static str {
        "open"
    }

    async fn run(&self) -> Result<String> {
        let content = self.read_content()?;

        println!("\n✅ File opened successfully! Here is the content:\n");
        println!("{}", content);

        Ok(format!(
            "Read {} bytes from {}",
            content.len(),
            self.path
        ))
    }
}
