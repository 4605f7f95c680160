use crate::core::{Lab, Storage};
use crate::utils::error::{LabError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::Path;
use std::time::Duration;
use url::Url;

// Some hosts refuse requests without a browser-looking agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

const FALLBACK_FILENAME: &str = "downloaded_image.jpg";

pub struct ImageFetcher<S: Storage> {
    storage: S,
    client: Client,
}

impl<S: Storage> ImageFetcher<S> {
    pub fn new(storage: S, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { storage, client })
    }

    /// Download the image behind `url` and save it. The URL may point at an
    /// image directly or at an HTML page whose first `<img>` tag is used.
    /// Returns the filename the image was saved under.
    pub async fn fetch_image(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let (image_url, image_response) = if content_type.starts_with("image/") {
            (response.url().clone(), response)
        } else if content_type.contains("text/html") {
            tracing::info!("ℹ Detected webpage, extracting image from {}...", url);
            let page_url = response.url().clone();
            let body = response.text().await?;

            let image_url =
                extract_image_url(&body, &page_url).ok_or_else(|| LabError::NoImageError {
                    url: url.to_string(),
                })?;

            tracing::debug!("Extracted image URL: {}", image_url);
            let image_response = self
                .client
                .get(image_url.clone())
                .send()
                .await?
                .error_for_status()?;
            (image_url, image_response)
        } else {
            return Err(LabError::UnsupportedContentError {
                url: url.to_string(),
                content_type,
            });
        };

        let filename = self
            .unique_filename(&filename_from_url(&image_url))
            .await?;
        let bytes = image_response.bytes().await?;
        self.storage.write_file(&filename, &bytes).await?;

        tracing::info!("✓ Saved: {} ({} bytes)", filename, bytes.len());
        Ok(filename)
    }

    /// Append `_1`, `_2`, ... before the extension until the name is free.
    /// Never overwrites an existing file.
    async fn unique_filename(&self, filename: &str) -> Result<String> {
        if !self.storage.exists(filename).await? {
            return Ok(filename.to_string());
        }

        let (stem, ext) = split_filename(filename);
        let mut counter = 1;
        loop {
            let candidate = format!("{}_{}{}", stem, counter, ext);
            if !self.storage.exists(&candidate).await? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}

/// First `<img src>` of the page, resolved against the page URL. Handles
/// absolute, scheme-relative and path-relative sources alike.
pub fn extract_image_url(html: &str, base: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img").ok()?;

    let src = document
        .select(&selector)
        .find_map(|img| img.value().attr("src"))?;

    base.join(src).ok()
}

/// Basename of the URL path, or a fallback when the path has none.
pub fn filename_from_url(url: &Url) -> String {
    Path::new(url.path())
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

fn split_filename(filename: &str) -> (String, String) {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    (stem, ext)
}

/// Runs one fetch per URL; individual failures are reported and counted but
/// never abort the batch.
pub struct FetchLab<S: Storage> {
    fetcher: ImageFetcher<S>,
    urls: Vec<String>,
    output_dir: String,
}

impl<S: Storage> FetchLab<S> {
    pub fn new(fetcher: ImageFetcher<S>, urls: Vec<String>, output_dir: String) -> Self {
        Self {
            fetcher,
            urls,
            output_dir,
        }
    }
}

#[async_trait]
impl<S: Storage> Lab for FetchLab<S> {
    fn name(&self) -> &'static str {
        "fetch"
    }

    async fn run(&self) -> Result<String> {
        let mut saved = 0usize;
        let mut failed = 0usize;

        for url in &self.urls {
            match self.fetcher.fetch_image(url).await {
                Ok(filename) => {
                    println!("✓ Saved: {}/{}", self.output_dir, filename);
                    saved += 1;
                }
                Err(e) => {
                    tracing::warn!("✗ Error with {}: {}", url, e);
                    eprintln!("✗ Error with {}: {}", url, e.user_friendly_message());
                    failed += 1;
                }
            }
        }

        Ok(format!(
            "Saved {} of {} images to {} ({} failed)",
            saved,
            self.urls.len(),
            self.output_dir,
            failed
        ))
    }
}
