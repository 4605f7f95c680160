pub mod cli;

use crate::utils::error::Result;
use crate::utils::prompt;
use crate::utils::validation::{
    self, validate_non_negative, validate_path, validate_range, validate_url, Validate,
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "small-labs")]
#[command(about = "A small collection of practice lab exercises as one CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log CPU/memory usage while running")]
    pub monitor: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply a percentage discount to a price
    Discount(DiscountArgs),
    /// Open a text file and print its content
    Open(OpenArgs),
    /// Read a text file, uppercase it, write the result to a new file
    Transform(TransformArgs),
    /// Polymorphism demo: a small fleet of vehicles
    Vehicles,
    /// Class-hierarchy demo: smartphones and a gaming phone
    Phones,
    /// Download images from URLs or extract them from web pages
    Fetch(FetchArgs),
    /// Explore a flower dataset: stats, grouped means and charts
    Analyze(AnalyzeArgs),
}

/// Arguments left out on the command line are gathered with interactive
/// prompts, matching how the exercises were originally driven.
#[derive(Debug, Clone, Args)]
pub struct DiscountArgs {
    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub percent: Option<f64>,
}

impl DiscountArgs {
    pub fn resolve(&self) -> Result<(f64, f64)> {
        let price = match self.price {
            Some(p) => p,
            None => prompt::read_f64("price", "Enter the original price: ")?,
        };
        let percent = match self.percent {
            Some(p) => p,
            None => {
                prompt::read_f64("percent", "Enter the percentage discount received: ")?
            }
        };

        validate_non_negative("price", price)?;
        validate_range("percent", percent, 0.0, 100.0)?;
        Ok((price, percent))
    }
}

#[derive(Debug, Clone, Args)]
pub struct OpenArgs {
    /// File to open; prompts when omitted
    #[arg(long)]
    pub file: Option<String>,
}

impl OpenArgs {
    pub fn resolve(&self) -> Result<String> {
        let file = match &self.file {
            Some(f) => f.clone(),
            None => prompt::read_line("Enter the filename you want to open (e.g., input.txt): ")?,
        };
        validate_path("file", &file)?;
        Ok(file)
    }
}

#[derive(Debug, Clone, Args)]
pub struct TransformArgs {
    #[arg(long, default_value = "input.txt")]
    pub input: String,

    #[arg(long, default_value = "output.txt")]
    pub output: String,
}

impl Validate for TransformArgs {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Image or page URLs; prompts when omitted
    pub urls: Vec<String>,

    #[arg(long, default_value = "fetched_images")]
    pub output_dir: String,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,
}

impl FetchArgs {
    /// URLs can arrive as args, as a comma-separated prompt answer, or as a
    /// file with one URL per line (a prompt answer naming an existing file
    /// is read as a URL list).
    pub fn resolve_urls(&self) -> Result<Vec<String>> {
        let urls = if !self.urls.is_empty() {
            self.urls.clone()
        } else {
            let answer = prompt::read_line(
                "Enter one or more image URLs (comma-separated)\n\
                 Or enter a filename (e.g., urls.txt) with URLs listed line by line:\n> ",
            )?;

            if std::path::Path::new(&answer).is_file() {
                tracing::info!("ℹ Reading URLs from {}...", answer);
                std::fs::read_to_string(&answer)?
                    .lines()
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty())
                    .collect()
            } else {
                answer
                    .split(',')
                    .map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty())
                    .collect()
            }
        };

        for url in &urls {
            validate_url("url", url)?;
        }
        validation::validate_non_empty_string("output_dir", &self.output_dir)?;
        Ok(urls)
    }
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    #[arg(long, default_value = "iris.csv")]
    pub csv: String,

    #[arg(long, default_value = "charts")]
    pub output_dir: String,

    /// Skip chart rendering, print statistics only
    #[arg(long)]
    pub no_charts: bool,
}

impl Validate for AnalyzeArgs {
    fn validate(&self) -> Result<()> {
        validate_path("csv", &self.csv)?;
        validate_path("output_dir", &self.output_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_discount_args_resolve_without_prompts() {
        let args = DiscountArgs {
            price: Some(100.0),
            percent: Some(25.0),
        };
        assert_eq!(args.resolve().unwrap(), (100.0, 25.0));
    }

    #[test]
    fn test_discount_args_reject_out_of_range_percent() {
        let args = DiscountArgs {
            price: Some(100.0),
            percent: Some(150.0),
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_fetch_args_reject_bad_url() {
        let args = FetchArgs {
            urls: vec!["not a url".to_string()],
            output_dir: "fetched_images".to_string(),
            timeout_seconds: 10,
        };
        assert!(args.resolve_urls().is_err());
    }

    #[test]
    fn test_transform_args_validate() {
        let args = TransformArgs {
            input: "input.txt".to_string(),
            output: "output.txt".to_string(),
        };
        assert!(args.validate().is_ok());

        let bad = TransformArgs {
            input: String::new(),
            output: "output.txt".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
