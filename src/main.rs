use clap::Parser;
use small_labs::config::{Cli, Command};
use small_labs::core::analysis::AnalyzeLab;
use small_labs::core::discount::DiscountLab;
use small_labs::core::fetcher::{FetchLab, ImageFetcher};
use small_labs::core::file_transform::FileTransformLab;
use small_labs::core::file_viewer::FileViewerLab;
use small_labs::core::phones::PhonesLab;
use small_labs::core::vehicles::VehiclesLab;
use small_labs::utils::{logger, validation::Validate};
use small_labs::{LabRunner, LocalStorage};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting small-labs CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli.command);
    }

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match dispatch(&cli).await {
        Ok(summary) => {
            tracing::info!("✅ Lab completed successfully!");
            println!("✅ {}", summary);
        }
        Err(e) => {
            tracing::error!(
                "❌ Lab failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                small_labs::utils::error::ErrorSeverity::Low => 0,
                small_labs::utils::error::ErrorSeverity::Medium => 2,
                small_labs::utils::error::ErrorSeverity::High => 1,
                small_labs::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn dispatch(cli: &Cli) -> small_labs::Result<String> {
    let monitor = cli.monitor;

    match &cli.command {
        Command::Discount(args) => {
            let (price, percent) = args.resolve()?;
            LabRunner::new_with_monitoring(DiscountLab::new(price, percent), monitor)
                .run()
                .await
        }
        Command::Open(args) => {
            let path = args.resolve()?;
            LabRunner::new_with_monitoring(FileViewerLab::new(path), monitor)
                .run()
                .await
        }
        Command::Transform(args) => {
            args.validate()?;
            let storage = LocalStorage::new(".".to_string());
            let lab = FileTransformLab::new(storage, args.input.clone(), args.output.clone());
            LabRunner::new_with_monitoring(lab, monitor).run().await
        }
        Command::Vehicles => {
            LabRunner::new_with_monitoring(VehiclesLab, monitor)
                .run()
                .await
        }
        Command::Phones => {
            LabRunner::new_with_monitoring(PhonesLab, monitor)
                .run()
                .await
        }
        Command::Fetch(args) => {
            println!("Image Fetcher");
            println!("Mindfully collecting images from the web\n");

            let urls = args.resolve_urls()?;
            std::fs::create_dir_all(&args.output_dir)?;

            let storage = LocalStorage::new(args.output_dir.clone());
            let fetcher =
                ImageFetcher::new(storage, Duration::from_secs(args.timeout_seconds))?;
            let lab = FetchLab::new(fetcher, urls, args.output_dir.clone());
            LabRunner::new_with_monitoring(lab, monitor).run().await
        }
        Command::Analyze(args) => {
            args.validate()?;
            let lab = AnalyzeLab::new(
                args.csv.clone(),
                args.output_dir.clone(),
                !args.no_charts,
            );
            LabRunner::new_with_monitoring(lab, monitor).run().await
        }
    }
}
