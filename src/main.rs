use cdf_normalizer::utils::logger;
use cdf_normalizer::{CdfPipeline, CliConfig, EtlEngine, LocalStorage, NormalizeError};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cdf-normalize");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Normalization failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), NormalizeError> {
    let config = cli.resolve()?;
    tracing::info!(
        input = %config.input_path,
        output = %config.output_path,
        const_name = %config.const_name,
        "Configuration loaded"
    );

    let storage = LocalStorage::new(&cli.base_dir);
    let output_location = storage.resolve(&config.output_path);
    let pipeline = CdfPipeline::new(storage, config)?;
    let engine = EtlEngine::new(pipeline);

    if cli.dry_run {
        let summary = engine.dry_run().await?;
        println!("{}", summary);
        return Ok(());
    }

    engine.run().await?;
    println!("✅ Normalization completed");
    println!("📁 Output saved to: {}", output_location.display());
    Ok(())
}
