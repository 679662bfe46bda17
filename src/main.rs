use clap::Parser;
use csv2json::adapters::json::render_json;
use csv2json::core::ConfigProvider;
use csv2json::utils::error::{ConvertError, ErrorSeverity};
use csv2json::utils::{logger, validation::Validate};
use csv2json::{CliConfig, CsvJsonPipeline, EtlEngine, LocalStorage};
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI options: {:?}", cli);

    let config = match cli.to_convert_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let pretty = config.pretty();
    let indent = config.indent().to_string();
    let to_stdout = config.output_path().is_none();

    let pipeline = match CsvJsonPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(&e),
    };
    tracing::info!("Converting {}", pipeline.source());

    let engine = EtlEngine::new(pipeline);
    let outcome = match engine.run().await {
        Ok(outcome) => outcome,
        Err(e) => exit_with(&e),
    };

    if to_stdout {
        let json = render_json(&outcome.records, pretty, &indent)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&json)?;
        stdout.write_all(b"\n")?;
    } else if let Some(path) = &outcome.output_path {
        eprintln!("✅ Wrote {} records to {}", outcome.records.len(), path);
    }

    Ok(())
}

fn exit_with(e: &ConvertError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
