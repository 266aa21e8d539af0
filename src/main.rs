use clap::Parser;
use title_insights::core::ConfigProvider;
use title_insights::utils::error::ErrorSeverity;
use title_insights::utils::{logger, validation::Validate};
use title_insights::{
    AnalysisConfig, AnalysisEngine, CliConfig, EdaError, LocalStorage, SvgChartRenderer,
    TitleAnalysisPipeline,
};

fn report_failure(stage: &str, e: &EdaError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &AnalysisConfig) {
    let settings = config.settings();
    println!("📋 Configuration Summary:");
    println!("  Archive: {}", config.archive_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    if let Some(filename) = config.compression_filename() {
        println!("  Compression: {} (ZIP)", filename);
    }
    println!(
        "  Histogram cutoffs: {} / {} / {} / {} / {}",
        settings.countries_per_title,
        settings.categories_per_title,
        settings.categories,
        settings.category_combinations,
        settings.country_combinations
    );
    println!(
        "  Heatmap: top {} countries, color range p{}-p{}",
        settings.top_countries, settings.lower_percentile, settings.upper_percentile
    );
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting title-insights CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => report_failure("Loading configuration", &e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        report_failure("Configuration validation", &e);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        println!(
            "🔍 Would analyse {} and write {} to {}",
            config.archive_path(),
            config.output_formats().join(", "),
            config.output_path()
        );
        return Ok(());
    }

    let monitor_enabled = cli.monitor_enabled(&config);
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = TitleAnalysisPipeline::new(storage, config, SvgChartRenderer::new());
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Analysis completed successfully!");
            println!("✅ Analysis completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => report_failure("Analysis", &e),
    }

    Ok(())
}
