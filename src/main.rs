use car_price_predictor::core::form::QueryForm;
use car_price_predictor::utils::{logger, validation::Validate};
use car_price_predictor::{
    BrandCatalog, CliConfig, FormulaEstimator, OutputFormat, PredictorError, PriceReport, Predictor,
    Session,
};
use clap::Parser;

fn exit_with(e: &PredictorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚗 Starting car-price (fixed formula)");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let mut estimator = FormulaEstimator::new(config.formula.clone());
    let catalog = BrandCatalog::fixed();

    let query = match cli.query.to_query(&catalog) {
        Ok(query) => query,
        Err(e) => exit_with(&e),
    };

    if cli.interactive {
        let form = match QueryForm::from_query(catalog, &query) {
            Ok(form) => form,
            Err(e) => exit_with(&e),
        };
        println!("🚗 Simple Car Price Predictor");
        println!("Enter the car details to get a price estimate (IDR).");
        println!("---");

        let mut session = Session::new(estimator, form, config.output.currency.as_str());
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        match session.run(stdin, tokio::io::stdout()).await {
            Ok(count) => tracing::info!("Session finished after {} estimates", count),
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    let price = estimator.predict(&query).await?;
    let report = PriceReport::new(
        price,
        &config.output.currency,
        estimator.label(),
        query,
        estimator.note(),
    );

    match config.output.format {
        OutputFormat::Text => println!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
