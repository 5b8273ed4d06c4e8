use car_price_predictor::core::form::QueryForm;
use car_price_predictor::utils::{logger, validation::Validate};
use car_price_predictor::{
    DataSource, ListingSource, OutputFormat, PredictorConfig, PredictorEngine, PredictorError,
    PriceReport, Predictor, QueryArgs, Session,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "car-price-ml")]
#[command(about = "Estimate a used car's price (IDR) with a linear regression trained on listings")]
#[command(
    long_about = "Trains a linear regression (one-hot encoded brand) on a CSV of listings, then \
                  estimates prices.\n\nThe CSV needs the columns Brand, Year, Mileage, \
                  Engine_Size and Price; a Model column is allowed and ignored."
)]
struct Args {
    #[command(flatten)]
    query: QueryArgs,

    /// Path or http(s) URL of the listings CSV; overrides [data] location
    #[arg(short, long)]
    data: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Re-read the data and re-fit the model before every estimate
    #[arg(long)]
    refit_per_query: bool,

    /// Print the fitted model as JSON and exit
    #[arg(long)]
    show_model: bool,

    /// Output format; overrides [output] format from the config file
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Start an interactive form instead of a single estimate
    #[arg(short, long)]
    interactive: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

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

fn resolve_config(args: &Args) -> Result<PredictorConfig, PredictorError> {
    let mut config = PredictorConfig::load_optional(args.config.as_deref())?;

    // 應用命令列覆蓋設定
    if let Some(data) = &args.data {
        config.data.location = data.clone();
    }
    if args.refit_per_query {
        config.model.refit_per_query = true;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting car-price-ml (linear regression)");

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let source = match DataSource::from_config(&config.data) {
        Ok(source) => source,
        Err(e) => exit_with(&e),
    };
    let source_name = source.describe();
    let mut engine =
        PredictorEngine::new(source).with_refit_per_query(config.model.refit_per_query);

    // 載入資料並訓練模型；任何失敗都會終止程式
    let summary = match engine.load().await {
        Ok(model) => model.summary(),
        Err(e) => exit_with(&e),
    };
    tracing::info!(
        "✅ Model trained on {} rows from '{}' ({} dropped)",
        summary.rows_used,
        source_name,
        summary.rows_dropped
    );

    if args.show_model {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let catalog = engine.brand_catalog();
    let query = match args.query.to_query(&catalog) {
        Ok(query) => query,
        Err(e) => exit_with(&e),
    };

    if args.interactive {
        let form = match QueryForm::from_query(catalog, &query) {
            Ok(form) => form,
            Err(e) => exit_with(&e),
        };
        println!("🚗 Simple Car Price Predictor (linear regression)");
        println!("Model trained on data from '{}'.", source_name);
        println!("---");

        let mut session = Session::new(engine, form, config.output.currency.as_str());
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        match session.run(stdin, tokio::io::stdout()).await {
            Ok(count) => tracing::info!("Session finished after {} estimates", count),
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    let price = match engine.predict(&query).await {
        Ok(price) => price,
        Err(e) => exit_with(&e),
    };
    let report = PriceReport::new(
        price,
        &config.output.currency,
        engine.label(),
        query,
        engine.note(),
    );

    match config.output.format {
        OutputFormat::Text => println!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
