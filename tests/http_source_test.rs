use anyhow::Result;
use car_price_predictor::{
    DataSource, HttpSource, ListingSource, PredictorConfig, PredictorEngine, PredictorError, Query,
};
use httpmock::prelude::*;

const LISTINGS: &str = "Brand,Model,Year,Mileage,Engine_Size,Price\n\
                        Toyota,Avanza,2020,10000,1.5,150000000\n\
                        Honda,Jazz,2015,20000,2.0,120000000\n\
                        Ford,Fiesta,2013,60000,1.6,80000000\n";

#[tokio::test]
async fn test_engine_trains_from_http_source() -> Result<()> {
    let server = MockServer::start();
    let csv_mock = server.mock(|when, then| {
        when.method(GET).path("/daftar_mobil.csv");
        then.status(200)
            .header("Content-Type", "text/csv")
            .body(LISTINGS);
    });

    let source = HttpSource::new(server.url("/daftar_mobil.csv"))?;
    let mut engine = PredictorEngine::new(source);
    let summary = engine.load().await?.summary();

    csv_mock.assert();
    assert_eq!(summary.rows_used, 3);
    assert_eq!(summary.brands, vec!["Ford", "Honda", "Toyota", "Other"]);

    let query = Query::new(30_000, 2018, "Honda", 1.8)?;
    engine.predict(&query).await?;
    // cached model: no second request
    csv_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_http_404_is_missing_file() {
    let server = MockServer::start();
    let missing = server.mock(|when, then| {
        when.method(GET).path("/missing.csv");
        then.status(404);
    });

    let source = HttpSource::new(server.url("/missing.csv")).unwrap();
    let err = source.read().await.unwrap_err();

    missing.assert();
    assert!(matches!(err, PredictorError::DataFileNotFound { .. }));
}

#[tokio::test]
async fn test_http_server_error_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/broken.csv");
        then.status(500);
    });

    let source = HttpSource::new(server.url("/broken.csv")).unwrap();
    let err = source.read().await.unwrap_err();
    assert!(matches!(err, PredictorError::ApiError(_)));
}

#[tokio::test]
async fn test_config_location_selects_remote_source() -> Result<()> {
    let server = MockServer::start();
    let csv_mock = server.mock(|when, then| {
        when.method(GET).path("/cars.csv");
        then.status(200).body(LISTINGS);
    });

    let toml_content = format!("[data]\nlocation = \"{}\"\ntimeout_seconds = 5\n", server.url("/cars.csv"));
    let config = PredictorConfig::from_toml_str(&toml_content)?;
    let source = DataSource::from_config(&config.data)?;
    assert!(matches!(source, DataSource::Remote(_)));

    let mut engine = PredictorEngine::new(source).with_refit_per_query(true);
    let query = Query::new(30_000, 2018, "Other", 1.8)?;
    engine.predict(&query).await?;
    engine.predict(&query).await?;

    csv_mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_configured_timeout_is_applied() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow.csv");
        then.status(200)
            .delay(std::time::Duration::from_secs(3))
            .body(LISTINGS);
    });

    let source = HttpSource::with_timeout(
        server.url("/slow.csv"),
        std::time::Duration::from_millis(200),
    )?;
    match source.read().await {
        Err(PredictorError::ApiError(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other.map(|b| b.len())),
    }
    Ok(())
}
