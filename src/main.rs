use eyre::Result;
use library_catalog::{app, config::AppConfig, db};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let config = AppConfig::load()?;
    let pool = db::connect(&config.database_url).await?;

    let app = app(pool, &config);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
