use anyhow::Context;
use issues_api::{config::read_config, factory, router, telemetry, MIGRATOR};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = read_config().context("failed to read configuration")?;

    let connect_options = config
        .database
        .connect_options()
        .context("invalid database connection string")?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect_with(connect_options)
        .await
        .context("failed to connect to database")?;
    tracing::info!(database = %config.database.database_name, "connected to database");

    if config.database.run_migrations {
        MIGRATOR
            .run(&pool)
            .await
            .context("failed to run database migrations")?;
    }

    let app = router::create(factory::postgres_app_state(pool));

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
