use std::{net::TcpListener, time::Duration};

use env_logger::Env;
use prospect::{configuration::get_configuration, services::BrowserPool, startup::run};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let pool_options = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(15 * 60)) // 15 minutes
        .max_lifetime(None);

    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let browser_pool = BrowserPool::new(
        &configuration.scraper.webdriver_url,
        configuration.scraper.browser_pool_size,
    )
    .await
    .expect("Failed to connect to the webdriver.");

    run(listener, connection_pool, browser_pool)?.await
}
