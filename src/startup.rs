use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use crate::{
    routes::{default_route, scrape_route},
    services::BrowserPool,
};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    browser_pool: BrowserPool,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let browser_pool = web::Data::new(browser_pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::health_check)
            .service(
                web::scope("/api/scrape")
                    .service(scrape_route::preview)
                    .service(scrape_route::batch)
                    .service(scrape_route::search)
                    .service(scrape_route::export)
                    .service(scrape_route::filter),
            )
            .app_data(db_pool.clone())
            .app_data(browser_pool.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
