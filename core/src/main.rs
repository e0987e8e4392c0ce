mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // init OTP mail channel (logs codes when SMTP is unconfigured)
    let mail_channel = mailer::Mailer::from_config(&config.smtp).expect("Failed to set up mailer");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(mail_channel.clone()))
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_auth())
                    .service(api_auth::post_login)
                    .service(
                        web::scope("")
                            .wrap(api_auth::auth_middleware())
                            .service(api_auth::mount_store())
                            .service(api_catalog::mount_products())
                            .service(api_sales::mount_bills())
                            .service(api_sales::mount_reports())
                            .service(api_sales::delete_sales_data),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
