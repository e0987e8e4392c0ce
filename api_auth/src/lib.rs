use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod routes {
    pub mod auth;
    pub mod store;
}

pub mod middleware {
    pub mod auth;
}

mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
}

mod dtos {
    pub(crate) mod auth;
}

pub use routes::auth::post_login;

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_initiate_register)
        .service(routes::auth::post_verify_register)
}

pub fn mount_store() -> actix_web::Scope {
    web::scope("/store-config")
        .service(routes::store::get_store_config)
        .service(routes::store::put_store_config)
}

/// Gate for the secured scope: resolves the claims decoded by the
/// extractor, rejecting with 401 (no token) or 403 (bad token).
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
