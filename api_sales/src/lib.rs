use actix_web::web;

pub mod routes {
    pub mod bill;
    pub mod report;
}

mod services {
    pub(crate) mod bill;
    pub(crate) mod checkout;
}

mod dtos {
    pub(crate) mod bill;
    pub(crate) mod report;
}

pub use routes::bill::delete_sales_data;

pub fn mount_bills() -> actix_web::Scope {
    web::scope("/bills")
        .service(routes::bill::get_bills)
        .service(routes::bill::post_checkout)
}

pub fn mount_reports() -> actix_web::Scope {
    web::scope("/reports").service(routes::report::get_profit_report)
}
