use actix_web::web;

pub mod routes {
    pub mod product;
}

mod services {
    pub(crate) mod product;
}

mod dtos {
    pub(crate) mod product;
}

pub fn mount_products() -> actix_web::Scope {
    web::scope("/products")
        .service(routes::product::get_products)
        .service(routes::product::post_product)
        .service(routes::product::delete_product)
}
