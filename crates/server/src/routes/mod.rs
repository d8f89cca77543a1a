mod search;
mod system;

use actix_web::web;

/// Register every route. `/search/stats` must precede `/search/{metric}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search::search_stats)
        .service(search::search)
        .service(system::health)
        .service(system::reload)
        .service(system::save);
}
