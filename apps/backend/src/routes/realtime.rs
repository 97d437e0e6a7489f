use actix_web::web;

use crate::ws::session::upgrade;

/// `GET /api/ws` upgrades to the realtime connection. The access token comes
/// from the `Authorization` header or the `token` query parameter.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(upgrade));
}
