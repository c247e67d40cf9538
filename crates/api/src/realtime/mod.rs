mod realtime_connect;
mod relay_event;

use actix_web::web;
use realtime_connect::realtime_connect_controller;
use relay_event::relay_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/realtime", web::get().to(realtime_connect_controller));
    cfg.route("/relay/events", web::post().to(relay_event_controller));
}
