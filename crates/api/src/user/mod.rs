mod create_user;
mod get_me;
mod set_push_token;

use actix_web::web;
use create_user::create_user_controller;
use get_me::get_me_controller;
use set_push_token::set_push_token_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user", web::post().to(create_user_controller));
    cfg.route("/me", web::get().to(get_me_controller));
    cfg.route("/me/push-token", web::put().to(set_push_token_controller));
}
