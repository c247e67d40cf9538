mod create_goal;
mod delete_goal;
mod subscribers;
mod update_goal;

use actix_web::web;
use create_goal::create_goal_controller;
use delete_goal::delete_goal_controller;
use update_goal::update_goal_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/goals", web::post().to(create_goal_controller));
    cfg.route("/goals/{goal_id}", web::put().to(update_goal_controller));
    cfg.route("/goals/{goal_id}", web::delete().to(delete_goal_controller));
}
