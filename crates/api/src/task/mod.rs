mod create_task;
mod delete_task;
mod subscribers;
mod update_task;

use actix_web::web;
use create_task::create_task_controller;
use delete_task::delete_task_controller;
use update_task::update_task_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tasks", web::post().to(create_task_controller));
    cfg.route("/tasks/{task_id}", web::put().to(update_task_controller));
    cfg.route("/tasks/{task_id}", web::delete().to(delete_task_controller));
}
