use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_service_error, render_template};
use crate::services::main::show_index as show_index_service;

#[get("/")]
pub async fn root() -> impl Responder {
    redirect("/catalog")
}

#[get("")]
pub async fn index(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_index_service(repo.get_ref()) {
        Ok(summary) => {
            let mut context = base_context(&flash_messages, "index");
            context.insert("title", "Inventory Home");
            context.insert("summary", &summary);
            render_template(&tera, "catalog/index.html", &context)
        }
        Err(err) => render_service_error(&tera, err, "Page not found"),
    }
}
