use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::services::ServiceError;

pub mod categories;
pub mod items;
pub mod main;

/// Register every catalog route on `cfg`.
///
/// Literal segments such as `/category/create` are registered before the
/// `{id}` patterns they would otherwise be captured by.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::root).service(
        web::scope("/catalog")
            .service(main::index)
            .service(categories::show_categories)
            .service(categories::show_create_category)
            .service(categories::create_category)
            .service(categories::show_category)
            .service(categories::show_update_category)
            .service(categories::update_category)
            .service(categories::show_delete_category)
            .service(categories::delete_category)
            .service(items::show_items)
            .service(items::show_create_item)
            .service(items::create_item)
            .service(items::show_item)
            .service(items::show_update_item)
            .service(items::update_item)
            .service(items::show_delete_item)
            .service(items::delete_item),
    );
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, StatusCode::OK, template, context)
}

fn render_with_status(
    tera: &Tera,
    status: StatusCode,
    template: &str,
    context: &Context,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// `303 See Other` to `location`, so that a POST is followed by a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Generic error page for a failed service call.
pub fn render_service_error(tera: &Tera, err: ServiceError, not_found_message: &str) -> HttpResponse {
    let (status, message) = match err {
        ServiceError::NotFound => (StatusCode::NOT_FOUND, not_found_message),
        ServiceError::Internal => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong while processing the request.",
        ),
    };

    let mut context = Context::new();
    context.insert("alerts", &Vec::<(String, String)>::new());
    context.insert("current_page", "error");
    context.insert("title", "Error");
    context.insert("status", &status.as_u16());
    context.insert("message", message);
    render_with_status(tera, status, "error.html", &context)
}
