use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::items::ItemForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_service_error, render_template};
use crate::services::items::{
    DeleteItemOutcome, ItemFormPage, SaveItemOutcome, create_item as create_item_service,
    delete_item as delete_item_service, show_create_item as show_create_item_service,
    show_delete_item as show_delete_item_service, show_item as show_item_service,
    show_items as show_items_service, show_update_item as show_update_item_service,
    update_item as update_item_service,
};

const NOT_FOUND: &str = "Item not found";

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    title: &str,
    page: &ItemFormPage,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "items");
    context.insert("title", title);
    context.insert("form", &page.form);
    context.insert("categories", &page.categories);
    context.insert("errors", &page.violations);
    render_template(tera, "items/form.html", &context)
}

#[get("/items")]
pub async fn show_items(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_items_service(repo.get_ref()) {
        Ok(items) => {
            let mut context = base_context(&flash_messages, "items");
            context.insert("title", "Item List");
            context.insert("items", &items);
            render_template(&tera, "items/index.html", &context)
        }
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/item/create")]
pub async fn show_create_item(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_create_item_service(repo.get_ref()) {
        Ok(page) => render_form(&tera, &flash_messages, "Create Item", &page),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[post("/item/create")]
pub async fn create_item(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ItemForm>,
) -> impl Responder {
    match create_item_service(form, repo.get_ref()) {
        Ok(SaveItemOutcome::Saved(item)) => {
            FlashMessage::success(format!("Item \"{}\" created.", item.name)).send();
            redirect(&item.url())
        }
        Ok(SaveItemOutcome::Rejected(page)) => {
            render_form(&tera, &flash_messages, "Create Item", &page)
        }
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/item/{item_id}")]
pub async fn show_item(
    item_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_item_service(item_id.into_inner(), repo.get_ref()) {
        Ok(item) => {
            let mut context = base_context(&flash_messages, "items");
            context.insert("title", &item.name);
            context.insert("item", &item);
            render_template(&tera, "items/detail.html", &context)
        }
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/item/{item_id}/update")]
pub async fn show_update_item(
    item_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_update_item_service(item_id.into_inner(), repo.get_ref()) {
        Ok(page) => render_form(&tera, &flash_messages, "Update Item", &page),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[post("/item/{item_id}/update")]
pub async fn update_item(
    item_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ItemForm>,
) -> impl Responder {
    match update_item_service(item_id.into_inner(), form, repo.get_ref()) {
        Ok(SaveItemOutcome::Saved(item)) => {
            FlashMessage::success(format!("Item \"{}\" updated.", item.name)).send();
            redirect(&item.url())
        }
        Ok(SaveItemOutcome::Rejected(page)) => {
            render_form(&tera, &flash_messages, "Update Item", &page)
        }
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/item/{item_id}/delete")]
pub async fn show_delete_item(
    item_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_delete_item_service(item_id.into_inner(), repo.get_ref()) {
        Ok(Some(item)) => {
            let mut context = base_context(&flash_messages, "items");
            context.insert("title", "Delete Item");
            context.insert("item", &item);
            render_template(&tera, "items/delete.html", &context)
        }
        Ok(None) => redirect("/catalog/items"),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[post("/item/{item_id}/delete")]
pub async fn delete_item(
    item_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match delete_item_service(item_id.into_inner(), repo.get_ref()) {
        Ok(DeleteItemOutcome::Deleted) => {
            FlashMessage::success("Item deleted.").send();
            redirect("/catalog/items")
        }
        Ok(DeleteItemOutcome::Missing) => redirect("/catalog/items"),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}
