use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::category::category_url;
use crate::forms::categories::CategoryForm;
use crate::forms::validation::Violation;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_service_error, render_template};
use crate::services::categories::{
    CreateCategoryOutcome, DeleteCategoryOutcome, UpdateCategoryOutcome,
    create_category as create_category_service, delete_category as delete_category_service,
    show_categories as show_categories_service, show_category as show_category_service,
    show_delete_category as show_delete_category_service,
    show_update_category as show_update_category_service,
    update_category as update_category_service,
};

const NOT_FOUND: &str = "Category not found";

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    title: &str,
    form: &CategoryForm,
    violations: &[Violation],
) -> actix_web::HttpResponse {
    let mut context = base_context(flash_messages, "categories");
    context.insert("title", title);
    context.insert("form", form);
    context.insert("errors", violations);
    render_template(tera, "categories/form.html", &context)
}

#[get("/categories")]
pub async fn show_categories(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("title", "Category List");
            context.insert("categories", &categories);
            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/category/create")]
pub async fn show_create_category(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_form(
        &tera,
        &flash_messages,
        "Create Category",
        &CategoryForm::default(),
        &[],
    )
}

#[post("/category/create")]
pub async fn create_category(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    match create_category_service(form, repo.get_ref()) {
        Ok(CreateCategoryOutcome::Created(category)) => {
            FlashMessage::success(format!("Category \"{}\" created.", category.name)).send();
            redirect(&category.url())
        }
        Ok(CreateCategoryOutcome::Existing(category)) => {
            FlashMessage::info(format!("Category \"{}\" already exists.", category.name)).send();
            redirect(&category.url())
        }
        Ok(CreateCategoryOutcome::Rejected(rejected)) => render_form(
            &tera,
            &flash_messages,
            "Create Category",
            &rejected.form,
            &rejected.violations,
        ),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/category/{category_id}")]
pub async fn show_category(
    category_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_category_service(category_id.into_inner(), repo.get_ref()) {
        Ok(detail) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("title", &detail.category.name);
            context.insert("category", &detail.category);
            context.insert("items", &detail.items);
            render_template(&tera, "categories/detail.html", &context)
        }
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/category/{category_id}/update")]
pub async fn show_update_category(
    category_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_update_category_service(category_id.into_inner(), repo.get_ref()) {
        Ok(form) => render_form(&tera, &flash_messages, "Update Category", &form, &[]),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[post("/category/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    match update_category_service(category_id.into_inner(), form, repo.get_ref()) {
        Ok(UpdateCategoryOutcome::Updated(id)) => {
            FlashMessage::success("Category updated.").send();
            redirect(&category_url(id))
        }
        Ok(UpdateCategoryOutcome::Rejected(rejected)) => render_form(
            &tera,
            &flash_messages,
            "Update Category",
            &rejected.form,
            &rejected.violations,
        ),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[get("/category/{category_id}/delete")]
pub async fn show_delete_category(
    category_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_delete_category_service(category_id.into_inner(), repo.get_ref()) {
        Ok(Some(detail)) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("title", "Delete Category");
            context.insert("category", &detail.category);
            context.insert("items", &detail.items);
            render_template(&tera, "categories/delete.html", &context)
        }
        Ok(None) => redirect("/catalog/categories"),
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}

#[post("/category/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match delete_category_service(category_id.into_inner(), repo.get_ref()) {
        Ok(DeleteCategoryOutcome::Deleted) => {
            FlashMessage::success("Category deleted.").send();
            redirect("/catalog/categories")
        }
        Ok(DeleteCategoryOutcome::Missing) => redirect("/catalog/categories"),
        Ok(DeleteCategoryOutcome::Blocked(detail)) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("title", "Delete Category");
            context.insert("category", &detail.category);
            context.insert("items", &detail.items);
            render_template(&tera, "categories/delete.html", &context)
        }
        Err(err) => render_service_error(&tera, err, NOT_FOUND),
    }
}
