use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::categories::{
    add_category as add_category_service, delete_category as delete_category_service,
    like_category as like_category_service, show_category as show_category_service,
};
use crate::services::{ServiceError, require_user};

#[get("/category/{slug}")]
pub async fn show_category(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_category_service(&slug, repo.get_ref()) {
        Ok(detail) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "category");
            context.insert("category", &detail.category);
            context.insert("pages", &detail.pages);
            render_template(&tera, "rango/category.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render category page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/category/{slug}/like")]
pub async fn like_category(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match like_category_service(&slug, user.as_ref(), repo.get_ref()) {
        Ok(category) => {
            FlashMessage::success(format!("You liked {}.", category.name)).send();
            redirect(&format!("/category/{}", category.slug))
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to like category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/category/{slug}/delete")]
pub async fn delete_category(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_category_service(&slug, user.as_ref(), repo.get_ref()) {
        Ok(()) => FlashMessage::success("Category deleted.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/login"),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(err) => {
            log::error!("Failed to delete category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}

#[get("/add_category")]
pub async fn add_category_form(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match require_user(user.as_ref()) {
        Ok(user) => {
            let context = base_context(&flash_messages, Some(user), "add_category");
            render_template(&tera, "rango/add_category.html", &context)
        }
        Err(_) => redirect("/login"),
    }
}

#[post("/add_category")]
pub async fn add_category(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    if user.is_none() {
        return redirect("/login");
    }

    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected category form: {e}");
            FlashMessage::error(e.to_string()).send();
            return redirect("/add_category");
        }
    };

    match add_category_service(payload, user.as_ref(), repo.get_ref()) {
        Ok(category) => {
            FlashMessage::success(format!("Category '{}' added.", category.name)).send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::Conflict(message) | ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/add_category")
        }
        Err(err) => {
            log::error!("Failed to add category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
