use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::pages::{AddPageForm, AddPageFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::pages::{
    add_page as add_page_service, goto_page as goto_page_service,
    show_add_page as show_add_page_service,
};

#[get("/category/{slug}/add_page")]
pub async fn add_page_form(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_add_page_service(&slug, user.as_ref(), repo.get_ref()) {
        Ok(category) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "add_page");
            context.insert("category", &category);
            render_template(&tera, "rango/add_page.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::NotFound) => redirect("/"),
        Err(err) => {
            log::error!("Failed to render add page form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/category/{slug}/add_page")]
pub async fn add_page(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddPageForm>,
) -> impl Responder {
    let slug = slug.into_inner();
    if user.is_none() {
        return redirect("/login");
    }

    let payload: AddPageFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected page form: {e}");
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("/category/{slug}/add_page"));
        }
    };

    match add_page_service(&slug, payload, user.as_ref(), repo.get_ref()) {
        Ok(page) => {
            FlashMessage::success(format!("Page '{}' added.", page.title)).send();
            redirect(&format!("/category/{slug}"))
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(ServiceError::NotFound) => redirect("/"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/category/{slug}/add_page"))
        }
        Err(err) => {
            log::error!("Failed to add page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/goto/{page_id}")]
pub async fn goto_page(
    page_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match goto_page_service(page_id.into_inner(), repo.get_ref()) {
        Ok(url) => redirect(url.as_str()),
        Err(ServiceError::NotFound) => redirect("/"),
        Err(err) => {
            log::error!("Failed to follow page link: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
