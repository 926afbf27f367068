use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::main::{BOLD_MESSAGE, show_index as show_index_service};
use crate::services::visits::visitor_cookie_handler;
use crate::services::{ServiceError, require_user};

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let visits = match visitor_cookie_handler(&session, Utc::now().naive_utc()) {
        Ok(state) => state.visits,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    match show_index_service(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "index");
            context.insert("boldmessage", BOLD_MESSAGE);
            context.insert("categories", &data.categories);
            context.insert("pages", &data.pages);
            context.insert("visits", &visits);
            render_template(&tera, "rango/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render index page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/about")]
pub async fn about(
    user: Option<AuthenticatedUser>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let visits = match visitor_cookie_handler(&session, Utc::now().naive_utc()) {
        Ok(state) => state.visits,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let mut context = base_context(&flash_messages, user.as_ref(), "about");
    context.insert("author", &server_config.author);
    context.insert("visits", &visits);
    render_template(&tera, "rango/about.html", &context)
}

#[get("/restricted")]
pub async fn restricted(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match require_user(user.as_ref()) {
        Ok(user) => {
            let context = base_context(&flash_messages, Some(user), "restricted");
            render_template(&tera, "rango/restricted.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/login"),
        Err(err) => {
            log::error!("Failed to render restricted page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
