use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{LoginForm, LoginFormPayload, RegisterForm, RegisterFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::{login as login_service, register as register_service};
use crate::session::{end_session, start_session};

#[get("/register")]
pub async fn register_form(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "register");
    render_template(&tera, "rango/register.html", &context)
}

#[post("/register")]
pub async fn register(
    request: HttpRequest,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let payload: RegisterFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected registration form: {e}");
            FlashMessage::error(e.to_string()).send();
            return redirect("/register");
        }
    };

    let user = match register_service(payload, repo.get_ref()) {
        Ok(user) => user,
        Err(ServiceError::Conflict(message) | ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/register");
        }
        Err(err) => {
            log::error!("Failed to register user: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = start_session(&request, &session, &user) {
        log::error!("Failed to start session for {}: {e}", user.username);
        return HttpResponse::InternalServerError().finish();
    }

    FlashMessage::success("Thank you for registering!").send();
    redirect("/")
}

#[get("/login")]
pub async fn login_form(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "login");
    render_template(&tera, "rango/login.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected login form: {e}");
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    let user = match login_service(payload, repo.get_ref()) {
        Ok(user) => user,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/login");
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = start_session(&request, &session, &user) {
        log::error!("Failed to start session for {}: {e}", user.username);
        return HttpResponse::InternalServerError().finish();
    }

    redirect("/")
}

#[post("/logout")]
pub async fn logout(identity: Option<Identity>, session: Session) -> impl Responder {
    match identity {
        Some(identity) => end_session(identity, &session),
        None => return redirect("/login"),
    }

    redirect("/")
}
