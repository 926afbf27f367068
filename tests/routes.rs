use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use rango::models::config::ServerConfig;
use rango::repository::DieselRepository;
use rango::routes::configure;
use tera::Tera;

mod common;

const SESSION_COOKIE: &str = "id";

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 8000,
        database_url: ":memory:".to_string(),
        secret: String::new(),
        templates_dir: "templates/**/*".to_string(),
        secure_cookies: false,
        author: "Test Author".to_string(),
    }
}

macro_rules! init_app {
    ($test_db:expr) => {{
        let key = Key::generate();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        let tera = Tera::new("templates/**/*").expect("templates should load");
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(server_config()))
                .configure(configure),
        )
        .await
    }};
}

fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

fn location(resp: &ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(resp: ServiceResponse) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).expect("body should be utf-8")
}

macro_rules! register {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("username", $username),
                ("email", "leif@example.com"),
                ("password", "correct horse"),
                ("password_confirm", "correct horse"),
            ])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");
        session_cookie(&resp).expect("registration should start a session")
    }};
}

#[actix_web::test]
async fn index_renders_and_counts_visits() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("visit state should be stored");
    let body = body_text(resp).await;
    assert!(body.contains("Crunchy, creamy, cookie, candy, cupcake!"));
    assert!(body.contains("There are no categories present."));
    assert!(body.contains("Visits: 1"));

    let req = test::TestRequest::get().uri("/about").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Test Author"));
    assert!(body.contains("Visits: 1"));
}

#[actix_web::test]
async fn anonymous_users_are_sent_to_login() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    for uri in ["/add_category", "/restricted"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/login", "{uri}");
    }

    let req = test::TestRequest::post()
        .uri("/add_category")
        .set_form([("name", "Python")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn unknown_category_renders_not_found_message() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/category/no-such-thing")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        body_text(resp)
            .await
            .contains("The specified category does not exist.")
    );
}

#[actix_web::test]
async fn registered_user_can_add_and_view_category() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let cookie = register!(app, "leif");

    let req = test::TestRequest::get()
        .uri("/restricted")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/add_category")
        .cookie(cookie.clone())
        .set_form([("name", "Other Frameworks")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let req = test::TestRequest::get()
        .uri("/category/other-frameworks")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Other Frameworks"));
    assert!(body.contains("No pages currently in category."));
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    register!(app, "leif");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", "leif"), ("password", "wrong password")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn goto_unknown_page_redirects_home() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/goto/42").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}
