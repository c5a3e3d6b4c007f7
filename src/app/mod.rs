use actix_cors::Cors;
use actix_web::{middleware, web, HttpResponse, App, HttpServer};
use color_eyre::Result;
use eyre::WrapErr;
use log::info;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::PathBuf;
// I think we have to add crate here because
// of the other crate named "config" that we
// use as a dependency.
use crate::config::{Config, MailSettings};
use crate::db::{self, Pool};
use guards::AdminSecrets;
use mailer::JoinUsMailer;
mod handlers;
mod dtos;
mod error;
mod helpers;
mod guards;
mod mailer;
mod redirect;
mod validators;

// Declare app state struct. Nothing in here is mutable,
// handlers don't coordinate with each other in any way.
pub struct AppState {
  pub pool: Pool,
  pub admin: AdminSecrets,
  pub mailer: JoinUsMailer,
  pub static_dir: PathBuf
}

// Function to start the server.
// Has to be async because there should be a .await at the end.
pub async fn run() -> Result<()> {
  let config = Config::from_env()
    .expect("Configuration (environment or .env file) is missing");

  let manager = SqliteConnectionManager::file(&config.db_path);
  let pool = Pool::new(manager)
    .expect("Database connection failed");
  db::init_schema(&pool)
    .expect("Could not create the database schema");

  // Crash immediately when the relay coordinates don't
  // even parse, a broken mailer would otherwise only show
  // up on the first join request:
  let mailer = JoinUsMailer::open(&MailSettings::from(&config))
    .expect("Fatal: mail relay configuration is invalid");

  // Got to save these for later because we'll be
  // destroying "config" by moving pieces of it into
  // app_state.
  let bind_address = config.bind_address.clone();
  let max_json_payload = config.max_json_payload;

  let app_state = web::Data::new(
    AppState {
      pool,
      admin: AdminSecrets::new(
        config.admin_access_id,
        config.admin_password
      ),
      mailer,
      static_dir: PathBuf::from(config.static_dir)
    }
  );

  info!("Starting server on {}", bind_address);

  HttpServer::new(move|| {
    App::new()
      .app_data(app_state.clone())
      // The JSON limit has to fit base64 image uploads,
      // it's a lot more than what the other endpoints
      // ever need:
      .app_data(web::JsonConfig::default()
        .limit(max_json_payload)
        .error_handler(|err, _| {
          let message = err.to_string();
          actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest()
              .json(dtos::JsonMessage::new(&message))
          ).into()
        }))
      .app_data(web::PathConfig::default().error_handler(|_, _| {
        // No idea how this works but it does:
        actix_web::error::ErrorBadRequest("Invalid path arguments")
      }))
      .wrap(middleware::Logger::default())
      // The SPA is served from the same process, but the
      // admin front-end dev setup calls the API cross
      // origin, so CORS stays wide open like it was:
      .wrap(
        Cors::default()
          .allow_any_origin()
          .allow_any_method()
          .allow_any_header()
      )
      // Wraps run in reverse registration order, so this
      // one sees the request first:
      .wrap(redirect::RedirectHttps)
      .configure(base_endpoints_config)
      .default_service(web::route().to(handlers::spa))
  })
  .bind(bind_address)?
  .run()
  .await
  .context("Start Actix web server")

}

// Route configuration:
fn base_endpoints_config(cfg: &mut web::ServiceConfig) {
  cfg.route("/verify", web::post().to(handlers::verify))
    .route("/article", web::get().to(handlers::articles))
    .route("/article", web::post().to(handlers::create_article))
    .route("/article/{articleId}", web::get().to(handlers::article))
    .route("/article/{articleId}", web::put().to(handlers::update_article))
    .route("/article/{articleId}", web::delete().to(handlers::delete_article))
    .route("/school", web::get().to(handlers::schools))
    .route("/school", web::post().to(handlers::create_school))
    .route("/school/{schoolId}", web::get().to(handlers::school))
    .route("/school/{schoolId}", web::put().to(handlers::update_school))
    .route("/school/{schoolId}", web::delete().to(handlers::delete_school))
    .route("/image", web::get().to(handlers::images))
    .route("/image", web::post().to(handlers::create_image))
    .route("/image/{imageId}", web::get().to(handlers::image))
    .route("/image/{imageId}", web::delete().to(handlers::delete_image))
    .route("/joinus", web::post().to(handlers::join_us));
}
