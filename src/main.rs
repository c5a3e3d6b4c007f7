mod app;
mod config;
mod db;
mod utils;

use color_eyre::Result;
use dotenv::dotenv;
use std::env;

#[actix_web::main]
async fn main() -> Result<()> {
  // The .env file is optional, real deployments use actual
  // environment variables.
  dotenv().ok();
  // Provide a default log level when RUST_LOG is absent,
  // otherwise env_logger stays completely silent.
  if env::var("RUST_LOG").is_err() {
    env::set_var("RUST_LOG", "info,actix_web=info");
  }
  env_logger::init();

  app::run().await
}
