// Adding the context method to errors:
use eyre::WrapErr;
use color_eyre::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
  pub bind_address: String,
  pub db_path: String,
  // Directory holding the built front-end, served as a
  // fallback for anything that isn't an API route:
  pub static_dir: String,
  // Upper bound on JSON request bodies, in bytes. Has to
  // be large enough for base64 image uploads.
  pub max_json_payload: usize,
  // Secrets, all of these are required and have no
  // default on purpose:
  pub admin_access_id: String,
  pub admin_password: String,
  pub smtp_password: String,
  // Mail relay settings:
  pub smtp_host: String,
  pub smtp_username: String,
  pub mail_from: String,
  pub mail_to: String,
}

// The mail dispatcher only needs a subset of the config,
// moved into its own struct so the rest of the secrets
// don't travel with it.
#[derive(Debug, Clone)]
pub struct MailSettings {
  pub host: String,
  pub username: String,
  pub password: String,
  pub from: String,
  pub to: String
}

impl From<&Config> for MailSettings {
  fn from(config: &Config) -> Self {
    Self {
      host: config.smtp_host.clone(),
      username: config.smtp_username.clone(),
      password: config.smtp_password.clone(),
      from: config.mail_from.clone(),
      to: config.mail_to.clone()
    }
  }
}

impl Config {

  pub fn from_env() -> Result<Config> {
    let mut c = config::Config::new();
    // RUST_LOG is already set in main.rs if it
    // was absent.
    // Let's set other default values. You have
    // to use lowercase when compared to what's
    // in the .env file.
    c.set_default("bind_address", "127.0.0.1:8081")?;
    c.set_default("db_path", "./usi-site.db")?;
    c.set_default("static_dir", "./web")?;
    // 15 MiB, same ceiling the site front-end assumes
    // when it uploads images as data URIs:
    c.set_default("max_json_payload", 15_728_640)?;
    // Default mail relay coordinates. The SMTP password
    // stays required.
    c.set_default("smtp_host", "taylor.mxrouting.net")?;
    c.set_default("smtp_username", "hello@ranajakub.com")?;
    c.set_default("mail_from", "hello@ranajakub.com")?;
    c.set_default("mail_to", "hello@ranajakub.com")?;

    c.merge(config::Environment::default())?;
    // The error has to be given a context for
    // color_eyre to work here:
    c.try_into()
      .context("Loading configuration from env")
  }

}
