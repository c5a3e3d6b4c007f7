use actix_web::{
  error::ResponseError,
  HttpResponse
};
use derive_more::Display;
use log::error;
use super::dtos::JsonMessage;

// The full error output should only appear in logs, random
// internet people get the generic display message.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "Internal server error")]
  InternalServerError(String),
  #[display(fmt = "Internal server error")]
  DatabaseError(String),
  // Admin header present but wrong:
  #[display(fmt = "Not authorized")]
  Forbidden(String),
  #[display(fmt = "{}", _0)]
  NotFound(String),
  #[display(fmt = "{}", _0)]
  BadRequest(String),
  // Duplicate article title, the one store failure the
  // API distinguishes from a plain 500:
  #[display(fmt = "Article with this title already exists")]
  Conflict
}

// The old API sent JSON bodies shaped {"message": ...} for
// every failure, the front-end relies on it.
impl ResponseError for Error {
  fn error_response(&self) -> HttpResponse {
    match self {
      Error::InternalServerError(cause) | Error::DatabaseError(cause) => {
        error!("Responding 500 - {}", cause);
        HttpResponse::InternalServerError()
          .json(JsonMessage::new(&self.to_string()))
      },
      Error::Forbidden(_) => HttpResponse::Forbidden()
        .json(JsonMessage::new(&self.to_string())),
      Error::NotFound(_) => HttpResponse::NotFound()
        .json(JsonMessage::new(&self.to_string())),
      Error::BadRequest(_) | Error::Conflict => HttpResponse::BadRequest()
        .json(JsonMessage::new(&self.to_string()))
    }
  }
}

// Validation failures surface the offending field's
// message directly, that's the contract the front-end
// shows to the admin.
impl From<super::validators::ValidationError> for Error {
  fn from(e: super::validators::ValidationError) -> Self {
    Error::BadRequest(e.message)
  }
}

pub fn map_db_error(e: color_eyre::Report) -> Error {
  Error::DatabaseError(e.to_string())
}

// Boundary translation for the article write path: a
// UNIQUE violation on the title becomes a 400 conflict,
// everything else stays a 500.
pub fn map_article_write_error(e: color_eyre::Report) -> Error {
  if crate::db::is_unique_violation(&e) {
    Error::Conflict
  } else {
    Error::DatabaseError(e.to_string())
  }
}
