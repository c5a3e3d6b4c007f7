use actix_web::{
  http::header,
  http::Method,
  web,
  HttpRequest,
  HttpResponse,
  Result
};
use base64::{engine::general_purpose, Engine as _};
use log::error;
use serde_json::Value;
use std::fs;
use std::path::Path;
use crate::db;
use super::dtos::*;
use super::error::{map_article_write_error, map_db_error, Error};
use super::guards::AdminAccess;
use super::helpers;
use super::validators;
use super::AppState;

// Module with all the API handler functions. Mutating
// endpoints take the AdminAccess extractor, which answers
// 400/403 before the handler body runs.

/* --- Login --- */

// "Login" hands out the constant admin id. The client
// echoes it back in the x-user-id header from then on.
pub async fn verify(
  app_state: web::Data<AppState>,
  body: web::Json<VerifyBody>
) -> Result<HttpResponse, Error> {
  let password_ok = body.password.as_deref()
    .map(|p| app_state.admin.password_matches(p))
    .unwrap_or(false);
  if !password_ok {
    return Err(Error::BadRequest("Wrong password".to_string()));
  }
  Ok(HttpResponse::Ok().json(VerifiedDto {
    id: app_state.admin.token.reveal().to_string(),
    message: "OK".to_string()
  }))
}

/* --- Articles --- */

pub async fn articles(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let articles = db::all_articles(&app_state.pool)
    .map_err(map_db_error)?;
  let article_dtos: Vec<ArticleDto> =
    articles.into_iter().map(|a| a.into()).collect();
  Ok(HttpResponse::Ok().json(article_dtos))
}

// Nothing in the front-end actually calls this, fetching
// the whole list is cheap enough. Kept because removing it
// would change the public surface.
pub async fn article(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  match db::article_by_id(&app_state.pool, &article_id)
    .map_err(map_db_error)? {
      Some(a) => Ok(HttpResponse::Ok().json(ArticleDto::from(a))),
      None => Err(Error::NotFound("Article not found".to_string()))
  }
}

pub async fn create_article(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  body: web::Json<NewArticleBody>
) -> Result<HttpResponse, Error> {
  let new_article = validators::new_article(body.into_inner().article)?;
  let article = db::insert_article(&app_state.pool, new_article)
    .map_err(map_article_write_error)?;
  Ok(HttpResponse::Ok().json(ArticleCreatedDto::from(article)))
}

pub async fn update_article(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  _path: web::Path<(String,)>,
  body: web::Json<UpdateArticleBody>
) -> Result<HttpResponse, Error> {
  // The id that counts is the one in the body, the path
  // segment only shapes the route:
  let article = validators::existing_article(body.into_inner().article)?;
  let updated = db::update_article(&app_state.pool, &article)
    .map_err(map_article_write_error)?;
  if updated == 0 {
    return Err(Error::DatabaseError(
      format!("No article with id {} to update", article.id)
    ));
  }
  Ok(HttpResponse::Ok().json(ArticleUpdatedDto::from(article)))
}

pub async fn delete_article(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  // Deleting something that's already gone reports OK as
  // well, the store doesn't complain about zero rows.
  db::delete_article(&app_state.pool, &article_id)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(JsonMessage::ok()))
}

/* --- Schools --- */

pub async fn schools(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let schools = db::all_schools(&app_state.pool)
    .map_err(map_db_error)?;
  let school_dtos: Vec<SchoolDto> =
    schools.into_iter().map(|s| s.into()).collect();
  Ok(HttpResponse::Ok().json(school_dtos))
}

pub async fn school(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let school_id = path.into_inner().0;
  match db::school_by_id(&app_state.pool, &school_id)
    .map_err(map_db_error)? {
      Some(s) => Ok(HttpResponse::Ok().json(SchoolDto::from(s))),
      None => Err(Error::NotFound("School not found".to_string()))
  }
}

pub async fn create_school(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  body: web::Json<NewSchoolBody>
) -> Result<HttpResponse, Error> {
  let new_school = validators::new_school(body.into_inner().school)?;
  let school = db::insert_school(&app_state.pool, new_school)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(SchoolCreatedDto::from(school)))
}

pub async fn update_school(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  _path: web::Path<(String,)>,
  body: web::Json<UpdateSchoolBody>
) -> Result<HttpResponse, Error> {
  let school = validators::existing_school(body.into_inner().school)?;
  let updated = db::update_school(&app_state.pool, &school)
    .map_err(map_db_error)?;
  if updated == 0 {
    return Err(Error::DatabaseError(
      format!("No school with id {} to update", school.id)
    ));
  }
  Ok(HttpResponse::Ok().json(SchoolUpdatedDto::from(school)))
}

pub async fn delete_school(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let school_id = path.into_inner().0;
  db::delete_school(&app_state.pool, &school_id)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(JsonMessage::ok()))
}

/* --- Images --- */

pub async fn create_image(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  body: web::Json<ImageBody>
) -> Result<HttpResponse, Error> {
  // Any shape problem gets the same answer: not a string,
  // no data URI prefix, or nothing after the comma.
  let payload = body.image.as_ref()
    .and_then(Value::as_str)
    .and_then(helpers::data_uri_payload)
    .ok_or_else(|| Error::BadRequest(
      "Invalid image format".to_string()
    ))?;
  let image = db::insert_image(&app_state.pool, payload)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(ImageCreatedDto::from(image)))
}

pub async fn image(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let image_id = path.into_inner().0;
  let image = match db::image_by_id(&app_state.pool, &image_id)
    .map_err(map_db_error)? {
      Some(i) => i,
      None => return Err(Error::NotFound("Image not found".to_string()))
  };
  let decoded = general_purpose::STANDARD.decode(&image.data)
    .map_err(|e| {
      error!("Stored image {} is not valid base64 - {}", image.id, e);
      Error::InternalServerError("Image payload is corrupt".to_string())
    })?;
  let content_type = helpers::image_content_type(&decoded);
  // Ids never get reused, so clients may cache forever:
  Ok(
    HttpResponse::Ok()
      .content_type(content_type)
      .header(header::CACHE_CONTROL, "public, max-age=31536000")
      .body(decoded)
  )
}

pub async fn images(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let infos = db::all_image_infos(&app_state.pool)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(ImageListDto::from(infos)))
}

pub async fn delete_image(
  _admin: AdminAccess,
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let image_id = path.into_inner().0;
  db::delete_image(&app_state.pool, &image_id)
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(JsonMessage::ok()))
}

/* --- Join us --- */

pub async fn join_us(
  app_state: web::Data<AppState>,
  body: web::Json<JoinUsBody>
) -> Result<HttpResponse, Error> {
  let form = validators::join_us(body.into_inner().form_data)?;
  // Fire and forget towards the relay. When the relay is
  // down the submission is simply lost, there's no queue.
  app_state.mailer.send(&form)
    .map_err(|e| Error::InternalServerError(
      format!("Join us mail submission failed - {}", e)
    ))?;
  Ok(HttpResponse::Ok().json(JsonMessage::ok()))
}

/* --- Static fallback --- */

// Everything that didn't match an API route is assumed to
// be a front-end path: serve the file when it exists, the
// SPA entry document otherwise.
pub async fn spa(
  app_state: web::Data<AppState>,
  req: HttpRequest
) -> Result<HttpResponse, Error> {
  if req.method() != Method::GET {
    return Err(Error::NotFound("Endpoint doesn't exist".to_string()));
  }
  serve_static(&app_state.static_dir, req.path())
}

fn serve_static(
  static_dir: &Path,
  request_path: &str
) -> Result<HttpResponse, Error> {
  let file = helpers::resolve_static_file(static_dir, request_path)
    .unwrap_or_else(|| static_dir.join("index.html"));
  match fs::read(&file) {
    Ok(bytes) => {
      let mime = mime_guess::from_path(&file).first_or_octet_stream();
      Ok(
        HttpResponse::Ok()
          .content_type(mime.as_ref())
          .body(bytes)
      )
    },
    // No such file and no index.html either, there's
    // nothing sensible left to serve:
    Err(_) => Err(Error::NotFound("Endpoint doesn't exist".to_string()))
  }
}
