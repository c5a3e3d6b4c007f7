use rusqlite::{params, NO_PARAMS, OptionalExtension, Row, ToSql};
pub mod entities;
mod mappers;
use eyre::WrapErr;
use color_eyre::{Report, Result};
use entities::*;
use mappers::*;
use uuid::Uuid;
use crate::utils::time_utils;

// Type alias to make function signatures much clearer:
pub type Pool = r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>;

// Every operation here is a single read or a single write,
// there are no transactions spanning multiple calls.

// The real schema is owned by the deployment, but creating
// the tables when they're absent keeps fresh installs (and
// the in-memory test databases) usable.
pub fn init_schema(pool: &Pool) -> Result<()> {
  let conn = pool.clone().get()?;
  conn.execute_batch(
    "CREATE TABLE IF NOT EXISTS articles (
      id TEXT PRIMARY KEY,
      title TEXT NOT NULL UNIQUE,
      content TEXT NOT NULL,
      created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS schools (
      id TEXT PRIMARY KEY,
      name TEXT NOT NULL,
      address TEXT NOT NULL,
      contact_person TEXT NOT NULL,
      website TEXT NOT NULL,
      description TEXT NOT NULL,
      x_cord REAL NOT NULL,
      y_cord REAL NOT NULL,
      logo_link TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS images (
      id TEXT PRIMARY KEY,
      data TEXT NOT NULL,
      created_at TEXT NOT NULL
    );"
  ).context("Creating database schema")?;
  Ok(())
}

// Stole most of the signature from the rustqlite doc.
// Careful to use a later version of the crate,
// Google takes you to old versions of the doc.
fn select_many<T, P, F>(
  pool: &Pool,
  query: &str,
  params: P,
  mapper: F
) -> Result<Vec<T>>
  where
    P: IntoIterator,
    P::Item: ToSql,
    F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
{
  // Do the reference counting thing and get a connection
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(query)?;
  stmt.query_map(params, mapper)
    .and_then(Iterator::collect)
    .context("Generic select_many query")
}

// A UNIQUE constraint failure is the only store error the
// API reports differently (duplicate article titles), so
// it has to stay recognizable after the eyre conversion.
// The write functions below return the rusqlite error
// without extra context for that reason.
pub fn is_unique_violation(report: &Report) -> bool {
  match report.downcast_ref::<rusqlite::Error>() {
    Some(rusqlite::Error::SqliteFailure(e, _)) =>
      e.code == rusqlite::ErrorCode::ConstraintViolation,
    _ => false
  }
}

/* --- Articles --- */

pub fn all_articles(pool: &Pool) -> Result<Vec<Article>> {
  select_many(
    pool,
    "SELECT id, title, content, created_at FROM articles
    ORDER BY datetime(created_at) DESC",
    NO_PARAMS,
    map_article
  )
}

pub fn article_by_id(
  pool: &Pool,
  article_id: &str
) -> Result<Option<Article>> {
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(
    "SELECT id, title, content, created_at FROM articles WHERE id = ?"
  )?;
  stmt.query_row(params![article_id], map_article)
    .optional()
    .context("Fetching article by id")
}

pub fn insert_article(
  pool: &Pool,
  new_article: NewArticle
) -> Result<Article> {
  let conn = pool.clone().get()?;
  let article = Article {
    id: Uuid::new_v4().to_string(),
    title: new_article.title,
    content: new_article.content,
    created_at: new_article.created_at
  };
  conn.execute(
    "INSERT INTO articles (id, title, content, created_at)
    VALUES (?1, ?2, ?3, ?4)",
    params![
      article.id,
      article.title,
      article.content,
      article.created_at
    ]
  )?;
  Ok(article)
}

// Full replace. Returns the number of affected rows, zero
// meaning the id didn't match anything.
pub fn update_article(
  pool: &Pool,
  article: &Article
) -> Result<usize> {
  let conn = pool.clone().get()?;
  let updated = conn.execute(
    "UPDATE articles SET title = ?1, content = ?2, created_at = ?3
    WHERE id = ?4",
    params![
      article.title,
      article.content,
      article.created_at,
      article.id
    ]
  )?;
  Ok(updated)
}

pub fn delete_article(pool: &Pool, article_id: &str) -> Result<usize> {
  let conn = pool.clone().get()?;
  conn.execute(
    "DELETE FROM articles WHERE id = ?",
    params![article_id]
  ).context("Deleting article")
}

/* --- Schools --- */

pub fn all_schools(pool: &Pool) -> Result<Vec<School>> {
  select_many(
    pool,
    "SELECT id, name, address, contact_person, website, description,
    x_cord, y_cord, logo_link FROM schools",
    NO_PARAMS,
    map_school
  )
}

pub fn school_by_id(
  pool: &Pool,
  school_id: &str
) -> Result<Option<School>> {
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(
    "SELECT id, name, address, contact_person, website, description,
    x_cord, y_cord, logo_link FROM schools WHERE id = ?"
  )?;
  stmt.query_row(params![school_id], map_school)
    .optional()
    .context("Fetching school by id")
}

pub fn insert_school(
  pool: &Pool,
  new_school: NewSchool
) -> Result<School> {
  let conn = pool.clone().get()?;
  let school = School {
    id: Uuid::new_v4().to_string(),
    name: new_school.name,
    address: new_school.address,
    contact_person: new_school.contact_person,
    website: new_school.website,
    description: new_school.description,
    x_cord: new_school.x_cord,
    y_cord: new_school.y_cord,
    logo_link: new_school.logo_link
  };
  conn.execute(
    "INSERT INTO schools (id, name, address, contact_person, website,
    description, x_cord, y_cord, logo_link)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    params![
      school.id,
      school.name,
      school.address,
      school.contact_person,
      school.website,
      school.description,
      school.x_cord,
      school.y_cord,
      school.logo_link
    ]
  ).context("Inserting school")?;
  Ok(school)
}

pub fn update_school(
  pool: &Pool,
  school: &School
) -> Result<usize> {
  let conn = pool.clone().get()?;
  let updated = conn.execute(
    "UPDATE schools SET name = ?1, address = ?2, contact_person = ?3,
    website = ?4, description = ?5, x_cord = ?6, y_cord = ?7,
    logo_link = ?8 WHERE id = ?9",
    params![
      school.name,
      school.address,
      school.contact_person,
      school.website,
      school.description,
      school.x_cord,
      school.y_cord,
      school.logo_link,
      school.id
    ]
  ).context("Updating school")?;
  Ok(updated)
}

pub fn delete_school(pool: &Pool, school_id: &str) -> Result<usize> {
  let conn = pool.clone().get()?;
  conn.execute(
    "DELETE FROM schools WHERE id = ?",
    params![school_id]
  ).context("Deleting school")
}

/* --- Images --- */

pub fn insert_image(pool: &Pool, data: &str) -> Result<Image> {
  let conn = pool.clone().get()?;
  let image = Image {
    id: Uuid::new_v4().to_string(),
    data: data.to_string(),
    created_at: time_utils::current_datetime_rfc3339()
  };
  conn.execute(
    "INSERT INTO images (id, data, created_at) VALUES (?1, ?2, ?3)",
    params![image.id, image.data, image.created_at]
  ).context("Inserting image")?;
  Ok(image)
}

pub fn image_by_id(
  pool: &Pool,
  image_id: &str
) -> Result<Option<Image>> {
  let conn = pool.clone().get()?;
  let mut stmt = conn.prepare(
    "SELECT id, data, created_at FROM images WHERE id = ?"
  )?;
  stmt.query_row(params![image_id], map_image)
    .optional()
    .context("Fetching image by id")
}

// The payload column is deliberately left out of listings.
pub fn all_image_infos(pool: &Pool) -> Result<Vec<ImageInfo>> {
  select_many(
    pool,
    "SELECT id, created_at FROM images",
    NO_PARAMS,
    map_image_info
  )
}

pub fn delete_image(pool: &Pool, image_id: &str) -> Result<usize> {
  let conn = pool.clone().get()?;
  conn.execute(
    "DELETE FROM images WHERE id = ?",
    params![image_id]
  ).context("Deleting image")
}
