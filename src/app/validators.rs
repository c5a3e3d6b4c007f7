use derive_more::Display;
use lazy_static::lazy_static;
use regex::Regex;
use crate::db::entities::{Article, NewArticle, NewSchool, School};
use crate::utils::time_utils;
use super::dtos::*;

// One validator per request shape, turning the loose DTOs
// into owned domain values. Validation stops at the first
// failing field and its message becomes the 400 body, same
// contract the old API had.

#[derive(Debug, Display)]
#[display(fmt = "{}", message)]
pub struct ValidationError {
  pub field: String,
  pub message: String
}

impl ValidationError {

  fn new(field: &str, constraint: &str) -> Self {
    Self {
      field: field.to_string(),
      message: format!("\"{}\" {}", field, constraint)
    }
  }

  fn required(field: &str) -> Self {
    Self::new(field, "is required")
  }

}

// Good enough syntactic check, the mail relay is the real
// judge of what it accepts.
lazy_static! {
  static ref EMAIL_REGEX: Regex = Regex::new(
    r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
  ).unwrap();
}

// The validated join-us form. Never persisted anywhere, it
// only lives long enough to become a mail body.
#[derive(Debug, Clone)]
pub struct JoinUsForm {
  pub school_name: String,
  pub students_contact: Vec<String>,
  pub school_description: String,
  pub reason: String,
  pub mail: String
}

fn require(field: &str, value: Option<String>) -> Result<String, ValidationError> {
  value.ok_or_else(|| ValidationError::required(field))
}

fn require_non_empty(
  field: &str,
  value: Option<String>
) -> Result<String, ValidationError> {
  let value = require(field, value)?;
  if value.is_empty() {
    Err(ValidationError::new(field, "is not allowed to be empty"))
  } else {
    Ok(value)
  }
}

fn require_number(
  field: &str,
  value: Option<f64>
) -> Result<f64, ValidationError> {
  value.ok_or_else(|| ValidationError::required(field))
}

fn require_date(
  field: &str,
  value: Option<String>
) -> Result<String, ValidationError> {
  let value = require(field, value)?;
  match time_utils::parse_rfc3339(&value) {
    Some(_) => Ok(value),
    None => Err(ValidationError::new(field, "must be a valid date"))
  }
}

fn require_email(
  field: &str,
  value: Option<String>
) -> Result<String, ValidationError> {
  let value = require_non_empty(field, value)?;
  if EMAIL_REGEX.is_match(&value) {
    Ok(value)
  } else {
    Err(ValidationError::new(field, "must be a valid email"))
  }
}

// The title "new" collides with the admin front-end route
// for article creation, it stays reserved.
fn article_title(value: Option<String>) -> Result<String, ValidationError> {
  let title = require_non_empty("title", value)?;
  if title == "new" {
    Err(ValidationError::new("title", "contains an invalid value"))
  } else {
    Ok(title)
  }
}

pub fn new_article(
  dto: Option<NewArticleDto>
) -> Result<NewArticle, ValidationError> {
  let dto = dto.ok_or_else(|| ValidationError::required("value"))?;
  Ok(NewArticle {
    title: article_title(dto.title)?,
    // Content is required but explicitly allowed to be
    // empty:
    content: require("content", dto.content)?,
    created_at: require_date("createdAt", dto.created_at)?
  })
}

pub fn existing_article(
  dto: Option<UpdateArticleDto>
) -> Result<Article, ValidationError> {
  let dto = dto.ok_or_else(|| ValidationError::required("value"))?;
  Ok(Article {
    id: require_non_empty("id", dto.id)?,
    title: article_title(dto.title)?,
    content: require("content", dto.content)?,
    created_at: require_date("createdAt", dto.created_at)?
  })
}

pub fn new_school(
  dto: Option<NewSchoolDto>
) -> Result<NewSchool, ValidationError> {
  let dto = dto.ok_or_else(|| ValidationError::required("value"))?;
  Ok(NewSchool {
    name: require("name", dto.name)?,
    address: require("address", dto.address)?,
    contact_person: require("contactPerson", dto.contact_person)?,
    website: require("website", dto.website)?,
    description: require("description", dto.description)?,
    x_cord: require_number("xCord", dto.x_cord)?,
    y_cord: require_number("yCord", dto.y_cord)?,
    logo_link: require("logoLink", dto.logo_link)?
  })
}

pub fn existing_school(
  dto: Option<UpdateSchoolDto>
) -> Result<School, ValidationError> {
  let dto = dto.ok_or_else(|| ValidationError::required("value"))?;
  Ok(School {
    id: require_non_empty("id", dto.id)?,
    name: require("name", dto.name)?,
    address: require("address", dto.address)?,
    contact_person: require("contactPerson", dto.contact_person)?,
    website: require("website", dto.website)?,
    description: require("description", dto.description)?,
    x_cord: require_number("xCord", dto.x_cord)?,
    y_cord: require_number("yCord", dto.y_cord)?,
    logo_link: require("logoLink", dto.logo_link)?
  })
}

pub fn join_us(
  dto: Option<JoinUsDto>
) -> Result<JoinUsForm, ValidationError> {
  let dto = dto.ok_or_else(|| ValidationError::required("value"))?;
  let school_name = require_non_empty("schoolName", dto.school_name)?;
  let contacts = dto.students_contact
    .ok_or_else(|| ValidationError::required("studentsContact"))?;
  if contacts.len() != 3 {
    return Err(ValidationError::new(
      "studentsContact",
      "must contain 3 items"
    ));
  }
  let mut students_contact = Vec::with_capacity(3);
  for (i, contact) in contacts.into_iter().enumerate() {
    let field = format!("studentsContact[{}]", i);
    students_contact.push(require_email(&field, Some(contact))?);
  }
  Ok(JoinUsForm {
    school_name,
    students_contact,
    school_description: require_non_empty(
      "schoolDescription",
      dto.school_description
    )?,
    reason: require_non_empty("reason", dto.reason)?,
    mail: require_email("mail", dto.mail)?
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn article_dto(title: &str) -> Option<NewArticleDto> {
    Some(NewArticleDto {
      title: Some(title.to_string()),
      content: Some(String::new()),
      created_at: Some("2024-03-07T21:59:00Z".to_string())
    })
  }

  fn join_us_dto(contacts: Vec<&str>) -> Option<JoinUsDto> {
    Some(JoinUsDto {
      school_name: Some("Some school".to_string()),
      students_contact: Some(
        contacts.into_iter().map(String::from).collect()
      ),
      school_description: Some("A school".to_string()),
      reason: Some("We want in".to_string()),
      mail: Some("school@example.org".to_string())
    })
  }

  #[test]
  fn accepts_a_plain_new_article() {
    let article = new_article(article_dto("Hello")).unwrap();
    assert_eq!("Hello", article.title);
    assert_eq!("", article.content);
  }

  #[test]
  fn the_title_new_is_reserved() {
    let err = new_article(article_dto("new")).unwrap_err();
    assert_eq!("title", err.field);
    assert_eq!("\"title\" contains an invalid value", err.message);
    // Only the exact value is reserved:
    assert!(new_article(article_dto("news")).is_ok());
  }

  #[test]
  fn empty_and_missing_titles_are_rejected() {
    assert_eq!(
      "\"title\" is not allowed to be empty",
      new_article(article_dto("")).unwrap_err().message
    );
    let mut dto = article_dto("Hello");
    dto.as_mut().unwrap().title = None;
    assert_eq!(
      "\"title\" is required",
      new_article(dto).unwrap_err().message
    );
  }

  #[test]
  fn created_at_must_parse() {
    let mut dto = article_dto("Hello");
    dto.as_mut().unwrap().created_at = Some("yesterday".to_string());
    assert_eq!(
      "\"createdAt\" must be a valid date",
      new_article(dto).unwrap_err().message
    );
  }

  #[test]
  fn a_missing_wrapper_is_reported_like_joi_did() {
    assert_eq!(
      "\"value\" is required",
      new_article(None).unwrap_err().message
    );
  }

  #[test]
  fn update_requires_an_id() {
    let dto = UpdateArticleDto {
      id: None,
      title: Some("Hello".to_string()),
      content: Some(String::new()),
      created_at: Some("2024-03-07T21:59:00Z".to_string())
    };
    assert_eq!(
      "\"id\" is required",
      existing_article(Some(dto)).unwrap_err().message
    );
  }

  #[test]
  fn school_fields_may_be_empty_but_not_missing() {
    let dto = NewSchoolDto {
      name: Some(String::new()),
      address: Some(String::new()),
      contact_person: Some(String::new()),
      website: Some(String::new()),
      description: Some(String::new()),
      x_cord: Some(50.08),
      y_cord: Some(14.43),
      logo_link: Some(String::new())
    };
    assert!(new_school(Some(dto)).is_ok());

    let dto = NewSchoolDto {
      name: Some("Some school".to_string()),
      address: Some(String::new()),
      contact_person: Some(String::new()),
      website: Some(String::new()),
      description: Some(String::new()),
      x_cord: None,
      y_cord: Some(14.43),
      logo_link: Some(String::new())
    };
    assert_eq!(
      "\"xCord\" is required",
      new_school(Some(dto)).unwrap_err().message
    );
  }

  #[test]
  fn join_us_needs_exactly_three_contacts() {
    let err = join_us(join_us_dto(
      vec!["a@example.org", "b@example.org"]
    )).unwrap_err();
    assert_eq!("\"studentsContact\" must contain 3 items", err.message);

    let err = join_us(join_us_dto(vec![
      "a@example.org", "b@example.org", "c@example.org", "d@example.org"
    ])).unwrap_err();
    assert_eq!("\"studentsContact\" must contain 3 items", err.message);

    assert!(join_us(join_us_dto(vec![
      "a@example.org", "b@example.org", "c@example.org"
    ])).is_ok());
  }

  #[test]
  fn contact_entries_are_checked_as_emails() {
    let err = join_us(join_us_dto(vec![
      "a@example.org", "not an email", "c@example.org"
    ])).unwrap_err();
    assert_eq!("studentsContact[1]", err.field);
    assert_eq!(
      "\"studentsContact[1]\" must be a valid email",
      err.message
    );
  }

  #[test]
  fn the_contact_mail_is_checked_too() {
    let mut dto = join_us_dto(vec![
      "a@example.org", "b@example.org", "c@example.org"
    ]);
    dto.as_mut().unwrap().mail = Some("@nope".to_string());
    assert_eq!(
      "\"mail\" must be a valid email",
      join_us(dto).unwrap_err().message
    );
  }
}
