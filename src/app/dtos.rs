use serde::{Deserialize, Serialize};
use crate::db::entities::*;

// Incoming bodies deserialize into DTOs with Option fields
// and get checked by the validators module, so that the
// "first failing field" messages stay under our control
// instead of serde's. Outgoing entities are converted with
// From like everywhere else in this codebase.

/* --- Request body objects --- */

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
  pub password: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct NewArticleBody {
  pub article: Option<NewArticleDto>
}

// The create shape is strict about unknown keys, unlike
// every other schema of the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewArticleDto {
  pub title: Option<String>,
  pub content: Option<String>,
  pub created_at: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleBody {
  pub article: Option<UpdateArticleDto>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleDto {
  pub id: Option<String>,
  pub title: Option<String>,
  pub content: Option<String>,
  pub created_at: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct NewSchoolBody {
  pub school: Option<NewSchoolDto>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchoolDto {
  pub name: Option<String>,
  pub address: Option<String>,
  pub contact_person: Option<String>,
  pub website: Option<String>,
  pub description: Option<String>,
  pub x_cord: Option<f64>,
  pub y_cord: Option<f64>,
  pub logo_link: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct UpdateSchoolBody {
  pub school: Option<UpdateSchoolDto>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchoolDto {
  pub id: Option<String>,
  pub name: Option<String>,
  pub address: Option<String>,
  pub contact_person: Option<String>,
  pub website: Option<String>,
  pub description: Option<String>,
  pub x_cord: Option<f64>,
  pub y_cord: Option<f64>,
  pub logo_link: Option<String>
}

// The image field is kept as a raw JSON value because the
// endpoint answers "Invalid image format" for any shape
// problem, including a non-string value.
#[derive(Debug, Deserialize)]
pub struct ImageBody {
  pub image: Option<serde_json::Value>
}

#[derive(Debug, Deserialize)]
pub struct JoinUsBody {
  #[serde(rename = "formData")]
  pub form_data: Option<JoinUsDto>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinUsDto {
  pub school_name: Option<String>,
  pub students_contact: Option<Vec<String>>,
  pub school_description: Option<String>,
  pub reason: Option<String>,
  pub mail: Option<String>
}

/* --- Response objects --- */

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonMessage {
  pub message: String
}

impl JsonMessage {

  pub fn new(message: &str) -> Self {
    Self {
      message: String::from(message)
    }
  }

  pub fn ok() -> Self {
    Self::new("OK")
  }

}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifiedDto {
  pub id: String,
  pub message: String
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
  pub id: String,
  pub title: String,
  pub content: String,
  pub created_at: String
}

impl From<Article> for ArticleDto {
  fn from(article: Article) -> Self {
    Self {
      id: article.id,
      title: article.title,
      content: article.content,
      created_at: article.created_at
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDto {
  pub id: String,
  pub name: String,
  pub address: String,
  pub contact_person: String,
  pub website: String,
  pub description: String,
  pub x_cord: f64,
  pub y_cord: f64,
  pub logo_link: String
}

impl From<School> for SchoolDto {
  fn from(school: School) -> Self {
    Self {
      id: school.id,
      name: school.name,
      address: school.address,
      contact_person: school.contact_person,
      website: school.website,
      description: school.description,
      x_cord: school.x_cord,
      y_cord: school.y_cord,
      logo_link: school.logo_link
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleCreatedDto {
  pub message: String,
  pub id: String,
  pub article: ArticleDto
}

impl From<Article> for ArticleCreatedDto {
  fn from(article: Article) -> Self {
    Self {
      message: "OK".to_string(),
      id: article.id.clone(),
      article: article.into()
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleUpdatedDto {
  pub message: String,
  pub article: ArticleDto
}

impl From<Article> for ArticleUpdatedDto {
  fn from(article: Article) -> Self {
    Self {
      message: "OK".to_string(),
      article: article.into()
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchoolCreatedDto {
  pub message: String,
  pub id: String,
  pub school: SchoolDto
}

impl From<School> for SchoolCreatedDto {
  fn from(school: School) -> Self {
    Self {
      message: "OK".to_string(),
      id: school.id.clone(),
      school: school.into()
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchoolUpdatedDto {
  pub message: String,
  pub school: SchoolDto
}

impl From<School> for SchoolUpdatedDto {
  fn from(school: School) -> Self {
    Self {
      message: "OK".to_string(),
      school: school.into()
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageCreatedDto {
  pub message: String,
  pub id: String
}

impl From<Image> for ImageCreatedDto {
  fn from(image: Image) -> Self {
    Self {
      message: "OK".to_string(),
      id: image.id
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfoDto {
  pub id: String,
  pub created_at: String
}

impl From<ImageInfo> for ImageInfoDto {
  fn from(info: ImageInfo) -> Self {
    Self {
      id: info.id,
      created_at: info.created_at
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageListDto {
  pub message: String,
  pub images: Vec<ImageInfoDto>
}

impl From<Vec<ImageInfo>> for ImageListDto {
  fn from(infos: Vec<ImageInfo>) -> Self {
    Self {
      message: "OK".to_string(),
      images: infos.into_iter().map(|i| i.into()).collect()
    }
  }
}
