use serde::{Deserialize, Serialize};

// Simple owned datatypes mirroring the three tables.
// The API representations (camelCase keys, envelopes)
// live in the dtos module.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
  pub id: String,
  pub title: String,
  pub content: String,
  pub created_at: String
}

// An article that went through validation but has no
// identity yet. The insert assigns the id.
#[derive(Debug, Clone)]
pub struct NewArticle {
  pub title: String,
  pub content: String,
  pub created_at: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
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

#[derive(Debug, Clone)]
pub struct NewSchool {
  pub name: String,
  pub address: String,
  pub contact_person: String,
  pub website: String,
  pub description: String,
  pub x_cord: f64,
  pub y_cord: f64,
  pub logo_link: String
}

// Full image row, data is the base64 payload exactly as
// it arrived after the data URI comma.
#[derive(Debug, Clone)]
pub struct Image {
  pub id: String,
  pub data: String,
  pub created_at: String
}

// Listing variant without the payload, images can be
// megabytes each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
  pub id: String,
  pub created_at: String
}
