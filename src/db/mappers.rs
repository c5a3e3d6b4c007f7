use super::entities::*;
use rusqlite::{Row, Error};

pub fn map_article(row: &Row) -> Result<Article, Error> {
  Ok(Article {
    id: row.get(0)?,
    title: row.get(1)?,
    content: row.get(2)?,
    created_at: row.get(3)?
  })
}

pub fn map_school(row: &Row) -> Result<School, Error> {
  Ok(School {
    id: row.get(0)?,
    name: row.get(1)?,
    address: row.get(2)?,
    contact_person: row.get(3)?,
    website: row.get(4)?,
    description: row.get(5)?,
    x_cord: row.get(6)?,
    y_cord: row.get(7)?,
    logo_link: row.get(8)?
  })
}

pub fn map_image(row: &Row) -> Result<Image, Error> {
  Ok(Image {
    id: row.get(0)?,
    data: row.get(1)?,
    created_at: row.get(2)?
  })
}

pub fn map_image_info(row: &Row) -> Result<ImageInfo, Error> {
  Ok(ImageInfo {
    id: row.get(0)?,
    created_at: row.get(1)?
  })
}
