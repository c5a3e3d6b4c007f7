use std::path::{Component, Path, PathBuf};

// Pulls the base64 payload out of an image data URI. Only
// the "data:image/" prefix is checked, nothing validates
// the actual bytes behind it.
pub fn data_uri_payload(image: &str) -> Option<&str> {
  if !image.starts_with("data:image/") {
    return None;
  }
  image.splitn(2, ',').nth(1)
}

// Historical sniffing rule of the site: decoded bytes that
// start with an svg tag are SVG, everything else is served
// as JPEG no matter what it actually is. Uploads are admin
// only and the admin uploads jpegs and svgs.
pub fn image_content_type(decoded: &[u8]) -> &'static str {
  if decoded.starts_with(b"<svg") {
    "image/svg+xml"
  } else {
    "image/jpeg"
  }
}

// Resolve a request path to a file inside the static
// directory. Anything that isn't made of plain path
// segments (.., absolute paths, prefixes) resolves to
// nothing and the caller falls back to index.html.
pub fn resolve_static_file(
  static_dir: &Path,
  request_path: &str
) -> Option<PathBuf> {
  let relative = request_path.trim_start_matches('/');
  if relative.is_empty() {
    return None;
  }
  let relative = Path::new(relative);
  if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
    return None;
  }
  let candidate = static_dir.join(relative);
  if candidate.is_file() {
    Some(candidate)
  } else {
    None
  }
}
