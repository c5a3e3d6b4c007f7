use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};
use log::warn;
use super::error::Error;
use super::AppState;

// The single admin credential. The whole "session" model
// of the site is one opaque value handed out by /verify
// and echoed back in a header on every mutating call.
pub struct AccessToken(String);

impl AccessToken {

  pub fn new(value: String) -> Self {
    Self(value)
  }

  // Equality in constant time, the comparison must not
  // leak how much of a guess was right.
  pub fn matches(&self, candidate: &str) -> bool {
    constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
  }

  // /verify hands the raw value to the client, which
  // echoes it back as the x-user-id header afterwards.
  pub fn reveal(&self) -> &str {
    &self.0
  }

}

pub struct AdminSecrets {
  pub token: AccessToken,
  password: String
}

impl AdminSecrets {

  pub fn new(token: String, password: String) -> Self {
    Self {
      token: AccessToken::new(token),
      password
    }
  }

  pub fn password_matches(&self, candidate: &str) -> bool {
    constant_time_eq(self.password.as_bytes(), candidate.as_bytes())
  }

}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
  if a.len() != b.len() {
    return false;
  }
  a.iter()
    .zip(b.iter())
    .fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// Extractor standing in front of every mutating handler.
// A route guard can only make the route not match (so a
// 404), while this check has to answer 400 or 403 with a
// JSON body, hence FromRequest.
pub struct AdminAccess;

impl FromRequest for AdminAccess {
  type Error = Error;
  type Future = Ready<Result<Self, Self::Error>>;
  type Config = ();

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let header = match req.headers().get("x-user-id")
      .and_then(|h| h.to_str().ok()) {
        Some(value) => value,
        None => return err(Error::BadRequest(
          "No user id provided".to_string()
        ))
    };
    match req.app_data::<web::Data<AppState>>() {
      Some(state) if state.admin.token.matches(header) => ok(AdminAccess),
      Some(_) => {
        warn!(
          "Invalid admin id on protected endpoint at {}",
          req.uri()
        );
        err(Error::Forbidden("Invalid admin id".to_string()))
      },
      // Can only happen if the app was assembled without
      // its state, which is a programming error:
      None => err(Error::InternalServerError(
        "Application state is missing".to_string()
      ))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn token_matches_exact_value_only() {
    let token = AccessToken::new("3b060115-3b91".to_string());
    assert!(token.matches("3b060115-3b91"));
    assert!(!token.matches("3b060115-3b92"));
    assert!(!token.matches("3b060115-3b91 "));
    assert!(!token.matches(""));
  }

  #[test]
  fn differing_lengths_never_match() {
    assert!(!constant_time_eq(b"abc", b"abcd"));
    assert!(!constant_time_eq(b"", b"a"));
    assert!(constant_time_eq(b"", b""));
  }

  #[test]
  fn password_check_uses_the_stored_value() {
    let secrets = AdminSecrets::new(
      "token".to_string(),
      "hunter2".to_string()
    );
    assert!(secrets.password_matches("hunter2"));
    assert!(!secrets.password_matches("hunter"));
  }
}
