use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures::future::{ok, Either, Ready};
use std::task::{Context, Poll};

// TLS terminates at the reverse proxy, so "being https" is
// what ConnectionInfo says after looking at
// X-Forwarded-Proto. Plain http traffic gets a permanent
// redirect to the https equivalent before any routing,
// local development traffic is left alone.
pub struct RedirectHttps;

impl<S, B> Transform<S> for RedirectHttps
where
  S: Service<Request = ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
  S::Future: 'static,
{
  type Request = ServiceRequest;
  type Response = ServiceResponse<B>;
  type Error = Error;
  type InitError = ();
  type Transform = RedirectHttpsMiddleware<S>;
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ok(RedirectHttpsMiddleware { service })
  }
}

pub struct RedirectHttpsMiddleware<S> {
  service: S
}

impl<S, B> Service for RedirectHttpsMiddleware<S>
where
  S: Service<Request = ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
  S::Future: 'static,
{
  type Request = ServiceRequest;
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = Either<S::Future, Ready<Result<Self::Response, Self::Error>>>;

  fn poll_ready(
    &mut self,
    cx: &mut Context<'_>
  ) -> Poll<Result<(), Self::Error>> {
    self.service.poll_ready(cx)
  }

  fn call(&mut self, req: ServiceRequest) -> Self::Future {
    // The ConnectionInfo borrow has to end before the
    // request can be moved anywhere:
    let (is_https, host) = {
      let info = req.connection_info();
      (info.scheme() == "https", info.host().to_string())
    };
    if is_https || is_localhost(&host) {
      Either::Left(self.service.call(req))
    } else {
      let target = format!("https://{}{}", host, req.uri());
      Either::Right(ok(req.into_response(
        HttpResponse::MovedPermanently()
          .header(header::LOCATION, target)
          .finish()
          .into_body()
      )))
    }
  }
}

fn is_localhost(host: &str) -> bool {
  host == "localhost" || host.starts_with("localhost:")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn localhost_is_exempt_with_or_without_port() {
    assert!(is_localhost("localhost"));
    assert!(is_localhost("localhost:8081"));
    assert!(!is_localhost("localhost.example.org"));
    assert!(!is_localhost("example.org"));
  }
}
