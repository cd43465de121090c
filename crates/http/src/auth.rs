//! Bearer-token extraction for the authenticated `/game/*` endpoints.
//!
//! Token validation happens in two tiers, matching the two distinct error
//! codes the API surface exposes: this extractor only checks the header's
//! *shape* (`InvalidToken` on failure); whether the token is bound to a
//! live player (`UnknownToken`) is checked downstream, inside the locked
//! manager, by each handler.

use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use packfinder_core::Error;
use packfinder_core::Token;
use std::future::Ready;
use std::future::ready;
use std::str::FromStr;

pub struct BearerToken(pub Token);

impl FromRequest for BearerToken {
    type Error = crate::errors::ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req).map(BearerToken).map_err(Into::into))
    }
}

fn extract(req: &HttpRequest) -> Result<Token, Error> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(Error::InvalidToken)?;
    let raw = header.strip_prefix("Bearer ").ok_or(Error::InvalidToken)?;
    Token::from_str(raw).map_err(|_| Error::InvalidToken)
}
