use super::common::*;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use chrono::{Duration, Utc};

use crate::workflows::accounts::domain::{Account, AccountId, Role};
use crate::workflows::accounts::session::bearer_token;
use crate::workflows::accounts::{
    hash_password, verify_password, SessionError, TokenAuthority, TokenError,
};

fn account() -> Account {
    Account {
        id: AccountId(42),
        full_name: "Asha Verma".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        organization: None,
        role: Role::Candidate,
        password_hash: String::new(),
        created_at: Utc::now(),
    }
}

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).expect("header"));
    headers
}

#[test]
fn password_hashes_are_salted_and_verifiable() {
    let first = hash_password("s3cret").expect("hash");
    let second = hash_password("s3cret").expect("hash");

    assert_ne!(first, second);
    assert!(verify_password("s3cret", &first).expect("verify"));
    assert!(!verify_password("S3cret", &first).expect("verify"));
}

#[test]
fn verify_rejects_malformed_hash() {
    assert!(verify_password("s3cret", "plaintext").is_err());
}

#[test]
fn token_round_trips_session_claims() {
    let authority = authority();
    let token = authority.issue(&account()).expect("token issued");

    let session = authority.verify(&token).expect("token verifies");

    assert_eq!(session.account_id, AccountId(42));
    assert_eq!(session.role, Role::Candidate);
}

#[test]
fn expired_token_is_reported_as_expired() {
    let authority = authority();
    let issued = Utc::now() - Duration::hours(48);
    let token = authority
        .issue_at(&account(), issued)
        .expect("token issued");

    assert!(matches!(authority.verify(&token), Err(TokenError::Expired)));
}

#[test]
fn token_signed_with_another_secret_is_invalid() {
    let foreign = TokenAuthority::new("another-secret-that-is-long-enough!!", 24);
    let token = foreign.issue(&account()).expect("token issued");

    assert!(matches!(authority().verify(&token), Err(TokenError::Invalid)));
    assert!(matches!(
        authority().verify("not.a.jwt"),
        Err(TokenError::Invalid)
    ));
}

#[test]
fn bearer_token_requires_bearer_scheme() {
    assert!(matches!(
        bearer_token(&HeaderMap::new()),
        Err(SessionError::MissingToken)
    ));
    assert!(matches!(
        bearer_token(&headers("Basic abc")),
        Err(SessionError::MalformedHeader)
    ));
    assert_eq!(bearer_token(&headers("Bearer abc.def")).expect("token"), "abc.def");
}

#[test]
fn authenticate_decodes_header_into_session() {
    let authority = authority();
    let token = authority.issue(&account()).expect("token issued");

    let session = authority
        .authenticate(&headers(&format!("Bearer {token}")))
        .expect("authenticated");

    assert_eq!(session.email, "asha@example.com");
}

#[test]
fn oversized_lifetime_fails_instead_of_panicking() {
    let authority = TokenAuthority::new(SECRET, u32::MAX);

    assert!(matches!(
        authority.issue(&account()),
        Err(TokenError::Signing(_))
    ));
}
