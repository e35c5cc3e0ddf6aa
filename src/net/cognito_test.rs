use super::*;
use base64::prelude::*;

fn fake_id_token(claims: &serde_json::Value) -> String {
    let header = BASE64_URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","kid":"test"}"#);
    let payload = BASE64_URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[test]
fn initiate_auth_body_uses_password_flow() {
    let body = initiate_auth_body("client-1", "user@example.com", "longenough123");
    assert_eq!(
        body,
        serde_json::json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": "client-1",
            "AuthParameters": { "USERNAME": "user@example.com", "PASSWORD": "longenough123" },
        })
    );
}

#[test]
fn subject_from_id_token_reads_sub_claim() {
    let token = fake_id_token(&serde_json::json!({ "sub": "7f2c-41aa", "email": "user@example.com" }));
    assert_eq!(subject_from_id_token(&token), Some("7f2c-41aa".to_owned()));
}

#[test]
fn subject_from_id_token_rejects_garbage() {
    assert_eq!(subject_from_id_token("not-a-jwt"), None);
    assert_eq!(subject_from_id_token("a.!!!.c"), None);
    let no_sub = fake_id_token(&serde_json::json!({ "email": "user@example.com" }));
    assert_eq!(subject_from_id_token(&no_sub), None);
}

#[test]
fn successful_response_yields_identity_with_subject() {
    let token = fake_id_token(&serde_json::json!({ "sub": "sub-42" }));
    let body = serde_json::json!({
        "AuthenticationResult": { "IdToken": token, "AccessToken": "x", "ExpiresIn": 3600 },
        "ChallengeParameters": {},
    })
    .to_string();
    let identity = parse_initiate_auth_response(200, &body, "user@example.com").unwrap();
    assert_eq!(identity, Some(Identity::new("user@example.com", "sub-42")));
}

#[test]
fn successful_response_without_id_token_keeps_subject_empty() {
    let body = r#"{"AuthenticationResult":{"AccessToken":"x"}}"#;
    let identity = parse_initiate_auth_response(200, body, "user@example.com").unwrap();
    assert_eq!(identity, Some(Identity::new("user@example.com", "")));
}

#[test]
fn challenge_response_is_an_error() {
    let body = r#"{"ChallengeName":"SOFTWARE_TOKEN_MFA","Session":"s"}"#;
    let err = parse_initiate_auth_response(200, body, "user@example.com").unwrap_err();
    assert_eq!(err, AuthError::ChallengeRequired("SOFTWARE_TOKEN_MFA".to_owned()));
}

#[test]
fn empty_success_body_is_an_empty_result() {
    assert_eq!(parse_initiate_auth_response(200, "{}", "user@example.com"), Ok(None));
}

#[test]
fn unreadable_success_body_is_malformed() {
    let err = parse_initiate_auth_response(200, "<html>", "user@example.com").unwrap_err();
    assert!(matches!(err, AuthError::Malformed(_)));
}

#[test]
fn rejection_carries_provider_message() {
    let body = r#"{"__type":"NotAuthorizedException","message":"Incorrect username or password."}"#;
    let err = parse_initiate_auth_response(400, body, "user@example.com").unwrap_err();
    assert_eq!(err, AuthError::rejected("Incorrect username or password."));
    assert_eq!(err.to_string(), "Incorrect username or password.");
}

#[test]
fn rejection_accepts_capitalized_message_field() {
    let body = r#"{"__type":"com.amazonaws#UserNotFoundException","Message":"User does not exist."}"#;
    let err = parse_initiate_auth_response(400, body, "user@example.com").unwrap_err();
    assert_eq!(err, AuthError::rejected("User does not exist."));
}

#[test]
fn rejection_without_body_has_empty_message() {
    let err = parse_initiate_auth_response(503, "", "user@example.com").unwrap_err();
    assert_eq!(err, AuthError::rejected(""));
}

#[tokio::test]
async fn unconfigured_authenticator_fails_without_request() {
    let authenticator = CognitoAuthenticator::new(AuthConfig::default());
    let err = authenticator
        .authenticate("user@example.com", "longenough123")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::NotConfigured);
}
