use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

pub const KEY_ID: &str = "test-key";
pub const SECRET: &[u8] = b"jokes-test-signing-secret-0123456789";
pub const ISSUER: &str = "https://jokes.test.auth0.com/";
pub const AUDIENCE: &str = "https://jokes.api";

pub fn jwks_document() -> Value {
    json!({
        "keys": [{
            "kty": "oct",
            "kid": KEY_ID,
            "alg": "HS256",
            "k": URL_SAFE_NO_PAD.encode(SECRET),
        }]
    })
}

pub fn claims(sub: &str) -> Value {
    json!({
        "sub": sub,
        "iss": ISSUER,
        "aud": [AUDIENCE, "https://jokes.test.auth0.com/userinfo"],
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 600,
    })
}

pub fn sign(claims: &Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = kid.map(str::to_string);
    encode(&header, claims, &EncodingKey::from_secret(SECRET)).unwrap()
}
