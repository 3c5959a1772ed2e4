// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Coinbase Developer Platform API credentials and ES256 request token signing.

use std::fmt::Debug;

use aws_lc_rs::{
    rand::SystemRandom,
    signature::{ECDSA_P256_SHA256_FIXED_SIGNING, EcdsaKeyPair},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;
use zeroize::ZeroizeOnDrop;

use super::consts::{JWT_EXPIRY_SECS, JWT_ISSUER};

const PEM_TAG_SEC1: &str = "EC PRIVATE KEY";
const PEM_TAG_PKCS8: &str = "PRIVATE KEY";

/// Errors raised while loading an API key or signing a request token.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Invalid PEM private key: {0}")]
    InvalidPem(String),
    #[error("Unsupported private key type '{0}', expected EC PRIVATE KEY or PRIVATE KEY")]
    UnsupportedKeyType(String),
    #[error("Private key rejected: {0}")]
    KeyRejected(String),
    #[error("Failed to sign request token")]
    Signing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyEncoding {
    Sec1,
    Pkcs8,
}

/// Coinbase API credentials for signing requests.
///
/// The API secret is an EC P-256 private key in PEM form, either SEC1 (`EC PRIVATE KEY`) or
/// PKCS#8 (`PRIVATE KEY`). Key material is zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Credential {
    #[zeroize(skip)]
    pub api_key: String,
    #[zeroize(skip)]
    encoding: KeyEncoding,
    private_key: Box<[u8]>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Credential))
            .field("api_key", &self.api_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Credential {
    /// Creates a new [`Credential`] from an API key name and a PEM encoded private key.
    ///
    /// Literal `\n` escape sequences in `api_secret` are expanded to newlines first, so keys
    /// copied verbatim into a single-line environment variable still load.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is not PEM, is not an EC private key, or is rejected as
    /// a P-256 signing key.
    pub fn new(api_key: impl Into<String>, api_secret: &str) -> Result<Self, CredentialError> {
        let expanded = api_secret.trim().replace("\\n", "\n");
        let pem = pem::parse(expanded).map_err(|e| CredentialError::InvalidPem(e.to_string()))?;

        let encoding = match pem.tag() {
            PEM_TAG_SEC1 => KeyEncoding::Sec1,
            PEM_TAG_PKCS8 => KeyEncoding::Pkcs8,
            other => return Err(CredentialError::UnsupportedKeyType(other.to_string())),
        };

        let credential = Self {
            api_key: api_key.into(),
            encoding,
            private_key: pem.into_contents().into_boxed_slice(),
        };

        // Fail at construction rather than on the first request
        credential.key_pair()?;

        Ok(credential)
    }

    fn key_pair(&self) -> Result<EcdsaKeyPair, CredentialError> {
        let alg = &ECDSA_P256_SHA256_FIXED_SIGNING;
        let result = match self.encoding {
            KeyEncoding::Sec1 => EcdsaKeyPair::from_private_key_der(alg, &self.private_key),
            KeyEncoding::Pkcs8 => EcdsaKeyPair::from_pkcs8(alg, &self.private_key),
        };
        result.map_err(|e| CredentialError::KeyRejected(e.to_string()))
    }

    /// Generates a signed bearer token for a single request.
    ///
    /// The token binds the HTTP `method`, `host` and `path` of the request and is valid for
    /// [`JWT_EXPIRY_SECS`] seconds from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key cannot produce a signature.
    pub fn generate_jwt(
        &self,
        method: &str,
        host: &str,
        path: &str,
    ) -> Result<String, CredentialError> {
        self.generate_jwt_at(method, host, path, Utc::now().timestamp())
    }

    fn generate_jwt_at(
        &self,
        method: &str,
        host: &str,
        path: &str,
        now: i64,
    ) -> Result<String, CredentialError> {
        let header = json!({
            "alg": "ES256",
            "kid": self.api_key,
            "nonce": Uuid::new_v4().simple().to_string(),
            "typ": "JWT",
        });
        let claims = json!({
            "sub": self.api_key,
            "iss": JWT_ISSUER,
            "nbf": now,
            "exp": now + JWT_EXPIRY_SECS,
            "uri": format!("{method} {host}{path}"),
        });

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(claims.to_string()),
        );

        let signature = self
            .key_pair()?
            .sign(&SystemRandom::new(), signing_input.as_bytes())
            .map_err(|_| CredentialError::Signing)?;

        Ok(format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(signature.as_ref())
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
