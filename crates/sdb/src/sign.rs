// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Request canonicalization and HMAC-SHA1 signing.
//!
//! The signer and the service must derive byte-identical canonical strings
//! or the signature check fails server-side: keys in sorted order, keys and
//! values percent-encoded with the RFC 3986 unreserved set (space is `%20`,
//! never `+`).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

use crate::request::Request;

type HmacSha1 = Hmac<Sha1>;

/// Everything except ALPHA / DIGIT / "-" / "_" / "." / "~" is escaped.
const STRICT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, STRICT_ENCODE_SET).to_string()
}

pub(crate) fn canonical_query(req: &Request) -> String {
    req.iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Computes an authentication signature over a finished parameter set and
/// inserts it into the set. Implementations must not touch any other key.
pub trait Signer: Send + Sync {
    fn sign(&self, req: &mut Request) -> std::result::Result<(), String>;
}

/// Signature-version-2 signer: HMAC-SHA1 over
/// `POST\n<host>\n<path>\n<canonical query>`, base64-encoded into the
/// `Signature` parameter.
pub struct V2Signer {
    host: String,
    path: String,
    secret: String,
}

impl V2Signer {
    pub fn new(
        host: impl Into<String>,
        path: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            secret: secret.into(),
        }
    }

    fn string_to_sign(&self, req: &Request) -> String {
        format!(
            "POST\n{}\n{}\n{}",
            self.host,
            self.path,
            canonical_query(req)
        )
    }
}

impl Signer for V2Signer {
    fn sign(&self, req: &mut Request) -> std::result::Result<(), String> {
        let mut mac = HmacSha1::new_from_slice(self.secret.as_bytes())
            .map_err(|err| format!("hmac key: {err}"))?;
        mac.update(self.string_to_sign(req).as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());
        req.insert("Signature".to_string(), signature);
        Ok(())
    }
}
