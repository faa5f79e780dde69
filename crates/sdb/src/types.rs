// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Credentials for the service.
///
/// Constructed once and shared by every connection; neither field is
/// validated locally (a garbled key id is rejected by the service, not by
/// the client).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessKey {
    pub id: String,
    pub secret: String,
}

impl AccessKey {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    /// Reads `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, returning `None`
    /// when either is unset.
    pub fn from_env() -> Option<Self> {
        let id = std::env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret = std::env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        Some(Self::new(id, secret))
    }
}

/// A (name, value) pair possessed by an item. An item may hold several
/// attributes with the same name, but never the same (name, value) pair
/// twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single attribute write. `replace` decides whether the write overwrites
/// every existing value for `name` or adds one more value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutUpdate {
    pub name: String,
    pub value: String,
    pub replace: bool,
}

impl PutUpdate {
    pub fn add(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            replace: false,
        }
    }

    pub fn replace(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            replace: true,
        }
    }
}

/// A single attribute delete. `value: None` removes every value held for
/// `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUpdate {
    pub name: String,
    pub value: Option<String>,
}

impl DeleteUpdate {
    pub fn all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A conditional-write guard. Exactly one of `exists` / `value` must be
/// set: "the attribute must (not) exist" or "the attribute must currently
/// equal this value".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precondition {
    pub name: String,
    pub exists: Option<bool>,
    pub value: Option<String>,
}

impl Precondition {
    pub fn exists(name: impl Into<String>, exists: bool) -> Self {
        Self {
            name: name.into(),
            exists: Some(exists),
            value: None,
        }
    }

    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exists: None,
            value: Some(value.into()),
        }
    }
}

/// Opaque continuation cursor returned by Select when further results
/// exist. Pass it back unmodified to resume; it is never parsed or altered
/// by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectToken(pub(crate) String);

impl SelectToken {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of Select results: matched items with their attributes, plus
/// the cursor for the next page when the result set was cut off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectResult {
    pub items: BTreeMap<String, Vec<Attribute>>,
    pub next_token: Option<SelectToken>,
}
