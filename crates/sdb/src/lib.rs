// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Rust client for a SimpleDB-style hosted key-value/query store.
//!
//! Exposes a synchronous signed-request connection, validated typed domain
//! operations (put/get/delete and their batch forms), and Select paging
//! over an opaque continuation cursor.
//!
//! Every operation validates its arguments before anything touches the
//! network, the connection never mutates a caller's request map, and the
//! time source, signer, and HTTP transport are all injectable for
//! deterministic tests.
//!
//! ```no_run
//! use sdb::{AccessKey, PutUpdate, Region, SimpleDb, SimpleDbClient};
//!
//! # fn main() -> sdb::Result<()> {
//! let key = AccessKey::from_env().expect("credentials not set");
//! let db = SimpleDbClient::new(Region::US_EAST_1, key);
//!
//! let domain = db.open_domain("tacos")?;
//! domain.put_attributes(
//!     "al_pastor",
//!     &[PutUpdate::add("salsa", "verde")],
//!     &[],
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod conn;
pub mod db;
pub mod domain;
pub mod error;
pub mod region;
pub mod request;
pub mod sign;
pub mod transport;
pub mod types;

mod response;
mod validate;

#[cfg(test)]
mod test_util;

pub use crate::conn::{Clock, Conn, HttpResponse, HttpTransport, SystemClock};
pub use crate::db::{SimpleDb, SimpleDbClient};
pub use crate::domain::Domain;
pub use crate::error::{Error, Result, TransportError};
pub use crate::region::Region;
pub use crate::request::Request;
pub use crate::sign::{Signer, V2Signer};
pub use crate::transport::UreqTransport;
pub use crate::types::{
    AccessKey, Attribute, DeleteUpdate, Precondition, PutUpdate, SelectResult, SelectToken,
};
