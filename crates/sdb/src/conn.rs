// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! The authenticated connection: auth-parameter injection, signing, and
//! response classification.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result, TransportError};
use crate::region::Region;
use crate::request::Request;
use crate::sign::{Signer, V2Signer};
use crate::transport::UreqTransport;
use crate::types::AccessKey;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Time source for request timestamps. Injected so signatures are
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Raw transport-level response: status code plus body bytes. A non-2xx
/// status is still a response, not a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Synchronous HTTP send of a signed parameter mapping. Timeouts,
/// cancellation, and retries all live behind this seam.
pub trait HttpTransport: Send + Sync {
    fn send(&self, req: &Request) -> std::result::Result<HttpResponse, TransportError>;
}

/// An authenticated connection to one service endpoint.
///
/// All collaborators are fixed at construction, so a `Conn` can be shared
/// freely across threads; building a request never mutates shared state.
pub struct Conn {
    key: AccessKey,
    transport: Arc<dyn HttpTransport>,
    signer: Box<dyn Signer>,
    clock: Box<dyn Clock>,
}

impl Conn {
    pub fn new(
        key: AccessKey,
        transport: Arc<dyn HttpTransport>,
        signer: Box<dyn Signer>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            key,
            transport,
            signer,
            clock,
        }
    }

    /// Wires up the default collaborators for a region: ureq transport,
    /// signature-version-2 signer, wall clock.
    pub fn for_region(region: Region, key: AccessKey) -> Self {
        let signer = V2Signer::new(region.host, "/", key.secret.clone());
        Self::new(
            key,
            Arc::new(UreqTransport::new(region)),
            Box::new(signer),
            Box::new(SystemClock),
        )
    }

    /// Signs and transmits `req`, returning the raw response body on a 200.
    ///
    /// The caller's map is never mutated: authentication parameters and the
    /// signature are added to a private copy, so a request value can be
    /// reused or shared across threads.
    pub fn send_request(&self, req: &Request) -> Result<Vec<u8>> {
        let mut signed = req.clone();
        signed.insert("AWSAccessKeyId".to_string(), self.key.id.clone());
        signed.insert(
            "Timestamp".to_string(),
            self.clock.now().format(TIMESTAMP_FORMAT).to_string(),
        );
        signed.insert("SignatureVersion".to_string(), "2".to_string());
        signed.insert("SignatureMethod".to_string(), "HmacSHA1".to_string());

        self.signer.sign(&mut signed).map_err(Error::Sign)?;

        debug!(params = signed.len(), "sending signed request");
        let resp = self
            .transport
            .send(&signed)
            .map_err(|source| Error::Send { source })?;

        if resp.status != 200 {
            return Err(Error::Server {
                status: resp.status,
                body: String::from_utf8_lossy(&resp.body).into_owned(),
            });
        }

        Ok(resp.body)
    }
}
