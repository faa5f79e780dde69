// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::conn::{Clock, Conn, HttpResponse, HttpTransport};
use crate::db::SimpleDbClient;
use crate::domain::Domain;
use crate::error::TransportError;
use crate::request::Request;
use crate::sign::V2Signer;
use crate::types::AccessKey;

/// Transport double: records every request it is handed and answers with a
/// canned response (or a canned failure).
pub struct StubTransport {
    response: Option<HttpResponse>,
    failure: Option<String>,
    requests: Mutex<Vec<Request>>,
}

impl StubTransport {
    pub fn with_status(status: u16, body: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            response: Some(HttpResponse {
                status,
                body: body.to_vec(),
            }),
            failure: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: None,
            failure: Some(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn last_request(&self) -> Option<Request> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl HttpTransport for StubTransport {
    fn send(&self, req: &Request) -> std::result::Result<HttpResponse, TransportError> {
        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }
        self.requests.lock().unwrap().push(req.clone());
        Ok(self.response.clone().expect("stub has no response"))
    }
}

/// Deterministic clock for stable signatures.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2009, 2, 1, 12, 53, 20).unwrap())
}

pub fn test_conn(transport: Arc<StubTransport>) -> Conn {
    let key = AccessKey::new("AKID", "uV3F3YluFJax1cknvbcGwgjvx4QpvB+leU8dUj2o");
    let signer = V2Signer::new("sdb.amazonaws.com", "/", key.secret.clone());
    Conn::new(key, transport, Box::new(signer), Box::new(fixed_clock()))
}

pub fn test_client(transport: Arc<StubTransport>) -> SimpleDbClient {
    SimpleDbClient::with_conn(test_conn(transport))
}

pub fn test_domain(name: &str, transport: Arc<StubTransport>) -> Domain {
    Domain::new(name.to_string(), Arc::new(test_conn(transport)))
}
