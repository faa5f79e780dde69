// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use std::io::Read;

use tracing::debug;

use crate::conn::{HttpResponse, HttpTransport};
use crate::error::TransportError;
use crate::region::Region;
use crate::request::Request;

/// Default transport: POSTs the signed parameters as a form-encoded body
/// over HTTPS. Non-2xx statuses are returned as responses so the
/// connection can classify them; only failures to exchange bytes at all
/// surface as transport errors.
pub struct UreqTransport {
    agent: ureq::Agent,
    url: String,
}

impl UreqTransport {
    pub fn new(region: Region) -> Self {
        Self::with_endpoint(format!("https://{}/", region.host))
    }

    /// Points the transport at an explicit URL, e.g. a local emulator.
    pub fn with_endpoint(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            url: url.into(),
        }
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, req: &Request) -> std::result::Result<HttpResponse, TransportError> {
        let form: Vec<(&str, &str)> = req
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();

        debug!(url = %self.url, "POST");
        match self.agent.post(&self.url).send_form(&form) {
            Ok(resp) => read_response(resp),
            Err(ureq::Error::Status(_, resp)) => read_response(resp),
            Err(err) => Err(Box::new(err)),
        }
    }
}

fn read_response(resp: ureq::Response) -> std::result::Result<HttpResponse, TransportError> {
    let status = resp.status();
    let mut body = Vec::new();
    resp.into_reader().read_to_end(&mut body)?;
    Ok(HttpResponse { status, body })
}
