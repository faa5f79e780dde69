// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use crate::conn::Conn;
use crate::domain::Domain;
use crate::error::Result;
use crate::region::Region;
use crate::request;
use crate::response;
use crate::types::{AccessKey, SelectResult, SelectToken};
use crate::validate;

/// An authenticated handle on the service: domain lifecycle plus Select.
///
/// This is the one dynamic seam in the client; everything below it is
/// concrete.
pub trait SimpleDb: Send + Sync {
    /// Returns a handle for a domain assumed to already exist on the
    /// service. No network call is made; a missing domain surfaces on the
    /// first real operation.
    fn open_domain(&self, name: &str) -> Result<Domain>;

    /// Creates a domain. Creating a domain that already exists is a no-op
    /// on the service side.
    fn create_domain(&self, name: &str) -> Result<()>;

    /// Deletes a domain and everything in it.
    fn delete_domain(&self, name: &str) -> Result<()>;

    /// Runs a query. `next_token` resumes a previous result set; pass the
    /// token back exactly as it was returned.
    fn select(
        &self,
        query: &str,
        consistent_read: bool,
        next_token: Option<&SelectToken>,
    ) -> Result<SelectResult>;
}

/// The concrete client, bound to one connection.
pub struct SimpleDbClient {
    conn: Arc<Conn>,
}

impl SimpleDbClient {
    pub fn new(region: Region, key: AccessKey) -> Self {
        Self::with_conn(Conn::for_region(region, key))
    }

    /// Builds a client over an explicit connection, e.g. one with injected
    /// collaborators.
    pub fn with_conn(conn: Conn) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }
}

impl SimpleDb for SimpleDbClient {
    fn open_domain(&self, name: &str) -> Result<Domain> {
        // Validation only; existence is the service's call.
        validate::validate_name("domain name", name)?;
        Ok(Domain::new(name.to_string(), Arc::clone(&self.conn)))
    }

    fn create_domain(&self, name: &str) -> Result<()> {
        let req = request::domain_only(name)?;
        self.conn.send_request(&req)?;
        Ok(())
    }

    fn delete_domain(&self, name: &str) -> Result<()> {
        let req = request::domain_only(name)?;
        self.conn.send_request(&req)?;
        Ok(())
    }

    fn select(
        &self,
        query: &str,
        consistent_read: bool,
        next_token: Option<&SelectToken>,
    ) -> Result<SelectResult> {
        let req = request::select(query, consistent_read, next_token);
        let body = self.conn.send_request(&req)?;
        response::parse_select(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{test_client, StubTransport};

    #[test]
    fn open_domain_validates_but_does_not_send() {
        let transport = StubTransport::with_status(200, b"ok");
        let db = test_client(Arc::clone(&transport));

        let domain = db.open_domain("taco").unwrap();
        assert_eq!(domain.name(), "taco");
        assert!(transport.last_request().is_none());

        assert!(db.open_domain("").is_err());
    }

    #[test]
    fn create_domain_sends_domain_name() {
        let transport = StubTransport::with_status(200, b"<CreateDomainResponse/>");
        let db = test_client(Arc::clone(&transport));

        db.create_domain("taco").unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent["DomainName"], "taco");
    }

    #[test]
    fn select_round_trips_the_cursor_verbatim() {
        let page1 = br#"<SelectResponse><SelectResult>
  <Item><Name>i0</Name><Attribute><Name>a</Name><Value>1</Value></Attribute></Item>
  <NextToken>cursor-with/slashes==</NextToken>
</SelectResult></SelectResponse>"#;

        let transport = StubTransport::with_status(200, page1);
        let db = test_client(Arc::clone(&transport));

        let result = db.select("select * from D", true, None).unwrap();
        let first = transport.last_request().unwrap();
        assert_eq!(first["SelectExpression"], "select * from D");
        assert_eq!(first["ConsistentRead"], "true");
        assert!(!first.contains_key("NextToken"));

        let token = result.next_token.expect("expected a continuation token");
        db.select("select * from D", true, Some(&token)).unwrap();
        let second = transport.last_request().unwrap();
        assert_eq!(second["NextToken"], "cursor-with/slashes==");
    }

    #[test]
    fn select_without_token_terminates_paging() {
        let body = br#"<SelectResponse><SelectResult/></SelectResponse>"#;
        let transport = StubTransport::with_status(200, body);
        let db = test_client(transport);

        let result = db.select("select * from D", false, None).unwrap();
        assert!(result.items.is_empty());
        assert!(result.next_token.is_none());
    }

    #[test]
    fn server_error_propagates_from_select() {
        let transport = StubTransport::with_status(400, b"InvalidQueryExpression");
        let db = test_client(transport);

        let msg = db
            .select("selec * form D", false, None)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("InvalidQueryExpression"));
    }
}
