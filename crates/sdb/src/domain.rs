// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::conn::Conn;
use crate::error::Result;
use crate::request;
use crate::response;
use crate::types::{Attribute, DeleteUpdate, Precondition, PutUpdate};

/// A handle on one named domain. Handles are cheap to clone and carry no
/// state beyond the name: two handles opened with the same name against
/// the same service observe the same item set.
#[derive(Clone)]
pub struct Domain {
    name: String,
    conn: Arc<Conn>,
}

impl Domain {
    pub(crate) fn new(name: String, conn: Arc<Conn>) -> Self {
        Self { name, conn }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes attributes to one item. `preconditions` turns the write
    /// conditional; an empty slice leaves the write unconditional.
    pub fn put_attributes(
        &self,
        item: &str,
        updates: &[PutUpdate],
        preconditions: &[Precondition],
    ) -> Result<()> {
        let req = request::put_attributes(&self.name, item, updates, preconditions)?;
        self.conn.send_request(&req)?;
        Ok(())
    }

    /// Writes attributes to up to 25 items in one round trip. Batch writes
    /// are always unconditional.
    pub fn batch_put_attributes(&self, items: &BTreeMap<String, Vec<PutUpdate>>) -> Result<()> {
        let req = request::batch_put_attributes(&self.name, items)?;
        self.conn.send_request(&req)?;
        Ok(())
    }

    /// Reads attributes for one item. An empty `attribute_names` slice
    /// reads them all; a non-existent item comes back as an empty list.
    pub fn get_attributes(
        &self,
        item: &str,
        consistent_read: bool,
        attribute_names: &[&str],
    ) -> Result<Vec<Attribute>> {
        let req = request::get_attributes(&self.name, item, consistent_read, attribute_names)?;
        let body = self.conn.send_request(&req)?;
        response::parse_attributes(&body)
    }

    /// Deletes attributes from one item. An empty `deletes` slice deletes
    /// the item wholesale.
    pub fn delete_attributes(
        &self,
        item: &str,
        deletes: &[DeleteUpdate],
        preconditions: &[Precondition],
    ) -> Result<()> {
        let req = request::delete_attributes(&self.name, item, deletes, preconditions)?;
        self.conn.send_request(&req)?;
        Ok(())
    }

    /// Deletes attributes from up to 25 items in one round trip.
    pub fn batch_delete_attributes(
        &self,
        items: &BTreeMap<String, Vec<DeleteUpdate>>,
    ) -> Result<()> {
        let req = request::batch_delete_attributes(&self.name, items)?;
        self.conn.send_request(&req)?;
        Ok(())
    }
}
