// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Flattening of typed operations into wire parameter maps.
//!
//! Every builder validates its arguments first and only then emits
//! parameters, so a failed call never reaches the network. The parameter
//! keys below are a bit-exact contract with the service; in particular, no
//! `Expected.*` key may appear unless the caller supplied preconditions,
//! because the presence of any such key switches the service into
//! conditional-write semantics.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::{DeleteUpdate, Precondition, PutUpdate, SelectToken};
use crate::validate::{validate_name, validate_precondition, validate_value};

/// The wire payload before signing: a flat parameter-name to
/// parameter-value mapping. Sorted iteration gives canonicalization its
/// stable key order.
pub type Request = BTreeMap<String, String>;

const MAX_UPDATES: usize = 256;
const MAX_BATCH_ITEMS: usize = 25;

fn validate_put_update(update: &PutUpdate) -> Result<()> {
    if validate_name("attribute name", &update.name).is_err() {
        return Err(Error::InvalidUpdate {
            part: "name",
            name: update.name.clone(),
            value: update.value.clone(),
        });
    }
    if validate_value("attribute value", &update.value).is_err() {
        return Err(Error::InvalidUpdate {
            part: "value",
            name: update.name.clone(),
            value: update.value.clone(),
        });
    }
    Ok(())
}

fn validate_updates(updates: &[PutUpdate]) -> Result<()> {
    if updates.is_empty() || updates.len() > MAX_UPDATES {
        return Err(Error::UpdateCount {
            count: updates.len(),
        });
    }
    for update in updates {
        validate_put_update(update)?;
    }
    Ok(())
}

fn push_updates(req: &mut Request, prefix: &str, updates: &[PutUpdate]) {
    for (i, update) in updates.iter().enumerate() {
        let n = i + 1;
        req.insert(format!("{prefix}Attribute.{n}.Name"), update.name.clone());
        req.insert(format!("{prefix}Attribute.{n}.Value"), update.value.clone());
        if update.replace {
            req.insert(format!("{prefix}Attribute.{n}.Replace"), "true".to_string());
        }
    }
}

fn push_preconditions(req: &mut Request, preconditions: &[Precondition]) -> Result<()> {
    for (i, precondition) in preconditions.iter().enumerate() {
        validate_precondition(precondition)?;
        let n = i + 1;
        req.insert(format!("Expected.{n}.Name"), precondition.name.clone());
        match (precondition.exists, &precondition.value) {
            (Some(exists), _) => {
                req.insert(format!("Expected.{n}.Exists"), exists.to_string());
            }
            (None, Some(value)) => {
                req.insert(format!("Expected.{n}.Value"), value.clone());
            }
            // Already rejected by validate_precondition.
            (None, None) => {}
        }
    }
    Ok(())
}

pub(crate) fn put_attributes(
    domain: &str,
    item: &str,
    updates: &[PutUpdate],
    preconditions: &[Precondition],
) -> Result<Request> {
    validate_name("item name", item)?;
    validate_updates(updates)?;

    let mut req = Request::new();
    req.insert("DomainName".to_string(), domain.to_string());
    req.insert("ItemName".to_string(), item.to_string());
    push_updates(&mut req, "", updates);
    push_preconditions(&mut req, preconditions)?;
    Ok(req)
}

pub(crate) fn batch_put_attributes(
    domain: &str,
    items: &BTreeMap<String, Vec<PutUpdate>>,
) -> Result<Request> {
    if items.is_empty() || items.len() > MAX_BATCH_ITEMS {
        return Err(Error::ItemCount { count: items.len() });
    }

    let mut req = Request::new();
    req.insert("DomainName".to_string(), domain.to_string());
    for (i, (item, updates)) in items.iter().enumerate() {
        validate_name("item name", item)?;
        validate_updates(updates)?;
        let n = i + 1;
        req.insert(format!("Item.{n}.ItemName"), item.clone());
        push_updates(&mut req, &format!("Item.{n}."), updates);
    }
    Ok(req)
}

pub(crate) fn get_attributes(
    domain: &str,
    item: &str,
    consistent_read: bool,
    attribute_names: &[&str],
) -> Result<Request> {
    validate_name("item name", item)?;

    let mut req = Request::new();
    req.insert("DomainName".to_string(), domain.to_string());
    req.insert("ItemName".to_string(), item.to_string());
    for (i, name) in attribute_names.iter().enumerate() {
        validate_name("attribute name", name)?;
        req.insert(format!("AttributeName.{}", i + 1), name.to_string());
    }
    if consistent_read {
        req.insert("ConsistentRead".to_string(), "true".to_string());
    }
    Ok(req)
}

fn validate_deletes(deletes: &[DeleteUpdate]) -> Result<()> {
    // An empty list is legal here: it deletes the item wholesale.
    if deletes.len() > MAX_UPDATES {
        return Err(Error::UpdateCount {
            count: deletes.len(),
        });
    }
    for delete in deletes {
        validate_name("attribute name", &delete.name)?;
        if let Some(value) = &delete.value {
            validate_value("attribute value", value)?;
        }
    }
    Ok(())
}

fn push_deletes(req: &mut Request, prefix: &str, deletes: &[DeleteUpdate]) {
    for (i, delete) in deletes.iter().enumerate() {
        let n = i + 1;
        req.insert(format!("{prefix}Attribute.{n}.Name"), delete.name.clone());
        if let Some(value) = &delete.value {
            req.insert(format!("{prefix}Attribute.{n}.Value"), value.clone());
        }
    }
}

pub(crate) fn delete_attributes(
    domain: &str,
    item: &str,
    deletes: &[DeleteUpdate],
    preconditions: &[Precondition],
) -> Result<Request> {
    validate_name("item name", item)?;
    validate_deletes(deletes)?;

    let mut req = Request::new();
    req.insert("DomainName".to_string(), domain.to_string());
    req.insert("ItemName".to_string(), item.to_string());
    push_deletes(&mut req, "", deletes);
    push_preconditions(&mut req, preconditions)?;
    Ok(req)
}

pub(crate) fn batch_delete_attributes(
    domain: &str,
    items: &BTreeMap<String, Vec<DeleteUpdate>>,
) -> Result<Request> {
    if items.is_empty() || items.len() > MAX_BATCH_ITEMS {
        return Err(Error::ItemCount { count: items.len() });
    }

    let mut req = Request::new();
    req.insert("DomainName".to_string(), domain.to_string());
    for (i, (item, deletes)) in items.iter().enumerate() {
        validate_name("item name", item)?;
        validate_deletes(deletes)?;
        let n = i + 1;
        req.insert(format!("Item.{n}.ItemName"), item.clone());
        push_deletes(&mut req, &format!("Item.{n}."), deletes);
    }
    Ok(req)
}

pub(crate) fn select(
    query: &str,
    consistent_read: bool,
    next_token: Option<&SelectToken>,
) -> Request {
    // The query and cursor are both pass-through: the service owns query
    // syntax, and the cursor is an uninterpreted byte sequence.
    let mut req = Request::new();
    req.insert("SelectExpression".to_string(), query.to_string());
    if consistent_read {
        req.insert("ConsistentRead".to_string(), "true".to_string());
    }
    if let Some(token) = next_token {
        req.insert("NextToken".to_string(), token.as_str().to_string());
    }
    req
}

pub(crate) fn domain_only(domain: &str) -> Result<Request> {
    validate_name("domain name", domain)?;
    let mut req = Request::new();
    req.insert("DomainName".to_string(), domain.to_string());
    Ok(req)
}
