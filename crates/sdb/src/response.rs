// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Decoding of service response bodies.
//!
//! The service answers with small, flat XML documents. This is not a
//! general-purpose XML mapper; it walks exactly the elements the two read
//! operations produce and ignores everything else (request ids, box-usage
//! metadata, namespace noise).

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::types::{Attribute, SelectResult, SelectToken};

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Name,
    Value,
    NextToken,
}

fn xml_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> Error {
    Error::invalid_response(format!(
        "xml error at byte {}: {err}",
        reader.buffer_position()
    ))
}

/// Decodes the attribute list of a `GetAttributes` response body.
pub(crate) fn parse_attributes(body: &[u8]) -> Result<Vec<Attribute>> {
    let mut reader = Reader::from_reader(body);

    let mut attributes = Vec::new();
    let mut field: Option<Field> = None;
    let mut name = String::new();
    let mut value = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Attribute" => {
                    name.clear();
                    value.clear();
                }
                b"Name" => field = Some(Field::Name),
                b"Value" => field = Some(Field::Value),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|err| xml_error(&reader, err))?;
                match field {
                    Some(Field::Name) => name.push_str(&text),
                    Some(Field::Value) => value.push_str(&text),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Attribute" => attributes.push(Attribute {
                    name: std::mem::take(&mut name),
                    value: std::mem::take(&mut value),
                }),
                b"Name" | b"Value" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(&reader, err)),
            _ => {}
        }
    }

    Ok(attributes)
}

/// Decodes a `Select` response body into items, their attributes, and the
/// continuation cursor when one was returned. The cursor text is kept
/// verbatim.
pub(crate) fn parse_select(body: &[u8]) -> Result<SelectResult> {
    let mut reader = Reader::from_reader(body);

    let mut result = SelectResult::default();
    let mut field: Option<Field> = None;
    let mut in_attribute = false;
    let mut item_name = String::new();
    let mut current = Vec::new();
    let mut name = String::new();
    let mut value = String::new();
    let mut token = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Item" => {
                    item_name.clear();
                    current.clear();
                }
                b"Attribute" => {
                    in_attribute = true;
                    name.clear();
                    value.clear();
                }
                b"Name" => field = Some(Field::Name),
                b"Value" => field = Some(Field::Value),
                b"NextToken" => field = Some(Field::NextToken),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|err| xml_error(&reader, err))?;
                match field {
                    Some(Field::Name) if in_attribute => name.push_str(&text),
                    Some(Field::Name) => item_name.push_str(&text),
                    Some(Field::Value) => value.push_str(&text),
                    Some(Field::NextToken) => token.push_str(&text),
                    None => {}
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Attribute" => {
                    in_attribute = false;
                    current.push(Attribute {
                        name: std::mem::take(&mut name),
                        value: std::mem::take(&mut value),
                    });
                }
                b"Item" => {
                    result
                        .items
                        .entry(std::mem::take(&mut item_name))
                        .or_default()
                        .append(&mut current);
                }
                b"Name" | b"Value" | b"NextToken" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(&reader, err)),
            _ => {}
        }
    }

    if !token.is_empty() {
        result.next_token = Some(SelectToken(token));
    }

    Ok(result)
}
