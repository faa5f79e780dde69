// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

//! Argument validation shared by every operation.
//!
//! Item names, attribute names, and attribute values are all held to the
//! same rule: at most 1024 bytes, containing only characters legal in XML
//! 1.0 character data. Violations are reported before any network call,
//! with the offending literal echoed so a bad entry can be found inside a
//! batch.

use crate::error::{Error, Result};
use crate::types::Precondition;

pub(crate) const MAX_VALUE_BYTES: usize = 1024;

/// Characters legal in XML 1.0 character data: tab, LF, CR, and the
/// Unicode scalar values U+0020..=U+D7FF, U+E000..=U+FFFD,
/// U+10000..=U+10FFFF.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{0020}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || ('\u{10000}'..='\u{10FFFF}').contains(&c)
}

fn is_legal(value: &str) -> bool {
    value.len() <= MAX_VALUE_BYTES && value.chars().all(is_xml_char)
}

/// Validates a name-position argument (item name, attribute name, domain
/// name). Names must additionally be non-empty; the empty string fails
/// with the same message as a charset violation.
pub(crate) fn validate_name(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || !is_legal(value) {
        return Err(Error::invalid_value(field, value));
    }
    Ok(())
}

/// Validates a value-position argument. Unlike names, the empty string is
/// a legal attribute value.
pub(crate) fn validate_value(field: &'static str, value: &str) -> Result<()> {
    if !is_legal(value) {
        return Err(Error::invalid_value(field, value));
    }
    Ok(())
}

/// Checks that exactly one of `exists` / `value` is set and that the
/// operands themselves are legal.
pub(crate) fn validate_precondition(precondition: &Precondition) -> Result<()> {
    validate_name("attribute name", &precondition.name)?;

    match (precondition.exists.is_some(), precondition.value.as_deref()) {
        (true, Some(_)) => Err(Error::PreconditionTwoOperands {
            name: precondition.name.clone(),
        }),
        (false, None) => Err(Error::PreconditionMissingOperand {
            name: precondition.name.clone(),
        }),
        (false, Some(value)) => validate_value("attribute value", value),
        (true, None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_reject_empty() {
        let err = validate_name("item name", "").unwrap_err();
        assert_eq!(err.to_string(), "Invalid item name: ");
    }

    #[test]
    fn values_accept_empty() {
        assert!(validate_value("attribute value", "").is_ok());
    }

    #[test]
    fn control_characters_rejected_and_echoed() {
        let err = validate_name("attribute name", "taco\u{1}\u{2}").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid attribute name"));
        assert!(msg.contains("taco\u{1}\u{2}"));
    }

    #[test]
    fn xml_whitespace_is_legal() {
        assert!(validate_value("attribute value", "a\tb\nc\rd").is_ok());
    }

    #[test]
    fn boundary_code_points() {
        assert!(validate_value("attribute value", "\u{D7FF}\u{E000}\u{FFFD}").is_ok());
        assert!(validate_value("attribute value", "\u{10000}\u{10FFFF}").is_ok());
        assert!(validate_value("attribute value", "\u{FFFE}").is_err());
        assert!(validate_value("attribute value", "\u{1F}").is_err());
    }

    #[test]
    fn length_limit_is_in_bytes() {
        let max = "x".repeat(MAX_VALUE_BYTES);
        assert!(validate_value("attribute value", &max).is_ok());

        let over = "x".repeat(MAX_VALUE_BYTES + 1);
        assert!(validate_value("attribute value", &over).is_err());

        // 513 two-byte characters is 1026 bytes even though it is only 513
        // characters.
        let multibyte = "é".repeat(513);
        assert!(validate_value("attribute value", &multibyte).is_err());
    }

    #[test]
    fn precondition_operand_rules() {
        let ok_exists = Precondition::exists("color", false);
        assert!(validate_precondition(&ok_exists).is_ok());

        let ok_value = Precondition::equals("color", "red");
        assert!(validate_precondition(&ok_value).is_ok());

        let neither = Precondition {
            name: "bar".to_string(),
            exists: None,
            value: None,
        };
        let err = validate_precondition(&neither).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("precondition"));
        assert!(msg.contains("bar"));
        assert!(msg.contains("missing operand"));

        let both = Precondition {
            name: "bar".to_string(),
            exists: Some(true),
            value: Some("red".to_string()),
        };
        let err = validate_precondition(&both).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("precondition"));
        assert!(msg.contains("bar"));
        assert!(msg.contains("has two operands"));
    }

    #[test]
    fn precondition_name_and_value_validated() {
        let bad_name = Precondition::exists("taco\u{1}", true);
        let msg = validate_precondition(&bad_name).unwrap_err().to_string();
        assert!(msg.contains("Invalid attribute name"));
        assert!(msg.contains("taco\u{1}"));

        let bad_value = Precondition::equals("color", "salsa\u{2}");
        let msg = validate_precondition(&bad_value).unwrap_err().to_string();
        assert!(msg.contains("Invalid attribute value"));
        assert!(msg.contains("salsa\u{2}"));
    }
}
