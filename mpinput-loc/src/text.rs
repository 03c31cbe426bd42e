//! Length limits for the two text columns.

use std::borrow::Cow;

use log::warn;
use serde::{Deserialize, Serialize};

use mpinput_core::PackageError;

pub const LABEL_WIDTH: usize = 40;
pub const GROUP_NAME_WIDTH: usize = 16;

/// What to do with text longer than its column allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPolicy {
    /// Cut at the last char boundary within the limit.
    #[default]
    Truncate,
    /// Fail with `PackageError::TextTooLong`.
    Reject,
}

impl TextPolicy {
    pub fn apply<'a>(
        &self,
        field: &'static str,
        value: &'a str,
        max: usize,
    ) -> Result<Cow<'a, str>, PackageError> {
        if value.len() <= max {
            return Ok(Cow::Borrowed(value));
        }
        match self {
            TextPolicy::Reject => Err(PackageError::TextTooLong {
                field,
                value: value.to_string(),
                max,
            }),
            TextPolicy::Truncate => {
                let mut end = max;
                while !value.is_char_boundary(end) {
                    end -= 1;
                }
                warn!("Truncating {} '{}' to {} bytes", field, value, max);
                Ok(Cow::Owned(value[..end].to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        let out = TextPolicy::Reject.apply("label", "well-1", LABEL_WIDTH).unwrap();
        assert!(matches!(out, Cow::Borrowed("well-1")));
    }

    #[test]
    fn truncate_cuts_to_width() {
        let out = TextPolicy::Truncate
            .apply("group name", "a-very-long-group-name", GROUP_NAME_WIDTH)
            .unwrap();
        assert_eq!(out, "a-very-long-grou");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        // 'é' is two bytes; a cut at byte 2 would split it.
        let out = TextPolicy::Truncate.apply("label", "aé", 2).unwrap();
        assert_eq!(out, "a");
    }

    #[test]
    fn reject_reports_field_and_limit() {
        let err = TextPolicy::Reject
            .apply("group name", "a-very-long-group-name", GROUP_NAME_WIDTH)
            .unwrap_err();
        assert!(matches!(
            err,
            PackageError::TextTooLong { field: "group name", max: 16, .. }
        ));
    }
}
