use tracing::warn;

use crate::error::ConfigError;
use crate::schema::NoticeRecord;

/// One malformed notice found while checking a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub notice_id: String,
    pub error: ConfigError,
}

/// Parses the JSON notice feed served by the content source: a single array
/// of notice records.
pub fn parse_feed(json: &str) -> serde_json::Result<Vec<NoticeRecord>> {
    serde_json::from_str(json)
}

/// Well-formedness findings for a loaded feed. Malformed notices are
/// reported and left in place; one bad notice must not block the rest of
/// the board.
pub fn check_feed(notices: &[NoticeRecord]) -> Vec<Finding> {
    notices
        .iter()
        .filter_map(|notice| match notice.well_formed() {
            Ok(()) => None,
            Err(error) => {
                warn!(notice_id = %notice.id, %error, "malformed notice in feed");
                Some(Finding {
                    notice_id: notice.id.clone(),
                    error,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {
            "id": "n1",
            "title": "Hack Night Sign-up",
            "description": "Monthly hack night.",
            "type": "Event",
            "priority": "high",
            "date": "2026-08-20",
            "author": "Events Team",
            "hasForm": true,
            "form": {
                "fields": [
                    {"id": "f1", "label": "T-shirt size", "type": "text", "required": true}
                ]
            }
        },
        {
            "id": "n2",
            "title": "Office Closed Friday",
            "description": "Back Monday.",
            "type": "Information",
            "priority": "low",
            "date": "2026-08-18",
            "author": "Admin",
            "hasForm": false
        },
        {
            "id": "n3",
            "title": "Broken Workshop",
            "description": "Feed defect: form-enabled, no schema.",
            "type": "Workshop",
            "priority": "medium",
            "date": "2026-08-10",
            "author": "Admin",
            "hasForm": true
        }
    ]"#;

    #[test]
    fn parses_a_mixed_feed() {
        let notices = parse_feed(FEED).unwrap();
        assert_eq!(notices.len(), 3);
        assert!(notices[0].has_form);
        assert!(!notices[1].has_form);
        assert!(notices[1].form.is_none());
    }

    #[test]
    fn findings_name_only_the_malformed_notices() {
        let notices = parse_feed(FEED).unwrap();
        let findings = check_feed(&notices);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].notice_id, "n3");
        assert_eq!(
            findings[0].error,
            ConfigError::MissingSchema {
                notice_id: "n3".to_string()
            }
        );
    }

    #[test]
    fn rejects_a_feed_that_is_not_an_array() {
        assert!(parse_feed(r#"{"notices": []}"#).is_err());
    }
}
