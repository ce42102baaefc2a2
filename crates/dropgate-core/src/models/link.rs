//! Short-link domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable mapping from a short slug to a stored object.
///
/// `expires_at` is set once at creation and never extended; a past
/// `expires_at` makes the entry logically dead even before the cleanup
/// sweep physically removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Short opaque id, unique across live entries, used as the public
    /// `/r/{id}` path segment.
    pub id: String,
    /// Logical storage namespace.
    pub bucket: String,
    /// Key inside the blob store.
    pub object_key: String,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
}

impl LinkEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Payload of a self-contained signed link token.
///
/// Field names on the wire stay `b` / `k` / `exp` for compatibility with
/// links issued before the slug registry existed. Expiry is seconds since
/// epoch; validity derives purely from the HMAC tag and the clock, so a
/// token can never be revoked early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "b")]
    pub bucket: String,
    #[serde(rename = "k")]
    pub object_key: String,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl TokenPayload {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entry_expiry_is_inclusive() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let entry = LinkEntry {
            id: "abc123XY".to_string(),
            bucket: "dropgate".to_string(),
            object_key: "u/1-x-clip.mp4".to_string(),
            expires_at: at,
        };
        assert!(!entry.is_expired(at - chrono::Duration::seconds(1)));
        assert!(entry.is_expired(at));
        assert!(entry.is_expired(at + chrono::Duration::seconds(1)));
    }

    #[test]
    fn token_payload_uses_short_wire_names() {
        let payload = TokenPayload {
            bucket: "dropgate".to_string(),
            object_key: "u/1-x-a.png".to_string(),
            expires_at: 1_700_000_000,
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["b"], "dropgate");
        assert_eq!(json["k"], "u/1-x-a.png");
        assert_eq!(json["exp"], 1_700_000_000);
    }
}
