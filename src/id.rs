//! Prefixed ID generation for Hirebase payment entities and the
//! gateway-facing order identifier.
//!
//! Internal surrogate IDs use an `hb_` brand prefix so they can never be
//! confused with gateway-issued identifiers.
//!
//! Order identifiers are the external correlation key sent to the payment
//! gateway. The gateway imposes a 50-character hard limit and only accepts
//! a conservative character set, so the generator is bounded at every
//! segment: fixed `HB` prefix, the plan id reduced to alphanumerics and
//! truncated, a base-36 millisecond timestamp, and a random suffix taken
//! from a UUIDv4. Uniqueness relies on timestamp + randomness entropy, not
//! on any central coordination.

use uuid::Uuid;

/// Entity types that have prefixed surrogate IDs.
#[derive(Debug, Clone, Copy)]
pub enum EntityType {
    Plan,
    Payment,
}

impl EntityType {
    /// Returns the prefix for this entity type.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Plan => "hb_plan",
            Self::Payment => "hb_pay",
        }
    }

    /// Generates a new prefixed ID for this entity type.
    pub fn gen_id(&self) -> String {
        format!("{}_{}", self.prefix(), Uuid::new_v4().as_simple())
    }
}

/// Fixed literal prefix marking order identifiers as Hirebase-issued.
pub const ORDER_ID_PREFIX: &str = "HB";

/// Gateway hard limit on the order-id field.
pub const MAX_ORDER_ID_LEN: usize = 50;

/// Upper bound on the plan-derived segment.
const PLAN_SEGMENT_MAX: usize = 16;

/// Hex characters taken from the UUID for the random suffix (40 bits).
const RANDOM_SEGMENT_LEN: usize = 10;

/// Generate a gateway-safe order identifier for a checkout attempt.
///
/// The plan segment keeps only alphanumerics from `plan_id`; if nothing
/// survives the filter the segment is skipped entirely and the identifier
/// is still well-formed (prefix + timestamp + random).
pub fn generate_order_id(plan_id: &str) -> String {
    let plan_segment: String = plan_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(PLAN_SEGMENT_MAX)
        .collect();

    let timestamp = base36(chrono::Utc::now().timestamp_millis().max(0) as u64);

    let uuid = Uuid::new_v4().as_simple().to_string();
    let random = &uuid[..RANDOM_SEGMENT_LEN];

    let mut segments: Vec<&str> = vec![ORDER_ID_PREFIX];
    if !plan_segment.is_empty() {
        segments.push(&plan_segment);
    }
    segments.push(&timestamp);
    segments.push(random);

    segments.join("-")
}

/// Compact base-36 encoding (lowercase), used for the timestamp segment.
fn base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surrogate_id_format() {
        let id = EntityType::Payment.gen_id();
        assert!(id.starts_with("hb_pay_"));
        // hb_pay_ (7 chars) + 32 hex chars
        assert_eq!(id.len(), 39);
    }

    #[test]
    fn test_surrogate_ids_are_unique() {
        let a = EntityType::Plan.gen_id();
        let b = EntityType::Plan.gen_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_base36_round_values() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
    }

    #[test]
    fn test_order_id_has_prefix() {
        let id = generate_order_id("hb_plan_abc123");
        assert!(id.starts_with("HB-"));
    }

    #[test]
    fn test_order_id_strips_non_alphanumerics() {
        let id = generate_order_id("hb_plan_abc-123!");
        // Underscores, hyphens, punctuation never survive into the plan segment
        let plan_segment = id.split('-').nth(1).unwrap();
        assert!(plan_segment.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(plan_segment.starts_with("hbplan"));
    }

    #[test]
    fn test_order_id_empty_plan_segment_is_skipped() {
        let id = generate_order_id("---___!!!");
        assert!(id.starts_with("HB-"));
        assert!(!id.contains("--"));
        // prefix + timestamp + random = 3 segments
        assert_eq!(id.split('-').count(), 3);
    }
}
