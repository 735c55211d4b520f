//! Order identifier generator properties: bounded length, gateway-safe
//! charset, and collision resistance under repeated generation.

use std::collections::HashSet;

use hirebase::id::{generate_order_id, MAX_ORDER_ID_LEN, ORDER_ID_PREFIX};

fn is_gateway_safe(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[test]
fn test_order_id_length_and_charset() {
    for plan_id in [
        "hb_plan_a1b2c3d4e5f6789012345678901234ab",
        "starter",
        "a-very-long-plan-identifier-with-lots-of-characters-beyond-any-bound",
        "",
    ] {
        let id = generate_order_id(plan_id);
        assert!(
            id.len() <= MAX_ORDER_ID_LEN,
            "order id too long ({}): {}",
            id.len(),
            id
        );
        assert!(is_gateway_safe(&id), "unsafe characters in order id: {}", id);
    }
}

#[test]
fn test_order_id_is_recognizable() {
    let id = generate_order_id("starter");
    assert!(id.starts_with(&format!("{}-", ORDER_ID_PREFIX)));
}

#[test]
fn test_order_id_empty_plan_still_well_formed() {
    let id = generate_order_id("!!!---");
    assert!(id.starts_with(&format!("{}-", ORDER_ID_PREFIX)));
    assert!(id.len() <= MAX_ORDER_ID_LEN);
    assert!(is_gateway_safe(&id));
    assert!(!id.contains("--"));
    assert!(!id.ends_with('-'));
}

#[test]
fn test_order_ids_do_not_collide() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let id = generate_order_id("hb_plan_a1b2c3d4e5f6789012345678901234ab");
        assert!(seen.insert(id.clone()), "duplicate order id generated: {}", id);
    }
}

#[test]
fn test_concurrent_generation_stays_unique() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| (0..500).map(|_| generate_order_id("starter")).collect::<Vec<_>>()))
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id.clone()), "duplicate order id across threads: {}", id);
        }
    }
}
