//! Portfolio position-count cap
//!
//! A map-only variant of the planner's position-count stage, for call sites
//! that have symbol sizes but no price or NAV context.

/// Truncate a symbol→size book to the `max_positions` largest absolute sizes.
///
/// A book already within the cap is returned unchanged, in its original
/// order. Otherwise survivors are ordered largest-first, with equal sizes
/// keeping their relative input order.
pub fn cap_positions(targets: &[(String, i64)], max_positions: usize) -> Vec<(String, i64)> {
    if targets.len() <= max_positions {
        return targets.to_vec();
    }
    let mut ranked = targets.to_vec();
    ranked.sort_by(|a, b| b.1.abs().cmp(&a.1.abs()));
    ranked.truncate(max_positions);
    ranked
}
