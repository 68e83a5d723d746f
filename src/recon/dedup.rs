//! Intent deduplication
//!
//! Several signal passes can emit intents for the same symbol. Only one may
//! reach the planner: the one with the largest absolute quantity, with the
//! first-seen intent winning ties. The survivor keeps the first-seen slot in
//! output order, which the ranking stage relies on for stable tie-breaks.

use super::TradeIntent;
use std::collections::HashMap;

/// Collapse duplicate symbols down to a single intent each.
///
/// Uses an explicit ordered accumulator plus a symbol index so first-seen-wins
/// is a stated rule rather than a property of map iteration order.
pub fn dedup_intents(intents: &[TradeIntent]) -> Vec<TradeIntent> {
    let mut out: Vec<TradeIntent> = Vec::with_capacity(intents.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(intents.len());

    for intent in intents {
        match index.get(intent.symbol.as_str()) {
            Some(&i) => {
                // Strict greater-than keeps the earlier intent on ties
                if intent.qty.abs() > out[i].qty.abs() {
                    out[i] = intent.clone();
                }
            }
            None => {
                index.insert(intent.symbol.as_str(), out.len());
                out.push(intent.clone());
            }
        }
    }

    out
}
