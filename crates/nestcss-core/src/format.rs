//! Stylesheet serialization.

use crate::flatten::FlatRule;

/// Serialize flat rules as `selector{declarations}` blocks with no separators.
pub fn format(rules: &[FlatRule]) -> String {
    rules.iter().map(FlatRule::to_string).collect()
}
