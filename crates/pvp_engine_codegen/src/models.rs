//! JSON deserialization structures for the type chart data file.

use serde::Deserialize;
use std::collections::HashMap;

/// One defending type's row: attacker name -> damage code.
///
/// Codes: 0 = neutral, 1 = super effective, 2 = resisted, 3 = double resisted.
#[derive(Deserialize)]
pub struct TypeChartEntry {
    #[serde(rename = "damageTaken")]
    pub damage_taken: HashMap<String, u8>,
}
