//! Core damage formula.
//!
//! `floor(0.5 * power * attack / defense * stab * effectiveness * 1.3) + 1`
//!
//! Every hit deals at least 1 damage. Inputs that would make the product
//! non-finite or negative degrade to that floor instead of panicking.

/// Flat bonus applied to every trainer-battle hit.
pub const PVP_BONUS: f64 = 1.3;

/// Same-type attack bonus.
pub const STAB_BONUS: f64 = 1.2;

/// Damage dealt by a hit with all multipliers already folded in.
///
/// `attack` and `defense` are effective stats after stage multipliers.
#[inline]
pub fn calculate_damage(power: u16, attack: f64, defense: f64, stab: f64, effectiveness: f64) -> u16 {
    let raw = 0.5 * power as f64 * (attack / defense) * stab * effectiveness * PVP_BONUS;
    if !raw.is_finite() || raw <= 0.0 {
        return 1;
    }
    (raw.floor().min((u16::MAX - 1) as f64) as u16) + 1
}
