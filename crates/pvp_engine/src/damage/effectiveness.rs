//! Type multipliers for a single hit.

use crate::effectiveness::{EffectivenessTable, TypePair};
use crate::types::Type;

use super::formula::STAB_BONUS;

/// STAB when the move shares a type with its user.
#[inline]
pub fn stab_multiplier(move_type: Type, attacker: TypePair) -> f64 {
    if attacker.contains(move_type) {
        STAB_BONUS
    } else {
        1.0
    }
}

/// Combined STAB and type-effectiveness multiplier.
#[inline]
pub fn move_multiplier(
    table: &EffectivenessTable,
    move_type: Type,
    attacker: TypePair,
    defender: TypePair,
) -> f64 {
    stab_multiplier(move_type, attacker) * table.multiplier(move_type, defender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stab() {
        let water_fairy = TypePair::new(Type::Water, Some(Type::Fairy));
        assert_eq!(stab_multiplier(Type::Water, water_fairy), 1.2);
        assert_eq!(stab_multiplier(Type::Fairy, water_fairy), 1.2);
        assert_eq!(stab_multiplier(Type::Ice, water_fairy), 1.0);
    }

    #[test]
    fn test_combined() {
        let table = EffectivenessTable::new();
        let water = TypePair::single(Type::Water);
        let fire = TypePair::single(Type::Fire);
        assert!((move_multiplier(&table, Type::Water, water, fire) - 1.92).abs() < 1e-12);
        assert!((move_multiplier(&table, Type::Fire, water, water) - 0.625).abs() < 1e-12);
    }
}
