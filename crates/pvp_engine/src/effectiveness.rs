//! Expanded type-effectiveness table and type strength rankings.
//!
//! The generated base chart only covers single-type defenders. This module
//! expands it to every single and dual typing, keyed by a canonical
//! [`TypePair`], and derives an iterative offensive/defensive strength
//! ranking used for reporting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DataError;
use crate::types::{Type, TYPE_CHART};

/// Base multiplier matrix: `[defender][attacker]`.
pub type BaseMatrix = [[f64; Type::COUNT]; Type::COUNT];

/// Rounds of the strength iteration.
pub const STRENGTH_ROUNDS: usize = 30;

/// Damping toward the uniform distribution applied every round.
pub const STRENGTH_DAMPING: f64 = 0.85;

// ============================================================================
// Type pairs
// ============================================================================

/// A single type, or two distinct types stored in sorted order.
///
/// `TypePair::new(Flying, Some(Fire))` and `TypePair::new(Fire, Some(Flying))`
/// are the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePair {
    primary: Type,
    secondary: Option<Type>,
}

impl TypePair {
    /// Number of distinct keys: 18 singles + 153 unordered pairs.
    pub const COUNT: usize = Type::COUNT + Type::COUNT * (Type::COUNT - 1) / 2;

    pub const fn single(t: Type) -> Self {
        Self {
            primary: t,
            secondary: None,
        }
    }

    /// Canonicalize a typing. A repeated type collapses to a single type.
    pub fn new(first: Type, second: Option<Type>) -> Self {
        match second {
            Some(second) if second != first => {
                let (a, b) = if first < second {
                    (first, second)
                } else {
                    (second, first)
                };
                Self {
                    primary: a,
                    secondary: Some(b),
                }
            }
            _ => Self::single(first),
        }
    }

    /// Build from a slice of one or two types.
    pub fn from_types(types: &[Type]) -> Option<Self> {
        match types {
            [t] => Some(Self::single(*t)),
            [a, b] => Some(Self::new(*a, Some(*b))),
            _ => None,
        }
    }

    #[inline]
    pub const fn primary(&self) -> Type {
        self.primary
    }

    #[inline]
    pub const fn secondary(&self) -> Option<Type> {
        self.secondary
    }

    pub fn types(&self) -> impl Iterator<Item = Type> {
        std::iter::once(self.primary).chain(self.secondary)
    }

    #[inline]
    pub fn contains(&self, t: Type) -> bool {
        self.primary == t || self.secondary == Some(t)
    }

    /// Dense index: singles first, then pairs in (a, b) order with a < b.
    pub fn index(&self) -> usize {
        let a = self.primary.index();
        match self.secondary {
            None => a,
            Some(b) => {
                let n = Type::COUNT;
                n + a * (2 * n - a - 1) / 2 + (b.index() - a - 1)
            }
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < Type::COUNT {
            return Type::from_index(index).map(Self::single);
        }
        let mut rest = index - Type::COUNT;
        for a in 0..Type::COUNT {
            let span = Type::COUNT - a - 1;
            if rest < span {
                let first = Type::from_index(a)?;
                let second = Type::from_index(a + 1 + rest)?;
                return Some(Self {
                    primary: first,
                    secondary: Some(second),
                });
            }
            rest -= span;
        }
        None
    }

    /// Every key in index order.
    pub fn all() -> impl Iterator<Item = TypePair> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }
}

impl From<Type> for TypePair {
    fn from(t: Type) -> Self {
        Self::single(t)
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            None => write!(f, "{}", self.primary),
            Some(second) => write!(f, "{}/{}", self.primary, second),
        }
    }
}

impl FromStr for TypePair {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let first = parts.next().unwrap_or_default();
        let first = Type::from_str(first).ok_or_else(|| DataError::UnknownType(s.to_string()))?;
        let second = match parts.next() {
            Some(part) => {
                Some(Type::from_str(part).ok_or_else(|| DataError::UnknownType(s.to_string()))?)
            }
            None => None,
        };
        if parts.next().is_some() {
            return Err(DataError::UnknownType(s.to_string()));
        }
        Ok(Self::new(first, second))
    }
}

impl Serialize for TypePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Expanded table
// ============================================================================

/// Base matrix from the generated chart.
pub fn base_matrix() -> BaseMatrix {
    let mut base = [[1.0; Type::COUNT]; Type::COUNT];
    for (def, row) in TYPE_CHART.iter().enumerate() {
        for (atk, tier) in row.iter().enumerate() {
            base[def][atk] = tier.multiplier();
        }
    }
    base
}

/// Multipliers for every single-type attacker against every [`TypePair`].
///
/// Built once and shared read-only by all simulations.
#[derive(Clone, Debug)]
pub struct EffectivenessTable {
    /// `rows[defender.index()][attacker.index()]`
    rows: Vec<[f64; Type::COUNT]>,
}

impl Default for EffectivenessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectivenessTable {
    /// Expand the generated chart.
    pub fn new() -> Self {
        Self::from_base(&base_matrix())
    }

    /// Expand an arbitrary base matrix. Dual defenders multiply their two
    /// single-type rows.
    pub fn from_base(base: &BaseMatrix) -> Self {
        let rows = TypePair::all()
            .map(|defender| {
                let mut row = base[defender.primary().index()];
                if let Some(second) = defender.secondary() {
                    for (cell, m) in row.iter_mut().zip(base[second.index()].iter()) {
                        *cell *= m;
                    }
                }
                row
            })
            .collect();
        Self { rows }
    }

    #[inline]
    pub fn multiplier(&self, attacker: Type, defender: TypePair) -> f64 {
        self.rows[defender.index()][attacker.index()]
    }

    /// Best multiplier among the attacker's own types.
    pub fn best_multiplier(&self, attacker: TypePair, defender: TypePair) -> f64 {
        attacker
            .types()
            .map(|t| self.multiplier(t, defender))
            .fold(f64::MIN, f64::max)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// Strength ranking
// ============================================================================

/// One typing's score in a strength ranking.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TypeScore {
    pub types: TypePair,
    pub score: f64,
}

/// Offensive and defensive rankings, each sorted best first.
#[derive(Clone, Debug, Serialize)]
pub struct TypeStrengthReport {
    pub offensive: Vec<TypeScore>,
    pub defensive: Vec<TypeScore>,
}

impl TypeStrengthReport {
    pub fn compute(table: &EffectivenessTable) -> Self {
        let pairs: Vec<TypePair> = TypePair::all().collect();
        let n = pairs.len();
        let uniform = 1.0 / n as f64;

        // m[i][j]: best multiplier of i attacking j
        let matchups: Vec<Vec<f64>> = pairs
            .iter()
            .map(|&atk| pairs.iter().map(|&def| table.best_multiplier(atk, def)).collect())
            .collect();

        let mut offensive = vec![uniform; n];
        let mut defensive = vec![uniform; n];

        for _ in 0..STRENGTH_ROUNDS {
            let mut next_off = vec![0.0; n];
            let mut next_def = vec![0.0; n];

            for i in 0..n {
                for j in 0..n {
                    let dealt = matchups[i][j];
                    if dealt > 1.0 {
                        next_off[i] += (dealt - 1.0) * defensive[j];
                    }
                    next_def[i] += defense_weight(matchups[j][i]) * offensive[j];
                }
            }

            for score in next_def.iter_mut() {
                *score = score.max(0.0);
            }
            normalize_and_damp(&mut next_off);
            normalize_and_damp(&mut next_def);
            offensive = next_off;
            defensive = next_def;
        }

        Self {
            offensive: ranked(&pairs, &offensive),
            defensive: ranked(&pairs, &defensive),
        }
    }

    /// 1-based offensive rank of a typing.
    pub fn offensive_rank(&self, types: TypePair) -> Option<usize> {
        self.offensive.iter().position(|s| s.types == types).map(|p| p + 1)
    }

    /// 1-based defensive rank of a typing.
    pub fn defensive_rank(&self, types: TypePair) -> Option<usize> {
        self.defensive.iter().position(|s| s.types == types).map(|p| p + 1)
    }
}

/// Weight of taking a hit with multiplier `m`.
fn defense_weight(m: f64) -> f64 {
    if m <= 0.4 {
        2.0
    } else if m < 0.7 {
        1.0
    } else if (0.9..=1.1).contains(&m) {
        0.3
    } else if m > 1.5 {
        -(m - 1.0)
    } else {
        0.0
    }
}

fn normalize_and_damp(scores: &mut [f64]) {
    let n = scores.len() as f64;
    let total: f64 = scores.iter().sum();
    for score in scores.iter_mut() {
        let share = if total > 0.0 { *score / total } else { 1.0 / n };
        *score = STRENGTH_DAMPING * share + (1.0 - STRENGTH_DAMPING) / n;
    }
}

fn ranked(pairs: &[TypePair], scores: &[f64]) -> Vec<TypeScore> {
    let mut out: Vec<TypeScore> = pairs
        .iter()
        .zip(scores.iter())
        .map(|(&types, &score)| TypeScore { types, score })
        .collect();
    // Stable sort keeps index order for ties
    out.sort_by(|a, b| b.score.total_cmp(&a.score));
    out
}
