//! Parent merging and collision detection
//!
//! Sibling parents of a variable set must agree on every key they share;
//! a disagreement is a collision and aborts resolution. Only parents are
//! compared against each other - the child overriding a parent is normal
//! precedence, never a collision.

use std::fmt;

use seltzer_domain::VarValue;

/// A disagreement between two sibling parents at a dotted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// The dotted path both parents define.
    pub key: String,
    /// The value one parent resolved to.
    pub value_a: VarValue,
    /// The conflicting value from the other parent.
    pub value_b: VarValue,
}

impl Collision {
    /// True when `other` reports the same disagreement, regardless of
    /// which side each value is on.
    fn same_as(&self, other: &Self) -> bool {
        self.key == other.key
            && ((self.value_a == other.value_a && self.value_b == other.value_b)
                || (self.value_a == other.value_b && self.value_b == other.value_a))
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collision with key=`{}`: value_a=`{}` value_b=`{}`",
            self.key, self.value_a, self.value_b
        )
    }
}

/// Computes all pairwise collisions among the given parent structures.
///
/// For every unordered pair of parents, the dotted leaf keys common to
/// both key lists are compared; unequal values are recorded. Comparing
/// the intersection keeps detection symmetric: a scalar in one parent
/// under a key the other only holds a mapping at is a structural
/// difference, not a collision. Collisions are deduplicated by
/// `(key, unordered value pair)`.
#[must_use]
pub fn find_collisions(parents: &[VarValue]) -> Vec<Collision> {
    let mut collisions: Vec<Collision> = Vec::new();
    for (i, parent) in parents.iter().enumerate() {
        let parent_keys = parent.fq_keys();
        for other in &parents[i + 1..] {
            let other_keys = other.fq_keys();
            for key in parent_keys.iter().filter(|k| other_keys.contains(*k)) {
                let Some(value_a) = parent.lookup(key) else {
                    continue;
                };
                let Some(value_b) = other.lookup(key) else {
                    continue;
                };
                if value_a != value_b {
                    let collision = Collision {
                        key: key.clone(),
                        value_a: value_a.clone(),
                        value_b: value_b.clone(),
                    };
                    if !collisions.iter().any(|c| c.same_as(&collision)) {
                        collisions.push(collision);
                    }
                }
            }
        }
    }
    collisions
}

/// Left-folds parent structures into one via recursive deep merge.
///
/// Collision detection has already proven the parents agree on shared
/// keys, so the fold order only matters for keys unique to one parent.
#[must_use]
pub fn merge_parents(parents: Vec<VarValue>) -> VarValue {
    parents
        .into_iter()
        .fold(VarValue::empty_mapping(), VarValue::deep_merge)
}

/// Renders a collision list for error display, one collision per line.
#[must_use]
pub fn format_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(|c| format!("\t-> {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}
