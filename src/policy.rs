//! Allocation policy: target fractions per symbol, with aliases.
//!
//! A policy is validated once at construction and is immutable afterwards.
//! Validation runs in a fixed order: per-entry target range, then the sum of
//! targets, then symbol uniqueness across canonical symbols and aliases.

use rustc_hash::FxHashMap;

use crate::error::PolicyError;

/// One target allocation line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationEntry {
    /// Canonical symbol that holdings aggregate under.
    pub symbol: String,
    /// Target fraction of the portfolio, in `[0, 1]`.
    pub target: f64,
    pub description: String,
    /// Other symbols whose holdings count toward this entry.
    pub aliases: Vec<String>,
}

impl AllocationEntry {
    pub fn new(symbol: impl Into<String>, target: f64) -> Self {
        Self {
            symbol: symbol.into(),
            target,
            description: String::new(),
            aliases: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Target as a percentage (0–100).
    pub fn target_pct(&self) -> f64 {
        self.target * 100.0
    }
}

/// A validated, ordered set of allocation entries.
#[derive(Clone, Debug)]
pub struct AllocationPolicy {
    entries: Vec<AllocationEntry>,
    /// Every canonical symbol and alias → index of the owning entry.
    owners: FxHashMap<String, usize>,
}

impl AllocationPolicy {
    /// Maximum distance of the target sum from 1.0.
    pub const SUM_TOLERANCE: f64 = 1e-9;

    /// Validate entries into a policy.
    pub fn new(entries: Vec<AllocationEntry>) -> Result<Self, PolicyError> {
        for entry in &entries {
            if !entry.target.is_finite() || !(0.0..=1.0).contains(&entry.target) {
                return Err(PolicyError::InvalidTarget {
                    symbol: entry.symbol.clone(),
                    target: entry.target,
                });
            }
        }

        let sum: f64 = entries.iter().map(|e| e.target).sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(PolicyError::AllocationSum { sum });
        }

        let mut owners: FxHashMap<String, usize> = FxHashMap::default();
        for (idx, entry) in entries.iter().enumerate() {
            let claims = std::iter::once(&entry.symbol).chain(entry.aliases.iter());
            for symbol in claims {
                if let Some(&owner) = owners.get(symbol) {
                    return Err(PolicyError::DuplicateSymbol {
                        symbol: symbol.clone(),
                        owner: entries[owner].symbol.clone(),
                        claimant: entry.symbol.clone(),
                    });
                }
                owners.insert(symbol.clone(), idx);
            }
        }

        Ok(Self { entries, owners })
    }

    /// Entries in policy order.
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical symbol for a canonical or alias symbol.
    pub fn canonical(&self, symbol: &str) -> Option<&str> {
        self.entry(symbol).map(|e| e.symbol.as_str())
    }

    /// The entry that owns `symbol`, by canonical symbol or alias.
    pub fn entry(&self, symbol: &str) -> Option<&AllocationEntry> {
        self.owners.get(symbol).map(|&idx| &self.entries[idx])
    }

    /// Sum of target fractions (1.0 within tolerance).
    pub fn target_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.target).sum()
    }
}
