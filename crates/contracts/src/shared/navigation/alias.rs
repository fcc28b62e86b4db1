//! Alias tables: deprecated identifier -> canonical identifier or external path.
//!
//! Разрешение всегда в один шаг. Цепочки (цель алиаса сама является ключом)
//! отклоняются при построении таблицы, поэтому в рантайме их быть не может.

use std::collections::BTreeMap;

use super::error::ConfigError;
use super::location::{QueryMap, RedirectTarget};
use super::slug::Slug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    /// Canonical identifier in the same module, optionally with preset query.
    Internal { identifier: Slug, extra_query: QueryMap },
    /// Functionality moved to another module.
    External(RedirectTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasOutcome<'a> {
    NotAliased,
    InternalRedirect {
        identifier: &'a Slug,
        extra_query: &'a QueryMap,
    },
    ExternalRedirect(&'a RedirectTarget),
}

/// Single-hop alias table. Construct through [`AliasTable::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<Slug, AliasTarget>,
}

impl AliasTable {
    /// `scope` names the owning module in error messages.
    pub fn new(
        scope: &str,
        entries: impl IntoIterator<Item = (Slug, AliasTarget)>,
    ) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for (from, target) in entries {
            if let AliasTarget::Internal { identifier, .. } = &target {
                if identifier == &from {
                    return Err(ConfigError::AliasCycle {
                        scope: scope.to_string(),
                        alias: from.to_string(),
                    });
                }
            }
            if map.insert(from.clone(), target).is_some() {
                return Err(ConfigError::DuplicateAlias {
                    scope: scope.to_string(),
                    alias: from.to_string(),
                });
            }
        }

        let table = Self { entries: map };
        table.check_single_hop(scope)?;
        Ok(table)
    }

    fn check_single_hop(&self, scope: &str) -> Result<(), ConfigError> {
        for (from, target) in &self.entries {
            if let AliasTarget::Internal { identifier, .. } = target {
                if self.entries.contains_key(identifier) {
                    return Err(ConfigError::AliasChain {
                        scope: scope.to_string(),
                        alias: from.to_string(),
                        target: identifier.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identifier: &Slug) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Slug, &AliasTarget)> {
        self.entries.iter()
    }

    /// Legacy identifiers that map internally onto `canonical`.
    pub fn aliases_of<'a>(&'a self, canonical: &'a Slug) -> impl Iterator<Item = &'a Slug> + 'a {
        self.entries.iter().filter_map(move |(from, target)| match target {
            AliasTarget::Internal { identifier, .. } if identifier == canonical => Some(from),
            _ => None,
        })
    }

    /// Canonical identifier for `identifier` if it is an internal alias.
    pub fn canonical_for<'a>(&'a self, identifier: &'a Slug) -> &'a Slug {
        match self.entries.get(identifier) {
            Some(AliasTarget::Internal { identifier, .. }) => identifier,
            _ => identifier,
        }
    }
}

/// One lookup, never follows the target further.
pub fn resolve_alias<'a>(identifier: &Slug, table: &'a AliasTable) -> AliasOutcome<'a> {
    match table.entries.get(identifier) {
        None => AliasOutcome::NotAliased,
        Some(AliasTarget::Internal {
            identifier,
            extra_query,
        }) => AliasOutcome::InternalRedirect {
            identifier,
            extra_query,
        },
        Some(AliasTarget::External(target)) => AliasOutcome::ExternalRedirect(target),
    }
}
