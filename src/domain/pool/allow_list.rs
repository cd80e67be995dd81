//! Allow-list filter applied to decoded pools

use std::collections::HashSet;

use super::PoolId;

/// Set-membership filter on pool ids
///
/// When `enabled` is false every pool passes and `ids` is ignored. When
/// enabled, only ids in the set pass, so an empty set admits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowListFilter {
    ids: HashSet<PoolId>,
    enabled: bool,
}

impl AllowListFilter {
    pub fn new(ids: HashSet<PoolId>, enabled: bool) -> Self {
        Self { ids, enabled }
    }

    /// Filter that admits every pool
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enabled filter over `ids`
    pub fn allow<I: IntoIterator<Item = PoolId>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ids(&self) -> &HashSet<PoolId> {
        &self.ids
    }

    pub fn admits(&self, id: PoolId) -> bool {
        !self.enabled || self.ids.contains(&id)
    }
}
