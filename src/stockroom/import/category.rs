//! Category resolver: exact-name lookup, creation under a unique name, duplicate retry.

use crate::error::{Result, StockError};
use crate::model::{Category, FALLBACK_CATEGORY};
use crate::store::DataStore;
use tracing::{debug, warn};

/// Lowest id handed to a new category.
pub const CATEGORY_ID_FLOOR: i64 = 1_000_000;

/// Attempts at inserting a new category before giving up on id collisions.
const MAX_INSERT_ATTEMPTS: usize = 8;

/// Maps candidate category names onto stored categories, creating them lazily.
///
/// New categories get monotonic ids: one above the largest stored id (never below
/// [`CATEGORY_ID_FLOOR`]), and never an id this resolver already handed out.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    fallback: String,
    last_issued: i64,
    created: usize,
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new(FALLBACK_CATEGORY)
    }
}

impl CategoryResolver {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            last_issued: 0,
            created: 0,
        }
    }

    /// Number of categories this resolver has inserted.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Canonical name for `candidate` (already escaped).
    ///
    /// Creation is insert-first: the store rejects duplicate names, and a rejected
    /// insert is followed by a fresh lookup so a concurrent writer's record wins.
    pub fn resolve<S: DataStore>(&mut self, store: &mut S, candidate: &str) -> Result<String> {
        if candidate.is_empty() {
            return Ok(self.fallback.clone());
        }

        if let Some(existing) = store.find_category_by_name(candidate)? {
            return Ok(existing.name);
        }

        for _ in 0..MAX_INSERT_ATTEMPTS {
            let id = self.next_id(store)?;
            match store.insert_category(&Category::new(id, candidate)) {
                Ok(()) => {
                    self.created += 1;
                    debug!(id, name = candidate, "created category");
                    return Ok(candidate.to_string());
                }
                Err(StockError::DuplicateKey { key, .. }) => {
                    if let Some(existing) = store.find_category_by_name(candidate)? {
                        debug!(name = candidate, "category created concurrently, reusing");
                        return Ok(existing.name);
                    }
                    warn!(%key, "category id collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(StockError::Store(format!(
            "could not allocate an id for category {candidate:?}"
        )))
    }

    fn next_id<S: DataStore>(&mut self, store: &S) -> Result<i64> {
        let stored_max = store
            .list_categories()?
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0);
        let id = stored_max
            .saturating_add(1)
            .max(self.last_issued.saturating_add(1))
            .max(CATEGORY_ID_FLOOR);
        self.last_issued = id;
        Ok(id)
    }
}
