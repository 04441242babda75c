//! Upsert sequencer: the sequential fold that commits each row and tallies the batch.

use super::category::CategoryResolver;
use super::normalize::{normalize, IdClock};
use super::records::Record;
use crate::error::{Result, StockError};
use crate::model::Product;
use crate::store::DataStore;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// A row that was not committed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: usize,
    pub reason: String,
}

/// Running tally of a batch; also the import response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRow>,
}

impl ImportSummary {
    /// Fold one row's outcome into the tally.
    pub fn tally(mut self, line: usize, outcome: Result<UpsertOutcome>) -> Self {
        match outcome {
            Ok(UpsertOutcome::Inserted) => self.inserted += 1,
            Ok(UpsertOutcome::Updated) => self.updated += 1,
            Err(e) => self.rejected.push(RejectedRow {
                line,
                reason: e.to_string(),
            }),
        }
        self
    }

    pub fn committed(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Commit one product: full replace when its id exists, insert otherwise.
pub fn upsert_product<S: DataStore>(store: &mut S, product: &Product) -> Result<UpsertOutcome> {
    if store.find_product(product.id)?.is_some() && store.update_product(product)? {
        return Ok(UpsertOutcome::Updated);
    }
    store.insert_product(product)?;
    Ok(UpsertOutcome::Inserted)
}

/// Per-batch state threaded through the sequential fold.
pub struct Sequencer {
    clock: IdClock,
    resolver: CategoryResolver,
}

impl Sequencer {
    pub fn new(clock: IdClock, resolver: CategoryResolver) -> Self {
        Self { clock, resolver }
    }

    pub fn resolver(&self) -> &CategoryResolver {
        &self.resolver
    }

    /// Normalize, resolve and commit one record.
    pub fn process<S: DataStore>(&mut self, store: &mut S, record: &Record) -> Result<UpsertOutcome> {
        let mut product = normalize(record, &mut self.clock)?;
        product.category = self.resolver.resolve(store, &product.category)?;
        let outcome = upsert_product(store, &product)?;
        debug!(line = record.line, id = product.id, ?outcome, "row committed");
        Ok(outcome)
    }

    /// Process every record strictly in order. Row failures never abort the batch.
    pub fn run<S, I>(&mut self, store: &mut S, records: I) -> ImportSummary
    where
        S: DataStore,
        I: IntoIterator<Item = Record>,
    {
        records
            .into_iter()
            .fold(ImportSummary::default(), |summary, record| {
                let outcome = self.process(store, &record);
                if let Err(e) = &outcome {
                    log_rejection(record.line, e);
                }
                summary.tally(record.line, outcome)
            })
    }
}

fn log_rejection(line: usize, err: &StockError) {
    if err.is_client_error() {
        warn!(line, error = %err, "row skipped");
    } else {
        warn!(line, error = %err, "row failed against the store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::store::mem_backend::MemBackend;
    use crate::store::Catalog;

    fn catalog() -> Catalog<MemBackend> {
        Catalog::with_backend(MemBackend::new())
    }

    fn sequencer() -> Sequencer {
        Sequencer::new(
            IdClock::new().with_time_source(|| 1_700_000_000),
            CategoryResolver::default(),
        )
    }

    fn rec(line: usize, pairs: &[(&str, &str)]) -> Record {
        Record::new(
            line,
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn upsert_inserts_then_updates() {
        let mut store = catalog();
        let product = Product::new(1, "Widget");
        assert_eq!(
            upsert_product(&mut store, &product).unwrap(),
            UpsertOutcome::Inserted
        );
        assert_eq!(
            upsert_product(&mut store, &product).unwrap(),
            UpsertOutcome::Updated
        );
        assert_eq!(store.list_products().unwrap().len(), 1);
    }

    #[test]
    fn tally_counts_and_collects() {
        let summary = ImportSummary::default()
            .tally(2, Ok(UpsertOutcome::Inserted))
            .tally(3, Ok(UpsertOutcome::Updated))
            .tally(4, Err(StockError::EmptyInput));
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].line, 4);
        assert_eq!(summary.committed(), 2);
    }

    #[test]
    fn summary_serializes_counts_only_when_clean() {
        let summary = ImportSummary {
            inserted: 2,
            updated: 0,
            rejected: vec![],
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({"inserted": 2, "updated": 0})
        );
    }

    #[test]
    fn run_resolves_categories_and_counts() {
        let mut store = catalog();
        let mut seq = sequencer();
        let summary = seq.run(
            &mut store,
            vec![
                rec(2, &[("name", "Widget"), ("category", "Tools")]),
                rec(3, &[("name", "Gadget"), ("category", "Tools")]),
                rec(4, &[("name", "Thing"), ("category", "")]),
            ],
        );

        assert_eq!(summary.inserted, 3);
        assert_eq!(summary.updated, 0);
        assert_eq!(
            store.list_categories().unwrap(),
            vec![Category::new(1_000_000, "Tools")]
        );
        let categories: Vec<_> = store
            .list_products()
            .unwrap()
            .into_iter()
            .map(|p| p.category)
            .collect();
        assert_eq!(categories, vec!["Tools", "Tools", "other"]);
        assert_eq!(seq.resolver().created(), 1);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let mut store = catalog();
        let summary = sequencer().run(
            &mut store,
            vec![
                rec(2, &[("id", "1"), ("name", "ok")]),
                rec(3, &[("id", "2"), ("barcode", "x12")]),
                rec(4, &[("id", "nope")]),
                rec(5, &[("id", "3"), ("name", "also ok")]),
            ],
        );
        assert_eq!(summary.inserted, 2);
        assert_eq!(
            summary.rejected.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![3, 4]
        );
        assert!(summary.rejected[0].reason.contains("barcode"));
        assert_eq!(store.list_products().unwrap().len(), 2);
    }

    #[test]
    fn duplicate_ids_in_batch_become_updates() {
        let mut store = catalog();
        let summary = sequencer().run(
            &mut store,
            vec![
                rec(2, &[("id", "9"), ("name", "first")]),
                rec(3, &[("id", "9"), ("name", "second")]),
            ],
        );
        assert_eq!((summary.inserted, summary.updated), (1, 1));
        assert_eq!(store.find_product(9).unwrap().unwrap().name, "second");
    }

    /// Fails every product insert for one id; everything else is delegated.
    struct FlakyStore {
        inner: Catalog<MemBackend>,
        poisoned: i64,
    }

    impl DataStore for FlakyStore {
        fn find_product(&self, id: i64) -> Result<Option<Product>> {
            self.inner.find_product(id)
        }
        fn find_products(&self, predicate: &dyn Fn(&Product) -> bool) -> Result<Vec<Product>> {
            self.inner.find_products(predicate)
        }
        fn insert_product(&mut self, product: &Product) -> Result<()> {
            if product.id == self.poisoned {
                return Err(StockError::Store("disk full".into()));
            }
            self.inner.insert_product(product)
        }
        fn update_product(&mut self, product: &Product) -> Result<bool> {
            self.inner.update_product(product)
        }
        fn remove_product(&mut self, id: i64) -> Result<bool> {
            self.inner.remove_product(id)
        }
        fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
            self.inner.find_category_by_name(name)
        }
        fn list_categories(&self) -> Result<Vec<Category>> {
            self.inner.list_categories()
        }
        fn insert_category(&mut self, category: &Category) -> Result<()> {
            self.inner.insert_category(category)
        }
        fn remove_category(&mut self, id: i64) -> Result<bool> {
            self.inner.remove_category(id)
        }
    }

    #[test]
    fn store_failure_is_swallowed_per_row() {
        let mut store = FlakyStore {
            inner: catalog(),
            poisoned: 2,
        };
        let summary = sequencer().run(
            &mut store,
            vec![
                rec(2, &[("id", "1")]),
                rec(3, &[("id", "2")]),
                rec(4, &[("id", "3")]),
            ],
        );
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].line, 3);
        assert!(store.inner.find_product(2).unwrap().is_none());
    }
}
