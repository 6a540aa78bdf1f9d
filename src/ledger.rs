//! The in-memory store of expense records.
//!
//! The ledger owns every [ExpenseRecord] for the lifetime of the process.
//! Creating an expense is idempotent: a create with the same fingerprint as a
//! stored record returns that record instead of storing a second copy.

use std::{
    collections::{HashMap, HashSet},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use time::OffsetDateTime;

use crate::{
    Error,
    expense::{ExpenseId, ExpenseRecord, ExpenseSummary, Fingerprint, NewExpense, SortMode},
};

/// Whether [Ledger::create] stored a new record or found an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The expense was new and has been stored.
    Created(ExpenseRecord),
    /// A record with the same fingerprint already existed and is returned unchanged.
    Duplicate(ExpenseRecord),
}

impl CreateOutcome {
    /// The stored record, regardless of whether it was just created.
    pub fn record(&self) -> &ExpenseRecord {
        match self {
            CreateOutcome::Created(record) | CreateOutcome::Duplicate(record) => record,
        }
    }

    /// Take the stored record.
    pub fn into_record(self) -> ExpenseRecord {
        match self {
            CreateOutcome::Created(record) | CreateOutcome::Duplicate(record) => record,
        }
    }

    /// Whether the create call found an existing record.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, CreateOutcome::Duplicate(_))
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    /// Records in insertion order.
    records: Vec<ExpenseRecord>,
    /// Maps a fingerprint to the index of its record in `records`.
    by_fingerprint: HashMap<Fingerprint, usize>,
}

/// An in-memory collection of expense records.
///
/// Share a ledger between request handlers by wrapping it in an
/// [std::sync::Arc]. Reads may run concurrently with each other, while
/// [Ledger::create] holds an exclusive lock for the whole
/// fingerprint-check-then-insert sequence.
#[derive(Debug, Default)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, Error> {
        self.state.read().map_err(|error| {
            tracing::error!("could not acquire ledger read lock: {error}");
            Error::LockPoisoned
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, Error> {
        self.state.write().map_err(|error| {
            tracing::error!("could not acquire ledger write lock: {error}");
            Error::LockPoisoned
        })
    }

    /// Store a validated expense, or return the matching record if one exists.
    ///
    /// A new record gets the next ID and the current UTC time as its creation
    /// time. A duplicate leaves the ledger untouched.
    ///
    /// # Errors
    /// Returns [Error::LockPoisoned] if another thread panicked while holding
    /// the ledger lock.
    pub fn create(&self, expense: NewExpense) -> Result<CreateOutcome, Error> {
        let fingerprint = Fingerprint::of(&expense);
        let mut state = self.write()?;

        if let Some(&index) = state.by_fingerprint.get(&fingerprint) {
            let existing = state.records[index].clone();
            tracing::debug!(
                "expense {} matches fingerprint {fingerprint}, returning existing record",
                existing.id
            );

            return Ok(CreateOutcome::Duplicate(existing));
        }

        let index = state.records.len();
        let id = index as ExpenseId + 1;
        let record = ExpenseRecord::new(id, expense, fingerprint, OffsetDateTime::now_utc());

        state
            .by_fingerprint
            .insert(record.fingerprint.clone(), index);
        state.records.push(record.clone());

        tracing::info!(
            "created expense {id}: {} in {} on {}",
            record.amount,
            record.category,
            record.date
        );

        Ok(CreateOutcome::Created(record))
    }

    /// List the records, optionally filtered by category and sorted.
    ///
    /// `category` must match exactly, including case. The summary's total and
    /// count cover exactly the returned records. No match gives an empty
    /// summary, not an error.
    ///
    /// # Errors
    /// Returns [Error::LockPoisoned] if another thread panicked while holding
    /// the ledger lock.
    pub fn list(&self, category: Option<&str>, sort: SortMode) -> Result<ExpenseSummary, Error> {
        let mut expenses: Vec<ExpenseRecord> = self
            .read()?
            .records
            .iter()
            .filter(|record| category.is_none_or(|category| record.category.as_ref() == category))
            .cloned()
            .collect();

        sort.apply(&mut expenses);

        Ok(ExpenseSummary::new(expenses))
    }

    /// The sum of the amounts of the records, optionally filtered by category.
    ///
    /// # Errors
    /// Returns [Error::LockPoisoned] if another thread panicked while holding
    /// the ledger lock.
    pub fn total(&self, category: Option<&str>) -> Result<f64, Error> {
        let total = self
            .read()?
            .records
            .iter()
            .filter(|record| category.is_none_or(|category| record.category.as_ref() == category))
            .fold(0.0, |total, record| total + record.amount.value());

        Ok(total)
    }

    /// The distinct categories in use, in the order they were first seen.
    ///
    /// # Errors
    /// Returns [Error::LockPoisoned] if another thread panicked while holding
    /// the ledger lock.
    pub fn categories(&self) -> Result<Vec<String>, Error> {
        let state = self.read()?;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut categories: Vec<String> = Vec::new();

        for record in &state.records {
            let category = record.category.as_ref();

            if seen.insert(category) {
                categories.push(category.to_owned());
            }
        }

        Ok(categories)
    }

    /// The number of records in the ledger.
    ///
    /// # Errors
    /// Returns [Error::LockPoisoned] if another thread panicked while holding
    /// the ledger lock.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.read()?.records.len())
    }

    /// Whether the ledger has no records.
    ///
    /// # Errors
    /// Returns [Error::LockPoisoned] if another thread panicked while holding
    /// the ledger lock.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.read()?.records.is_empty())
    }
}
