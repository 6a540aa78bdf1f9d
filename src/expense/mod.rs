//! Expense management for the ledger.
//!
//! This module contains everything related to expenses:
//! - The `ExpenseRecord` model and the validated field types it is built from
//! - The fingerprint used to make creating expenses idempotent
//! - Query types for filtering and sorting lists of expenses
//! - Route handlers for creating and listing expenses

mod create_endpoint;
mod domain;
mod fingerprint;
mod list_endpoint;
mod query;
mod record;

pub use create_endpoint::{CreateExpenseResponse, CreateStatus, create_expense_endpoint};
pub use domain::{
    Amount, Category, Description, ExpenseDate, ExpenseField, MAX_AMOUNT, ValidationError,
};
pub use fingerprint::Fingerprint;
pub use list_endpoint::{CategoriesResponse, list_categories_endpoint, list_expenses_endpoint};
pub use query::{DATE_DESC, ExpenseSummary, ListQuery, SortMode};
pub use record::{AmountInput, ExpenseForm, ExpenseId, ExpenseRecord, NewExpense};
