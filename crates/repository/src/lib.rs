//! Entity repositories over the record service.
//!
//! A [`Repository`] couples a [`Schema`] (table, selected fields, ordering and
//! the field mapping in both directions) with an injected
//! [`records::RecordClient`]. Every operation absorbs failures: errors are
//! logged, remote messages are surfaced through a [`Notifier`], and the
//! caller receives an empty list, `None` or `false`.
//!
//! - [`Budgets`] → [`api_types::budget::Budget`]
//! - [`Categories`] → [`api_types::category::Category`]
//! - [`SavingsGoals`] → [`api_types::savings_goal::SavingsGoal`]
//! - [`Transactions`] → [`api_types::transaction::Transaction`]

pub use budgets::{BudgetFields, BudgetRecord, Budgets};
pub use categories::{Categories, CategoryFields, CategoryRecord};
pub use key::RecordKey;
pub use notify::{ChannelNotifier, Notifier, Toast, ToastLevel, TracingNotifier};
pub use repository::{LIST_LIMIT, Repository};
pub use savings_goals::{SavingsGoalFields, SavingsGoalRecord, SavingsGoals};
pub use schema::Schema;
pub use transactions::{TransactionFields, TransactionRecord, Transactions};

mod budgets;
mod categories;
mod key;
mod lenient;
mod notify;
mod repository;
mod savings_goals;
mod schema;
mod transactions;

pub type BudgetRepository<C> = Repository<Budgets, C>;
pub type CategoryRepository<C> = Repository<Categories, C>;
pub type SavingsGoalRepository<C> = Repository<SavingsGoals, C>;
pub type TransactionRepository<C> = Repository<Transactions, C>;
