//! Maps each subcommand onto a repository operation and renders the outcome
//! as JSON.

use std::{io::Read, sync::Arc};

use api_types::{budget::BudgetInput, transaction::TransactionInput};
use chrono::Local;
use records::RecordClient;
use repository::{
    Budgets, Categories, Notifier, Repository, SavingsGoals, Schema, Toast, Transactions,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    cli::{Action, CategoryAction, Command},
    error::{AppError, Result},
    settings::Tables,
};

pub async fn execute<C>(
    command: Command,
    client: Arc<C>,
    notifier: Arc<dyn Notifier>,
    tables: &Tables,
) -> Result<Value>
where
    C: RecordClient + 'static,
{
    match command {
        Command::Budgets { action } => {
            let budgets = repository::<Budgets, C>(client, &notifier, &tables.budgets);
            run(&budgets, action, notifier.as_ref(), default_month).await
        }
        Command::Categories { action } => {
            let categories = repository::<Categories, C>(client, &notifier, &tables.categories);
            match action {
                CategoryAction::Common(action) => {
                    run(&categories, action, notifier.as_ref(), |_| {}).await
                }
                CategoryAction::ByType { kind } => {
                    Ok(serde_json::to_value(categories.list_by_type(&kind).await)?)
                }
            }
        }
        Command::SavingsGoals { action } => {
            let goals = repository::<SavingsGoals, C>(client, &notifier, &tables.savings_goals);
            run(&goals, action, notifier.as_ref(), |_| {}).await
        }
        Command::Transactions { action } => {
            let transactions =
                repository::<Transactions, C>(client, &notifier, &tables.transactions);
            run(&transactions, action, notifier.as_ref(), default_date).await
        }
    }
}

fn repository<S, C>(
    client: Arc<C>,
    notifier: &Arc<dyn Notifier>,
    table: &str,
) -> Repository<S, Arc<C>>
where
    S: Schema,
    C: RecordClient + 'static,
{
    Repository::new(client)
        .with_table(table)
        .with_notifier(Arc::clone(notifier))
}

/// Runs one CRUD action. `prepare` fills in defaults on a new record.
async fn run<S, C>(
    repository: &Repository<S, C>,
    action: Action,
    notifier: &dyn Notifier,
    prepare: fn(&mut S::Input),
) -> Result<Value>
where
    S: Schema,
    S::Domain: Serialize,
    S::Input: DeserializeOwned,
    C: RecordClient,
{
    let value = match action {
        Action::List => serde_json::to_value(repository.list().await)?,
        Action::Get { id } => serde_json::to_value(repository.get_by_id(id.as_str()).await)?,
        Action::Create { data } => {
            let mut input = read_input::<S::Input>(&data, S::ENTITY)?;
            prepare(&mut input);
            serde_json::to_value(repository.create(&input).await)?
        }
        Action::Update { id, data } => {
            let input = read_input::<S::Input>(&data, S::ENTITY)?;
            serde_json::to_value(repository.update(id.as_str(), &input).await)?
        }
        Action::Delete { id } => {
            let deleted = repository.delete(id.as_str()).await;
            if deleted {
                notifier.notify(Toast::success(format!("Deleted {} {id}", S::ENTITY)));
            }
            Value::Bool(deleted)
        }
    };
    Ok(value)
}

fn read_input<T: DeserializeOwned>(data: &str, entity: &'static str) -> Result<T> {
    let parse = |json: &str| {
        serde_json::from_str(json).map_err(|source| AppError::Data { entity, source })
    };
    if data == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return parse(&buffer);
    }
    parse(data)
}

fn default_month(input: &mut BudgetInput) {
    if input.month.as_deref().is_none_or(str::is_empty) {
        input.month = Some(Local::now().format("%Y-%m").to_string());
    }
}

fn default_date(input: &mut TransactionInput) {
    if input.date.as_deref().is_none_or(str::is_empty) {
        input.date = Some(Local::now().date_naive().format("%Y-%m-%d").to_string());
    }
}
