//! Plain-text rendering for list and summary output.

use chrono::NaiveDate;
use daydash_core::model::validation::format_money;
use daydash_core::service::budget_service::BudgetTotals;
use daydash_core::{
    BudgetEntry, DashboardSummary, GroceryItem, HealthRecord, LendingItem, Plant, RecordId,
    Subscription, Task,
};
use std::fmt::Write;

const EMPTY: &str = "No items yet.\n";

/// First block of the simple uuid form; enough to address a record.
pub fn short_id(id: RecordId) -> String {
    id.simple().to_string()[..8].to_string()
}

pub fn summary(summary: &DashboardSummary) -> String {
    format!(
        "Tasks:       {}\nMoney spent: {}\nWater:       {}\n",
        summary.tasks_label(),
        summary.money_spent_label(),
        summary.water_label()
    )
}

pub fn tasks(tasks: &[&Task]) -> String {
    rows(tasks, |task| {
        let mark = if task.completed { "x" } else { " " };
        let archived = if task.archived { " (archived)" } else { "" };
        format!("{}  [{mark}] {}{archived}", short_id(task.id), task.text)
    })
}

pub fn budget(entries: &[BudgetEntry], totals: &BudgetTotals) -> String {
    let mut out = rows(entries.iter().collect::<Vec<_>>().as_slice(), |entry| {
        format!(
            "{}  {} \u{2014} {}${}",
            short_id(entry.id),
            entry.description,
            entry.kind.sign(),
            format_money(entry.amount)
        )
    });
    let _ = writeln!(
        out,
        "Income: ${}  Expenses: ${}  Balance: ${}",
        totals.income_text(),
        totals.expense_text(),
        totals.balance_text()
    );
    out
}

pub fn health(record: &HealthRecord) -> String {
    format!(
        "Steps: {}\nWater: {} glasses\nSleep: {} hours\n",
        record.steps, record.water, record.sleep
    )
}

pub fn grocery(items: &[GroceryItem]) -> String {
    rows(items.iter().collect::<Vec<_>>().as_slice(), |item| {
        let mark = if item.acquired { "x" } else { " " };
        format!("{}  [{mark}] {}", short_id(item.id), item.name)
    })
}

pub fn subscriptions(items: &[Subscription], monthly_total: f64) -> String {
    let mut out = rows(items.iter().collect::<Vec<_>>().as_slice(), |item| {
        format!(
            "{}  {} \u{2014} ${}/month",
            short_id(item.id),
            item.name,
            format_money(item.amount)
        )
    });
    let _ = writeln!(out, "Total: ${}/month", format_money(monthly_total));
    out
}

pub fn plants(plants: &[&Plant], today: NaiveDate) -> String {
    rows(plants, |plant| {
        let days = plant.days_since_watered(today);
        let ago = match days {
            0 => "today".to_string(),
            1 => "1 day ago".to_string(),
            n if n < 0 => "in the future".to_string(),
            n => format!("{n} days ago"),
        };
        format!(
            "{}  {} \u{2014} last watered {} ({ago})",
            short_id(plant.id),
            plant.name,
            plant.last_watered.format("%Y-%m-%d")
        )
    })
}

pub fn lending(items: &[LendingItem]) -> String {
    rows(items.iter().collect::<Vec<_>>().as_slice(), |item| {
        format!(
            "{}  {} \u{2014} {} ({})",
            short_id(item.id),
            item.name,
            item.person,
            item.direction
        )
    })
}

fn rows<T>(items: &[&T], line: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return EMPTY.to_string();
    }
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{}", line(item));
    }
    out
}
