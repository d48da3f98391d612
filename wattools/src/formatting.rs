use std::fmt::Write;

use anyhow::Result;
use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};
use wattpay_engine::{
    account_objects::AccountOverview,
    checkout_objects::{CheckoutReceipt, OrderHandle},
    db_types::{Bill, Notification, Payment},
};

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn markdown_style(table: &mut Table) {
    table.set_format(markdown_format());
}

pub fn format_order(order: &OrderHandle) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "Order id: {}", order.order_id)?;
    writeln!(f, "Amount:   {} ({} paise, {})", order.amount, order.amount.value(), order.currency)?;
    writeln!(f, "Key id:   {}", order.key_id)?;
    Ok(f)
}

pub fn format_receipt(receipt: &CheckoutReceipt) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "Payment Successful!")?;
    writeln!(f, "Transaction ID: {}", receipt.transaction_id)?;
    writeln!(f, "Amount Paid:    {}", receipt.amount)?;
    writeln!(f, "Bill:           #{}", receipt.bill_id)?;
    writeln!(f, "Method:         {}", receipt.payment_method)?;
    Ok(f)
}

pub fn format_overview(overview: &AccountOverview) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "===============================================================================")?;
    writeln!(
        f,
        "Account {user}\n{count:>4} bills. Outstanding: {outstanding}. Total paid: {paid}",
        user = overview.user_id,
        count = overview.bills.len(),
        outstanding = overview.outstanding,
        paid = overview.history.total_paid
    )?;
    writeln!(f, "===============================================================================")?;
    writeln!(f, "{}", format_bills(&overview.bills))?;
    writeln!(f, "Payments")?;
    writeln!(f, "{}", format_payments(&overview.history.payments))?;
    writeln!(f, "Notifications ({} unread)", overview.feed.unread)?;
    writeln!(f, "{}", format_notifications(&overview.feed.notifications))?;
    Ok(f)
}

pub fn format_bills(bills: &[Bill]) -> String {
    if bills.is_empty() {
        return "No bills".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["ID", "Bill number", "Month", "Units (kWh)", "Amount", "Due date", "Status"]);
    bills.iter().for_each(|b| {
        table.add_row(row![
            b.id,
            b.bill_number,
            b.billing_month,
            format!("{:.0}", b.units_consumed),
            b.amount,
            b.due_date,
            b.status
        ]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_payments(payments: &[Payment]) -> String {
    if payments.is_empty() {
        return "No payments".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["Transaction id", "Bill", "Amount", "Method", "Status", "Paid at"]);
    payments.iter().for_each(|p| {
        table.add_row(row![
            p.transaction_id,
            p.bill_id.map(|id| id.to_string()).unwrap_or_default(),
            p.amount,
            p.payment_method,
            p.status,
            p.created_at.format("%Y-%m-%d %H:%M")
        ]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_notifications(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "No notifications".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["ID", "Type", "Title", "Message", "Read", "Created"]);
    notifications.iter().for_each(|n| {
        let read = if n.read { "✓" } else { "" };
        table.add_row(row![
            n.id,
            n.notification_type,
            n.title,
            n.message,
            read,
            n.created_at.format("%Y-%m-%d %H:%M")
        ]);
    });
    markdown_style(&mut table);
    table.to_string()
}
