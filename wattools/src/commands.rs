use anyhow::{anyhow, Result};
use log::*;
use reqwest::Method;
use wattpay_common::Paise;
use wattpay_engine::{
    checkout_objects::{CheckoutSession, CheckoutUser},
    db_types::NewBill,
    events::EventProducers,
    traits::BillingDatabase,
    AccountApi,
    CheckoutApi,
    SqliteDatabase,
};
use wattpay_server::data_objects::CreateOrderRequest;

use crate::{
    formatting::{format_order, format_overview, format_receipt},
    gateway::CommandLineCheckout,
    server_client::PortalServerClient,
    DatabaseParams,
    HistoryParams,
    OrderParams,
    PayParams,
    SeedBillParams,
    ServerParams,
};

async fn open_database(params: &DatabaseParams) -> Result<SqliteDatabase> {
    let db = SqliteDatabase::new_with_url(&params.database_url, 1).await?;
    db.migrate().await?;
    debug!("🗃️ Opened {}", db.url());
    Ok(db)
}

pub async fn create_order(params: OrderParams) -> Result<()> {
    let client = PortalServerClient::new(params.server.server)?;
    let request = CreateOrderRequest {
        amount: Some(params.amount),
        currency: params.currency,
        receipt: params.receipt,
        notes: None,
    };
    let order = client.create_order(&request).await?;
    print!("{}", format_order(&order)?);
    Ok(())
}

pub async fn send_reminders(params: ServerParams) -> Result<()> {
    let client = PortalServerClient::new(params.server)?;
    info!("Triggering the reminder sweep on {}", client.server());
    let res = client.send_bill_reminders(Method::POST).await?;
    println!("{} (count: {})", res.message, res.count);
    if let Some(Some(e)) = res.error {
        println!("The reminders could not be stored: {e}");
    }
    Ok(())
}

pub async fn pay_bill(params: PayParams) -> Result<()> {
    let db = open_database(&params.database).await?;
    let accounts = AccountApi::new(db.clone());
    let bill = accounts
        .bill_for_user(&params.user_id, params.bill_id)
        .await?
        .ok_or_else(|| anyhow!("Bill {} does not exist, or does not belong to {}", params.bill_id, params.user_id))?;
    if bill.is_paid() {
        println!("Note: bill {} is already marked as paid", bill.bill_number);
    }
    let mut user = CheckoutUser::new(params.user_id.as_str());
    if let Some(email) = params.email {
        user = user.with_email(email);
    }
    let issuer = PortalServerClient::new(params.server.server)?;
    let checkout = CommandLineCheckout::new(params.payment_id, params.dismiss, params.fail);
    let api = CheckoutApi::new(db, issuer, checkout, EventProducers::default());
    let mut session = CheckoutSession::new(user, bill, params.method);
    match api.pay(&mut session).await {
        Ok(receipt) => {
            print!("{}", format_receipt(&receipt)?);
            Ok(())
        },
        Err(e) if e.is_user_facing() => {
            println!("{e}");
            Ok(())
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn print_history(params: HistoryParams) -> Result<()> {
    let db = open_database(&params.database).await?;
    let accounts = AccountApi::new(db);
    if let Some(id) = params.mark_read {
        let n = accounts.mark_notification_read(&params.user_id, id).await?;
        println!("Marked notification #{} ({}) as read", n.id, n.title);
    }
    let overview = accounts.overview(&params.user_id).await?;
    print!("{}", format_overview(&overview)?);
    Ok(())
}

pub async fn seed_bill(params: SeedBillParams) -> Result<()> {
    let db = open_database(&params.database).await?;
    let amount = Paise::try_from(params.amount)?;
    let bill = NewBill::new(params.user_id, params.bill_number, params.billing_month, amount, params.due_date)
        .with_units_consumed(params.units_consumed);
    let bill = db.insert_bill(bill).await?;
    println!("Bill {} ({}) created with id {}, due {}", bill.bill_number, bill.amount, bill.id, bill.due_date);
    Ok(())
}
