use clap::{Args, Parser, Subcommand};
use url::Url;
use wattpay_engine::db_types::PaymentMethod;

mod commands;
mod formatting;
mod gateway;
mod server_client;

use crate::server_client::DEFAULT_SERVER_URL;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/wattpay.db";

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Tools for operating and testing a WattPay server")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "order", about = "Ask the server to mint a Razorpay order")]
    Order(OrderParams),
    #[clap(name = "remind", about = "Trigger the server's due-date reminder sweep")]
    Remind(ServerParams),
    #[clap(name = "pay", about = "Pay a bill in the local store, with a scripted checkout outcome")]
    Pay(PayParams),
    #[clap(name = "history", about = "Print a user's bills, payments and notifications")]
    History(HistoryParams),
    #[clap(name = "seed-bill", about = "Insert a bill into the local store")]
    SeedBill(SeedBillParams),
}

#[derive(Debug, Args)]
pub struct ServerParams {
    /// The WattPay server's base URL
    #[arg(short = 's', long = "server", env = "WATTPAY_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: Url,
}

#[derive(Debug, Args)]
pub struct DatabaseParams {
    /// The SQLite database the server uses
    #[arg(short = 'd', long = "database", env = "WPS_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,
}

#[derive(Debug, Args)]
pub struct OrderParams {
    #[command(flatten)]
    server: ServerParams,
    /// The amount, in rupees
    #[arg(short = 'a', long = "amount")]
    amount: f64,
    #[arg(short = 'c', long = "currency")]
    currency: Option<String>,
    #[arg(short = 'r', long = "receipt")]
    receipt: Option<String>,
}

#[derive(Debug, Args)]
pub struct PayParams {
    #[command(flatten)]
    server: ServerParams,
    #[command(flatten)]
    database: DatabaseParams,
    /// The user paying the bill. Must own the bill.
    #[arg(short = 'u', long = "user")]
    user_id: String,
    /// Prefilled on the checkout page
    #[arg(short = 'e', long = "email")]
    email: Option<String>,
    /// The database id of the bill to pay
    #[arg(short = 'b', long = "bill")]
    bill_id: i64,
    /// upi, card or netbanking
    #[arg(short = 'm', long = "method", default_value = "upi")]
    method: PaymentMethod,
    /// The payment id the gateway reports on success. If omitted, a local id is generated.
    #[arg(short = 'p', long = "payment-id")]
    payment_id: Option<String>,
    /// Close the checkout without paying
    #[arg(long = "dismiss")]
    dismiss: bool,
    /// Have the gateway report a failed payment, with this reason
    #[arg(long = "fail")]
    fail: Option<String>,
}

#[derive(Debug, Args)]
pub struct HistoryParams {
    #[command(flatten)]
    database: DatabaseParams,
    #[arg(short = 'u', long = "user")]
    user_id: String,
    /// Mark this notification as read before printing
    #[arg(short = 'r', long = "read")]
    mark_read: Option<i64>,
}

#[derive(Debug, Args)]
pub struct SeedBillParams {
    #[command(flatten)]
    database: DatabaseParams,
    #[arg(short = 'u', long = "user")]
    user_id: String,
    #[arg(short = 'n', long = "number")]
    bill_number: String,
    /// The billing period label, e.g. "June 2024"
    #[arg(short = 'm', long = "month")]
    billing_month: String,
    /// The amount, in rupees
    #[arg(short = 'a', long = "amount")]
    amount: f64,
    #[arg(short = 'k', long = "units", default_value = "0")]
    units_consumed: f64,
    /// The due date, as YYYY-MM-DD
    #[arg(short = 'D', long = "due")]
    due_date: chrono::NaiveDate,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let result = match cli.command {
        Command::Order(params) => commands::create_order(params).await,
        Command::Remind(params) => commands::send_reminders(params).await,
        Command::Pay(params) => commands::pay_bill(params).await,
        Command::History(params) => commands::print_history(params).await,
        Command::SeedBill(params) => commands::seed_bill(params).await,
    };
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
