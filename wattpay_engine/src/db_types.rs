use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use wattpay_common::Paise;

#[derive(Debug, Clone, Error)]
#[error("Invalid value: {0}")]
pub struct ConversionError(String);

//--------------------------------------      BillStatus       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// The bill has been issued and nothing has been paid against it yet.
    Unpaid,
    /// A successful payment has been recorded for the bill. This is a terminal state.
    Paid,
}

impl Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatus::Unpaid => write!(f, "unpaid"),
            BillStatus::Paid => write!(f, "paid"),
        }
    }
}

impl FromStr for BillStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            s => Err(ConversionError(format!("Invalid bill status: {s}"))),
        }
    }
}

//--------------------------------------         Bill          ---------------------------------------------------------
/// One billing-cycle obligation owned by a single user.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub user_id: String,
    pub bill_number: String,
    /// The billing period label, e.g. "June 2024"
    pub billing_month: String,
    pub amount: Paise,
    /// Energy consumed over the billing period, in kWh
    pub units_consumed: f64,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBill {
    pub user_id: String,
    pub bill_number: String,
    pub billing_month: String,
    pub amount: Paise,
    pub units_consumed: f64,
    pub due_date: NaiveDate,
}

impl NewBill {
    pub fn new<S: Into<String>>(user_id: S, bill_number: S, billing_month: S, amount: Paise, due_date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            bill_number: bill_number.into(),
            billing_month: billing_month.into(),
            amount,
            units_consumed: 0.0,
            due_date,
        }
    }

    pub fn with_units_consumed(mut self, kwh: f64) -> Self {
        self.units_consumed = kwh;
        self
    }
}

//--------------------------------------     PaymentStatus     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    Success,
    Failed,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "Success"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Success" => Ok(Self::Success),
            "Failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------     PaymentMethod     ---------------------------------------------------------
/// The payment method the user picked on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    NetBanking,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Upi => write!(f, "upi"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::NetBanking => write!(f, "netbanking"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "netbanking" | "net_banking" => Ok(Self::NetBanking),
            s => Err(ConversionError(format!("Invalid payment method: {s}"))),
        }
    }
}

//--------------------------------------        Payment        ---------------------------------------------------------
/// A recorded attempt to settle a bill. Payments are never mutated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub user_id: String,
    /// The bill this payment settles. Historical payments may not reference a bill.
    pub bill_id: Option<i64>,
    /// The gateway's payment identifier. Unique across all payments.
    pub transaction_id: String,
    pub amount: Paise,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    pub user_id: String,
    pub bill_id: Option<i64>,
    pub transaction_id: String,
    pub amount: Paise,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
}

impl NewPayment {
    /// A successful payment of `amount` with no bill attached. Use [`Self::for_bill`] to link it to a bill.
    pub fn new<S: Into<String>>(user_id: S, transaction_id: S, amount: Paise, payment_method: PaymentMethod) -> Self {
        Self {
            user_id: user_id.into(),
            bill_id: None,
            transaction_id: transaction_id.into(),
            amount,
            payment_method,
            status: PaymentStatus::Success,
        }
    }

    pub fn for_bill(mut self, bill_id: i64) -> Self {
        self.bill_id = Some(bill_id);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }
}

//--------------------------------------    NotificationType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Warning,
    Alert,
    Success,
    Info,
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Warning => write!(f, "warning"),
            NotificationType::Alert => write!(f, "alert"),
            NotificationType::Success => write!(f, "success"),
            NotificationType::Info => write!(f, "info"),
        }
    }
}

impl FromStr for NotificationType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "alert" => Ok(Self::Alert),
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            s => Err(ConversionError(format!("Invalid notification type: {s}"))),
        }
    }
}

//--------------------------------------      Notification     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    pub fn new<S: Into<String>>(user_id: S, notification_type: NotificationType, title: S, message: S) -> Self {
        Self { user_id: user_id.into(), notification_type, title: title.into(), message: message.into() }
    }
}
