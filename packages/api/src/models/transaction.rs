use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

/// One wallet movement. A purchase shows up twice: a withdraw for the buyer
/// and a deposit for the seller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    /// Product id; `None` once the product has been deleted.
    #[serde(default)]
    pub product: Option<u64>,
    pub sender: UserRef,
    pub receiver: UserRef,
    pub amount: Decimal,
    #[serde(rename = "tx_type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Amount with its sign from the wallet owner's point of view.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdraw => -self.amount,
        }
    }
}
