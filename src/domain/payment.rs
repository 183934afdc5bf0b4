use serde::{Deserialize, Serialize};

/// Processor-side view of an authorized payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    /// Id of the charge created for this intent, used as the bank return code.
    pub charge_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub brand: String,
    pub last4: String,
    pub exp_month: i32,
    pub exp_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: String,
    pub card: Option<Card>,
}

/// What the payer's browser posts once the processor confirmed the payment.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub payment_intent: String,
    pub payment_method: String,
    pub payment_amount: i64,
    pub payment_currency: String,
    pub widget_id: i32,
}

/// Receipt handed to the receipt page through the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub payment_intent_id: String,
    pub payment_method_id: String,
    pub payment_amount: i64,
    pub payment_currency: String,
    pub last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub bank_return_code: String,
}

#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub customer_id: i32,
    pub transaction_id: i32,
    pub order_id: i32,
    pub receipt: Receipt,
}
