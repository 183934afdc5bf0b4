use actix_session::Session;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::domain::payment::{CheckoutRequest, Receipt};
use crate::errors::AppError;
use crate::handlers::pages::PageModel;
use crate::state::AppState;

/// Session key holding the receipt between the redirect and the receipt page.
pub const RECEIPT_KEY: &str = "receipt";

/// Form posted by the card page after the processor confirmed the payment.
#[derive(Debug, Deserialize)]
pub struct PaymentSucceededForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub cardholder_email: String,
    pub payment_intent: String,
    pub payment_method: String,
    pub payment_amount: i64,
    #[serde(default)]
    pub payment_currency: String,
    pub product_id: i32,
}

impl From<PaymentSucceededForm> for CheckoutRequest {
    fn from(f: PaymentSucceededForm) -> Self {
        CheckoutRequest {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.cardholder_email,
            payment_intent: f.payment_intent,
            payment_method: f.payment_method,
            payment_amount: f.payment_amount,
            payment_currency: f.payment_currency,
            widget_id: f.product_id,
        }
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// POST /payment-succeeded
///
/// Records customer, transaction and order for a confirmed payment, then
/// redirects to the receipt.
pub async fn payment_succeeded(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<PaymentSucceededForm>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.checkout.confirm_payment(form.into_inner().into()).await?;

    session.insert(RECEIPT_KEY, &outcome.receipt).map_err(|e| {
        error!("Failed to store receipt for order {}: {}", outcome.order_id, e);
        AppError::Internal(e.to_string())
    })?;

    Ok(see_other("/receipt"))
}

/// GET /receipt
///
/// Shows the receipt once; later visits go back home.
pub async fn receipt(session: Session) -> Result<HttpResponse, AppError> {
    match session.remove_as::<Receipt>(RECEIPT_KEY) {
        Some(Ok(receipt)) => {
            Ok(HttpResponse::Ok().json(PageModel::plain("receipt", json!({ "txn": receipt }))))
        }
        Some(Err(raw)) => {
            error!("Discarding unreadable receipt in session: {}", raw);
            Err(AppError::Internal("unreadable receipt".to_string()))
        }
        None => Ok(see_other("/")),
    }
}
