use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::payment::{Card, PaymentIntent, PaymentMethod};
use crate::domain::ports::PaymentProcessor;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("Could not initialize the Stripe client: {0}")]
    Initialization(String),
    #[error("Invalid Stripe URL: {0}")]
    InvalidUrl(String),
    #[error("Stripe request failed: {0}")]
    Request(String),
    #[error("Stripe returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Could not decode Stripe response: {0}")]
    Json(String),
}

impl From<StripeError> for DomainError {
    fn from(e: StripeError) -> Self {
        DomainError::Payment(e.to_string())
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct StripeList<T> {
    #[serde(default)]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct StripeCharge {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    latest_charge: Option<String>,
    /// Only present on older API versions.
    #[serde(default)]
    charges: Option<StripeList<StripeCharge>>,
}

impl From<StripePaymentIntent> for PaymentIntent {
    fn from(pi: StripePaymentIntent) -> Self {
        let first_charge = pi
            .charges
            .and_then(|list| list.data.into_iter().next())
            .map(|charge| charge.id);
        PaymentIntent {
            id: pi.id,
            amount: pi.amount,
            currency: pi.currency,
            charge_id: first_charge.or(pi.latest_charge),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeCard {
    #[serde(default)]
    brand: String,
    last4: String,
    exp_month: i32,
    exp_year: i32,
}

#[derive(Debug, Deserialize)]
struct StripePaymentMethod {
    id: String,
    #[serde(default)]
    card: Option<StripeCard>,
}

impl From<StripePaymentMethod> for PaymentMethod {
    fn from(pm: StripePaymentMethod) -> Self {
        PaymentMethod {
            id: pm.id,
            card: pm.card.map(|c| Card {
                brand: c.brand,
                last4: c.last4,
                exp_month: c.exp_month,
                exp_year: c.exp_year,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: String,
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Read-only client for the Stripe REST API.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    base_url: Url,
}

impl StripeClient {
    pub fn new(base_url: &str, secret_key: &str) -> Result<Self, StripeError> {
        let base_url = Url::parse(base_url).map_err(|e| StripeError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StripeError::InvalidUrl(base_url.to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {secret_key}"))
            .map_err(|e| StripeError::Initialization(e.to_string()))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StripeError::Initialization(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Builds `{base}/v1/{resource}/{id}`; the id is percent-encoded as a
    /// single path segment.
    fn url(&self, resource: &str, id: &str) -> Result<Url, StripeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StripeError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v1", resource, id]);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str, id: &str) -> Result<T, StripeError> {
        let url = self.url(resource, id)?;
        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StripeError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| StripeError::Json(e.to_string()))
        } else {
            let body = response
                .text()
                .await
                .map_err(|e| StripeError::Request(e.to_string()))?;
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            Err(StripeError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    pub async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, StripeError> {
        let intent: StripePaymentIntent = self.get("payment_intents", id).await?;
        debug!("Retrieved payment intent {} for {} {}", intent.id, intent.amount, intent.currency);
        Ok(intent.into())
    }

    pub async fn retrieve_payment_method(&self, id: &str) -> Result<PaymentMethod, StripeError> {
        let method: StripePaymentMethod = self.get("payment_methods", id).await?;
        debug!("Retrieved payment method {}", method.id);
        Ok(method.into())
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, DomainError> {
        Ok(StripeClient::retrieve_payment_intent(self, id).await?)
    }

    async fn retrieve_payment_method(&self, id: &str) -> Result<PaymentMethod, DomainError> {
        Ok(StripeClient::retrieve_payment_method(self, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "sk_test_123";

    fn free_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .expect("bind failed")
            .local_addr()
            .expect("addr failed")
            .port()
    }

    fn authorized(req: &HttpRequest) -> bool {
        req.headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer sk_test_123")
    }

    async fn payment_intent(req: HttpRequest, path: web::Path<String>) -> HttpResponse {
        if !authorized(&req) {
            return HttpResponse::Unauthorized()
                .json(json!({ "error": { "message": "Invalid API Key provided" } }));
        }
        match path.as_str() {
            "pi_legacy" => HttpResponse::Ok().json(json!({
                "id": "pi_legacy",
                "object": "payment_intent",
                "amount": 1000,
                "currency": "usd",
                "charges": { "object": "list", "data": [{ "id": "ch_legacy" }] }
            })),
            "pi_current" => HttpResponse::Ok().json(json!({
                "id": "pi_current",
                "object": "payment_intent",
                "amount": 2500,
                "currency": "cad",
                "latest_charge": "ch_current"
            })),
            other => HttpResponse::NotFound().json(json!({
                "error": { "message": format!("No such payment_intent: '{other}'") }
            })),
        }
    }

    async fn payment_method(req: HttpRequest, path: web::Path<String>) -> HttpResponse {
        if !authorized(&req) {
            return HttpResponse::Unauthorized().finish();
        }
        HttpResponse::Ok().json(json!({
            "id": path.into_inner(),
            "object": "payment_method",
            "card": { "brand": "visa", "last4": "4242", "exp_month": 8, "exp_year": 2031 }
        }))
    }

    fn start_fake_stripe() -> String {
        let port = free_port();
        let server = HttpServer::new(|| {
            App::new()
                .route("/v1/payment_intents/{id}", web::get().to(payment_intent))
                .route("/v1/payment_methods/{id}", web::get().to(payment_method))
        })
        .workers(1)
        .bind(("127.0.0.1", port))
        .expect("Failed to bind fake Stripe")
        .run();
        tokio::spawn(server);
        format!("http://127.0.0.1:{port}")
    }

    #[tokio::test]
    async fn reads_first_charge_from_legacy_intent() {
        let client = StripeClient::new(&start_fake_stripe(), SECRET).expect("client");

        let intent = client
            .retrieve_payment_intent("pi_legacy")
            .await
            .expect("lookup failed");

        assert_eq!(intent.amount, 1000);
        assert_eq!(intent.currency, "usd");
        assert_eq!(intent.charge_id.as_deref(), Some("ch_legacy"));
    }

    #[tokio::test]
    async fn falls_back_to_latest_charge() {
        let client = StripeClient::new(&start_fake_stripe(), SECRET).expect("client");

        let intent = client
            .retrieve_payment_intent("pi_current")
            .await
            .expect("lookup failed");

        assert_eq!(intent.amount, 2500);
        assert_eq!(intent.charge_id.as_deref(), Some("ch_current"));
    }

    #[tokio::test]
    async fn reads_card_details() {
        let client = StripeClient::new(&start_fake_stripe(), SECRET).expect("client");

        let method = client
            .retrieve_payment_method("pm_card_visa")
            .await
            .expect("lookup failed");

        let card = method.card.expect("card");
        assert_eq!(method.id, "pm_card_visa");
        assert_eq!(card.last4, "4242");
        assert_eq!((card.exp_month, card.exp_year), (8, 2031));
    }

    #[tokio::test]
    async fn unknown_intent_surfaces_stripe_message() {
        let client = StripeClient::new(&start_fake_stripe(), SECRET).expect("client");

        let err = client
            .retrieve_payment_intent("pi_missing")
            .await
            .expect_err("lookup should fail");

        match err {
            StripeError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("pi_missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn wrong_secret_is_an_api_error() {
        let client = StripeClient::new(&start_fake_stripe(), "sk_wrong").expect("client");

        let err = PaymentProcessor::retrieve_payment_intent(&client, "pi_legacy")
            .await
            .expect_err("lookup should fail");

        assert!(matches!(err, DomainError::Payment(msg) if msg.contains("401")));
    }

    #[test]
    fn charge_list_without_data_decodes_as_empty() {
        let raw = json!({
            "id": "pi_empty",
            "amount": 700,
            "currency": "eur",
            "latest_charge": "ch_latest",
            "charges": { "object": "list" }
        });

        let wire: StripePaymentIntent = serde_json::from_value(raw).expect("decode");
        assert!(wire.charges.as_ref().is_some_and(|list| list.data.is_empty()));

        let intent = PaymentIntent::from(wire);
        assert_eq!(intent.charge_id.as_deref(), Some("ch_latest"));
    }

    #[test]
    fn ids_are_encoded_as_one_segment() {
        let client = StripeClient::new("https://api.stripe.com", SECRET).expect("client");

        let url = client.url("payment_intents", "pi_1/../x").expect("url");

        assert_eq!(
            url.as_str(),
            "https://api.stripe.com/v1/payment_intents/pi_1%2F..%2Fx"
        );
    }

    #[test]
    fn rejects_unparsable_base_url() {
        assert!(matches!(
            StripeClient::new("not a url", SECRET),
            Err(StripeError::InvalidUrl(_))
        ));
    }
}
