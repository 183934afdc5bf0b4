use std::sync::Arc;

use actix_web::web;
use log::{debug, error, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::order::{NewCustomer, NewOrder, NewTransaction, OrderStatus, TransactionStatus};
use crate::domain::payment::{CheckoutOutcome, CheckoutRequest, Receipt};
use crate::domain::ports::{OrderRepository, PaymentProcessor};

/// Turns a processor-confirmed payment into customer, transaction and order
/// rows.
///
/// The three inserts are independent statements. A failure part-way leaves
/// the rows written so far in place.
pub struct CheckoutService {
    repo: Arc<dyn OrderRepository>,
    processor: Arc<dyn PaymentProcessor>,
}

impl CheckoutService {
    pub fn new(repo: Arc<dyn OrderRepository>, processor: Arc<dyn PaymentProcessor>) -> Self {
        Self { repo, processor }
    }

    pub async fn confirm_payment(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutOutcome, DomainError> {
        let receipt = self.build_receipt(&request).await.inspect_err(|e| {
            error!(
                "Payment lookup failed for intent {}: {}",
                request.payment_intent, e
            );
        })?;

        let customer = NewCustomer {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
        };
        let customer_id = self
            .blocking(move |repo| repo.insert_customer(customer))
            .await
            .inspect_err(|e| error!("Failed to save customer: {}", e))?;
        info!("Saved customer {}", customer_id);

        let txn = NewTransaction {
            amount: receipt.payment_amount,
            currency: receipt.payment_currency.clone(),
            last_four: receipt.last_four.clone(),
            bank_return_code: receipt.bank_return_code.clone(),
            status: TransactionStatus::PendingCapture,
            expiry_month: receipt.expiry_month,
            expiry_year: receipt.expiry_year,
            payment_intent: receipt.payment_intent_id.clone(),
            payment_method: receipt.payment_method_id.clone(),
        };
        let transaction_id = self
            .blocking(move |repo| repo.insert_transaction(txn))
            .await
            .inspect_err(|e| error!("Failed to save transaction for customer {}: {}", customer_id, e))?;
        info!("Saved transaction {}", transaction_id);

        let order = NewOrder {
            widget_id: request.widget_id,
            transaction_id,
            customer_id,
            status: OrderStatus::Cleared,
            quantity: 1,
            amount: receipt.payment_amount,
        };
        let order_id = self
            .blocking(move |repo| repo.insert_order(order))
            .await
            .inspect_err(|e| error!("Failed to save order for transaction {}: {}", transaction_id, e))?;
        info!(
            "Saved order {} (widget {}, transaction {}, customer {})",
            order_id, request.widget_id, transaction_id, customer_id
        );

        Ok(CheckoutOutcome {
            customer_id,
            transaction_id,
            order_id,
            receipt,
        })
    }

    /// Looks up the intent and its payment method and merges them with the
    /// posted form. Amount and currency are taken from the processor.
    async fn build_receipt(&self, request: &CheckoutRequest) -> Result<Receipt, DomainError> {
        debug!("Retrieving payment intent {}", request.payment_intent);
        let intent = self
            .processor
            .retrieve_payment_intent(&request.payment_intent)
            .await?;

        debug!("Retrieving payment method {}", request.payment_method);
        let method = self
            .processor
            .retrieve_payment_method(&request.payment_method)
            .await?;

        let card = method.card.ok_or_else(|| {
            DomainError::Payment(format!("payment method {} has no card", method.id))
        })?;

        if intent.amount != request.payment_amount {
            warn!(
                "Posted amount {} differs from confirmed amount {} for intent {}",
                request.payment_amount, intent.amount, intent.id
            );
        }

        Ok(Receipt {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            payment_intent_id: request.payment_intent.clone(),
            payment_method_id: request.payment_method.clone(),
            payment_amount: intent.amount,
            payment_currency: if intent.currency.is_empty() {
                request.payment_currency.clone()
            } else {
                intent.currency
            },
            last_four: card.last4,
            expiry_month: card.exp_month,
            expiry_year: card.exp_year,
            bank_return_code: intent.charge_id.unwrap_or_default(),
        })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&dyn OrderRepository) -> Result<T, DomainError> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        web::block(move || f(repo.as_ref()))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::CheckoutService;
    use crate::domain::errors::DomainError;
    use crate::domain::order::{OrderStatus, TransactionStatus};
    use crate::domain::payment::{Card, CheckoutRequest, PaymentIntent, PaymentMethod};
    use crate::testing::{InMemoryOrderRepository, MockProcessor};

    fn request(widget_id: i32) -> CheckoutRequest {
        CheckoutRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            payment_intent: "pi_123".to_string(),
            payment_method: "pm_456".to_string(),
            payment_amount: 1000,
            payment_currency: "usd".to_string(),
            widget_id,
        }
    }

    fn processor_ok(amount: i64) -> MockProcessor {
        let mut processor = MockProcessor::new();
        processor
            .expect_retrieve_payment_intent()
            .times(1)
            .returning(move |id| {
                Ok(PaymentIntent {
                    id: id.to_string(),
                    amount,
                    currency: "usd".to_string(),
                    charge_id: Some("ch_789".to_string()),
                })
            });
        processor
            .expect_retrieve_payment_method()
            .times(1)
            .returning(|id| {
                Ok(PaymentMethod {
                    id: id.to_string(),
                    card: Some(Card {
                        brand: "visa".to_string(),
                        last4: "4242".to_string(),
                        exp_month: 12,
                        exp_year: 2030,
                    }),
                })
            });
        processor
    }

    #[actix_web::test]
    async fn successful_checkout_creates_linked_rows() {
        let repo = Arc::new(InMemoryOrderRepository::default());
        let service = CheckoutService::new(repo.clone(), Arc::new(processor_ok(1000)));

        let outcome = service
            .confirm_payment(request(3))
            .await
            .expect("checkout failed");

        let customers = repo.customers();
        let transactions = repo.transactions();
        let orders = repo.orders();
        assert_eq!(customers.len(), 1);
        assert_eq!(transactions.len(), 1);
        assert_eq!(orders.len(), 1);

        let (customer_id, customer) = &customers[0];
        assert_eq!(*customer_id, outcome.customer_id);
        assert_eq!(customer.email, "ada@example.com");

        let (transaction_id, txn) = &transactions[0];
        assert_eq!(*transaction_id, outcome.transaction_id);
        assert_eq!(txn.amount, 1000);
        assert_eq!(txn.currency, "usd");
        assert_eq!(txn.last_four, "4242");
        assert_eq!(txn.bank_return_code, "ch_789");
        assert_eq!(txn.status, TransactionStatus::PendingCapture);

        let (order_id, order) = &orders[0];
        assert_eq!(*order_id, outcome.order_id);
        assert_eq!(order.transaction_id, outcome.transaction_id);
        assert_eq!(order.customer_id, outcome.customer_id);
        assert_eq!(order.widget_id, 3);
        assert_eq!(order.quantity, 1);
        assert_eq!(order.amount, 1000);
        assert_eq!(order.status, OrderStatus::Cleared);
    }

    #[actix_web::test]
    async fn receipt_carries_card_and_processor_details() {
        let repo = Arc::new(InMemoryOrderRepository::default());
        let service = CheckoutService::new(repo, Arc::new(processor_ok(1000)));

        let receipt = service
            .confirm_payment(request(1))
            .await
            .expect("checkout failed")
            .receipt;

        assert_eq!(receipt.payment_intent_id, "pi_123");
        assert_eq!(receipt.payment_method_id, "pm_456");
        assert_eq!(receipt.last_four, "4242");
        assert_eq!(receipt.expiry_month, 12);
        assert_eq!(receipt.expiry_year, 2030);
        assert_eq!(receipt.bank_return_code, "ch_789");
    }

    #[actix_web::test]
    async fn confirmed_amount_wins_over_posted_amount() {
        let repo = Arc::new(InMemoryOrderRepository::default());
        let service = CheckoutService::new(repo.clone(), Arc::new(processor_ok(1500)));

        service
            .confirm_payment(request(1))
            .await
            .expect("checkout failed");

        assert_eq!(repo.transactions()[0].1.amount, 1500);
        assert_eq!(repo.orders()[0].1.amount, 1500);
    }

    #[actix_web::test]
    async fn intent_lookup_failure_creates_no_rows() {
        let repo = Arc::new(InMemoryOrderRepository::default());
        let mut processor = MockProcessor::new();
        processor
            .expect_retrieve_payment_intent()
            .times(1)
            .returning(|_| Err(DomainError::Payment("No such payment_intent".to_string())));
        processor.expect_retrieve_payment_method().never();
        let service = CheckoutService::new(repo.clone(), Arc::new(processor));

        let result = service.confirm_payment(request(1)).await;

        assert!(matches!(result, Err(DomainError::Payment(_))));
        assert!(repo.customers().is_empty());
        assert!(repo.transactions().is_empty());
        assert!(repo.orders().is_empty());
    }

    #[actix_web::test]
    async fn method_without_card_is_rejected() {
        let repo = Arc::new(InMemoryOrderRepository::default());
        let mut processor = MockProcessor::new();
        processor.expect_retrieve_payment_intent().returning(|id| {
            Ok(PaymentIntent {
                id: id.to_string(),
                amount: 1000,
                currency: "usd".to_string(),
                charge_id: None,
            })
        });
        processor.expect_retrieve_payment_method().returning(|id| {
            Ok(PaymentMethod {
                id: id.to_string(),
                card: None,
            })
        });
        let service = CheckoutService::new(repo.clone(), Arc::new(processor));

        let result = service.confirm_payment(request(1)).await;

        assert!(matches!(result, Err(DomainError::Payment(_))));
        assert!(repo.customers().is_empty());
    }

    #[actix_web::test]
    async fn order_insert_failure_leaves_earlier_rows() {
        let repo = Arc::new(InMemoryOrderRepository::default());
        repo.fail_order_inserts();
        let service = CheckoutService::new(repo.clone(), Arc::new(processor_ok(1000)));

        let result = service.confirm_payment(request(1)).await;

        assert!(matches!(result, Err(DomainError::Internal(_))));
        assert_eq!(repo.customers().len(), 1);
        assert_eq!(repo.transactions().len(), 1);
        assert!(repo.orders().is_empty());
    }
}
