// src/services/checkout_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    config::ChannelSettings,
    models::{
        cart::CartLineItem,
        customer::{CustomerData, DeliveryType},
        order::{CheckoutReceipt, FeeQuote, Order},
    },
    services::{
        cart::Cart,
        delivery_fee::DeliveryFeeTable,
        message::{channel_url, format_message},
        pricing::{compute_subtotal, compute_total, format_brl},
        security::generate_order_id,
        validation::{sanitize_customer, validate_customer},
    },
};

/// Entrega a URL final ao canal externo. Não há confirmação nem retry:
/// depois de chamado, o sistema não sabe se a mensagem chegou.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, url: &str);
}

// No servidor quem abre o WhatsApp é o navegador, a partir da URL devolvida.
pub struct LogDispatcher;

impl Dispatcher for LogDispatcher {
    fn dispatch(&self, url: &str) {
        tracing::info!(url_len = url.len(), "📤 Pedido entregue ao canal de mensagens");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Editing,
    Validating,
    Valid,
    Submitting,
    Confirmed,
}

// Uma tentativa de envio do formulário:
// Editing -> Validating -> (inválido -> Editing | Valid -> Submitting) -> Confirmed
#[derive(Debug, Clone)]
pub struct OrderSession {
    state: SubmissionState,
    customer: CustomerData,
    errors: Vec<String>,
    order_id: Option<String>,
}

impl OrderSession {
    pub fn new(customer: CustomerData) -> Self {
        Self {
            state: SubmissionState::Editing,
            customer,
            errors: Vec::new(),
            order_id: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn customer(&self) -> &CustomerData {
        &self.customer
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// Sanitiza e valida. Se falhar, volta para `Editing` com a lista de
    /// erros; se passar, fica em `Valid` com os dados já limpos.
    pub fn validate(&mut self) -> Result<bool, AppError> {
        self.expect_state(SubmissionState::Editing, "validar")?;
        self.state = SubmissionState::Validating;
        self.errors.clear();

        let sanitized = sanitize_customer(&self.customer);
        let report = validate_customer(&sanitized);
        self.customer = sanitized;

        if report.valid {
            self.state = SubmissionState::Valid;
        } else {
            self.errors = report.errors;
            self.state = SubmissionState::Editing;
        }
        Ok(report.valid)
    }

    pub fn begin_submit(&mut self) -> Result<&CustomerData, AppError> {
        self.expect_state(SubmissionState::Valid, "enviar")?;
        self.state = SubmissionState::Submitting;
        Ok(&self.customer)
    }

    pub fn confirm(&mut self, order_id: String) -> Result<(), AppError> {
        self.expect_state(SubmissionState::Submitting, "confirmar")?;
        self.order_id = Some(order_id);
        self.state = SubmissionState::Confirmed;
        Ok(())
    }

    /// Volta ao formulário em branco. O carrinho não é tocado aqui; quem
    /// chama decide se limpa após a confirmação.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Editing;
        self.customer = CustomerData::default();
        self.errors.clear();
        self.order_id = None;
    }

    fn expect_state(&self, expected: SubmissionState, action: &str) -> Result<(), AppError> {
        if self.state != expected {
            return Err(AppError::ContractViolation(format!(
                "não é possível {} um pedido no estado {:?}",
                action, self.state
            )));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    fee_table: Arc<DeliveryFeeTable>,
    channel: ChannelSettings,
    dispatcher: Arc<dyn Dispatcher>,
}

impl CheckoutService {
    pub fn new(
        fee_table: Arc<DeliveryFeeTable>,
        channel: ChannelSettings,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            fee_table,
            channel,
            dispatcher,
        }
    }

    pub fn delivery_fee(&self, customer: &CustomerData) -> Decimal {
        self.fee_table.resolve_for(
            customer.address.as_deref().unwrap_or_default(),
            customer.neighborhood.as_deref(),
            customer.delivery_type,
        )
    }

    /// Prévia dos valores enquanto o cliente preenche o endereço.
    pub fn quote(
        &self,
        lines: &[CartLineItem],
        address: &str,
        neighborhood: Option<&str>,
        delivery_type: DeliveryType,
    ) -> FeeQuote {
        let subtotal = compute_subtotal(lines);
        let delivery_fee = self.fee_table.resolve_for(address, neighborhood, delivery_type);
        let total = compute_total(subtotal, delivery_fee);
        FeeQuote {
            subtotal,
            delivery_fee,
            total,
            total_label: format_brl(total),
        }
    }

    pub fn checkout(&self, cart: &Cart, customer: CustomerData) -> Result<CheckoutReceipt, AppError> {
        self.checkout_with(cart, customer, generate_order_id)
    }

    /// Fluxo completo de envio. O número do pedido vem de `next_order_id`
    /// e só é gerado depois da validação passar.
    pub fn checkout_with(
        &self,
        cart: &Cart,
        customer: CustomerData,
        next_order_id: impl FnOnce() -> String,
    ) -> Result<CheckoutReceipt, AppError> {
        if cart.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let mut session = OrderSession::new(customer);
        if !session.validate()? {
            return Err(AppError::CustomerValidation(session.errors().to_vec()));
        }

        let customer = session.begin_submit()?.clone();
        let order = self.build_order(next_order_id(), cart, customer);
        let message = format_message(&order);
        let redirect_url = channel_url(&self.channel, &message);

        self.dispatcher.dispatch(&redirect_url);
        session.confirm(order.order_id.clone())?;

        tracing::info!(
            "✅ Pedido {} enviado: {} itens, total {}",
            order.order_id,
            cart.total_items(),
            format_brl(order.total)
        );

        Ok(CheckoutReceipt {
            order_id: order.order_id,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            message,
            redirect_url,
        })
    }

    fn build_order(&self, order_id: String, cart: &Cart, customer: CustomerData) -> Order {
        let subtotal = cart.subtotal();
        let delivery_fee = self.delivery_fee(&customer);
        Order {
            order_id,
            lines: cart.lines().to_vec(),
            total: compute_total(subtotal, delivery_fee),
            subtotal,
            delivery_fee,
            customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{customer::PaymentMethod, menu::MenuItem};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDispatcher {
        urls: Mutex<Vec<String>>,
    }

    impl Dispatcher for RecordingDispatcher {
        fn dispatch(&self, url: &str) {
            self.urls.lock().unwrap().push(url.to_string());
        }
    }

    fn service(dispatcher: Arc<RecordingDispatcher>) -> CheckoutService {
        CheckoutService::new(
            Arc::new(DeliveryFeeTable::default()),
            ChannelSettings {
                host: "wa.me".into(),
                recipient: "5581995130952".into(),
            },
            dispatcher,
        )
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let burger = MenuItem {
            id: 1,
            name: "Burger".into(),
            description: String::new(),
            price: Decimal::new(1000, 2),
            popular: false,
            category: "burgers".into(),
        };
        cart.add_item(&burger, None).unwrap();
        cart.add_item(&burger, None).unwrap();
        cart
    }

    fn delivery_customer() -> CustomerData {
        CustomerData {
            name: "Maria Silva".into(),
            phone: "(81) 99999-9999".into(),
            address: Some("Rua X, Céu Azul, 123".into()),
            delivery_type: DeliveryType::Delivery,
            payment_method: PaymentMethod::Card,
            observations: None,
            neighborhood: None,
        }
    }

    #[test]
    fn test_checkout_computes_totals_and_dispatches() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let receipt = service(dispatcher.clone())
            .checkout_with(&cart(), delivery_customer(), || "MAT-TEST1".to_string())
            .unwrap();

        assert_eq!(receipt.order_id, "MAT-TEST1");
        assert_eq!(receipt.subtotal, Decimal::new(2000, 2));
        assert_eq!(receipt.delivery_fee, Decimal::new(500, 2));
        assert_eq!(receipt.total, Decimal::new(2500, 2));
        assert!(receipt
            .redirect_url
            .starts_with("https://wa.me/5581995130952?text="));

        let urls = dispatcher.urls.lock().unwrap();
        assert_eq!(urls.as_slice(), [receipt.redirect_url.clone()]);

        let decoded = urlencoding::decode(&receipt.message).unwrap();
        assert!(decoded.contains("Cartão"));
        assert!(decoded.contains("R$ 25,00"));
    }

    #[test]
    fn test_invalid_customer_blocks_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let mut customer = delivery_customer();
        customer.name = "A".into();
        customer.phone = "123".into();
        customer.address = None;

        let mut generated = false;
        let result = service(dispatcher.clone()).checkout_with(&cart(), customer, || {
            generated = true;
            "MAT-X".to_string()
        });

        match result {
            Err(AppError::CustomerValidation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("esperava erro de validação, veio {:?}", other.map(|r| r.order_id)),
        }
        assert!(!generated);
        assert!(dispatcher.urls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let result = service(dispatcher).checkout(&Cart::new(), delivery_customer());
        assert!(matches!(result, Err(AppError::EmptyCart)));
    }

    #[test]
    fn test_each_checkout_gets_new_order_id() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let svc = service(dispatcher.clone());
        let a = svc.checkout(&cart(), delivery_customer()).unwrap();
        let b = svc.checkout(&cart(), delivery_customer()).unwrap();

        assert_ne!(a.order_id, b.order_id);
        assert_eq!(dispatcher.urls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_quote_uses_selected_neighborhood() {
        let svc = service(Arc::new(RecordingDispatcher::default()));
        let lines = cart().into_lines();

        let quote = svc.quote(&lines, "Rua Y, 45", Some("tabatinga"), DeliveryType::Delivery);
        assert_eq!(quote.delivery_fee, Decimal::new(1000, 2));
        assert_eq!(quote.total_label, "R$ 30,00");

        let quote = svc.quote(&lines, "Rua Y, Tabatinga", None, DeliveryType::Pickup);
        assert_eq!(quote.delivery_fee, Decimal::ZERO);
    }

    #[test]
    fn test_session_transitions() {
        let mut session = OrderSession::new(delivery_customer());
        assert_eq!(session.state(), SubmissionState::Editing);

        assert!(session.begin_submit().is_err());
        assert!(session.validate().unwrap());
        assert_eq!(session.state(), SubmissionState::Valid);

        session.begin_submit().unwrap();
        assert_eq!(session.state(), SubmissionState::Submitting);
        session.confirm("MAT-1".into()).unwrap();
        assert_eq!(session.state(), SubmissionState::Confirmed);
        assert_eq!(session.order_id(), Some("MAT-1"));

        // Confirmed é final para esta tentativa
        assert!(session.validate().is_err());

        session.reset();
        assert_eq!(session.state(), SubmissionState::Editing);
        assert_eq!(session.customer(), &CustomerData::default());
        assert!(session.order_id().is_none());
    }

    #[test]
    fn test_invalid_session_returns_to_editing() {
        let mut customer = delivery_customer();
        customer.phone = "999".into();
        let mut session = OrderSession::new(customer);

        assert!(!session.validate().unwrap());
        assert_eq!(session.state(), SubmissionState::Editing);
        assert_eq!(session.errors(), ["Número de telefone inválido".to_string()]);

        session.reset();
        assert!(session.errors().is_empty());
    }
}
