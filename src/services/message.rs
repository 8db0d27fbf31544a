// src/services/message.rs

use crate::{
    config::ChannelSettings,
    models::{customer::DeliveryType, order::Order},
    services::{
        pricing::{format_brl, line_total},
        security::{format_phone, sanitize_input},
    },
};

/// Texto do pedido como o atendente vai ler no WhatsApp.
///
/// Todo campo interpolado passa de novo pelo sanitizador, mesmo que já tenha
/// sido limpo antes. A saída só depende do `Order`: mesmo pedido, mesma
/// mensagem.
pub fn compose_message(order: &Order) -> String {
    let customer = &order.customer;
    let name = sanitize_input(&customer.name);
    let phone = format_phone(&sanitize_input(&customer.phone));
    let address = customer.address.as_deref().map(sanitize_input).unwrap_or_default();
    let observations = customer
        .observations
        .as_deref()
        .map(sanitize_input)
        .unwrap_or_default();

    let mut message = format!(
        "🍔 *NOVO PEDIDO - {}*\n\n👤 *Cliente:* {}\n📱 *Telefone:* {}\n\n",
        sanitize_input(&order.order_id),
        name,
        phone
    );

    message.push_str("🛍️ *Itens do Pedido:*\n");
    for line in &order.lines {
        message.push_str(&format!(
            "• {}x {} - {}\n",
            line.quantity,
            sanitize_input(&line.name),
            format_brl(line_total(line))
        ));
        let obs = line.observations.as_deref().map(sanitize_input).unwrap_or_default();
        if !obs.is_empty() {
            message.push_str(&format!("  _Obs: {}_\n", obs));
        }
    }

    message.push_str(&format!("\n💰 *Subtotal:* {}\n", format_brl(order.subtotal)));

    match customer.delivery_type {
        DeliveryType::Delivery => {
            message.push_str(&format!(
                "🚚 *Taxa de Entrega:* {}\n📍 *Endereço:* {}\n",
                format_brl(order.delivery_fee),
                address
            ));
        }
        DeliveryType::Pickup => message.push_str("🏪 *Retirada no Balcão*\n"),
    }

    message.push_str(&format!(
        "\n💳 *Forma de Pagamento:* {}\n",
        customer.payment_method.label()
    ));
    message.push_str(&format!("\n💵 *TOTAL: {}*\n", format_brl(order.total)));

    if !observations.is_empty() {
        message.push_str(&format!("\n📝 *Observações:* {}\n", observations));
    }

    message
}

/// Mensagem codificada para ir na query string (`?text=`).
pub fn format_message(order: &Order) -> String {
    urlencoding::encode(&compose_message(order)).into_owned()
}

pub fn channel_url(channel: &ChannelSettings, encoded_message: &str) -> String {
    format!(
        "https://{}/{}?text={}",
        channel.host, channel.recipient, encoded_message
    )
}
