use chrono::{TimeZone, Utc};
use payledger::modules::currencies::Currency;
use payledger::modules::gateways::models::{GatewayAccount, GatewayEnvironment, PaypalGateway};
use payledger::modules::transactions::models::{LedgerTransaction, TransactionStatus};
use payledger::modules::transactions::services::RemotePayment;
use serde_json::json;

/// Build a remote payment from the wire shape the listing API returns
pub fn remote_payment(
    id: &str,
    create_time: &str,
    state: &str,
    description: &str,
    total: &str,
    currency: &str,
) -> RemotePayment {
    RemotePayment::from_value(json!({
        "id": id,
        "intent": "sale",
        "create_time": create_time,
        "state": state,
        "transactions": [
            {
                "description": description,
                "amount": {"total": total, "currency": currency}
            }
        ]
    }))
    .unwrap()
}

pub fn usd() -> Currency {
    Currency {
        id: "cur-usd".to_string(),
        code: "USD".to_string(),
        name: "US Dollar".to_string(),
        digits: 2,
    }
}

pub fn eur() -> Currency {
    Currency {
        id: "cur-eur".to_string(),
        code: "EUR".to_string(),
        name: "Euro".to_string(),
        digits: 2,
    }
}

pub fn paypal_gateway() -> PaypalGateway {
    PaypalGateway {
        account: GatewayAccount {
            id: "gw-1".to_string(),
            name: "PayPal main".to_string(),
            method: "paypal".to_string(),
            environment: GatewayEnvironment::Sandbox,
            is_active: true,
            created_at: None,
            updated_at: None,
        },
        email: Some("merchant@example.com".to_string()),
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        from_transactions: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        to_transactions: None,
    }
}

pub fn paypal_gateway_without_credentials() -> PaypalGateway {
    let mut gateway = paypal_gateway();
    gateway.client_id = String::new();
    gateway.client_secret = String::new();
    gateway
}

/// An already-recorded ledger transaction for dedup scenarios
pub fn recorded_transaction(gateway_account_id: &str, external_ref: &str) -> LedgerTransaction {
    LedgerTransaction::new(
        gateway_account_id.to_string(),
        external_ref.to_string(),
        external_ref.to_string(),
        external_ref.to_string(),
        "previously imported".to_string(),
        chrono::NaiveDate::from_ymd_opt(2019, 12, 1).unwrap(),
        rust_decimal::Decimal::ONE,
        "cur-usd".to_string(),
        TransactionStatus::Authorized,
        "{}".to_string(),
    )
    .unwrap()
}
