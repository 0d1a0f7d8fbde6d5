pub mod gateway_account;

pub use gateway_account::{GatewayAccount, GatewayEnvironment, PaypalGateway};
