pub mod models;
pub mod repositories;
pub mod services;

pub use models::{GatewayAccount, GatewayEnvironment, PaypalGateway};
pub use repositories::{GatewayStore, SqlGatewayRepository};
pub use services::{
    ConfigField, MethodInfo, MethodRegistry, PaymentMethod, PaypalClient, PaypalMethod,
};
