pub mod payment_method;
pub mod paypal;

pub use payment_method::{ConfigField, MethodInfo, MethodRegistry, PaymentMethod};
pub use paypal::{PaypalClient, PaypalMethod};
