// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod sheet;
pub mod sms_chef;

pub use sheet::{SheetColumns, SheetSource};
pub use sms_chef::{SmsChefSender, SmsGatewayConfig};
