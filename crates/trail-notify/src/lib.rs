pub mod apns;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod message;
pub mod request;

pub use apns::{ApnsConfig, ApnsFactory, ApnsGateway};
pub use dispatcher::{DeliveryReport, PushDispatcher, DEFAULT_SEND_TIMEOUT};
pub use error::PushError;
pub use gateway::{GatewayFactory, PushGateway};
pub use message::{Notification, ALERT_CATEGORY_TAG, ALERT_IMAGE_URL};
pub use request::DeliveryRequest;
