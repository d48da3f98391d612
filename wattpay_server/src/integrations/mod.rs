pub mod notifier;
pub mod razorpay;

pub use notifier::create_notifier_event_handlers;
pub use razorpay::RazorpayOrderIssuer;
