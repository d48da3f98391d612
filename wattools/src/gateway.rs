use log::*;
use wattpay_engine::{
    checkout_objects::{CheckoutOptions, CheckoutOutcome},
    HostedCheckout,
};

/// Stands in for the gateway's hosted checkout page. The outcome is chosen on the command line; the options the page
/// would have been opened with are printed so they can be checked by eye.
pub struct CommandLineCheckout {
    outcome: CheckoutOutcome,
}

impl CommandLineCheckout {
    pub fn new(payment_id: Option<String>, dismiss: bool, fail: Option<String>) -> Self {
        let outcome = match (dismiss, fail) {
            (true, _) => CheckoutOutcome::Dismissed,
            (false, Some(reason)) => CheckoutOutcome::Failed { reason },
            (false, None) => CheckoutOutcome::Succeeded { payment_id },
        };
        Self { outcome }
    }
}

impl HostedCheckout for CommandLineCheckout {
    async fn open(&self, options: CheckoutOptions) -> CheckoutOutcome {
        match serde_json::to_string_pretty(&options) {
            Ok(json) => println!("Opening checkout with options:\n{json}"),
            Err(e) => warn!("Could not serialize checkout options. {e}"),
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dismiss_wins() {
        let checkout = CommandLineCheckout::new(Some("pay_1".into()), true, Some("declined".into()));
        assert_eq!(checkout.outcome, CheckoutOutcome::Dismissed);
        let checkout = CommandLineCheckout::new(None, false, Some("declined".into()));
        assert_eq!(checkout.outcome, CheckoutOutcome::Failed { reason: "declined".into() });
        let checkout = CommandLineCheckout::new(None, false, None);
        assert_eq!(checkout.outcome, CheckoutOutcome::Succeeded { payment_id: None });
    }
}
