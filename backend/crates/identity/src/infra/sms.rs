//! SMS Gateway Notifier
//!
//! Posts messages to an external SMS gateway. Callers treat delivery as
//! best-effort; this type only reports the outcome.

use serde_json::json;

use crate::domain::notifier::Notifier;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{IdentityError, IdentityResult};

/// SMS gateway notifier
#[derive(Debug, Clone)]
pub struct SmsNotifier {
    http: reqwest::Client,
    gateway_url: String,
    api_key: Option<String>,
}

impl SmsNotifier {
    pub fn new(gateway_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            gateway_url: gateway_url.into(),
            api_key,
        }
    }
}

impl Notifier for SmsNotifier {
    async fn send(&self, message: &str, number: &PhoneNumber) -> IdentityResult<()> {
        let mut request = self.http.post(&self.gateway_url).json(&json!({
            "message": message,
            "number": number.as_str(),
        }));

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| IdentityError::Internal(format!("SMS gateway unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(IdentityError::Internal(format!(
                "SMS gateway returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
