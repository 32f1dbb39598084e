//! # Checkout Gateway
//!
//! HTTP client for the separately deployed checkout-session-creation
//! endpoint. The contract is one round trip: `POST {priceId}` JSON, success
//! body `{checkoutUrl}`. Any non-2xx status or malformed body is a checkout
//! failure; the flow shows the user the fixed notice and re-enables the
//! trigger.

use async_trait::async_trait;
use reqwest::Client;
use shop_core::{CheckoutGateway, CheckoutRedirect, CheckoutRequest, StoreError, StoreResult};
use tracing::{error, info, instrument};

/// `CheckoutGateway` over plain HTTP
pub struct HttpCheckoutGateway {
    client: Client,
    endpoint: String,
}

impl HttpCheckoutGateway {
    /// Create a gateway posting to `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CheckoutGateway for HttpCheckoutGateway {
    #[instrument(skip(self))]
    async fn create_session(&self, price_id: &str) -> StoreResult<CheckoutRedirect> {
        let request = CheckoutRequest {
            price_id: price_id.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Checkout endpoint error: status={}, body={}", status, body);
            return Err(StoreError::CheckoutCreationFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let redirect: CheckoutRedirect = serde_json::from_str(&body).map_err(|e| {
            StoreError::CheckoutCreationFailed(format!("Malformed response: {}", e))
        })?;

        info!("Created checkout session: url={}", redirect.checkout_url);

        Ok(redirect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> HttpCheckoutGateway {
        HttpCheckoutGateway::new(format!("{}/api/checkout", server.uri()))
    }

    #[tokio::test]
    async fn test_success_returns_checkout_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/checkout"))
            .and(body_json(serde_json::json!({ "priceId": "price_1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "checkoutUrl": "https://pay.example/sess_1" }),
            ))
            .mount(&server)
            .await;

        let redirect = gateway_for(&server).create_session("price_1").await.unwrap();
        assert_eq!(redirect.checkout_url, "https://pay.example/sess_1");
    }

    #[tokio::test]
    async fn test_non_2xx_is_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/checkout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway_for(&server).create_session("price_1").await.unwrap_err();
        assert!(matches!(err, StoreError::CheckoutCreationFailed(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/checkout"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).create_session("price_1").await.unwrap_err();
        assert!(matches!(err, StoreError::CheckoutCreationFailed(_)));
    }
}
