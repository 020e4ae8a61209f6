//! Subscription pricing
//!
//! Reads the price, trial length and a device's payment status from the
//! licensing backend, fetches the keys the hosted payment form needs and
//! cancels open payments. No retries: a failed request is reported to the
//! caller as is.

mod format;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use reqwest::Url;
use tracing::{debug, info, warn};

pub use format::{format_price, DEFAULT_LOCALE};

/// Pricing error types
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Can't access payment network: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid backend URL {0}")]
    InvalidUrl(String),

    #[error("No device id configured (set DRINKNOW_DEVICE_ID or pass device_id)")]
    MissingDevice,
}

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Where a device's subscription payment stands on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    ReadyToCapture,
    Paid,
    Start,
    Canceled,
    RequireInfo,
}

impl PaymentStatus {
    /// Money is collected or authorized, so the app is unlocked
    pub fn is_paid(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::ReadyToCapture)
    }

    /// A payment is underway and can still be cancelled
    pub fn is_pending(self) -> bool {
        matches!(self, PaymentStatus::Start | PaymentStatus::RequireInfo)
    }
}

/// Raw `/pricing/payment/info` payload
///
/// The device-scoped endpoint adds `paymentStatus`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub price: f64,
    pub trial_days: String,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Price ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentInfo {
    pub trial_days: String,
    pub price_formatted: String,
    pub payment_status: Option<PaymentStatus>,
    pub paid: bool,
}

impl PaymentInfo {
    pub fn from_response(response: &PriceResponse, locale: Option<&str>) -> Self {
        Self {
            trial_days: response.trial_days.clone(),
            price_formatted: format_price(response.price, locale),
            payment_status: response.payment_status,
            paid: response.payment_status.is_some_and(PaymentStatus::is_paid),
        }
    }
}

/// Keys handed to the hosted payment form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSetup {
    pub client_secret: String,
    pub pub_key: String,
}

/// Where pricing data comes from
#[async_trait]
pub trait PaymentInfoSource: Send + Sync {
    /// Price and trial length; with a device id also its payment status
    async fn fetch_price(&self, device_id: Option<&str>) -> PricingResult<PriceResponse>;

    async fn fetch_payment_setup(&self) -> PricingResult<PaymentSetup>;

    /// Abort the device's open payment
    async fn cancel_payment(&self, device_id: &str) -> PricingResult<()>;

    /// Fetch the price and format it for `locale`
    async fn fetch_payment_info(
        &self,
        device_id: Option<&str>,
        locale: Option<&str>,
    ) -> PricingResult<PaymentInfo> {
        let response = self.fetch_price(device_id).await?;
        Ok(PaymentInfo::from_response(&response, locale))
    }
}

/// Pricing backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpPricingClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPricingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus path segments, each one percent-encoded
    fn endpoint(&self, segments: &[&str]) -> PricingResult<Url> {
        let invalid = || PricingError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> PricingResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %response.url(), %status, "pricing request failed");
            return Err(PricingError::Network(
                status.canonical_reason().unwrap_or(status.as_str()).to_string(),
            ));
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, segments: &[&str]) -> PricingResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "pricing request");
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json::<T>().await?)
    }
}

fn require_device(device_id: &str) -> PricingResult<&str> {
    let device_id = device_id.trim();
    if device_id.is_empty() {
        return Err(PricingError::MissingDevice);
    }
    Ok(device_id)
}

#[async_trait]
impl PaymentInfoSource for HttpPricingClient {
    async fn fetch_price(&self, device_id: Option<&str>) -> PricingResult<PriceResponse> {
        match device_id {
            Some(id) => {
                let id = require_device(id)?;
                self.get_json(&["pricing", "payment", "info", id]).await
            }
            None => self.get_json(&["pricing", "payment", "info"]).await,
        }
    }

    async fn fetch_payment_setup(&self) -> PricingResult<PaymentSetup> {
        self.get_json(&["pricing", "drinknow", "payment"]).await
    }

    async fn cancel_payment(&self, device_id: &str) -> PricingResult<()> {
        let id = require_device(device_id)?;
        let url = self.endpoint(&["pricing", "payment", "cancel", id])?;
        debug!(%url, "cancelling payment");
        self.send(self.client.post(url)).await?;
        info!(device_id = id, "payment cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPrice {
        price: f64,
        fail: bool,
    }

    #[async_trait]
    impl PaymentInfoSource for FixedPrice {
        async fn fetch_price(&self, device_id: Option<&str>) -> PricingResult<PriceResponse> {
            if self.fail {
                return Err(PricingError::Network("Service Unavailable".to_string()));
            }
            Ok(PriceResponse {
                price: self.price,
                trial_days: "14".to_string(),
                payment_status: device_id.map(|_| PaymentStatus::Paid),
            })
        }

        async fn fetch_payment_setup(&self) -> PricingResult<PaymentSetup> {
            Ok(PaymentSetup {
                client_secret: "secret".to_string(),
                pub_key: "pk_test".to_string(),
            })
        }

        async fn cancel_payment(&self, _device_id: &str) -> PricingResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_price_payload() {
        let response: PriceResponse =
            serde_json::from_str(r#"{"price": 19.99, "trialDays": "7"}"#).unwrap();
        assert_eq!(response.price, 19.99);
        assert_eq!(response.trial_days, "7");
        assert_eq!(response.payment_status, None);
    }

    #[test]
    fn test_parse_device_payload_with_status() {
        let response: PriceResponse = serde_json::from_str(
            r#"{"price": 4.5, "trialDays": "7", "paymentStatus": "READY_TO_CAPTURE"}"#,
        )
        .unwrap();
        assert_eq!(response.payment_status, Some(PaymentStatus::ReadyToCapture));

        let info = PaymentInfo::from_response(&response, Some("en-US"));
        assert!(info.paid);
        assert_eq!(info.price_formatted, "€4.50");
    }

    #[test]
    fn test_payment_status_mapping() {
        let parsed: Vec<PaymentStatus> = serde_json::from_str(
            r#"["READY_TO_CAPTURE", "PAID", "START", "CANCELED", "REQUIRE_INFO"]"#,
        )
        .unwrap();
        let paid: Vec<bool> = parsed.iter().map(|s| s.is_paid()).collect();
        let pending: Vec<bool> = parsed.iter().map(|s| s.is_pending()).collect();
        assert_eq!(paid, [true, true, false, false, false]);
        assert_eq!(pending, [false, false, true, false, true]);
        assert_eq!(
            serde_json::to_string(&PaymentStatus::RequireInfo).unwrap(),
            "\"REQUIRE_INFO\""
        );
        assert!(serde_json::from_str::<PaymentStatus>(r#""REFUNDED""#).is_err());
    }

    #[test]
    fn test_parse_setup_payload() {
        let setup: PaymentSetup =
            serde_json::from_str(r#"{"clientSecret": "cs_1", "pubKey": "pk_1"}"#).unwrap();
        assert_eq!(setup.client_secret, "cs_1");
        assert_eq!(setup.pub_key, "pk_1");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = HttpPricingClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_endpoint_encodes_device_segment() {
        let client = HttpPricingClient::new("http://localhost:8080/api/");
        let url = client.endpoint(&["pricing", "payment", "info", "team/7 a"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/pricing/payment/info/team%2F7%20a");

        let bare = HttpPricingClient::new("http://localhost:8080");
        let url = bare.endpoint(&["pricing", "payment", "info"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/pricing/payment/info");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = HttpPricingClient::new("not a url");
        let err = client.endpoint(&["pricing"]).unwrap_err();
        assert!(matches!(err, PricingError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_blank_device_id_is_rejected() {
        let client = HttpPricingClient::new("http://localhost:8080");
        let err = client.cancel_payment("  ").await.unwrap_err();
        assert!(matches!(err, PricingError::MissingDevice));
        let err = client.fetch_price(Some("")).await.unwrap_err();
        assert!(matches!(err, PricingError::MissingDevice));
    }

    #[tokio::test]
    async fn test_fetch_payment_info_formats_price() {
        let source = FixedPrice { price: 29.0, fail: false };
        let info = source.fetch_payment_info(None, Some("de-DE")).await.unwrap();
        assert_eq!(info.trial_days, "14");
        assert_eq!(info.price_formatted, "29,00\u{a0}€");
        assert_eq!(info.payment_status, None);
        assert!(!info.paid);

        let info = source.fetch_payment_info(Some("dev-1"), None).await.unwrap();
        assert_eq!(info.payment_status, Some(PaymentStatus::Paid));
        assert!(info.paid);
    }

    #[tokio::test]
    async fn test_network_error_message() {
        let source = FixedPrice { price: 0.0, fail: true };
        let err = source.fetch_payment_info(None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Can't access payment network: Service Unavailable");
    }
}
