//! Pricing MCP Tools

use serde::Serialize;
use tracing::info;

use crate::pricing::{PaymentInfo, PaymentInfoSource, PaymentSetup, PricingError};

/// Response for cancel_payment
#[derive(Debug, Serialize)]
pub struct CancelPaymentResponse {
    pub device_id: String,
    pub cancelled: bool,
}

pub async fn get_payment_info(
    source: &dyn PaymentInfoSource,
    device_id: Option<&str>,
    locale: Option<&str>,
) -> Result<PaymentInfo, String> {
    source
        .fetch_payment_info(device_id, locale)
        .await
        .map_err(|e| e.to_string())
}

pub async fn get_payment_setup(source: &dyn PaymentInfoSource) -> Result<PaymentSetup, String> {
    source.fetch_payment_setup().await.map_err(|e| e.to_string())
}

pub async fn cancel_payment(
    source: &dyn PaymentInfoSource,
    device_id: Option<&str>,
) -> Result<CancelPaymentResponse, String> {
    let device_id = device_id.ok_or_else(|| PricingError::MissingDevice.to_string())?;
    source
        .cancel_payment(device_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(device_id, "cancel_payment completed");
    Ok(CancelPaymentResponse {
        device_id: device_id.to_string(),
        cancelled: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PaymentStatus, PriceResponse, PricingResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        cancelled: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PaymentInfoSource for RecordingSource {
        async fn fetch_price(&self, device_id: Option<&str>) -> PricingResult<PriceResponse> {
            Ok(PriceResponse {
                price: 1234.5,
                trial_days: "30".to_string(),
                payment_status: device_id.map(|_| PaymentStatus::Start),
            })
        }

        async fn fetch_payment_setup(&self) -> PricingResult<PaymentSetup> {
            Err(PricingError::Network("Bad Gateway".to_string()))
        }

        async fn cancel_payment(&self, device_id: &str) -> PricingResult<()> {
            self.cancelled.lock().unwrap().push(device_id.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_get_payment_info_for_device() {
        let source = RecordingSource::default();
        let info = get_payment_info(&source, Some("dev-9"), Some("nl-NL"))
            .await
            .unwrap();
        assert_eq!(info.price_formatted, "€\u{a0}1.234,50");
        assert_eq!(info.payment_status, Some(PaymentStatus::Start));
        assert!(!info.paid);
    }

    #[tokio::test]
    async fn test_cancel_payment_requires_device() {
        let source = RecordingSource::default();
        let err = cancel_payment(&source, None).await.unwrap_err();
        assert!(err.contains("DRINKNOW_DEVICE_ID"));

        let response = cancel_payment(&source, Some("dev-9")).await.unwrap();
        assert!(response.cancelled);
        assert_eq!(*source.cancelled.lock().unwrap(), vec!["dev-9".to_string()]);
    }

    #[tokio::test]
    async fn test_setup_error_is_reported() {
        let source = RecordingSource::default();
        let err = get_payment_setup(&source).await.unwrap_err();
        assert_eq!(err, "Can't access payment network: Bad Gateway");
    }
}
