use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use business::domain::promo_code::errors::PromoCodeError;
use business::domain::promo_code::model::{DiscountRule, PromoValidation};
use business::domain::promo_code::services::PromoCodeValidator;

use crate::client::{StorefrontClient, error_message};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationBody {
    discount_percent: Option<BigDecimal>,
    fixed_amount: Option<BigDecimal>,
    description: Option<String>,
}

pub struct PromoCodeValidatorHttp {
    client: StorefrontClient,
}

impl PromoCodeValidatorHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    fn parse_response(status: StatusCode, body: &[u8]) -> Result<PromoValidation, PromoCodeError> {
        if !status.is_success() {
            return Err(PromoCodeError::Rejected(error_message(status, body)));
        }

        let parsed: ValidationBody = serde_json::from_slice(body)
            .map_err(|e| PromoCodeError::Unavailable(format!("malformed promo response: {}", e)))?;

        let rule = match (parsed.discount_percent, parsed.fixed_amount) {
            (Some(percent), _) => DiscountRule::Percentage(percent),
            (None, Some(amount)) => DiscountRule::FixedAmount(amount),
            (None, None) => {
                return Err(PromoCodeError::Unavailable(
                    "promo response without discount".to_string(),
                ));
            }
        };

        let description = parsed
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| rule.to_string());

        Ok(PromoValidation { rule, description })
    }
}

#[async_trait]
impl PromoCodeValidator for PromoCodeValidatorHttp {
    async fn validate(&self, code: &str) -> Result<PromoValidation, PromoCodeError> {
        let response = self
            .client
            .client
            .post(self.client.promo_validation_url())
            .json(&json!({ "code": code }))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        Self::parse_response(status, &body)
    }
}

fn transport_error(e: reqwest::Error) -> PromoCodeError {
    if e.is_timeout() {
        PromoCodeError::Timeout
    } else {
        PromoCodeError::Unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_percentage_validation() {
        let result = PromoCodeValidatorHttp::parse_response(
            StatusCode::OK,
            br#"{"discountPercent":10,"description":"10% off"}"#,
        );

        let validation = result.unwrap();
        assert_eq!(validation.rule, DiscountRule::Percentage(BigDecimal::from(10)));
        assert_eq!(validation.description, "10% off");
    }

    #[test]
    fn should_parse_fixed_amount_validation() {
        let result = PromoCodeValidatorHttp::parse_response(
            StatusCode::OK,
            br#"{"fixedAmount":200,"description":"200 off your order"}"#,
        );

        assert_eq!(
            result.unwrap().rule,
            DiscountRule::FixedAmount(BigDecimal::from(200))
        );
    }

    #[test]
    fn should_describe_rule_when_description_missing() {
        let result =
            PromoCodeValidatorHttp::parse_response(StatusCode::OK, br#"{"discountPercent":15}"#);

        assert_eq!(result.unwrap().description, "15% off");
    }

    #[test]
    fn should_surface_not_found_message_verbatim() {
        let result = PromoCodeValidatorHttp::parse_response(
            StatusCode::NOT_FOUND,
            br#"{"message":"Invalid or expired promo code"}"#,
        );

        match result.unwrap_err() {
            PromoCodeError::Rejected(message) => {
                assert_eq!(message, "Invalid or expired promo code")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn should_surface_expired_message_verbatim() {
        let result = PromoCodeValidatorHttp::parse_response(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Promo code expired"}"#,
        );

        assert!(matches!(
            result.unwrap_err(),
            PromoCodeError::Rejected(message) if message == "Promo code expired"
        ));
    }

    #[test]
    fn should_treat_success_without_discount_as_unavailable() {
        let result =
            PromoCodeValidatorHttp::parse_response(StatusCode::OK, br#"{"description":"?"}"#);

        assert!(matches!(result.unwrap_err(), PromoCodeError::Unavailable(_)));
    }
}
