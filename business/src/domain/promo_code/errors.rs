const TIMEOUT_DETAIL: &str = "Request timed out. Please check your internet connection.";
const UNAVAILABLE_DETAIL: &str = "Could not validate the promo code. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum PromoCodeError {
    #[error("promo_code.empty")]
    Empty,
    /// The promo service refused the code; carries its message verbatim.
    #[error("promo_code.rejected")]
    Rejected(String),
    #[error("promo_code.timeout")]
    Timeout,
    #[error("promo_code.unavailable")]
    Unavailable(String),
    /// A newer promo-affecting call was initiated before this one resolved.
    #[error("promo_code.superseded")]
    Superseded,
}

impl PromoCodeError {
    /// User-facing text for the failure notification.
    pub fn detail(&self) -> String {
        match self {
            PromoCodeError::Empty => "Please enter a promo code to apply.".to_string(),
            PromoCodeError::Rejected(message) => message.clone(),
            PromoCodeError::Timeout => TIMEOUT_DETAIL.to_string(),
            PromoCodeError::Unavailable(_) => UNAVAILABLE_DETAIL.to_string(),
            PromoCodeError::Superseded => String::new(),
        }
    }
}
