#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order.login_required")]
    LoginRequired,
    #[error("order.empty_cart")]
    EmptyCart,
    #[error("order.payment_id_missing")]
    PaymentIdMissing,
    /// The order service refused the order; carries its message verbatim.
    #[error("order.rejected")]
    Rejected(String),
    #[error("order.timeout")]
    Timeout,
    #[error("order.unavailable")]
    Unavailable(String),
}

impl OrderError {
    /// User-facing text for the checkout failure notification.
    pub fn detail(&self) -> String {
        match self {
            OrderError::LoginRequired => "Login required".to_string(),
            OrderError::EmptyCart => "Your cart is empty.".to_string(),
            OrderError::PaymentIdMissing => "Missing payment reference.".to_string(),
            OrderError::Rejected(message) => message.clone(),
            OrderError::Timeout => {
                "Request timed out. Please check your internet connection.".to_string()
            }
            OrderError::Unavailable(_) => "Could not place the order. Please try again.".to_string(),
        }
    }
}
