/// Logging port used by the cart session and the use cases.
///
/// The business layer never depends on a logging crate directly.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
