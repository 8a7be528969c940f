pub mod console_notifier;
pub mod dependency_injection;
pub mod shell;
