use business::domain::notifications::{Notification, NotificationLevel, Notifier};

/// Prints cart notifications to stdout, one line each.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!("{}", format_notification(&notification));
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Info => "[info]",
        NotificationLevel::Error => "[error]",
    };

    match &notification.description {
        Some(description) => format!("{} {}: {}", marker, notification.title, description),
        None => format!("{} {}", marker, notification.title),
    }
}
