use crate::domain::entities::Notification;

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
