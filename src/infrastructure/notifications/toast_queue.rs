use crate::application::ports::Notifier;
use crate::domain::entities::Notification;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::broadcast;

/// Bounded list of toasts. The oldest toast is dropped once `capacity` is reached.
pub struct ToastQueue {
    toasts: Mutex<VecDeque<Notification>>,
    capacity: usize,
    sender: broadcast::Sender<Notification>,
}

impl ToastQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            toasts: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            sender,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Toasts still on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        let toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.iter().filter(|t| !t.dismissed).cloned().collect()
    }

    pub fn dismiss(&self, id: &str) -> bool {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        match toasts.iter_mut().find(|t| t.id == id && !t.dismissed) {
            Some(toast) => {
                toast.dismissed = true;
                true
            }
            None => false,
        }
    }

    pub fn clear_dismissed(&self) -> usize {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        let before = toasts.len();
        toasts.retain(|t| !t.dismissed);
        before - toasts.len()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        {
            let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
            if toasts.len() == self.capacity {
                toasts.pop_front();
            }
            toasts.push_back(notification.clone());
        }
        // No subscribers is fine; the toast is still listed.
        let _ = self.sender.send(notification);
    }
}
