//! Transient notifications shown in the status bar.

use std::{
  collections::VecDeque,
  time::{Duration, Instant},
};

const TOAST_TTL: Duration = Duration::from_secs(5);
const MAX_TOASTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
  Success,
  Info,
  Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
  pub level:   ToastLevel,
  pub message: String,
  pub created: Instant,
}

/// Most recent notifications, newest last. Every toast is also traced.
#[derive(Debug)]
pub struct Toasts {
  items: VecDeque<Toast>,
  ttl:   Duration,
}

impl Default for Toasts {
  fn default() -> Self { Self { items: VecDeque::new(), ttl: TOAST_TTL } }
}

impl Toasts {
  pub fn success(&mut self, message: impl Into<String>) {
    self.push(ToastLevel::Success, message.into());
  }

  pub fn info(&mut self, message: impl Into<String>) { self.push(ToastLevel::Info, message.into()); }

  pub fn error(&mut self, message: impl Into<String>) {
    self.push(ToastLevel::Error, message.into());
  }

  fn push(&mut self, level: ToastLevel, message: String) {
    match level {
      ToastLevel::Error => tracing::warn!(%message, "toast"),
      _ => tracing::info!(%message, "toast"),
    }
    if self.items.len() == MAX_TOASTS {
      self.items.pop_front();
    }
    self.items.push_back(Toast { level, message, created: Instant::now() });
  }

  /// The newest toast that has not expired yet.
  pub fn current(&self) -> Option<&Toast> {
    self
      .items
      .back()
      .filter(|t| t.created.elapsed() < self.ttl)
  }

  /// Drop everything older than the toast lifetime.
  pub fn prune(&mut self) {
    let ttl = self.ttl;
    self.items.retain(|t| t.created.elapsed() < ttl);
  }

  pub fn iter(&self) -> impl Iterator<Item = &Toast> { self.items.iter() }

  pub fn last(&self) -> Option<&Toast> { self.items.back() }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn newest_toast_is_current() {
    let mut t = Toasts::default();
    assert!(t.current().is_none());
    t.info("loading");
    t.error("Failed to load candidates");
    let current = t.current().unwrap();
    assert_eq!(current.level, ToastLevel::Error);
    assert_eq!(current.message, "Failed to load candidates");
    assert_eq!(t.len(), 2);
  }

  #[test]
  fn expired_toasts_are_hidden_and_pruned() {
    let mut t = Toasts { items: VecDeque::new(), ttl: Duration::ZERO };
    t.success("done");
    assert!(t.current().is_none());
    t.prune();
    assert!(t.is_empty());
  }

  #[test]
  fn queue_is_bounded() {
    let mut t = Toasts::default();
    for i in 0..(MAX_TOASTS + 5) {
      t.info(format!("toast {i}"));
    }
    assert_eq!(t.len(), MAX_TOASTS);
    assert_eq!(t.iter().next().unwrap().message, "toast 5");
  }
}
