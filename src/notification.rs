use std::fmt::{Debug, Display};
use std::time::Duration;

use clap::ValueEnum;

use crate::scheduler::{Scheduler, TimerId};

pub const DEFAULT_DURATION_MS: i64 = 5000;
pub const DEFAULT_MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Default,
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Unknown names fall back to [Severity::Default].
    pub fn parse(name: &str) -> Severity {
        match name.trim().to_ascii_lowercase().as_str() {
            "info" => Severity::Info,
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Default,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Default => "default",
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Where the toast region sits on screen. Toasts always stack in insertion
/// order from top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Anchor {
    TopRight,
    TopLeft,
    #[default]
    BottomRight,
    BottomLeft,
    TopCenter,
    BottomCenter,
}

pub struct Action {
    pub label: String,
    callback: Box<dyn FnMut() + Send>,
}

impl Action {
    pub fn new(label: impl Into<String>, callback: impl FnMut() + Send + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Box::new(callback),
        }
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").field("label", &self.label).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// A notification request, before the queue has assigned it an id.
#[derive(Debug, Default)]
pub struct NewNotification {
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    pub duration_ms: Option<i64>,
    pub action: Option<Action>,
}

impl NewNotification {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title).with_severity(Severity::Success)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title).with_severity(Severity::Error)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(title).with_severity(Severity::Warning)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(title).with_severity(Severity::Info)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Zero or a negative duration keeps the notification until it is
    /// dismissed.
    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

#[derive(Debug)]
pub struct Notification {
    pub id: NotificationId,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    pub action: Option<Action>,
    duration_ms: i64,
}

impl Notification {
    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// None when the notification persists until dismissed.
    pub fn auto_dismiss(&self) -> Option<Duration> {
        match self.duration_ms > 0 {
            true => Some(Duration::from_millis(self.duration_ms as u64)),
            false => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub max_toasts: usize,
    pub default_duration_ms: i64,
    pub anchor: Anchor,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_toasts: DEFAULT_MAX_TOASTS,
            default_duration_ms: DEFAULT_DURATION_MS,
            anchor: Anchor::default(),
        }
    }
}

struct Entry {
    notification: Notification,
    timer: Option<TimerId>,
    paused: bool,
}

/// The active toasts, oldest first.
///
/// Each entry with a positive duration owns at most one pending timer. The
/// timer is cancelled whenever the entry leaves the queue or is paused, and
/// a fired timer is only honoured when it is still the entry's current one.
pub struct ToastQueue<S: Scheduler> {
    config: QueueConfig,
    scheduler: S,
    entries: Vec<Entry>,
    next_id: u64,
    hovered: Option<NotificationId>,
}

impl<S: Scheduler> ToastQueue<S> {
    pub fn new(config: QueueConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            entries: Vec::new(),
            next_id: 0,
            hovered: None,
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn enqueue(&mut self, request: NewNotification) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let notification = Notification {
            id,
            severity: request.severity,
            title: request.title,
            description: request.description,
            action: request.action,
            duration_ms: request.duration_ms.unwrap_or(self.config.default_duration_ms),
        };
        let timer = notification
            .auto_dismiss()
            .map(|delay| self.scheduler.schedule(delay));

        log::debug!("enqueue {} ({}): {}", id, notification.severity, notification.title);
        self.entries.push(Entry {
            notification,
            timer,
            paused: false,
        });

        while self.entries.len() > self.config.max_toasts {
            let evicted = self.entries.remove(0);
            log::debug!("evict {}", evicted.notification.id);
            self.release(evicted);
        }

        id
    }

    pub fn dismiss(&mut self, id: NotificationId) {
        if let Some(offset) = self.position(id) {
            let entry = self.entries.remove(offset);
            log::debug!("dismiss {}", id);
            self.release(entry);
        }
    }

    pub fn dismiss_all(&mut self) {
        log::debug!("dismiss all ({} active)", self.entries.len());
        for entry in std::mem::take(&mut self.entries) {
            self.release(entry);
        }
    }

    /// Suspends the countdown of the given notification.
    pub fn pause(&mut self, id: NotificationId) {
        let Some(offset) = self.position(id) else {
            return;
        };
        let entry = &mut self.entries[offset];
        entry.paused = true;
        if let Some(timer) = entry.timer.take() {
            self.scheduler.cancel(timer);
        }
    }

    /// Restarts the full countdown of a paused notification.
    pub fn resume(&mut self, id: NotificationId) {
        let Some(offset) = self.position(id) else {
            return;
        };
        let entry = &mut self.entries[offset];
        if !entry.paused {
            return;
        }
        entry.paused = false;
        if let Some(timer) = entry.timer.take() {
            self.scheduler.cancel(timer);
        }
        entry.timer = entry
            .notification
            .auto_dismiss()
            .map(|delay| self.scheduler.schedule(delay));
    }

    /// Tracks the notification under the pointer, pausing it and resuming
    /// whichever one the pointer left.
    pub fn hover(&mut self, id: Option<NotificationId>) {
        if self.hovered == id {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.resume(previous);
        }
        if let Some(id) = id {
            if self.position(id).is_some() {
                self.pause(id);
                self.hovered = Some(id);
            }
        }
    }

    pub fn hovered(&self) -> Option<NotificationId> {
        self.hovered
    }

    /// Called when a scheduled timer fires.
    pub fn expire(&mut self, timer: TimerId) {
        let found = self
            .entries
            .iter()
            .position(|entry| !entry.paused && entry.timer == Some(timer));

        match found {
            Some(offset) => {
                let mut entry = self.entries.remove(offset);
                log::debug!("expire {}", entry.notification.id);
                entry.timer = None;
                self.release(entry);
            }
            None => log::trace!("ignoring stale {}", timer),
        }
    }

    /// Runs the notification's action, then dismisses it.
    pub fn activate(&mut self, id: NotificationId) {
        let Some(offset) = self.position(id) else {
            return;
        };
        if let Some(action) = self.entries[offset].notification.action.as_mut() {
            log::debug!("activate {} ({})", id, action.label);
            (action.callback)();
            self.dismiss(id);
        }
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|entry| &entry.notification)
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications().find(|n| n.id == id)
    }

    pub fn is_paused(&self, id: NotificationId) -> bool {
        self.position(id)
            .map(|offset| self.entries[offset].paused)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: NotificationId) -> Option<usize> {
        self.entries.iter().position(|e| e.notification.id == id)
    }

    fn release(&mut self, entry: Entry) {
        if let Some(timer) = entry.timer {
            self.scheduler.cancel(timer);
        }
        if self.hovered == Some(entry.notification.id) {
            self.hovered = None;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn queue(max_toasts: usize) -> ToastQueue<ManualScheduler> {
        ToastQueue::new(
            QueueConfig {
                max_toasts,
                ..QueueConfig::default()
            },
            ManualScheduler::new(),
        )
    }

    fn advance(queue: &mut ToastQueue<ManualScheduler>, ms: u64) {
        for timer in queue.scheduler_mut().advance(Duration::from_millis(ms)) {
            queue.expire(timer);
        }
    }

    fn titles(queue: &ToastQueue<ManualScheduler>) -> Vec<String> {
        queue.notifications().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_cap_keeps_most_recent() {
        let mut queue = queue(3);
        for n in 0..10 {
            queue.enqueue(NewNotification::error(format!("{}", n)));
            assert!(queue.len() <= 3);
        }
        assert_eq!(vec!["7", "8", "9"], titles(&queue));
        // evicted entries do not leave timers behind
        assert_eq!(3, queue.scheduler().pending());
    }

    #[test]
    fn test_eviction_ignores_severity() {
        let mut queue = queue(2);
        queue.enqueue(NewNotification::error("important"));
        queue.enqueue(NewNotification::info("two"));
        queue.enqueue(NewNotification::info("three"));
        assert_eq!(vec!["two", "three"], titles(&queue));
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut queue = queue(5);
        let one = queue.enqueue(NewNotification::new("one"));
        queue.enqueue(NewNotification::new("two"));

        queue.dismiss(one);
        assert_eq!(vec!["two"], titles(&queue));
        queue.dismiss(one);
        assert_eq!(vec!["two"], titles(&queue));
        assert_eq!(1, queue.scheduler().pending());
    }

    #[test]
    fn test_dismiss_unknown_id() {
        let mut queue = queue(5);
        queue.enqueue(NewNotification::new("one"));
        queue.dismiss(NotificationId(42));
        assert_eq!(vec!["one"], titles(&queue));
    }

    #[test]
    fn test_insertion_order_survives_dismissals_and_expiry() {
        let mut queue = queue(10);
        let a = queue.enqueue(NewNotification::new("a").with_duration_ms(0));
        queue.enqueue(NewNotification::new("b").with_duration_ms(1000));
        let c = queue.enqueue(NewNotification::new("c").with_duration_ms(0));
        queue.enqueue(NewNotification::new("d").with_duration_ms(300));
        queue.enqueue(NewNotification::new("e").with_duration_ms(0));

        queue.dismiss(c);
        advance(&mut queue, 500);
        assert_eq!(vec!["a", "b", "e"], titles(&queue));

        queue.enqueue(NewNotification::new("f"));
        queue.dismiss(a);
        assert_eq!(vec!["b", "e", "f"], titles(&queue));
    }

    #[test]
    fn test_expires_after_duration() {
        let mut queue = queue(5);
        queue.enqueue(NewNotification::success("saved"));
        advance(&mut queue, 4999);
        assert_eq!(1, queue.len());
        advance(&mut queue, 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_persistent_notifications_never_expire() {
        let mut queue = queue(5);
        queue.enqueue(NewNotification::new("zero").with_duration_ms(0));
        queue.enqueue(NewNotification::new("negative").with_duration_ms(-1));
        assert_eq!(0, queue.scheduler().pending());
        advance(&mut queue, 1_000_000);
        assert_eq!(vec!["zero", "negative"], titles(&queue));
    }

    #[test]
    fn test_dismiss_cancels_timer() {
        let mut queue = queue(5);
        let id = queue.enqueue(NewNotification::new("one"));
        assert_eq!(1, queue.scheduler().pending());
        queue.dismiss(id);
        assert_eq!(0, queue.scheduler().pending());
    }

    #[test]
    fn test_dismiss_all_cancels_every_timer() {
        let mut queue = queue(5);
        queue.enqueue(NewNotification::new("one"));
        queue.enqueue(NewNotification::new("two"));
        queue.enqueue(NewNotification::new("three").with_duration_ms(0));
        queue.dismiss_all();
        assert!(queue.is_empty());
        assert_eq!(0, queue.scheduler().pending());
    }

    #[test]
    fn test_pause_suspends_and_resume_restarts_full_duration() {
        let mut queue = queue(5);
        let id = queue.enqueue(NewNotification::new("hover me").with_duration_ms(1000));

        advance(&mut queue, 900);
        queue.pause(id);
        assert_eq!(0, queue.scheduler().pending());
        advance(&mut queue, 5000);
        assert_eq!(1, queue.len());

        queue.resume(id);
        advance(&mut queue, 900);
        assert_eq!(1, queue.len());
        advance(&mut queue, 100);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_resume_without_pause_keeps_countdown() {
        let mut queue = queue(5);
        let id = queue.enqueue(NewNotification::new("one").with_duration_ms(1000));
        advance(&mut queue, 600);
        queue.resume(id);
        advance(&mut queue, 400);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut queue = queue(5);
        let id = queue.enqueue(NewNotification::new("one").with_duration_ms(1000));
        let stale = queue.scheduler_mut().schedule(Duration::from_millis(1));
        queue.expire(stale);
        assert_eq!(1, queue.len());

        queue.dismiss(id);
        queue.enqueue(NewNotification::new("two"));
        queue.expire(stale);
        assert_eq!(vec!["two"], titles(&queue));
    }

    #[test]
    fn test_hover_moves_between_notifications() {
        let mut queue = queue(5);
        let one = queue.enqueue(NewNotification::new("one").with_duration_ms(1000));
        let two = queue.enqueue(NewNotification::new("two").with_duration_ms(1000));

        queue.hover(Some(one));
        assert!(queue.is_paused(one));
        queue.hover(Some(two));
        assert!(!queue.is_paused(one));
        assert!(queue.is_paused(two));
        queue.hover(None);
        assert!(!queue.is_paused(two));
        assert_eq!(2, queue.scheduler().pending());
    }

    #[test]
    fn test_hover_is_cleared_when_notification_leaves() {
        let mut queue = queue(5);
        let one = queue.enqueue(NewNotification::new("one"));
        queue.hover(Some(one));
        queue.dismiss(one);
        assert_eq!(None, queue.hovered());
    }

    #[test]
    fn test_activate_runs_action_then_dismisses() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut queue = queue(5);
        let id = queue.enqueue(
            NewNotification::info("undo?").with_action(Action::new("Undo", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        );
        let plain = queue.enqueue(NewNotification::info("plain"));

        queue.activate(id);
        queue.activate(id);
        queue.activate(plain);

        assert_eq!(1, calls.load(Ordering::SeqCst));
        assert_eq!(vec!["plain"], titles(&queue));
    }

    #[test]
    fn test_unknown_severity_falls_back_to_default() {
        assert_eq!(Severity::Default, Severity::parse("catastrophic"));
        assert_eq!(Severity::Warning, Severity::parse("Warning"));
        assert_eq!(Severity::Default, Severity::parse(""));
    }

    #[test]
    fn test_default_duration_applies() {
        let mut queue = queue(5);
        let id = queue.enqueue(NewNotification::new("one"));
        assert_eq!(
            Some(DEFAULT_DURATION_MS),
            queue.get(id).map(|n| n.duration_ms())
        );
    }
}
