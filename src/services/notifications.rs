//! Submission polling and diff notifications.
//!
//! A background watcher samples the four collection sizes on a fixed
//! interval and compares them with the previous snapshot. A net increase
//! in a watched collection (newsletter, bookings, contact) produces one
//! event per collection carrying the delta; events are fanned out over a
//! broadcast channel and surfaced to the admin UI as an SSE stream. The
//! diff is a pure count delta: it does not identify which records are
//! new, and a deletion between polls absorbs into the next delta.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::repository::Repository;

/// Sizes of the four submission collections at one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionCounts {
    pub newsletter: i64,
    pub bookings: i64,
    pub contact: i64,
    pub unsubscribed: i64,
}

/// Watched collection a notification refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Newsletter,
    Bookings,
    Contact,
}

/// One toast-worthy event: a watched collection grew since the last poll
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub added: i64,
    /// Toast title, e.g. "New booking"
    pub title: String,
    /// Toast description, e.g. "2 new consultation(s)"
    pub detail: String,
}

/// Count-delta diff between two snapshots.
///
/// Unsubscribes are tracked in the snapshot but never notified.
pub fn diff(prev: &SubmissionCounts, next: &SubmissionCounts) -> Vec<NotificationEvent> {
    let mut events = Vec::new();

    let added = next.newsletter - prev.newsletter;
    if added > 0 {
        events.push(NotificationEvent {
            kind: NotificationKind::Newsletter,
            added,
            title: "New newsletter signup".to_string(),
            detail: format!("{} new subscriber(s)", added),
        });
    }

    let added = next.bookings - prev.bookings;
    if added > 0 {
        events.push(NotificationEvent {
            kind: NotificationKind::Bookings,
            added,
            title: if added > 1 { "New bookings" } else { "New booking" }.to_string(),
            detail: format!("{} new consultation(s)", added),
        });
    }

    let added = next.contact - prev.contact;
    if added > 0 {
        events.push(NotificationEvent {
            kind: NotificationKind::Contact,
            added,
            title: if added > 1 {
                "New contact messages"
            } else {
                "New contact message"
            }
            .to_string(),
            detail: format!("{} new submission(s)", added),
        });
    }

    events
}

/// Broadcast hub for notification events
#[derive(Clone)]
pub struct NotificationsService {
    sender: broadcast::Sender<NotificationEvent>,
}

impl Default for NotificationsService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationsService {
    pub fn new() -> Self {
        // Slow SSE consumers lag and skip rather than block the watcher
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }

    /// Spawn the polling watcher. The first successful sample only seeds
    /// the snapshot; poll failures are swallowed so transient database
    /// blips never surface as spurious notifications.
    pub fn spawn_watcher(&self, repository: Repository, poll_interval: Duration) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut snapshot: Option<SubmissionCounts> = None;

            loop {
                ticker.tick().await;
                match repository.submissions.counts().await {
                    Ok(next) => {
                        if let Some(prev) = snapshot {
                            for event in diff(&prev, &next) {
                                // No receivers is fine; nobody is watching
                                let _ = sender.send(event);
                            }
                        }
                        snapshot = Some(next);
                    }
                    Err(e) => {
                        tracing::debug!("Submission poll failed: {}", e);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(newsletter: i64, bookings: i64, contact: i64) -> SubmissionCounts {
        SubmissionCounts {
            newsletter,
            bookings,
            contact,
            unsubscribed: 0,
        }
    }

    #[test]
    fn test_no_change_no_events() {
        let prev = counts(3, 1, 0);
        assert!(diff(&prev, &prev).is_empty());
    }

    #[test]
    fn test_increase_fires_per_collection() {
        // Previous {newsletter:3, bookings:1, contact:0},
        // next {newsletter:4, bookings:1, contact:1}
        let events = diff(&counts(3, 1, 0), &counts(4, 1, 1));
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].kind, NotificationKind::Newsletter);
        assert_eq!(events[0].detail, "1 new subscriber(s)");

        assert_eq!(events[1].kind, NotificationKind::Contact);
        assert_eq!(events[1].title, "New contact message");
        assert_eq!(events[1].detail, "1 new submission(s)");

        assert!(events.iter().all(|e| e.kind != NotificationKind::Bookings));
    }

    #[test]
    fn test_decrease_is_silent() {
        let events = diff(&counts(5, 2, 2), &counts(4, 2, 0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_plural_titles() {
        let events = diff(&counts(0, 0, 0), &counts(0, 3, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "New bookings");
        assert_eq!(events[0].detail, "3 new consultation(s)");
    }

    #[test]
    fn test_unsubscribed_never_notifies() {
        let prev = SubmissionCounts {
            unsubscribed: 0,
            ..counts(1, 1, 1)
        };
        let next = SubmissionCounts {
            unsubscribed: 5,
            ..counts(1, 1, 1)
        };
        assert!(diff(&prev, &next).is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_receives_broadcast() {
        let service = NotificationsService::new();
        let mut receiver = service.subscribe();
        let events = diff(&counts(0, 0, 0), &counts(1, 0, 0));
        for event in events {
            service.sender.send(event).unwrap();
        }
        let received = receiver.recv().await.unwrap();
        assert_eq!(received.kind, NotificationKind::Newsletter);
    }
}
