// bot/broadcast.rs
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use teloxide::types::UserId;

/// Outcome of one broadcast batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

impl BroadcastReport {
    pub fn render(&self) -> String {
        format!(
            "✅ Broadcast complete!\n\nDelivered to: {} users.\nFailed for: {} users.",
            self.delivered, self.failed
        )
    }
}

/// Deliver to every recipient in order, pausing `delay` between sends.
/// A failed delivery is counted and the batch moves on.
pub async fn relay<F, Fut, E>(
    recipients: &[UserId],
    delay: Duration,
    mut deliver: F,
) -> BroadcastReport
where
    F: FnMut(UserId) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let mut report = BroadcastReport::default();

    for (index, &user) in recipients.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match deliver(user).await {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                tracing::debug!(user = user.0, %err, "broadcast delivery failed");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        delivered = report.delivered,
        failed = report.failed,
        "broadcast finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tokio::time::Instant;

    #[tokio::test]
    async fn failures_are_counted_not_fatal() {
        let recipients = [UserId(1), UserId(2), UserId(3), UserId(4)];
        let seen = RefCell::new(Vec::new());

        let report = relay(&recipients, Duration::ZERO, |user| {
            seen.borrow_mut().push(user);
            async move {
                if user.0 % 2 == 0 {
                    Err("bot was blocked by the user")
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(report, BroadcastReport { delivered: 2, failed: 2 });
        assert_eq!(seen.into_inner(), recipients.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn sends_are_paced() {
        let recipients = [UserId(1), UserId(2), UserId(3)];
        let start = Instant::now();

        let report = relay(&recipients, Duration::from_millis(100), |_| async {
            Ok::<(), String>(())
        })
        .await;

        assert_eq!(report.delivered, 3);
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn empty_batch_reports_zero() {
        let report =
            relay(&[], Duration::from_millis(100), |_| async { Ok::<(), String>(()) }).await;
        assert_eq!(report, BroadcastReport::default());
        assert!(report.render().contains("Delivered to: 0 users."));
    }
}
