use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use teloxide::{prelude::*, Bot};
use tokio::sync::mpsc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::BotError;
use crate::utils::datetime::{fire_time_today, format_time_of_day, parse_time_of_day};

/// A pending one-shot reminder. Lives only in memory; jobs do not survive
/// a restart.
#[derive(Debug, Clone)]
pub struct ReminderJob {
    pub id: u64,
    pub chat_id: i64,
    pub fire_at: DateTime<Utc>,
    pub text: String,
}

/// The in-memory pending set. Jobs are kept in scheduling order, so two
/// jobs with the same fire time always fire in the order they were
/// scheduled.
pub struct ReminderQueue {
    jobs: Mutex<Vec<ReminderJob>>,
    next_id: AtomicU64,
}

impl Default for ReminderQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderQueue {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Validates and enqueues a reminder. The target is `now`'s calendar
    /// date at `time_of_day`; a target not strictly in the future is
    /// rejected and nothing is enqueued.
    pub fn schedule(
        &self,
        chat_id: i64,
        time_of_day: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, BotError> {
        let time = parse_time_of_day(time_of_day)?;
        let fire_at = fire_time_today(time, now);

        if fire_at <= now {
            return Err(BotError::PastTime);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.push(ReminderJob {
            id,
            chat_id,
            fire_at,
            text: text.to_string(),
        });

        Ok(id)
    }

    /// Removes and returns every job due at `now`, preserving scheduling
    /// order. A job leaves the queue exactly once.
    pub fn drain_due(&self, now: DateTime<Utc>) -> Vec<ReminderJob> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let (due, pending): (Vec<_>, Vec<_>) =
            jobs.drain(..).partition(|job| job.fire_at <= now);
        *jobs = pending;
        due
    }

    pub fn pending_count(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Runs the shared background tick and the delivery task. The tick drains
/// due jobs into an mpsc queue; the single delivery task is the only
/// scheduler-side writer to the chat transport.
pub struct ReminderService {
    queue: Arc<ReminderQueue>,
    scheduler: JobScheduler,
    events_tx: mpsc::UnboundedSender<ReminderJob>,
    delivery: Option<tokio::task::JoinHandle<()>>,
}

impl ReminderService {
    pub async fn new(
        bot: Bot,
        queue: Arc<ReminderQueue>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let delivery = tokio::spawn(deliver_fired_reminders(bot, events_rx));

        Ok(Self {
            queue,
            scheduler,
            events_tx,
            delivery: Some(delivery),
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let queue = self.queue.clone();
        let events_tx = self.events_tx.clone();

        let tick = Job::new_async("* * * * * *", move |_uuid, _l| {
            let queue = queue.clone();
            let events_tx = events_tx.clone();
            Box::pin(async move {
                for job in queue.drain_due(Utc::now()) {
                    if events_tx.send(job).is_err() {
                        tracing::error!("reminder delivery queue closed, dropping fired job");
                    }
                }
            })
        })?;

        self.scheduler.add(tick).await?;
        self.scheduler.start().await?;

        tracing::info!("Reminder service started - checking due jobs every second");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        if let Some(delivery) = self.delivery.take() {
            delivery.abort();
        }
        Ok(())
    }
}

/// Sends one notification per fired job. A delivery failure is logged and
/// the job stays discarded; reminders are at-most-once, never retried.
async fn deliver_fired_reminders(bot: Bot, mut events_rx: mpsc::UnboundedReceiver<ReminderJob>) {
    while let Some(job) = events_rx.recv().await {
        let text = format!("⏰ Reminder: {}", job.text);
        match bot.send_message(ChatId(job.chat_id), text).await {
            Ok(_) => {
                tracing::info!(
                    "Delivered reminder {} (scheduled for {}) to chat {}",
                    job.id,
                    format_time_of_day(&job.fire_at),
                    job.chat_id
                );
            }
            Err(e) => {
                tracing::error!(
                    "Failed to deliver reminder {} to chat {}: {}",
                    job.id,
                    job.chat_id,
                    e
                );
            }
        }
    }
}
