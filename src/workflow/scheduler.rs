//! Delayed job scheduling
//!
//! The summary backend is simulated by a job that runs after a fixed delay.
//! [`ThreadScheduler`] sleeps on a background thread; [`ManualScheduler`]
//! keeps a virtual clock so tests decide when jobs run.

use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

/// A unit of deferred work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs after a delay, fire-and-forget
pub trait Scheduler {
    fn schedule(&self, delay: Duration, job: Job);
}

/// Runs each job on its own thread after sleeping for the delay
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, job: Job) {
        thread::spawn(move || {
            thread::sleep(delay);
            job();
        });
    }
}

struct Scheduled {
    due: Duration,
    seq: u64,
    job: Job,
}

#[derive(Default)]
struct ManualQueue {
    elapsed: Duration,
    next_seq: u64,
    jobs: Vec<Scheduled>,
}

/// Virtual-time scheduler; jobs run only when time is advanced
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualQueue> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Virtual time elapsed so far
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    /// Number of jobs not yet run
    pub fn pending(&self) -> usize {
        self.lock().jobs.len()
    }

    /// Advances virtual time and runs every job that became due
    ///
    /// Jobs run in due order, ties in scheduling order. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let due = {
            let mut queue = self.lock();
            queue.elapsed += by;
            let now = queue.elapsed;

            let (mut due, waiting): (Vec<_>, Vec<_>) =
                queue.jobs.drain(..).partition(|s| s.due <= now);
            queue.jobs = waiting;
            due.sort_by_key(|s| (s.due, s.seq));
            due
        };

        // Lock is released so jobs may schedule more work
        let count = due.len();
        for scheduled in due {
            (scheduled.job)();
        }
        count
    }

    /// Runs everything currently queued, regardless of delay
    pub fn run_all(&self) -> usize {
        let latest = self.lock().jobs.iter().map(|s| s.due).max();
        match latest {
            Some(due) => {
                let by = due.saturating_sub(self.elapsed());
                self.advance(by)
            }
            None => 0,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, job: Job) {
        let mut queue = self.lock();
        let due = queue.elapsed + delay;
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.jobs.push(Scheduled { due, seq, job });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn manual_jobs_wait_for_their_delay() {
        let scheduler = ManualScheduler::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        scheduler.schedule(
            Duration::from_millis(2000),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(1999)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.elapsed(), Duration::from_millis(2000));
    }

    #[test]
    fn manual_jobs_run_in_due_order() {
        let scheduler = ManualScheduler::new();
        let (tx, rx) = mpsc::channel();

        for (label, delay) in [("late", 30), ("early", 10), ("tie", 10)] {
            let tx = tx.clone();
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || tx.send(label).unwrap()),
            );
        }

        assert_eq!(scheduler.run_all(), 3);
        let order: Vec<_> = rx.try_iter().collect();
        assert_eq!(order, vec!["early", "tie", "late"]);
    }

    #[test]
    fn jobs_may_schedule_more_work() {
        let scheduler = Arc::new(ManualScheduler::new());
        let (tx, rx) = mpsc::channel();

        let inner = Arc::clone(&scheduler);
        scheduler.schedule(
            Duration::from_millis(5),
            Box::new(move || {
                inner.schedule(Duration::from_millis(5), Box::new(move || tx.send(()).unwrap()));
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn run_all_on_empty_queue() {
        assert_eq!(ManualScheduler::new().run_all(), 0);
    }

    #[test]
    fn thread_scheduler_runs_job() {
        let (tx, rx) = mpsc::channel();
        ThreadScheduler.schedule(Duration::from_millis(10), Box::new(move || tx.send(42).unwrap()));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(42));
    }
}
