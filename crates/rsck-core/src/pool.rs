// crates/rsck-core/src/pool.rs
//
// Fixed-size worker pool draining a FIFO job queue.
//
// All state lives in the pool instance. Workers block on a condvar while the
// queue is empty; `drain_and_join` sets the stop flag, wakes everyone and
// joins each thread handle. A worker exits only once stop is set AND the
// queue is empty, so every submitted job runs exactly once.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::error::{Result, RsckError};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Queue {
    jobs: VecDeque<Job>,
    stop: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    ready: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Queue> {
        // Jobs run outside the lock; the queue is coherent even if poisoned.
        self.queue.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Next job, or `None` once stopped and drained.
    fn next_job(&self) -> Option<Job> {
        let mut q = self.lock();
        loop {
            if let Some(job) = q.jobs.pop_front() {
                return Some(job);
            }
            if q.stop {
                return None;
            }
            q = self.ready.wait(q).unwrap_or_else(|p| p.into_inner());
        }
    }
}

/// Per-worker tallies, returned through the join handle.
#[derive(Clone, Copy, Debug, Default)]
struct WorkerTally {
    executed: u64,
    panicked: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub workers: usize,
    /// Jobs that ran to completion.
    pub executed: u64,
    /// Jobs that panicked. Counted separately from `executed`.
    pub panicked: u64,
}

pub struct WorkerPool {
    shared: Arc<Shared>,
    threads: Vec<JoinHandle<WorkerTally>>,
}

impl WorkerPool {
    /// Start `workers` threads. They idle until jobs are submitted.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(RsckError::Pool("worker count must be at least 1".into()));
        }

        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue { jobs: VecDeque::new(), stop: false }),
            ready: Condvar::new(),
        });

        let mut pool = Self { shared, threads: Vec::with_capacity(workers) };
        for worker_id in 0..workers {
            let shared = Arc::clone(&pool.shared);
            let th = thread::Builder::new()
                .name(format!("rsck-worker-{worker_id}"))
                .spawn(move || worker_loop(worker_id, &shared))
                .map_err(|e| RsckError::Pool(format!("spawn worker {worker_id}: {e}")))?;
            pool.threads.push(th);
        }

        debug!(workers, "worker pool started");
        Ok(pool)
    }

    /// Queue a job and wake one idle worker.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.lock().jobs.push_back(Box::new(job));
        self.shared.ready.notify_one();
    }

    /// Stop accepting work, run everything already queued, and wait for all
    /// workers to exit.
    pub fn drain_and_join(mut self) -> PoolReport {
        self.shutdown()
    }

    fn shutdown(&mut self) -> PoolReport {
        self.shared.lock().stop = true;
        self.shared.ready.notify_all();

        let mut report = PoolReport { workers: self.threads.len(), ..PoolReport::default() };
        for th in self.threads.drain(..) {
            match th.join() {
                Ok(t) => {
                    report.executed += t.executed;
                    report.panicked += t.panicked;
                }
                Err(_) => error!("worker thread exited abnormally"),
            }
        }
        report
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if !self.threads.is_empty() {
            self.shutdown();
        }
    }
}

fn worker_loop(worker_id: usize, shared: &Shared) -> WorkerTally {
    let mut tally = WorkerTally::default();
    while let Some(job) = shared.next_job() {
        match panic::catch_unwind(AssertUnwindSafe(job)) {
            Ok(()) => tally.executed += 1,
            Err(p) => {
                let msg = p
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| p.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".into());
                error!(worker_id, panic = %msg, "job panicked");
                tally.panicked += 1;
            }
        }
    }
    tally
}
