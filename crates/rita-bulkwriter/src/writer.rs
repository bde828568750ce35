//! The multi-worker batching engine itself (§4.3, §5).
//!
//! Workers run on plain OS threads (`std::thread::scope`), not a
//! green-thread pool — the workspace forbids `unsafe_code` but is
//! otherwise happy mixing blocking threads with lock-free/condvar
//! coordination, which is what the cooperative fan-in here needs. Each
//! worker calls back into the async store session via a `tokio::Handle`
//! borrowed from the caller's runtime.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use rita_error::{Error, Result};
use rita_store::Session;

use crate::rate_limiter::RateLimiter;
use crate::scheduling::should_read;

/// Running totals reported back to the caller once every worker has
/// drained and exited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub records_received: u64,
    pub batches_sent: u64,
}

struct Shared {
    slots: Mutex<Vec<usize>>,
    cond: Condvar,
}

/// Configuration for one [`BulkWriter`] run.
pub struct WriterConfig {
    pub table: String,
    pub batch_size: usize,
    pub worker_count: usize,
}

/// Drives `worker_count` cooperative workers over an internal channel,
/// flushing batches of `table`-bound rows into `session`. One instance
/// handles exactly one staging table; callers that feed multiple tables
/// (conn, http, ssl, dns, ...) run one `BulkWriter` per table, each with
/// its own channel.
pub struct BulkWriter<T> {
    config: WriterConfig,
    session: Session,
    limiter: Arc<RateLimiter>,
    cancel: CancellationToken,
    progress: Option<Sender<usize>>,
    tx: Sender<T>,
    rx: Receiver<T>,
    closed: Arc<AtomicBool>,
}

impl<T> BulkWriter<T>
where
    T: Clone + Serialize + clickhouse::Row + Send + 'static,
{
    #[must_use]
    pub fn new(config: WriterConfig, session: Session, cancel: CancellationToken) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            config,
            session,
            limiter: Arc::new(RateLimiter::default_policy()),
            cancel,
            progress: None,
            tx,
            rx,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, tx: Sender<usize>) -> Self {
        self.progress = Some(tx);
        self
    }

    /// A cloneable producer handle. Every clone must be dropped (or the
    /// process must exit) before [`BulkWriter::close`] can let the final
    /// drain proceed.
    #[must_use]
    pub fn sender(&self) -> Sender<T> {
        self.tx.clone()
    }

    /// Signal "no more records will ever be sent" (§4.3's close protocol).
    /// Drops this writer's own retained sender clone; callers are
    /// responsible for dropping every other clone obtained from
    /// [`BulkWriter::sender`] so the channel actually disconnects.
    pub fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        let (empty_tx, _) = crossbeam_channel::bounded::<T>(0);
        self.tx = empty_tx;
    }

    /// Run the worker pool to completion. Blocks the calling thread until
    /// the channel disconnects and every worker has drained its buffer.
    ///
    /// # Errors
    /// Returns `Error::BulkWriterFatal` at the first failed batch; per
    /// §4.3, a partially applied batch is unsafe for downstream
    /// aggregation, so this is the one failure mode this crate treats as
    /// unrecoverable rather than retryable.
    pub fn run(&self, rt: &Handle) -> Result<WriterStats> {
        let n = self.config.worker_count.max(1);
        let shared = Arc::new(Shared {
            slots: Mutex::new(vec![0usize; n]),
            cond: Condvar::new(),
        });
        let fatal: Arc<Mutex<Option<Error>>> = Arc::new(Mutex::new(None));
        let received = Arc::new(AtomicU64::new(0));
        let sent = Arc::new(AtomicU64::new(0));

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(n);
            for idx in 0..n {
                let shared = Arc::clone(&shared);
                let rx = self.rx.clone();
                let fatal = Arc::clone(&fatal);
                let received = Arc::clone(&received);
                let sent = Arc::clone(&sent);
                let limiter = Arc::clone(&self.limiter);
                let progress = self.progress.clone();
                let cancel = self.cancel.clone();
                let closed = Arc::clone(&self.closed);
                let batch_size = self.config.batch_size.max(1);
                let table = self.config.table.clone();
                let session = self.session.clone();

                handles.push(scope.spawn(move || {
                    run_worker(WorkerArgs {
                        idx,
                        batch_size,
                        table: &table,
                        session: &session,
                        rt,
                        shared: &shared,
                        rx: &rx,
                        limiter: &limiter,
                        fatal: &fatal,
                        received: &received,
                        sent: &sent,
                        progress: progress.as_ref(),
                        cancel: &cancel,
                        closed: &closed,
                    });
                }));
            }
            for h in handles {
                let _ = h.join();
            }
        });

        if let Some(err) = fatal.lock().take() {
            return Err(err);
        }

        Ok(WriterStats {
            records_received: received.load(Ordering::SeqCst),
            batches_sent: sent.load(Ordering::SeqCst),
        })
    }
}

struct WorkerArgs<'a, T> {
    idx: usize,
    batch_size: usize,
    table: &'a str,
    session: &'a Session,
    rt: &'a Handle,
    shared: &'a Shared,
    rx: &'a Receiver<T>,
    limiter: &'a RateLimiter,
    fatal: &'a Mutex<Option<Error>>,
    received: &'a AtomicU64,
    sent: &'a AtomicU64,
    progress: Option<&'a Sender<usize>>,
    cancel: &'a CancellationToken,
    closed: &'a AtomicBool,
}

fn run_worker<T>(args: WorkerArgs<'_, T>)
where
    T: Clone + Serialize + clickhouse::Row + Send,
{
    let WorkerArgs {
        idx,
        batch_size,
        table,
        session,
        rt,
        shared,
        rx,
        limiter,
        fatal,
        received,
        sent,
        progress,
        cancel,
        closed,
    } = args;

    let mut buffer: Vec<T> = Vec::with_capacity(batch_size);

    loop {
        if cancel.is_cancelled() || fatal.lock().is_some() {
            break;
        }

        {
            let mut slots = shared.slots.lock();
            loop {
                let input_empty = rx.is_empty();
                let channel_closed = closed.load(Ordering::SeqCst);
                if should_read(&slots, idx, batch_size, channel_closed, input_empty) {
                    break;
                }
                if cancel.is_cancelled() || fatal.lock().is_some() {
                    flush_remaining(table, session, rt, &buffer, idx, limiter, fatal, progress, sent);
                    return;
                }
                shared.cond.wait_for(&mut slots, Duration::from_millis(50));
            }
        }

        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(record) => {
                {
                    let mut slots = shared.slots.lock();
                    slots[idx] += 1;
                }
                received.fetch_add(1, Ordering::SeqCst);
                buffer.push(record);

                if buffer.len() >= batch_size {
                    {
                        let _slots = shared.slots.lock();
                        shared.cond.notify_all();
                    }
                    limiter.acquire();
                    if let Err(e) = flush(table, session, rt, &buffer) {
                        *fatal.lock() = Some(Error::BulkWriterFatal {
                            offset: sent.load(Ordering::SeqCst) * batch_size as u64,
                            source: Box::new(e),
                        });
                        shared.cond.notify_all();
                        return;
                    }
                    if let Some(tx) = progress {
                        let _ = tx.send(buffer.len());
                    }
                    sent.fetch_add(1, Ordering::SeqCst);
                    {
                        let mut slots = shared.slots.lock();
                        slots[idx] = 0;
                        shared.cond.notify_all();
                    }
                    buffer.clear();
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                // Nothing arrived within the poll window; loop back and
                // re-check cancellation/closure instead of blocking
                // indefinitely on a channel that may never receive again.
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                flush_remaining(table, session, rt, &buffer, idx, limiter, fatal, progress, sent);
                return;
            }
        }
    }
    flush_remaining(table, session, rt, &buffer, idx, limiter, fatal, progress, sent);
}

#[allow(clippy::too_many_arguments)]
fn flush_remaining<T>(
    table: &str,
    session: &Session,
    rt: &Handle,
    buffer: &[T],
    idx: usize,
    limiter: &RateLimiter,
    fatal: &Mutex<Option<Error>>,
    progress: Option<&Sender<usize>>,
    sent: &AtomicU64,
) where
    T: Clone + Serialize + clickhouse::Row,
{
    if buffer.is_empty() {
        return;
    }
    limiter.acquire();
    if let Err(e) = flush(table, session, rt, buffer) {
        *fatal.lock() = Some(Error::BulkWriterFatal {
            offset: sent.load(Ordering::SeqCst) * buffer.len() as u64,
            source: Box::new(e),
        });
        return;
    }
    if let Some(tx) = progress {
        let _ = tx.send(buffer.len());
    }
    sent.fetch_add(1, Ordering::SeqCst);
    let _ = idx;
}

fn flush<T>(table: &str, session: &Session, rt: &Handle, buffer: &[T]) -> Result<()>
where
    T: Clone + Serialize + clickhouse::Row,
{
    rt.block_on(session.insert_batch(table, buffer))
}
