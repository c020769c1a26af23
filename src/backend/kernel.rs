//! Concurrent evaluation kernel
//!
//! A single worker thread owns a long-lived interpreter and serves
//! requests from a controller over a pair of message queues.
//!
//! ```text
//! controller ── send(program) ──> [requests]  ──> worker
//!                                                  │ parse + eval
//! controller <── receive() ────── [responses] <────┘
//! ```
//!
//! Each non-empty request produces exactly one `(Expression, error)`
//! response; the error text is empty on success. The empty request is the
//! shutdown sentinel and produces no response.
//!
//! An interrupt only reaches the request the worker is evaluating when it is
//! raised. Raised while the worker is idle it does nothing.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::environment::Environment;
use super::interpreter::Interpreter;
use super::interrupt::InterruptFlag;
use super::message_queue::MessageQueue;
use super::models::Expression;

/// Evaluation result and error text; the text is empty on success.
pub type Response = (Expression, String);

const SHUTDOWN: &str = "";

/// Misuse of the kernel lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    AlreadyRunning,
    NotRunning,
    /// The worker thread could not be spawned
    Spawn(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::AlreadyRunning => {
                write!(f, "could not start the kernel, a worker is already running")
            }
            KernelError::NotRunning => write!(f, "no kernel worker is running"),
            KernelError::Spawn(reason) => write!(f, "failed to spawn kernel worker: {}", reason),
        }
    }
}

impl std::error::Error for KernelError {}

/// Cloneable handle that interrupts the kernel's in-flight request.
#[derive(Debug, Clone)]
pub struct Interrupter {
    flag: InterruptFlag,
    /// Set by the worker for the duration of one evaluation
    busy: Arc<Mutex<bool>>,
}

impl Interrupter {
    fn new() -> Self {
        Interrupter {
            flag: InterruptFlag::new(),
            busy: Arc::new(Mutex::new(false)),
        }
    }

    /// Raise the interrupt if a request is being evaluated. Returns whether
    /// one was.
    pub fn interrupt(&self) -> bool {
        let busy = self.busy.lock();
        if *busy {
            self.flag.raise();
        }
        *busy
    }

    /// Worker side: mark a request as started or finished. The flag is
    /// cleared on both edges under the same lock `interrupt` takes.
    fn set_busy(&self, value: bool) {
        let mut busy = self.busy.lock();
        self.flag.clear();
        *busy = value;
    }
}

/// Controller side of the evaluation kernel.
pub struct Kernel {
    requests: Arc<MessageQueue<String>>,
    responses: Arc<MessageQueue<Response>>,
    interrupter: Interrupter,
    /// Environment every fresh worker starts from
    snapshot: Environment,
    worker: Option<JoinHandle<()>>,
}

impl Kernel {
    /// Kernel whose workers start from `snapshot`. No worker runs until
    /// [`Kernel::start`].
    pub fn new(snapshot: Environment) -> Self {
        Kernel {
            requests: Arc::new(MessageQueue::new()),
            responses: Arc::new(MessageQueue::new()),
            interrupter: Interrupter::new(),
            snapshot,
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Spawn a worker with a fresh copy of the snapshot environment.
    pub fn start(&mut self) -> Result<(), KernelError> {
        if self.worker.is_some() {
            warn!("kernel start requested while a worker is running");
            return Err(KernelError::AlreadyRunning);
        }

        self.interrupter.set_busy(false);
        let requests = Arc::clone(&self.requests);
        let responses = Arc::clone(&self.responses);
        let interrupter = self.interrupter.clone();
        let env = self.snapshot.clone();

        let handle = thread::Builder::new()
            .name("plotscript-kernel".to_string())
            .spawn(move || worker_loop(requests, responses, env, interrupter))
            .map_err(|e| KernelError::Spawn(e.to_string()))?;

        self.worker = Some(handle);
        debug!("kernel started");
        Ok(())
    }

    /// Send the shutdown sentinel and wait for the worker to exit.
    ///
    /// Blocks until any evaluation in progress finishes; raise the interrupt
    /// first to cut it short.
    pub fn stop(&mut self) -> Result<(), KernelError> {
        let handle = match self.worker.take() {
            Some(handle) => handle,
            None => {
                warn!("kernel stop requested with no worker running");
                return Err(KernelError::NotRunning);
            }
        };

        self.requests.push(SHUTDOWN.to_string());
        if handle.join().is_err() {
            warn!("kernel worker panicked");
        }
        // A request sent after the sentinel is never served.
        if let Some(stray) = self.requests.try_pop() {
            debug!(request = %stray, "dropping request queued after shutdown");
        }
        debug!("kernel stopped");
        Ok(())
    }

    /// Stop if running, then start over from the snapshot environment.
    pub fn reset(&mut self) -> Result<(), KernelError> {
        if self.is_running() {
            self.interrupter.interrupt();
            self.stop()?;
        }
        self.start()
    }

    /// Ask the running evaluation to stop. The worker answers it with an
    /// interrupted error response. Returns `false` when nothing was running.
    pub fn interrupt(&self) -> bool {
        let raised = self.interrupter.interrupt();
        debug!(raised, "kernel interrupt requested");
        raised
    }

    /// Shared interrupt handle, for signal listeners.
    pub fn interrupt_handle(&self) -> Interrupter {
        self.interrupter.clone()
    }

    /// Queue a program for evaluation.
    pub fn send(&self, program: &str) -> Result<(), KernelError> {
        if !self.is_running() {
            return Err(KernelError::NotRunning);
        }
        if program.is_empty() {
            // Would be read as the shutdown sentinel
            return Ok(());
        }
        self.requests.push(program.to_string());
        Ok(())
    }

    /// Next response if one is ready.
    pub fn try_receive(&self) -> Option<Response> {
        self.responses.try_pop()
    }

    /// Block until the next response arrives.
    pub fn receive(&self) -> Result<Response, KernelError> {
        if !self.is_running() {
            return self.try_receive().ok_or(KernelError::NotRunning);
        }
        Ok(self.responses.wait_and_pop())
    }

    /// Send `program` and wait for its response.
    pub fn evaluate(&self, program: &str) -> Result<Response, KernelError> {
        self.send(program)?;
        self.receive()
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        if self.is_running() {
            self.interrupter.interrupt();
            let _ = self.stop();
        }
    }
}

fn worker_loop(
    requests: Arc<MessageQueue<String>>,
    responses: Arc<MessageQueue<Response>>,
    env: Environment,
    interrupter: Interrupter,
) {
    let mut interp = Interpreter::with_environment(env, interrupter.flag.clone());

    loop {
        let program = requests.wait_and_pop();
        if program == SHUTDOWN {
            debug!("kernel worker shutting down");
            break;
        }

        debug!(request = %program, "kernel worker evaluating");
        interrupter.set_busy(true);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| interp.eval_str(&program)));
        let response = match outcome {
            Ok(Ok(exp)) => (exp, String::new()),
            Ok(Err(err)) => (Expression::default(), err.to_string()),
            Err(_) => {
                warn!(request = %program, "evaluation panicked");
                (
                    Expression::default(),
                    "Error: evaluation aborted unexpectedly".to_string(),
                )
            }
        };

        interrupter.set_busy(false);
        responses.push(response);
    }
}
