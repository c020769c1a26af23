// Backend module for plotscript evaluation
//
// - `models`: atoms and expressions with their property maps
// - `environment`: symbol bindings and built-in procedures
// - `eval`: recursive evaluation, special forms and plotting
// - `interpreter`: parse-then-evaluate facade
// - `kernel`: worker thread serving evaluation requests over message queues

pub mod environment;
pub mod eval;
pub mod interpreter;
pub mod interrupt;
pub mod kernel;
pub mod message_queue;
pub mod models;

pub use environment::{Environment, Procedure};
pub use eval::{apply, eval, SemanticError, PARSE_FAILURE};
pub use interpreter::{Interpreter, STARTUP_PROGRAM};
pub use interrupt::InterruptFlag;
pub use kernel::{Interrupter, Kernel, KernelError, Response};
pub use message_queue::MessageQueue;
pub use models::*;
