// Engine module - call-stack reconstruction and event dispatch.
// Sits between the host execution engine (raw occurrences) and persistence.

pub mod buffer;
pub mod call_stack;
pub mod error;
pub mod filter;
pub mod locals;
pub mod processor;
pub mod session;
pub mod sink;

pub use buffer::{EventBuffer, SharedEventBuffer};
pub use call_stack::CallStack;
pub use error::{Error, Result};
pub use filter::{FileFilter, PathFilter, TraceEverything};
pub use locals::{FrameLocals, NoLocals, push_traceable_variables};
pub use processor::{TraceDisposition, TraceProcessor};
pub use session::TraceSession;
pub use sink::{NullSink, RecordedOccurrence, RecordingSink, SimulationSink};
