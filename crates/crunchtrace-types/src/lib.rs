pub mod cursor;
pub mod event;
pub mod frame;
pub mod metadata;
pub mod occurrence;
pub mod value;
pub mod variables;

pub use cursor::ExecutionCursor;
pub use event::{EventKind, LineExecutionEvent, MethodEnterEvent, MethodExitEvent, TraceEvent};
pub use frame::{StackFrame, StackSnapshot};
pub use metadata::TraceSessionMetadata;
pub use occurrence::{Occurrence, OccurrenceKind};
pub use value::CapturedValue;
pub use variables::{RETURN_VARIABLE, Variable, VariableSet};
