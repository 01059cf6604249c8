use crunchtrace_types::{
    CapturedValue, LineExecutionEvent, MethodEnterEvent, MethodExitEvent, Occurrence,
    OccurrenceKind, RETURN_VARIABLE, TraceEvent,
};
use tracing::{debug, error, warn};

use crate::buffer::EventBuffer;
use crate::call_stack::CallStack;
use crate::filter::FileFilter;
use crate::locals::{FrameLocals, push_traceable_variables};
use crate::session::TraceSession;
use crate::sink::{NullSink, SimulationSink};
use crate::{Error, Result};

/// What the host engine should do after delivering an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceDisposition {
    /// Keep delivering occurrences to this processor.
    Continue,
    /// The file is not traced; the engine may stop reporting inside this frame.
    Ignore,
    /// The run was aborted by a fatal error; stop delivering altogether.
    Detach,
}

/// Turns raw occurrences into stack-aware trace events.
///
/// One processor serves one logical thread of the traced program. Occurrences
/// must be delivered sequentially; for multi-threaded tracing give each thread
/// its own processor over a [`crate::SharedEventBuffer`].
pub struct TraceProcessor<B: EventBuffer = Vec<TraceEvent>> {
    event_buffer: B,
    call_stack: CallStack,
    file_filter: Box<dyn FileFilter + Send>,
    session: TraceSession,
    simulation: Box<dyn SimulationSink + Send>,
    aborted: bool,
}

impl<B: EventBuffer> TraceProcessor<B> {
    pub fn new(
        event_buffer: B,
        file_filter: impl FileFilter + Send + 'static,
        session: TraceSession,
    ) -> Self {
        Self {
            event_buffer,
            call_stack: CallStack::new(),
            file_filter: Box::new(file_filter),
            session,
            simulation: Box::new(NullSink),
            aborted: false,
        }
    }

    pub fn with_sink(mut self, sink: impl SimulationSink + Send + 'static) -> Self {
        self.simulation = Box::new(sink);
        self
    }

    /// Entry point called by the host engine once per occurrence.
    pub fn on_occurrence(
        &mut self,
        occurrence: &Occurrence,
        locals: &dyn FrameLocals,
    ) -> Result<TraceDisposition> {
        if self.aborted {
            return Ok(TraceDisposition::Detach);
        }

        let file = occurrence.file();
        if !self.file_filter.should_trace(file) {
            self.session.will_skip_file(file);
            return Ok(TraceDisposition::Ignore);
        }

        let event = match self.process_event(occurrence, locals) {
            Ok(event) => event,
            Err(err) => {
                error!(
                    session = %self.session.name,
                    kind = %occurrence.kind,
                    cursor = %occurrence.cursor,
                    error = %err,
                    "aborting trace run"
                );
                self.aborted = true;
                return Err(err);
            }
        };
        self.session.did_enter_traceable_file(file);
        self.event_buffer.push_event(event);

        if let Err(err) = self.simulation.save_for_simulator(occurrence, locals) {
            warn!(error = %err, cursor = %occurrence.cursor, "simulation sink rejected occurrence");
        }

        Ok(TraceDisposition::Continue)
    }

    /// Applies the stack mutation for `occurrence` and builds its event.
    ///
    /// The snapshot is always taken after the mutation.
    fn process_event(
        &mut self,
        occurrence: &Occurrence,
        locals: &dyn FrameLocals,
    ) -> Result<TraceEvent> {
        let cursor = occurrence.cursor.clone();

        let event = match occurrence.kind {
            OccurrenceKind::Call => {
                self.call_stack.enter_frame(cursor.clone());
                let mut current = MethodEnterEvent::new(cursor, self.call_stack.snapshot());
                current.function_name = occurrence.function_name.clone();
                push_traceable_variables(locals, current.input_variables_mut());
                TraceEvent::MethodEnter(current)
            }
            OccurrenceKind::Line => {
                self.call_stack.new_cursor_in_current_frame(cursor.clone())?;
                let mut current = LineExecutionEvent::new(cursor, self.call_stack.snapshot());
                push_traceable_variables(locals, &mut current.locals);
                TraceEvent::LineExecution(current)
            }
            OccurrenceKind::Return => {
                self.call_stack
                    .exit_frame()
                    .map_err(|_| Error::StackUnderflow {
                        operation: "exit_frame",
                        cursor: Some(cursor.clone()),
                    })?;
                let mut current = MethodExitEvent::new(cursor, self.call_stack.snapshot());
                let returned = occurrence
                    .return_value
                    .clone()
                    .unwrap_or(CapturedValue::None);
                current
                    .return_variables
                    .push_variable(RETURN_VARIABLE, returned);
                push_traceable_variables(locals, &mut current.locals);
                TraceEvent::MethodExit(current)
            }
        };

        debug!(
            kind = %event.kind(),
            cursor = %event.cursor(),
            depth = event.stack().depth(),
            "recorded trace event"
        );
        Ok(event)
    }

    pub fn events(&self) -> &B {
        &self.event_buffer
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub fn session(&self) -> &TraceSession {
        &self.session
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Ends the run and hands back the buffer and session bookkeeping.
    ///
    /// Aborted runs are finished the same way; the partial buffer is still a
    /// valid session.
    pub fn finish(mut self) -> (B, TraceSession) {
        self.session.finish();
        (self.event_buffer, self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TraceEverything;
    use crate::locals::NoLocals;
    use crunchtrace_types::ExecutionCursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn processor() -> TraceProcessor {
        TraceProcessor::new(Vec::new(), TraceEverything, TraceSession::new("test"))
    }

    fn at(line: u32) -> ExecutionCursor {
        ExecutionCursor::new("a.py", line)
    }

    #[test]
    fn test_call_line_return_scenario() {
        let mut p = processor();
        p.on_occurrence(&Occurrence::call(at(10)), &NoLocals).unwrap();
        p.on_occurrence(&Occurrence::line(at(11)), &vec![("x", CapturedValue::Int(1))])
            .unwrap();
        p.on_occurrence(&Occurrence::returning(at(11), 42.into()), &NoLocals)
            .unwrap();

        let events = p.events();
        assert_eq!(events.len(), 3);

        assert!(matches!(events[0], TraceEvent::MethodEnter(_)));
        assert_eq!(events[0].stack().depth(), 1);

        match &events[1] {
            TraceEvent::LineExecution(e) => {
                assert_eq!(e.stack.depth(), 1);
                assert_eq!(e.cursor.line, 11);
                assert_eq!(e.locals.get("x"), Some(&CapturedValue::Int(1)));
            }
            other => panic!("expected line event, got {:?}", other.kind()),
        }

        match &events[2] {
            TraceEvent::MethodExit(e) => {
                assert_eq!(e.stack.depth(), 0);
                assert_eq!(e.return_value(), Some(&CapturedValue::Int(42)));
            }
            other => panic!("expected exit event, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_return_on_empty_stack_aborts_run() {
        let mut p = processor();
        let err = p
            .on_occurrence(&Occurrence::returning(at(3), 1.into()), &NoLocals)
            .unwrap_err();

        assert!(matches!(err, Error::StackUnderflow { .. }));
        assert!(p.events().is_empty());
        assert!(p.is_aborted());

        let next = p.on_occurrence(&Occurrence::call(at(1)), &NoLocals).unwrap();
        assert_eq!(next, TraceDisposition::Detach);
        assert!(p.events().is_empty());
    }

    #[test]
    fn test_underflowing_file_is_not_counted_as_traced() {
        let mut p = processor();
        p.on_occurrence(&Occurrence::call(at(1)), &NoLocals).unwrap();
        p.on_occurrence(&Occurrence::returning(at(2), 0.into()), &NoLocals)
            .unwrap();

        let stray = Occurrence::returning(ExecutionCursor::new("b.py", 9), 0.into());
        assert!(p.on_occurrence(&stray, &NoLocals).is_err());

        assert_eq!(
            p.session().files_in_session().collect::<Vec<_>>(),
            vec!["a.py"]
        );
    }

    #[test]
    fn test_enter_event_keeps_function_name() {
        let mut p = processor();
        p.on_occurrence(&Occurrence::call(at(1)).with_function("main"), &NoLocals)
            .unwrap();

        match &p.events()[0] {
            TraceEvent::MethodEnter(e) => assert_eq!(e.function_name.as_deref(), Some("main")),
            other => panic!("expected enter event, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_line_without_enclosing_call_aborts_run() {
        let mut p = processor();
        let err = p
            .on_occurrence(&Occurrence::line(at(1)), &NoLocals)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::StackUnderflow {
                operation: "new_cursor_in_current_frame",
                ..
            }
        ));
    }

    #[test]
    fn test_filtered_file_is_skipped_and_reported() {
        let mut p: TraceProcessor = TraceProcessor::new(
            Vec::new(),
            |path: &str| !path.starts_with("/usr/lib"),
            TraceSession::new("test"),
        );

        let skipped = Occurrence::call(ExecutionCursor::new("/usr/lib/python3/os.py", 5));
        let disposition = p.on_occurrence(&skipped, &NoLocals).unwrap();

        assert_eq!(disposition, TraceDisposition::Ignore);
        assert!(p.events().is_empty());
        assert!(p.call_stack().is_empty());
        assert_eq!(
            p.session().excluded_files().collect::<Vec<_>>(),
            vec!["/usr/lib/python3/os.py"]
        );
    }

    #[test]
    fn test_return_without_value_records_none() {
        let mut p = processor();
        p.on_occurrence(&Occurrence::call(at(1)), &NoLocals).unwrap();
        let mut ret = Occurrence::returning(at(2), CapturedValue::None);
        ret.return_value = None;
        p.on_occurrence(&ret, &NoLocals).unwrap();

        match &p.events()[1] {
            TraceEvent::MethodExit(e) => assert_eq!(e.return_value(), Some(&CapturedValue::None)),
            other => panic!("expected exit event, got {:?}", other.kind()),
        }
    }

    struct FailingSink;

    impl SimulationSink for FailingSink {
        fn save_for_simulator(
            &mut self,
            _occurrence: &Occurrence,
            _locals: &dyn FrameLocals,
        ) -> Result<()> {
            Err(Error::Sink("disk full".to_string()))
        }
    }

    #[test]
    fn test_failing_sink_does_not_affect_buffer() {
        let mut p = processor().with_sink(FailingSink);
        let disposition = p.on_occurrence(&Occurrence::call(at(1)), &NoLocals).unwrap();

        assert_eq!(disposition, TraceDisposition::Continue);
        assert_eq!(p.events().len(), 1);
    }

    struct CountingSink(Arc<AtomicUsize>);

    impl SimulationSink for CountingSink {
        fn save_for_simulator(
            &mut self,
            _occurrence: &Occurrence,
            _locals: &dyn FrameLocals,
        ) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_sink_receives_only_traced_occurrences() {
        let forwarded = Arc::new(AtomicUsize::new(0));
        let mut p: TraceProcessor = TraceProcessor::new(
            Vec::new(),
            |path: &str| path == "a.py",
            TraceSession::new("test"),
        )
        .with_sink(CountingSink(forwarded.clone()));

        p.on_occurrence(&Occurrence::call(at(1)), &NoLocals).unwrap();
        p.on_occurrence(
            &Occurrence::call(ExecutionCursor::new("b.py", 1)),
            &NoLocals,
        )
        .unwrap();

        assert_eq!(forwarded.load(Ordering::SeqCst), 1);
        assert_eq!(p.events().len(), 1);
        assert_eq!(
            p.session().files_in_session().collect::<Vec<_>>(),
            vec!["a.py"]
        );
    }
}
