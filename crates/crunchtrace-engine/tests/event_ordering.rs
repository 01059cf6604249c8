use crunchtrace_engine::{
    CallStack, EventBuffer, NoLocals, SharedEventBuffer, TraceEverything, TraceProcessor,
    TraceSession,
};
use crunchtrace_runtime::replay_script;
use crunchtrace_testing::assertions::{
    assert_depths_track_calls, assert_well_nested, stack_depths,
};
use crunchtrace_testing::fixtures::{call_line_return, trace};
use crunchtrace_testing::script::nested_calls;
use crunchtrace_testing::ScriptBuilder;
use crunchtrace_types::{CapturedValue, ExecutionCursor, Occurrence, TraceEvent};
use std::thread;

#[test]
fn test_call_line_return_produces_three_events() {
    let (events, _session) = trace(&call_line_return()).expect("trace failed");

    assert_eq!(events.len(), 3);
    assert_eq!(stack_depths(&events), vec![1, 1, 0]);
    assert_eq!(events[1].cursor().line, 11);

    match &events[2] {
        TraceEvent::MethodExit(exit) => {
            assert_eq!(exit.return_value(), Some(&CapturedValue::Int(42)));
            assert_eq!(exit.locals.get("x"), Some(&CapturedValue::Int(41)));
        }
        other => panic!("expected exit event, got {}", other.kind()),
    }
}

#[test]
fn test_nested_calls_are_well_nested() {
    for depth in [1, 2, 5, 16] {
        let (events, _) = trace(&nested_calls("deep.py", depth)).expect("trace failed");
        assert_well_nested(&events);
        assert_depths_track_calls(&events);
    }
}

#[test]
fn test_enter_and_exit_depth_relative_to_previous_stack() {
    let script = ScriptBuilder::new()
        .call("main.py", 1)
        .line(2)
        .call("lib.py", 10)
        .line(11)
        .call("lib.py", 20)
        .ret(21, CapturedValue::None)
        .line(12)
        .ret(12, 1)
        .line(3)
        .ret(3, 0)
        .build();

    let mut processor: TraceProcessor =
        TraceProcessor::new(Vec::new(), TraceEverything, TraceSession::new("depth"));

    for step in &script.steps {
        let before = processor.call_stack().depth();
        processor
            .on_occurrence(&step.occurrence, step)
            .expect("occurrence rejected");
        let recorded = processor.events().last().expect("no event recorded");

        match recorded {
            TraceEvent::MethodEnter(e) => assert_eq!(e.stack.depth(), before + 1),
            TraceEvent::MethodExit(e) => assert_eq!(e.stack.depth(), before - 1),
            TraceEvent::LineExecution(e) => assert_eq!(e.stack.depth(), before),
        }
    }
}

#[test]
fn test_function_names_reach_enter_events() {
    let script = ScriptBuilder::new()
        .raw(Occurrence::call(ExecutionCursor::new("main.py", 1)).with_function("main"))
        .raw(Occurrence::call(ExecutionCursor::new("lib.py", 10)).with_function("helper"))
        .line(11)
        .ret(11, 0)
        .ret(2, 0)
        .build();
    let (events, _) = trace(&script).expect("trace failed");

    let names: Vec<Option<&str>> = events
        .iter()
        .filter_map(|e| match e {
            TraceEvent::MethodEnter(enter) => Some(enter.function_name.as_deref()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec![Some("main"), Some("helper")]);
    assert_eq!(events[2].cursor().file, "lib.py");
    assert_well_nested(&events);
}

#[test]
fn test_exit_snapshot_matches_callers_frame() {
    let script = ScriptBuilder::new()
        .call("main.py", 1)
        .call("lib.py", 10)
        .ret(11, 5)
        .build();
    let (events, _) = trace(&script).expect("trace failed");

    let caller_enter = events[0].stack();
    let exit = events[2].stack();
    assert_eq!(exit, caller_enter);
}

#[test]
fn test_recorded_snapshots_survive_later_mutation() {
    let mut processor: TraceProcessor =
        TraceProcessor::new(Vec::new(), TraceEverything, TraceSession::new("alias"));

    processor
        .on_occurrence(&Occurrence::call(ExecutionCursor::new("a.py", 1)), &NoLocals)
        .unwrap();
    processor
        .on_occurrence(&Occurrence::line(ExecutionCursor::new("a.py", 2)), &NoLocals)
        .unwrap();
    let frozen = processor.events()[1].clone();

    for line in 3..50 {
        processor
            .on_occurrence(&Occurrence::line(ExecutionCursor::new("a.py", line)), &NoLocals)
            .unwrap();
    }
    processor
        .on_occurrence(&Occurrence::call(ExecutionCursor::new("b.py", 7)), &NoLocals)
        .unwrap();

    let recorded = &processor.events()[1];
    assert_eq!(recorded, &frozen);
    assert_eq!(recorded.stack().top().map(|f| f.cursor.line), Some(2));
    assert_eq!(recorded.stack().depth(), 1);
}

#[test]
fn test_live_stack_mutation_never_reaches_snapshot() {
    let mut stack = CallStack::new();
    stack.enter_frame(ExecutionCursor::new("a.py", 1));
    stack.enter_frame(ExecutionCursor::new("a.py", 5));
    let snapshot = stack.snapshot();

    stack.new_cursor_in_current_frame(ExecutionCursor::new("a.py", 6)).unwrap();
    stack.exit_frame().unwrap();
    stack.exit_frame().unwrap();
    assert!(stack.exit_frame().is_err());

    let lines: Vec<u32> = snapshot.walk_from_top().map(|f| f.cursor.line).collect();
    assert_eq!(lines, vec![5, 1]);
}

#[test]
fn test_threads_share_one_buffer_with_independent_stacks() {
    let shared = SharedEventBuffer::new();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let buffer = shared.clone();
            thread::spawn(move || {
                let file = format!("worker_{}.py", worker);
                let script = nested_calls(&file, 3);
                let mut processor = TraceProcessor::new(
                    buffer,
                    TraceEverything,
                    TraceSession::new(format!("thread-{}", worker)),
                );
                replay_script(&script, &mut processor).expect("replay failed");
                processor.finish().1
            })
        })
        .collect();

    let mut sessions: Vec<TraceSession> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();
    let mut merged = sessions.remove(0);
    for session in sessions {
        merged.merge(session);
    }

    let events = shared.take();
    assert_eq!(events.len(), 4 * 9);
    assert_eq!(merged.files_in_session().count(), 4);

    for worker in 0..4 {
        let file = format!("worker_{}.py", worker);
        let own: Vec<TraceEvent> = events
            .iter()
            .filter(|e| e.cursor().file == file)
            .cloned()
            .collect();
        assert_eq!(own.len(), 9);
        assert_well_nested(&own);
        assert_depths_track_calls(&own);
    }
    assert!(shared.is_empty());
}
