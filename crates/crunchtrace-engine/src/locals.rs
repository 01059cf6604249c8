use crunchtrace_types::{CapturedValue, VariableSet};

/// Access to the local bindings of the frame an occurrence was raised in.
///
/// Implemented by the host engine. Visits every bound name in the order the
/// engine exposes them.
pub trait FrameLocals {
    fn visit_locals(&self, visitor: &mut dyn FnMut(&str, &CapturedValue));
}

/// Frame with no visible locals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocals;

impl FrameLocals for NoLocals {
    fn visit_locals(&self, _visitor: &mut dyn FnMut(&str, &CapturedValue)) {}
}

impl<N: AsRef<str>> FrameLocals for [(N, CapturedValue)] {
    fn visit_locals(&self, visitor: &mut dyn FnMut(&str, &CapturedValue)) {
        for (name, value) in self {
            visitor(name.as_ref(), value);
        }
    }
}

impl<N: AsRef<str>> FrameLocals for Vec<(N, CapturedValue)> {
    fn visit_locals(&self, visitor: &mut dyn FnMut(&str, &CapturedValue)) {
        self.as_slice().visit_locals(visitor)
    }
}

impl FrameLocals for VariableSet {
    fn visit_locals(&self, visitor: &mut dyn FnMut(&str, &CapturedValue)) {
        for variable in self {
            visitor(&variable.name, &variable.value);
        }
    }
}

/// Full re-scan of every visible local into `target`.
pub fn push_traceable_variables(locals: &dyn FrameLocals, target: &mut VariableSet) {
    locals.visit_locals(&mut |name, value| target.push_variable(name, value.clone()));
}
