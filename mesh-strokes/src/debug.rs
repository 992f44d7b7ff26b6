use crate::layer::Layer;
use crate::trace::{Island, Trace3D};

/// Injection point for debug visualization. The core never implements
/// image popups or a 3D scene viewer itself (those are external
/// collaborators per the system scope); it only calls these hooks when
/// `Config::debug` is set, so an external viewer can be wired in without
/// the pipeline depending on it.
pub trait DebugSink {
    fn on_layer(&mut self, _layer: &Layer) {}
    fn on_islands(&mut self, _color: usize, _islands: &[Island]) {}
    fn on_traces_3d(&mut self, _traces: &[Trace3D]) {}
}

/// Default no-op sink used when no debug viewer is attached.
#[derive(Default)]
pub struct NullDebugSink;

impl DebugSink for NullDebugSink {}
