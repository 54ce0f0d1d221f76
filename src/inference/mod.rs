pub mod engine;
pub mod trace;

pub use engine::{ask, ask_traced, enumerate_all, Distribution};
pub use trace::{NullSink, TraceEvent, TraceSink, VecSink, WriterSink};
