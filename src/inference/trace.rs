use serde::Serialize;
use std::io::Write;

/// One step of the enumeration, reported while a traced query runs.
///
/// The engine emits these instead of printing: rendering is the sink's
/// concern, so the algorithm stays free of I/O and a trace can just as
/// well be collected or serialized as shown on a console.
#[derive(Debug, Clone, Serialize)]
pub enum TraceEvent {
    /// A query started: the variable under query and the evidence as
    /// `var=value` pairs.
    QueryStart {
        variable: String,
        evidence: Vec<(String, String)>,
    },
    /// The outer loop fixed the query variable to one candidate value.
    Candidate { variable: String, value: String },
    /// An already-bound variable contributed its factor to the product.
    Observed {
        depth: usize,
        variable: String,
        value: String,
        probability: f64,
    },
    /// A hidden variable is about to be summed out over its domain.
    HiddenStart {
        depth: usize,
        variable: String,
        values: Vec<String>,
    },
    /// One branch of a hidden-variable sum finished.
    HiddenBranch {
        depth: usize,
        variable: String,
        value: String,
        probability: f64,
        subtotal: f64,
    },
    /// A hidden-variable sum finished.
    HiddenTotal {
        depth: usize,
        variable: String,
        total: f64,
    },
    /// The unnormalized weight of one candidate value of the query
    /// variable.
    Weight { value: String, weight: f64 },
}

/// Receiver for [`TraceEvent`]s during a traced query.
pub trait TraceSink {
    fn emit(&mut self, event: &TraceEvent);
}

/// Sink that discards every event; used by untraced queries.
#[derive(Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn emit(&mut self, _event: &TraceEvent) {}
}

/// Sink that renders events as indented human-readable lines, two spaces
/// per recursion level.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn emit(&mut self, event: &TraceEvent) {
        let line = match event {
            TraceEvent::QueryStart { variable, evidence } => {
                let evidence = if evidence.is_empty() {
                    "no evidence".to_string()
                } else {
                    evidence
                        .iter()
                        .map(|(var, value)| format!("{}={}", var, value))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!("query {} | {}", variable, evidence)
            }
            TraceEvent::Candidate { variable, value } => {
                format!("--- candidate {}={} ---", variable, value)
            }
            TraceEvent::Observed {
                depth,
                variable,
                value,
                probability,
            } => format!(
                "{}{} bound to {}, P = {:.6}",
                "  ".repeat(*depth),
                variable,
                value,
                probability
            ),
            TraceEvent::HiddenStart {
                depth,
                variable,
                values,
            } => format!(
                "{}{} hidden, summing over: {}",
                "  ".repeat(*depth),
                variable,
                values.join(", ")
            ),
            TraceEvent::HiddenBranch {
                depth,
                variable,
                value,
                probability,
                subtotal,
            } => format!(
                "{}  {}={}: P = {:.6}, subtotal = {:.6}",
                "  ".repeat(*depth),
                variable,
                value,
                probability,
                subtotal
            ),
            TraceEvent::HiddenTotal {
                depth,
                variable,
                total,
            } => format!(
                "{}total over {}: {:.6}",
                "  ".repeat(*depth),
                variable,
                total
            ),
            TraceEvent::Weight { value, weight } => {
                format!("unnormalized weight for {}: {:.6}", value, weight)
            }
        };
        // A trace is best-effort diagnostics; a failed write should not
        // abort the query itself.
        let _ = writeln!(self.writer, "{}", line);
    }
}

/// Sink that collects events in memory, mainly for tests.
#[derive(Debug, Default)]
pub struct VecSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecSink {
    fn emit(&mut self, event: &TraceEvent) {
        self.events.push(event.clone());
    }
}
