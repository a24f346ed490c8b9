//! Per-invocation trace tables.
//!
//! Algorithms accept an optional `&mut Trace` and append one [`DebugRow`] per
//! iteration. Tracing is purely observational: the geometric output is the
//! same whether or not a trace is requested.

/// Which of the three row layouts a trace uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowShape {
    /// 4 fields: iteration, x, y, displayed pixel.
    Step,
    /// 6 fields: iteration, x, y, error, corrected error, displayed pixel.
    Error,
    /// 9 fields: step, decision, delta, delta*, pixel, x, y, next decision, plot.
    Decision,
}

/// One row of an algorithm trace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugRow {
    /// Incremental sampling step (DDA).
    Step {
        /// Iteration index.
        iteration: usize,
        /// Exact x before rounding.
        x: f64,
        /// Exact y before rounding.
        y: f64,
        /// Pixel actually displayed.
        displayed: (i32, i32),
    },
    /// Error-term step (Bresenham, Wu).
    Error {
        /// Iteration index.
        iteration: usize,
        /// Current x.
        x: f64,
        /// Current y.
        y: f64,
        /// Error value before correction.
        error: f64,
        /// Error value after correction.
        corrected: f64,
        /// Pixel actually displayed.
        displayed: (i32, i32),
    },
    /// Decision-variable step (conics, parametric curves).
    Decision {
        /// Step index.
        step: usize,
        /// Decision value at this step.
        decision: f64,
        /// Change of the decision value.
        delta: f64,
        /// Secondary correction, 0 when not applicable.
        delta_star: f64,
        /// Pixel chosen at this step.
        pixel: (i32, i32),
        /// Exact x.
        x: f64,
        /// Exact y.
        y: f64,
        /// Decision value for the next step.
        next_decision: f64,
        /// Pixel handed to the sink.
        plot: (i32, i32),
    },
}

impl DebugRow {
    /// Layout of this row.
    #[must_use]
    pub const fn shape(&self) -> RowShape {
        match self {
            Self::Step { .. } => RowShape::Step,
            Self::Error { .. } => RowShape::Error,
            Self::Decision { .. } => RowShape::Decision,
        }
    }
}

/// Ordered rows produced by a single algorithm invocation.
///
/// All rows share one [`RowShape`]. Every algorithm clears the trace it is
/// given before recording, so one trace can be reused across calls.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    rows: Vec<DebugRow>,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, row: DebugRow) {
        debug_assert!(
            self.shape().map_or(true, |shape| shape == row.shape()),
            "trace rows must share one shape"
        );
        self.rows.push(row);
    }

    /// Shape of the rows, `None` while empty.
    #[must_use]
    pub fn shape(&self) -> Option<RowShape> {
        self.rows.first().map(DebugRow::shape)
    }

    /// Rows in emission order.
    #[must_use]
    pub fn rows(&self) -> &[DebugRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Consume the trace, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<DebugRow> {
        self.rows
    }
}

/// Free-form step messages for algorithms whose progress is not tabular
/// (polygon normals, convexity, hull construction).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepLog {
    entries: Vec<String>,
}

impl StepLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    /// Messages in order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Clear an optional trace at the start of an algorithm run.
pub(crate) fn begin(trace: Option<&mut Trace>) -> Option<&mut Trace> {
    trace.map(|trace| {
        trace.clear();
        trace
    })
}

/// Append to an optional log, building the message only when it is wanted.
pub(crate) fn note(log: &mut Option<&mut StepLog>, message: impl FnOnce() -> String) {
    if let Some(log) = log.as_deref_mut() {
        log.record(message());
    }
}
