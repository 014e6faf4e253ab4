/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Signed span between two [`Timestamp`]s.
pub type Span = chrono::Duration;

/// Fractional hours in a signed span, at millisecond resolution.
pub fn span_hours(span: Span) -> f64 {
    span.num_milliseconds() as f64 / 3_600_000.0
}

/// Fractional minutes in a signed span, at millisecond resolution.
pub fn span_minutes(span: Span) -> f64 {
    span.num_milliseconds() as f64 / 60_000.0
}
