//! Metric name constants and recording helpers

use std::time::Instant;

use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::metrics::Histogram;

/// Record a duration measurement on a histogram
pub fn record_duration(histogram: &Histogram<f64>, start: Instant, attributes: &[KeyValue]) {
    histogram.record(start.elapsed().as_secs_f64(), attributes);
}

// Upload metric names
pub const UPLOAD_COUNT: &str = "clipscribe.upload.count";

// Transcription metric names
pub const TRANSCRIPTION_DURATION: &str = "clipscribe.transcription.duration";

// Completion metric names
pub const COMPLETION_TIME_TO_FIRST_TOKEN: &str = "clipscribe.completion.time_to_first_token";

fn meter() -> opentelemetry::metrics::Meter {
    global::meter("clipscribe")
}

/// Count an upload attempt by outcome (`stored`, `rejected`, `failed`)
pub fn record_upload(outcome: &'static str) {
    meter()
        .u64_counter(UPLOAD_COUNT)
        .build()
        .add(1, &[KeyValue::new("outcome", outcome)]);
}

/// Record how long a transcription call took
pub fn record_transcription(start: Instant, provider: &str, success: bool) {
    let histogram = meter().f64_histogram(TRANSCRIPTION_DURATION).with_unit("s").build();
    record_duration(
        &histogram,
        start,
        &[
            KeyValue::new("provider", provider.to_owned()),
            KeyValue::new("success", success),
        ],
    );
}

/// Record the delay from sending a completion request to its first text chunk
pub fn record_time_to_first_token(start: Instant) {
    let histogram = meter()
        .f64_histogram(COMPLETION_TIME_TO_FIRST_TOKEN)
        .with_unit("s")
        .build();
    record_duration(&histogram, start, &[]);
}
