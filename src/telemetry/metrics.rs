//! Prometheus metrics setup and metric definitions

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    let buckets = [
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets(&buckets)?
        .install_recorder()?;

    Ok(handle)
}

/// Register metric descriptions and emit initial zero values so the
/// exposition carries HELP/TYPE lines from startup.
pub fn describe_metrics() {
    // HTTP metrics
    describe_counter!("lms_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "lms_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "lms_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    // Business metrics
    describe_counter!("lms_auth_login_total", "Login attempts by result");
    describe_counter!("lms_quiz_attempts_total", "Scored quiz attempts by outcome");
    describe_counter!("lms_course_completions_total", "Courses completed with a certificate");
    describe_counter!("lms_orders_total", "Orders created by status");

    counter!("lms_auth_login_total", "result" => "success").absolute(0);
    counter!("lms_quiz_attempts_total", "outcome" => "perfect").absolute(0);
    counter!("lms_course_completions_total").absolute(0);
    counter!("lms_orders_total", "status" => "pending").absolute(0);
    gauge!("lms_http_requests_in_flight").set(0.0);
}
