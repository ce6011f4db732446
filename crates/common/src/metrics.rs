use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static UPSERTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "result_store_upserts_total",
        "Results written, by whether a new row was inserted or an existing one updated",
        &["outcome"]
    )
    .expect("register upserts_total")
});

pub static DELETES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "result_store_deletes_total",
        "Results removed by id"
    )
    .expect("register deletes_total")
});

pub static AUTH_REJECTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "result_store_auth_rejections_total",
        "Mutating requests rejected by the access-token check",
        &["reason"]
    )
    .expect("register auth_rejections_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        UPSERTS_TOTAL.with_label_values(&["inserted"]).inc();
        DELETES_TOTAL.inc();
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("result_store_upserts_total"));
        assert!(body.contains("result_store_deletes_total"));
    }
}
