//! Prometheus counters exposed on `GET /metrics`.

use prometheus::{IntCounter, Registry, TextEncoder};

/// Per-app registry holding the request and prediction counters.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    http_requests: IntCounter,
    model_predictions: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests = IntCounter::new("http_requests_total", "Total HTTP Requests")?;
        let model_predictions =
            IntCounter::new("model_predictions_total", "Total Model Predictions")?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(model_predictions.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            model_predictions,
        })
    }

    pub fn record_request(&self) {
        self.http_requests.inc();
    }

    /// One completed ranking call.
    pub fn record_prediction(&self) {
        self.model_predictions.inc();
    }

    /// Text exposition format of every registered counter.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_render() {
        let m = Metrics::new().unwrap();
        let text = m.render().unwrap();
        assert!(text.contains("# TYPE http_requests_total counter"));
        assert!(text.contains("http_requests_total 0"));
        assert!(text.contains("model_predictions_total 0"));
    }

    #[test]
    fn registries_are_independent() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_request();
        a.record_request();
        a.record_prediction();

        assert!(a.render().unwrap().contains("http_requests_total 2"));
        assert!(a.render().unwrap().contains("model_predictions_total 1"));
        assert!(b.render().unwrap().contains("http_requests_total 0"));
    }
}
