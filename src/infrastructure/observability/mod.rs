//! Observability infrastructure - Metrics and request recording

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_document_processed, record_http_request,
    PrometheusMetrics,
};
