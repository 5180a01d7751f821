// Per-file import tracking: durations, row counts and throughput
use std::collections::HashMap;
use std::sync::Mutex;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use tracing::{info, warn, error, debug};
use uuid::Uuid;

/// Configuration for the monitoring system
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub enable_performance_tracking: bool,
    pub max_completed_operations: usize,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable_performance_tracking: true,
            max_completed_operations: 1000,
        }
    }
}

/// Status of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    InProgress,
    Completed,
    Failed,
}

/// Performance metrics for an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub operation_id: String,
    pub operation_name: String,
    pub status: OperationStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
    pub records_processed: Option<u64>,
    pub throughput: Option<f64>, // records per second
    pub error: Option<String>,
}

/// Aggregated statistics over completed operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub active_operations: usize,
    pub completed_operations: usize,
    pub successful_operations: usize,
    pub failed_operations: usize,
    pub avg_duration_ms: f64,
    pub total_records_processed: u64,
}

/// Handle for one in-flight operation
#[derive(Debug)]
pub struct OperationTracker {
    pub operation_id: String,
    pub operation_name: String,
    pub start_time: DateTime<Utc>,
}

impl OperationTracker {
    fn elapsed_ms(&self) -> u64 {
        Utc::now()
            .signed_duration_since(self.start_time)
            .num_milliseconds()
            .max(0) as u64
    }
}

/// Main monitoring system
pub struct MonitoringSystem {
    config: MonitoringConfig,
    active_operations: Mutex<HashMap<String, PerformanceMetric>>,
    completed_operations: Mutex<Vec<PerformanceMetric>>,
}

impl Default for MonitoringSystem {
    fn default() -> Self {
        Self::new(MonitoringConfig::default())
    }
}

impl MonitoringSystem {
    /// Create a new monitoring system with configuration
    pub fn new(config: MonitoringConfig) -> Self {
        debug!("Initializing monitoring system with config: {:?}", config);

        Self {
            config,
            active_operations: Mutex::new(HashMap::new()),
            completed_operations: Mutex::new(Vec::new()),
        }
    }

    /// Start tracking a new operation
    pub fn start_operation(&self, operation_name: &str) -> OperationTracker {
        let operation_id = Uuid::new_v4().to_string();
        let start_time = Utc::now();

        if self.config.enable_performance_tracking {
            let metric = PerformanceMetric {
                operation_id: operation_id.clone(),
                operation_name: operation_name.to_string(),
                status: OperationStatus::InProgress,
                start_time,
                end_time: None,
                duration_ms: None,
                records_processed: None,
                throughput: None,
                error: None,
            };

            if let Ok(mut active) = self.active_operations.lock() {
                active.insert(operation_id.clone(), metric);
            }
        }

        debug!(
            operation_id = %operation_id,
            operation_name = operation_name,
            "Started operation tracking"
        );

        OperationTracker {
            operation_id,
            operation_name: operation_name.to_string(),
            start_time,
        }
    }

    /// Mark operation as successfully completed
    pub fn complete_success(&self, tracker: OperationTracker, records_processed: u64) {
        let duration_ms = tracker.elapsed_ms();

        info!(
            operation_id = %tracker.operation_id,
            operation_name = %tracker.operation_name,
            duration_ms = duration_ms,
            records = records_processed,
            "Operation completed successfully"
        );

        self.complete_operation(
            &tracker.operation_id,
            OperationStatus::Completed,
            duration_ms,
            Some(records_processed),
            None,
        );
    }

    /// Mark operation as failed
    pub fn complete_failure(&self, tracker: OperationTracker, error: &str) {
        let duration_ms = tracker.elapsed_ms();

        error!(
            operation_id = %tracker.operation_id,
            operation_name = %tracker.operation_name,
            duration_ms = duration_ms,
            error = error,
            "Operation failed"
        );

        self.complete_operation(
            &tracker.operation_id,
            OperationStatus::Failed,
            duration_ms,
            None,
            Some(error.to_string()),
        );
    }

    fn complete_operation(
        &self,
        operation_id: &str,
        status: OperationStatus,
        duration_ms: u64,
        records_processed: Option<u64>,
        error: Option<String>,
    ) {
        if !self.config.enable_performance_tracking {
            return;
        }

        let metric = match self.active_operations.lock() {
            Ok(mut active) => active.remove(operation_id),
            Err(_) => None,
        };

        if let Some(mut metric) = metric {
            metric.status = status;
            metric.end_time = Some(Utc::now());
            metric.duration_ms = Some(duration_ms);
            metric.records_processed = records_processed;
            metric.error = error;

            if let Some(records) = records_processed {
                if duration_ms > 0 {
                    metric.throughput = Some((records as f64) / (duration_ms as f64 / 1000.0));
                }
            }

            if let Ok(mut completed) = self.completed_operations.lock() {
                completed.push(metric);

                if completed.len() > self.config.max_completed_operations {
                    completed.remove(0);
                }
            }
        }
    }

    /// Get system statistics
    pub fn get_system_stats(&self) -> SystemStats {
        let active_count = self.active_operations.lock().map(|a| a.len()).unwrap_or(0);
        let completed_ops = match self.completed_operations.lock() {
            Ok(completed) => completed.clone(),
            Err(_) => {
                warn!("Failed to lock operations for stats");
                Vec::new()
            }
        };

        let successful_operations = completed_ops
            .iter()
            .filter(|op| op.status == OperationStatus::Completed)
            .count();
        let failed_operations = completed_ops
            .iter()
            .filter(|op| op.status == OperationStatus::Failed)
            .count();
        let total_records_processed = completed_ops
            .iter()
            .filter_map(|op| op.records_processed)
            .sum::<u64>();

        let avg_duration_ms = if !completed_ops.is_empty() {
            completed_ops
                .iter()
                .filter_map(|op| op.duration_ms)
                .map(|d| d as f64)
                .sum::<f64>()
                / completed_ops.len() as f64
        } else {
            0.0
        };

        SystemStats {
            active_operations: active_count,
            completed_operations: completed_ops.len(),
            successful_operations,
            failed_operations,
            avg_duration_ms,
            total_records_processed,
        }
    }

    /// Get performance metrics with optional name filtering
    pub fn get_performance_metrics(&self, operation_filter: Option<&str>) -> Vec<PerformanceMetric> {
        let completed = match self.completed_operations.lock() {
            Ok(completed) => completed.clone(),
            Err(_) => {
                warn!("Failed to lock completed operations for metrics");
                return Vec::new();
            }
        };

        completed
            .into_iter()
            .filter(|metric| operation_filter.map_or(true, |f| metric.operation_name.contains(f)))
            .collect()
    }
}
