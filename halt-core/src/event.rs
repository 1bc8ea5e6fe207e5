//! CloudWatch alarm action payload
//!
//! The target instance is read by walking the raw payload with
//! [`instance_id_from_value`]. The typed [`AlarmEvent`] is parsed on a
//! best-effort basis for log context only.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::value::Index;
use std::collections::HashMap;

use crate::{Error, InstanceId, Result};

/// Dimension key holding the instance identifier
pub const INSTANCE_ID_DIMENSION: &str = "InstanceId";

/// Event delivered by an alarm action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmEvent {
    /// Event source, `aws.cloudwatch` for alarm actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// ARN of the alarm that fired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_arn: Option<String>,
    /// Account owning the alarm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Time of the state change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Region of the alarm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Alarm details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_data: Option<AlarmData>,
}

/// Alarm details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmData {
    /// Alarm name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_name: Option<String>,
    /// State the alarm entered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<AlarmState>,
    /// State the alarm left
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<AlarmState>,
    /// Alarm configuration at the time it fired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<AlarmConfiguration>,
}

/// Alarm state snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmState {
    /// `OK`, `ALARM` or `INSUFFICIENT_DATA`
    pub value: String,
    /// Human-readable reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Time of the transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Alarm configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmConfiguration {
    /// Alarm description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Metrics the alarm evaluates
    #[serde(default)]
    pub metrics: Vec<MetricDataQuery>,
}

/// One metric query of the alarm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDataQuery {
    /// Query id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Absent for math-expression queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_stat: Option<MetricStat>,
    /// Whether the query result is returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_data: Option<bool>,
}

/// Metric and statistic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStat {
    /// The metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    /// Period in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    /// Statistic, e.g. `Average`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
}

/// Metric identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Metric namespace, e.g. `AWS/EC2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Metric name, e.g. `CPUUtilization`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Metric dimensions
    #[serde(default)]
    pub dimensions: HashMap<String, String>,
}

impl AlarmEvent {
    /// Parse an alarm event from raw JSON
    ///
    /// # Errors
    /// Returns [`Error::MalformedEvent`] if a present field has the wrong type
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(Error::MalformedEvent)
    }

    /// Build a well-formed alarm event naming `instance_id`
    #[must_use]
    pub fn for_instance(instance_id: &InstanceId, alarm_name: impl Into<String>) -> Self {
        let metric = Metric {
            namespace: Some("AWS/EC2".to_string()),
            name: Some("CPUUtilization".to_string()),
            dimensions: HashMap::from([(
                INSTANCE_ID_DIMENSION.to_string(),
                instance_id.to_string(),
            )]),
        };

        Self {
            source: Some("aws.cloudwatch".to_string()),
            alarm_data: Some(AlarmData {
                alarm_name: Some(alarm_name.into()),
                state: Some(AlarmState {
                    value: "ALARM".to_string(),
                    reason: Some("Threshold Crossed".to_string()),
                    timestamp: None,
                }),
                previous_state: Some(AlarmState {
                    value: "OK".to_string(),
                    ..AlarmState::default()
                }),
                configuration: Some(AlarmConfiguration {
                    description: None,
                    metrics: vec![MetricDataQuery {
                        id: Some("m1".to_string()),
                        metric_stat: Some(MetricStat {
                            metric: Some(metric),
                            period: Some(300),
                            stat: Some("Average".to_string()),
                        }),
                        return_data: Some(true),
                    }],
                }),
            }),
            ..Self::default()
        }
    }

    /// Name of the alarm that fired, if present
    #[must_use]
    pub fn alarm_name(&self) -> Option<&str> {
        self.alarm_data.as_ref()?.alarm_name.as_deref()
    }

    /// State value the alarm entered, if present
    #[must_use]
    pub fn state_value(&self) -> Option<&str> {
        Some(self.alarm_data.as_ref()?.state.as_ref()?.value.as_str())
    }
}

/// Resolve the target from
/// `alarmData.configuration.metrics[0].metricStat.metric.dimensions.InstanceId`
///
/// Walks the raw payload, so fields off this path may have any shape.
///
/// # Errors
/// Returns [`Error::MissingField`] naming the first absent (or null)
/// segment, or [`Error::InvalidInstanceId`] if the value is not a valid
/// identifier string
pub fn instance_id_from_value(event: &Value) -> Result<InstanceId> {
    let alarm_data = segment(event, "alarmData", "alarmData")?;
    let configuration = segment(alarm_data, "configuration", "alarmData.configuration")?;
    let metrics = segment(configuration, "metrics", "alarmData.configuration.metrics")?;
    let first = segment(metrics, 0_usize, "alarmData.configuration.metrics[0]")?;
    let metric_stat = segment(
        first,
        "metricStat",
        "alarmData.configuration.metrics[0].metricStat",
    )?;
    let metric = segment(
        metric_stat,
        "metric",
        "alarmData.configuration.metrics[0].metricStat.metric",
    )?;
    let dimensions = segment(
        metric,
        "dimensions",
        "alarmData.configuration.metrics[0].metricStat.metric.dimensions",
    )?;
    let raw = segment(
        dimensions,
        INSTANCE_ID_DIMENSION,
        "alarmData.configuration.metrics[0].metricStat.metric.dimensions.InstanceId",
    )?;

    let raw = raw.as_str().ok_or_else(|| Error::InvalidInstanceId {
        message: format!("{INSTANCE_ID_DIMENSION} dimension is not a string: {raw}"),
    })?;

    InstanceId::new(raw)
}

fn segment<'a, I: Index>(parent: &'a Value, index: I, path: &'static str) -> Result<&'a Value> {
    parent
        .get(index)
        .filter(|value| !value.is_null())
        .ok_or(Error::MissingField { path })
}
