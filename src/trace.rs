//! Trace orchestration: merges one task's service lifecycle events and
//! per-container log streams into a single timeline.
//!
//! Discovery failures (the task or its definition cannot be described)
//! abort the trace; individual source fetches that fail are reported with
//! their identifying stream or service name and skipped, so one bad
//! stream does not blank the whole timeline.

use anyhow::{Context, Result};

use crate::aws::{arn_tail, is_awslogs_driver, EcsClient};
use crate::fetch::{FetchOutcome, MAX_PAGES};
use crate::theme::Theme;
use crate::timeline::Timeline;

/// Task group prefix marking service-owned tasks. The remainder of the
/// group field is the service name.
pub const SERVICE_GROUP_PREFIX: &str = "service:";

/// Derives the owning service name from a task's group field, if the task
/// was started by a service.
pub fn service_name_from_group(group: &str) -> Option<&str> {
    group.strip_prefix(SERVICE_GROUP_PREFIX)
}

/// Runs the trace operation for tasks in one cluster.
pub struct TaskTracer<'a> {
    client: &'a EcsClient,
    cluster: String,
}

impl<'a> TaskTracer<'a> {
    /// Creates a tracer bound to a cluster.
    pub fn new(client: &'a EcsClient, cluster: impl Into<String>) -> Self {
        Self {
            client,
            cluster: cluster.into(),
        }
    }

    /// Collects every event for one task into a fresh timeline.
    ///
    /// Steps, run sequentially:
    /// 1. Describe the task (fatal if it doesn't resolve)
    /// 2. If the task group names a service, fetch its lifecycle events
    ///    (non-fatal on failure)
    /// 3. Describe the task definition (fatal on failure)
    /// 4. For each container logging through the awslogs driver, compose
    ///    the `<prefix>/<container>/<task-id>` stream name and drain it
    ///    (non-fatal on failure; a capped fetch prints a notice)
    ///
    /// The returned timeline is populated but unsorted; presentation sorts.
    ///
    /// # Errors
    /// This function will return an error if the task or its definition
    /// cannot be described; without those, no sources can be resolved.
    pub async fn trace(&self, task: &str, theme: &Theme) -> Result<Timeline> {
        let mut timeline = Timeline::new();

        let task_detail = self.client.describe_task(&self.cluster, task).await?;
        let task_arn = task_detail.task_arn().unwrap_or(task).to_string();
        let last_status = task_detail.last_status().unwrap_or("unknown");
        println!("{}", theme.paint(&format!("Task ARN: {task_arn}"), theme.muted));
        println!(
            "{}",
            theme.paint(&format!("Last status: {last_status}"), theme.muted)
        );

        // Only service-started tasks have lifecycle events to collect
        if let Some(service) = task_detail.group().and_then(service_name_from_group) {
            if let Err(err) = self
                .client
                .fetch_service_events(&self.cluster, service, &mut timeline)
                .await
            {
                eprintln!(
                    "{}",
                    theme.paint(
                        &format!("Failed to fetch events for service {service}: {err:#}"),
                        theme.error
                    )
                );
            }
        }

        let task_def_arn = task_detail
            .task_definition_arn()
            .context("task has no task definition ARN")?;
        let definition = self.client.describe_task_definition(task_def_arn).await?;

        let task_id = arn_tail(&task_arn);
        for container_def in definition.container_definitions() {
            if !is_awslogs_driver(container_def.log_configuration()) {
                continue;
            }

            let container_name = container_def.name().unwrap_or("unknown");
            let options = match container_def.log_configuration().and_then(|c| c.options()) {
                Some(options) => options,
                None => continue,
            };
            let log_group = match options.get("awslogs-group") {
                Some(group) => group,
                None => continue,
            };
            let stream_prefix = options
                .get("awslogs-stream-prefix")
                .map(String::as_str)
                .unwrap_or("ecs");

            // Wire contract with the log store: <prefix>/<container>/<task-id>
            let log_stream = format!("{stream_prefix}/{container_name}/{task_id}");

            println!(
                "{}",
                theme.paint(
                    &format!("Fetching logs for container {container_name} ({log_stream})"),
                    theme.muted
                )
            );

            match self
                .client
                .fetch_stream_events(log_group, &log_stream, container_name, &mut timeline)
                .await
            {
                Ok(FetchOutcome::Complete) => {}
                Ok(FetchOutcome::Capped) => {
                    println!(
                        "{}",
                        theme.paint(
                            &format!(
                                "Stopped fetching {log_stream} after {MAX_PAGES} pages; remaining records were not retrieved"
                            ),
                            theme.notice
                        )
                    );
                }
                Err(err) => {
                    eprintln!(
                        "{}",
                        theme.paint(
                            &format!("Failed to fetch logs for container {container_name}: {err:#}"),
                            theme.error
                        )
                    );
                }
            }
        }

        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_from_group() {
        assert_eq!(service_name_from_group("service:orders-svc"), Some("orders-svc"));
    }

    #[test]
    fn test_standalone_task_group_has_no_service() {
        assert_eq!(service_name_from_group("family:my-task-def"), None);
        assert_eq!(service_name_from_group(""), None);
    }

    #[test]
    fn test_service_prefix_must_lead() {
        assert_eq!(service_name_from_group("my-service:service"), None);
    }
}
