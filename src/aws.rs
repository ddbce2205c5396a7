//! AWS ECS and CloudWatch Logs integration module.
//!
//! This module provides a client wrapper for AWS ECS and CloudWatch Logs,
//! with methods for listing clusters and tasks, describing a task and its
//! definition, and draining service events and container log streams into
//! a [`Timeline`].

use anyhow::{bail, Context, Result};
use aws_sdk_cloudwatchlogs::Client as LogsClient;
use aws_sdk_ecs::types::{DesiredStatus, LogConfiguration, LogDriver, Task, TaskDefinition};
use aws_sdk_ecs::Client;
use chrono::DateTime;

use crate::fetch::{FetchOutcome, Paginator, Step, PAGE_LIMIT};
use crate::timeline::{Event, Timeline, SERVICE_SOURCE};

/// Client for interacting with AWS ECS and CloudWatch Logs.
///
/// Wraps the AWS SDK clients and provides convenient methods for the
/// discovery and retrieval operations used by the tracer.
pub struct EcsClient {
    /// AWS ECS SDK client
    client: Client,
    /// AWS CloudWatch Logs SDK client
    logs_client: LogsClient,
}

/// Summary of one ECS task, used by the interactive task menu.
#[derive(Debug, Clone)]
pub struct TaskSummary {
    /// Full ARN of the task
    pub task_arn: String,
    /// Short task ID (last segment of ARN)
    pub task_id: String,
    /// Task definition family and revision (e.g. "web-app:12")
    pub task_definition: String,
    /// Current task status (e.g., RUNNING, STOPPED)
    pub status: String,
}

impl EcsClient {
    /// Creates a new ECS client with optional region and profile configuration.
    ///
    /// # Arguments
    /// * `region` - Optional AWS region override (e.g., "us-east-1")
    /// * `profile` - Optional AWS profile name from ~/.aws/credentials
    ///
    /// # Errors
    /// This function will return an error if:
    /// - AWS credentials cannot be resolved
    /// - The specified profile doesn't exist
    /// - The specified region is invalid
    pub async fn new(region: Option<String>, profile: Option<String>) -> Result<Self> {
        let mut config_loader = aws_config::from_env();

        // Set region if provided
        if let Some(region_str) = region {
            config_loader = config_loader.region(aws_config::Region::new(region_str));
        }

        // Set profile if provided
        if let Some(profile_name) = profile {
            config_loader = config_loader.profile_name(profile_name);
        }

        let config = config_loader.load().await;
        let client = Client::new(&config);
        let logs_client = LogsClient::new(&config);
        Ok(Self {
            client,
            logs_client,
        })
    }

    /// Lists all ECS clusters in the configured region.
    ///
    /// Follows the NextToken pagination of ListClusters until the full set
    /// has been collected. Returns cluster names extracted from the ARNs.
    ///
    /// # Errors
    /// This function will return an error if the AWS API call fails due to
    /// network or permission issues.
    pub async fn list_clusters(&self) -> Result<Vec<String>> {
        let mut clusters = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_clusters()
                .set_next_token(next_token.take())
                .send()
                .await
                .context("listing clusters")?;

            clusters.extend(
                resp.cluster_arns()
                    .iter()
                    .map(|arn| arn_tail(arn).to_string()),
            );

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(clusters)
    }

    /// Lists tasks in a cluster across every desired status.
    ///
    /// Stopped tasks are the ones most worth tracing, so RUNNING, PENDING
    /// and STOPPED are all collected, then described to attach the task
    /// definition name and last status.
    ///
    /// # Arguments
    /// * `cluster` - The cluster name or ARN
    ///
    /// # Returns
    /// A vector of `TaskSummary` structs sorted by task ID, or an empty
    /// vector if the cluster has no tasks in any status
    ///
    /// # Errors
    /// This function will return an error if:
    /// - The AWS ListTasks or DescribeTasks API calls fail
    /// - The cluster doesn't exist
    pub async fn list_tasks(&self, cluster: &str) -> Result<Vec<TaskSummary>> {
        let statuses = [
            DesiredStatus::Running,
            DesiredStatus::Pending,
            DesiredStatus::Stopped,
        ];

        let mut task_arns: Vec<String> = Vec::new();
        for status in statuses {
            let resp = self
                .client
                .list_tasks()
                .cluster(cluster)
                .desired_status(status)
                .send()
                .await
                .with_context(|| format!("listing tasks in cluster {cluster}"))?;
            task_arns.extend(resp.task_arns().iter().cloned());
        }

        if task_arns.is_empty() {
            return Ok(Vec::new());
        }

        // Describe tasks to get definition names and statuses
        let describe_resp = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .set_tasks(Some(task_arns))
            .send()
            .await
            .with_context(|| format!("describing tasks in cluster {cluster}"))?;

        let mut tasks: Vec<TaskSummary> = describe_resp
            .tasks()
            .iter()
            .map(|t| {
                let task_arn = t.task_arn().unwrap_or("unknown").to_string();
                let task_id = arn_tail(&task_arn).to_string();
                let task_definition = t
                    .task_definition_arn()
                    .map(|arn| arn_tail(arn).to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let status = t.last_status().unwrap_or("unknown").to_string();

                TaskSummary {
                    task_arn,
                    task_id,
                    task_definition,
                    status,
                }
            })
            .collect();

        tasks.sort_by(|a, b| a.task_id.cmp(&b.task_id));

        Ok(tasks)
    }

    /// Describes a single task in a cluster.
    ///
    /// An empty DescribeTasks response means the identifier did not match
    /// anything, which is reported as a not-found error rather than an
    /// empty success.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - The AWS DescribeTasks API call fails
    /// - No task matches the given identifier
    pub async fn describe_task(&self, cluster: &str, task: &str) -> Result<Task> {
        let resp = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .tasks(task)
            .send()
            .await
            .with_context(|| format!("describing task {task}"))?;

        match resp.tasks().first() {
            Some(found) => Ok(found.clone()),
            None => bail!("task not found: {task}"),
        }
    }

    /// Describes a task definition by ARN.
    ///
    /// # Errors
    /// This function will return an error if the AWS DescribeTaskDefinition
    /// API call fails or the response carries no definition.
    pub async fn describe_task_definition(&self, task_def_arn: &str) -> Result<TaskDefinition> {
        let resp = self
            .client
            .describe_task_definition()
            .task_definition(task_def_arn)
            .send()
            .await
            .with_context(|| format!("describing task definition {task_def_arn}"))?;

        resp.task_definition()
            .cloned()
            .with_context(|| format!("task definition not found: {task_def_arn}"))
    }

    /// Retrieves a service's lifecycle events and appends each to the
    /// timeline with the fixed `SERVICE` source label.
    ///
    /// A response with no matching service is a not-found error; a service
    /// with an empty event list is success. The event list is bounded by
    /// the remote API and arrives in one response, so no pagination here.
    ///
    /// # Arguments
    /// * `cluster` - The cluster name or ARN
    /// * `service` - The service name
    /// * `timeline` - Target timeline; only appended to, never sorted here
    ///
    /// # Errors
    /// This function will return an error if:
    /// - The AWS DescribeServices API call fails
    /// - No service matches the given name
    pub async fn fetch_service_events(
        &self,
        cluster: &str,
        service: &str,
        timeline: &mut Timeline,
    ) -> Result<()> {
        let resp = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .with_context(|| format!("describing service {service}"))?;

        let svc = match resp.services().first() {
            Some(svc) => svc,
            None => bail!("no service named {service} in cluster {cluster}"),
        };

        for event in svc.events() {
            if let (Some(created), Some(message)) = (event.created_at(), event.message()) {
                if let Some(timestamp) =
                    DateTime::from_timestamp(created.secs(), created.subsec_nanos())
                {
                    timeline.add(Event::new(timestamp, SERVICE_SOURCE, message));
                }
            }
        }

        Ok(())
    }

    /// Drains one CloudWatch Logs stream into the timeline.
    ///
    /// Fetches in pages of [`PAGE_LIMIT`] records. The first request reads
    /// from the head of the stream; subsequent requests carry the previous
    /// response's forward token. A [`Paginator`] decides when to stop:
    /// either the store repeats the request token (stream drained) or the
    /// page cap is reached. Each record's epoch-millisecond timestamp is
    /// converted so log events order against service events.
    ///
    /// # Arguments
    /// * `log_group` - The CloudWatch Logs group name
    /// * `log_stream` - The stream name, already composed by the caller
    /// * `source` - Source label for the events (the container name)
    /// * `timeline` - Target timeline; events fetched before an error stay
    ///
    /// # Returns
    /// The fetch outcome: `Complete`, or `Capped` when the page cap stopped
    /// retrieval early (informational, not an error)
    ///
    /// # Errors
    /// This function will return an error if the AWS GetLogEvents API call
    /// fails, e.g. the group or stream doesn't exist
    pub async fn fetch_stream_events(
        &self,
        log_group: &str,
        log_stream: &str,
        source: &str,
        timeline: &mut Timeline,
    ) -> Result<FetchOutcome> {
        let mut paginator = Paginator::new();

        loop {
            let mut request = self
                .logs_client
                .get_log_events()
                .log_group_name(log_group)
                .log_stream_name(log_stream)
                .limit(PAGE_LIMIT);

            request = match paginator.token() {
                Some(token) => request.next_token(token),
                None => request.start_from_head(true),
            };

            let resp = request
                .send()
                .await
                .with_context(|| format!("fetching log events from stream {log_stream}"))?;

            for record in resp.events() {
                if let (Some(millis), Some(message)) = (record.timestamp(), record.message()) {
                    if let Some(timestamp) = DateTime::from_timestamp_millis(millis) {
                        timeline.add(Event::new(timestamp, source, message));
                    }
                }
            }

            match paginator.advance(resp.next_forward_token().map(str::to_string)) {
                Step::Next => {}
                Step::Done => return Ok(FetchOutcome::Complete),
                Step::Capped => return Ok(FetchOutcome::Capped),
            }
        }
    }
}

/// Returns true if a container definition's log configuration uses the
/// awslogs driver, i.e. its output lands in CloudWatch Logs.
pub fn is_awslogs_driver(config: Option<&LogConfiguration>) -> bool {
    config.is_some_and(|c| *c.log_driver() == LogDriver::Awslogs)
}

/// Extracts the last slash-separated segment of an ARN (task ID, cluster
/// name, task definition family:revision).
pub fn arn_tail(arn: &str) -> &str {
    arn.split('/').next_back().unwrap_or(arn)
}
