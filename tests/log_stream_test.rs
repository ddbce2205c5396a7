#[cfg(test)]
mod tests {
    use aws_sdk_ecs::types::{LogConfiguration, LogDriver};
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;

    /// Helper function mirroring the stream-name composition in trace.rs.
    /// The format is the wire contract with CloudWatch Logs: the awslogs
    /// driver writes each container's stream as <prefix>/<container>/<task-id>.
    fn compose_stream(prefix: &str, container: &str, task_id: &str) -> String {
        format!("{prefix}/{container}/{task_id}")
    }

    #[test]
    fn test_stream_name_composition() {
        let stream = compose_stream("ecs", "nginx", "1234567890abcdef");
        assert_eq!(stream, "ecs/nginx/1234567890abcdef");
    }

    #[test]
    fn test_stream_name_with_custom_prefix() {
        let stream = compose_stream("my-app", "web-server", "12345");
        assert_eq!(stream, "my-app/web-server/12345");
    }

    #[test]
    fn test_awslogs_configuration_options() {
        // The options map carries the log group and stream prefix keys the
        // tracer reads
        let mut options = HashMap::new();
        options.insert("awslogs-group".to_string(), "/ecs/web-app".to_string());
        options.insert("awslogs-stream-prefix".to_string(), "ecs".to_string());
        options.insert("awslogs-region".to_string(), "us-east-1".to_string());

        let config = LogConfiguration::builder()
            .log_driver(LogDriver::Awslogs)
            .set_options(Some(options))
            .build()
            .unwrap();

        assert_eq!(config.log_driver(), &LogDriver::Awslogs);
        let options = config.options().unwrap();
        assert_eq!(options.get("awslogs-group").map(String::as_str), Some("/ecs/web-app"));
        assert_eq!(options.get("awslogs-stream-prefix").map(String::as_str), Some("ecs"));
    }

    #[test]
    fn test_log_configuration_without_options() {
        // awslogs containers can omit the options map entirely; the tracer
        // has to skip them instead of fetching
        let config = LogConfiguration::builder()
            .log_driver(LogDriver::Awslogs)
            .build()
            .unwrap();

        assert!(config.options().is_none());
    }

    #[test]
    fn test_other_log_drivers_are_distinct() {
        let config = LogConfiguration::builder()
            .log_driver(LogDriver::JsonFile)
            .build()
            .unwrap();

        assert_ne!(config.log_driver(), &LogDriver::Awslogs);
    }

    #[test]
    fn test_cross_source_timestamp_precision() {
        // Log records carry epoch milliseconds, service events carry
        // second-resolution creation times; both must land on the same
        // timeline scale so cross-source ordering is meaningful
        let log_record: DateTime<Utc> = DateTime::from_timestamp_millis(1_700_000_000_500).unwrap();
        let service_event: DateTime<Utc> = DateTime::from_timestamp(1_700_000_001, 0).unwrap();

        assert!(log_record < service_event);
        assert_eq!(service_event.timestamp_millis() - log_record.timestamp_millis(), 500);
    }
}
