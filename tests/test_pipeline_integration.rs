//! Integration tests for the delivery averages pipeline
//!
//! Tests verify the file-to-output flow end to end:
//! - JSONL input reading, validation and dedup
//! - Minute timeline and trailing window averages
//! - JSONL and SQLite output backends
//! - Binary exit status and error messages

#[cfg(test)]
mod pipeline_integration_tests {
    use delivery_window::aggregator_core::{AggregateWriter, WindowSize};
    use delivery_window::config::{BackendType, OutputConfig};
    use delivery_window::{compute_moving_averages_from_path, DeliveryError};
    use std::path::{Path, PathBuf};
    use std::process::Command;

    const SAMPLE_EVENTS: &str = r#"{"timestamp": "2018-12-26 18:11:08.509654","translation_id": "5aa5b2f39f7254a75aa5","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 20}
{"timestamp": "2018-12-26 18:15:19.903159","translation_id": "5aa5b2f39f7254a75aa4","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 31}
{"timestamp": "2018-12-26 18:15:19.903159","translation_id": "5aa5b2f39f7254a75aa4","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 31}
{"timestamp": "2018-12-26 18:23:19.903159","translation_id": "5aa5b2f39f7254a75bb3","source_language": "en","target_language": "fr","client_name": "taxi-eats","event_name": "translation_delivered","nr_words": 100, "duration": 54}
"#;

    const EXPECTED_OUTPUT: &str = r#"{"date":"2018-12-26 18:11:00","average_delivery_time":0}
{"date":"2018-12-26 18:12:00","average_delivery_time":20.0}
{"date":"2018-12-26 18:13:00","average_delivery_time":20.0}
{"date":"2018-12-26 18:14:00","average_delivery_time":20.0}
{"date":"2018-12-26 18:15:00","average_delivery_time":20.0}
{"date":"2018-12-26 18:16:00","average_delivery_time":25.5}
{"date":"2018-12-26 18:17:00","average_delivery_time":25.5}
{"date":"2018-12-26 18:18:00","average_delivery_time":25.5}
{"date":"2018-12-26 18:19:00","average_delivery_time":25.5}
{"date":"2018-12-26 18:20:00","average_delivery_time":25.5}
{"date":"2018-12-26 18:21:00","average_delivery_time":25.5}
{"date":"2018-12-26 18:22:00","average_delivery_time":31.0}
{"date":"2018-12-26 18:23:00","average_delivery_time":31.0}
{"date":"2018-12-26 18:24:00","average_delivery_time":42.5}
"#;

    fn write_input(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("events.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_file_to_jsonl_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), SAMPLE_EVENTS);

        let averages = compute_moving_averages_from_path(&input, 10).unwrap();
        assert_eq!(averages.len(), 14);

        let config = OutputConfig {
            backend: BackendType::Jsonl,
            output_path: dir.path().join("output_file.json"),
        };
        let mut writer = AggregateWriter::new(&config, WindowSize::new(10).unwrap()).unwrap();
        writer.write_all(&averages).await.unwrap();

        let output = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(output, EXPECTED_OUTPUT);
    }

    #[tokio::test]
    async fn test_file_to_sqlite_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), SAMPLE_EVENTS);
        let averages = compute_moving_averages_from_path(&input, 10).unwrap();

        let config = OutputConfig {
            backend: BackendType::Sqlite,
            output_path: dir.path().join("averages.db"),
        };
        {
            let mut writer = AggregateWriter::new(&config, WindowSize::new(10).unwrap()).unwrap();
            writer.write_all(&averages).await.unwrap();
        }

        let conn = rusqlite::Connection::open(&config.output_path).unwrap();
        let (rows, zero_rows): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), SUM(samples = 0) FROM delivery_averages",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(rows, 14);
        assert_eq!(zero_rows, 1);

        let last: f64 = conn
            .query_row(
                "SELECT average_delivery_time FROM delivery_averages ORDER BY date DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(last, 42.5);
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("wrong_path.json");

        assert!(matches!(
            compute_moving_averages_from_path(&missing, 10),
            Err(DeliveryError::FileNotFound(ref p)) if p == &missing
        ));
    }

    #[test]
    fn test_incorrect_timestamp_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            r#"{"timestamp": "26-12-2018 18:11","translation_id": "a","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 20}
"#,
        );

        let err = compute_moving_averages_from_path(&input, 10).unwrap_err();
        assert!(matches!(err, DeliveryError::TimestampFormat(_)));
        assert!(err
            .to_string()
            .starts_with("Timestamp field must be in this format"));
    }

    #[test]
    fn test_binary_writes_output_and_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), SAMPLE_EVENTS);
        let output = dir.path().join("out").join("averages.json");

        let status = Command::new(env!("CARGO_BIN_EXE_delivery_averages"))
            .arg(&input)
            .arg("10")
            .arg("--output")
            .arg(&output)
            .env("RUST_LOG", "off")
            .status()
            .unwrap();

        assert!(status.success());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), EXPECTED_OUTPUT);
    }

    #[test]
    fn test_binary_rejects_zero_window() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), SAMPLE_EVENTS);

        let result = Command::new(env!("CARGO_BIN_EXE_delivery_averages"))
            .arg(&input)
            .arg("0")
            .arg("--output")
            .arg(dir.path().join("averages.json"))
            .env("RUST_LOG", "off")
            .output()
            .unwrap();

        assert!(!result.status.success());
        let stderr = String::from_utf8_lossy(&result.stderr);
        assert!(stderr.contains("Window size value must be greater than 0."));
        assert!(!dir.path().join("averages.json").exists());
    }
}
