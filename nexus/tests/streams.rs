use serde_json::json;

use nexus::base::stream::{Batch, DataStream, Error, Flow, Metric, StreamKind, StreamManager, ERROR, HOT, LARGE};
use nexus::base::Reading;

fn batch(value: serde_json::Value) -> Batch {
    serde_json::from_value(value).unwrap()
}

#[test]
fn sensor_averages_temperatures_only() {
    let mut sensor = StreamKind::Sensor.stream("SENSOR_001");
    sensor.process_batch(&batch(json!([{"tmp": 20}, {"humidity": 65}, {"tmp": 25}]))).unwrap();

    let stats = sensor.get_stats();
    assert_eq!(stats.total_count, 3);
    assert_eq!(stats.metric, Metric::AverageTemperature(22.5));

    // Without temperatures the average falls back to 0
    sensor.process_batch(&batch(json!([{"pressure": 1013}]))).unwrap();
    assert_eq!(sensor.get_stats().metric, Metric::AverageTemperature(0.0));
}

#[test]
fn transaction_net_flow() {
    let mut transactions = StreamKind::Transaction.stream("TRANS_001");
    transactions.process_batch(&batch(json!([{"buy": 100}, {"sell": 150}, {"buy": 75}]))).unwrap();
    assert_eq!(transactions.get_stats().metric, Metric::NetFlow(Flow::Units(25)));
    assert_eq!(transactions.get_stats().metric.to_string(), "net flow: +25 units");
}

#[test]
fn stats_are_replaced_per_batch() {
    let mut events = StreamKind::Event.stream("EVENT_001");
    events.process_batch(&batch(json!([{"error": "a"}, {"error": "b"}]))).unwrap();
    events.process_batch(&batch(json!([{"login": "c"}]))).unwrap();

    let stats = events.get_stats();
    assert_eq!(stats.total_count, 1);
    assert_eq!(stats.metric, Metric::ErrorCount(0));
    assert_eq!(events.metrics().batch_count(), 2);
    assert_eq!(events.metrics().point_count(), 3);
}

#[test]
fn bad_values_leave_stats_untouched() {
    let mut transactions = StreamKind::Transaction.stream("TRANS_001");
    transactions.process_batch(&batch(json!([{"buy": 10}]))).unwrap();

    let r = transactions.process_batch(&batch(json!([{"buy": "lots"}])));
    assert!(matches!(r, Err(Error::ValidationFailed { .. })));
    assert_eq!(transactions.get_stats().metric, Metric::NetFlow(Flow::Units(10)));
}

#[test]
fn filters_are_idempotent() {
    let readings = batch(json!([{"tmp": 35}, {"tmp": 20}, {"buy": 150}, {"error": "x"}]));
    for (kind, criteria) in [(StreamKind::Sensor, HOT), (StreamKind::Transaction, LARGE), (StreamKind::Event, ERROR)] {
        let stream = kind.stream("S");
        let once = stream.filter_data(&readings, Some(criteria));
        let twice = stream.filter_data(&once, Some(criteria));
        assert_eq!(once, twice);
        assert!(!once.is_empty());
    }

    let sensor = StreamKind::Sensor.stream("S");
    assert_eq!(sensor.filter_data(&readings, Some(HOT)), vec![Reading::new("tmp", 35)]);
    assert_eq!(sensor.filter_data(&readings, Some("unknown")), readings);
}

#[test]
fn manager_reports_mixed_streams() {
    let mut manager = StreamManager::default();
    let mut streams: Vec<(Box<dyn DataStream>, Batch)> = vec![
        (StreamKind::Sensor.stream("SENSOR_002"), batch(json!([{"tmp": 31}]))),
        (StreamKind::Transaction.stream("TRANS_002"), batch(json!([{"sell": 150}, {"buy": 20}]))),
    ];

    let report = manager.process_streams(&mut streams).unwrap();
    assert_eq!(report.lines.len(), 2);
    assert_eq!(report.lines[1].to_string(), "- Transaction data: 2 operations processed");

    let filtered = manager.filter_report(&streams);
    assert_eq!(filtered.to_string(), "Filtered results: 1 high temperature readings, 1 large transactions");
}
