use serde_json::json;

use nexus::base::pipeline::{Adapter, DataTag, Error, NexusManager, StageOutput, Summary, Tagged};

fn manager() -> NexusManager {
    let mut manager = NexusManager::new();
    manager.add_adapter(Adapter::json("A")).unwrap();
    manager.add_adapter(Adapter::csv("B")).unwrap();
    manager.add_adapter(Adapter::stream("C")).unwrap();
    manager
}

#[test]
fn every_tag_reaches_its_adapter() {
    let manager = manager();
    let inputs = [
        (Tagged::new("json", json!({"sensor": "temp", "value": 23.5, "unit": "C"})), "A"),
        (Tagged::new("csv", "user,action,timestamp\nhahchta,logout,07-02-2026-19:64"), "B"),
        (Tagged::new("stream", json!([23, 21, 22, 22.5, 22])), "C"),
    ];

    let mut summaries = vec![];
    for (data, adapter) in inputs.iter() {
        let run = manager.process(data).unwrap();
        assert_eq!(run.adapter, *adapter);
        assert_eq!(run.outputs.len(), 3);
        summaries.push(run.summary().cloned().unwrap());
    }

    assert_eq!(
        summaries,
        vec![
            Summary::Reading { value: json!(23.5) },
            Summary::Records { count: 1 },
            Summary::Readings { count: 5, avg: 22.1 },
        ]
    );
}

#[test]
fn transform_reports_enrichment() {
    let run = manager().process(&Tagged::new("stream", json!([1.0]))).unwrap();
    assert!(matches!(
        run.outputs[1],
        StageOutput::Transform { enrichment: "Aggregated and filtered", .. }
    ));
}

#[test]
fn recovery_keeps_processing_after_failures() {
    let manager = manager();
    let inputs = vec![
        Tagged::new("unknown_type", json!([1, 2, 3, 4])),
        Tagged::new("json", json!({"sensor": "temp"})),
        Tagged::new("csv", "a,b\n1,2"),
    ];

    let runs = manager.process_all(&inputs);
    assert_eq!(runs[0], Err(Error::NoAdapterForTag("unknown_type".to_owned())));
    assert_eq!(runs[1], Err(Error::MissingField("value")));
    assert_eq!(runs[2].as_ref().unwrap().summary(), Some(&Summary::Records { count: 1 }));
}

#[test]
fn one_adapter_per_tag() {
    let mut manager = manager();
    assert_eq!(manager.add_adapter(Adapter::json("D")), Err(Error::DuplicateAdapter(DataTag::Json)));
    assert_eq!(manager.chain(), "Pipeline A -> Pipeline B -> Pipeline C");
}
