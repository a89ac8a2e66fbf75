//! End-to-end pipeline tests: document in, gap report out.

use watari_classifier::core::evidence::render_pattern_evidence;
use watari_classifier::{
    ClassificationEngine, ClassifiedComponent, Deduplicator, Detection, GapReport,
    OverallAssessment, TranslatabilityLevel, WorkflowDocument,
};

const WORKFLOW_XML: &str = r#"<workflow name="provision-and-secure">
  <workflow-item name="clone template" type="task">
    <script>var task = vm.CloneVM_Task(spec);</script>
  </workflow-item>
  <workflow-item name="create security group" type="task">
    <script>var sg = nsxClient.createSG(groupName);</script>
  </workflow-item>
  <workflow-item name="configure firewall" type="task">
    <script>nsxClient.createFirewallRule(ruleSpec);</script>
  </workflow-item>
  <workflow-item name="wait for approval" type="user-interaction"/>
  <workflow-item name="notify cmdb" type="task">
    <script>restClient.invokePost(url, payload);</script>
  </workflow-item>
</workflow>"#;

#[test]
fn test_two_nearby_detections_merge_into_one() {
    // Scenario: an API-call pattern and an object-type pattern observing
    // the same operation two lines apart.
    let raw = vec![
        Detection::new("network_security", "nsxClient.createSG")
            .with_location("file.xml:64")
            .with_confidence(0.9)
            .with_evidence(render_pattern_evidence(
                &["nsxClient.createSG".to_string()],
                "file.xml:64",
                "var sg = nsxClient.createSG(groupName);",
            )),
        Detection::new("network_security", "SecurityGroup")
            .with_location("file.xml:66")
            .with_confidence(0.65)
            .with_evidence(render_pattern_evidence(
                &["SecurityGroup".to_string()],
                "file.xml:66",
                "sg instanceof SecurityGroup",
            )),
    ];

    let merged = Deduplicator::new().deduplicate(&raw);

    assert_eq!(merged.len(), 1);
    assert!(merged[0].evidence.contains("nsxClient.createSG"));
    assert!(merged[0].evidence.contains("SecurityGroup"));
}

#[test]
fn test_zero_detections_assess_fully_translatable() {
    let engine = ClassificationEngine::new();
    let report = engine.analyze(&WorkflowDocument::new("quiet", "quiet.xml"));

    assert_eq!(report.summary.overall_assessment, OverallAssessment::FullyTranslatable);
    assert!(!report.summary.has_blocking_issues);
    assert_eq!(report.summary.total_components, 0);
}

#[test]
fn test_partial_majority_assesses_mostly_manual() {
    // 5 PARTIAL + 3 SUPPORTED: PARTIAL exceeds 50% of the total.
    let mut components: Vec<ClassifiedComponent> = (0..5)
        .map(|i| {
            ClassifiedComponent::new(
                format!("partial-{}", i),
                "network_security",
                TranslatabilityLevel::Partial,
                "caveats apply",
            )
        })
        .collect();
    components.extend((0..3).map(|i| {
        ClassifiedComponent::new(
            format!("supported-{}", i),
            "network_security",
            TranslatabilityLevel::Supported,
            "translates",
        )
    }));

    let report = GapReport::new("wf", components);
    assert_eq!(report.summary.total_components, 8);
    assert_eq!(report.summary.overall_assessment, OverallAssessment::MostlyManual);
}

#[test]
fn test_severity_is_monotone_over_report_order() {
    let doc = WorkflowDocument::from_xml("workflow.xml", WORKFLOW_XML).unwrap();
    let report = ClassificationEngine::new().analyze(&doc);

    assert!(report.summary.total_components > 0);
    for pair in report.components.windows(2) {
        assert!(
            pair[0].severity() >= pair[1].severity(),
            "{} ({}) sorted before {} ({})",
            pair[0].name,
            pair[0].level,
            pair[1].name,
            pair[1].level
        );
    }
}

#[test]
fn test_realistic_workflow_covers_multiple_domains() {
    let doc = WorkflowDocument::from_xml("workflow.xml", WORKFLOW_XML).unwrap();
    let engine = ClassificationEngine::new();

    let analysis = engine.build_analysis(&doc);
    assert!(analysis.has_detections("network_security"));
    assert!(analysis.has_detections("approval_governance"));
    assert!(analysis.has_detections("external_api"));
    assert!(analysis.has_detections("vm_lifecycle"));

    let report = engine.classify(&analysis);
    let types: Vec<&str> = report
        .components
        .iter()
        .map(|c| c.component_type.as_str())
        .collect();
    assert!(types.contains(&"network_security"));
    assert!(types.contains(&"approval_governance"));

    // The interactive approval keeps the whole workflow out of the
    // automatic bucket.
    assert_eq!(report.summary.overall_assessment, OverallAssessment::RequiresManualWork);
    assert!(report.summary.requires_manual_work);
}

#[test]
fn test_deduplication_is_idempotent_over_detector_output() {
    let doc = WorkflowDocument::from_xml("workflow.xml", WORKFLOW_XML).unwrap();
    let detector = watari_classifier::Detector::default();
    let dedup = Deduplicator::new();

    for (_, raw) in detector.detect(&doc) {
        let once = dedup.deduplicate(&raw);
        let twice = dedup.deduplicate(&once);
        assert!(once.len() <= raw.len());
        assert_eq!(once, twice);
    }
}

#[test]
fn test_json_report_matches_boundary_contract() {
    let doc = WorkflowDocument::from_xml("workflow.xml", WORKFLOW_XML).unwrap();
    let report = ClassificationEngine::new().analyze(&doc);

    let json = watari_classifier::GapReporter::generate(
        &report,
        watari_classifier::ReportFormat::Json,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["workflow_name"], "provision-and-secure");
    for key in ["SUPPORTED", "PARTIAL", "BLOCKED", "MANUAL"] {
        assert!(value["summary"]["counts"][key].is_number());
    }
    for key in ["PATH_A", "PATH_B", "PATH_C", "NONE"] {
        assert!(value["summary"]["migration_paths"][key].is_number());
    }
    assert!(value["summary"]["has_blocking_issues"].is_boolean());
    assert!(value["summary"]["requires_manual_work"].is_boolean());
    assert!(value["components"].is_array());
    assert!(value["migration_guidance"].is_object());
}
