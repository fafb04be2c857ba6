//! Scene Integration Tests
//!
//! Survey CSV on disk -> corpus -> ribbon scene / log panels -> JSON figure.

use std::io::Write;
use std::path::Path;

use vibration_explorer::config::{LogPanelConfig, RibbonStyle};
use vibration_explorer::export::{Figure, FigureKind};
use vibration_explorer::ingest::load_survey_csv;
use vibration_explorer::types::{Geometry, PrimitiveRole, WellCorpus};
use vibration_explorer::{build_log_panels, build_scene, build_well_traces, DataShapeError, MeshError};

const SURVEY_CSV: &str = "\
,Well,N,E,V,Rotary RPM,Weight on Bit,ASHK2,LSHK2,Gamma Ray
0,A-1H,0,0,100,,,,,40
1,A-1H,1,0,110,,,,,41
2,A-1H,2,1,120,10,2,0.5,0.2,42
3,A-1H,3,1,130,45,3,1.0,0.3,43
4,A-1H,4,2,140,30,4,0.8,0.1,44
5,A-1H,5,2,150,,,,,45
6,B-2H,0,0,50,20,1,0.1,0.1,30
7,B-2H,0,1,60,40,1,0.2,0.1,31
8,B-2H,0,2,70,60,1,0.3,,32
";

fn write_csv(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("survey.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SURVEY_CSV.as_bytes()).unwrap();
    path
}

fn load() -> (tempfile::TempDir, WellCorpus) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path());
    let corpus = load_survey_csv(&path).unwrap();
    (dir, corpus)
}

#[test]
fn survey_csv_to_single_well_traces() {
    let (_dir, corpus) = load();
    let traces = build_well_traces(corpus.get("A-1H").unwrap(), "ASHK2", &RibbonStyle::default()).unwrap();

    assert_eq!((traces.span.first, traces.span.last), (2, 4));
    // one-row gap before the span
    assert_eq!(traces.lead_in.vertices().len(), 1);
    assert_eq!(traces.lead_out.vertices().len(), 1);
    assert_eq!(traces.centerline.vertices().len(), 3);
    assert_eq!(traces.centerline.label.as_deref(), Some("A-1H-RPM"));

    let ribbon = traces.vibration_ribbon.as_mesh().unwrap();
    assert_eq!(ribbon.vertices.len(), 6);
    assert_eq!(ribbon.triangles.len(), 4);
    assert!(ribbon.triangles.iter().flatten().all(|&i| i < 6));
    assert!(ribbon.vertices.iter().any(|v| v.z == -120.0));
    assert!(ribbon.vertices.iter().any(|v| v.z == -115.0));

    let wob = traces.wob_ribbon.as_mesh().unwrap();
    assert!(wob.vertices.iter().any(|v| v.z == -160.0));

    let scale = traces.rpm_scale().unwrap();
    assert!((scale.break_fraction - 20.0 / 35.0).abs() < 1e-9);
}

#[test]
fn survey_csv_to_two_well_scene_json() {
    let (dir, corpus) = load();
    let scene = build_scene(&corpus, &["B-2H", "A-1H"], "ASHK2", &RibbonStyle::default()).unwrap();
    assert_eq!(scene.primitives.len(), 10);
    assert_eq!(scene.primitives[0].role, PrimitiveRole::LeadIn);
    assert!(scene.primitives[0].vertices().is_empty());
    assert_eq!(scene.primitives[4].label.as_deref(), Some("B-2H-WOB"));
    assert_eq!(scene.primitives[8].label.as_deref(), Some("A-1H-ASHK2"));
    assert!(matches!(scene.primitives[3].geometry, Geometry::Mesh(_)));

    let out = dir.path().join("scene.json");
    Figure::new(FigureKind::Scene, &scene).write(Some(&out)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["kind"], "scene");
    assert_eq!(json["data"]["layout"]["z_title"], "TVD");
    assert_eq!(json["data"]["primitives"].as_array().unwrap().len(), 10);
    assert_eq!(json["data"]["primitives"][3]["geometry"]["type"], "mesh");
}

#[test]
fn lshk_gap_at_end_shortens_span() {
    let (_dir, corpus) = load();
    let traces = build_well_traces(corpus.get("B-2H").unwrap(), "LSHK2", &RibbonStyle::default()).unwrap();
    assert_eq!((traces.span.first, traces.span.last), (0, 1));
    assert_eq!(traces.lead_out.vertices().len(), 1);
}

#[test]
fn unknown_channel_is_reported() {
    let (_dir, corpus) = load();
    let err = build_scene(&corpus, &["A-1H"], "XSHK", &RibbonStyle::default()).unwrap_err();
    assert!(matches!(
        err,
        MeshError::DataShape(DataShapeError::MissingColumn { ref column, .. }) if column == "XSHK"
    ));
}

#[test]
fn log_panels_from_csv() {
    let (_dir, corpus) = load();
    let panels = build_log_panels(corpus.get("A-1H").unwrap(), &LogPanelConfig::default()).unwrap();
    assert_eq!(panels.title, "A-1H");
    assert_eq!(panels.index_range, [2, 4]);
    let gamma = panels.tracks.iter().find(|t| t.curve == "Gamma Ray").unwrap();
    assert_eq!(gamma.y, vec![42.0, 43.0, 44.0]);
    assert_eq!(gamma.y_range, [0.0, 44.0]);
    assert_eq!(gamma.x_title.as_deref(), Some("Measure Depth"));
    let titles: Vec<&str> = panels.tracks.iter().map(|t| t.y_title.as_str()).collect();
    assert_eq!(titles, ["ASHK2", "LSHK2", "RPM", "WOB", "Gamma Ray"]);
}
