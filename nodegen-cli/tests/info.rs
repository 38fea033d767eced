use nodegen_cli::commands::info::{package_probe, EnvReport, Probe};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn report_has_every_category() {
    let tmp = TempDir::new().unwrap();

    let report = EnvReport::collect(tmp.path()).await;

    let titles: Vec<_> = report.sections.iter().map(|s| s.title).collect();
    assert_eq!(
        titles,
        ["System", "Binaries", "Browsers", "npmPackages", "npmGlobalPackages"]
    );

    let labels = |title: &str| -> Vec<String> {
        report
            .section(title)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.label.clone())
            .collect()
    };
    assert_eq!(labels("System"), ["OS", "CPU"]);
    assert_eq!(labels("Binaries"), ["Node", "npm", "Yarn"]);
    assert_eq!(
        labels("Browsers"),
        ["Chrome", "Edge", "Internet Explorer", "Firefox", "Safari"]
    );
    assert_eq!(labels("npmPackages"), ["express"]);
    assert_eq!(labels("npmGlobalPackages"), ["DuyDangCode_NodeJs"]);
}

#[tokio::test]
async fn report_names_tool_and_version() {
    let tmp = TempDir::new().unwrap();

    let report = EnvReport::collect(tmp.path()).await;
    let text = report.to_string();

    assert_eq!(report.tool, "nodegen");
    assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    assert!(text.contains(&format!(
        "current version of nodegen: {}",
        env!("CARGO_PKG_VERSION")
    )));
    assert!(text.contains("Environment Info:"));
    assert!(text.contains("  npmGlobalPackages:\n"));
}

#[tokio::test]
async fn report_writes_nothing() {
    let tmp = TempDir::new().unwrap();

    EnvReport::collect(tmp.path()).await;

    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_local_package_is_flagged() {
    let tmp = TempDir::new().unwrap();

    let report = EnvReport::collect(tmp.path()).await;
    let express = report.section("npmPackages").unwrap().entry("express").unwrap();

    assert_eq!(express.probe, Probe::NotFound);
    assert!(report.to_string().contains("    express: Not Found\n"));
}

#[tokio::test]
async fn local_package_version_is_reported() {
    let tmp = TempDir::new().unwrap();
    let pkg = tmp.path().join("node_modules/express");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join("package.json"), r#"{"name":"express","version":"4.19.2"}"#).unwrap();

    let report = EnvReport::collect(tmp.path()).await;
    let express = report.section("npmPackages").unwrap().entry("express").unwrap();

    match &express.probe {
        Probe::Found { version, location, .. } => {
            assert_eq!(version.as_deref(), Some("4.19.2"));
            assert_eq!(location.as_deref(), Some(pkg.as_path()));
        }
        Probe::NotFound => panic!("express should be found"),
    }
}

#[test]
fn package_without_version_is_still_found() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("lib")).unwrap();
    fs::write(tmp.path().join("lib/package.json"), "not json").unwrap();

    let probe = package_probe(tmp.path(), "lib");

    assert!(probe.is_found());
    assert!(matches!(probe, Probe::Found { version: None, .. }));
}

#[tokio::test]
async fn system_section_reports_cpu() {
    let tmp = TempDir::new().unwrap();

    let report = EnvReport::collect(tmp.path()).await;
    let cpu = report.section("System").unwrap().entry("CPU").unwrap();

    if let Probe::Found { version: Some(text), .. } = &cpu.probe {
        assert!(text.starts_with('('));
        assert!(text.contains(std::env::consts::ARCH));
    }
}
