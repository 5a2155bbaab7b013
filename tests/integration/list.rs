//! The `list` command in text and JSON form.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_list_text() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "BPortlet", "portlets.B", "Bee", "b")?;
    project.add_portlet("edu.example", "APortlet", "portlets.A", "Ay", "a")?;
    project.add_module("edu.example", "SomeModule", &["SomePresenter"])?;

    let output = project
        .command()
        .args(["list", "--source-root", "src/main/java"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Portlets (2)"))
        .stdout(predicate::str::contains("Modules (1)"))
        .stdout(predicate::str::contains(
            "edu.example.SomeModule [SomePresenter]",
        ))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output)?;
    let a = stdout.find("edu.example.APortlet").expect("APortlet listed");
    let b = stdout.find("edu.example.BPortlet").expect("BPortlet listed");
    assert!(a < b, "portlets are listed by class name");
    assert!(!project.output_dir().exists());
    Ok(())
}

#[test]
fn test_list_json() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;
    project.add_source("edu/example/Broken.java", "package edu.example;\nclass Broken {\n")?;

    let output = project
        .command()
        .args(["--quiet", "list", "-s", "src/main/java", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    let portlets = value["portlets"].as_array().expect("portlets array");
    assert_eq!(portlets.len(), 1);
    assert_eq!(portlets[0]["id"], "portlets.Foo");
    assert_eq!(portlets[0]["simple_name"], "FooPortlet");
    assert_eq!(portlets[0]["title_hash"].as_str().map(str::len), Some(32));
    assert!(value["modules"].as_array().expect("modules array").is_empty());

    let diagnostics = value["diagnostics"].as_array().expect("diagnostics array");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].as_str().unwrap_or_default().contains("Broken.java"));
    Ok(())
}

#[test]
fn test_list_rejects_unknown_format() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .args(["list", "-s", "src/main/java", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'yaml'"));
    Ok(())
}
