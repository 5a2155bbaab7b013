//! `portletgen.toml` discovery, path resolution and errors.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_discovered_config_is_used() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;
    project.write_config(
        r#"
source_roots = ["src/main/java"]
output_dir = "gen"
package = "edu.example.registry"
"#,
    )?;

    project.command().arg("generate").assert().success();

    let factory = project.root().join("gen/edu/example/registry/PortletFactoryGenerated.java");
    assert!(std::fs::read_to_string(factory)?.contains("edu.example.FooPortlet.class"));
    Ok(())
}

#[test]
fn test_explicit_config_paths_resolve_against_its_directory() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;
    let build = project.root().join("build");
    std::fs::create_dir_all(&build)?;
    std::fs::write(
        build.join("generator.toml"),
        r#"
source_roots = ["../src/main/java"]
output_dir = "out"
"#,
    )?;

    project
        .command()
        .args(["--config", "build/generator.toml", "generate"])
        .assert()
        .success();

    assert!(
        build
            .join("out/edu/stanford/bmir/protege/web/client/portlet/PortletFactoryGenerated.java")
            .is_file()
    );
    Ok(())
}

#[test]
fn test_cli_roots_replace_configured_roots() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;
    project.write_config("source_roots = [\"missing\"]\n")?;

    project
        .command()
        .args(["list", "--source-root", "src/main/java"])
        .assert()
        .success()
        .stdout(predicate::str::contains("portlets.Foo"));
    Ok(())
}

#[test]
fn test_custom_marker_names() -> Result<()> {
    let project = TestProject::new()?;
    project.add_source(
        "edu/example/Custom.java",
        "package edu.example;\n\
         @Widget(id = \"w\", title = \"W\", tooltip = \"w\")\n\
         public class Custom {}\n",
    )?;
    project.add_portlet("edu.example", "Ignored", "ignored", "I", "i")?;
    project.write_config(
        r#"
source_roots = ["src/main/java"]
component_annotation = "edu.example.ui.Widget"
"#,
    )?;

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Portlets (1)"))
        .stdout(predicate::str::contains("edu.example.Custom"))
        .stdout(predicate::str::contains("ignored").not());
    Ok(())
}

#[test]
fn test_missing_explicit_config_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .args(["--config", "nope.toml", "generate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found: nope.toml"));
    Ok(())
}

#[test]
fn test_malformed_config_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("source_roots = [\"src/main/java\"]\nouput_dir = \"gen\"\n")?;

    project
        .command()
        .arg("generate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration file syntax"))
        .stderr(predicate::str::contains("ouput_dir"));
    Ok(())
}

#[test]
fn test_invalid_exclude_pattern_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .args(["generate", "-s", "src/main/java", "--exclude", "[oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid exclude pattern '[oops'"));
    Ok(())
}
