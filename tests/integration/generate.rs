//! The `generate` command end to end.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_generate_writes_factory_and_modules() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;
    project.add_module("edu.example", "FooModule", &["FooPresenter"])?;

    project
        .command()
        .args(["generate", "--source-root", "src/main/java", "--package", "edu.example.gen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 file(s) for 1 portlet(s) and 1 module(s)"))
        .stderr(predicate::str::contains("[Portlet] portlets.Foo"));

    let factory = project.read_output("edu/example/gen/PortletFactoryGenerated.java")?;
    assert!(factory.starts_with("package edu.example.gen;"));
    assert!(factory.contains("edu.example.FooPortlet.class"));
    assert!(factory.contains("portletModules.add(edu.example.FooModuleGenerated.class);"));

    let glue = project.read_output("edu/example/FooModuleGenerated.java")?;
    assert!(glue.contains("bindings.add(FooPresenter.class);"));
    Ok(())
}

#[test]
fn test_generate_succeeds_with_skipped_declarations() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "Good", "good", "Good", "Good one")?;
    project.add_source("edu/example/Broken.java", "package edu.example;\nclass Broken {\n")?;
    project.add_source(
        "edu/example/Bad.java",
        "package edu.example;\n@Portlet(id = \"bad\", title = \"Bad\")\nclass Bad {}\n",
    )?;

    project
        .command()
        .args(["generate", "-s", "src/main/java"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) could not be parsed"))
        .stdout(predicate::str::contains("1 declaration(s) were invalid and skipped"))
        .stderr(predicate::str::contains("edu.example.Bad"));
    Ok(())
}

#[test]
fn test_generate_without_roots_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .arg("generate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No source roots configured"))
        .stderr(predicate::str::contains("--source-root"));

    assert!(!project.output_dir().exists());
    Ok(())
}

#[test]
fn test_generate_missing_root_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .args(["generate", "--source-root", "does/not/exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Source root does not exist"));
    Ok(())
}

#[test]
fn test_generate_rejects_invalid_package() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .args(["generate", "-s", "src/main/java", "--package", "not-a.package"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid Java package name"));
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;

    project
        .command()
        .args(["generate", "-s", "src/main/java", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would generate 1 file(s)"))
        .stderr(predicate::str::contains("Would write"));

    assert!(!project.output_dir().exists());
    Ok(())
}

#[test]
fn test_quiet_suppresses_info_logs() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;

    project
        .command()
        .args(["--quiet", "generate", "-s", "src/main/java"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[Portlet]").not());
    Ok(())
}

#[test]
fn test_template_override() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;
    let templates = project.root().join("templates");
    std::fs::create_dir_all(&templates)?;
    std::fs::write(
        templates.join("PortletFactoryGenerated.java.tera"),
        "package {{ package }};\n// {% for p in portlets %}{{ p.id | java_string }} {% endfor %}\n",
    )?;

    project
        .command()
        .args(["generate", "-s", "src/main/java", "--package", "p", "--templates", "templates"])
        .assert()
        .success();

    assert_eq!(project.read_output("p/PortletFactoryGenerated.java")?, "package p;\n// portlets.Foo \n");
    Ok(())
}

#[test]
fn test_broken_template_fails_without_output() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo")?;
    let templates = project.root().join("templates");
    std::fs::create_dir_all(&templates)?;
    std::fs::write(templates.join("PortletFactoryGenerated.java.tera"), "{{ missing_variable }}")?;

    project
        .command()
        .args(["generate", "-s", "src/main/java", "--templates", "templates"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PortletFactoryGenerated.java.tera"));

    assert!(!project.output_dir().exists());
    Ok(())
}
