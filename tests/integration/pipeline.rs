//! Library-level runs of the whole pipeline over real source trees.

use anyhow::Result;
use std::fs;

use crate::common::TestProject;
use portletgen::config::GeneratorConfig;
use portletgen::core::DiagnosticKind;
use portletgen::orchestrator::PortletGenerator;
use portletgen::scanner::decode_string_literal;
use portletgen::writer::{DirectorySourceWriter, MemorySourceWriter};

const FACTORY: &str = "edu/stanford/bmir/protege/web/client/portlet/PortletFactoryGenerated.java";

fn generator(project: &TestProject) -> PortletGenerator {
    PortletGenerator::new(GeneratorConfig {
        source_roots: vec![project.source_root()],
        output_dir: project.output_dir(),
        ..GeneratorConfig::default()
    })
}

#[tokio::test]
async fn test_escaped_text_round_trips_through_java_literals() -> Result<()> {
    portletgen::test_utils::init_test_logging(None);
    let project = TestProject::new()?;
    project.add_source(
        "edu/example/QuotePortlet.java",
        r#"package edu.example;

@Portlet(id = "portlets.Quote",
         title = "Say \"hi\" to C:\\temp\nplease",
         tooltip = "caf\u00e9 \t tab")
public class QuotePortlet {
}
"#,
    )?;

    let mut writer = MemorySourceWriter::new();
    let report = generator(&project).run(&mut writer).await?;
    let descriptor = report.portlet_types.iter().next().expect("one portlet");
    assert_eq!(descriptor.title(), "Say \"hi\" to C:\\temp\nplease");
    assert_eq!(descriptor.tooltip(), "caf\u{e9} \t tab");

    let factory = writer.get(FACTORY).expect("factory written");
    for text in [descriptor.title(), descriptor.tooltip()] {
        let literal = factory
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_suffix(','))
            .find(|literal| decode_string_literal(literal).as_deref() == Ok(text));
        assert!(literal.is_some(), "no literal decoding to {text:?} in:\n{factory}");
    }
    Ok(())
}

#[tokio::test]
async fn test_output_is_byte_identical_across_runs() -> Result<()> {
    let project = TestProject::new()?;
    for i in 0..12 {
        project.add_portlet(
            &format!("edu.example.p{}", i % 3),
            &format!("Portlet{i}"),
            &format!("portlets.P{i}"),
            &format!("Portlet {i}"),
            &format!("Tooltip {i}"),
        )?;
    }
    project.add_module("edu.example", "AModule", &["APresenter"])?;
    project.add_module("edu.example", "BModule", &["BPresenter"])?;

    generator(&project).run(&mut DirectorySourceWriter::new(project.output_dir())).await?;
    let first = project.read_output(FACTORY)?;
    let first_glue = project.read_output("edu/example/AModuleGenerated.java")?;

    fs::remove_dir_all(project.output_dir())?;
    generator(&project).run(&mut DirectorySourceWriter::new(project.output_dir())).await?;

    assert_eq!(first, project.read_output(FACTORY)?);
    assert_eq!(first_glue, project.read_output("edu/example/AModuleGenerated.java")?);
    assert_eq!(first.matches("portletTypes.add(").count(), 12);
    Ok(())
}

#[tokio::test]
async fn test_nested_declarations() -> Result<()> {
    let project = TestProject::new()?;
    project.add_source(
        "edu/example/Outer.java",
        r#"package edu.example;

import edu.example.views.DetailsView;

public class Outer {

    @Portlet(id = "portlets.Inner", title = "Inner", tooltip = "Nested portlet")
    public static class InnerPortlet {
    }

    @ProjectModulePlugin({DetailsView.class, Outer.InnerPortlet.class})
    public static class InnerModule {
    }
}
"#,
    )?;

    let mut writer = MemorySourceWriter::new();
    let report = generator(&project).run(&mut writer).await?;

    let portlet = report.portlet_types.iter().next().expect("nested portlet");
    assert_eq!(portlet.canonical_class_name(), "edu.example.Outer.InnerPortlet");
    assert_eq!(portlet.simple_name(), "InnerPortlet");
    assert_eq!(portlet.package_name(), "edu.example");

    let module = report.modules.iter().next().expect("nested module");
    assert_eq!(module.bindings(), ["edu.example.views.DetailsView", "edu.example.Outer.InnerPortlet"]);

    let glue = writer.get("edu/example/Outer_InnerModuleGenerated.java").expect("module glue");
    assert!(glue.contains("return edu.example.Outer.InnerModule.class;"));
    Ok(())
}

#[tokio::test]
async fn test_module_bindings_from_on_demand_imports() -> Result<()> {
    let project = TestProject::new()?;
    project.add_source(
        "edu/example/modules/EntityModule.java",
        r#"package edu.example.modules;

import edu.example.portlets.*;

@ProjectModulePlugin({EntityPortlet.class, Exception.class})
public class EntityModule {
}
"#,
    )?;

    let mut writer = MemorySourceWriter::new();
    let report = generator(&project).run(&mut writer).await?;

    let module = report.modules.iter().next().expect("module");
    assert_eq!(module.bindings(), ["EntityPortlet", "Exception"]);

    let glue = writer.get("edu/example/modules/EntityModuleGenerated.java").expect("module glue");
    assert!(glue.contains("import edu.example.portlets.*;"));
    assert!(glue.contains("bindings.add(EntityPortlet.class);"));
    assert!(glue.contains("bindings.add(Exception.class);"));
    assert!(!glue.contains("edu.example.modules.EntityPortlet"));
    assert!(!glue.contains("edu.example.modules.Exception"));
    Ok(())
}

#[tokio::test]
async fn test_text_block_arguments() -> Result<()> {
    let project = TestProject::new()?;
    project.add_source(
        "edu/example/BlockPortlet.java",
        "package edu.example;\n\n\
         @Portlet(id = \"portlets.Block\", title = \"Block\", tooltip = \"\"\"\n    \
         Spans\n    two lines\"\"\")\n\
         public class BlockPortlet {}\n",
    )?;

    let mut writer = MemorySourceWriter::new();
    let report = generator(&project).run(&mut writer).await?;
    let portlet = report.portlet_types.iter().next().expect("one portlet");
    assert_eq!(portlet.tooltip(), "Spans\ntwo lines");
    assert!(writer.get(FACTORY).expect("factory").contains(r#""Spans\ntwo lines""#));
    Ok(())
}

#[tokio::test]
async fn test_mixed_failures_are_collected() -> Result<()> {
    let project = TestProject::new()?;
    project.add_portlet("edu.example", "GoodPortlet", "portlets.Good", "Good", "Works")?;
    project.add_source("edu/example/Broken.java", "package edu.example;\nclass Broken {\n")?;
    project.add_source(
        "edu/example/MissingTooltip.java",
        "package edu.example;\n@Portlet(id = \"x\", title = \"X\")\nclass MissingTooltip {}\n",
    )?;
    project.add_source(
        "edu/example/ConstantId.java",
        "package edu.example;\n@Portlet(id = Ids.C, title = \"C\", tooltip = \"c\")\nclass ConstantId {}\n",
    )?;

    let mut writer = MemorySourceWriter::new();
    let report = generator(&project).run(&mut writer).await?;

    let ids: Vec<_> = report.portlet_types.iter().map(|p| p.id().to_string()).collect();
    assert_eq!(ids, vec!["portlets.Good"]);
    assert_eq!(report.diagnostics.count(DiagnosticKind::Parse), 1);
    assert_eq!(report.diagnostics.count(DiagnosticKind::Validation), 2);

    let messages: Vec<_> = report.diagnostics.iter().map(|d| d.message.clone()).collect();
    assert!(messages.iter().any(|m| m.contains("edu.example.MissingTooltip")));
    assert!(messages.iter().any(|m| m.contains("edu.example.ConstantId")));
    Ok(())
}
