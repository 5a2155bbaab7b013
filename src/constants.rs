//! Constants used throughout the portletgen codebase.
//!
//! Default marker names, file names, and output locations live here so the
//! configuration layer, the scanner, and the generator agree on them.

/// Default simple name of the component-descriptor marker annotation.
pub const DEFAULT_COMPONENT_ANNOTATION: &str = "Portlet";

/// Default simple name of the module-registration marker annotation.
pub const DEFAULT_MODULE_ANNOTATION: &str = "ProjectModulePlugin";

/// Default package of the generated portlet factory.
pub const DEFAULT_PACKAGE: &str = "edu.stanford.bmir.protege.web.client.portlet";

/// Default output source root for generated files.
pub const DEFAULT_OUTPUT_DIR: &str = "target/generated-sources/portletgen";

/// Configuration file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "portletgen.toml";

/// Extension of the source files the scanner parses.
pub const JAVA_EXTENSION: &str = "java";

/// Simple name of the generated factory class.
pub const FACTORY_CLASS_NAME: &str = "PortletFactoryGenerated";

/// Suffix appended to a module class name to form its generated glue class.
pub const MODULE_CLASS_SUFFIX: &str = "Generated";

/// Template file rendering the portlet factory.
pub const FACTORY_TEMPLATE: &str = "PortletFactoryGenerated.java.tera";

/// Template file rendering one module registration.
pub const MODULE_TEMPLATE: &str = "PortletModuleGenerated.java.tera";

/// Context discriminator appended to the portlet id when hashing the title.
pub const TITLE_HASH_CONTEXT: &str = "title";

/// Context discriminator appended to the portlet id when hashing the tooltip.
pub const TOOLTIP_HASH_CONTEXT: &str = "tooltip";
