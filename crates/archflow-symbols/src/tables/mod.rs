//! Static provider symbol tables.
//!
//! Each table maps a renderer module (e.g. `diagrams.aws.compute`) to the
//! class names it exports at runtime, including re-exported aliases. The
//! tables are machine-generated from an installed `diagrams` distribution and
//! stand in for runtime introspection; a "direct import" elsewhere in the
//! resolver is a direct consultation of these tables.

mod aws;
mod azure;
mod gcp;

use archflow::Provider;

/// One renderer module and the classes it exports.
#[derive(Debug, Clone, Copy)]
pub struct ModuleSymbols {
    /// Fully-qualified module path (`diagrams.<provider>.<category>`)
    pub module: &'static str,

    /// Short category name (`compute`, `database`, ...)
    pub category: &'static str,

    /// Exported class names, re-exported aliases included, in export order
    pub classes: &'static [&'static str],
}

/// All modules for a provider, in catalog order.
#[must_use]
pub fn provider_modules(provider: Provider) -> &'static [ModuleSymbols] {
    match provider {
        Provider::Aws => aws::MODULES,
        Provider::Azure => azure::MODULES,
        Provider::Gcp => gcp::MODULES,
    }
}

/// Direct table consultation: does `module` export `class` under exactly
/// that name? Bypasses any cache; works even when the registry's idea of a
/// module's contents is stale.
#[must_use]
pub fn module_exports(module: &str, class: &str) -> bool {
    for provider in Provider::ALL {
        for entry in provider_modules(provider) {
            if entry.module == module {
                return entry.classes.contains(&class);
            }
        }
    }
    false
}

/// Find the table entry for a fully-qualified module name.
#[must_use]
pub fn module_entry(module: &str) -> Option<&'static ModuleSymbols> {
    for provider in Provider::ALL {
        for entry in provider_modules(provider) {
            if entry.module == module {
                return Some(entry);
            }
        }
    }
    None
}
