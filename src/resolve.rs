//! Master and auxiliary definition passes.
//!
//! The master declaration yields one record per documented constant and the
//! set of cross-referenced definitions; each referenced definition is then
//! read from the same package directory.
use crate::config::GeneratorConfig;
use crate::error::SourceError;
use crate::extract::constant_declarations;
use crate::javadoc::{display_name, Javadoc};
use crate::model::{EnumRecord, MetadataDocument, PropertyRecord, ValueEntry};
use crate::source::read_source;
use crate::syntax::{locate_declaration, parse_compilation_unit, CompilationUnit};
use anyhow::Result;
use indexmap::IndexSet;
use std::path::Path;

/// Result of the master pass.
#[derive(Debug, Default)]
pub struct MasterDefinition {
    pub properties: Vec<PropertyRecord>,
    /// Cross-referenced definition names in first-discovery order.
    pub references: IndexSet<String>,
}

pub fn build_document(config: &GeneratorConfig) -> Result<MetadataDocument> {
    let master = extract_master(config)?;
    let mut enums = Vec::with_capacity(master.references.len() + 1);
    enums.push(EnumRecord {
        name: config.declaration.clone(),
        package: config.package_name.clone(),
        values: master.properties.into_iter().map(ValueEntry::from).collect(),
    });
    for name in &master.references {
        enums.push(extract_auxiliary(config, name)?);
    }
    Ok(MetadataDocument { enums })
}

pub fn extract_master(config: &GeneratorConfig) -> Result<MasterDefinition> {
    let path = config.definition_path(&config.declaration);
    let source = read_source(&path)?;
    let unit = parse_compilation_unit(&path, &source)?;
    log_parsed_unit(&unit, config, &path);
    let decl = locate_declaration(&unit, &config.declaration, &path)?;

    let mut master = MasterDefinition::default();
    for constant in constant_declarations(decl)? {
        if constant.name == config.sentinel {
            continue;
        }
        let doc = constant
            .doc_content()
            .ok_or_else(|| SourceError::MissingDocumentation {
                field: constant.name.to_string(),
            })?;
        let value = constant.value()?;
        let doc = Javadoc::parse(doc);
        let data_enums: Vec<String> = doc
            .tag_values(&config.cross_reference_tag)
            .map(str::to_string)
            .collect();
        master.references.extend(data_enums.iter().cloned());
        let record = PropertyRecord {
            identifier: constant.name.to_string(),
            value,
            display_name: display_name(&doc, constant.name, config.max_display_name_length),
            data_enums,
        };
        tracing::debug!(
            field = %record.identifier,
            line = constant.line,
            doc_line = ?constant.comment.map(|comment| comment.line),
            value = record.value,
            display_name = %record.display_name,
            data_enums = ?record.data_enums,
            "extracted property"
        );
        master.properties.push(record);
    }
    tracing::debug!(
        properties = master.properties.len(),
        references = master.references.len(),
        "master declaration processed"
    );
    Ok(master)
}

/// Reads the definition `name` as plain name/value pairs.
pub fn extract_auxiliary(config: &GeneratorConfig, name: &str) -> Result<EnumRecord> {
    let path = config.definition_path(name);
    if !path.is_file() {
        return Err(SourceError::MissingReferencedDefinition {
            name: name.to_string(),
            path,
        }
        .into());
    }
    let source = read_source(&path)?;
    let unit = parse_compilation_unit(&path, &source)?;
    log_parsed_unit(&unit, config, &path);
    let decl = locate_declaration(&unit, name, &path)?;
    let mut values = Vec::new();
    for constant in constant_declarations(decl)? {
        values.push(ValueEntry::plain(constant.name, constant.value()?));
    }
    tracing::debug!(definition = name, values = values.len(), "auxiliary definition processed");
    Ok(EnumRecord {
        name: name.to_string(),
        package: config.package_name.clone(),
        values,
    })
}

fn log_parsed_unit(unit: &CompilationUnit<'_>, config: &GeneratorConfig, path: &Path) {
    tracing::debug!(
        path = %path.display(),
        package = ?unit.package,
        imports = unit.imports.len(),
        types = unit.types.len(),
        "parsed definition file"
    );
    if let Some(package) = unit.package.as_deref() {
        if package != config.package_name {
            tracing::warn!(
                path = %path.display(),
                declared = package,
                configured = %config.package_name,
                "package declaration differs from the configured package"
            );
        }
    }
}
