//! Converts an OpenAPI spec to resource definitions
//!
//! Top-level paths (no `{` placeholder) become resources. Parameterized
//! paths are then paired with the collection their prefix names. Pairing is
//! done in two passes: drafts are collected first, then a fresh list is
//! built that merges in item-path data.

use super::schema::Flattener;
use super::types::{OpenApiSpec, PathItem};
use indexmap::IndexMap;
use provider_codegen_common::naming::{item_path_prefix, resource_name_from_path};
use provider_codegen_common::{GeneratorError, ResourceDef, Result};
use std::collections::HashMap;
use tracing::debug;

/// Convert an OpenAPI spec to resource definitions sorted by name
pub fn convert_openapi_to_resources(spec: &OpenApiSpec) -> Result<Vec<ResourceDef>> {
    let mut drafts: IndexMap<&str, ResourceDef> = IndexMap::new();
    let mut items: IndexMap<&str, ItemCandidate<'_>> = IndexMap::new();

    for (path, path_item) in &spec.paths {
        if path_item.is_debug() {
            debug!(path = %path, "skipping debug endpoint");
            continue;
        }

        if path.contains('{') {
            let candidate = ItemCandidate {
                path,
                item: path_item,
            };
            let prefix = item_path_prefix(path);
            let replace = items
                .get(prefix)
                .map_or(true, |existing| candidate.segments() < existing.segments());
            if replace {
                items.insert(prefix, candidate);
            }
        } else if let Some(draft) = draft_resource(spec, path, path_item)? {
            drafts.insert(path, draft);
        }
    }

    check_name_conflicts(&drafts)?;

    for (prefix, candidate) in &items {
        if !drafts.contains_key(prefix) {
            debug!(path = %candidate.path, "dropping item path without a collection");
        }
    }

    let mut resources = drafts
        .into_iter()
        .map(|(path, draft)| match items.get(path) {
            Some(candidate) => attach_item_path(spec, draft, candidate),
            None => Ok(draft),
        })
        .collect::<Result<Vec<_>>>()?;

    resources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(resources)
}

/// An item path competing to be paired with a collection
#[derive(Debug, Clone, Copy)]
struct ItemCandidate<'a> {
    path: &'a str,
    item: &'a PathItem,
}

impl ItemCandidate<'_> {
    /// The shallowest item path under a prefix wins; ties keep the first seen
    fn segments(&self) -> usize {
        self.path.split('/').filter(|s| !s.is_empty()).count()
    }
}

/// Build the collection-only resource for a top-level path
fn draft_resource(spec: &OpenApiSpec, path: &str, item: &PathItem) -> Result<Option<ResourceDef>> {
    let name = resource_name_from_path(path);
    if name.is_empty() {
        debug!(path = %path, "path has no segment to name a resource after");
        return Ok(None);
    }

    let create_schema = item
        .request_schema()
        .map(|schema| Flattener::new(spec).flatten_body(schema))
        .transpose()?;
    let read_schema = item
        .response_schema()
        .map(|schema| Flattener::new(spec).flatten_body(schema))
        .transpose()?;

    Ok(Some(ResourceDef {
        create_schema,
        read_schema,
        ..ResourceDef::new(name, path)
    }))
}

/// Produce the paired resource from a draft and its item path
fn attach_item_path(
    spec: &OpenApiSpec,
    draft: ResourceDef,
    candidate: &ItemCandidate<'_>,
) -> Result<ResourceDef> {
    debug!(
        resource = %draft.name,
        item_path = %candidate.path,
        "paired item path"
    );

    let update_schema = candidate
        .item
        .request_schema()
        .map(|schema| Flattener::new(spec).flatten_body(schema))
        .transpose()?;

    Ok(ResourceDef {
        item_path: candidate.path.to_string(),
        update_schema,
        has_delete: candidate.item.delete.is_some(),
        ..draft
    })
}

fn check_name_conflicts(drafts: &IndexMap<&str, ResourceDef>) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (path, draft) in drafts {
        if let Some(first) = seen.insert(draft.name.as_str(), *path) {
            return Err(GeneratorError::NameConflict {
                name: draft.name.clone(),
                first: first.to_string(),
                second: path.to_string(),
            });
        }
    }
    Ok(())
}
