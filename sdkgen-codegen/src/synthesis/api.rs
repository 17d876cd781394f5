//! Endpoint grouping into API classes.

use indexmap::IndexMap;
use sdkgen_core::to_pascal_case;
use sdkgen_document::{EndpointSpec, Flavor};
use sdkgen_ir::ApiClass;
use tracing::{debug, warn};

use super::endpoint::operation_name;
use super::session::GenerationSession;
use crate::{Diagnostic, UniqueNames};

const PHASE: &str = "synthesize";

/// Group used for untagged schema endpoints.
pub const DEFAULT_GROUP: &str = "default";

impl<'s> GenerationSession<'s> {
    /// Group endpoints into API classes, in first-appearance order.
    pub fn synthesize_apis(&mut self) -> Vec<ApiClass> {
        let spec = self.spec;

        let mut groups: IndexMap<String, Vec<&EndpointSpec>> = IndexMap::new();
        for endpoint in &spec.endpoints {
            let group = endpoint.group.as_deref().map(str::trim).unwrap_or_default();
            if group.is_empty() && spec.flavor == Flavor::Legacy {
                warn!(path = %endpoint.path, "endpoint in unnamed group skipped");
                self.report(
                    Diagnostic::warning(PHASE, "endpoint in a group without a name is skipped")
                        .at(format!("{} {}", endpoint.method, endpoint.path)),
                );
                continue;
            }
            let group = if group.is_empty() { DEFAULT_GROUP } else { group };
            groups.entry(group.to_string()).or_default().push(endpoint);
        }

        let mut class_names = UniqueNames::new("");
        let mut apis = Vec::with_capacity(groups.len());
        for (group, endpoints) in groups {
            let name = class_names.claim(&api_class_name(&group));

            let mut method_names = UniqueNames::default();
            let operations = endpoints
                .into_iter()
                .map(|endpoint| {
                    let method = method_names.claim(&operation_name(endpoint, spec.flavor));
                    self.classify_endpoint(endpoint, &group, method)
                })
                .collect::<Vec<_>>();

            debug!(api = %name, operations = operations.len(), "synthesized api class");
            apis.push(ApiClass {
                group,
                name,
                operations,
            });
        }
        apis
    }
}

/// `projects` -> `ProjectsApi`
pub(crate) fn api_class_name(group: &str) -> String {
    let base = to_pascal_case(group);
    if base.is_empty() {
        "DefaultApi".to_string()
    } else {
        format!("{base}Api")
    }
}
