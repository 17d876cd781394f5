//! Detection of recursive types that need `Box` indirection.

use std::collections::{BTreeSet, HashMap, HashSet};

use sdkgen_ir::{SdkIR, TypeNode};

/// Direct (non-list) reference graph between structs and unions.
#[derive(Debug, Default)]
pub struct Recursion {
    edges: HashMap<String, BTreeSet<String>>,
}

impl Recursion {
    pub fn new(ir: &SdkIR) -> Self {
        let mut edges: HashMap<String, BTreeSet<String>> = HashMap::new();
        for model in ir.struct_models() {
            let out = edges.entry(model.name.clone()).or_default();
            for field in &model.fields {
                direct_refs(&field.ty, out);
            }
        }
        for (name, members) in ir.unions() {
            let out = edges.entry(name.to_string()).or_default();
            for member in members {
                direct_refs(member, out);
            }
        }
        Self { edges }
    }

    /// Whether a direct reference from `from` to `to` closes a cycle and so
    /// must be boxed. A direct self reference always does.
    pub fn needs_box(&self, from: &str, to: &str) -> bool {
        self.reaches(to, from)
    }

    fn reaches(&self, start: &str, target: &str) -> bool {
        let mut stack = vec![start];
        let mut seen = HashSet::new();
        while let Some(node) = stack.pop() {
            if node == target {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            if let Some(next) = self.edges.get(node) {
                stack.extend(next.iter().map(String::as_str));
            }
        }
        false
    }
}

/// Names reachable without passing through a list.
fn direct_refs(ty: &TypeNode, out: &mut BTreeSet<String>) {
    match ty {
        TypeNode::Optional(inner) => direct_refs(inner, out),
        TypeNode::Model(name) | TypeNode::Union { name, .. } => {
            out.insert(name.clone());
        }
        TypeNode::List(_) | TypeNode::Primitive(_) | TypeNode::Any | TypeNode::Enum(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use sdkgen_ir::{ModelDef, ModelField, SdkMeta, StructModel};

    use super::*;

    fn model(name: &str, fields: Vec<ModelField>) -> ModelDef {
        ModelDef::Struct(StructModel {
            name: name.into(),
            doc: None,
            fields,
            dependencies: BTreeSet::new(),
        })
    }

    fn ir(models: Vec<ModelDef>) -> SdkIR {
        SdkIR {
            meta: SdkMeta {
                name: "x".into(),
                version: "0.1.0".into(),
                description: None,
            },
            models,
            apis: Vec::new(),
        }
    }

    #[test]
    fn test_mutual_recursion_is_boxed() {
        let ir = ir(vec![
            model("A", vec![ModelField::new("b", TypeNode::model("B"), false)]),
            model("B", vec![ModelField::new("a", TypeNode::model("A"), false)]),
            model("C", vec![ModelField::new("a", TypeNode::model("A"), true)]),
        ]);
        let recursion = Recursion::new(&ir);

        assert!(recursion.needs_box("A", "B"));
        assert!(recursion.needs_box("B", "A"));
        assert!(!recursion.needs_box("C", "A"));
    }

    #[test]
    fn test_lists_break_cycles() {
        let ir = ir(vec![
            model(
                "Tree",
                vec![ModelField::new("nodes", TypeNode::list(TypeNode::model("Node")), true)],
            ),
            model("Node", vec![ModelField::new("tree", TypeNode::model("Tree"), false)]),
        ]);
        let recursion = Recursion::new(&ir);

        assert!(!recursion.needs_box("Node", "Tree"));
    }

    #[test]
    fn test_direct_self_reference_is_boxed() {
        let ir = ir(vec![model(
            "Node",
            vec![ModelField::new("parent", TypeNode::model("Node"), false)],
        )]);
        assert!(Recursion::new(&ir).needs_box("Node", "Node"));
    }

    #[test]
    fn test_cycle_through_union() {
        let union = TypeNode::union("NodeNextUnion", vec![TypeNode::int(), TypeNode::model("Node")]);
        let ir = ir(vec![model("Node", vec![ModelField::new("next", union, false)])]);
        let recursion = Recursion::new(&ir);

        assert!(recursion.needs_box("Node", "NodeNextUnion"));
        assert!(recursion.needs_box("NodeNextUnion", "Node"));
    }
}
