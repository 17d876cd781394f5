//! Integration tests that verify generated packages type-check.
//!
//! These run `npx tsc --noEmit` on generated packages, which needs Node.js
//! and network access to fetch TypeScript. Run with `cargo test -- --ignored`.

use sdkgen_codegen::testing::{TypeScriptChecker, assert_generates_valid_code, ir_from_json};
use sdkgen_codegen_typescript::{Generator, LanguageCodegen};

#[test]
#[ignore]
fn test_openapi_document_type_checks() {
    let ir = ir_from_json(
        r##"{
          "openapi": "3.0.0",
          "info": {"title": "Tree", "version": "1.0"},
          "paths": {
            "/nodes/{id}": {
              "get": {
                "tags": ["nodes"],
                "parameters": [
                  {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}},
                  {"name": "sort-by", "in": "query", "schema": {"type": "string", "enum": ["name", "created"]}}
                ],
                "responses": {"200": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Node"}}}}}
              },
              "put": {
                "tags": ["nodes"],
                "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
                "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Node"}}}},
                "responses": {"204": {"description": "updated"}}
              }
            }
          },
          "components": {
            "schemas": {
              "Node": {
                "type": "object",
                "required": ["name"],
                "properties": {
                  "name": {"type": "string"},
                  "created-at": {"type": "string", "format": "date-time"},
                  "parent": {"$ref": "#/components/schemas/Node"},
                  "children": {"type": "array", "items": {"$ref": "#/components/schemas/Node"}},
                  "value": {"oneOf": [{"type": "integer"}, {"$ref": "#/components/schemas/Node"}]}
                }
              }
            }
          }
        }"##,
    );
    assert_generates_valid_code(&TypeScriptChecker, |dir| {
        Generator::new(&ir).generate(dir)?;
        Ok(())
    });
}
