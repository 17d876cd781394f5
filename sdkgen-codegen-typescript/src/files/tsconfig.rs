use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};
use serde_json::json;

use super::GENERATED_HEADER;

/// The tsconfig.json of the generated package.
///
/// tsc reads tsconfig as JSON with comments, so this file carries the
/// regular source header.
pub struct TsConfig;

impl GeneratedFile for TsConfig {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("tsconfig.json")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        let config = json!({
            "compilerOptions": {
                "lib": ["ESNext"],
                "target": "ESNext",
                "module": "ESNext",
                "moduleResolution": "bundler",
                "allowImportingTsExtensions": true,
                "verbatimModuleSyntax": true,
                "noEmit": true,
                "strict": true,
                "skipLibCheck": true,
                "noFallthroughCasesInSwitch": true,
                "noUnusedLocals": true,
                "noUnusedParameters": true,
                "noPropertyAccessFromIndexSignature": true
            },
            "include": ["src"]
        });
        let mut out = serde_json::to_string_pretty(&config).unwrap_or_default();
        out.push('\n');
        out
    }
}
