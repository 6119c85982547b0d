//! Built-in starter kits.
//!
//! The catalog is a plain data table: adding a language means adding a
//! [`StarterKit`] row, not touching the loading code.

use crate::error::Result;
use crate::manifest::Manifest;
use crate::registry::assets::{extract, AssetProvider, EmbeddedAssets};
use crate::registry::template::Template;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::debug;

/// Default per-request time limit for built-in kits.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(1);

/// Default maximum payload for built-in kits, in bytes.
pub const DEFAULT_MAXIMUM_PAYLOAD: u64 = 8192;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

const USAGE: &str = r#"### Usage

    curl --data-binary '{"name": "reddec"}' -H 'Content-Type: application/json' "http://example.com/a/xyz"

Replace url to the real
"#;

/// Where a kit's starter files come from.
#[derive(Debug, Clone, Copy)]
pub enum KitFiles {
    /// A directory in the embedded asset tree
    Assets(&'static str),
    /// Small files spelled out inline as (path, content)
    Inline(&'static [(&'static str, &'static str)]),
}

/// One row of the built-in catalog.
#[derive(Debug, Clone, Copy)]
pub struct StarterKit {
    pub name: &'static str,
    pub description: &'static str,
    pub checks: &'static [&'static [&'static str]],
    pub manifest_name: &'static str,
    pub run: &'static [&'static str],
    pub post_clone: Option<&'static str>,
    pub files: KitFiles,
}

impl StarterKit {
    /// Build the template for this kit.
    pub fn build(&self, assets: &dyn AssetProvider) -> Result<Template> {
        let files = match self.files {
            KitFiles::Assets(root) => extract(assets, root)?,
            KitFiles::Inline(entries) => entries
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
        };

        Ok(Template {
            description: self.description.to_string(),
            manifest: Manifest {
                name: self.manifest_name.to_string(),
                description: USAGE.to_string(),
                run: self.run.iter().map(|s| s.to_string()).collect(),
                time_limit: DEFAULT_TIME_LIMIT,
                maximum_payload: DEFAULT_MAXIMUM_PAYLOAD,
                output_headers: BTreeMap::from([(
                    "Content-Type".to_string(),
                    DEFAULT_CONTENT_TYPE.to_string(),
                )]),
                ..Default::default()
            },
            post_clone: self.post_clone.map(str::to_string),
            check: self
                .checks
                .iter()
                .map(|argv| argv.iter().map(|s| s.to_string()).collect())
                .collect(),
            files,
        })
    }
}

/// The built-in catalog.
pub const STARTER_KITS: &[StarterKit] = &[
    StarterKit {
        name: "Python",
        description: "Python basic function",
        checks: &[
            &["which", "make"],
            &["which", "python3"],
            &["python3", "-m", "venv", "--help"],
        ],
        manifest_name: "Example Python Function",
        run: &["./venv/bin/python3", "app.py"],
        post_clone: Some("install"),
        files: KitFiles::Assets("python"),
    },
    StarterKit {
        name: "Node JS",
        description: "Node JS basic function",
        checks: &[&["which", "make"], &["which", "node"], &["which", "npm"]],
        manifest_name: "Example NodeJS Function",
        run: &["node", "app.js"],
        post_clone: Some("install"),
        files: KitFiles::Inline(&[
            ("app.js", NODE_SCRIPT),
            ("package.json", NODE_PACKAGE),
            ("Makefile", NODE_MAKEFILE),
            (".cgiignore", "node_modules"),
        ]),
    },
    StarterKit {
        name: "PHP",
        description: "PHP basic function",
        checks: &[&["which", "php"]],
        manifest_name: "Example PHP Function",
        run: &["php", "app.php"],
        post_clone: None,
        files: KitFiles::Inline(&[("app.php", PHP_SCRIPT)]),
    },
    StarterKit {
        name: "Nim",
        description: "Nim lang basic function",
        checks: &[&["which", "make"], &["which", "nim"], &["which", "nimble"]],
        manifest_name: "Fast python-like function",
        run: &["./bin/lambda"],
        post_clone: Some("build"),
        files: KitFiles::Inline(&[
            ("src/lambda.nim", NIM_SCRIPT),
            ("lambda.nimble", NIMBLE_PACKAGE),
            ("Makefile", NIM_MAKEFILE),
        ]),
    },
];

/// Build every built-in template using the given asset tree.
pub fn load_templates(assets: &dyn AssetProvider) -> Result<HashMap<String, Template>> {
    let mut templates = HashMap::with_capacity(STARTER_KITS.len());
    for kit in STARTER_KITS {
        let template = kit.build(assets)?;
        debug!(name = kit.name, files = template.files.len(), "built starter kit");
        templates.insert(kit.name.to_string(), template);
    }
    Ok(templates)
}

/// Build every built-in template from the assets compiled into the binary.
pub fn load_embedded() -> Result<HashMap<String, Template>> {
    load_templates(&EmbeddedAssets::new())
}

/// Check if a template name is built in.
pub fn has_template(name: &str) -> bool {
    STARTER_KITS.iter().any(|kit| kit.name == name)
}

const NODE_SCRIPT: &str = r#"
async function run(request) {
     return ["hello", "world"];
}

let input = '';
process.stdin.resume();
process.stdin.setEncoding('utf8');
process.stdin.on('data', function (chunk) {
    input += chunk;
});
process.stdin.on('end', function () {
	run(JSON.parse(input)).catch((e)=> {
		return {"error": e + ''};
	}).then((response)=> {
		process.stdout.write(JSON.stringify(response));
	})
});
"#;

const NODE_MAKEFILE: &str = "
install:
\tnpm install .
";

const NODE_PACKAGE: &str = r#"{
  "name": "",
  "version": "1.0.0",
  "description": "",
  "main": "index.js",
  "scripts": {
    "test": "echo \"Error: no test specified\" && exit 1"
  },
  "author": "",
  "license": "",
  "dependencies": {
    "axios": "^0.19.2"
  }
}"#;

const PHP_SCRIPT: &str = r#"
<?php
$request = json_decode(stream_get_contents(STDIN));

$response = array("hello", "world");

echo json_encode($response, JSON_PRETTY_PRINT);
?>"#;

const NIM_SCRIPT: &str = r#"
import json

let request = stdin.readAll().parseJson()

echo pretty(%*["hello", "world"])
"#;

const NIMBLE_PACKAGE: &str = r#"
version       = "0.1.0"
author        = ""
description   = ""
license       = ""
srcDir        = "src"
bin           = @["lambda"]

# Dependencies
requires "nim >= 1.2.0"
"#;

const NIM_MAKEFILE: &str = "
build:
\tnimble build
\tmkdir -p bin
\tmv -f lambda bin/
";
