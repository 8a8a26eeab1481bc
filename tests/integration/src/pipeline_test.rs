//! End-to-end pipeline tests over a full on-disk workspace.
//!
//! Each test lays out a realistic project (local extensions, the pack
//! package, the template directory, a pack.toml) in a temp dir and runs
//! the whole pipeline against a stub registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pack_pipeline::{PackConfig, Pipeline};
use pack_registry::Registry;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Registry stub: serves configured latest versions, "extracts" a
/// configured payload on fetch, and records publish calls.
struct StubRegistry {
    latest: HashMap<String, String>,
    fetch_payload: HashMap<String, Value>,
    fail_fetch: Vec<String>,
    published: Mutex<Vec<PathBuf>>,
}

impl StubRegistry {
    fn new() -> Self {
        Self {
            latest: HashMap::new(),
            fetch_payload: HashMap::new(),
            fail_fetch: Vec::new(),
            published: Mutex::new(Vec::new()),
        }
    }

    fn with_widget(mut self) -> Self {
        self.fetch_payload.insert(
            "@thirdparty/widget-pkg".to_string(),
            json!({
                "name": "widget",
                "version": "2.0.0",
                "contributes": {
                    "commands": [{"command": "widget.show", "title": "Show Widget"}],
                    "views": {"o2App": [{"id": "widget-view"}]}
                },
                "activationEvents": ["onCommand:widget.show"]
            }),
        );
        self
    }
}

#[async_trait]
impl Registry for StubRegistry {
    async fn latest_version(&self, package: &str) -> pack_registry::Result<Option<String>> {
        Ok(self.latest.get(package).cloned())
    }

    async fn fetch(&self, package: &str, dest: &Path) -> pack_registry::Result<()> {
        if self.fail_fetch.iter().any(|p| p == package) {
            return Err(pack_registry::Error::CommandFailed {
                tool: "npm".to_string(),
                args: format!("pack {package}"),
                exit_code: Some(1),
                stderr: "404 Not Found".to_string(),
            });
        }
        let manifest = self
            .fetch_payload
            .get(package)
            .cloned()
            .unwrap_or_else(|| json!({"name": package, "version": "0.0.1"}));
        std::fs::create_dir_all(dest).unwrap();
        pack_fs::write_json_pretty(&dest.join("package.json"), &manifest).unwrap();
        // Mimic a package shipping an asset folder.
        let schemas = dest.join("schemas");
        std::fs::create_dir_all(&schemas).unwrap();
        std::fs::write(schemas.join("widget.schema.json"), "{}").unwrap();
        Ok(())
    }

    async fn publish(&self, dir: &Path) -> pack_registry::Result<()> {
        self.published.lock().unwrap().push(dir.to_path_buf());
        Ok(())
    }
}

fn doctor_manifest() -> Value {
    json!({
        "name": "doctor",
        "publisher": "pub",
        "version": "0.0.9",
        "contributes": {
            "commands": [{"command": "doctor.scan", "title": "%scanTitle%"}],
            "views": {
                "o2App": [{"id": "doctor-view", "label": "Doctor"}],
                "explorer": [{"id": "doctor-tree"}]
            }
        },
        "activationEvents": ["onCommand:doctor.scan"],
        "kaitianContributes": {
            "nodeMain": "./build/node.js",
            "viewsProxies": ["DoctorView"]
        }
    })
}

fn marker_manifest() -> Value {
    json!({
        "name": "marker",
        "publisher": "pub",
        "version": "1.2.9",
        "contributes": {
            "commands": [{"command": "marker.toggle", "title": "Toggle Markers"}],
            "views": {"o2App": [{"id": "marker-view"}]}
        },
        "activationEvents": ["onCommand:marker.toggle"]
    })
}

/// A complete on-disk project: two publishable extensions, one stray
/// unlisted one, the pack package, and the source template.
fn setup_workspace(root: &Path, push: bool) -> PackConfig {
    let config_path = root.join("pack.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
push = {push}
stable_prefix = "@o2/extension"
beta_prefix = "@o2/ide-extensions"
app_view_id = "o2App"

[[publishable]]
package_name = "pub.doctor"
assets_folders = ["icons"]
is_active_node = true

[[publishable]]
package_name = "pub.marker"
assets_folders = ["icons"]
is_active_browser = true

[[other]]
package_name = "@thirdparty/widget-pkg"
extension_name = "widget"
assets_folders = ["schemas"]
is_active_node = true
"#
        ),
    )
    .unwrap();

    write_extension(root, "doctor", &doctor_manifest());
    write_file(root, "extensions/doctor/icons/doctor.svg", "<svg>doctor</svg>");
    write_file(root, "extensions/doctor/icons/shared.svg", "<svg>from doctor</svg>");
    write_file(root, "extensions/doctor/build/doctor.js", "// doctor bundle");
    write_file(
        root,
        "extensions/doctor/package.nls.json",
        r#"{"scanTitle": "Scan Project"}"#,
    );
    write_file(
        root,
        "extensions/doctor/package.nls.zh-cn.json",
        r#"{"scanTitle": "扫描项目"}"#,
    );

    write_extension(root, "marker", &marker_manifest());
    write_file(root, "extensions/marker/icons/marker.svg", "<svg>marker</svg>");
    write_file(root, "extensions/marker/icons/shared.svg", "<svg>from marker</svg>");
    write_file(root, "extensions/marker/build/marker.js", "// marker bundle");

    // On disk but not allow-listed.
    write_extension(
        root,
        "stray",
        &json!({"name": "stray", "publisher": "pub", "version": "0.1.0"}),
    );

    pack_fs::write_json_pretty(
        &root.join("pack/package.json"),
        &json!({
            "name": "@o2/o2-pack",
            "version": "1.0.0",
            "extensionPack": ["pub.doctor"],
            "dependencies": {"left-pad": "^1.0.0"}
        }),
    )
    .unwrap();

    pack_fs::write_json_pretty(
        &root.join("template/package.json"),
        &json!({
            "description": "Assembled extension pack",
            "scripts": {"pack": "tsc -p ."}
        }),
    )
    .unwrap();
    write_file(root, "template/tsconfig.json", r#"{"compilerOptions": {}}"#);
    write_file(
        root,
        "template/src/extension.ts.j2",
        "{% for pkg in packages %}export { {{ pkg.activateFunc }} } from '{{ pkg.packageName }}';\n{% endfor %}",
    );
    write_file(root, "template/src/util.ts", "export const noop = () => {};\n");

    PackConfig::load(&config_path).unwrap()
}

fn write_extension(root: &Path, dir_name: &str, manifest: &Value) {
    let dir = root.join("extensions").join(dir_name);
    std::fs::create_dir_all(&dir).unwrap();
    pack_fs::write_json_pretty(&dir.join("package.json"), manifest).unwrap();
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read_string(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}

#[tokio::test]
async fn test_dry_run_assembles_complete_pack() {
    let tmp = TempDir::new().unwrap();
    let config = setup_workspace(tmp.path(), false);
    let registry = Arc::new(StubRegistry::new().with_widget());

    let report = Pipeline::new(config, registry.clone()).run().await.unwrap();

    assert!(report.is_clean());
    assert_eq!(report.succeeded, vec!["doctor", "marker", "widget"]);
    assert_eq!(report.skipped, vec!["stray"]);
    assert!(registry.published.lock().unwrap().is_empty());

    let merged = pack_fs::read_json(&tmp.path().join("pack/package.json")).unwrap();

    // Dry run: every included extension becomes a wildcard dependency;
    // the pack's own runtime dependencies survive.
    assert_eq!(
        merged["dependencies"],
        json!({
            "left-pad": "^1.0.0",
            "@o2/extension-doctor": "*",
            "@o2/extension-marker": "*",
            "@o2/extension-widget": "*"
        })
    );

    // Contributed sections are the union across all three extensions.
    assert_eq!(
        merged["contributes"]["commands"],
        json!([
            {"command": "doctor.scan", "title": "%scanTitle%"},
            {"command": "marker.toggle", "title": "Toggle Markers"},
            {"command": "widget.show", "title": "Show Widget"}
        ])
    );
    assert_eq!(
        merged["contributes"]["views"]["o2App"],
        json!([
            {"id": "doctor-view", "label": "Doctor"},
            {"id": "marker-view"},
            {"id": "widget-view"}
        ])
    );
    assert_eq!(merged["contributes"]["views"]["explorer"], json!([{"id": "doctor-tree"}]));
    assert_eq!(
        merged["activationEvents"],
        json!(["onCommand:doctor.scan", "onCommand:marker.toggle", "onCommand:widget.show"])
    );
    // Per-extension entry points do not leak into the pack.
    assert_eq!(merged["kaitianContributes"], json!({"viewsProxies": ["DoctorView"]}));

    // Customizer ran last: template overrides on top, pack marker gone.
    assert_eq!(merged["description"], json!("Assembled extension pack"));
    assert_eq!(merged["scripts"]["pack"], json!("tsc -p ."));
    assert!(merged.get("extensionPack").is_none());
    assert_eq!(
        read_string(tmp.path(), "pack/tsconfig.json"),
        r#"{"compilerOptions": {}}"#
    );

    // Generated entry module lists every extension's activate hook.
    let entry = read_string(tmp.path(), "pack/src/extension.ts");
    assert!(entry.contains("export { o2ExtensionDoctorActive } from '@o2/extension-doctor';"));
    assert!(entry.contains("export { o2ExtensionMarkerActive } from '@o2/extension-marker';"));
    assert!(!tmp.path().join("pack/src/extension.ts.j2").exists());
    assert_eq!(
        read_string(tmp.path(), "pack/src/util.ts"),
        "export const noop = () => {};\n"
    );

    // Assets and build output landed in the pack.
    assert_eq!(read_string(tmp.path(), "pack/icons/doctor.svg"), "<svg>doctor</svg>");
    assert_eq!(read_string(tmp.path(), "pack/icons/marker.svg"), "<svg>marker</svg>");
    assert!(tmp.path().join("pack/schemas/widget.schema.json").exists());
    assert_eq!(read_string(tmp.path(), "pack/build/doctor.js"), "// doctor bundle");
    assert_eq!(read_string(tmp.path(), "pack/build/marker.js"), "// marker bundle");

    // Localization tables folded per locale.
    let nls = pack_fs::read_json(&tmp.path().join("pack/package.nls.json")).unwrap();
    assert_eq!(nls["scanTitle"], json!("Scan Project"));
    let nls_zh = pack_fs::read_json(&tmp.path().join("pack/package.nls.zh-cn.json")).unwrap();
    assert_eq!(nls_zh["scanTitle"], json!("扫描项目"));
}

#[tokio::test]
async fn test_push_pins_published_versions() {
    let tmp = TempDir::new().unwrap();
    let config = setup_workspace(tmp.path(), true);
    let mut registry = StubRegistry::new().with_widget();
    registry
        .latest
        .insert("@o2/extension-doctor".to_string(), "0.2.9".to_string());
    let registry = Arc::new(registry);

    let report = Pipeline::new(config, registry.clone()).run().await.unwrap();
    assert!(report.is_clean());

    // doctor bumps from the registry's 0.2.9; marker was never
    // published, so its local 1.2.9 is the baseline.
    let merged = pack_fs::read_json(&tmp.path().join("pack/package.json")).unwrap();
    assert_eq!(merged["dependencies"]["@o2/extension-doctor"], json!("0.3.0"));
    assert_eq!(merged["dependencies"]["@o2/extension-marker"], json!("1.3.0"));
    assert_eq!(merged["dependencies"]["@o2/extension-widget"], json!("*"));

    // Both local extensions were rewritten and published.
    let doctor = pack_fs::read_json(&tmp.path().join("extensions/doctor/package.json")).unwrap();
    assert_eq!(doctor["name"], json!("@o2/extension-doctor"));
    assert_eq!(doctor["version"], json!("0.3.0"));
    assert_eq!(doctor["publishConfig"], json!({"access": "public"}));

    let published = registry.published.lock().unwrap();
    assert_eq!(published.len(), 2);
}

#[tokio::test]
async fn test_rerun_produces_identical_pack() {
    let tmp = TempDir::new().unwrap();
    let config = setup_workspace(tmp.path(), false);
    let registry = Arc::new(StubRegistry::new().with_widget());
    let pipeline = Pipeline::new(config, registry);

    pipeline.run().await.unwrap();
    let first = pack_fs::read_json(&tmp.path().join("pack/package.json")).unwrap();
    let first_nls = pack_fs::read_json(&tmp.path().join("pack/package.nls.json")).unwrap();

    pipeline.run().await.unwrap();
    let second = pack_fs::read_json(&tmp.path().join("pack/package.json")).unwrap();
    let second_nls = pack_fs::read_json(&tmp.path().join("pack/package.nls.json")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_nls, second_nls);
}

#[tokio::test]
async fn test_colliding_asset_file_taken_from_last_extension() {
    let tmp = TempDir::new().unwrap();
    let config = setup_workspace(tmp.path(), false);
    let registry = Arc::new(StubRegistry::new().with_widget());

    Pipeline::new(config, registry).run().await.unwrap();

    // Both doctor and marker ship icons/shared.svg; extensions fold in
    // scan order, so the later one wins.
    assert_eq!(
        read_string(tmp.path(), "pack/icons/shared.svg"),
        "<svg>from marker</svg>"
    );
}

#[tokio::test]
async fn test_fetch_failure_aborts_before_any_merge() {
    let tmp = TempDir::new().unwrap();
    let config = setup_workspace(tmp.path(), false);
    let mut registry = StubRegistry::new();
    registry.fail_fetch.push("@thirdparty/widget-pkg".to_string());
    let registry = Arc::new(registry);

    let err = Pipeline::new(config, registry).run().await.unwrap_err();
    assert!(err.to_string().contains("@thirdparty/widget-pkg"));

    // Nothing downstream ran: the pack manifest is untouched.
    let manifest = pack_fs::read_json(&tmp.path().join("pack/package.json")).unwrap();
    assert_eq!(manifest["extensionPack"], json!(["pub.doctor"]));
    assert!(manifest["dependencies"].get("@o2/extension-doctor").is_none());
}

#[tokio::test]
async fn test_broken_extension_reported_but_run_completes_in_dry_run() {
    let tmp = TempDir::new().unwrap();
    let config = setup_workspace(tmp.path(), false);
    let broken = tmp.path().join("extensions/broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("package.json"), "{not json").unwrap();
    let registry = Arc::new(StubRegistry::new().with_widget());

    let report = Pipeline::new(config, registry).run().await.unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.failed, vec!["broken"]);
    // The healthy extensions were still assembled.
    assert_eq!(report.succeeded, vec!["doctor", "marker", "widget"]);
    let merged = pack_fs::read_json(&tmp.path().join("pack/package.json")).unwrap();
    assert_eq!(merged["dependencies"]["@o2/extension-doctor"], json!("*"));
}
