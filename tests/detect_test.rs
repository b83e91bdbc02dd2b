// tests/detect_test.rs
//
// Detector adapters against small on-disk project fixtures.

use mono_bump::config::Config;
use mono_bump::detect::{DetectorRegistry, ModuleDetector};
use mono_bump::domain::{ModuleKind, Version};
use mono_bump::registry::ModuleRegistry;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn gradle_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "settings.gradle",
        "rootProject.name = 'acme'\ninclude ':core', ':util'\n",
    );
    write(root, "gradle.properties", "version=1.2.0\n");
    write(root, "build.gradle", "plugins { id 'java' }\n");
    write(
        root,
        "core/build.gradle",
        "dependencies {\n    implementation project(':util')\n}\n",
    );
    write(root, "core/gradle.properties", "version=0.9.0\n");
    write(root, "util/build.gradle", "plugins { id 'java' }\n");
    dir
}

fn maven_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "pom.xml",
        r#"<project>
  <groupId>com.acme</groupId>
  <artifactId>acme-parent</artifactId>
  <version>1.4.0</version>
  <modules>
    <module>core</module>
    <module>util</module>
  </modules>
</project>
"#,
    );
    write(
        root,
        "core/pom.xml",
        r#"<project>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-parent</artifactId>
    <version>1.4.0</version>
  </parent>
  <artifactId>acme-core</artifactId>
  <dependencies>
    <dependency>
      <groupId>com.acme</groupId>
      <artifactId>acme-util</artifactId>
      <version>1.4.0</version>
    </dependency>
    <dependency>
      <groupId>org.slf4j</groupId>
      <artifactId>slf4j-api</artifactId>
    </dependency>
  </dependencies>
</project>
"#,
    );
    write(
        root,
        "util/pom.xml",
        r#"<project>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-parent</artifactId>
    <version>1.4.0</version>
  </parent>
  <artifactId>acme-util</artifactId>
</project>
"#,
    );
    dir
}

fn npm_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "package.json",
        r#"{
  "name": "acme",
  "version": "2.0.0",
  "workspaces": ["packages/*"]
}
"#,
    );
    write(
        root,
        "packages/util/package.json",
        r#"{"name": "@acme/util", "version": "1.0.0"}"#,
    );
    write(
        root,
        "packages/core/package.json",
        r#"{
  "name": "@acme/core",
  "version": "1.1.0",
  "dependencies": {"@acme/util": "1.0.0", "lodash": "^4.17.0"}
}
"#,
    );
    dir
}

#[test]
fn test_gradle_detection() {
    let fixture = gradle_fixture();
    let registry = DetectorRegistry::from_config(&Config::default());

    let detector = registry.resolve(None, fixture.path()).unwrap();
    assert_eq!(detector.name(), "gradle");

    let project = detector.read_project(fixture.path()).unwrap();
    let modules = ModuleRegistry::from_project(project).unwrap();

    let root = modules.get_module("acme").unwrap();
    assert_eq!(root.kind, ModuleKind::Root);
    assert_eq!(root.declared_version, Some(Version::new(1, 2, 0)));

    let core = modules.get_module("core").unwrap();
    assert_eq!(core.declared_version, Some(Version::new(0, 9, 0)));
    assert!(core.dependencies.contains("util"));

    // util has no own gradle.properties and inherits the root version
    let util = modules.get_module("util").unwrap();
    assert_eq!(util.declared_version, Some(Version::new(1, 2, 0)));
}

#[test]
fn test_maven_detection() {
    let fixture = maven_fixture();
    let registry = DetectorRegistry::from_config(&Config::default());

    // No settings.gradle in the fixture, so probing lands on maven
    let detector = registry.resolve(None, fixture.path()).unwrap();
    assert_eq!(detector.name(), "maven");

    let project = detector.read_project(fixture.path()).unwrap();
    assert_eq!(project.adapter, "maven");
    let modules = ModuleRegistry::from_project(project).unwrap();

    let root = modules.get_module("acme-parent").unwrap();
    assert_eq!(root.declared_version, Some(Version::new(1, 4, 0)));

    let core = modules.get_module("acme-core").unwrap();
    // Version inherited from the parent block
    assert_eq!(core.declared_version, Some(Version::new(1, 4, 0)));
    // Sibling dependency kept, external dependency dropped
    assert!(core.dependencies.contains("acme-util"));
    assert!(!core.dependencies.contains("slf4j-api"));
    assert_eq!(
        core.attributes.get("maven.parent_artifact_id"),
        Some(&"acme-parent".to_string())
    );
}

#[test]
fn test_npm_detection() {
    let fixture = npm_fixture();
    let registry = DetectorRegistry::from_config(&Config::default());

    let detector = registry.resolve(Some("npm"), fixture.path()).unwrap();
    let project = detector.read_project(fixture.path()).unwrap();
    let modules = ModuleRegistry::from_project(project).unwrap();

    let root = modules.get_module("acme").unwrap();
    assert_eq!(root.kind, ModuleKind::Root);
    assert_eq!(root.declared_version, Some(Version::new(2, 0, 0)));

    let core = modules.get_module("@acme/core").unwrap();
    assert_eq!(core.path, "packages/core");
    assert!(core.dependencies.contains("@acme/util"));
    assert!(!core.dependencies.contains("lodash"));

    let util = modules.get_module("@acme/util").unwrap();
    assert_eq!(util.declared_version, Some(Version::new(1, 0, 0)));
}

#[test]
fn test_explicit_unknown_adapter_is_fatal_with_supported_list() {
    let fixture = npm_fixture();
    let registry = DetectorRegistry::from_config(&Config::default());

    let err = registry
        .resolve(Some("cargo"), fixture.path())
        .map(|d| d.name())
        .unwrap_err();
    assert!(err.to_string().contains("supported adapters"));
}
