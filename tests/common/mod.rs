// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed template repository and a fluent
// builder so each integration test can set up an isolated environment
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::Path;

use ptc_cli::cli::GlobalOpts;

/// A small but complete `features.toml` used by most integration tests.
///
/// `linux` is a meta-feature bundling `linux-build-script`, which in turn
/// depends on `base` — three levels deep, like the built-in table.
pub const BASIC_FEATURES: &str = r#"
[base]
content = ["CMakeLists.txt", "LICENSE"]

[linux-build-script]
dependencies = ["base"]
content = ["build.sh"]

[linux]
dependencies = ["linux-build-script"]

[docs]
content = ["doxygen"]
"#;

/// An isolated template repository backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TemplateRepo {
    /// Temporary directory containing the template repository.
    pub root: tempfile::TempDir,
}

impl TemplateRepo {
    /// Path to the template root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }
}

/// Fluent builder for [`TemplateRepo`].
pub struct TemplateRepoBuilder {
    root: tempfile::TempDir,
}

impl TemplateRepoBuilder {
    /// Begin building a new, empty template repository.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Write `content` as the repository's `features.toml`.
    pub fn with_registry(self, content: &str) -> Self {
        std::fs::write(self.root.path().join("features.toml"), content)
            .expect("write features.toml");
        self
    }

    /// Create a content file at `name` (parents created as needed).
    pub fn with_content_file(self, name: &str, content: &str) -> Self {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create content parent");
        }
        std::fs::write(&path, content).expect("write content file");
        self
    }

    /// Create a content directory at `name` containing one marker file.
    pub fn with_content_dir(self, name: &str, marker: &str) -> Self {
        let dir = self.root.path().join(name);
        std::fs::create_dir_all(&dir).expect("create content dir");
        std::fs::write(dir.join(marker), "marker\n").expect("write marker file");
        self
    }

    /// Finish building and return the repository.
    pub fn build(self) -> TemplateRepo {
        TemplateRepo { root: self.root }
    }
}

/// A template repository populated to match [`BASIC_FEATURES`].
pub fn basic_repo() -> TemplateRepo {
    TemplateRepoBuilder::new()
        .with_registry(BASIC_FEATURES)
        .with_content_file("CMakeLists.txt", "project(template)\n")
        .with_content_file("LICENSE", "MIT\n")
        .with_content_file("build.sh", "#!/bin/sh\nmake\n")
        .with_content_dir("doxygen", "Doxyfile")
        .build()
}

/// Global options pointing at `root` and `dest`, parallelism disabled.
pub fn opts_for(root: &Path, dest: &Path) -> GlobalOpts {
    GlobalOpts {
        verbose: false,
        dry_run: false,
        root: Some(root.to_path_buf()),
        dest: Some(dest.to_path_buf()),
        parallel: false,
    }
}
