use std::{env, fs, path::Path};

fn package_field<'a>(pkg: &'a toml::Table, field: &str, fallback: &'a str) -> &'a str {
    pkg.get(field).and_then(|v| v.as_str()).unwrap_or(fallback)
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest = Path::new(&manifest_dir).join("Cargo.toml");
    println!("cargo:rerun-if-changed={}", manifest.display());

    let parsed: toml::Value = fs::read_to_string(&manifest)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| panic!("Failed to load Cargo.toml: {e}"));
    let pkg = parsed
        .get("package")
        .and_then(|p| p.as_table())
        .expect("Cargo.toml missing [package]");

    let contents = format!(
        r#"pub const PKG_NAME: &str = "{}";
pub const PKG_VERSION: &str = "{}";
pub const PKG_DESCRIPTION: &str = "{}";
"#,
        package_field(pkg, "name", "pecc-tracker"),
        package_field(pkg, "version", "0.0.0"),
        package_field(pkg, "description", ""),
    );

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    fs::write(Path::new(&out_dir).join("pkg_info.rs"), contents).expect("Failed to write pkg_info.rs");
}
