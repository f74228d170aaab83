use std::fs;
use std::path::PathBuf;

const SCHEMA_VERSION: i64 = 1;

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("redirect.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let mut table: toml::Table = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));

    match table.remove("schema_version") {
        Some(toml::Value::Integer(SCHEMA_VERSION)) => {}
        other => panic!(
            "config schema mismatch in {}: expected {SCHEMA_VERSION} found {other:?}",
            path.display()
        ),
    }

    for (key, value) in &table {
        if key.ends_with("_ms") || key.ends_with("_days") {
            match value.as_integer() {
                Some(number) if number >= 0 && number <= i64::from(u32::MAX) => {}
                _ => panic!("{key} in {} must be a non-negative u32", path.display()),
            }
        }
    }

    let json = serde_json::to_string_pretty(&table).expect("serialize redirect config");
    let generated = format!(
        "/// Build-time generated redirect configuration JSON.\n\
pub const REDIRECT_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("redirect_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
