use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DraftSection {
    key_prefix: String,
    index_key: String,
    autosave_debounce_ms: u64,
    saved_notice_ms: u64,
    storage_backend: String,
}

#[derive(Debug, Deserialize)]
struct WindowSection {
    id_prefix: String,
    normal_width_ratio: f64,
    normal_height_ratio: f64,
    min_width: i32,
    min_height: i32,
}

#[derive(Debug, Deserialize)]
struct WindowManagerFile {
    schema_version: u32,
    drafts: DraftSection,
    windows: WindowSection,
}

fn storage_backend_variant(raw: &str) -> &'static str {
    match raw {
        "browser" => "Browser",
        "memory" => "Memory",
        "disabled" => "Disabled",
        other => panic!("unknown storage_backend `{other}`: expected browser, memory or disabled"),
    }
}

fn check_ratio(name: &str, value: f64) {
    if !(value > 0.0 && value <= 1.0) {
        panic!("{name} must be in (0, 1], found {value}");
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("window_manager.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let config: WindowManagerFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));

    if config.schema_version != 1 {
        panic!(
            "window manager config schema mismatch in {}: expected 1 found {}",
            path.display(),
            config.schema_version
        );
    }
    if config.drafts.autosave_debounce_ms == 0 {
        panic!("drafts.autosave_debounce_ms must be positive");
    }
    if config.drafts.key_prefix.is_empty() || config.drafts.index_key.is_empty() {
        panic!("draft storage keys must not be empty");
    }
    if config.drafts.index_key == config.drafts.key_prefix {
        panic!("drafts.index_key must differ from drafts.key_prefix");
    }
    if config.windows.id_prefix.is_empty() {
        panic!("windows.id_prefix must not be empty");
    }
    check_ratio("windows.normal_width_ratio", config.windows.normal_width_ratio);
    check_ratio("windows.normal_height_ratio", config.windows.normal_height_ratio);
    if config.windows.min_width <= 0 || config.windows.min_height <= 0 {
        panic!("windows.min_width and windows.min_height must be positive");
    }

    let backend = storage_backend_variant(&config.drafts.storage_backend);
    let generated = format!(
        "/// Draft record key prefix from `window_manager.toml`.\n\
pub const DEFAULT_DRAFT_KEY_PREFIX: &str = {key_prefix:?};\n\
/// Draft index key from `window_manager.toml`.\n\
pub const DEFAULT_DRAFT_INDEX_KEY: &str = {index_key:?};\n\
/// Autosave debounce in milliseconds.\n\
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = {debounce};\n\
/// How long the \"Draft saved\" notice stays visible, in milliseconds.\n\
pub const DEFAULT_DRAFT_SAVED_NOTICE_MS: u64 = {notice};\n\
/// Storage backend selected at build time.\n\
pub const DEFAULT_STORAGE_BACKEND: platform_host::StorageBackend = platform_host::StorageBackend::{backend};\n\
/// Prefix for generated window ids.\n\
pub const DEFAULT_WINDOW_ID_PREFIX: &str = {id_prefix:?};\n\
/// Normal window width as a fraction of the viewport.\n\
pub const DEFAULT_NORMAL_WIDTH_RATIO: f64 = {width_ratio:?};\n\
/// Normal window height as a fraction of the viewport.\n\
pub const DEFAULT_NORMAL_HEIGHT_RATIO: f64 = {height_ratio:?};\n\
/// Minimum normal window width in CSS pixels.\n\
pub const DEFAULT_MIN_WINDOW_WIDTH: i32 = {min_width};\n\
/// Minimum normal window height in CSS pixels.\n\
pub const DEFAULT_MIN_WINDOW_HEIGHT: i32 = {min_height};\n",
        key_prefix = config.drafts.key_prefix,
        index_key = config.drafts.index_key,
        debounce = config.drafts.autosave_debounce_ms,
        notice = config.drafts.saved_notice_ms,
        backend = backend,
        id_prefix = config.windows.id_prefix,
        width_ratio = config.windows.normal_width_ratio,
        height_ratio = config.windows.normal_height_ratio,
        min_width = config.windows.min_width,
        min_height = config.windows.min_height,
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("window_manager_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
