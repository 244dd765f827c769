use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::asset::Asset;

const MODULE_HEADER: &str = "import type { MilitaryAsset } from '../types';\n\n\
export const MOCK_ASSETS: MilitaryAsset[] = ";

/// Render the generated TypeScript data module.
pub fn render_module(assets: &[Asset]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(assets)?;
    Ok(format!("{}{};", MODULE_HEADER, escape_non_ascii(&json)))
}

/// Write the module to `path`. Parent directories must exist.
pub fn write_module(path: &Path, assets: &[Asset]) -> Result<()> {
    let content = render_module(assets)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// `\uXXXX`-escape everything outside ASCII (surrogate pairs above the BMP).
/// Non-ASCII only ever occurs inside JSON strings, where the escape is valid.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut buf = [0u16; 2];
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}
