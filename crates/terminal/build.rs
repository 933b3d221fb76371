//! Build script for the terminal crate.
//!
//! Fingerprints the stylesheet so the screen can reference it by a
//! content-addressed filename.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    fingerprint_css();
}

/// Copy `static/css/main.css` to `static/css/derived/main.<hash>.css`.
///
/// Sets `CSS_HASH` for use with `env!("CSS_HASH")`.
fn fingerprint_css() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest);

    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    let derived_dir = Path::new(&manifest_dir).join("static/css/derived");
    let copied = fs::create_dir_all(&derived_dir)
        .and_then(|()| fs::copy(&css_path, derived_dir.join(format!("main.{short_hash}.css"))));
    if let Err(e) = copied {
        println!("cargo:warning=Could not write fingerprinted main.css: {e}");
    }
}
