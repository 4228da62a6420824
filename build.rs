//! Embeds the compiler version into the binary.

use std::env;
use std::process::Command;

fn main() {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map_or_else(|| "rustc (unknown)".to_string(), |v| v.trim().to_string());

    println!("cargo:rustc-env=WEBSERVER_RUSTC_VERSION={version}");
    println!("cargo:rerun-if-changed=build.rs");
}
