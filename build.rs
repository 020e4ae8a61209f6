//! Build script for DrinkNow
//!
//! Embeds a build number and UTC timestamp. CI can pin the number with
//! `DRINKNOW_BUILD_NUMBER`; local builds count up in `OUT_DIR`.

use std::env;
use std::fs;
use std::path::PathBuf;

fn next_local_build() -> u64 {
    let Some(out_dir) = env::var_os("OUT_DIR") else {
        return 0;
    };
    let counter = PathBuf::from(out_dir).join("build_number.txt");

    let previous: u64 = fs::read_to_string(&counter)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = previous + 1;

    if let Err(e) = fs::write(&counter, next.to_string()) {
        println!("cargo:warning=could not persist build number: {}", e);
    }
    next
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=DRINKNOW_BUILD_NUMBER");

    let build = env::var("DRINKNOW_BUILD_NUMBER")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(next_local_build);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=DRINKNOW_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=DRINKNOW_BUILD_TIMESTAMP={}", timestamp);
}
