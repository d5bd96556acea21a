use std::{
    process::Command,
    time::{SystemTime, UNIX_EPOCH},
};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=LNK_RUN_CROSS_WINDOWS_TESTS");

    println!("cargo::rustc-check-cfg=cfg(lnk_skip_cross_windows_tests)");

    // Junction tests only make sense on a real Windows host.
    let host = std::env::var("HOST").unwrap_or_default();
    let target = std::env::var("TARGET").unwrap_or_default();
    let enable_cross_windows_tests = std::env::var("LNK_RUN_CROSS_WINDOWS_TESTS").is_ok();

    if !enable_cross_windows_tests && target.contains("windows") && !host.contains("windows") {
        println!("cargo:rustc-cfg=lnk_skip_cross_windows_tests");
    }

    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output();

    let version = match output {
        Ok(o) if o.status.success() => {
            let git_output = String::from_utf8(o.stdout)
                .unwrap_or_default()
                .trim()
                .to_string();

            let version = git_output.strip_prefix('v').unwrap_or(&git_output);

            if version.ends_with("-dirty") || version.is_empty() {
                format!("{}-{}", version, timestamp())
            } else {
                version.to_string()
            }
        }
        _ => format!("{}-unknown-{}", env!("CARGO_PKG_VERSION"), timestamp()),
    };

    println!("cargo:rustc-env=LNK_VERSION={}", version);
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
