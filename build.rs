use std::env;

/// Values injected by the release tooling, re-exported to the crate as
/// `BUILDINFO_<NAME>`.
const INJECTED: [&str; 9] = [
    "VERSION",
    "BUILD_ID",
    "CHANGE",
    "COMMIT_MSG",
    "CURRENT_COMMIT",
    "BUILD_TIME",
    "NEW_BUILD_URL",
    "OLD_BUILD_URL",
    "TAG",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    vergen::EmitBuilder::builder()
        .build_timestamp()
        .all_git()
        .emit()?;

    for name in INJECTED {
        println!("cargo:rerun-if-env-changed={name}");
        if let Ok(value) = env::var(name) {
            // rustc-env values are line based
            let value = value.lines().next().unwrap_or_default();
            println!("cargo:rustc-env=BUILDINFO_{name}={value}");
        }
    }

    Ok(())
}
