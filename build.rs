use std::{collections::BTreeSet, env};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-env=KEYFETCH_FEATURES={}", enabled_features().join(","));
}

/// Names of the crate features enabled for this build, sorted so the string
/// is stable between builds.
fn enabled_features() -> Vec<String> {
    env::vars()
        .filter(|(_, value)| value == "1")
        .filter_map(|(name, _)| {
            name.strip_prefix("CARGO_FEATURE_")
                .map(|feature| feature.to_lowercase().replace('_', "-"))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
