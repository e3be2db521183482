fn main() {
    // Release packaging may stamp a distribution version; otherwise the
    // crate version is reported.
    let version = std::env::var("TMPFILES_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());
    println!("cargo:rustc-env=TMPFILES_VERSION={version}");
    println!("cargo:rerun-if-env-changed=TMPFILES_VERSION");
}
