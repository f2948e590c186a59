use std::env;

fn main() {
    let version = env::var("DIFFSCOPE_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_default();
    println!("cargo:rerun-if-env-changed=DIFFSCOPE_VERSION");
    println!("cargo:rustc-env=DIFFSCOPE_VERSION={version}");
}
