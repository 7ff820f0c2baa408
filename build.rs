use chrono::Utc;

fn main() {
    // Exposed as `pcbkit::BUILD_DATE` and printed by `pcbkit --version`.
    let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    println!("cargo:rustc-env=BUILD_DATE={stamp}");
}
