use shadow_rs::ShadowBuilder;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Version metadata for `users-api --version` and the default User-Agent
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
