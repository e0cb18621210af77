use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};
use std::process::Command;

/// ワークスペース内の cdylib パッケージをビルドし、生成されたアーカイブのパスを返す
///
/// 外側の `cargo test` とロックを取り合わないよう、target dir は機能セットごとに分ける。
pub fn build_archive(package: &str, features: &[&str]) -> PathBuf {
    let mut target_name = package.to_string();
    for feature in features {
        target_name.push('-');
        target_name.push_str(feature);
    }
    let target_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(target_name);

    let mut cargo = Command::new(env!("CARGO"));
    cargo
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["build", "--quiet", "-p", package, "--target-dir"])
        .arg(&target_dir);
    if !features.is_empty() {
        cargo.arg("--features").arg(features.join(","));
    }
    let status = cargo.status().unwrap();
    assert!(status.success(), "cargo build -p {package} failed: {status}");

    let file_name = format!("{DLL_PREFIX}{}{DLL_SUFFIX}", package.replace('-', "_"));
    let archive = target_dir.join("debug").join(file_name);
    assert!(archive.exists(), "missing archive {}", archive.display());
    archive
}
