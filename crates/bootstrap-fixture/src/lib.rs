//! bootstrap-fixture
//!
//! アーカイブ読み込みの失敗系を確かめるための cdylib。`bootstrap-core` には依存しない。
//! - 既定: `bootstrap_abi_version` を export しない
//! - `abi-mismatch`: 一致しない ABI バージョンを export する

#[unsafe(no_mangle)]
pub fn bootstrap_fixture_marker() -> u32 {
    0
}

#[cfg(feature = "abi-mismatch")]
#[unsafe(no_mangle)]
pub fn bootstrap_abi_version() -> u32 {
    u32::MAX
}
