fn main() {
    // ESP-IDFツールチェーン環境はespフィーチャー有効時のみ展開する
    if std::env::var_os("CARGO_FEATURE_ESP").is_some() {
        embuild::espidf::sysenv::output();
    }
}
