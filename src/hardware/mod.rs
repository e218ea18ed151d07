// ハードウェア層 (取得アダプタとリレー制御)
#[cfg(feature = "esp")]
pub mod fixture;
#[cfg(feature = "esp")]
pub mod relays;

// Mock実装(テストとnon-espビルドで使用可能)
#[cfg(not(feature = "esp"))]
pub mod mock;
