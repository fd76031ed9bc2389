//! # Application Dependencies / 应用依赖
//!
//! This module defines the dependency grouping for use case construction.
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use at_core::ports::*;
use std::sync::Arc;

/// Device info dependency grouping (non-Builder, just parameter grouping)
/// 设备信息依赖分组（非 Builder，仅参数打包）
pub struct DeviceInfoDeps {
    // Persistence / 持久化
    pub store: Arc<dyn KeyValueStorePort>,

    // Platform / 平台
    pub identity_source: Arc<dyn PlatformIdentitySource>,
    pub id_generator: Arc<dyn IdGeneratorPort>,

    /// Keychain-style mirror of the device id. `None` disables mirroring.
    /// 设备 ID 的安全存储镜像，`None` 表示禁用。
    pub secure_storage: Option<Arc<dyn SecureStoragePort>>,
}
