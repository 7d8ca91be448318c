use crate::device::DeviceTarget;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;
use tracing::debug;

/// 设备目录错误
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to read device file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid device file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 设备目录
///
/// 提供需要推送的活跃设备，存储由外部系统负责。
pub trait DeviceDirectory: Send + Sync {
    /// 获取活跃设备；指定站点时只返回订阅该站点的设备
    fn active_targets(&self, station_id: Option<&str>) -> Vec<DeviceTarget>;

    /// 按 token 查找活跃设备
    fn find_active(&self, token: &str) -> Option<DeviceTarget> {
        self.active_targets(None)
            .into_iter()
            .find(|d| d.token == token)
    }
}

fn select(devices: &[DeviceTarget], station_id: Option<&str>) -> Vec<DeviceTarget> {
    devices
        .iter()
        .filter(|d| d.is_active)
        .filter(|d| match station_id {
            Some(station) => d.station_id.as_deref() == Some(station),
            None => true,
        })
        .cloned()
        .collect()
}

/// 内存设备目录
#[derive(Default)]
pub struct MemoryDirectory {
    devices: RwLock<Vec<DeviceTarget>>,
}

impl MemoryDirectory {
    pub fn new(devices: Vec<DeviceTarget>) -> Self {
        Self {
            devices: RwLock::new(devices),
        }
    }

    /// 注册或更新设备（按 token 去重）
    pub fn upsert(&self, device: DeviceTarget) {
        let mut devices = self.devices.write().unwrap_or_else(|e| e.into_inner());
        match devices.iter_mut().find(|d| d.token == device.token) {
            Some(existing) => *existing = device,
            None => devices.push(device),
        }
    }

    /// 停用设备
    pub fn deactivate(&self, token: &str) -> bool {
        let mut devices = self.devices.write().unwrap_or_else(|e| e.into_inner());
        match devices.iter_mut().find(|d| d.token == token) {
            Some(device) => {
                device.is_active = false;
                true
            }
            None => false,
        }
    }
}

impl DeviceDirectory for MemoryDirectory {
    fn active_targets(&self, station_id: Option<&str>) -> Vec<DeviceTarget> {
        let devices = self.devices.read().unwrap_or_else(|e| e.into_inner());
        select(&devices, station_id)
    }
}

/// JSON 文件设备目录（文件内容为设备数组）
pub struct FileDirectory {
    devices: Vec<DeviceTarget>,
}

impl FileDirectory {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let devices: Vec<DeviceTarget> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), count = devices.len(), "Device file loaded");

        Ok(Self { devices })
    }
}

impl DeviceDirectory for FileDirectory {
    fn active_targets(&self, station_id: Option<&str>) -> Vec<DeviceTarget> {
        select(&self.devices, station_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Platform;
    use std::fs;
    use tempfile::tempdir;

    fn sample_devices() -> Vec<DeviceTarget> {
        vec![
            DeviceTarget::new("token-1", Platform::Ios, "com.example.app")
                .with_station("mombarone"),
            DeviceTarget::new("token-2", Platform::Watchos, "com.example.app.watch")
                .with_station("mombarone")
                .deactivated(),
            DeviceTarget::new("token-3", Platform::Ios, "com.example.app").with_station("oropa"),
            DeviceTarget::new("token-4", Platform::Ios, "com.example.app"),
        ]
    }

    #[test]
    fn test_active_targets_skip_inactive() {
        let directory = MemoryDirectory::new(sample_devices());
        let tokens: Vec<_> = directory
            .active_targets(None)
            .into_iter()
            .map(|d| d.token)
            .collect();

        assert_eq!(tokens, vec!["token-1", "token-3", "token-4"]);
    }

    #[test]
    fn test_active_targets_by_station() {
        let directory = MemoryDirectory::new(sample_devices());
        let targets = directory.active_targets(Some("mombarone"));

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].token, "token-1");
    }

    #[test]
    fn test_upsert_and_deactivate() {
        let directory = MemoryDirectory::default();
        directory.upsert(DeviceTarget::new("t", Platform::Ios, "a"));
        directory.upsert(DeviceTarget::new("t", Platform::Ios, "b"));

        let targets = directory.active_targets(None);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].bundle_id, "b");

        assert!(directory.deactivate("t"));
        assert!(!directory.deactivate("missing"));
        assert!(directory.find_active("t").is_none());
    }

    #[test]
    fn test_file_directory() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("devices.json");
        fs::write(&path, serde_json::to_string(&sample_devices()).unwrap()).unwrap();

        let directory = FileDirectory::load(&path).unwrap();
        assert_eq!(directory.active_targets(None).len(), 3);
        assert!(directory.find_active("token-2").is_none());
        assert!(directory.find_active("token-3").is_some());
    }

    #[test]
    fn test_file_directory_missing_file() {
        let temp_dir = tempdir().unwrap();
        let result = FileDirectory::load(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(DirectoryError::Io { .. })));
    }
}
