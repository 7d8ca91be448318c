pub mod device;
pub mod directory;
pub mod snapshot;

pub use device::{DeviceTarget, Platform};
pub use directory::{DeviceDirectory, DirectoryError, FileDirectory, MemoryDirectory};
pub use snapshot::{SensorPayload, SensorSnapshot, DEFAULT_STATION_LABEL};
