//! Firmware package records and the location of their staged images.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownPackageKind;

/// The kinds of firmware packages an update can deliver.
///
/// Each kind stores its image under a different file name field of the
/// [`FirmwareRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Main controller image, named by [`FirmwareRecord::main_filename`].
    Cp970,
    /// Wired module image, named by [`FirmwareRecord::wire_filename`].
    Inf267Rs,
    /// Wireless module image, named by [`FirmwareRecord::wireless_filename`].
    Inf260Z,
}

impl PackageKind {
    /// All known package kinds.
    pub const ALL: [PackageKind; 3] = [Self::Cp970, Self::Inf267Rs, Self::Inf260Z];

    /// The canonical lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cp970 => "cp970",
            Self::Inf267Rs => "inf267rs",
            Self::Inf260Z => "inf260z",
        }
    }

    /// Selects the file name this kind uses from `record`.
    pub fn file_name<'r>(&self, record: &'r FirmwareRecord) -> Option<&'r str> {
        let name = match self {
            Self::Cp970 => record.main_filename.as_deref(),
            Self::Inf267Rs => record.wire_filename.as_deref(),
            Self::Inf260Z => record.wireless_filename.as_deref(),
        };

        name.filter(|name| !name.is_empty())
    }
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageKind {
    type Err = UnknownPackageKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase().replace(['-', '_'], "")[..] {
            "cp970" => Ok(Self::Cp970),
            "inf267rs" => Ok(Self::Inf267Rs),
            "inf260z" => Ok(Self::Inf260Z),
            _ => Err(UnknownPackageKind(s.to_string())),
        }
    }
}

/// The metadata of a received firmware update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirmwareRecord {
    /// Which package this update carries.
    pub kind: PackageKind,
    /// The checksum announced for the image. `0` means no checksum was received.
    #[serde(default)]
    pub total_crc: u32,
    #[serde(default)]
    pub main_filename: Option<String>,
    #[serde(default)]
    pub wire_filename: Option<String>,
    #[serde(default)]
    pub wireless_filename: Option<String>,
}

impl FirmwareRecord {
    /// Creates a record carrying a single file name in the field `kind` uses.
    pub fn new(kind: PackageKind, total_crc: u32, file_name: impl Into<String>) -> Self {
        let mut record = Self {
            kind,
            total_crc,
            main_filename: None,
            wire_filename: None,
            wireless_filename: None,
        };

        let file_name = Some(file_name.into());
        match kind {
            PackageKind::Cp970 => record.main_filename = file_name,
            PackageKind::Inf267Rs => record.wire_filename = file_name,
            PackageKind::Inf260Z => record.wireless_filename = file_name,
        }

        record
    }

    /// The file name of the image this record refers to.
    pub fn file_name(&self) -> Option<&str> {
        self.kind.file_name(self)
    }

    /// The announced checksum, if one was received.
    pub fn reference_crc(&self) -> Option<u32> {
        (self.total_crc != 0).then_some(self.total_crc)
    }
}

/// Where staged images are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StagingLayout {
    /// Directory the images are downloaded to.
    pub root: PathBuf,
    /// Extension appended to the file name from the record.
    pub extension: String,
}

impl Default for StagingLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/root"),
            extension: "dat".to_string(),
        }
    }
}

impl StagingLayout {
    /// A layout storing `<file_name>.<extension>` images under `root`.
    ///
    /// A leading dot on `extension` is ignored, an empty one means no extension.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// The path of the staged image called `file_name`.
    pub fn image_path(&self, file_name: &str) -> PathBuf {
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() {
            self.root.join(file_name)
        } else {
            self.root.join(format!("{file_name}.{extension}"))
        }
    }
}
