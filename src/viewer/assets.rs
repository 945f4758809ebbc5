//! Asset registry for the headless viewer.
//!
//! Only the container is checked (glb header or glTF JSON `asset` block);
//! decoding meshes and materials is the renderer's business.

use std::path::Path;

use serde::Serialize;

use crate::error::ScrollError;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_HEADER_LEN: usize = 12;

/// Container format of a loaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetFormat {
    /// Binary glTF.
    Glb,
    /// JSON glTF.
    Gltf,
}

/// A successfully loaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetInfo {
    /// Path it was loaded from.
    pub path: String,
    /// Container format.
    pub format: AssetFormat,
    /// Size of the file in bytes.
    pub byte_len: usize,
}

/// Assets added to the scene, in load order.
#[derive(Debug, Clone, Default)]
pub struct AssetManager {
    assets: Vec<AssetInfo>,
}

impl AssetManager {
    /// Load a `.glb` or `.gltf` file into the scene.
    ///
    /// An empty path or unsupported extension is a configuration error; a
    /// missing, unreadable or malformed file is an asset load error.
    pub fn add_from_path(&mut self, path: impl AsRef<Path>) -> Result<&AssetInfo, ScrollError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if display.is_empty() {
            return Err(ScrollError::config("asset path is empty"));
        }
        let format = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("glb") => AssetFormat::Glb,
            Some("gltf") => AssetFormat::Gltf,
            _ => {
                return Err(ScrollError::config(format!(
                    "unsupported asset type: {display}"
                )))
            }
        };

        let bytes = std::fs::read(path)
            .map_err(|e| ScrollError::asset(&display, e.to_string()))?;
        match format {
            AssetFormat::Glb => check_glb(&bytes),
            AssetFormat::Gltf => check_gltf(&bytes),
        }
        .map_err(|reason| ScrollError::asset(&display, reason))?;

        log::info!("loaded asset {display} ({} bytes)", bytes.len());
        self.assets.push(AssetInfo {
            path: display,
            format,
            byte_len: bytes.len(),
        });
        Ok(&self.assets[self.assets.len() - 1])
    }

    /// Loaded assets.
    #[must_use]
    pub fn assets(&self) -> &[AssetInfo] {
        &self.assets
    }
}

fn check_glb(bytes: &[u8]) -> Result<(), String> {
    if bytes.len() < GLB_HEADER_LEN {
        return Err(format!("file too short for a glb header ({} bytes)", bytes.len()));
    }
    if &bytes[0..4] != GLB_MAGIC {
        return Err("missing glTF magic".to_owned());
    }
    let word = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    let version = word(4);
    if version != 2 {
        return Err(format!("unsupported glb version {version}"));
    }
    let declared = word(8) as usize;
    if declared > bytes.len() {
        return Err(format!(
            "truncated: header declares {declared} bytes, file has {}",
            bytes.len()
        ));
    }
    Ok(())
}

fn check_gltf(bytes: &[u8]) -> Result<(), String> {
    let doc: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| format!("invalid JSON: {e}"))?;
    match doc.get("asset").and_then(|a| a.get("version")).and_then(|v| v.as_str()) {
        Some(_) => Ok(()),
        None => Err("missing asset.version".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scrollcam-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn glb(version: u32, declared: u32, total: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(total);
        bytes.extend_from_slice(GLB_MAGIC);
        bytes.extend_from_slice(&version.to_le_bytes());
        bytes.extend_from_slice(&declared.to_le_bytes());
        bytes.resize(total, 0);
        bytes
    }

    #[test]
    fn loads_valid_glb() {
        let path = scratch("ok.glb", &glb(2, 20, 20));
        let mut manager = AssetManager::default();
        let info = manager.add_from_path(&path).unwrap();
        assert_eq!(info.format, AssetFormat::Glb);
        assert_eq!(info.byte_len, 20);
        assert_eq!(manager.assets().len(), 1);
    }

    #[test]
    fn loads_valid_gltf() {
        let path = scratch("ok.gltf", br#"{"asset": {"version": "2.0"}, "scenes": []}"#);
        let mut manager = AssetManager::default();
        assert_eq!(manager.add_from_path(&path).unwrap().format, AssetFormat::Gltf);
    }

    #[test]
    fn malformed_files_are_asset_errors() {
        let mut manager = AssetManager::default();
        for (name, bytes) in [
            ("short.glb", vec![1, 2, 3]),
            ("magic.glb", b"nopenopenope".to_vec()),
            ("v1.glb", glb(1, 12, 12)),
            ("truncated.glb", glb(2, 100, 16)),
            ("bad.gltf", b"{not json".to_vec()),
            ("noversion.gltf", br#"{"asset": {}}"#.to_vec()),
        ] {
            let path = scratch(name, &bytes);
            assert!(
                matches!(manager.add_from_path(&path), Err(ScrollError::AssetLoad { .. })),
                "{name}"
            );
        }
        assert!(manager.assets().is_empty());
    }

    #[test]
    fn missing_file_is_asset_error() {
        let mut manager = AssetManager::default();
        let err = manager.add_from_path("/definitely/not/here/scene.glb").unwrap_err();
        assert!(matches!(err, ScrollError::AssetLoad { .. }));
    }

    #[test]
    fn bad_paths_are_configuration_errors() {
        let mut manager = AssetManager::default();
        assert!(matches!(manager.add_from_path(""), Err(ScrollError::Configuration(_))));
        assert!(matches!(
            manager.add_from_path("scene.obj"),
            Err(ScrollError::Configuration(_))
        ));
    }
}
