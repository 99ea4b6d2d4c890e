//! Test fixtures for integration tests
//!
//! Captured `ffmpeg -i` diagnostics and a fake inspector serving them, so
//! whole builds run without ffmpeg or real media.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::config::BuilderConfig;
use crate::error::InspectError;
use crate::probe::MediaInspector;

pub const AV1_1080P30: &str = "\
ffmpeg version 6.1.1 Copyright (c) 2000-2023 the FFmpeg developers
  built with Apple clang version 15.0.0 (clang-1500.1.0.2.5)
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'media/av1/grain_fd1.mp4':
  Metadata:
    major_brand     : isom
    minor_version   : 512
    compatible_brands: isomav01iso2mp41
    encoder         : Lavf60.16.100
  Duration: 00:00:10.00, start: 0.000000, bitrate: 2411 kb/s
  Stream #0:0[0x1](und): Video: av1 (libdav1d) (Main) (av01 / 0x31307661), yuv420p(tv, progressive), 1920x1080, 2408 kb/s, 30 fps, 30 tbr, 15360 tbn (default)
    Metadata:
      handler_name    : VideoHandler
      vendor_id       : [0][0][0][0]
At least one output file must be specified
";

pub const VP9_720P2997: &str = "\
Input #0, matroska,webm, from 'media/vp9/street.webm':
  Metadata:
    ENCODER         : Lavf59.27.100
  Duration: 00:01:02.50, start: 0.000000, bitrate: 1024 kb/s
  Stream #0:0(eng): Video: vp9 (Profile 0), yuv420p(tv, bt709), 1280x720, SAR 1:1 DAR 16:9, 29.97 fps, 29.97 tbr, 1k tbn (default)
    Metadata:
      DURATION        : 00:01:02.502000000
At least one output file must be specified
";

pub const VVC_2160P5994: &str = "\
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'media/vvc/hdr.mp4':
  Duration: 00:00:05.04, start: 0.000000, bitrate: 900 kb/s
  Stream #0:0[0x1](und): Video: vvc (Main 10) (vvc1 / 0x31637676), yuv420p10le(tv), 3840x2160, 850 kb/s, 59.94 fps, 59.94 tbr, 60k tbn (default)
At least one output file must be specified
";

pub const H264_480P: &str = "\
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'media/h264/legacy.mp4':
  Duration: 00:00:03.00, start: 0.000000, bitrate: 512 kb/s
  Stream #0:0[0x1](und): Video: h264 (High) (avc1 / 0x31637661), yuv420p(progressive), 640x480 [SAR 1:1 DAR 4:3], 500 kb/s, 25 fps, 25 tbr, 12800 tbn (default)
At least one output file must be specified
";

/// Serves captured diagnostics by file name; unknown files behave like a
/// missing ffmpeg binary.
#[derive(Debug, Default)]
pub struct FakeInspector {
    outputs: HashMap<String, &'static str>,
}

impl FakeInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: &str, diagnostics: &'static str) -> Self {
        self.outputs.insert(file_name.to_string(), diagnostics);
        self
    }
}

impl MediaInspector for FakeInspector {
    fn inspect(&self, path: &Path) -> Result<String, InspectError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.outputs
            .get(&name)
            .map(|text| text.to_string())
            .ok_or_else(|| InspectError::Spawn {
                program: "fake-ffmpeg".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no fixture"),
            })
    }
}

/// A temporary input folder with a `media/` tree
pub struct TestFolder {
    pub dir: TempDir,
}

impl TestFolder {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::create_dir(dir.path().join("media")).expect("create media dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a fake media file below `media/` with deterministic content.
    pub fn add_media(&self, rel: &str, size: usize, seed: u8) -> PathBuf {
        let path = self.root().join("media").join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let data: Vec<u8> = (0..size).map(|i| seed.wrapping_add((i % 251) as u8)).collect();
        std::fs::write(&path, data).unwrap();
        path
    }

    pub fn config(&self) -> BuilderConfig {
        BuilderConfig::for_folder(self.root()).expect("resolve config")
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.root().join("manifests")
    }

    pub fn read_json(&self, rel: &str) -> Value {
        let bytes = std::fs::read(self.root().join(rel)).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Sorted file names in the manifest folder
    pub fn manifest_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.manifest_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// The standard four-codec fixture set
pub fn standard_media(folder: &TestFolder) -> FakeInspector {
    folder.add_media("av1/grain_fd1.mp4", 20_000, 1);
    folder.add_media("vp9/street.webm", 12_345, 2);
    folder.add_media("vvc/hdr.mp4", 9_000, 3);
    folder.add_media("h264/legacy.mp4", 4_096, 4);
    FakeInspector::new()
        .with("grain_fd1.mp4", AV1_1080P30)
        .with("street.webm", VP9_720P2997)
        .with("hdr.mp4", VVC_2160P5994)
        .with("legacy.mp4", H264_480P)
}

/// Remove `keys` at every depth of a JSON tree.
pub fn strip_keys(value: &mut Value, keys: &[&str]) {
    match value {
        Value::Object(map) => {
            map.retain(|k, _| !keys.contains(&k.as_str()));
            for v in map.values_mut() {
                strip_keys(v, keys);
            }
        }
        Value::Array(items) => {
            for v in items {
                strip_keys(v, keys);
            }
        }
        _ => {}
    }
}
