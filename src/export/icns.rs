//! macOS `.icns` packaging through an `.iconset` staging directory.
//!
//! The iconset is written into a [`tempfile::TempDir`], so the directory is
//! removed when the guard drops: after success, after a packager failure and
//! when the packaging tool is not installed at all.
//!
//! Only the packaging tool is best effort. Failing to stage the iconset is an
//! [`ExportError`] like any other disk write.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::save_png;
use crate::error::ExportError;
use crate::icon::IconImage;

/// Result of the best-effort container step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    /// The container was written to this path.
    Created(PathBuf),
    /// The packaging executable is not installed.
    ToolMissing,
    /// The packaging tool ran and failed; the reason is for display only.
    Failed(String),
}

impl PackageOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, PackageOutcome::Created(_))
    }
}

impl fmt::Display for PackageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageOutcome::Created(path) => write!(f, "created {}", path.display()),
            PackageOutcome::ToolMissing => f.write_str("packaging tool not available"),
            PackageOutcome::Failed(reason) => write!(f, "packaging failed: {reason}"),
        }
    }
}

/// Turns a populated `.iconset` directory into a single container file.
pub trait IcnsPackager {
    fn package(&self, iconset: &Path, output: &Path) -> PackageOutcome;
}

/// Runs Apple's `iconutil -c icns <iconset> -o <output>`.
#[derive(Debug, Clone)]
pub struct IconUtil {
    program: OsString,
}

impl IconUtil {
    pub fn new() -> Self {
        Self::with_program("iconutil")
    }

    /// Uses a different executable with the same command line.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for IconUtil {
    fn default() -> Self {
        Self::new()
    }
}

impl IcnsPackager for IconUtil {
    fn package(&self, iconset: &Path, output: &Path) -> PackageOutcome {
        let status = Command::new(&self.program)
            .arg("-c")
            .arg("icns")
            .arg(iconset)
            .arg("-o")
            .arg(output)
            .status();

        match status {
            Ok(status) if status.success() => PackageOutcome::Created(output.to_path_buf()),
            Ok(status) => PackageOutcome::Failed(format!(
                "{} exited with {status}",
                self.program.to_string_lossy()
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => PackageOutcome::ToolMissing,
            Err(e) => PackageOutcome::Failed(e.to_string()),
        }
    }
}

/// File name of one iconset entry, e.g. `icon_16x16@2x.png`.
pub fn iconset_name(size: u32, double: bool) -> String {
    if double {
        format!("icon_{size}x{size}@2x.png")
    } else {
        format!("icon_{size}x{size}.png")
    }
}

/// Writes the iconset for `master` into `dir`.
///
/// Every base size gets a 1x entry; sizes up to `double_max` also get a
/// double-density entry.
pub fn write_iconset(
    master: &IconImage,
    sizes: &[u32],
    double_max: u32,
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for &size in sizes {
        let path = dir.join(iconset_name(size, false));
        save_png(&master.resampled(size, 1.0), &path)?;
        written.push(path);

        if size <= double_max {
            let path = dir.join(iconset_name(size, true));
            save_png(&master.resampled(size * 2, 2.0), &path)?;
            written.push(path);
        }
    }
    Ok(written)
}

/// Stages the iconset in a temporary directory under `staging_root` and runs
/// `packager` on it.
///
/// Staging errors are returned; the packager's result is passed through as
/// a [`PackageOutcome`].
pub fn build_icns(
    master: &IconImage,
    sizes: &[u32],
    double_max: u32,
    packager: &dyn IcnsPackager,
    staging_root: &Path,
    output: &Path,
) -> Result<PackageOutcome, ExportError> {
    let staging = tempfile::Builder::new()
        .prefix("focusflow")
        .suffix(".iconset")
        .tempdir_in(staging_root)
        .map_err(|source| ExportError::CreateDir {
            path: staging_root.to_path_buf(),
            source,
        })?;
    log::debug!("staging iconset in {}", staging.path().display());

    write_iconset(master, sizes, double_max, staging.path())?;
    Ok(packager.package(staging.path(), output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::cell::RefCell;

    /// Records what it was asked to package, then reports `outcome`.
    struct Recorder {
        outcome: PackageOutcome,
        seen: RefCell<Option<(PathBuf, Vec<String>)>>,
    }

    impl Recorder {
        fn new(outcome: PackageOutcome) -> Self {
            Self {
                outcome,
                seen: RefCell::new(None),
            }
        }
    }

    impl IcnsPackager for Recorder {
        fn package(&self, iconset: &Path, _output: &Path) -> PackageOutcome {
            let mut names: Vec<String> = std::fs::read_dir(iconset)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            *self.seen.borrow_mut() = Some((iconset.to_path_buf(), names));
            self.outcome.clone()
        }
    }

    fn master() -> IconImage {
        IconImage::new(RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 255])), 1.0)
    }

    #[test]
    fn iconset_naming() {
        assert_eq!(iconset_name(16, false), "icon_16x16.png");
        assert_eq!(iconset_name(512, true), "icon_512x512@2x.png");
    }

    #[test]
    fn staging_contents_and_cleanup_on_failure() {
        let out = tempfile::tempdir().unwrap();
        let recorder = Recorder::new(PackageOutcome::Failed("boom".into()));

        let outcome = build_icns(
            &master(),
            &[16, 32, 64],
            32,
            &recorder,
            out.path(),
            &out.path().join("icon.icns"),
        )
        .unwrap();
        assert_eq!(outcome, PackageOutcome::Failed("boom".into()));

        let (dir, names) = recorder.seen.into_inner().unwrap();
        assert!(dir.to_string_lossy().ends_with(".iconset"));
        assert_eq!(
            names,
            vec![
                "icon_16x16.png",
                "icon_16x16@2x.png",
                "icon_32x32.png",
                "icon_32x32@2x.png",
                "icon_64x64.png",
            ]
        );
        assert!(!dir.exists(), "staging directory should be removed");
    }

    #[test]
    fn staging_cleanup_on_success() {
        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("icon.icns");
        let recorder = Recorder::new(PackageOutcome::Created(target.clone()));

        let outcome = build_icns(&master(), &[16], 16, &recorder, out.path(), &target).unwrap();
        assert!(outcome.is_created());

        let (dir, _) = recorder.seen.into_inner().unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn missing_tool_is_not_an_error() {
        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("icon.icns");
        let tool = IconUtil::with_program("focusflow-test-no-such-iconutil");

        let outcome = build_icns(&master(), &[16], 16, &tool, out.path(), &target).unwrap();
        assert_eq!(outcome, PackageOutcome::ToolMissing);
        assert!(!target.exists());
        // Only the output directory's own contents remain.
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn staging_cleanup_when_tool_missing() {
        let out = tempfile::tempdir().unwrap();
        let recorder = Recorder::new(PackageOutcome::ToolMissing);

        let outcome =
            build_icns(&master(), &[16], 16, &recorder, out.path(), &out.path().join("icon.icns"))
                .unwrap();
        assert_eq!(outcome, PackageOutcome::ToolMissing);

        let (dir, names) = recorder.seen.into_inner().unwrap();
        assert_eq!(names, ["icon_16x16.png", "icon_16x16@2x.png"]);
        assert!(!dir.exists());
    }

    #[test]
    fn unusable_staging_root_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let blocker = out.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let recorder = Recorder::new(PackageOutcome::ToolMissing);

        let err = build_icns(&master(), &[16], 16, &recorder, &blocker, &out.path().join("icon.icns"))
            .unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { path, .. } if path == blocker));
        assert!(recorder.seen.into_inner().is_none(), "packager must not run");
    }

    #[test]
    fn iconset_write_failure_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let missing = out.path().join("gone");

        let err = write_iconset(&master(), &[16], 16, &missing).unwrap_err();
        assert!(matches!(err, ExportError::WritePng { path, .. } if path == missing.join("icon_16x16.png")));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(PackageOutcome::ToolMissing.to_string(), "packaging tool not available");
        assert!(PackageOutcome::Failed("x".into()).to_string().contains('x'));
    }
}
