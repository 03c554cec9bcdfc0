//! Multi-format export of a composed master image.
//!
//! One master raster goes in; a PNG set, `icon.ico` and (where `iconutil`
//! exists) `icon.icns` come out. Every output is resampled from the master
//! rather than recomposed.

mod icns;
mod ico;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::icon::{IconImage, IconSet};

use self::icns::build_icns;
use self::ico::save_ico;

pub use self::icns::{IcnsPackager, IconUtil, PackageOutcome};

/// File extensions reported by [`list_generated_assets`].
const ASSET_EXTENSIONS: [&str; 3] = ["png", "ico", "icns"];

// ============================================================================
// Plan
// ============================================================================

/// Pixel density of an exported PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// @1x
    Standard,
    /// @2x
    Double,
}

impl Density {
    pub fn factor(self) -> u32 {
        match self {
            Density::Standard => 1,
            Density::Double => 2,
        }
    }
}

/// One loose PNG in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    /// Logical size; the file is `size * density` pixels wide.
    pub size: u32,
    pub density: Density,
    pub file_name: String,
}

impl ExportTarget {
    /// `{size}x{size}.png`
    pub fn standard(size: u32) -> Self {
        Self {
            size,
            density: Density::Standard,
            file_name: format!("{size}x{size}.png"),
        }
    }

    /// `{size}x{size}@2x.png`, rendered at twice the pixels.
    pub fn double(size: u32) -> Self {
        Self {
            size,
            density: Density::Double,
            file_name: format!("{size}x{size}@2x.png"),
        }
    }

    pub fn pixels(&self) -> u32 {
        self.size * self.density.factor()
    }
}

/// Everything the exporter writes, as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    /// File name of the untouched master.
    pub master_name: String,
    pub targets: Vec<ExportTarget>,
    /// Base sizes staged for the `.icns` container.
    pub icns_sizes: Vec<u32>,
    /// Largest base size that also gets an @2x iconset entry.
    pub icns_double_max: u32,
    pub icns_name: String,
    pub ico_sizes: Vec<u32>,
    pub ico_name: String,
}

impl ExportPlan {
    /// The layout a Tauri application expects in `src-tauri/icons`.
    pub fn standard() -> Self {
        Self {
            master_name: "icon.png".to_string(),
            targets: vec![
                ExportTarget::standard(32),
                ExportTarget::standard(128),
                ExportTarget::standard(256),
                ExportTarget::standard(512),
                ExportTarget::double(128),
                ExportTarget::double(256),
            ],
            icns_sizes: vec![16, 32, 64, 128, 256, 512, 1024],
            icns_double_max: 512,
            icns_name: "icon.icns".to_string(),
            ico_sizes: vec![16, 32, 48, 64, 128, 256],
            ico_name: "icon.ico".to_string(),
        }
    }
}

impl Default for ExportPlan {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Exporter
// ============================================================================

/// What an export run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Every file written to the output directory, in write order.
    pub written: Vec<PathBuf>,
    pub icns: PackageOutcome,
}

/// Writes a master image out as the full icon asset set.
///
/// # Example
///
/// ```no_run
/// use focusflow_icon::{Exporter, IconComposer};
///
/// let master = IconComposer::default().compose(1024)?;
/// let report = Exporter::new("src-tauri/icons").export(&master)?;
/// println!("icns: {}", report.icns);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Exporter {
    out_dir: PathBuf,
    plan: ExportPlan,
    packager: Box<dyn IcnsPackager>,
    staging_root: PathBuf,
}

impl Exporter {
    /// Exports the standard plan into `out_dir`, packaging with `iconutil`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            plan: ExportPlan::standard(),
            packager: Box::new(IconUtil::new()),
            staging_root: std::env::temp_dir(),
        }
    }

    pub fn with_plan(mut self, plan: ExportPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_packager(mut self, packager: Box<dyn IcnsPackager>) -> Self {
        self.packager = packager;
        self
    }

    /// Directory the temporary `.iconset` is created in. Defaults to the
    /// system temp directory.
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = root.into();
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn plan(&self) -> &ExportPlan {
        &self.plan
    }

    pub fn export(&self, master: &IconImage) -> Result<ExportReport, ExportError> {
        self.export_with(master, |_| {})
    }

    /// Like [`export`](Self::export), calling `on_saved` as each file lands.
    pub fn export_with(
        &self,
        master: &IconImage,
        mut on_saved: impl FnMut(&Path),
    ) -> Result<ExportReport, ExportError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| ExportError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut written = Vec::new();
        let mut record = |path: PathBuf| {
            log::info!("saved {}", path.display());
            on_saved(&path);
            written.push(path);
        };

        let path = self.out_dir.join(&self.plan.master_name);
        save_png(master, &path)?;
        record(path);

        for target in &self.plan.targets {
            let path = self.out_dir.join(&target.file_name);
            let scale = target.density.factor() as f32;
            save_png(&master.resampled(target.pixels(), scale), &path)?;
            record(path);
        }

        let icns_path = self.out_dir.join(&self.plan.icns_name);
        let icns = build_icns(
            master,
            &self.plan.icns_sizes,
            self.plan.icns_double_max,
            self.packager.as_ref(),
            &self.staging_root,
            &icns_path,
        )?;
        match &icns {
            PackageOutcome::Created(path) => record(path.clone()),
            PackageOutcome::ToolMissing => log::warn!("iconutil not found, skipping .icns"),
            PackageOutcome::Failed(reason) => log::warn!("skipping .icns: {reason}"),
        }

        let mut ico_sizes = self.plan.ico_sizes.clone();
        ico_sizes.sort_unstable();
        ico_sizes.dedup();
        let ico_path = self.out_dir.join(&self.plan.ico_name);
        save_ico(&IconSet::resampled_from(master, &ico_sizes), &ico_path).map_err(|source| {
            ExportError::WriteIco {
                path: ico_path.clone(),
                source,
            }
        })?;
        record(ico_path);

        Ok(ExportReport { written, icns })
    }
}

fn save_png(image: &IconImage, path: &Path) -> Result<(), ExportError> {
    image.data.save(path).map_err(|source| ExportError::WritePng {
        path: path.to_path_buf(),
        source,
    })
}

/// Sorted names of the icon assets found directly in `dir`.
pub fn list_generated_assets(dir: &Path) -> Result<Vec<String>, ExportError> {
    let list_err = |source| ExportError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        let is_asset = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ASSET_EXTENSIONS.contains(&ext));
        if is_asset && path.is_file() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

// ============================================================================
// Tests
// ============================================================================
