use std::{
    env,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use compress_io::compress::CompressIo;

use crate::{config::PHIX_REFERENCE, error::QcError};

pub const RULES_FILE: &str = "quality_control.rules";
pub const DATA_ENV: &str = "QUALITY_CONTROL_DATA";

/// Files every working directory needs, by their name in the working directory
const REQUIRED: &[&str] = &[RULES_FILE, PHIX_REFERENCE];
const COMPRESSED_EXT: &[&str] = &["gz", "bz2", "xz"];

#[derive(Debug)]
pub struct Asset {
    source: PathBuf,
    name: Box<str>,
}

impl Asset {
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look for `name` in `dir`, plain or with a compression suffix
    fn find(dir: &Path, name: &str) -> Option<Self> {
        std::iter::once(dir.join(name))
            .chain(COMPRESSED_EXT.iter().map(|e| dir.join(format!("{}.{}", name, e))))
            .find(|p| p.is_file())
            .map(|source| Self {
                source,
                name: Box::from(name),
            })
    }

    /// Copy into `dir` under the plain name, decompressing if needed
    fn copy_into(&self, dir: &Path) -> Result<PathBuf, QcError> {
        let dest = dir.join(self.name());
        let err = |e| QcError::io_path("Could not copy asset to", &dest, e);
        let mut rdr = CompressIo::new()
            .path(&self.source)
            .bufreader()
            .map_err(|e| QcError::io_path("Could not open asset", &self.source, e))?;
        let mut wrt = BufWriter::new(File::create(&dest).map_err(err)?);
        io::copy(&mut rdr, &mut wrt).map_err(err)?;
        wrt.flush().map_err(err)?;
        Ok(dest)
    }
}

/// Static files copied into every working directory
#[derive(Debug)]
pub struct AssetSet {
    data_dir: PathBuf,
    assets: Vec<Asset>,
}

impl AssetSet {
    /// All required assets from one directory, or None if any is missing
    fn from_dir(dir: &Path) -> Option<Self> {
        let assets = REQUIRED
            .iter()
            .map(|name| Asset::find(dir, name))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            data_dir: dir.to_owned(),
            assets,
        })
    }

    /// Find the data directory.
    ///
    /// An explicit directory is used as is. Otherwise `QUALITY_CONTROL_DATA`
    /// and then `../share/quality_control` next to the executable are tried.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, QcError> {
        let candidates: Vec<PathBuf> = match explicit {
            Some(d) => vec![d.to_owned()],
            None => env::var_os(DATA_ENV)
                .map(PathBuf::from)
                .into_iter()
                .chain(installed_data_dir())
                .collect(),
        };
        for dir in candidates.iter() {
            debug!("Looking for pipeline data in {}", dir.display());
            if let Some(set) = Self::from_dir(dir) {
                return Ok(set);
            }
        }
        let tried: Vec<_> = candidates.iter().map(|p| p.display().to_string()).collect();
        Err(QcError::validation(format!(
            "pipeline data ({}) not found; tried [{}]. Use --data-directory or set {}",
            REQUIRED.join(", "),
            tried.join(", "),
            DATA_ENV
        )))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Copy every asset into `dir`, stopping at the first failure
    pub fn copy_into(&self, dir: &Path) -> Result<(), QcError> {
        for a in self.assets.iter() {
            let dest = a.copy_into(dir)?;
            debug!("Copied {} to {}", a.source().display(), dest.display());
        }
        Ok(())
    }
}

fn installed_data_dir() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let bin_dir = exe.parent()?;
    Some(bin_dir.join("..").join("share").join("quality_control"))
}
