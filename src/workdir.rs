use std::{
    env, fs,
    io::Write,
    path::{self, Path, PathBuf},
};

use crate::{
    assets::AssetSet,
    cli::NAME,
    config::{ConfigRecord, CONFIG_FILE},
    error::QcError,
    launcher::LAUNCHER_FILE,
};

pub const INFO_DIR: &str = ".quality_control";
pub const INFO_FILE: &str = "info.txt";

/// The directory the workflow is prepared in
pub struct Workdir {
    path: PathBuf,
    force: bool,
}

impl Workdir {
    pub fn new(dir: &Path, force: bool) -> anyhow::Result<Self> {
        let path = path::absolute(dir)
            .map_err(|e| QcError::io_path("Could not resolve working directory", dir, e))?;
        Ok(Self { path, force })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the directory can be used, without writing anything.
    ///
    /// A missing or empty directory is fine; a non-empty one needs `force`.
    pub fn check(&self) -> Result<(), QcError> {
        if !self.path.exists() {
            return Ok(());
        }
        if !self.path.is_dir() {
            return Err(QcError::validation(format!(
                "working directory {} exists and is not a directory",
                self.path.display()
            )));
        }
        let mut rd = fs::read_dir(&self.path)
            .map_err(|e| QcError::io_path("Could not read", &self.path, e))?;
        if rd.next().is_some() && !self.force {
            return Err(QcError::validation(format!(
                "working directory {} exists and is not empty; use --force to overwrite",
                self.path.display()
            )));
        }
        Ok(())
    }

    /// Write assets, configuration, launcher and provenance.
    ///
    /// Everything is written to a staging directory beside the target
    /// first, and only moved into place once all writes succeeded.
    pub fn materialize(
        &self,
        config: &ConfigRecord,
        assets: &AssetSet,
        launcher: &str,
    ) -> anyhow::Result<()> {
        self.check()?;
        let parent = self
            .path
            .parent()
            .ok_or_else(|| QcError::validation("working directory may not be the root directory"))?;
        fs::create_dir_all(parent).map_err(|e| QcError::io_path("Could not create", parent, e))?;

        let staging = tempfile::Builder::new()
            .prefix(".quality_control.")
            .tempdir_in(parent)
            .map_err(|e| QcError::io_path("Could not create staging directory in", parent, e))?;
        let stage = staging.path();
        debug!("Staging working directory in {}", stage.display());

        assets.copy_into(stage)?;

        let cfg_path = stage.join(CONFIG_FILE);
        fs::write(&cfg_path, config.to_text()?)
            .map_err(|e| QcError::io_path("Could not write", &cfg_path, e))?;

        let launcher_path = stage.join(LAUNCHER_FILE);
        fs::write(&launcher_path, launcher)
            .map_err(|e| QcError::io_path("Could not write", &launcher_path, e))?;
        set_mode(&launcher_path, 0o755)?;

        write_info(stage, assets)?;

        if self.path.exists() {
            move_entries(stage, &self.path)?;
        } else {
            set_mode(stage, 0o755)?;
            // The staging directory becomes the working directory, so
            // dropping `staging` afterwards finds nothing to remove
            fs::rename(stage, &self.path)
                .map_err(|e| QcError::io_path("Could not create", &self.path, e))?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(p: &Path, mode: u32) -> Result<(), QcError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(p, fs::Permissions::from_mode(mode))
        .map_err(|e| QcError::io_path("Could not set permissions on", p, e))
}

#[cfg(not(unix))]
fn set_mode(_p: &Path, _mode: u32) -> Result<(), QcError> {
    Ok(())
}

/// Move everything in `from` into the existing directory `to`, replacing
/// files of the same name
fn move_entries(from: &Path, to: &Path) -> Result<(), QcError> {
    let rd = fs::read_dir(from).map_err(|e| QcError::io_path("Could not read", from, e))?;
    for entry in rd {
        let entry = entry.map_err(|e| QcError::io_path("Could not read", from, e))?;
        let src = entry.path();
        let dest = to.join(entry.file_name());
        if src.is_dir() && dest.is_dir() {
            move_entries(&src, &dest)?;
        } else {
            fs::rename(&src, &dest).map_err(|e| QcError::io_path("Could not replace", &dest, e))?;
        }
        trace!("Moved {} into place", dest.display());
    }
    Ok(())
}

fn write_info(dir: &Path, assets: &AssetSet) -> Result<(), QcError> {
    let info_dir = dir.join(INFO_DIR);
    fs::create_dir(&info_dir).map_err(|e| QcError::io_path("Could not create", &info_dir, e))?;
    let path = info_dir.join(INFO_FILE);
    let err = |e| QcError::io_path("Could not write", &path, e);
    let mut wrt = fs::File::create(&path).map_err(err)?;
    let cmd: Vec<String> = env::args().collect();
    writeln!(wrt, "{} {}", NAME, env!("CARGO_PKG_VERSION")).map_err(err)?;
    writeln!(wrt, "command: {}", cmd.join(" ")).map_err(err)?;
    writeln!(wrt, "data directory: {}", assets.data_dir().display()).map_err(err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::RULES_FILE,
        cli::options_from_args,
        config::PHIX_REFERENCE,
    };

    struct Fixture {
        _root: tempfile::TempDir,
        data: PathBuf,
        input: PathBuf,
        work: PathBuf,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        let input = root.path().join("reads");
        fs::create_dir(&data).unwrap();
        fs::create_dir(&input).unwrap();
        fs::write(data.join(RULES_FILE), "rule all:\n").unwrap();
        fs::write(data.join(PHIX_REFERENCE), ">phix\nGAGTTTTATCGCTTCC\n").unwrap();
        let work = root.path().join("analysis").join(NAME);
        Fixture {
            data,
            input,
            work,
            _root: root,
        }
    }

    fn config(f: &Fixture) -> ConfigRecord {
        let input = f.input.display().to_string();
        let o = options_from_args(&["--input-directory", input.as_str(), "--skip-kraken"]).unwrap();
        ConfigRecord::from_options(&o).unwrap()
    }

    #[test]
    fn fresh_directory() {
        let f = fixture();
        let assets = AssetSet::locate(Some(&f.data)).unwrap();
        let wd = Workdir::new(&f.work, false).unwrap();
        wd.materialize(&config(&f), &assets, "#!/usr/bin/env bash\n").unwrap();

        for name in [RULES_FILE, PHIX_REFERENCE, CONFIG_FILE, LAUNCHER_FILE] {
            assert!(f.work.join(name).is_file(), "missing {}", name);
        }
        let info = fs::read_to_string(f.work.join(INFO_DIR).join(INFO_FILE)).unwrap();
        assert!(info.starts_with(NAME));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(f.work.join(LAUNCHER_FILE)).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }

        // Nothing but the working directory is left beside it
        let siblings: Vec<_> = fs::read_dir(f.work.parent().unwrap()).unwrap().collect();
        assert_eq!(siblings.len(), 1);
    }

    #[test]
    fn non_empty_needs_force() {
        let f = fixture();
        fs::create_dir_all(&f.work).unwrap();
        fs::write(f.work.join(CONFIG_FILE), "old").unwrap();
        fs::write(f.work.join("results.txt"), "keep").unwrap();
        let assets = AssetSet::locate(Some(&f.data)).unwrap();

        let wd = Workdir::new(&f.work, false).unwrap();
        let e = wd.materialize(&config(&f), &assets, "").unwrap_err();
        assert!(matches!(e.downcast_ref::<QcError>(), Some(QcError::Validation(_))));
        assert_eq!(fs::read_to_string(f.work.join(CONFIG_FILE)).unwrap(), "old");

        let wd = Workdir::new(&f.work, true).unwrap();
        wd.materialize(&config(&f), &assets, "").unwrap();
        assert_ne!(fs::read_to_string(f.work.join(CONFIG_FILE)).unwrap(), "old");
        assert_eq!(fs::read_to_string(f.work.join("results.txt")).unwrap(), "keep");

        // A second forced run replaces the provenance directory contents too
        wd.materialize(&config(&f), &assets, "").unwrap();
        assert!(f.work.join(INFO_DIR).join(INFO_FILE).is_file());
    }

    #[test]
    fn empty_directory_is_reused() {
        let f = fixture();
        fs::create_dir_all(&f.work).unwrap();
        let assets = AssetSet::locate(Some(&f.data)).unwrap();
        Workdir::new(&f.work, false)
            .unwrap()
            .materialize(&config(&f), &assets, "")
            .unwrap();
        assert!(f.work.join(CONFIG_FILE).is_file());
    }

    #[test]
    fn failed_copy_leaves_nothing() {
        let f = fixture();
        let assets = AssetSet::locate(Some(&f.data)).unwrap();
        // Asset vanishes between lookup and copy
        fs::remove_file(f.data.join(PHIX_REFERENCE)).unwrap();
        let wd = Workdir::new(&f.work, false).unwrap();
        let e = wd.materialize(&config(&f), &assets, "").unwrap_err();
        assert!(matches!(e.downcast_ref::<QcError>(), Some(QcError::Io { .. })));
        assert!(!f.work.exists());
        assert_eq!(fs::read_dir(f.work.parent().unwrap()).unwrap().count(), 0);
    }
}
