use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_quality_control");

struct Project {
    root: TempDir,
}

impl Project {
    /// Data directory with fake pipeline files and an input directory with
    /// one pair of reads
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        let reads = root.path().join("reads");
        fs::create_dir(&data).unwrap();
        fs::create_dir(&reads).unwrap();
        fs::write(data.join("quality_control.rules"), "rule all:\n    input: []\n").unwrap();
        fs::write(data.join("phiX174.fa"), ">phiX174\nGAGTTTTATCGCTTCCATGAC\n").unwrap();
        for f in ["S1_R1_.fastq.gz", "S1_R2_.fastq.gz"] {
            fs::write(reads.join(f), b"").unwrap();
        }
        Self { root }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn workdir(&self) -> PathBuf {
        self.path().join("qc")
    }

    fn command(&self, extra: &[&str]) -> Command {
        let mut cmd = Command::new(BIN);
        cmd.current_dir(self.path())
            .env_remove("QUALITY_CONTROL_DATA")
            .args([
                "--input-directory",
                "reads",
                "--working-directory",
                "qc",
                "--data-directory",
                "data",
                "--run-mode",
                "local",
            ])
            .args(extra);
        cmd
    }

    fn run(&self, extra: &[&str]) -> Output {
        self.command(extra).output().unwrap()
    }

    /// PATH with a fake `snakemake` in front
    fn fake_snakemake(&self, body: &str) -> std::ffi::OsString {
        let bin = self.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let exe = bin.join("snakemake");
        fs::write(&exe, format!("#!/bin/sh\n{}\n", body)).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        }
        env::join_paths(
            std::iter::once(bin).chain(env::split_paths(&env::var_os("PATH").unwrap_or_default())),
        )
        .unwrap()
    }

    fn with_snakemake(&self, body: &str, extra: &[&str]) -> Output {
        let path = self.fake_snakemake(body);
        self.command(extra).env("PATH", path).output().unwrap()
    }

    fn config(&self) -> serde_json::Value {
        let s = fs::read_to_string(self.workdir().join("config.yaml")).unwrap();
        serde_json::from_str(&s).unwrap()
    }
}

fn entries(p: &Path) -> Vec<String> {
    let mut v: Vec<_> = fs::read_dir(p)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

#[test]
fn version_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(BIN)
        .arg("--version")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.contains(env!("CARGO_PKG_VERSION")));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn setup_without_kraken() {
    let p = Project::new();
    let out = p.run(&["--skip-kraken"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let wd = p.workdir();
    assert_eq!(
        fs::read_to_string(wd.join("phiX174.fa")).unwrap(),
        ">phiX174\nGAGTTTTATCGCTTCCATGAC\n"
    );
    assert!(wd.join("quality_control.rules").is_file());
    let launcher = fs::read_to_string(wd.join("quality_control.sh")).unwrap();
    assert!(launcher.contains("snakemake -s quality_control.rules --configfile config.yaml"));

    let c = p.config();
    assert_eq!(c["kraken"]["do"], false);
    assert_eq!(c["bwa_mem_phix"]["do"], true);
    assert_eq!(c["trimming"]["do"], true);
    assert_eq!(c["trimming"]["software_choice"], "cutadapt");
    assert_eq!(c["cutadapt"]["quality"], 30);
    assert_eq!(c["fastqc"]["do_raw"], true);
    let input = PathBuf::from(c["input_directory"].as_str().unwrap());
    assert!(input.is_absolute());
    assert!(input.ends_with("reads"));
}

#[test]
fn missing_kraken_database_writes_nothing() {
    let p = Project::new();
    fs::create_dir(p.path().join("db1")).unwrap();
    let out = p.run(&["--kraken-databases", "db1", "no_such_db"]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no_such_db"));
    assert!(!p.workdir().exists());
}

#[test]
fn kraken_databases_are_absolute() {
    let p = Project::new();
    fs::create_dir(p.path().join("db1")).unwrap();
    let out = p.run(&["--kraken-databases", "db1"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let c = p.config();
    assert_eq!(c["kraken"]["do"], true);
    let db = c["kraken"]["databases"][0].as_str().unwrap();
    assert!(Path::new(db).is_absolute());
}

#[test]
fn no_input_files_is_rejected() {
    let p = Project::new();
    let out = p.run(&["--skip-kraken", "--input-pattern", "*.bam"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!p.workdir().exists());
}

#[test]
fn existing_directory_needs_force() {
    let p = Project::new();
    assert!(p.run(&["--skip-kraken"]).status.success());
    let out = p.run(&["--skip-kraken", "--skip-phix-removal"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(p.config()["bwa_mem_phix"]["do"], true);

    let out = p.run(&["--skip-kraken", "--skip-phix-removal", "--force"]);
    assert!(out.status.success());
    assert_eq!(p.config()["bwa_mem_phix"]["do"], false);
}

#[test]
fn relative_adapter_file_is_stored_absolute() {
    let p = Project::new();
    fs::write(p.path().join("adapters.fa"), ">a\nAGATCGGAAGAGC\n").unwrap();
    let out = p.run(&[
        "--skip-kraken",
        "--trimming-adapter-read1",
        "file:adapters.fa",
        "--trimming-adapter-read2",
        "^AGATCGGAAGAGC",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let c = p.config();
    let fwd = c["cutadapt"]["fwd"].as_str().unwrap();
    let fa = Path::new(fwd.strip_prefix("file:").unwrap());
    assert!(fa.is_absolute());
    assert!(fa.is_file());
    assert_eq!(c["cutadapt"]["rev"], "^AGATCGGAAGAGC");
}

#[cfg(unix)]
#[test]
fn launcher_runs_from_any_directory() {
    let p = Project::new();
    let path = p.fake_snakemake("test -f config.yaml && touch summary.html");
    assert!(p.run(&["--skip-kraken"]).status.success());
    let st = Command::new("bash")
        .arg("qc/quality_control.sh")
        .current_dir(p.path())
        .env("PATH", path)
        .status()
        .unwrap();
    assert!(st.success());
    assert!(p.workdir().join("summary.html").is_file());
}

#[cfg(unix)]
#[test]
fn execute_produces_report() {
    let p = Project::new();
    let out = p.with_snakemake(
        "echo '<html></html>' > summary.html",
        &["--skip-kraken", "--execute"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(p.workdir().join("summary.html").is_file());
}

#[cfg(unix)]
#[test]
fn execute_returns_launcher_status() {
    let p = Project::new();
    let out = p.with_snakemake("exit 7", &["--skip-kraken", "--execute"]);
    assert_eq!(out.status.code(), Some(7));
    assert!(p.workdir().join("config.yaml").is_file());
}

#[test]
fn deps_lists_tools() {
    let out = Command::new(BIN).arg("--deps").output().unwrap();
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    for tool in ["snakemake", "bwa", "cutadapt", "fastqc", "kraken2"] {
        assert!(s.contains(tool), "{} missing", tool);
    }
}
