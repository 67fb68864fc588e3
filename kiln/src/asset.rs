use serde::{de::DeserializeOwned, Serialize};
use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::{Path, PathBuf},
};

use crate::Font;

// Debug builds run from the cargo project directory; release builds find
// their assets next to the executable.
#[cfg(debug_assertions)]
pub fn base_path() -> PathBuf {
    PathBuf::new()
}
#[cfg(not(debug_assertions))]
pub fn base_path() -> PathBuf {
    let mut dir = std::env::current_exe().unwrap();
    dir.pop();
    dir
}

pub fn get_path(prefix: &str, asset_path: &str) -> PathBuf {
    let mut path = base_path();
    path.push(prefix);
    path.push(asset_path);
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Read,
    Write,
}

pub struct AssetError {
    path: PathBuf,
    op: Op,
    source: Option<std::io::Error>,
    detail: String,
}

impl AssetError {
    fn io(path: PathBuf, op: Op, source: std::io::Error) -> Self {
        AssetError {
            path,
            op,
            source: Some(source),
            detail: String::new(),
        }
    }
    fn format(path: PathBuf, op: Op, detail: String) -> Self {
        AssetError {
            path,
            op,
            source: None,
            detail,
        }
    }

    pub fn not_found(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl fmt::Debug for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Op::Read => "reading",
            Op::Write => "writing",
        };
        write!(f, "Error {} {}: ", op, self.path.to_string_lossy())?;
        match &self.source {
            // NotFound while writing means a missing parent directory.
            Some(error) if self.op == Op::Write && self.not_found() => {
                write!(f, "The parent directory does not exist.")?;
                if let Some(code) = error.raw_os_error() {
                    write!(f, " (os error {code})")?;
                }
                Ok(())
            }
            Some(error) => write!(f, "{}", error),
            None => f.write_str(&self.detail),
        }
    }
}
impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self, f)
    }
}

impl std::error::Error for AssetError {}

pub type Result<T> = std::result::Result<T, AssetError>;

fn open_reader(path: &Path) -> Result<BufReader<File>> {
    println!("Reading {}", path.to_string_lossy());
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| AssetError::io(path.to_owned(), Op::Read, e))
}
fn open_writer(path: &Path) -> Result<BufWriter<File>> {
    println!("Writing {}", path.to_string_lossy());
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| AssetError::io(path.to_owned(), Op::Write, e))
}

pub fn create_dir(dir: &str) {
    let mut path = base_path();
    path.push(dir);
    if !path.exists() {
        println!("Creating directory {}", path.to_string_lossy());
        std::fs::create_dir(path).expect("could not create directory");
    }
}

pub fn load_yaml_file<T: DeserializeOwned>(prefix: &str, file: &str) -> Result<T> {
    let path = get_path(prefix, file);
    let reader = open_reader(&path)?;
    serde_yml::from_reader(reader)
        .map_err(|e| AssetError::format(path, Op::Read, e.to_string()))
}
pub fn save_yaml_file<T: Serialize>(prefix: &str, file: &str, value: &T) -> Result<()> {
    let path = get_path(prefix, file);
    let writer = open_writer(&path)?;
    serde_yml::to_writer(writer, value)
        .map_err(|e| AssetError::format(path, Op::Write, e.to_string()))
}

pub fn load_font_file(prefix: &str, file: &str) -> Result<Font> {
    let path = get_path(prefix, file);
    let mut bytes = Vec::new();
    open_reader(&path)?
        .read_to_end(&mut bytes)
        .map_err(|e| AssetError::io(path.clone(), Op::Read, e))?;
    Font::try_from_vec(bytes)
        .map_err(|_| AssetError::format(path, Op::Read, "Invalid font".to_owned()))
}
