//! Where the tables of a feed are read from
use crate::Error;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

/// A feed, seen as a set of named tables
pub trait TableSource {
    /// Opens a table by its file name (`stops.txt`). `None` when the feed has no such table
    fn open_table(&mut self, file_name: &str) -> Result<Option<Box<dyn Read + '_>>, Error>;

    /// Names of all the files of the feed
    fn files(&self) -> Vec<String>;

    /// Fingerprint of the feed, when it is a single file
    fn sha256(&self) -> Option<String> {
        None
    }
}

/// A directory holding one `.txt` file per table
#[derive(Debug, Clone)]
pub struct DirectorySource {
    path: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl TableSource for DirectorySource {
    fn open_table(&mut self, file_name: &str) -> Result<Option<Box<dyn Read + '_>>, Error> {
        let path = self.path.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        let file = File::open(path).map_err(|e| Error::NamedFileIO {
            file_name: file_name.to_owned(),
            source: Box::new(e),
        })?;
        Ok(Some(Box::new(file)))
    }

    fn files(&self) -> Vec<String> {
        std::fs::read_dir(&self.path)
            .map(|entries| {
                entries
                    .filter_map(|d| d.ok().and_then(|p| p.path().to_str().map(|s| s.to_owned())))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A zip archive. The tables can be in a sub directory of the archive
pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<BufReader<R>>,
    file_mapping: HashMap<String, usize>,
    files: Vec<String>,
    sha256: String,
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self, Error> {
        let mut hasher = Sha256::new();
        let mut buf_reader = BufReader::new(reader);
        let _n = std::io::copy(&mut buf_reader, &mut hasher)?;
        let hash = hasher.finalize();
        let mut archive = zip::ZipArchive::new(buf_reader)?;
        let mut file_mapping = HashMap::new();
        let mut files = Vec::new();

        for i in 0..archive.len() {
            let archive_file = archive.by_index(i)?;
            files.push(archive_file.name().to_owned());

            let file_name = Path::new(archive_file.name())
                .file_name()
                .and_then(|f| f.to_str());
            if let Some(file_name) = file_name {
                // the first file with this name wins
                file_mapping.entry(file_name.to_owned()).or_insert(i);
            }
        }

        Ok(Self {
            archive,
            file_mapping,
            files,
            sha256: format!("{:x}", hash),
        })
    }
}

impl<R: Read + Seek> TableSource for ZipSource<R> {
    fn open_table(&mut self, file_name: &str) -> Result<Option<Box<dyn Read + '_>>, Error> {
        match self.file_mapping.get(file_name) {
            None => Ok(None),
            Some(&i) => {
                let file = self.archive.by_index(i).map_err(|e| Error::NamedFileIO {
                    file_name: file_name.to_owned(),
                    source: Box::new(e),
                })?;
                Ok(Some(Box::new(file)))
            }
        }
    }

    fn files(&self) -> Vec<String> {
        self.files.clone()
    }

    fn sha256(&self) -> Option<String> {
        Some(self.sha256.clone())
    }
}

/// Tables given as text, for feeds built by a program
///
/// ```
/// use gtfs_graph::{MemorySource, TableSource};
/// let mut source = MemorySource::default().with_table("agency.txt", "agency_name\nMetro");
/// assert!(source.open_table("agency.txt")?.is_some());
/// assert!(source.open_table("stops.txt")?.is_none());
/// # Ok::<(), gtfs_graph::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn with_table(mut self, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(file_name, content);
        self
    }

    pub fn insert(&mut self, file_name: impl Into<String>, content: impl Into<String>) {
        self.tables.insert(file_name.into(), content.into());
    }
}

impl TableSource for MemorySource {
    fn open_table(&mut self, file_name: &str) -> Result<Option<Box<dyn Read + '_>>, Error> {
        match self.tables.get(file_name) {
            Some(content) => Ok(Some(Box::new(content.as_bytes()))),
            None => Ok(None),
        }
    }

    fn files(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }
}

/// Opens a local zip archive or a local directory
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn TableSource>, Error> {
    let p = path.as_ref();
    if p.is_file() {
        let reader = File::open(p)?;
        Ok(Box::new(ZipSource::new(reader)?))
    } else if p.is_dir() {
        Ok(Box::new(DirectorySource::new(p)))
    } else {
        Err(Error::NotFileNorDirectory(format!("{}", p.display())))
    }
}
