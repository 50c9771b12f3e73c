use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{ByteSink, ByteSource};

/// Reads a whole file in one go.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        let bytes = fs::read(&self.path)?;
        info!(path = %self.path.display(), bytes = bytes.len(), "read file");
        Ok(bytes)
    }
}

/// Creates (or truncates) a file and writes the buffer to it.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSink for FileSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        fs::write(&self.path, bytes)?;
        info!(path = %self.path.display(), bytes = bytes.len(), "wrote file");
        Ok(())
    }
}

impl ByteSource for &[u8] {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl ByteSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Where `encode` writes when no output is given: a `.txt` extension is
/// swapped for `.bin`, any other name gets `.bin` appended.
pub fn default_output_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "txt") {
        return input.with_extension("bin");
    }

    let mut name = input.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bin");
    input.with_file_name(name)
}

/// Path of the properties sidecar belonging to `container`.
pub fn properties_path(container: &Path) -> PathBuf {
    let mut name = container.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".properties");
    container.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path(Path::new("dir/notes.txt")), PathBuf::from("dir/notes.bin"));
        assert_eq!(default_output_path(Path::new("dir/data.csv")), PathBuf::from("dir/data.csv.bin"));
        assert_eq!(default_output_path(Path::new("README")), PathBuf::from("README.bin"));
    }

    #[test]
    fn test_properties_path() {
        assert_eq!(properties_path(Path::new("out/notes.bin")), PathBuf::from("out/notes.bin.properties"));
    }

    #[test]
    fn test_in_memory_collaborators() {
        let mut source: &[u8] = b"abc";
        let mut sink = Vec::new();

        let bytes = source.read_bytes().unwrap();
        sink.write_bytes(&bytes).unwrap();
        sink.write_bytes(b"d").unwrap();

        assert_eq!(sink, b"abcd".to_vec());
    }

    #[test]
    fn test_file_collaborators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");

        FileSink::new(&path).write_bytes(&[1, 2, 3]).unwrap();
        assert_eq!(FileSource::new(&path).read_bytes().unwrap(), vec![1, 2, 3]);
        assert!(FileSource::new(dir.path().join("missing")).read_bytes().is_err());
    }
}
