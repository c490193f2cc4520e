use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Extension of the serialized thesaurus written next to its source.
pub(crate) const SIDECAR_EXTENSION: &str = "bin";

/// Reads a thesaurus source file line by line.
///
/// Line endings (`\n` or `\r\n`) are dropped; numbering starts at 1 when
/// callers report errors, so the order of the returned lines matters.
pub(crate) fn read_lines<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
	Ok(fs::read_to_string(path)?.lines().map(str::to_owned).collect())
}

/// Path of the binary sidecar of `source`: `data/thesaurus.dat` → `data/thesaurus.bin`.
pub(crate) fn sidecar_path<P: AsRef<Path>>(source: P) -> io::Result<PathBuf> {
	let source = source.as_ref();
	if source.file_stem().is_none() {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("{} has no file name", source.display())));
	}
	Ok(source.with_extension(SIDECAR_EXTENSION))
}

/// Name a resource is known by: its file stem (`./data/thesaurus.dat` → `thesaurus`).
pub(crate) fn resource_name<P: AsRef<Path>>(source: P) -> io::Result<String> {
	source
		.as_ref()
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))
}

/// Returns true when `sidecar` is a file at least as recent as `source`.
///
/// A missing modification time on either side counts as stale, so the
/// source gets parsed again.
pub(crate) fn is_fresh<PS: AsRef<Path>, PB: AsRef<Path>>(source: PS, sidecar: PB) -> bool {
	let modified = |p: &Path| fs::metadata(p).ok().filter(|m| m.is_file()).and_then(|m| m.modified().ok());
	match (modified(source.as_ref()), modified(sidecar.as_ref())) {
		(Some(src), Some(bin)) => bin >= src,
		_ => false,
	}
}

/// Resolves a path relative to the current working directory.
///
/// - Absolute paths are returned as-is
/// - Relative paths are joined onto the working directory (not canonicalized)
pub fn resolve_path(input: &str) -> PathBuf {
	let path = PathBuf::from(input);
	if path.is_absolute() {
		return path;
	}
	env::current_dir().map(|cwd| cwd.join(&path)).unwrap_or(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sidecar_sits_next_to_source() {
		assert_eq!(sidecar_path("data/thesaurus.dat").unwrap(), PathBuf::from("data/thesaurus.bin"));
		assert_eq!(sidecar_path("words").unwrap(), PathBuf::from("words.bin"));
		assert!(sidecar_path("/").is_err());
	}

	#[test]
	fn resource_name_is_the_stem() {
		assert_eq!(resource_name("./data/thesaurus.dat").unwrap(), "thesaurus");
	}

	#[test]
	fn missing_sidecar_is_stale() {
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("words.dat");
		fs::write(&source, "n\tcar,auto\n").unwrap();
		assert!(!is_fresh(&source, dir.path().join("words.bin")));

		fs::write(dir.path().join("words.bin"), b"").unwrap();
		assert!(is_fresh(&source, dir.path().join("words.bin")));
	}

	#[test]
	fn lines_drop_their_endings() {
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("words.dat");
		fs::write(&source, "a\r\nb\nc").unwrap();
		assert_eq!(read_lines(&source).unwrap(), vec!["a", "b", "c"]);
	}
}
