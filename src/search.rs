use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use nix::unistd::{access, AccessFlags};

/// Ordered list of directories searched for external commands. The first
/// directory holding an executable with the requested name wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
    capacity: usize,
}

impl SearchPath {
    pub fn new<I, P>(dirs: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut this = Self {
            dirs: Vec::new(),
            capacity,
        };
        this.replace(dirs);
        this
    }

    /// Replaces every entry. Entries past the capacity are dropped.
    pub fn replace<I, P>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dirs.clear();
        self.dirs
            .extend(dirs.into_iter().take(self.capacity).map(Into::into));
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Finds `name` in the search directories. Relative directories are taken
    /// relative to `base`.
    pub fn resolve(&self, base: &Path, name: &OsStr) -> Option<PathBuf> {
        let found = self
            .dirs
            .iter()
            .map(|dir| candidate(&base.join(dir), name))
            .find(|path| is_executable(path));

        trace!(?name, ?found, "resolved command");

        found
    }
}

// joined textually so an absolute or dotted name never escapes the directory
fn candidate(dir: &Path, name: &OsStr) -> PathBuf {
    let mut path = OsString::from(dir.as_os_str());
    path.push("/");
    path.push(name);
    path.into()
}

/// Only regular files count; a directory with the execute bit is skipped.
fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(test)]
mod tests {
    use std::{fs, os::unix::ffi::OsStrExt};

    use super::*;
    use crate::test_support::executable;

    fn resolve(search: &SearchPath, base: impl AsRef<Path>, name: &str) -> Option<PathBuf> {
        search.resolve(base.as_ref(), OsStr::new(name))
    }

    #[test]
    fn replace_clears_previous_entries() {
        let mut search = SearchPath::new(["/bin"], 8);
        search.replace(["/a", "/b"]);
        assert_eq!(search.dirs(), [PathBuf::from("/a"), PathBuf::from("/b")]);

        search.replace(Vec::<PathBuf>::new());
        assert!(search.is_empty());
    }

    #[test]
    fn entries_past_capacity_are_dropped() {
        let search = SearchPath::new(["/a", "/b", "/c", "/d"], 2);
        assert_eq!(search.dirs(), [PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[test]
    fn first_match_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        executable(first.path(), "tool", "exit 0");
        executable(second.path(), "tool", "exit 0");

        let search = SearchPath::new([second.path(), first.path()], 8);
        assert_eq!(
            resolve(&search, Path::new("/"), "tool"),
            Some(second.path().join("tool"))
        );
    }

    #[test]
    fn skips_directories_without_the_command() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let c = tempfile::tempdir().unwrap();
        executable(b.path(), "only-in-b", "exit 0");

        let search = SearchPath::new([a.path(), b.path(), c.path()], 8);
        assert_eq!(
            resolve(&search, Path::new("/"), "only-in-b"),
            Some(b.path().join("only-in-b"))
        );
    }

    #[test]
    fn non_executable_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data"), "plain").unwrap();

        let search = SearchPath::new([dir.path()], 8);
        assert_eq!(resolve(&search, Path::new("/"), "data"), None);
    }

    #[test]
    fn directories_are_not_commands() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let search = SearchPath::new([dir.path()], 8);
        assert_eq!(resolve(&search, Path::new("/"), "sub"), None);
    }

    #[test]
    fn empty_path_resolves_nothing() {
        let search = SearchPath::new(Vec::<PathBuf>::new(), 8);
        assert_eq!(resolve(&search, Path::new("/"), "sh"), None);
    }

    #[test]
    fn relative_entries_use_the_base_directory() {
        let root = tempfile::tempdir().unwrap();
        let bin = root.path().join("bin");
        fs::create_dir(&bin).unwrap();
        executable(&bin, "tool", "exit 0");

        let search = SearchPath::new(["bin"], 8);
        let found = resolve(&search, root.path(), "tool").unwrap();
        assert_eq!(found.canonicalize().unwrap(), bin.join("tool").canonicalize().unwrap());
    }

    #[test]
    fn non_utf8_names_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9");
        let script = executable(dir.path(), name, "exit 0");

        let search = SearchPath::new([dir.path()], 8);
        assert_eq!(
            search.resolve(Path::new("/"), name),
            Some(script)
        );
    }
}
