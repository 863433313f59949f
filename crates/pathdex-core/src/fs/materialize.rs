//! Path-cell normalization and materialization.
//!
//! Committing a value to the path column guarantees the file or directory it
//! names exists. Deciding *what* to create ([`plan`]) is pure; creating it
//! goes through the [`FileSystem`] capability so the decision logic can be
//! tested without touching disk.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// A filesystem entry that must exist after a commit.
///
/// Paths are relative to the working directory of the [`FileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsAction {
    /// Create the directory and any missing ancestors.
    CreateDir(PathBuf),
    /// Create ancestors, then an empty file unless one already exists.
    TouchFile(PathBuf),
}

impl FsAction {
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir(p) | Self::TouchFile(p) => p,
        }
    }
}

/// The normalized cell value plus the filesystem work it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializePlan {
    pub normalized: String,
    pub action: Option<FsAction>,
}

impl MaterializePlan {
    /// Performs the planned action, if any.
    ///
    /// # Errors
    ///
    /// [`CoreError::Materialize`] when the entry cannot be created.
    pub fn apply<F: FileSystem + ?Sized>(&self, fs: &F) -> CoreResult<()> {
        let Some(action) = &self.action else {
            return Ok(());
        };
        let result = match action {
            FsAction::CreateDir(p) => fs.create_dir_all(p),
            FsAction::TouchFile(p) => fs.touch(p),
        };
        result.map_err(|source| CoreError::Materialize {
            path: action.path().to_path_buf(),
            source,
        })
    }
}

/// Filesystem operations needed to materialize path cells.
pub trait FileSystem {
    /// Creates `rel` and all missing ancestors. Succeeds if it already exists.
    fn create_dir_all(&self, rel: &Path) -> io::Result<()>;

    /// Creates missing ancestors of `rel`, then an empty file at `rel` unless
    /// an entry is already there. Never truncates.
    fn touch(&self, rel: &Path) -> io::Result<()>;
}

/// [`FileSystem`] rooted at a fixed working directory.
#[derive(Debug, Clone)]
pub struct WorkingDirFs {
    root: PathBuf,
}

impl WorkingDirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Roots the filesystem at the process working directory.
    pub fn current() -> io::Result<Self> {
        std::env::current_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSystem for WorkingDirFs {
    fn create_dir_all(&self, rel: &Path) -> io::Result<()> {
        std::fs::create_dir_all(self.root.join(rel))
    }

    fn touch(&self, rel: &Path) -> io::Result<()> {
        let target = self.root.join(rel);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if target.exists() {
            return Ok(());
        }
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&target)?;
        Ok(())
    }
}

/// Trims `raw` and turns a root-absolute value into a `./`-relative one.
pub fn normalize_path_value(raw: &str) -> String {
    let value = raw.trim();
    if value.starts_with('/') {
        format!(".{value}")
    } else {
        value.to_string()
    }
}

/// Decides the normalized value and the entry it requires.
///
/// A value ending in a separator, or whose last component has no extension,
/// names a directory. Anything else names a file, so `archive.tar.gz` is a
/// file.
pub fn plan(raw: &str) -> MaterializePlan {
    let normalized = normalize_path_value(raw);
    if normalized.is_empty() {
        return MaterializePlan {
            normalized,
            action: None,
        };
    }

    let path = PathBuf::from(&normalized);
    let action = if names_directory(&normalized, &path) {
        FsAction::CreateDir(path)
    } else {
        FsAction::TouchFile(path)
    };

    MaterializePlan {
        normalized,
        action: Some(action),
    }
}

fn names_directory(value: &str, path: &Path) -> bool {
    if value.ends_with('/') || value.ends_with('\\') {
        return true;
    }
    path.extension().map_or(true, |ext| ext.is_empty())
}

/// Normalizes `raw`, makes sure the entry exists, and returns the value to
/// store in the cell.
///
/// # Errors
///
/// [`CoreError::Materialize`] when creation fails; the caller must not
/// update the cell in that case.
pub fn commit<F: FileSystem + ?Sized>(raw: &str, fs: &F) -> CoreResult<String> {
    let plan = plan(raw);
    plan.apply(fs)?;
    if let Some(action) = &plan.action {
        tracing::debug!("materialized {:?}", action);
    }
    Ok(plan.normalized)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Records every call instead of touching disk.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingFs {
        pub calls: RefCell<Vec<FsAction>>,
        pub fail: bool,
    }

    impl RecordingFs {
        pub(crate) fn failing() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail: true,
            }
        }

        fn record(&self, action: FsAction) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.calls.borrow_mut().push(action);
            Ok(())
        }
    }

    impl FileSystem for RecordingFs {
        fn create_dir_all(&self, rel: &Path) -> io::Result<()> {
            self.record(FsAction::CreateDir(rel.to_path_buf()))
        }

        fn touch(&self, rel: &Path) -> io::Result<()> {
            self.record(FsAction::TouchFile(rel.to_path_buf()))
        }
    }

    // --- normalization ---

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_path_value("  notes/a.md \t"), "notes/a.md");
    }

    #[test]
    fn normalize_neutralizes_absolute_path() {
        assert_eq!(normalize_path_value("/etc/passwd"), "./etc/passwd");
        assert_eq!(normalize_path_value("  /etc/passwd"), "./etc/passwd");
    }

    #[test]
    fn normalize_keeps_relative_path() {
        assert_eq!(normalize_path_value("code/a.txt"), "code/a.txt");
        assert_eq!(normalize_path_value("./code"), "./code");
    }

    // --- planning ---

    #[test]
    fn plan_empty_value_has_no_action() {
        let plan = plan("   ");
        assert_eq!(plan.normalized, "");
        assert_eq!(plan.action, None);
    }

    #[test]
    fn plan_without_extension_is_directory() {
        let plan = plan("notes/todo");
        assert_eq!(
            plan.action,
            Some(FsAction::CreateDir(PathBuf::from("notes/todo")))
        );
    }

    #[test]
    fn plan_trailing_separator_is_directory() {
        assert_eq!(
            plan("assets.v2/").action,
            Some(FsAction::CreateDir(PathBuf::from("assets.v2/")))
        );
        assert!(matches!(
            plan("assets.v2\\").action,
            Some(FsAction::CreateDir(_))
        ));
    }

    #[test]
    fn plan_with_extension_is_file() {
        assert_eq!(
            plan("notes/todo.md").action,
            Some(FsAction::TouchFile(PathBuf::from("notes/todo.md")))
        );
    }

    #[test]
    fn plan_multi_extension_is_file() {
        assert!(matches!(
            plan("backups/archive.tar.gz").action,
            Some(FsAction::TouchFile(_))
        ));
    }

    #[test]
    fn plan_dotfile_is_directory() {
        assert!(matches!(plan(".config").action, Some(FsAction::CreateDir(_))));
    }

    #[test]
    fn plan_trailing_dot_is_directory() {
        assert!(matches!(plan("draft.").action, Some(FsAction::CreateDir(_))));
    }

    #[test]
    fn plan_absolute_path_targets_working_tree() {
        let plan = plan("/etc/passwd");
        assert_eq!(plan.normalized, "./etc/passwd");
        assert_eq!(
            plan.action,
            Some(FsAction::CreateDir(PathBuf::from("./etc/passwd")))
        );
    }

    // --- commit against a fake ---

    #[test]
    fn commit_applies_planned_action() {
        let fs = RecordingFs::default();
        let stored = commit(" docs/readme.txt ", &fs).unwrap();
        assert_eq!(stored, "docs/readme.txt");
        assert_eq!(
            fs.calls.borrow().as_slice(),
            &[FsAction::TouchFile(PathBuf::from("docs/readme.txt"))]
        );
    }

    #[test]
    fn commit_empty_value_touches_nothing() {
        let fs = RecordingFs::default();
        assert_eq!(commit("", &fs).unwrap(), "");
        assert!(fs.calls.borrow().is_empty());
    }

    #[test]
    fn commit_failure_reports_target() {
        let fs = RecordingFs::failing();
        let err = commit("locked/file.txt", &fs).unwrap_err();
        match err {
            CoreError::Materialize { path, .. } => {
                assert_eq!(path, PathBuf::from("locked/file.txt"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // --- commit against disk ---

    #[test]
    fn commit_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let fs = WorkingDirFs::new(tmp.path());
        commit("notes/todo", &fs).unwrap();
        assert!(tmp.path().join("notes/todo").is_dir());
    }

    #[test]
    fn commit_creates_empty_file_with_ancestors() {
        let tmp = TempDir::new().unwrap();
        let fs = WorkingDirFs::new(tmp.path());
        commit("notes/deep/todo.md", &fs).unwrap();
        let file = tmp.path().join("notes/deep/todo.md");
        assert!(file.is_file());
        assert_eq!(fs::read(&file).unwrap(), b"");
    }

    #[test]
    fn commit_twice_is_idempotent_and_keeps_content() {
        let tmp = TempDir::new().unwrap();
        let fs = WorkingDirFs::new(tmp.path());
        commit("notes/todo.md", &fs).unwrap();
        fs::write(tmp.path().join("notes/todo.md"), "keep me").unwrap();

        commit("notes/todo.md", &fs).unwrap();
        assert_eq!(
            fs::read_to_string(tmp.path().join("notes/todo.md")).unwrap(),
            "keep me"
        );

        commit("notes/dir", &fs).unwrap();
        commit("notes/dir", &fs).unwrap();
        assert!(tmp.path().join("notes/dir").is_dir());
    }

    #[test]
    fn commit_absolute_path_stays_under_root() {
        let tmp = TempDir::new().unwrap();
        let fs = WorkingDirFs::new(tmp.path());
        let stored = commit("/srv/data/report.csv", &fs).unwrap();
        assert_eq!(stored, "./srv/data/report.csv");
        assert!(tmp.path().join("srv/data/report.csv").is_file());
    }

    #[test]
    fn commit_file_over_existing_directory_is_noop() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("site.d")).unwrap();
        let fs = WorkingDirFs::new(tmp.path());
        commit("site.d", &fs).unwrap();
        assert!(tmp.path().join("site.d").is_dir());
    }

    #[test]
    fn commit_under_a_file_fails() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("plain.txt"), "x").unwrap();
        let fs = WorkingDirFs::new(tmp.path());
        let err = commit("plain.txt/child.md", &fs).unwrap_err();
        assert!(matches!(err, CoreError::Materialize { .. }));
    }
}
