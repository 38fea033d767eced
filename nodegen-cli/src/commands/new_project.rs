use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use super::templates::{self, GeneratedManifest};
use crate::error::ScaffoldError;

/// A project to scaffold, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    /// The project name exactly as given on the command line.
    pub name: String,
    /// Absolute directory the project is written to.
    pub resolved_root: PathBuf,
    /// Final segment of `resolved_root`, used as the package name.
    pub app_name: String,
}

impl ProjectSpec {
    /// Resolve `name` against `base`.
    ///
    /// Fails when the name is empty or resolves to a path without a final
    /// segment (such as `/`).
    pub fn resolve(name: &str, base: &Path) -> Result<Self, ScaffoldError> {
        if name.trim().is_empty() {
            return Err(ScaffoldError::InvalidProjectName(name.to_string()));
        }

        let resolved_root = resolve_path(base, Path::new(name));
        let app_name = resolved_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ScaffoldError::InvalidProjectName(name.to_string()))?;

        Ok(ProjectSpec {
            name: name.to_string(),
            resolved_root,
            app_name,
        })
    }

    pub fn manifest(&self) -> GeneratedManifest {
        GeneratedManifest::new(&self.app_name)
    }
}

/// Create a new project named `project_name` under `base`.
///
/// Creates the project root and every entry of [`templates::DIRECTORIES`]
/// (existing directories are reused), writes the boilerplate files, then
/// writes `package.json`. Nothing is rolled back if a later step fails.
pub fn materialize(project_name: &str, base: &Path) -> Result<ProjectSpec, ScaffoldError> {
    let spec = ProjectSpec::resolve(project_name, base)?;
    let manifest = spec.manifest().render()?;
    let root = &spec.resolved_root;

    info!(root = %root.display(), app = %spec.app_name, "materializing project");

    create_dir(root)?;
    for dir in templates::DIRECTORIES {
        create_dir(&root.join(dir))?;
    }

    for file in templates::BOILERPLATE_FILES {
        write_file(&root.join(file.path), file.content)?;
    }

    write_file(&root.join("package.json"), &manifest)?;

    Ok(spec)
}

fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(path).map_err(|e| ScaffoldError::filesystem(path, e))?;
    debug!(path = %path.display(), "created directory");
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), ScaffoldError> {
    fs::write(path, content).map_err(|e| ScaffoldError::filesystem(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Join `path` onto `base` and normalize it lexically: `.` is dropped and
/// `..` pops a component. Symlinks are not followed.
fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` on a bare root is a no-op, so `..` never escapes it.
                if out.file_name().is_some() {
                    out.pop();
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\work")
        } else {
            PathBuf::from("/work")
        }
    }

    #[test]
    fn resolves_relative_name() {
        let spec = ProjectSpec::resolve("myapp", &base()).unwrap();
        assert_eq!(spec.resolved_root, base().join("myapp"));
        assert_eq!(spec.app_name, "myapp");
        assert_eq!(spec.name, "myapp");
    }

    #[test]
    fn resolves_nested_name() {
        let spec = ProjectSpec::resolve("foo/bar", &base()).unwrap();
        assert_eq!(spec.resolved_root, base().join("foo").join("bar"));
        assert_eq!(spec.app_name, "bar");
    }

    #[test]
    fn drops_dot_segments() {
        let spec = ProjectSpec::resolve("./a/./b/../c/", &base()).unwrap();
        assert_eq!(spec.resolved_root, base().join("a").join("c"));
        assert_eq!(spec.app_name, "c");
    }

    #[test]
    fn parent_segments_stop_at_root() {
        let root = resolve_path(&base(), Path::new("../../../../x"));
        assert_eq!(root.file_name().unwrap(), "x");
        assert_eq!(root.components().count(), base().components().count());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = ProjectSpec::resolve("  ", &base()).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidProjectName(_)));
    }

    #[cfg(unix)]
    #[test]
    fn filesystem_root_is_rejected() {
        let err = ProjectSpec::resolve("/", &base()).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidProjectName(_)));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_name_ignores_base() {
        let spec = ProjectSpec::resolve("/srv/api", &base()).unwrap();
        assert_eq!(spec.resolved_root, PathBuf::from("/srv/api"));
        assert_eq!(spec.app_name, "api");
    }
}
