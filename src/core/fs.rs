//! Virtual filesystem
//!
//! A read-only tree of directories and files keyed by absolute path.
//! The built-in tree is constructed once per process and validated on the way in.

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

/// Filesystem construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsError {
    #[error("Path is not absolute: {0}")]
    NotAbsolute(String),

    #[error("Root directory is missing")]
    MissingRoot,

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Directory {parent} lists missing child {child}")]
    MissingChild { parent: String, child: String },

    #[error("Entry {0} is not listed by its parent directory")]
    Orphan(String),

    #[error("Parent of {0} is a file")]
    ParentIsFile(String),
}

/// A node in the virtual tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    Directory { children: Vec<String> },
    File { content: Vec<String> },
}

impl FsEntry {
    pub fn dir(children: &[&str]) -> Self {
        FsEntry::Directory {
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn file(content: &[&str]) -> Self {
        FsEntry::File {
            content: content.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, FsEntry::Directory { .. })
    }
}

/// Immutable path -> entry mapping
#[derive(Debug)]
pub struct VirtualFs {
    entries: HashMap<String, FsEntry>,
}

static BUILTIN: OnceLock<VirtualFs> = OnceLock::new();

impl VirtualFs {
    /// Build a filesystem, checking that parents and children agree.
    pub fn from_entries<I>(entries: I) -> Result<Self, FsError>
    where
        I: IntoIterator<Item = (String, FsEntry)>,
    {
        let mut map = HashMap::new();
        for (path, entry) in entries {
            if !path.starts_with('/') {
                return Err(FsError::NotAbsolute(path));
            }
            if map.contains_key(&path) {
                return Err(FsError::Duplicate(path));
            }
            map.insert(path, entry);
        }

        match map.get("/") {
            Some(root) if root.is_dir() => {}
            _ => return Err(FsError::MissingRoot),
        }

        for (path, entry) in &map {
            if let FsEntry::Directory { children } = entry {
                for child in children {
                    let child_path = join(path, child);
                    if !map.contains_key(&child_path) {
                        return Err(FsError::MissingChild {
                            parent: path.clone(),
                            child: child.clone(),
                        });
                    }
                }
            }

            if path == "/" {
                continue;
            }
            let (parent, name) = split_parent(path);
            match map.get(parent) {
                Some(FsEntry::Directory { children }) if children.iter().any(|c| c == name) => {}
                Some(FsEntry::File { .. }) => return Err(FsError::ParentIsFile(path.clone())),
                _ => return Err(FsError::Orphan(path.clone())),
            }
        }

        Ok(Self { entries: map })
    }

    /// The process-wide built-in tree
    pub fn global() -> &'static VirtualFs {
        BUILTIN.get_or_init(|| {
            // The built-in data is fixed; a failure here is a bug in `builtin_entries`.
            match Self::from_entries(builtin_entries()) {
                Ok(fs) => fs,
                Err(e) => panic!("built-in filesystem is inconsistent: {}", e),
            }
        })
    }

    pub fn lookup(&self, path: &str) -> Option<&FsEntry> {
        self.entries.get(path)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.lookup(path).map(FsEntry::is_dir).unwrap_or(false)
    }

    /// Children of a directory, empty for files and missing paths
    pub fn children(&self, path: &str) -> &[String] {
        match self.lookup(path) {
            Some(FsEntry::Directory { children }) => children,
            _ => &[],
        }
    }
}

/// Join a directory path and a child name
pub fn join(parent: &str, child: &str) -> String {
    if parent == "/" {
        format!("/{}", child)
    } else {
        format!("{}/{}", parent, child)
    }
}

/// Last segment of an absolute path (`""` for root)
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("/", path),
    }
}

fn builtin_entries() -> Vec<(String, FsEntry)> {
    let entries = [
        ("/", FsEntry::dir(&["home", "projects", "docs", ".config"])),
        ("/home", FsEntry::dir(&["user"])),
        (
            "/home/user",
            FsEntry::dir(&["workspace", "downloads", "notes.txt", ".devcli"]),
        ),
        (
            "/home/user/workspace",
            FsEntry::dir(&["my-app", "api-server", "cli-tool"]),
        ),
        (
            "/home/user/workspace/my-app",
            FsEntry::dir(&["src", "package.json", "README.md"]),
        ),
        ("/home/user/workspace/my-app/src", FsEntry::dir(&["App.tsx"])),
        (
            "/home/user/workspace/my-app/src/App.tsx",
            FsEntry::file(&[
                "export default function App() {",
                "  return <h1>Hello from devcli</h1>;",
                "}",
            ]),
        ),
        (
            "/home/user/workspace/my-app/package.json",
            FsEntry::file(&[
                "{",
                "  \"name\": \"my-app\",",
                "  \"version\": \"0.1.0\",",
                "  \"scripts\": {",
                "    \"dev\": \"vite\",",
                "    \"build\": \"vite build\"",
                "  }",
                "}",
            ]),
        ),
        (
            "/home/user/workspace/my-app/README.md",
            FsEntry::file(&[
                "# my-app",
                "",
                "Scaffolded with `devcli create react-app`.",
            ]),
        ),
        ("/home/user/workspace/api-server", FsEntry::dir(&[])),
        ("/home/user/workspace/cli-tool", FsEntry::dir(&[])),
        ("/home/user/downloads", FsEntry::dir(&[])),
        ("/home/user/notes.txt", FsEntry::file(&[])),
        ("/home/user/.devcli", FsEntry::dir(&["config.yaml"])),
        (
            "/home/user/.devcli/config.yaml",
            FsEntry::file(&[
                "theme: dark",
                "editor: vim",
                "telemetry: false",
            ]),
        ),
        ("/projects", FsEntry::dir(&["contributions"])),
        ("/projects/contributions", FsEntry::dir(&[])),
        ("/docs", FsEntry::dir(&["README.md", "CONTRIBUTING.md"])),
        (
            "/docs/README.md",
            FsEntry::file(&[
                "# DevCLI",
                "",
                "The developer's command-line companion.",
                "",
                "Run 'devcli --help' to get started.",
            ]),
        ),
        (
            "/docs/CONTRIBUTING.md",
            FsEntry::file(&[
                "# Contributing",
                "",
                "1. Fork the repository",
                "2. Create a feature branch",
                "3. Open a pull request",
            ]),
        ),
        ("/.config", FsEntry::dir(&[])),
    ];

    entries
        .into_iter()
        .map(|(path, entry)| (path.to_string(), entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(list: &[(&str, FsEntry)]) -> Vec<(String, FsEntry)> {
        list.iter()
            .map(|(p, e)| (p.to_string(), e.clone()))
            .collect()
    }

    #[test]
    fn test_builtin_tree_is_consistent() {
        let fs = VirtualFs::global();
        assert!(fs.is_dir("/"));
        assert!(fs.is_dir("/home/user"));
        assert!(fs.is_dir("/projects/contributions"));
        assert!(!fs.is_dir("/docs/README.md"));
        assert!(fs.lookup("/home/user/projects").is_none());
    }

    #[test]
    fn test_lookup_file_content() {
        let fs = VirtualFs::global();
        match fs.lookup("/docs/README.md") {
            Some(FsEntry::File { content }) => assert_eq!(content[0], "# DevCLI"),
            other => panic!("unexpected entry: {:?}", other),
        }
        assert_eq!(fs.children("/projects"), &["contributions".to_string()]);
        assert!(fs.children("/docs/README.md").is_empty());
    }

    #[test]
    fn test_missing_child_rejected() {
        let result = VirtualFs::from_entries(entries(&[("/", FsEntry::dir(&["a"]))]));
        assert_eq!(
            result.unwrap_err(),
            FsError::MissingChild {
                parent: "/".to_string(),
                child: "a".to_string()
            }
        );
    }

    #[test]
    fn test_orphan_and_file_parent_rejected() {
        let result = VirtualFs::from_entries(entries(&[
            ("/", FsEntry::dir(&[])),
            ("/a", FsEntry::dir(&[])),
        ]));
        assert_eq!(result.unwrap_err(), FsError::Orphan("/a".to_string()));

        let result = VirtualFs::from_entries(entries(&[
            ("/", FsEntry::dir(&["f"])),
            ("/f", FsEntry::file(&[])),
            ("/f/x", FsEntry::file(&[])),
        ]));
        assert_eq!(result.unwrap_err(), FsError::ParentIsFile("/f/x".to_string()));
    }

    #[test]
    fn test_root_and_absolute_required() {
        let result = VirtualFs::from_entries(entries(&[("/a", FsEntry::dir(&[]))]));
        assert_eq!(result.unwrap_err(), FsError::MissingRoot);

        let result = VirtualFs::from_entries(entries(&[("a", FsEntry::dir(&[]))]));
        assert_eq!(result.unwrap_err(), FsError::NotAbsolute("a".to_string()));
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(join("/", "docs"), "/docs");
        assert_eq!(join("/docs", "README.md"), "/docs/README.md");
        assert_eq!(file_name("/docs/README.md"), "README.md");
        assert_eq!(file_name("/"), "");
    }
}
