use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct FileSpec {
    /// Path relative to the working directory
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(root: &Path, file_spec: &FileSpec) {
    let path = root.join(&file_spec.path);

    // make sure the parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", path, e));
}

/// Write a random directory tree below `root` and return every file written
///
/// Each level gets `files_count` files and, above `depth` zero,
/// `subdirs_count` sub-directories.
pub fn write_generated_directory(
    root: &Path,
    relative_dir: &Path,
    files_count: usize,
    subdirs_count: usize,
    depth: usize,
) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    let mut files = Vec::new();

    for index in 0..files_count {
        // the index keeps generated names unique within a directory
        let file_name = format!("{}_{index}.txt", Word().fake::<String>());
        let file_content = Words(5..10).fake::<Vec<String>>().join(" ");

        let file_spec = FileSpec::new(relative_dir.join(file_name), file_content);
        write_file(root, &file_spec);
        files.push(file_spec);
    }

    if depth > 0 {
        for index in 0..subdirs_count {
            let dir_name = format!("dir_{}_{index}", Word().fake::<String>());
            files.extend(write_generated_directory(
                root,
                &relative_dir.join(dir_name),
                files_count,
                subdirs_count,
                depth - 1,
            ));
        }
    }

    files.sort();
    files
}

/// Every regular file below `root` outside the store directory, with its content
pub fn snapshot_files(root: &Path, store_dir_name: &str) -> Vec<FileSpec> {
    let mut files = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.depth() != 1 || entry.file_name() != store_dir_name)
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let content = std::fs::read_to_string(entry.path())
                .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", entry.path(), e));
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            FileSpec::new(relative, content)
        })
        .collect::<Vec<_>>();

    files.sort();
    files
}
