use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mig_config::{Format, ProjectConfig};
use mig_core::{Error, OperationError, RevisionMetadata};
use mig_engine::Translator;
use mig_fs::{FileSystem, LocalFileSystem};
use time::OffsetDateTime;

const PROJECT: &str = r#"{
    "name": "widget",
    "translators": [
        {
            "from_project_space": "internal",
            "to_project_space": "public",
            "steps": [
                {"name": "noop", "editor": {"type": "identity"}},
                {
                    "name": "scrub",
                    "editor": {
                        "type": "scrubber",
                        "exclude_files": ["^internal/", "\\.secret$"],
                        "restore_original_author": true
                    }
                },
                {
                    "name": "late_scrub",
                    "editor": {
                        "type": "scrubber",
                        "exclude_files": ["^build/"],
                        "restore_original_author": false
                    }
                }
            ]
        },
        {"from_project_space": "public", "to_project_space": "internal", "inverse": true}
    ]
}"#;

fn project(json: &str) -> ProjectConfig {
    let config = ProjectConfig::parse(json, Format::Json).unwrap();
    config.validate().unwrap();
    config
}

fn tree(paths: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for p in paths {
        let path = dir.path().join(p);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, p).unwrap();
    }
    dir
}

fn remaining(dir: &Path) -> Vec<String> {
    let files = LocalFileSystem.find_files(dir).unwrap();
    let mut rel: Vec<String> = mig_core::make_filenames_relative(&files, dir)
        .unwrap()
        .into_iter()
        .collect();
    rel.sort();
    rel
}

fn revision(description: &str) -> RevisionMetadata {
    RevisionMetadata::new(
        "100",
        "import-bot@example.com",
        OffsetDateTime::from_unix_timestamp(1_456_833_600).unwrap(),
        description,
    )
}

#[test]
fn test_translate_filters_and_restores_author() {
    let config = project(PROJECT);
    let dir = tree(&[
        "src/lib.rs",
        "internal/plan.md",
        "src/key.secret",
        "build/out.o",
        "README.md",
    ]);
    let input = revision("Fix widget\nORIGINAL_AUTHOR=Jane Doe <jane@example.com>\nMore text");

    let translator = Translator::from_project(&LocalFileSystem, &config, "internal", "public")
        .unwrap();
    let result = translator.translate(dir.path(), &input).unwrap();

    assert_eq!(remaining(dir.path()), vec!["README.md", "src/lib.rs"]);
    assert_eq!(
        result.deleted,
        vec!["internal/plan.md", "src/key.secret", "build/out.o"]
    );
    assert!(result.metadata_changed);
    assert_eq!(result.metadata.author, "Jane Doe <jane@example.com>");
    assert_eq!(result.metadata.description, "Fix widget\n\nMore text");
    assert_eq!(result.metadata.id, input.id);
    assert_eq!(result.metadata.date, input.date);
}

#[test]
fn test_translate_twice_is_stable() {
    let config = project(PROJECT);
    let dir = tree(&["a.txt", "internal/b.txt", "build/c.o"]);
    let translator = Translator::from_project(&LocalFileSystem, &config, "internal", "public")
        .unwrap();

    let first = translator.translate(dir.path(), &revision("plain")).unwrap();
    let second = translator.translate(dir.path(), &revision("plain")).unwrap();

    assert_eq!(first.deleted.len(), 2);
    assert!(second.deleted.is_empty());
    assert_eq!(remaining(dir.path()), vec!["a.txt"]);
    assert!(!second.metadata_changed);
}

#[test]
fn test_metadata_untouched_without_marker_or_policy() {
    let json = r#"{"name": "w", "translators": [
        {"from_project_space": "a", "to_project_space": "b",
         "steps": [{"name": "scrub", "editor": {"type": "scrubber"}}]}
    ]}"#;
    let config = project(json);
    let dir = tree(&["x.txt"]);
    let input = revision("ORIGINAL_AUTHOR=someone\n");

    let result = Translator::from_project(&LocalFileSystem, &config, "a", "b")
        .unwrap()
        .translate(dir.path(), &input)
        .unwrap();

    assert!(!result.metadata_changed);
    assert_eq!(result.metadata, input);
    assert_eq!(remaining(dir.path()), vec!["x.txt"]);
}

#[test]
fn test_inverse_translator_cannot_run() {
    let config = project(PROJECT);
    let err = Translator::from_project(&LocalFileSystem, &config, "public", "internal")
        .err()
        .unwrap();

    assert_eq!(err.field, "inverse");
}

#[test]
fn test_unknown_translator() {
    let config = project(PROJECT);
    let err = Translator::from_project(&LocalFileSystem, &config, "internal", "mars")
        .err()
        .unwrap();

    assert_eq!(err.field, "translators");
    assert!(err.message.contains("mars"));
}

#[test]
fn test_invalid_config_touches_nothing() {
    let json = r#"{"from_project_space": "a", "to_project_space": "b",
        "steps": [{"name": "scrub", "editor": {"type": "scrubber", "exclude_files": ["(" ]}}]}"#;
    let translator: mig_config::TranslatorConfig = serde_json::from_str(json).unwrap();

    let err = Translator::new(&LocalFileSystem, &translator).err().unwrap();

    assert_eq!(err.step, Some(0));
    assert_eq!(err.field, "steps[0].editor.exclude_files");
    assert!(Error::from(err).is_config());
}

#[cfg(unix)]
#[test]
fn test_shell_step_runs_in_subdir() {
    let json = r#"{"name": "w", "translators": [
        {"from_project_space": "a", "to_project_space": "b",
         "steps": [
            {"name": "stamp", "editor": {"type": "shell",
                "command_string": "echo generated > STAMP\n",
                "options": {"subdir": "src"}}},
            {"name": "scrub", "editor": {"type": "scrubber", "exclude_files": ["\\.tmp$"]}}
         ]}
    ]}"#;
    let config = project(json);
    let dir = tree(&["src/main.rs", "src/junk.tmp"]);

    let result = Translator::from_project(&LocalFileSystem, &config, "a", "b")
        .unwrap()
        .translate(dir.path(), &revision("d"))
        .unwrap();

    assert_eq!(result.deleted, vec!["src/junk.tmp"]);
    assert_eq!(remaining(dir.path()), vec!["src/STAMP", "src/main.rs"]);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("src/STAMP")).unwrap(),
        "generated\n"
    );
}

#[cfg(unix)]
#[test]
fn test_failing_shell_step_is_operation_error() {
    let json = r#"{"name": "w", "translators": [
        {"from_project_space": "a", "to_project_space": "b",
         "steps": [
            {"name": "boom", "editor": {"type": "shell", "command_string": "echo oops >&2; exit 3"}},
            {"name": "scrub", "editor": {"type": "scrubber", "exclude_files": ["."]}}
         ]}
    ]}"#;
    let config = project(json);
    let dir = tree(&["keep.txt"]);

    let err = Translator::from_project(&LocalFileSystem, &config, "a", "b")
        .unwrap()
        .translate(dir.path(), &revision("d"))
        .unwrap_err();

    assert!(!err.is_config());
    match err {
        Error::Operation(OperationError::StepFailed { step, message }) => {
            assert_eq!(step, "boom");
            assert!(message.contains("oops"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // Later steps never ran
    assert_eq!(remaining(dir.path()), vec!["keep.txt"]);
}

/// Collaborator that keeps every write in memory and lists no files
#[derive(Default)]
struct RecordingFileSystem {
    writes: Mutex<Vec<PathBuf>>,
}

impl FileSystem for RecordingFileSystem {
    fn find_files(&self, _dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    fn delete_recursively(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn write(&self, _content: &str, path: &Path) -> io::Result<()> {
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn set_executable(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(unix)]
#[test]
fn test_shell_step_with_in_memory_collaborator() {
    let json = r#"{"name": "w", "translators": [
        {"from_project_space": "a", "to_project_space": "b",
         "steps": [
            {"name": "s", "editor": {"type": "shell", "command_string": "true"}},
            {"name": "scrub", "editor": {"type": "scrubber", "exclude_files": ["."]}}
         ]}
    ]}"#;
    let config = project(json);
    let dir = tree(&["keep.txt"]);
    let fs = RecordingFileSystem::default();

    let result = Translator::from_project(&fs, &config, "a", "b")
        .unwrap()
        .translate(dir.path(), &revision("d"))
        .unwrap();

    assert!(result.deleted.is_empty());
    assert!(fs.writes.lock().unwrap().is_empty());
    assert_eq!(remaining(dir.path()), vec!["keep.txt"]);
}
