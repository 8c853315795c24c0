use batchmin::cli::{Cli, CliHandler, COMPLETION_MESSAGE};
use batchmin::core::models::Manifest;
use batchmin::utils::{BuildError, CONFIG_FILE_NAME};
use clap::Parser;
use std::ffi::OsString;
use std::path::Path;
use tempfile::TempDir;

const LINE_NUMBERS_JS: &str = r#"
(function () {
    function addLineNumbers(block) {
        const lines = block.innerHTML.split("\n");
        const html = lines
            .map(function (line) {
                return '<span class="hljs-ln-line">' + line + "</span>";
            })
            .join("\n");
        block.innerHTML = html;
        block.classList.add("hljs-ln");
    }

    document.querySelectorAll("pre code.hljs").forEach(addLineNumbers);
})();
"#;

const LINE_NUMBERS_CSS: &str = r#"
code.hljs-ln {
    counter-reset: line;
}

code.hljs-ln .hljs-ln-line::before {
    counter-increment: line;
    content: counter(line);
    display: inline-block;
    width: 2em;
    margin-right: 1em;
    color: #888888;
}
"#;

const NUMBERING_CSS: &str = r#"
.heading.numbering {
    margin-right: 0.25em;
    opacity: 0.75;
}
"#;

const HIDE_CSS: &str = r#"
@media print {
    .heading.numbering {
        display: none;
    }
}
"#;

/// Lay out the sources the built-in manifest expects.
fn book_sources() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("src/highlightjs")).unwrap();
    std::fs::create_dir_all(root.join("src/heading")).unwrap();

    std::fs::write(root.join("src/highlightjs/line-numbers.js"), LINE_NUMBERS_JS).unwrap();
    std::fs::write(root.join("src/highlightjs/line-numbers.css"), LINE_NUMBERS_CSS).unwrap();
    std::fs::write(root.join("src/heading/numbering.css"), NUMBERING_CSS).unwrap();
    std::fs::write(root.join("src/heading/hide.css"), HIDE_CSS).unwrap();
    dir
}

async fn build(root: &Path) -> (Result<(), BuildError>, String) {
    let cli = Cli::try_parse_from([
        OsString::from("batchmin"),
        OsString::from("build"),
        OsString::from("--root"),
        root.as_os_str().to_os_string(),
    ])
    .unwrap();

    let mut out = Vec::new();
    let result = CliHandler::new().dispatch(cli, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_builtin_manifest_build() {
    let dir = book_sources();
    let (result, stdout) = build(dir.path()).await;

    assert!(result.is_ok(), "Build should succeed: {:?}", result);
    assert_eq!(stdout, format!("{}\n", COMPLETION_MESSAGE));

    let manifest = Manifest::builtin().resolve(dir.path());
    for job in manifest.jobs() {
        let source = std::fs::read_to_string(&job.entrypoint).unwrap();
        let minified = std::fs::read_to_string(&job.output_path).unwrap();
        assert!(!minified.is_empty());
        assert!(
            minified.len() < source.len(),
            "{} should be smaller than its source",
            job.output_path.display()
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&job.output_path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o644);
        }
    }

    let script = std::fs::read_to_string(dir.path().join("src/highlightjs/line-numbers-min.js")).unwrap();
    assert!(script.contains("querySelectorAll"));
    let hide = std::fs::read_to_string(dir.path().join("src/heading/hide-min.css")).unwrap();
    assert!(hide.contains("@media print"));
    assert!(hide.contains("display:none"));
}

#[tokio::test]
async fn test_rebuild_produces_identical_bytes() {
    let dir = book_sources();
    let manifest = Manifest::builtin().resolve(dir.path());

    let (first, _) = build(dir.path()).await;
    assert!(first.is_ok());
    let before: Vec<Vec<u8>> = manifest
        .jobs()
        .iter()
        .map(|job| std::fs::read(&job.output_path).unwrap())
        .collect();

    let (second, _) = build(dir.path()).await;
    assert!(second.is_ok());
    for (job, bytes) in manifest.jobs().iter().zip(before) {
        assert_eq!(std::fs::read(&job.output_path).unwrap(), bytes);
    }
}

#[tokio::test]
async fn test_script_syntax_error_fails_build() {
    let dir = book_sources();
    std::fs::write(
        dir.path().join("src/highlightjs/line-numbers.js"),
        "function addLineNumbers( {",
    )
    .unwrap();

    let (result, stdout) = build(dir.path()).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Build 0 failed"));
    assert!(err.to_string().contains("line-numbers.js"));
    assert!(stdout.is_empty());
}

#[tokio::test]
async fn test_missing_entrypoint_fails_build() {
    let dir = book_sources();
    std::fs::remove_file(dir.path().join("src/heading/numbering.css")).unwrap();

    let (result, stdout) = build(dir.path()).await;

    let err = result.unwrap_err();
    assert_eq!(err.job_index(), Some(2));
    assert!(stdout.is_empty());
}

#[tokio::test]
async fn test_config_output_without_parent_is_write_failure() {
    let dir = book_sources();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{"jobs": [
            {"entrypoint": "src/heading/hide.css", "output": "dist/hide-min.css"}
        ]}"#,
    )
    .unwrap();

    let (result, stdout) = build(dir.path()).await;

    assert!(matches!(result, Err(BuildError::WriteFailure { .. })));
    assert!(stdout.is_empty());
    assert!(!dir.path().join("dist").exists());
}
