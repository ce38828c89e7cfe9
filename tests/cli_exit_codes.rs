use std::path::Path;
use std::process::Output;

use iconsync_lib::SyncOutput;
use serde_json::json;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_KEYS: &[&str] = &[
    "ICONSYNC_CONFIG",
    "FIGMA_ACCESS_TOKEN",
    "FIGMA_FILE_ID",
    "FIGMA_PAGE",
    "FIGMA_FRAME",
    "EXPORT_PATH",
    "REMOVE_FROM_NAME",
    "INDEX_FILE",
    "FIGMA_API_URL",
    "RUST_LOG",
];

async fn run_iconsync(cwd: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_iconsync"));
    cmd.current_dir(cwd).args(args);
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.output().await.expect("run iconsync")
}

async fn mount_file(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/files/FILE"))
        .and(header("X-Figma-Token", "token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Design System",
            "document": {"children": [
                {"id": "0:1", "name": "Cover", "children": []},
                {"id": "0:2", "name": "Icons", "children": [
                    {"id": "1:1", "name": "Glyphs", "children": [
                        {"id": "2:1", "name": "sun"},
                        {"id": "2:2", "name": "Regular/moon_icon"}
                    ]}
                ]}
            ]}
        })))
        .mount(server)
        .await;
}

async fn mount_images(server: &MockServer, moon_route: &str) {
    Mock::given(method("GET"))
        .and(path("/images/FILE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "err": null,
            "images": {
                "2:1": format!("{}/s3/sun", server.uri()),
                "2:2": format!("{}{}", server.uri(), moon_route)
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s3/sun"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<svg width=\"24\"><path fill=\"#123456\"/></svg>"),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s3/moon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<svg></svg>"))
        .mount(server)
        .await;
}

fn base_args<'a>(
    server_uri: &'a str,
    export: &'a str,
    page: &'a str,
    frame: &'a str,
) -> Vec<&'a str> {
    vec![
        "--token",
        "token",
        "--file-id",
        "FILE",
        "--page",
        page,
        "--frame",
        frame,
        "--export-path",
        export,
        "--api-url",
        server_uri,
        "--format",
        "json",
        "--quiet",
    ]
}

#[tokio::test]
async fn sync_exits_zero_and_writes_files() {
    let server = MockServer::start().await;
    mount_file(&server).await;
    mount_images(&server, "/s3/moon").await;
    let dir = TempDir::new().expect("tempdir");
    let export = dir.path().join("icons");
    let uri = server.uri();

    let output = run_iconsync(
        dir.path(),
        &base_args(&uri, export.to_str().unwrap(), "Icons", "Glyphs"),
    )
    .await;

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let body: SyncOutput = serde_json::from_slice(&output.stdout).expect("json output");
    match body {
        SyncOutput::Sync(summary) => {
            assert_eq!(summary.count, 2);
            let paths: Vec<&str> = summary
                .icons
                .iter()
                .map(|i| i.relative_path.as_str())
                .collect();
            assert_eq!(paths, vec!["sun.svg", "Regular/moon-icon.svg"]);
        }
        other => panic!("expected sync output, got {other:?}"),
    }

    assert!(export.join("Regular/moon-icon.svg").exists());
    let sun = std::fs::read_to_string(export.join("sun.svg")).expect("sun");
    assert_eq!(sun, "<svg><path fill=\"currentColor\"/></svg>");
    let index = std::fs::read_to_string(export.join("index.jsx")).expect("index");
    assert_eq!(
        index,
        "export { default as SunSvg } from './sun.svg?react';\n\
         export { default as MoonIconSvg } from './moon-icon.svg?react';\n"
    );
}

#[tokio::test]
async fn missing_page_exits_nonzero() {
    let server = MockServer::start().await;
    mount_file(&server).await;
    let dir = TempDir::new().expect("tempdir");
    let export = dir.path().join("icons");
    let uri = server.uri();

    let output = run_iconsync(
        dir.path(),
        &base_args(&uri, export.to_str().unwrap(), "Nope", "-1"),
    )
    .await;

    assert_eq!(output.status.code(), Some(2));
    match serde_json::from_slice::<SyncOutput>(&output.stdout).expect("json error") {
        SyncOutput::Error(err) => assert!(err.error.message.contains("Nope")),
        other => panic!("expected error output, got {other:?}"),
    }
    assert!(!export.exists());
}

#[tokio::test]
async fn missing_frame_exits_nonzero() {
    let server = MockServer::start().await;
    mount_file(&server).await;
    let dir = TempDir::new().expect("tempdir");
    let export = dir.path().join("icons");
    let uri = server.uri();

    let output = run_iconsync(
        dir.path(),
        &base_args(&uri, export.to_str().unwrap(), "Icons", "Glyphs/Filled"),
    )
    .await;

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Filled"), "stdout: {stdout}");
}

#[tokio::test]
async fn failed_download_exits_nonzero_without_index() {
    let server = MockServer::start().await;
    mount_file(&server).await;
    mount_images(&server, "/s3/unavailable").await;
    let dir = TempDir::new().expect("tempdir");
    let export = dir.path().join("icons");
    let uri = server.uri();

    let output = run_iconsync(
        dir.path(),
        &base_args(&uri, export.to_str().unwrap(), "Icons", "Glyphs"),
    )
    .await;

    assert_eq!(output.status.code(), Some(2));
    assert!(!export.join("index.jsx").exists());
}

#[tokio::test]
async fn missing_required_settings_exit_nonzero() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_iconsync(dir.path(), &["--format", "json", "--quiet"]).await;

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FIGMA_ACCESS_TOKEN"), "stdout: {stdout}");
}

#[tokio::test]
async fn env_file_supplies_settings() {
    let server = MockServer::start().await;
    mount_file(&server).await;
    mount_images(&server, "/s3/moon").await;
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join(".env"),
        format!(
            "FIGMA_ACCESS_TOKEN=token\nFIGMA_FILE_ID=FILE\nFIGMA_PAGE=Icons\n\
             FIGMA_FRAME=Glyphs\nEXPORT_PATH=out\nFIGMA_API_URL={}\n",
            server.uri()
        ),
    )
    .expect("write .env");

    let output = run_iconsync(dir.path(), &["--raw", "--quiet"]).await;

    assert_eq!(
        output.status.code(),
        Some(0),
        "stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let index = std::fs::read_to_string(dir.path().join("out/index.jsx")).expect("index");
    assert!(index.starts_with("export { default as SunSvg } from './sun.svg';\n"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Finished exporting 2 icons"));
}
