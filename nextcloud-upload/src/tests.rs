//! Tests for the nextcloud-upload CLI layer.

use std::{fs, time::Duration};

use clap::Parser;
use nextcloud_upload_lib::{ErrorKind, DEFAULT_CHUNK_SIZE};
use tempfile::TempDir;

use crate::{
    cli::Cli,
    clients::{resolve_share, share_url},
    commands::{exit_code, run},
    config::Config,
};

const SHARE_URL: &str = "https://cloud.example.com/nextcloud/s/TestToken123";

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("nextcloud-upload").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_cli_short_flags() {
    let cli = parse(&[
        "-u", SHARE_URL, "-f", "file.txt", "-p", "secret", "-n", "remote.txt", "-v",
    ]);
    assert_eq!(cli.share_url.as_deref(), Some(SHARE_URL));
    assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("file.txt")));
    assert_eq!(cli.password.as_deref(), Some("secret"));
    assert_eq!(cli.remote_name.as_deref(), Some("remote.txt"));
    assert!(cli.verbose);
    assert!(!cli.test_connection);
    assert_eq!(cli.log_level(), "debug");
}

#[test]
fn test_cli_debug_hides_password() {
    let cli = parse(&["-u", SHARE_URL, "-f", "file.txt", "-p", "hunter2"]);
    assert!(!format!("{cli:?}").contains("hunter2"));
}

#[test]
fn test_cli_file_required_for_upload() {
    assert!(Cli::try_parse_from(["nextcloud-upload", "-u", SHARE_URL]).is_err());
}

#[test]
fn test_cli_test_connection_without_file() {
    let cli = parse(&["--share-url", SHARE_URL, "--test-connection"]);
    assert!(cli.test_connection);
    assert!(cli.file.is_none());
}

#[test]
fn test_cli_verbose_conflicts_with_quiet() {
    assert!(Cli::try_parse_from(["nextcloud-upload", "-t", "-u", SHARE_URL, "-v", "-q"]).is_err());
    assert_eq!(parse(&["-t", "-u", SHARE_URL, "-q"]).log_level(), "error");
    assert_eq!(parse(&["-t", "-u", SHARE_URL]).log_level(), "info");
}

#[test]
fn test_config_loading() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[share]
url = "https://cloud.example.com/s/FromConfig"
password = "from-config"

[upload]
timeoutSecs = 120
connectTimeoutSecs = 10
chunkSize = 8192
"#,
    )
    .expect("config should be written");

    let config = Config::load(&path).expect("config should load");
    assert_eq!(
        config.share.url.as_deref(),
        Some("https://cloud.example.com/s/FromConfig")
    );
    assert!(!format!("{config:?}").contains("from-config"));

    let uploader = config.uploader_config(None);
    assert_eq!(uploader.timeout, Some(Duration::from_secs(120)));
    assert_eq!(uploader.connect_timeout, Some(Duration::from_secs(10)));
    assert_eq!(uploader.chunk_size, 8192);

    assert_eq!(
        config.uploader_config(Some(5)).timeout,
        Some(Duration::from_secs(5))
    );
}

#[test]
fn test_config_defaults() {
    let config: Config = toml::from_str("").expect("empty config should parse");
    let uploader = config.uploader_config(None);
    assert_eq!(uploader.timeout, None);
    assert_eq!(uploader.chunk_size, DEFAULT_CHUNK_SIZE);
}

#[test]
fn test_config_errors() {
    let dir = TempDir::new().expect("temp dir");
    let missing = Config::load(&dir.path().join("missing.toml")).expect_err("missing file");
    assert_eq!(missing.kind(), ErrorKind::Config);

    let path = dir.path().join("broken.toml");
    fs::write(&path, "[upload]\nchunkSize = \"big\"\n").expect("config should be written");
    let broken = Config::load(&path).expect_err("wrong type");
    assert_eq!(broken.kind(), ErrorKind::Config);
}

#[test]
fn test_flags_override_config() {
    let config: Config = toml::from_str(
        "[share]\nurl = \"https://a.example/s/CONFIG\"\npassword = \"config-pw\"\n",
    )
    .expect("config should parse");

    let cli = parse(&["-t", "-u", "https://b.example/s/FLAG", "-p", "flag-pw"]);
    let url = share_url(&cli, &config).expect("url");
    assert_eq!(url, "https://b.example/s/FLAG");
    let share = resolve_share(url, &cli, &config).expect("share");
    assert_eq!(share.token(), "FLAG");
    assert_eq!(share.password(), Some("flag-pw"));

    let cli = parse(&["-t"]);
    let url = share_url(&cli, &config).expect("url");
    let share = resolve_share(url, &cli, &config).expect("share");
    assert_eq!(share.token(), "CONFIG");
    assert_eq!(share.password(), Some("config-pw"));
}

#[test]
fn test_missing_share_url_is_an_error() {
    let cli = parse(&["-t"]);
    assert!(share_url(&cli, &Config::default()).is_err());
    assert!(run(&cli, &Config::default()).is_err());
}

#[test]
fn test_run_invalid_share_url() {
    let cli = parse(&["-q", "-u", "https://cloud.example.com/invalid/url", "-f", "file.txt"]);
    let code = run(&cli, &Config::default()).expect("run should report through exit code");
    assert_eq!(code, 2);
}

#[test]
fn test_run_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("nonexistent_123456.txt");
    let missing = missing.to_str().expect("utf-8 temp path");

    let cli = parse(&["-q", "-u", SHARE_URL, "-f", missing]);
    let code = run(&cli, &Config::default()).expect("run should report through exit code");
    assert_eq!(code, 3);
}

#[test]
fn test_exit_codes_are_distinct_per_failure() {
    assert_eq!(exit_code(None), 0);
    let codes = [
        exit_code(Some(ErrorKind::InvalidShareUrl)),
        exit_code(Some(ErrorKind::LocalFileNotFound)),
        exit_code(Some(ErrorKind::AuthenticationFailed)),
        exit_code(Some(ErrorKind::PermissionDenied)),
        exit_code(Some(ErrorKind::ShareNotFound)),
        exit_code(Some(ErrorKind::UnexpectedHttpStatus)),
        exit_code(Some(ErrorKind::Connectivity)),
    ];
    for (i, a) in codes.iter().enumerate() {
        assert_ne!(*a, 0);
        for b in &codes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
