//! End-to-end runs of the check flow against in-memory DNS and GeoIP.

mod helpers;

use std::path::{Path, PathBuf};

use holmes_geo::blocklist::Blocklist;
use holmes_geo::error_handling::{ProcessingStats, SkipType};
use holmes_geo::{run_check_with, Config, InputSource, Pipeline};
use tempfile::TempDir;

use helpers::{FakeGeo, FakeResolver, SharedBuffer};

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write input file");
    path
}

fn config(input: InputSource, results: &Path) -> Config {
    Config {
        input,
        results_dir: results.to_path_buf(),
        ..Default::default()
    }
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open results");
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_single_address_produces_one_row() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "ips.txt", "8.8.8.8\n");
    let config = config(InputSource::Check(input), &dir.path().join("results"));

    let resolver = FakeResolver::default().with_reverse("8.8.8.8", "dns.google");
    let (geo, blocklist, stats) = (FakeGeo::default(), Blocklist::default(), ProcessingStats::new());
    let pipeline = Pipeline {
        resolver: &resolver,
        geo: &geo,
        blocklist: &blocklist,
        reputation: None,
        reverse_dns: true,
        stats: &stats,
    };
    let console = SharedBuffer::default();

    let report = run_check_with(&config, &pipeline, console.boxed())
        .await
        .expect("run should succeed");

    assert_eq!(report.total_tokens, 1);
    assert_eq!(report.rows_written, 1);
    let csv_path = report.csv_path.expect("file output enabled");
    assert_eq!(csv_path, dir.path().join("results").join("ips_ipinfo.csv"));
    assert_eq!(
        report.xlsx_path,
        Some(dir.path().join("results").join("ips_ipinfo.xlsx"))
    );

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 2);
    let header = &rows[0];
    assert_eq!(header.len(), 12);
    assert_eq!(header.last().map(String::as_str), Some("Reverse DNS"));
    assert!(!header.iter().any(|h| h == "Certificate CN"));
    assert!(!header.iter().any(|h| h == "Domain Registrar URL"));

    let row = &rows[1];
    assert_eq!(row[0], "8.8.8.8");
    assert_eq!(row[1], "N/A");
    assert_eq!(row[5], "United States");
    assert_eq!(row[6], "US");
    assert_eq!(row[10], "8.8.8.8/24");
    assert_eq!(row[11], "dns.google");

    let mirrored = console.contents();
    assert!(mirrored.starts_with("IP Address,IP Category,City"));
    assert!(mirrored.contains("8.8.8.8,N/A,N/A,37.751,-97.822,United States,US"));
}

#[tokio::test]
async fn test_unresolvable_domain_yields_zero_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "domains.txt", "not-a-real-domain.invalid\n");
    let config = config(InputSource::Check(input), &dir.path().join("results"));

    let resolver = FakeResolver::default();
    let (geo, blocklist, stats) = (FakeGeo::default(), Blocklist::default(), ProcessingStats::new());
    let pipeline = Pipeline {
        resolver: &resolver,
        geo: &geo,
        blocklist: &blocklist,
        reputation: None,
        reverse_dns: true,
        stats: &stats,
    };

    let report = run_check_with(&config, &pipeline, SharedBuffer::default().boxed())
        .await
        .expect("an unresolvable domain is not fatal");

    assert_eq!(report.rows_written, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(stats.get_skip_count(SkipType::UnresolvableDomain), 1);
    let rows = read_rows(&report.csv_path.unwrap());
    assert_eq!(rows.len(), 1, "only the header is written");
}

#[tokio::test]
async fn test_missing_asn_database_drops_every_row() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "ips.txt", "8.8.8.8\n1.1.1.1\n");
    let config = Config {
        reverse_dns: false,
        file_output: false,
        ..config(InputSource::Check(input), &dir.path().join("results"))
    };

    let resolver = FakeResolver::default();
    let geo = FakeGeo {
        asn: false,
        ..Default::default()
    };
    let (blocklist, stats) = (Blocklist::default(), ProcessingStats::new());
    let pipeline = Pipeline {
        resolver: &resolver,
        geo: &geo,
        blocklist: &blocklist,
        reputation: None,
        reverse_dns: false,
        stats: &stats,
    };
    let console = SharedBuffer::default();

    let report = run_check_with(&config, &pipeline, console.boxed())
        .await
        .unwrap();
    assert_eq!(report.rows_written, 0);
    assert_eq!(stats.get_skip_count(SkipType::IncompleteGeoData), 2);
    assert_eq!(console.contents().lines().count(), 1);
}

#[tokio::test]
async fn test_domain_resolves_and_uses_domain_category() {
    let dir = TempDir::new().unwrap();
    let lists = dir.path().join("outsource_db");
    std::fs::create_dir_all(&lists).unwrap();
    std::fs::write(lists.join("phishing.txt"), "example.com\n").unwrap();

    let input = write_input(dir.path(), "ips.txt", "# watchlist\nexample.com\n\n");
    let config = Config {
        file_output: false,
        reverse_dns: false,
        ..config(InputSource::Check(input), &dir.path().join("results"))
    };

    let resolver = FakeResolver::default().with_forward("example.com", "93.184.216.34");
    let (geo, stats) = (FakeGeo::default(), ProcessingStats::new());
    let blocklist = Blocklist::load(&lists);
    let pipeline = Pipeline {
        resolver: &resolver,
        geo: &geo,
        blocklist: &blocklist,
        reputation: None,
        reverse_dns: false,
        stats: &stats,
    };
    let console = SharedBuffer::default();

    let report = run_check_with(&config, &pipeline, console.boxed())
        .await
        .unwrap();
    assert_eq!(report.rows_written, 1);
    assert_eq!(report.csv_path, None);
    assert!(console.contents().contains("93.184.216.34,PHISHING,"));
    assert!(!dir.path().join("results").exists());
}

#[tokio::test]
async fn test_apache_log_adds_user_agent_column() {
    let dir = TempDir::new().unwrap();
    let log = "\
8.8.8.8 - - [10/Oct/2024:13:55:36 +0000] \"GET / HTTP/1.1\" 200 2326 \"-\" \"curl/8.4.0\"
8.8.8.8 - - [10/Oct/2024:13:55:37 +0000] \"GET /a HTTP/1.1\" 404 12
999.1.1.1 - - [10/Oct/2024:13:55:38 +0000] \"GET / HTTP/1.1\" 200 2326 \"-\" \"bot\"
";
    let input = write_input(dir.path(), "access.log", log);
    let config = Config {
        reverse_dns: false,
        ..config(InputSource::Apache(input), &dir.path().join("results"))
    };

    let resolver = FakeResolver::default();
    let (geo, blocklist, stats) = (FakeGeo::default(), Blocklist::default(), ProcessingStats::new());
    let pipeline = Pipeline {
        resolver: &resolver,
        geo: &geo,
        blocklist: &blocklist,
        reputation: None,
        reverse_dns: false,
        stats: &stats,
    };

    let report = run_check_with(&config, &pipeline, SharedBuffer::default().boxed())
        .await
        .unwrap();
    assert_eq!(report.rows_written, 2, "apache mode keeps duplicates");

    let rows = read_rows(&report.csv_path.unwrap());
    assert_eq!(rows[0].last().map(String::as_str), Some("User Agent"));
    assert_eq!(rows[1].last().map(String::as_str), Some("curl/8.4.0"));
    assert_eq!(rows[2].last().map(String::as_str), Some("N/A"));
    assert!(rows.iter().all(|row| row.len() == rows[0].len()));
}

#[tokio::test]
async fn test_missing_input_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config(
        InputSource::Check(dir.path().join("missing.txt")),
        &dir.path().join("results"),
    );

    let resolver = FakeResolver::default();
    let (geo, blocklist, stats) = (FakeGeo::default(), Blocklist::default(), ProcessingStats::new());
    let pipeline = Pipeline {
        resolver: &resolver,
        geo: &geo,
        blocklist: &blocklist,
        reputation: None,
        reverse_dns: true,
        stats: &stats,
    };

    let err = run_check_with(&config, &pipeline, SharedBuffer::default().boxed())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(!dir.path().join("results").exists());
}

#[tokio::test]
async fn test_missing_csv_column_ends_gracefully() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "hits.csv", "src,dst\n1.1.1.1,8.8.8.8\n");
    let config = config(
        InputSource::Csv {
            path: input,
            column: Some("ip_field".to_string()),
        },
        &dir.path().join("results"),
    );

    let resolver = FakeResolver::default();
    let (geo, blocklist, stats) = (FakeGeo::default(), Blocklist::default(), ProcessingStats::new());
    let pipeline = Pipeline {
        resolver: &resolver,
        geo: &geo,
        blocklist: &blocklist,
        reputation: None,
        reverse_dns: true,
        stats: &stats,
    };

    let report = run_check_with(&config, &pipeline, SharedBuffer::default().boxed())
        .await
        .expect("a missing column is not fatal");
    assert_eq!(report.rows_written, 0);
    assert_eq!(report.csv_path, None);
}
