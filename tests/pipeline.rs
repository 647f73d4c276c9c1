use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use match_tables::process::process_site_with;
use match_tables::request::Fetcher;
use match_tables::{Config, Error, Locale, Result};

struct StubFetcher {
    pages: HashMap<String, String>,
}

impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::FetchTimeout { url: url.to_string() })
    }
}

fn roster_table() -> &'static str {
    r#"<table class="stats_table sortable">
      <thead>
        <tr class="over_header"><th colspan="3"></th><th>Rendimiento</th></tr>
        <tr><th>Jugador</th><th>País</th><th>Edad</th><th>Gls.</th></tr>
      </thead>
      <tbody>
        <tr><th>Cole Palmer</th><td>eng ENG</td><td>22-341</td><td>1</td></tr>
        <tr class="spacer"><td></td><td></td><td></td><td></td></tr>
        <tr><th>Marc Cucurella</th><td>es ESP</td><td>26-246</td><td>0</td></tr>
      </tbody>
      <tfoot><tr><th>16 jugadores</th><td></td><td></td><td>1</td></tr></tfoot>
    </table>"#
}

fn page(title: &str, tables: usize) -> String {
    let mut html = format!("<html><body><h1>{title}</h1>");
    for i in 0..tables {
        if i == 0 {
            html.push_str(roster_table());
        } else {
            html.push_str(&format!(
                r#"<table class="stats_table"><thead><tr><th>Minuto</th><th>Valor</th></tr></thead>
                <tbody><tr><td>{i}</td><td>x</td></tr></tbody></table>"#
            ));
        }
    }
    html.push_str("</body></html>");
    html
}

fn config(root: &Path, urls: &[&str]) -> Config {
    Config {
        urls: urls.iter().map(|u| u.to_string()).collect(),
        output_root: root.to_path_buf(),
        write_bom: false,
        locale: Locale::SPANISH,
        ..Config::default()
    }
}

/// Relative path -> file contents for everything under `root`.
fn snapshot(root: &Path) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for dir in std::fs::read_dir(root).unwrap() {
        let dir = dir.unwrap();
        for file in std::fs::read_dir(dir.path()).unwrap() {
            let file = file.unwrap();
            let key = format!(
                "{}/{}",
                dir.file_name().to_string_lossy(),
                file.file_name().to_string_lossy()
            );
            out.insert(key, std::fs::read_to_string(file.path()).unwrap());
        }
    }
    out
}

#[tokio::test]
async fn eighteen_tables_get_named_and_cleaned() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("partidos");
    let url = "https://example.test/chelsea-spurs";
    let fetcher = StubFetcher {
        pages: HashMap::from([(
            url.to_string(),
            page("Chelsea vs. Tottenham Hotspur Informe del partido", 18),
        )]),
    };

    let summary = process_site_with(&fetcher, &config(&root, &[url])).await.unwrap();

    assert_eq!(summary.matches.len(), 1);
    assert_eq!(summary.matches[0].written, (1..=18).collect::<Vec<_>>());
    let dir = root.join("Chelsea_vs_Tottenham_Hotspur");
    for name in [
        "Chelsea_Resumen.csv",
        "Chelsea_Portero.csv",
        "Tottenham_Hotspur_Resumen.csv",
        "Tottenham_Hotspur_Portero.csv",
        "Tiros_ambos_equipos.csv",
        "Chelsea_tiros.csv",
        "Tottenham_Hotspur_tiros.csv",
        "table_18.csv",
    ] {
        assert!(dir.join(name).is_file(), "missing {name}");
    }
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 18);

    let resumen = std::fs::read_to_string(dir.join("Chelsea_Resumen.csv")).unwrap();
    assert_eq!(
        resumen,
        "Jugador,País,Edad,Gls.\nCole Palmer,ENG,22,1\nMarc Cucurella,ESP,26,0\n"
    );

    let report = summary.matches[0].renames.as_ref().unwrap();
    assert_eq!(report.renamed.len(), 17);
    assert_eq!(report.positional, vec!["table_18.csv".to_string()]);
    assert!(report.collisions.is_empty());
}

#[tokio::test]
async fn unknown_title_keeps_positional_names() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("partidos");
    let url = "https://example.test/mystery";
    let fetcher = StubFetcher {
        pages: HashMap::from([(url.to_string(), page("Resumen de la jornada", 3))]),
    };

    let summary = process_site_with(&fetcher, &config(&root, &[url])).await.unwrap();

    let dir = &summary.matches[0].dir;
    let dir_name = dir.file_name().unwrap().to_string_lossy().into_owned();
    let digits = dir_name.strip_prefix("partido_desconocido_").unwrap();
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
    for n in 1..=3 {
        assert!(dir.join(format!("table_{n}.csv")).is_file());
    }
}

#[tokio::test]
async fn failed_page_and_bad_table_do_not_stop_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("partidos");
    let good = "https://example.test/good";
    let broken_table = r#"<table class="stats_table"><thead><tr><th>a</th></tr></thead>
        <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"#;
    let html = page("Fulham vs. Chelsea Informe del partido", 2)
        .replace("<h1>", &format!("{broken_table}<h1>"));
    let fetcher = StubFetcher {
        pages: HashMap::from([(good.to_string(), html)]),
    };

    let summary = process_site_with(
        &fetcher,
        &config(&root, &["https://example.test/down", good]),
    )
    .await
    .unwrap();

    assert_eq!(summary.failed_urls, vec!["https://example.test/down".to_string()]);
    let output = &summary.matches[0];
    assert_eq!(output.skipped, vec![1]);
    assert_eq!(output.written, vec![2, 3]);
    let dir = root.join("Fulham_vs_Chelsea");
    assert!(dir.join("Fulham_Pases.csv").is_file());
    assert!(dir.join("Fulham_TiposPases.csv").is_file());
    assert!(!dir.join("Fulham_Resumen.csv").exists());
}

#[tokio::test]
async fn rerun_produces_the_same_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("partidos");
    let urls = ["https://example.test/a", "https://example.test/b"];
    let fetcher = StubFetcher {
        pages: HashMap::from([
            (urls[0].to_string(), page("Chelsea vs. Everton Informe del partido", 17)),
            (urls[1].to_string(), page("Brentford vs. Chelsea Informe del partido", 5)),
        ]),
    };
    let config = config(&root, &urls);

    process_site_with(&fetcher, &config).await.unwrap();
    let first = snapshot(&root);
    std::fs::write(root.join("Chelsea_vs_Everton/stray.csv"), "old").unwrap();
    process_site_with(&fetcher, &config).await.unwrap();

    assert_eq!(first, snapshot(&root));
    assert_eq!(first.len(), 22);
}

#[tokio::test]
async fn two_unreadable_titles_get_their_own_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("partidos");
    let urls = ["https://example.test/first", "https://example.test/second"];
    let second_page = page("Resumen B", 1).replace("Cole Palmer", "Reece James");
    let fetcher = StubFetcher {
        pages: HashMap::from([
            (urls[0].to_string(), page("Resumen A", 1)),
            (urls[1].to_string(), second_page),
        ]),
    };

    let summary = process_site_with(&fetcher, &config(&root, &urls)).await.unwrap();

    let (first, second) = (&summary.matches[0], &summary.matches[1]);
    assert_ne!(first.dir, second.dir);
    assert_ne!(first.identity, second.identity);
    assert_eq!(second.dir.file_name().unwrap().to_string_lossy(), second.identity.dir_name());
    assert_eq!(std::fs::read_dir(&root).unwrap().count(), 2);

    let first_csv = std::fs::read_to_string(first.dir.join("table_1.csv")).unwrap();
    let second_csv = std::fs::read_to_string(second.dir.join("table_1.csv")).unwrap();
    assert!(first_csv.contains("Cole Palmer"));
    assert!(second_csv.contains("Reece James"));
}
