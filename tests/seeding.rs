//! Seeding tests against a file-backed database and CSV sources.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use salary_benchmarks::seed::{seed_experience_bands_from_csv, seed_job_titles_from_csv, SeedOutcome};
use salary_benchmarks::store::Store;

const EXPERIENCE_BANDS_CSV: &str = "\
experience_band_code,label,min_years,max_years,default_seniority_level,description
JNR,Junior,0,2,Entry,First roles
MID,Mid-level,2,5,Mid,
SNR,Senior,5,10,Senior,Leads projects
LDR,Leadership,10,,Manager,Open ended
,Missing code,1,2,,
";

const JOB_TITLES_CSV: &str = "\
canonical_title,category,seniority_level,aliases
Backend Engineer,Engineering,Senior,Server Developer|API Engineer
Accountant,Finance,Mid,
  ,Finance,Mid,
Backend Engineer,Engineering,Mid,duplicate row
Chief Executive Officer,Management,C-Level,CEO
";

async fn open_store(dir: &TempDir) -> Store {
    let url = format!("sqlite://{}", dir.path().join("salary.sqlite3").display());
    let store = Store::connect(&url).await.unwrap();
    store.init_schema().await.unwrap();
    store
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_seed_experience_bands_from_file() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let path = write(dir.path(), "experience_bands.csv", EXPERIENCE_BANDS_CSV);

    match seed_experience_bands_from_csv(&store, &path).await.unwrap() {
        SeedOutcome::Seeded(report) => {
            assert_eq!(report.inserted, 4);
            assert_eq!(report.skipped_blank_key, 1);
            assert_eq!(report.skipped_existing, 0);
        }
        other => panic!("Expected Seeded, got {:?}", other),
    }

    let bands = store.list_experience_bands().await.unwrap();
    let codes: Vec<&str> = bands.iter().map(|b| b.code.as_str()).collect();
    assert_eq!(codes, vec!["JNR", "MID", "SNR", "LDR"]);

    let leadership = store.get_experience_band("LDR").await.unwrap().unwrap();
    assert_eq!(leadership.min_years, Some(10));
    assert_eq!(leadership.max_years, None);

    let mid = store.get_experience_band("MID").await.unwrap().unwrap();
    assert_eq!(mid.description, None);
}

#[tokio::test]
async fn test_seed_job_titles_skips_duplicates_within_file() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let path = write(dir.path(), "job_titles.csv", JOB_TITLES_CSV);

    match seed_job_titles_from_csv(&store, &path).await.unwrap() {
        SeedOutcome::Seeded(report) => {
            assert_eq!(report.inserted, 3);
            assert_eq!(report.skipped_blank_key, 1);
            assert_eq!(report.skipped_existing, 1);
            assert_eq!(report.rows_read(), 5);
        }
        other => panic!("Expected Seeded, got {:?}", other),
    }

    let backend = store
        .find_job_title_by_title("Backend Engineer")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(backend.seniority_level, "Senior");
    assert_eq!(backend.alias_list(), vec!["Server Developer", "API Engineer"]);

    let accountant = store.find_job_title_by_title("Accountant").await.unwrap().unwrap();
    assert_eq!(accountant.aliases, None);
}

#[tokio::test]
async fn test_reseeding_is_idempotent_across_connections() {
    let dir = TempDir::new().unwrap();
    let bands = write(dir.path(), "experience_bands.csv", EXPERIENCE_BANDS_CSV);
    let titles = write(dir.path(), "job_titles.csv", JOB_TITLES_CSV);

    {
        let store = open_store(&dir).await;
        seed_experience_bands_from_csv(&store, &bands).await.unwrap();
        seed_job_titles_from_csv(&store, &titles).await.unwrap();
        store.close().await;
    }

    let store = open_store(&dir).await;
    let second_bands = seed_experience_bands_from_csv(&store, &bands).await.unwrap();
    let second_titles = seed_job_titles_from_csv(&store, &titles).await.unwrap();

    assert_eq!(second_bands.inserted(), 0);
    assert_eq!(second_titles.inserted(), 0);
    assert_eq!(store.count_experience_bands().await.unwrap(), 4);
    assert_eq!(store.count_job_titles().await.unwrap(), 3);
}

#[tokio::test]
async fn test_missing_source_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let path = dir.path().join("absent.csv");

    let outcome = seed_job_titles_from_csv(&store, &path).await.unwrap();

    assert_eq!(
        outcome,
        SeedOutcome::SourceMissing {
            path: path.display().to_string()
        }
    );
    assert_eq!(store.count_job_titles().await.unwrap(), 0);
}
