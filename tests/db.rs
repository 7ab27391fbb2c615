//! End-to-end tests against a live PostgreSQL.
//!
//! Set `TEST_DATABASE_URL` to run them; without it each test returns early.
//! Every test works on its own handles so tests can share one database.

use jobboard::model::{CompanyField, JobField, NewCompany, NewJob};
use jobboard::sql::{FilterSpec, UpdateRequest};
use jobboard::{ensure_tables, AppError, CompanyService, JobService};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio::sync::OnceCell;

static TABLES: OnceCell<()> = OnceCell::const_new();

async fn pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database test");
        return None;
    };
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect TEST_DATABASE_URL");
    TABLES
        .get_or_init(|| async { ensure_tables(&pool).await.expect("create tables") })
        .await;
    Some(pool)
}

async fn reset(pool: &PgPool, handle: &str) {
    sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await
        .unwrap();
}

fn new_company(handle: &str, name: &str, num_employees: Option<i64>) -> NewCompany {
    NewCompany {
        handle: handle.into(),
        name: name.into(),
        description: format!("{} description", name),
        num_employees,
        logo_url: None,
    }
}

#[tokio::test]
async fn create_then_filtered_list_finds_company() {
    let Some(pool) = pool().await else { return };
    reset(&pool, "e2e-list").await;

    let created = CompanyService::create(&pool, new_company("e2e-list", "E2E Listed Co", Some(42)))
        .await
        .unwrap();
    assert_eq!(created.num_employees, Some(42));

    let filter = FilterSpec {
        text_match: Some("e2e listed".into()),
        min_bound: Some(40),
        max_bound: Some(50),
        presence: None,
    };
    let found = CompanyService::list(&pool, &filter).await.unwrap();
    assert_eq!(found, vec![created.clone()]);

    let too_small = FilterSpec {
        text_match: Some("e2e listed".into()),
        max_bound: Some(10),
        ..Default::default()
    };
    assert!(CompanyService::list(&pool, &too_small).await.unwrap().is_empty());

    let wildcard = FilterSpec {
        text_match: Some("_".into()),
        ..Default::default()
    };
    let found = CompanyService::list(&pool, &wildcard).await.unwrap();
    assert!(found.iter().all(|c| c.name.contains('_')));
    assert!(!found.iter().any(|c| c.handle == "e2e-list"));

    reset(&pool, "e2e-list").await;
}

#[tokio::test]
async fn duplicate_company_is_rejected() {
    let Some(pool) = pool().await else { return };
    reset(&pool, "e2e-dup").await;

    CompanyService::create(&pool, new_company("e2e-dup", "E2E Dup Co", None)).await.unwrap();
    let err = CompanyService::create(&pool, new_company("e2e-dup", "E2E Dup Co 2", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Duplicate(_)));

    reset(&pool, "e2e-dup").await;
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let Some(pool) = pool().await else { return };
    reset(&pool, "e2e-upd").await;
    CompanyService::create(&pool, new_company("e2e-upd", "E2E Update Co", Some(5)))
        .await
        .unwrap();

    let data = UpdateRequest::new()
        .with(CompanyField::NumEmployees, None::<i64>)
        .with(CompanyField::LogoUrl, "http://logo.example");
    let updated = CompanyService::update(&pool, "e2e-upd", &data).await.unwrap();
    assert_eq!(updated.name, "E2E Update Co");
    assert_eq!(updated.num_employees, None);
    assert_eq!(updated.logo_url.as_deref(), Some("http://logo.example"));

    reset(&pool, "e2e-upd").await;
}

#[tokio::test]
async fn update_missing_company_is_not_found() {
    let Some(pool) = pool().await else { return };
    let data = UpdateRequest::new().with(CompanyField::Name, "Nobody");
    let err = CompanyService::update(&pool, "e2e-missing", &data).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = CompanyService::remove(&pool, "e2e-missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn jobs_round_trip_through_company() {
    let Some(pool) = pool().await else { return };
    reset(&pool, "e2e-jobs").await;
    CompanyService::create(&pool, new_company("e2e-jobs", "E2E Jobs Co", None))
        .await
        .unwrap();

    let job = JobService::create(
        &pool,
        NewJob {
            title: "E2E Engineer".into(),
            salary: Some(100_000),
            equity: Some("0.05".into()),
            company_handle: "e2e-jobs".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(job.equity.as_deref(), Some("0.05"));

    let detail = CompanyService::get(&pool, "e2e-jobs").await.unwrap();
    assert_eq!(detail.jobs, vec![job.clone()]);

    let job_detail = JobService::get(&pool, job.id as i64).await.unwrap();
    assert_eq!(job_detail.company.handle, "e2e-jobs");

    let filter = FilterSpec {
        text_match: Some("e2e engineer".into()),
        min_bound: Some(90_000),
        presence: Some(true),
        ..Default::default()
    };
    let found = JobService::list(&pool, &filter).await.unwrap();
    assert!(found.iter().any(|j| j.id == job.id));

    let data = UpdateRequest::new().with(JobField::Equity, Some(Decimal::ZERO));
    let updated = JobService::update(&pool, job.id as i64, &data).await.unwrap();
    assert_eq!(updated.salary, Some(100_000));
    let found = JobService::list(&pool, &filter).await.unwrap();
    assert!(!found.iter().any(|j| j.id == job.id));

    JobService::remove(&pool, job.id as i64).await.unwrap();
    assert!(matches!(
        JobService::get(&pool, job.id as i64).await,
        Err(AppError::NotFound(_))
    ));

    reset(&pool, "e2e-jobs").await;
}

#[tokio::test]
async fn job_for_unknown_company_is_rejected() {
    let Some(pool) = pool().await else { return };
    let err = JobService::create(
        &pool,
        NewJob {
            title: "Orphan".into(),
            salary: None,
            equity: None,
            company_handle: "e2e-no-such-company".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn equity_round_trips_exactly() {
    let Some(pool) = pool().await else { return };
    reset(&pool, "e2e-equity").await;
    CompanyService::create(&pool, new_company("e2e-equity", "E2E Equity Co", None))
        .await
        .unwrap();

    let job = JobService::create(
        &pool,
        NewJob {
            title: "E2E Precise".into(),
            salary: None,
            equity: Some("0.1234567890123456789".into()),
            company_handle: "e2e-equity".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(job.equity.as_deref(), Some("0.1234567890123456789"));

    let exact: Decimal = "0.9876543210987654321".parse().unwrap();
    let data = UpdateRequest::new().with(JobField::Equity, Some(exact));
    let updated = JobService::update(&pool, job.id as i64, &data).await.unwrap();
    assert_eq!(updated.equity.as_deref(), Some("0.9876543210987654321"));

    reset(&pool, "e2e-equity").await;
}
